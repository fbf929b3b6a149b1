//! F-Droid catalog builder
//!
//! Downloads the F-Droid `index-v2.json`, normalizes every package into a
//! flat [`NormalizedApplication`] record and writes the apps that publish a
//! source code URL as a JSON array.
//!
//! This crate provides:
//! - Index fetcher with classified transport/HTTP/decode failures
//! - Locale and icon resolution with defined fallbacks
//! - Per-package normalization with fault isolation
//! - Atomic JSON catalog writer

pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod icon;
pub mod index;
pub mod locale;
pub mod normalize;
pub mod pipeline;
pub mod writer;

pub use app::NormalizedApplication;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, FetchError, PackageError, WriteError};
pub use pipeline::{run, RunSummary};
