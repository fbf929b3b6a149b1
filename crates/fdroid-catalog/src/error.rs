//! Error types for the catalog pipeline.
//!
//! Fetch and write failures abort a run. A [`PackageError`] only ever
//! affects the one package it names.

use thiserror::Error;

/// Failures retrieving or decoding the index document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network unreachable, DNS, TLS, connection reset or timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The body was received but is not a usable index document.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Failures persisting the output artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Records could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The temp file could not replace the destination.
    #[error("Failed to replace {path}: {cause}")]
    Persist { path: String, cause: String },
}

/// A single package that could not be normalized.
#[derive(Debug, Clone, Error)]
#[error("Package {package_id}: {cause}")]
pub struct PackageError {
    pub package_id: String,
    pub cause: String,
}

impl PackageError {
    pub fn new(package_id: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            cause: cause.into(),
        }
    }
}

/// Run-level errors. Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetch or decode error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Output could not be written
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

impl CatalogError {
    /// Process exit status for this failure.
    ///
    /// Fetch and write failures get distinct codes so an operator can tell
    /// "nothing to write" from "had data, could not write it".
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::Config(_) => 1,
            CatalogError::Fetch(_) => 2,
            CatalogError::Write(_) => 3,
        }
    }
}

impl From<envy::Error> for CatalogError {
    fn from(err: envy::Error) -> Self {
        CatalogError::Config(err.to_string())
    }
}

/// Result type alias using CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
