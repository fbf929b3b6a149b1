//! The normalized application record written to the catalog.

use serde::{Deserialize, Serialize};

/// License recorded when a package declares none.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// One flattened, locale-resolved application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedApplication {
    /// Key of the package in the upstream index.
    pub package_id: String,

    /// Display name.
    pub name: String,

    /// Short description, empty when upstream has none.
    pub summary: String,

    pub license: String,

    pub icon_url: String,

    #[serde(default)]
    pub categories: Vec<String>,

    /// Public source repository. Always non-empty in a written catalog.
    pub source_code_url: Option<String>,

    /// Milliseconds since the epoch, as upstream reports it.
    pub last_updated: Option<i64>,

    pub platform_tags: Vec<String>,

    /// F-Droid detail page.
    pub fdroid_url: String,
}
