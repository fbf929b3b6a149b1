//! Raw index document shapes.
//!
//! Only the parts of `index-v2.json` the pipeline reads are modelled here.
//! Everything is optional: upstream schema versions disagree, and a missing
//! field must resolve to a fallback rather than fail.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Locale code to localized value.
pub type LocaleMap = Map<String, Value>;

/// The whole upstream payload.
///
/// Package entries stay as raw JSON so each one can be decoded (and fail)
/// on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIndexDocument {
    #[serde(default)]
    pub packages: Option<Map<String, Value>>,
}

impl RawIndexDocument {
    /// Iterate packages in document order.
    pub fn packages(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.packages.iter().flat_map(|p| p.iter())
    }

    pub fn package_count(&self) -> usize {
        self.packages.as_ref().map_or(0, Map::len)
    }
}

/// One entry of the `packages` mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPackageEntry {
    #[serde(default)]
    pub metadata: Option<Metadata>,

    /// Explicit recency timestamp (milliseconds), when the schema has one.
    /// Untyped: an odd shape means "no timestamp", not a broken package.
    #[serde(default)]
    pub last_updated: Option<Value>,

    /// Version id to version manifest. Only read for recency.
    #[serde(default)]
    pub versions: Option<Value>,
}

/// The `metadata` block of a package.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub name: Option<LocaleMap>,

    #[serde(default)]
    pub summary: Option<LocaleMap>,

    /// Locale map of icon descriptors. Kept untyped, the icon resolver
    /// treats any odd shape as "no icon".
    #[serde(default)]
    pub icon: Option<Value>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub categories: Option<Vec<String>>,

    #[serde(default)]
    pub source_code: Option<String>,

    #[serde(default)]
    pub last_updated: Option<Value>,
}

impl RawPackageEntry {
    /// Entry-level `lastUpdated`, if it is a usable timestamp.
    pub fn explicit_last_updated(&self) -> Option<i64> {
        self.last_updated.as_ref().and_then(timestamp)
    }

    /// `added` timestamp of the first version in document order.
    ///
    /// Upstream lists the newest version first, so no comparison across
    /// versions is done.
    pub fn first_version_added(&self) -> Option<i64> {
        self.versions
            .as_ref()?
            .as_object()?
            .values()
            .next()?
            .get("added")
            .and_then(timestamp)
    }
}

impl Metadata {
    /// Metadata-level `lastUpdated`, if it is a usable timestamp.
    pub fn last_updated(&self) -> Option<i64> {
        self.last_updated.as_ref().and_then(timestamp)
    }
}

/// Integer milliseconds. Floats are truncated; strings and anything else
/// are not timestamps.
fn timestamp(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}
