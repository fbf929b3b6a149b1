//! Package normalization.
//!
//! Each package entry is decoded on its own, so a malformed entry turns into
//! a [`PackageError`] for that package and the batch carries on.

use serde::Deserialize;
use serde_json::Value;

use crate::app::{NormalizedApplication, UNKNOWN_LICENSE};
use crate::config::CatalogConfig;
use crate::error::PackageError;
use crate::icon::IconResolver;
use crate::index::{Metadata, RawIndexDocument, RawPackageEntry};
use crate::locale::LocaleResolver;

/// Progress is logged every this many packages.
const PROGRESS_INTERVAL: usize = 500;

/// Result of a normalization pass, in document order.
#[derive(Debug, Default)]
pub struct Normalized {
    pub records: Vec<NormalizedApplication>,
    pub errors: Vec<PackageError>,
}

/// Turns raw package entries into [`NormalizedApplication`]s.
#[derive(Debug, Clone)]
pub struct PackageNormalizer {
    locales: LocaleResolver,
    icons: IconResolver,
    detail_base_url: String,
    platform: String,
}

impl PackageNormalizer {
    pub fn new(
        locales: LocaleResolver,
        icons: IconResolver,
        detail_base_url: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            locales,
            icons,
            detail_base_url: detail_base_url.into(),
            platform: platform.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            LocaleResolver::new(config.locales.iter().cloned()),
            IconResolver::new(&config.icon_base_url, &config.placeholder_icon_url),
            &config.detail_base_url,
            &config.platform,
        )
    }

    /// Normalize one package entry.
    pub fn normalize(
        &self,
        package_id: &str,
        raw: &Value,
    ) -> Result<NormalizedApplication, PackageError> {
        let entry = RawPackageEntry::deserialize(raw)
            .map_err(|e| PackageError::new(package_id, e.to_string()))?;
        let last_updated = last_updated(&entry);
        let metadata = entry.metadata.unwrap_or_default();

        Ok(self.build(package_id, metadata, last_updated))
    }

    fn build(
        &self,
        package_id: &str,
        metadata: Metadata,
        last_updated: Option<i64>,
    ) -> NormalizedApplication {
        NormalizedApplication {
            package_id: package_id.to_string(),
            name: self.locales.resolve(metadata.name.as_ref(), package_id),
            summary: self.locales.resolve(metadata.summary.as_ref(), ""),
            license: metadata
                .license
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_LICENSE.to_string()),
            icon_url: self.icons.resolve(metadata.icon.as_ref()),
            categories: metadata.categories.unwrap_or_default(),
            source_code_url: metadata.source_code,
            last_updated,
            platform_tags: vec![self.platform.clone()],
            fdroid_url: format!("{}{}/", self.detail_base_url, package_id),
        }
    }

    /// Normalize every package in the document.
    pub fn normalize_all(&self, document: &RawIndexDocument) -> Normalized {
        let total = document.package_count();
        let mut out = Normalized {
            records: Vec::with_capacity(total),
            errors: Vec::new(),
        };

        for (processed, (package_id, raw)) in document.packages().enumerate() {
            match self.normalize(package_id, raw) {
                Ok(record) => out.records.push(record),
                Err(e) => {
                    tracing::warn!(package_id = %e.package_id, error = %e.cause, "Skipping package");
                    out.errors.push(e);
                }
            }

            if (processed + 1) % PROGRESS_INTERVAL == 0 {
                tracing::info!(processed = processed + 1, total, "Normalizing packages");
            }
        }

        out
    }
}

/// Entry timestamp, then metadata timestamp, then the first listed
/// version's `added`.
fn last_updated(entry: &RawPackageEntry) -> Option<i64> {
    entry
        .explicit_last_updated()
        .or_else(|| entry.metadata.as_ref().and_then(Metadata::last_updated))
        .or_else(|| entry.first_version_added())
}
