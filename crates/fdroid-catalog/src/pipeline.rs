//! End-to-end catalog run: fetch, normalize, filter, write.

use std::path::PathBuf;

use crate::app::NormalizedApplication;
use crate::config::CatalogConfig;
use crate::error::{CatalogResult, PackageError};
use crate::fetch::IndexFetcher;
use crate::filter::qualifies;
use crate::index::RawIndexDocument;
use crate::normalize::PackageNormalizer;
use crate::writer::CatalogWriter;

/// Qualifying apps plus the bookkeeping of how they were selected.
#[derive(Debug, Default)]
pub struct Catalog {
    pub apps: Vec<NormalizedApplication>,
    pub total_packages: usize,
    pub excluded: usize,
    pub errors: Vec<PackageError>,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub total_packages: usize,
    pub included: usize,
    pub excluded: usize,
    pub errors: Vec<PackageError>,
    pub output: PathBuf,
    pub bytes: u64,
}

/// Normalize and filter a decoded document.
pub fn build_catalog(document: &RawIndexDocument, normalizer: &PackageNormalizer) -> Catalog {
    let total_packages = document.package_count();
    if total_packages == 0 {
        tracing::warn!("Index contains no packages");
    } else {
        tracing::info!(total = total_packages, "Packages found");
    }

    let normalized = normalizer.normalize_all(document);
    let candidates = normalized.records.len();
    let apps: Vec<NormalizedApplication> =
        normalized.records.into_iter().filter(qualifies).collect();

    Catalog {
        excluded: candidates - apps.len(),
        apps,
        total_packages,
        errors: normalized.errors,
    }
}

/// Run the whole pipeline for `config`.
///
/// Fetch and write failures abort the run before anything is written. An
/// empty catalog is written as `[]` and is not an error.
pub async fn run(config: &CatalogConfig) -> CatalogResult<RunSummary> {
    config.validate()?;

    let fetcher = IndexFetcher::from_config(config)?;
    let document = fetcher.fetch(&config.index_url).await?;

    let catalog = build_catalog(&document, &PackageNormalizer::from_config(config));
    drop(document);

    if catalog.apps.is_empty() {
        tracing::warn!("No apps with a source code URL found");
    }

    let written = CatalogWriter::new(config.pretty).write(&catalog.apps, &config.output)?;

    tracing::info!(
        total = catalog.total_packages,
        included = catalog.apps.len(),
        excluded = catalog.excluded,
        failed = catalog.errors.len(),
        "Catalog built"
    );
    tracing::info!(
        path = %written.path.display(),
        bytes = written.bytes,
        mib = %format!("{:.2}", written.bytes as f64 / 1024.0 / 1024.0),
        "Catalog written"
    );

    Ok(RunSummary {
        total_packages: catalog.total_packages,
        included: written.records,
        excluded: catalog.excluded,
        errors: catalog.errors,
        output: written.path,
        bytes: written.bytes,
    })
}
