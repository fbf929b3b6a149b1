//! Inclusion policy for the catalog.

use crate::app::NormalizedApplication;

/// An app qualifies when it publishes a non-blank source code URL.
///
/// This is the only criterion. License, icon and categories never
/// disqualify a record.
pub fn qualifies(record: &NormalizedApplication) -> bool {
    record
        .source_code_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty())
}
