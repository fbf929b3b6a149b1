//! Locale resolution for localized text fields.

use crate::index::LocaleMap;

/// Picks one string out of a locale map under a fixed preference order.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    preference: Vec<String>,
}

impl LocaleResolver {
    pub fn new<I, S>(preference: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preference: preference
                .into_iter()
                .map(Into::<String>::into)
                .filter(|l| !l.trim().is_empty())
                .collect(),
        }
    }

    pub fn preference(&self) -> &[String] {
        &self.preference
    }

    /// Resolve a localized value.
    ///
    /// Order: each preferred locale in turn, then the first non-empty string
    /// in the map's own order, then `fallback`. Non-string values are skipped.
    pub fn resolve(&self, map: Option<&LocaleMap>, fallback: &str) -> String {
        let Some(map) = map else {
            return fallback.to_string();
        };

        let non_empty = |v: &serde_json::Value| {
            v.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        self.preference
            .iter()
            .find_map(|locale| map.get(locale).and_then(non_empty))
            .or_else(|| map.values().find_map(non_empty))
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(["en-US", "en"])
    }
}
