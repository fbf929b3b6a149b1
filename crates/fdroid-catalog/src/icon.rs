//! Icon URL resolution.

use serde_json::Value;

/// Builds absolute icon URLs from icon locale maps.
///
/// Total over its input: any shape it does not understand resolves to the
/// placeholder URL.
#[derive(Debug, Clone)]
pub struct IconResolver {
    base_url: String,
    placeholder_url: String,
}

impl IconResolver {
    pub fn new(base_url: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    /// Resolve the icon URL for one package.
    ///
    /// - absent, null, or not an object: placeholder
    /// - object: first descriptor in map order with a non-empty string
    ///   `name`, joined onto the base URL
    /// - no such descriptor: placeholder
    pub fn resolve(&self, icon: Option<&Value>) -> String {
        let Some(Value::Object(locales)) = icon else {
            return self.placeholder_url.clone();
        };

        locales
            .values()
            .find_map(descriptor_file_name)
            .map(|name| join_url(&self.base_url, name))
            .unwrap_or_else(|| self.placeholder_url.clone())
    }
}

fn descriptor_file_name(descriptor: &Value) -> Option<&str> {
    descriptor
        .as_object()?
        .get("name")?
        .as_str()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Concatenate base and file name with exactly one `/` between them.
///
/// index-v2 file names are rooted (`/org.example/en-US/icon.png`), older
/// indexes use bare names, and the base may or may not end with a slash.
fn join_url(base: &str, name: &str) -> String {
    match (base.ends_with('/'), name.starts_with('/')) {
        (true, true) => format!("{}{}", base, &name[1..]),
        (false, false) if !base.is_empty() => format!("{}/{}", base, name),
        _ => format!("{}{}", base, name),
    }
}
