//! Catalog output.
//!
//! Records are written to a temp file next to the destination and renamed
//! over it, so a failed run leaves any previous catalog untouched.

use std::fs::{self, File, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::app::NormalizedApplication;
use crate::error::WriteError;

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCatalog {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: u64,
}

/// Serializes records as a JSON array.
#[derive(Debug, Clone, Default)]
pub struct CatalogWriter {
    pretty: bool,
}

impl CatalogWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Replace `destination` with `records`, preserving their order.
    pub fn write(
        &self,
        records: &[NormalizedApplication],
        destination: &Path,
    ) -> Result<WrittenCatalog, WriteError> {
        let dir = parent_dir(destination);
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            if self.pretty {
                serde_json::to_writer_pretty(&mut out, records)?;
            } else {
                serde_json::to_writer(&mut out, records)?;
            }
            out.flush()?;
        }
        let permissions = catalog_permissions(destination, tmp.as_file())?;
        tmp.as_file().set_permissions(permissions)?;
        tmp.as_file().sync_all()?;

        tmp.persist(destination).map_err(|e| WriteError::Persist {
            path: destination.display().to_string(),
            cause: e.error.to_string(),
        })?;

        let bytes = fs::metadata(destination)?.len();
        tracing::debug!(path = %destination.display(), bytes, "Catalog persisted");

        Ok(WrittenCatalog {
            path: destination.to_path_buf(),
            records: records.len(),
            bytes,
        })
    }
}

/// Mode for the new catalog: the replaced file's, else 0644.
/// Temp files start out 0600.
fn catalog_permissions(destination: &Path, tmp: &File) -> io::Result<Permissions> {
    match fs::metadata(destination) {
        Ok(meta) if meta.is_file() => Ok(meta.permissions()),
        _ => default_permissions(tmp),
    }
}

#[cfg(unix)]
fn default_permissions(_tmp: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(tmp: &File) -> io::Result<Permissions> {
    Ok(tmp.metadata()?.permissions())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::UNKNOWN_LICENSE;

    fn record(id: &str, name: &str) -> NormalizedApplication {
        NormalizedApplication {
            package_id: id.to_string(),
            name: name.to_string(),
            summary: String::new(),
            license: UNKNOWN_LICENSE.to_string(),
            icon_url: "https://example.org/placeholder.png".to_string(),
            categories: vec![],
            source_code_url: Some(format!("https://example.org/{id}")),
            last_updated: None,
            platform_tags: vec!["android".to_string()],
            fdroid_url: format!("https://f-droid.org/packages/{id}/"),
        }
    }

    #[test]
    fn test_write_preserves_order_and_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");
        let records = vec![record("z.app", "Zäpfchen"), record("a.app", "応用")];

        let written = CatalogWriter::new(false).write(&records, &path).unwrap();
        assert_eq!(written.records, 2);
        assert_eq!(written.path, path);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(written.bytes, contents.len() as u64);
        assert!(contents.contains("Zäpfchen"));
        assert!(contents.contains("応用"));
        assert!(!contents.contains('\n'));

        let back: Vec<NormalizedApplication> = serde_json::from_str(&contents).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_write_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");
        fs::write(&path, "[\"stale\", \"data\", \"that is longer than the new output\"]").unwrap();

        CatalogWriter::default().write(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site").join("data").join("apps.json");

        CatalogWriter::new(true)
            .write(&[record("org.x", "X")], &path)
            .unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n  {"));
    }

    #[test]
    fn test_write_into_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "x").unwrap();

        let result = CatalogWriter::default().write(&[], &target);
        assert!(result.is_err());
        assert!(target.join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");
        fs::write(&path, "[]").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o640)).unwrap();

        CatalogWriter::default().write(&[], &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_catalog_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");

        CatalogWriter::default().write(&[record("org.x", "X")], &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("apps.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("out/apps.json")), PathBuf::from("out"));
    }
}
