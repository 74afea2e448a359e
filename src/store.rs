//! Path-level resource-file operations
//!
//! Each operation is a single open/read/transform/write cycle against one
//! file; nothing is cached between calls.

use crate::designer;
use crate::document::ResxDocument;
use crate::types::{ResourceEntry, ResxError};
use std::fs;
use std::path::Path;

/// First entry in file order whose value equals `value` exactly
pub fn find_by_value(path: &Path, value: &str) -> Result<Option<ResourceEntry>, ResxError> {
    let doc = read_document(path)?;
    Ok(doc.find_by_value(value).cloned())
}

/// First entry in file order whose key equals `key`
pub fn find_by_key(path: &Path, key: &str) -> Result<Option<ResourceEntry>, ResxError> {
    let doc = read_document(path)?;
    Ok(doc.find_by_key(key).cloned())
}

/// Append a new entry and regenerate the designer artifact.
///
/// Returns `Ok(false)` without touching the file when `key` already exists
/// and `overwrite` is unset. Otherwise the entry is appended at the end,
/// every existing byte is rewritten verbatim, and the designer is
/// regenerated. Returns `Ok(true)` on full success; `Ok(false)` when the
/// entry was written but the designer could not be regenerated; the
/// resource-file write is not rolled back, and a later `regenerate_designer`
/// call reconciles the pair.
pub fn add(path: &Path, key: &str, value: &str, overwrite: bool) -> Result<bool, ResxError> {
    if key.trim().is_empty() {
        return Err(ResxError::InvalidKey(key.to_string()));
    }

    let doc = read_document(path)?;
    if !overwrite && doc.contains_key(key) {
        return Ok(false);
    }

    let updated = doc.render_with_appended(key, value)?;
    fs::write(path, updated)?;

    Ok(designer::regenerate_designer(path))
}

/// Read and parse a resource file
pub fn read_document(path: &Path) -> Result<ResxDocument, ResxError> {
    let source = fs::read_to_string(path)?;
    ResxDocument::parse(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer::designer_path;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const ONE_ENTRY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="Greeting" xml:space="preserve">
    <value>Hello</value>
  </data>
</root>
"#;

    const DESIGNER: &str = r#"namespace MyApp.Properties {
    internal class Resources {
    }
}
"#;

    fn write_resx(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_designer(resx: &Path) {
        fs::write(designer_path(resx), DESIGNER).unwrap();
    }

    #[test]
    fn test_find_by_value() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);

        let entry = find_by_value(&resx, "Hello").unwrap().unwrap();
        assert_eq!(entry.name, "Greeting");
        assert!(find_by_value(&resx, "Goodbye").unwrap().is_none());
    }

    #[test]
    fn test_find_by_key() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);

        let entry = find_by_key(&resx, "Greeting").unwrap().unwrap();
        assert_eq!(entry.value, "Hello");
        assert!(find_by_key(&resx, "Missing").unwrap().is_none());
    }

    #[test]
    fn test_find_in_missing_file_is_io_error() {
        let result = find_by_value(Path::new("/nonexistent/Resources.resx"), "Hello");
        assert!(matches!(result, Err(ResxError::Io(_))));
    }

    #[test]
    fn test_add_appends_and_regenerates() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);
        write_designer(&resx);

        assert!(add(&resx, "Farewell", "Bye", false).unwrap());

        let doc = read_document(&resx).unwrap();
        let names: Vec<_> = doc.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Greeting", "Farewell"]);

        let generated = fs::read_to_string(designer_path(&resx)).unwrap();
        assert!(generated.contains("internal static string Greeting"));
        assert!(generated.contains("internal static string Farewell"));
    }

    #[test]
    fn test_add_preserves_existing_bytes() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);
        write_designer(&resx);

        add(&resx, "Farewell", "Bye", false).unwrap();

        let rewritten = fs::read_to_string(&resx).unwrap();
        let close_at = ONE_ENTRY.rfind("</root>").unwrap();
        assert!(rewritten.starts_with(&ONE_ENTRY[..close_at]));
        assert!(rewritten.ends_with(&ONE_ENTRY[close_at..]));
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);
        write_designer(&resx);

        assert!(!add(&resx, "Greeting", "Hi", false).unwrap());

        // Byte-for-byte unchanged
        assert_eq!(fs::read_to_string(&resx).unwrap(), ONE_ENTRY);
    }

    #[test]
    fn test_add_overwrite_skips_duplicate_check() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);
        write_designer(&resx);

        // The entry is appended, never edited in place; the first
        // occurrence keeps winning lookups.
        add(&resx, "Greeting", "Hi", true).unwrap();
        let doc = read_document(&resx).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.find_by_key("Greeting").unwrap().value, "Hello");
    }

    #[test]
    fn test_add_without_designer_reports_regen_failure() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);

        // The append itself still lands on disk.
        assert!(!add(&resx, "Farewell", "Bye", false).unwrap());
        let doc = read_document(&resx).unwrap();
        assert!(doc.contains_key("Farewell"));
    }

    #[test]
    fn test_add_empty_key_is_invalid() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);

        assert!(matches!(
            add(&resx, "  ", "x", false),
            Err(ResxError::InvalidKey(_))
        ));
        assert_eq!(fs::read_to_string(&resx).unwrap(), ONE_ENTRY);
    }

    #[test]
    fn test_add_then_find_by_key() {
        let dir = tempdir().unwrap();
        let resx = write_resx(dir.path(), "Resources.resx", ONE_ENTRY);
        write_designer(&resx);

        add(&resx, "Farewell", "Bye", false).unwrap();
        let entry = find_by_key(&resx, "Farewell").unwrap().unwrap();
        assert_eq!(entry.value, "Bye");
    }
}
