//! Bookmark import seam
//!
//! Importers turn an exported bookmark file into entries. Concrete file
//! formats live with the platform layer.

use crate::utils::Result;

/// A single imported bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    /// Folder path, `None` for top-level entries
    pub folder: Option<String>,
}

impl Bookmark {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            folder: None,
        }
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// Parses an exported bookmark file
#[cfg_attr(test, mockall::automock)]
pub trait BookmarkImporter: Send + Sync {
    fn import_bookmarks(&self, input: &[u8]) -> Result<Vec<Bookmark>>;
}

/// Run `importer` and drop entries whose URL is blank
pub fn import_all(importer: &dyn BookmarkImporter, input: &[u8]) -> Result<Vec<Bookmark>> {
    let mut entries = importer.import_bookmarks(input)?;
    entries.retain(|b| !b.url.trim().is_empty());
    log::debug!("Imported {} bookmarks", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FavicacheError;

    #[test]
    fn test_import_all_filters_blank_urls() {
        let mut importer = MockBookmarkImporter::new();
        importer
            .expect_import_bookmarks()
            .withf(|input| input == b"export")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    Bookmark::new("https://rust-lang.org/", "Rust").in_folder("Dev"),
                    Bookmark::new("  ", "Empty"),
                ])
            });

        let entries = import_all(&importer, b"export").unwrap();
        assert_eq!(
            entries,
            vec![Bookmark::new("https://rust-lang.org/", "Rust").in_folder("Dev")]
        );
    }

    #[test]
    fn test_import_error_propagates() {
        let mut importer = MockBookmarkImporter::new();
        importer
            .expect_import_bookmarks()
            .returning(|_| Err(FavicacheError::Import("truncated file".into())));

        let err = import_all(&importer, b"").unwrap_err();
        assert!(matches!(err, FavicacheError::Import(_)));
    }
}
