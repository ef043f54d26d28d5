//! Validated handle on a document path

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::config::ReaderConfig;
use crate::document::format::DocumentFormat;
use crate::error::{DocumentError, InvalidDocumentReason};

/// A document path that passed validation.
///
/// Holds only metadata. Readers call [`FileResource::open_read`] and own the
/// returned handle, so it is closed whenever they return or fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: PathBuf,
    extension: String,
    format: DocumentFormat,
    size: u64,
}

impl FileResource {
    /// Validate `path`: accepted extension first, then existence, then
    /// that a reader exists for the format. The first failure is returned.
    pub fn open(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if !config.accepts(&extension) {
            return Err(DocumentError::InvalidDocument {
                reason: InvalidDocumentReason::InvalidExtension,
                expected: config.accepted_extensions.join(", "),
                received: extension,
            });
        }

        let metadata = match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => {
                return Err(DocumentError::InvalidDocument {
                    reason: InvalidDocumentReason::MissingFile,
                    expected: "an existing file".to_string(),
                    received: path.display().to_string(),
                })
            }
        };

        let format = DocumentFormat::from_extension(&extension).ok_or_else(|| {
            DocumentError::InvalidDocument {
                reason: InvalidDocumentReason::UnsupportedFormat,
                expected: DocumentFormat::supported_extensions().join(", "),
                received: extension.clone(),
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            extension,
            format,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Size in bytes at validation time
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Open the file read-only.
    pub fn open_read(&self) -> Result<File, DocumentError> {
        File::open(&self.path).map_err(|e| DocumentError::extraction_failed(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn reader_config() -> ReaderConfig {
        ReaderConfig::default()
    }

    #[test]
    fn test_open_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.TXT");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"10.1038/nature12373").unwrap();

        let resource = FileResource::open(&path, &reader_config()).unwrap();
        assert_eq!(resource.extension(), "txt");
        assert_eq!(resource.format(), DocumentFormat::PlainText);
        assert_eq!(resource.size(), 19);
    }

    #[test]
    fn test_invalid_extension_even_if_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.exe");
        File::create(&path).unwrap();

        let err = FileResource::open(&path, &reader_config()).unwrap_err();
        match err {
            DocumentError::InvalidDocument {
                reason, received, ..
            } => {
                assert_eq!(reason, InvalidDocumentReason::InvalidExtension);
                assert_eq!(received, "exe");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extension_checked_before_existence() {
        let err = FileResource::open("/nonexistent/setup.exe", &reader_config()).unwrap_err();
        assert_eq!(
            err.invalid_reason(),
            Some(InvalidDocumentReason::InvalidExtension)
        );
    }

    #[test]
    fn test_missing_file() {
        let err = FileResource::open("/nonexistent/paper.pdf", &reader_config()).unwrap_err();
        assert_eq!(err.invalid_reason(), Some(InvalidDocumentReason::MissingFile));
    }

    #[test]
    fn test_directory_is_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folder.txt");
        fs::create_dir(&path).unwrap();

        let err = FileResource::open(&path, &reader_config()).unwrap_err();
        assert_eq!(err.invalid_reason(), Some(InvalidDocumentReason::MissingFile));
    }

    #[test]
    fn test_accepted_but_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        File::create(&path).unwrap();

        let config = ReaderConfig {
            accepted_extensions: vec!["md".to_string()],
            ..ReaderConfig::default()
        };
        let err = FileResource::open(&path, &config).unwrap_err();
        assert_eq!(
            err.invalid_reason(),
            Some(InvalidDocumentReason::UnsupportedFormat)
        );
    }
}
