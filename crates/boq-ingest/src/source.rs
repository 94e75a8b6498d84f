//! Uploaded spreadsheet bytes plus what the uploader claimed about them.

use std::path::Path;

use crate::error::{IngestError, Result};

/// A spreadsheet file handed over for import.
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl SpreadsheetSource {
    /// Wraps bytes received from an upload.
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Reads a file from disk, refusing files larger than `max_size` bytes
    /// before reading them.
    pub fn from_path(path: &Path, max_size: u64) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if metadata.len() > max_size {
            return Err(IngestError::FileTooLarge {
                file: file_name,
                size: metadata.len(),
                max_size,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| map_io_error(path, e))?;
        Ok(Self::from_bytes(file_name, None, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_path_reads_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "品名,数量").unwrap();
        let source = SpreadsheetSource::from_path(file.path(), 1024).unwrap();
        assert_eq!(source.bytes(), "品名,数量".as_bytes());
        assert!(source.content_type().is_none());
    }

    #[test]
    fn test_from_path_enforces_limit() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "0123456789").unwrap();
        let result = SpreadsheetSource::from_path(file.path(), 4);
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge {
                size: 10,
                max_size: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = SpreadsheetSource::from_path(Path::new("/nonexistent/quote.xlsx"), 1024);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
