//! File validation utilities for ensuring files are suitable for processing.
//!
//! Validation happens once when a pipeline is built, so a bad path is
//! reported as a usage error before any chunk is read.

use crate::error::{Result, SvError};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for processing
///
/// # Validations Performed
/// - Path is not empty
/// - Path exists and is a regular file (not a directory)
/// - File is readable by the current process
///
/// Empty files are accepted; they simply produce no rows.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(SvError::InvalidArgument {
            message: "File path is empty".to_string(),
        });
    }

    if !path.exists() {
        return Err(SvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| SvError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(SvError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Try to open the file to verify read permissions
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => SvError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => SvError::file_error("Cannot open file for reading", e),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Create a test file with specific content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content)
            .expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_validate_valid_file() {
        let test_file = create_test_file(b"name,age\nBob,25\n");
        assert!(validate_file_path(test_file.path()).is_ok());
    }

    #[test]
    fn test_validate_empty_file_is_accepted() {
        let empty_file = create_test_file(&[]);
        assert!(validate_file_path(empty_file.path()).is_ok());
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let non_existent = Path::new("/this/file/does/not/exist.csv");
        match validate_file_path(non_existent) {
            Err(SvError::FileNotFound { path }) => assert_eq!(path, non_existent),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(matches!(
            validate_file_path(temp_dir.path()),
            Err(SvError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_validate_empty_path() {
        assert!(matches!(
            validate_file_path(Path::new("")),
            Err(SvError::InvalidArgument { .. })
        ));
    }
}
