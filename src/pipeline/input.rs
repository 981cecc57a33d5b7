//! Input validation: confirm the PDF path exists and is readable.
//!
//! We validate the `%PDF` magic bytes up front so callers get a meaningful
//! error rather than an opaque backend failure on a mislabelled file.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate a local PDF path: existence, read permission, and magic bytes.
///
/// Returns the path unchanged on success so callers can thread it through
/// the pipeline.
pub fn resolve_input(path: &Path) -> Result<PathBuf, ConvertError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(ConvertError::FileNotFound { path });
    }

    // Check read permission by attempting to open
    match std::fs::File::open(&path) {
        Ok(mut f) => {
            // Verify PDF magic bytes
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(ConvertError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(ConvertError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_file_not_found() {
        let err = resolve_input(Path::new("/definitely/not/a/real/file.pdf")).unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[test]
    fn non_pdf_magic_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"PK\x03\x04 not a pdf").unwrap();
        let err = resolve_input(f.path()).unwrap_err();
        assert!(matches!(err, ConvertError::NotAPdf { .. }));
    }

    #[test]
    fn pdf_magic_is_accepted() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.7\n").unwrap();
        let resolved = resolve_input(f.path()).unwrap();
        assert_eq!(resolved, f.path());
    }

    #[test]
    fn short_file_is_accepted() {
        // A file shorter than the magic is left for the backend to reject.
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%P").unwrap();
        assert!(resolve_input(f.path()).is_ok());
    }
}
