//! Input resolution: validate a user-supplied path before pdfium sees it.
//!
//! pdfium reports a missing file, a permission problem and a corrupt file
//! with the same opaque error. Checking here first lets the extractor tell
//! a missing input (`FileNotFound`) apart from every other failure, and
//! gives a readable `NotAPdf` instead of a parser error for text files.

use crate::error::SpellfixError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Magic bytes every PDF file starts with.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate that `path` names an existing, readable PDF file.
pub fn resolve_local(path: &Path) -> Result<PathBuf, SpellfixError> {
    if !path.exists() {
        return Err(SpellfixError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        return Err(SpellfixError::CorruptPdf {
            path: path.to_path_buf(),
            detail: "path is a directory".into(),
        });
    }

    match File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != PDF_MAGIC {
                return Err(SpellfixError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(SpellfixError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SpellfixError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(SpellfixError::CorruptPdf {
                path: path.to_path_buf(),
                detail: e.to_string(),
            });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = resolve_local(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, SpellfixError::FileNotFound { .. }));
    }

    #[test]
    fn text_file_is_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, "hello world").unwrap();

        match resolve_local(&path).unwrap_err() {
            SpellfixError::NotAPdf { magic, .. } => assert_eq!(&magic, b"hell"),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn pdf_header_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").unwrap();
        assert_eq!(resolve_local(&path).unwrap(), path);
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_local(dir.path()).unwrap_err();
        assert!(matches!(err, SpellfixError::CorruptPdf { .. }));
    }
}
