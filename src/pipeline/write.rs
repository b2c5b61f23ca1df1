//! Output: persist corrected text as a UTF-8 file.
//!
//! For a regular file the text goes to a temp file next to the destination,
//! which is then renamed over it. A failed write therefore never leaves a
//! truncated output behind, and the temp file is removed when its handle
//! drops.
//!
//! Symlinks are followed: the rename lands on the link's target and the link
//! itself stays in place. Targets that are not regular files (`/dev/null`, a
//! FIFO) cannot be renamed over and are truncated and written in place.

use crate::error::SpellfixError;
use crate::output::WrittenFile;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `text` to `path`, creating or replacing it.
///
/// Missing parent directories are not created: an output path in a
/// directory that does not exist is a write error.
pub fn write_text(text: &str, path: &Path) -> Result<WrittenFile, SpellfixError> {
    let fail = |source: std::io::Error| SpellfixError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path);
    match fs::metadata(&target) {
        Ok(meta) if !meta.is_file() => {
            debug!("Writing in place to non-regular file {}", target.display());
            let mut file = File::create(&target).map_err(fail)?;
            file.write_all(text.as_bytes()).map_err(fail)?;
            file.flush().map_err(fail)?;
        }
        existing => {
            let dir = match target.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;
            tmp.write_all(text.as_bytes()).map_err(fail)?;
            tmp.flush().map_err(fail)?;
            // Replacing a file keeps its permissions rather than the temp file's 0600.
            if let Ok(meta) = existing {
                tmp.as_file()
                    .set_permissions(meta.permissions())
                    .map_err(fail)?;
            }
            tmp.persist(&target).map_err(|e| fail(e.error))?;
        }
    }

    debug!("Wrote {} bytes to {}", text.len(), target.display());
    Ok(WrittenFile {
        path: path.to_path_buf(),
        bytes: text.len(),
    })
}

/// The file a write to `path` should land on.
///
/// Existing paths resolve through every symlink. A dangling symlink resolves
/// to its (not yet existing) target so the file is created there.
fn resolve_target(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match fs::read_link(path) {
        Ok(link) if link.is_relative() => path
            .parent()
            .map(|dir| dir.join(&link))
            .unwrap_or(link),
        Ok(link) => link,
        Err(_) => path.to_path_buf(),
    }
}
