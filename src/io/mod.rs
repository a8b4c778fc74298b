pub mod grid_io;
pub mod json_io;

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes through a temp file in the target directory, then renames over `path`.
pub(crate) fn atomic_write_string(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;

    if let Err(err) = staged.persist(path) {
        if err.error.kind() != io::ErrorKind::AlreadyExists {
            return Err(err.error);
        }
        tracing::warn!(path = %path.display(), "replacing existing file non-atomically");
        std::fs::remove_file(path)?;
        err.file.persist(path).map_err(|e| e.error)?;
    }
    Ok(())
}
