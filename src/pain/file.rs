use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::SepaError;

/// Write `contents` to `path` via a temporary file in the same directory.
///
/// The temporary file is deleted if anything fails before the rename; after
/// the rename `path` holds the complete contents.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SepaError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SepaError::Io(e.error))?;
    Ok(())
}
