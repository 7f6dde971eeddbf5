use crate::foundation::error::{InkError, InkResult};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-process counter keeping concurrent writers off each other's temp files.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> InkResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| InkError::output_write(parent, e))?;
    }
    Ok(())
}

/// Write `bytes` to `path` so that readers never observe a partial file.
///
/// The data goes to a hidden sibling temp file first and is renamed into place once flushed. The
/// temp file is removed on every failure path.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> InkResult<()> {
    ensure_parent_dir(path)?;
    let tmp = temp_sibling(path)?;
    let mut guard = TempFileGuard(Some(tmp.clone()));

    let mut f = std::fs::File::create(&tmp).map_err(|e| InkError::output_write(&tmp, e))?;
    f.write_all(bytes)
        .and_then(|()| f.sync_all())
        .map_err(|e| InkError::output_write(&tmp, e))?;
    drop(f);

    std::fs::rename(&tmp, path).map_err(|e| InkError::output_write(path, e))?;
    guard.0 = None;
    Ok(())
}

fn temp_sibling(path: &Path) -> InkResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        InkError::output_write(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    tmp_name.push(format!(".{}.{seq}.tmp", std::process::id()));
    Ok(path.with_file_name(tmp_name))
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/file.rs"]
mod tests;
