use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use crate::error::{AssetsError, Result};

/// Returns `true` if `path` exists and is a directory (following symlinks).
///
/// Missing paths, files and unreadable entries all report `false`.
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Recursively removes `path` and everything below it, deepest entries first.
///
/// Returns `Ok(false)` without touching anything when `path` is not a directory.
/// Symlinks found inside the tree are removed as links, never followed.
///
/// # Errors
/// Fails on the first entry that cannot be removed; whatever was already
/// removed stays removed.
pub fn delete_directory<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if !is_directory(path) {
        return Ok(false);
    }
    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            AssetsError::fs(at, e.into())
        })?;
        let entry_path = entry.path();
        let removed = if entry.file_type().is_dir() {
            fs::remove_dir(entry_path)
        } else {
            fs::remove_file(entry_path)
        };
        removed.map_err(|e| AssetsError::fs(entry_path, e))?;
    }
    Ok(true)
}

/// Recursively copies the contents of `src` into `dst`, creating `dst` and its
/// ancestors if needed.
///
/// Files are copied byte for byte. Symlinks are followed and copied as whatever
/// they point to. Existing files in `dst` with the same name are overwritten.
///
/// # Errors
/// Stops at the first unreadable source entry or unwritable destination; a
/// partially copied `dst` is left as is.
pub fn copy_directory<P1, P2>(src: P1, dst: P2) -> Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !dst.is_dir() {
        fs::create_dir_all(dst).map_err(|e| AssetsError::fs(dst, e))?;
    }

    let entries = fs::read_dir(src).map_err(|e| AssetsError::fs(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| AssetsError::fs(src, e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        let metadata = fs::metadata(&src_path).map_err(|e| AssetsError::fs(&src_path, e))?;
        if metadata.is_dir() {
            copy_directory(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| AssetsError::fs(&dst_path, e))?;
        }
    }
    Ok(())
}
