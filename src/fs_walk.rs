use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Regular files directly inside `dir`, ordered by file name.
pub fn list_dir_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Cannot read directory {}", dir.display()))? {
        let entry = entry.context("Cannot read directory entry")?;
        let path = entry.path();
        if path.is_file() { files.push(path); }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expands every argument that names a directory (relative to `cwd`) into its
/// files; other arguments pass through untouched.
pub fn expand_paths(args: &[PathBuf], cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for a in args {
        let abs = if a.is_absolute() { a.clone() } else { cwd.join(a) };
        if abs.is_dir() {
            out.extend(list_dir_files(&abs)?);
        } else {
            out.push(a.clone());
        }
    }
    Ok(out)
}
