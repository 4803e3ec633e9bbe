use crate::error::ConcatError;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

fn with_txt(p: &Path) -> PathBuf {
    let mut s: OsString = p.as_os_str().to_owned();
    s.push(".txt");
    PathBuf::from(s)
}

/// Finds `p` under the first base directory that has it, trying `p.txt` when
/// `p` carries no extension. Falls back to a guess relative to `cwd`, which may
/// not exist; callers decide whether that is fatal.
pub fn resolve_path(p: &Path, bases: &[PathBuf], cwd: &Path) -> PathBuf {
    if p.as_os_str().is_empty() { return cwd.to_path_buf(); }
    if p.is_absolute() && p.is_file() { return p.to_path_buf(); }
    let infer_txt = p.extension().is_none();

    for base in bases {
        let candidate = base.join(p);
        if candidate.is_file() { return candidate; }
        if infer_txt {
            let txt = with_txt(&candidate);
            if txt.is_file() { return txt; }
        }
    }

    let guess = cwd.join(p);
    if infer_txt {
        let txt = with_txt(&guess);
        if txt.is_file() { return txt; }
    }
    guess
}

pub fn resolve_all(raws: &[PathBuf], bases: &[PathBuf], cwd: &Path) -> Vec<PathBuf> {
    raws.iter().map(|r| {
        let p = resolve_path(r, bases, cwd);
        debug!(raw = %r.display(), resolved = %p.display(), "resolved input");
        p
    }).collect()
}

/// Maps codes to raw paths in code order. Every unknown code is reported at once.
pub fn resolve_codes(codes: &[String], mapping: &HashMap<String, String>) -> Result<Vec<PathBuf>, ConcatError> {
    let mut paths = Vec::with_capacity(codes.len());
    let mut missing = Vec::new();
    for code in codes {
        match mapping.get(code) {
            Some(p) => paths.push(PathBuf::from(p)),
            None => missing.push(code.clone()),
        }
    }
    if !missing.is_empty() { return Err(ConcatError::MissingCodes(missing)); }
    Ok(paths)
}
