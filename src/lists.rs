use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Non-empty trimmed lines of a list file.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(s.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
}

/// Directories listed in the work file, made absolute against `cwd`.
/// A missing work file and entries that are not directories are skipped.
pub fn read_work_dirs(path: &Path, cwd: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_file() { return Ok(Vec::new()); }
    let dirs = read_lines(path)?
        .into_iter()
        .map(|l| { let p = PathBuf::from(l); if p.is_absolute() { p } else { cwd.join(p) } })
        .filter(|p| p.is_dir())
        .collect();
    Ok(dirs)
}

pub fn read_codes_list(path: &Path) -> Result<Vec<String>> { read_lines(path) }

/// `code<ws>path` per line; the path keeps inner spaces, later codes override earlier ones.
pub fn parse_codes_mapping(text: &str) -> HashMap<String, String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s+(.+)$").unwrap());
    let mut mapping = HashMap::new();
    for line in text.lines() {
        if let Some(c) = RE.captures(line.trim()) {
            mapping.insert(c[1].to_string(), c[2].to_string());
        }
    }
    mapping
}

pub fn read_codes_mapping(path: &Path) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading mapping {}", path.display()))?;
    Ok(parse_codes_mapping(&text))
}
