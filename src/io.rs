use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct OutputIo;

impl OutputIo {
    /// Replaces `out_path` with `data` via a sibling temp file, so a failed run
    /// never leaves a truncated output behind.
    pub fn atomic_write(&self, out_path: &Path, data: &[u8]) -> Result<PathBuf> {
        if let Some(dir) = out_path.parent() {
            if !dir.as_os_str().is_empty() { fs::create_dir_all(dir)?; }
        }
        let mut tmp_name = out_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = out_path.with_file_name(tmp_name);
        let written = fs::File::create(&tmp)
            .and_then(|mut f| { f.write_all(data)?; f.sync_all() })
            .and_then(|()| fs::rename(&tmp, out_path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("writing {}", out_path.display()));
        }
        Ok(out_path.to_path_buf())
    }
}
