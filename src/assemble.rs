use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::warn;

use crate::config::{HeaderSource, Settings};

pub struct Sections<'a> {
    pub header: Option<&'a HeaderSource>,
    pub append_error_note: bool,
    pub request: Option<&'a Path>,
}

fn display_name(path: &Path) -> String {
    path.file_name().map(|s| s.to_string_lossy().to_string()).unwrap_or_else(|| path.display().to_string())
}

/// `None` when the file is absent; any other read failure is an error.
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.is_file() { return Ok(None); }
    match fs::read(path) {
        Ok(b) => Ok(Some(b)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Writes header, request and one block per file, in that order. Content is
/// copied verbatim; delimiter-looking lines inside it are not escaped.
pub fn assemble<W: Write>(out: &mut W, settings: &Settings, files: &[impl AsRef<Path>], sections: &Sections) -> Result<()> {
    let d = &settings.delimiters;

    if let Some(header) = sections.header {
        writeln!(out, "{}", d.header_start)?;
        out.write_all(&header.load()?)?;
        if sections.append_error_note {
            write!(out, "\n\n{}", settings.error_note)?;
        }
        write!(out, "\n{}\n\n", d.header_end)?;
    }

    if let Some(request) = sections.request {
        match read_optional(request)? {
            Some(bytes) => {
                writeln!(out, "{}", d.request_start)?;
                out.write_all(&bytes)?;
                write!(out, "\n{}\n\n", d.request_end)?;
            }
            None => warn!("request file '{}' not found, skipping it", request.display()),
        }
    }

    for file in files {
        let path = file.as_ref();
        let name = display_name(path);
        writeln!(out, "{} {}", d.file_start, name)?;
        match read_optional(path)? {
            Some(bytes) => out.write_all(&bytes)?,
            None => {
                warn!("file '{}' not found", path.display());
                writeln!(out, "[Warning: file '{}' not found]", path.display())?;
            }
        }
        write!(out, "\n{} {}\n\n", d.file_end, name)?;
    }
    Ok(())
}

pub fn assemble_to_vec(settings: &Settings, files: &[impl AsRef<Path>], sections: &Sections) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    assemble(&mut buf, settings, files, sections)?;
    Ok(buf)
}
