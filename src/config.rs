use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::resolve::resolve_path;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum DelimiterStyle {
    /// `<<<BLOCK_START>>> <label>` around every section
    #[default]
    Block,
    /// `<<<FILE_START>>>`, `<<<REQUEST_START>>>`, `<<<HEADER_START>>>`
    File,
}

/// Literal marker lines. Per-file markers are followed by ` <basename>`;
/// section markers are written as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub file_start: &'static str,
    pub file_end: &'static str,
    pub request_start: &'static str,
    pub request_end: &'static str,
    pub header_start: &'static str,
    pub header_end: &'static str,
}

impl Delimiters {
    pub fn for_style(style: DelimiterStyle) -> Self {
        match style {
            DelimiterStyle::Block => Delimiters {
                file_start: "<<<BLOCK_START>>>",
                file_end: "<<<BLOCK_END>>>",
                request_start: "<<<BLOCK_START>>> REQUEST_BODY",
                request_end: "<<<BLOCK_END>>> REQUEST_BODY",
                header_start: "<<<BLOCK_START>>> REQUEST_HEADER",
                header_end: "<<<BLOCK_END>>> REQUEST_HEADER",
            },
            DelimiterStyle::File => Delimiters {
                file_start: "<<<FILE_START>>>",
                file_end: "<<<FILE_END>>>",
                request_start: "<<<REQUEST_START>>>",
                request_end: "<<<REQUEST_END>>>",
                header_start: "<<<HEADER_START>>>",
                header_end: "<<<HEADER_END>>>",
            },
        }
    }
}

pub const DEFAULT_MAPPING_FILE: &str = "file-codes.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "OUTPUT.txt";
pub const DEFAULT_REQUEST_FILE: &str = "request.txt";
pub const DEFAULT_WORK_FILE: &str = "work.txt";

pub const ERROR_NOTE: &str = "Note: the body below contains console error output. \
Diagnose the errors it reports, identify their root cause and propose a fix.";

/// Everything the resolver and assembler need that is not an input.
/// Built once per run; nothing reads process globals after this.
#[derive(Debug, Clone)]
pub struct Settings {
    pub delimiters: Delimiters,
    pub error_note: &'static str,
    pub cwd: PathBuf,
    pub input_dir_files: &'static str,
    pub input_dir_header: &'static str,
    pub input_dir_request: &'static str,
}

impl Settings {
    pub fn new(style: DelimiterStyle, cwd: PathBuf) -> Self {
        Settings {
            delimiters: Delimiters::for_style(style),
            error_note: ERROR_NOTE,
            cwd,
            input_dir_files: "files.txt",
            input_dir_header: "header.txt",
            input_dir_request: DEFAULT_REQUEST_FILE,
        }
    }

    /// Makes a user-supplied path absolute against the captured cwd.
    pub fn absolute(&self, p: &Path) -> PathBuf {
        if p.is_absolute() { p.to_path_buf() } else { self.cwd.join(p) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HeaderSource {
    File(PathBuf),
    Literal(String),
}

impl HeaderSource {
    /// An argument naming an existing file (searched like any input) is a file
    /// reference; anything else is the header text itself.
    pub fn classify(arg: &str, bases: &[PathBuf], settings: &Settings) -> Self {
        if arg.is_empty() { return HeaderSource::Literal(String::new()); }
        let candidate = resolve_path(Path::new(arg), bases, &settings.cwd);
        if candidate.is_file() { HeaderSource::File(candidate) } else { HeaderSource::Literal(arg.to_string()) }
    }

    pub fn load(&self) -> anyhow::Result<Vec<u8>> {
        use anyhow::Context;
        match self {
            HeaderSource::File(p) => std::fs::read(p).with_context(|| format!("reading header file {}", p.display())),
            HeaderSource::Literal(s) => Ok(s.as_bytes().to_vec()),
        }
    }
}
