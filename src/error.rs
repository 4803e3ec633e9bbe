use std::path::PathBuf;
use thiserror::Error;

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|s| format!("\n  - {}", s)).collect()
}

/// Conditions that abort a run before any output is written.
#[derive(Error, Debug)]
pub enum ConcatError {
    #[error("codes list file '{name}' not found in work directories")]
    CodesListNotFound { name: String },

    #[error("mapping file '{name}' not found in work directories")]
    MappingNotFound { name: String },

    #[error("the following codes are missing in the mapping file:{}", bullet_list(.0))]
    MissingCodes(Vec<String>),

    #[error("input directory '{}' not found", .path.display())]
    InputDirNotFound { path: PathBuf },

    #[error("file list '{}' not found", .path.display())]
    FileListNotFound { path: PathBuf },

    #[error("no input mode given: use --paths, --codes or --input-dir")]
    NoInputMode,

    #[error("the following input files are missing:{}", bullet_list(.0))]
    MissingFiles(Vec<String>),
}
