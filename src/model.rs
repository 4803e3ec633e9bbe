use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::config::HeaderSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Paths(Vec<PathBuf>),
    Codes { list: String, mapping: String },
    InputDir(PathBuf),
}

// Names need not be UTF-8; the plan shows them lossily instead of failing.
fn lossy<S: Serializer>(p: &Path, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&p.to_string_lossy())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedInput {
    #[serde(serialize_with = "lossy")]
    pub raw: PathBuf,
    #[serde(serialize_with = "lossy")]
    pub path: PathBuf,
    pub exists: bool,
}

impl ResolvedInput {
    pub fn new(raw: PathBuf, path: PathBuf) -> Self {
        let exists = path.is_file();
        ResolvedInput { raw, path, exists }
    }
}

/// Fully resolved run: what will be written and where.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub output: PathBuf,
    pub work_dirs: Vec<PathBuf>,
    pub header: Option<HeaderSource>,
    pub request: Option<PathBuf>,
    pub inputs: Vec<ResolvedInput>,
}

impl Plan {
    pub fn missing(&self) -> Vec<String> {
        self.inputs.iter().filter(|i| !i.exists).map(|i| i.path.display().to_string()).collect()
    }

    pub fn paths(&self) -> Vec<PathBuf> { self.inputs.iter().map(|i| i.path.clone()).collect() }
}
