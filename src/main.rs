use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod assemble;
mod config;
mod error;
mod fs_walk;
mod io;
mod lists;
mod model;
mod resolve;
#[cfg(test)]
mod tests_unit;

use config::{DelimiterStyle, HeaderSource, Settings};
use config::{DEFAULT_MAPPING_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_REQUEST_FILE, DEFAULT_WORK_FILE};
use error::ConcatError;
use model::{InputMode, Plan, ResolvedInput};
use resolve::resolve_path;

#[derive(Parser, Debug)]
#[command(name = "concat-files", version, about = "Combine text files into one file with delimiter blocks")]
#[command(group(ArgGroup::new("mode").args(["paths", "codes", "input_dir"]).multiple(false)))]
struct Cli {
    /// Files and/or directories; directories contribute their files in name order
    #[arg(short, long, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// File listing codes, one per line, looked up in the mapping file
    #[arg(short, long)]
    codes: Option<String>,

    /// Directory holding files.txt and optionally header.txt / request.txt
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Codes to paths mapping file
    #[arg(short, long, default_value = DEFAULT_MAPPING_FILE)]
    mapping: String,

    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Request file to prepend; bare flag means request.txt
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_REQUEST_FILE)]
    request: Option<String>,

    /// File listing directories to search for inputs, in priority order
    #[arg(short, long, default_value = DEFAULT_WORK_FILE)]
    work: PathBuf,

    /// Header text, or a file whose content is the header
    #[arg(long)]
    header: Option<String>,

    /// Append a note asking to diagnose console errors to the header
    #[arg(short, long)]
    error: bool,

    #[arg(long, value_enum, default_value_t = DelimiterStyle::Block)]
    style: DelimiterStyle,

    /// Fail instead of writing placeholders for missing input files
    #[arg(long)]
    strict: bool,

    /// Print the resolved plan as JSON and write nothing
    #[arg(long)]
    plan: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn input_mode(&self) -> Result<InputMode, ConcatError> {
        if !self.paths.is_empty() {
            return Ok(InputMode::Paths(self.paths.clone()));
        }
        if let Some(list) = &self.codes {
            return Ok(InputMode::Codes { list: list.clone(), mapping: self.mapping.clone() });
        }
        match &self.input_dir {
            Some(dir) => Ok(InputMode::InputDir(dir.clone())),
            None => Err(ConcatError::NoInputMode),
        }
    }
}

fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();
}

fn build_plan(cli: &Cli, settings: &Settings) -> Result<Plan> {
    let cwd = &settings.cwd;
    let mut work_dirs = lists::read_work_dirs(&settings.absolute(&cli.work), cwd)?;
    if work_dirs.is_empty() {
        warn!("No valid directories found in '{}', using current directory only.", cli.work.display());
        work_dirs = vec![cwd.clone()];
    }

    let mut default_header = None;
    let mut default_request = None;
    let (raws, bases) = match cli.input_mode()? {
        InputMode::Paths(args) => (fs_walk::expand_paths(&args, cwd)?, work_dirs.clone()),
        InputMode::Codes { list, mapping } => {
            let list_path = resolve_path(Path::new(&list), &work_dirs, cwd);
            if !list_path.is_file() {
                return Err(ConcatError::CodesListNotFound { name: list }.into());
            }
            let mapping_path = resolve_path(Path::new(&mapping), &work_dirs, cwd);
            if !mapping_path.is_file() {
                return Err(ConcatError::MappingNotFound { name: mapping }.into());
            }
            let codes = lists::read_codes_list(&list_path)?;
            let map = lists::read_codes_mapping(&mapping_path)?;
            debug!(codes = codes.len(), mapped = map.len(), "loaded codes");
            (resolve::resolve_codes(&codes, &map)?, work_dirs.clone())
        }
        InputMode::InputDir(dir) => {
            let dir = settings.absolute(&dir);
            if !dir.is_dir() { return Err(ConcatError::InputDirNotFound { path: dir }.into()); }
            let files = dir.join(settings.input_dir_files);
            if !files.is_file() { return Err(ConcatError::FileListNotFound { path: files }.into()); }
            let header = dir.join(settings.input_dir_header);
            if header.is_file() { default_header = Some(HeaderSource::File(header)); }
            let request = dir.join(settings.input_dir_request);
            if request.is_file() { default_request = Some(request); }
            let mut bases = vec![dir];
            bases.extend(work_dirs.iter().cloned());
            (lists::read_lines(&files)?.into_iter().map(PathBuf::from).collect(), bases)
        }
    };

    let header = match &cli.header {
        Some(arg) => Some(HeaderSource::classify(arg, &bases, settings)),
        None => default_header,
    };
    if cli.error && header.is_none() {
        warn!("--error has no effect without a header");
    }

    let request = match &cli.request {
        Some(arg) => {
            let p = resolve_path(Path::new(arg), &bases, cwd);
            if p.is_file() {
                Some(p)
            } else {
                warn!("request file '{}' not found, skipping it.", arg);
                None
            }
        }
        None => default_request,
    };

    let inputs = raws.iter().cloned()
        .zip(resolve::resolve_all(&raws, &bases, cwd))
        .map(|(raw, path)| ResolvedInput::new(raw, path))
        .collect();

    Ok(Plan { output: settings.absolute(&cli.output), work_dirs, header, request, inputs })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let settings = Settings::new(cli.style, std::env::current_dir()?);
    let plan = build_plan(&cli, &settings)?;

    if cli.plan {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    if cli.strict {
        let missing = plan.missing();
        if !missing.is_empty() { return Err(ConcatError::MissingFiles(missing).into()); }
    }

    let sections = assemble::Sections {
        header: plan.header.as_ref(),
        append_error_note: cli.error,
        request: plan.request.as_deref(),
    };
    let data = assemble::assemble_to_vec(&settings, &plan.paths(), &sections)?;
    let out = io::OutputIo::default().atomic_write(&plan.output, &data)?;
    if !cli.quiet {
        println!("Successfully created {} from {} files.", out.display(), plan.inputs.len());
    }
    Ok(())
}
