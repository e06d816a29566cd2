use crate::config::PublicizerConfig;
use crate::error::{CliError, CliResult};
use metadata::{MetadataSink, MetadataSource};
use publicizer::{publicize, PublicizeReport};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: PathBuf,
    /// Explicit destination; the config's default layout is used otherwise
    pub output: Option<PathBuf>,
    /// Rewrite in memory and report, without writing anything
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub module: String,
    /// Where the image was written; `None` on a dry run
    pub output: Option<PathBuf>,
    pub report: PublicizeReport,
}

/// Load `input`, publicize it, and save it to `output` when one is given
pub fn process_module<S, K>(
    source: &S,
    sink: &K,
    input: &Path,
    output: Option<&Path>,
) -> CliResult<RunOutcome>
where
    S: MetadataSource + ?Sized,
    K: MetadataSink + ?Sized,
{
    let mut module = source.load(input)?;
    let report = publicize(&mut module);
    info!(
        module = %module.name,
        types = report.types,
        methods = report.methods,
        fields = report.fields,
        "Rewrote visibility"
    );

    if let Some(output) = output {
        sink.save(&module, output)?;
    }

    Ok(RunOutcome {
        module: module.name,
        output: output.map(Path::to_path_buf),
        report,
    })
}

/// Run the whole command for one input using the JSON image format
pub fn run(config: &PublicizerConfig, options: &RunOptions) -> CliResult<RunOutcome> {
    config
        .validate()
        .map_err(|message| CliError::InvalidConfig { message })?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| config.default_output_path(&options.input));
    if same_file(&output, &options.input) {
        return Err(CliError::OutputIsInput { path: output });
    }

    let source = config.source_for(&options.input);
    let sink = config.sink();
    info!(
        input = %options.input.display(),
        source = source.format_name(),
        sink = sink.format_name(),
        dry_run = options.dry_run,
        "Publicizing module"
    );

    let destination = (!options.dry_run).then_some(output.as_path());
    process_module(&source, &sink, &options.input, destination)
}

/// Whether two paths name the same file, seeing through `.`/`..`, relative
/// paths and symlinks. Neither path has to exist yet.
fn same_file(a: &Path, b: &Path) -> bool {
    comparable_path(a) == comparable_path(b)
}

fn comparable_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    if let Ok(canonical) = absolute.canonicalize() {
        return canonical;
    }

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    // Canonicalize the deepest ancestor that exists and re-attach the rest.
    let mut tail = Vec::new();
    let mut base = normalized.as_path();
    loop {
        if let Ok(canonical) = base.canonicalize() {
            return tail
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (base.parent(), base.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                base = parent;
            }
            _ => break,
        }
    }
    normalized
}
