use clap::Parser;
use cli::{run, PublicizerConfig, RunOptions, RunOutcome};
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "publicize")]
#[command(about = "Make every type, method and field in a module image public")]
struct Cli {
    /// Module image to rewrite
    input: PathBuf,
    /// Where to write the result (defaults to <input dir>/publicized_assemblies/<name>_publicized.<ext>)
    output: Option<PathBuf>,
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Extra directory to search for referenced modules (repeatable)
    #[arg(short = 's', long = "search-path")]
    search_paths: Vec<PathBuf>,
    /// Warn about unresolved references instead of failing
    #[arg(long)]
    allow_unresolved: bool,
    /// Report what would change without writing an image
    #[arg(long)]
    dry_run: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Enable debug logging when RUST_LOG is unset
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => PublicizerConfig::from_file(path)?,
        None => PublicizerConfig::default(),
    };
    config.search_paths.extend(cli.search_paths.iter().cloned());
    if cli.allow_unresolved {
        config.require_references = false;
    }
    debug!(?config, "Effective configuration");

    let options = RunOptions {
        input: cli.input.clone(),
        output: cli.output.clone(),
        dry_run: cli.dry_run,
    };

    let outcome = match run(&config, &options) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Publicize failed: {}", e);
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    println!("{}", outcome.report);
    match &outcome.output {
        Some(path) => println!("Saved publicized module to {}", path.display()),
        None => println!("Dry run: nothing written"),
    }
}
