//! apidoc CLI - generate cross-linked Markdown API documentation

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::Level;

use apidoc_core::config::CONFIG_FILE;
use apidoc_core::{
    write_files, ApiContext, CollectingSink, DiagnosticSink, Generator, GeneratorOptions,
    Registry, TracingSink,
};

#[derive(Parser, Debug)]
#[command(name = "apidoc")]
#[command(version = apidoc_core::VERSION)]
#[command(about = "Generate Markdown API documentation from extracted metadata", long_about = None)]
struct Cli {
    /// Path to the extracted metadata (JSON)
    metadata: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "docs")]
    output: PathBuf,

    /// Configuration file (defaults to ./apidoc.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not prepend tables of contents
    #[arg(long)]
    skip_toc: bool,

    /// Print the generated documents as JSON instead of writing them
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let options = load_options(cli)?;

    let registry = Registry::from_path(&cli.metadata)
        .with_context(|| format!("Failed to load metadata from '{}'", cli.metadata.display()))?;
    let ctx = ApiContext::new(registry).context("Invalid metadata")?;

    let mut diagnostics = CollectingSink::new();
    let files = Generator::new(&ctx, options)
        .generate(&mut diagnostics)
        .context("Failed to generate documentation")?;

    let warnings = diagnostics.warnings().count();
    let mut sink = TracingSink;
    for diagnostic in diagnostics.into_inner() {
        sink.report(diagnostic);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else {
        write_files(&cli.output, &files)?;
        for file in &files {
            println!("Generated: {}", cli.output.join(&file.file_location).display());
        }
    }

    if warnings > 0 {
        tracing::warn!("{} reference(s) could not be linked", warnings);
    }

    Ok(())
}

/// Options from `--config`, else `./apidoc.toml` if it exists, else defaults;
/// command-line flags take precedence
fn load_options(cli: &Cli) -> Result<GeneratorOptions> {
    let mut options = match &cli.config {
        Some(path) => read_options(path)?,
        None if Path::new(CONFIG_FILE).is_file() => read_options(Path::new(CONFIG_FILE))?,
        None => GeneratorOptions::default(),
    };

    if cli.skip_toc {
        options.skip_table_of_contents = true;
    }

    Ok(options)
}

fn read_options(path: &Path) -> Result<GeneratorOptions> {
    GeneratorOptions::from_path(path)
        .with_context(|| format!("Failed to load configuration from '{}'", path.display()))
}
