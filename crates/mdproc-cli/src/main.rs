use anyhow::{Context, Result};
use clap::Parser;
use mdproc_config::Config;
use mdproc_engine::{ProcessError, ProcessOptions, Processor, resolve_input};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "mdproc")]
#[command(author, version)]
#[command(about = "Convert a Markdown file to an HTML page")]
#[command(after_help = "\
EXAMPLES:

    # Render a file
    mdproc notes.md notes.html

    # Input may also be a file URI
    mdproc file:///home/me/notes.md notes.html

    # Fail instead of writing output when the input has syntax errors
    mdproc --strict notes.md notes.html

CONFIGURATION:

Options are read from ~/.config/mdproc/config.toml unless --config is given:

    append_terminator = true
    strict = false")]
struct Cli {
    /// Markdown input, a path or file:// URI
    input: String,

    /// HTML output path
    output: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on syntax errors instead of rendering what parsed
    #[arg(long)]
    strict: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let processor = Processor::new(process_options(&config, cli.strict));

    let input = resolve_input(&cli.input);
    let report = processor.process_file(&input, &cli.output)?;

    if !report.diagnostics.is_empty() {
        log::warn!(
            "{} rendered with {} syntax error(s)",
            report.input.display(),
            report.diagnostics.len()
        );
    }
    Ok(())
}

/// Load configuration from `explicit`, else from the default location, else
/// fall back to defaults.
fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = explicit else {
        return Ok(Config::load()?.unwrap_or_default());
    };

    let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
    let config = Config::load_from_path(&path)?
        .with_context(|| format!("Config file not found: {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn process_options(config: &Config, strict: bool) -> ProcessOptions {
    ProcessOptions {
        append_terminator: config.append_terminator,
        strict: strict || config.strict,
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ProcessError>()
        .map_or(1, ProcessError::exit_code)
}
