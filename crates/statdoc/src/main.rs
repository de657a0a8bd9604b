//! statdoc - Generate project documentation from SAS and Stata comments
//!
//! statdoc scans a code directory for `.sas` and `.do` files, extracts the
//! `@keyword` documentation comments they carry and writes them out as a
//! single markdown document, grouped by keyword.

use eyre::{Result, WrapErr};
use figue as args;
use owo_colors::OwoColorize;
use statdoc::config::Config;
use statdoc::output::OutputFormat;
use statdoc::{generate, logging, write_output};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: statdoc --code-dir <DIR> [--docs-dir <DIR>] [-c <CONFIG.json>] [-f markdown|json|text]
               [-o <OUTPUT>] [--stdout] [-r] [--keep-going] [-v] [--version]";

/// CLI arguments
#[derive(Debug, facet::Facet)]
struct Args {
    /// Directory containing the SAS / Stata code
    #[facet(args::named, default)]
    code_dir: Option<String>,

    /// Directory the documentation is written to (default: docs)
    #[facet(args::named, default)]
    docs_dir: Option<String>,

    /// Path to a JSON config file
    #[facet(args::named, args::short = 'c', default)]
    config: Option<PathBuf>,

    /// Output format: markdown, json, text
    #[facet(args::named, args::short = 'f', default)]
    format: Option<String>,

    /// File name of the generated document (default: README.md)
    #[facet(args::named, args::short = 'o', default)]
    output: Option<String>,

    /// Print the document instead of writing it
    #[facet(args::named, default)]
    stdout: bool,

    /// Walk subdirectories of the code directory
    #[facet(args::named, args::short = 'r', default)]
    recursive: bool,

    /// Skip files that fail to read or parse
    #[facet(args::named, default)]
    keep_going: bool,

    /// Show debug logging
    #[facet(args::named, args::short = 'v', default)]
    verbose: bool,

    /// Print the version and exit
    #[facet(args::named, default)]
    version: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), format!("{e:?}").red());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Args = figue::from_std_args()
        .into_result()
        .map(|o| o.value)
        .map_err(|e| eyre::eyre!("{e}"))
        .wrap_err("Failed to parse command line arguments")?;

    if args.version {
        println!("statdoc {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(args.verbose);

    let format = match args.format.as_deref() {
        Some(f) => OutputFormat::from_str(f)
            .ok_or_else(|| eyre::eyre!("Unknown format '{f}', expected markdown, json or text"))?,
        None => OutputFormat::default(),
    };

    let config = load_config(&args)?;
    if config.code_dir.as_deref().is_none_or(str::is_empty) {
        eprintln!("{USAGE}");
    }
    let code_dir = config.code_dir()?;

    eprintln!(
        "{} Scanning {}...",
        "->".blue().bold(),
        code_dir.display().cyan()
    );

    let generated = generate(&config, format)?;
    let doc = &generated.documentation;

    eprintln!(
        "   Found {} entries in {} files",
        doc.entry_count().to_string().green(),
        doc.files.len().to_string().green()
    );

    if !generated.warnings.is_empty() {
        eprintln!(
            "{} Skipped {} files:",
            "!".yellow().bold(),
            generated.warnings.len()
        );
        for warning in &generated.warnings {
            eprintln!("   {}", warning.yellow());
        }
    }

    if args.stdout || format.is_terminal_only() {
        print!("{}", generated.rendered);
        return Ok(());
    }

    let out_path = config.output_path()?;
    write_output(&out_path, &generated.rendered)?;
    eprintln!(
        "{} Wrote documentation to {}",
        "OK".green().bold(),
        out_path.display()
    );

    Ok(())
}

/// Load the config file, if any, and apply command line overrides
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &args.code_dir {
        config.code_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.docs_dir {
        config.docs_dir = Some(dir.clone());
    }
    if let Some(file) = &args.output {
        config.output_file = Some(file.clone());
    }
    if args.recursive {
        config.recursive = Some(true);
    }
    if args.keep_going {
        config.keep_going = Some(true);
    }

    Ok(config)
}
