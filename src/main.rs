//! sanitext - sanitize untrusted input from the command line.
//!
//! ```text
//! sanitext file-name "My Report (v2).PDF"   # MyReportv2.pdf
//! sanitext path --allow-nav "./a/../b.txt"   # ./b.txt
//! sanitext --json batch --kind url --input urls.txt
//! ```
//!
//! Exit codes: 0 when every value was accepted, 1 when a value was
//! rejected, 2 for usage, config or I/O errors.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

use sanitext::commands::{self, Kind, Options, batch};
use sanitext::config::Config;
use sanitext::logging;
use sanitext::security::UrlPolicy;

const EXIT_REJECTED: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "sanitext")]
#[command(about = "Sanitize untrusted text, names, paths and URLs")]
#[command(version)]
struct Cli {
    /// Config file (default: ./sanitext.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print one JSON object per value
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean free text
    String { input: String },
    /// Clean a hostname
    Hostname { input: String },
    /// Normalize a file extension
    Extension { input: String },
    /// Sanitize a single file name
    FileName { input: String },
    /// Sanitize a single directory name
    DirName { input: String },
    /// Sanitize a path component by component
    Path {
        input: String,
        /// Keep a leading ./ or ../
        #[arg(long)]
        allow_nav: bool,
    },
    /// Validate a URL
    Url {
        input: String,
        /// Accept URLs without http:// or https://
        #[arg(long)]
        no_protocol: bool,
    },
    /// Print whether a name has a file extension
    HasExt { input: String },
    /// Print the content type for a file name
    ContentType { input: String },
    /// Sanitize one value per line
    Batch {
        /// Sanitizer to apply to every line
        #[arg(long, value_enum)]
        kind: Kind,
        /// Input file (default: stdin)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Keep a leading ./ or ../ (with --kind path)
        #[arg(long)]
        allow_nav: bool,
        /// Accept URLs without a scheme (with --kind url)
        #[arg(long)]
        no_protocol: bool,
    },
}

/// Combine config defaults with per-command flags. Flags only relax.
fn options(config: &Config, allow_nav: bool, no_protocol: bool) -> Options {
    Options {
        allow_nav: allow_nav || config.path.allow_navigation,
        url_policy: if no_protocol {
            UrlPolicy::AllowMissingProtocol
        } else {
            config.url_policy()
        },
    }
}

fn run(cli: Cli, config: &Config) -> Result<bool> {
    let json = cli.json;
    let defaults = options(config, false, false);

    match cli.command {
        Commands::String { input } => commands::execute(Kind::String, &input, defaults, json),
        Commands::Hostname { input } => commands::execute(Kind::Hostname, &input, defaults, json),
        Commands::Extension { input } => {
            commands::execute(Kind::Extension, &input, defaults, json)
        },
        Commands::FileName { input } => commands::execute(Kind::FileName, &input, defaults, json),
        Commands::DirName { input } => commands::execute(Kind::DirName, &input, defaults, json),
        Commands::Path { input, allow_nav } => {
            commands::execute(Kind::Path, &input, options(config, allow_nav, false), json)
        },
        Commands::Url { input, no_protocol } => {
            commands::execute(Kind::Url, &input, options(config, false, no_protocol), json)
        },
        Commands::HasExt { input } => commands::execute(Kind::HasExt, &input, defaults, json),
        Commands::ContentType { input } => {
            commands::execute(Kind::ContentType, &input, defaults, json)
        },
        Commands::Batch {
            kind,
            input,
            allow_nav,
            no_protocol,
        } => batch::execute(
            kind,
            input.as_deref(),
            options(config, allow_nav, no_protocol),
            json,
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_ERROR);
        },
    };
    let validation = match config.validate() {
        Ok(validation) => validation,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_ERROR);
        },
    };

    logging::init_logging(&config.log);
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    match run(cli, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_REJECTED),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        },
    }
}
