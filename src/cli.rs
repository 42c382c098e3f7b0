//! Command-line interface implementation for mixer.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Command-line arguments structure for mixer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Mixer: merge marker and context bindings into a template", long_about = None)]
pub struct Args {
    /// Path to the template file
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Configuration file with edits and bindings (JSON or YAML).
    /// Defaults to mixer.json, mixer.yml or mixer.yaml next to the template.
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Global binding, repeatable
    #[arg(short, long = "set", value_name = "MARKER=VALUE", allow_hyphen_values = true)]
    pub set: Vec<String>,

    /// Read a configuration document from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Mix only the block bounded by this context
    #[arg(long, value_name = "CONTEXT", allow_hyphen_values = true)]
    pub fragment: Option<String>,

    /// File to write the mixed text to instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Splits a `--set` argument at its first `=`.
///
/// # Errors
/// * `Error::ConfigError` if there is no `=` or the marker is empty
pub fn parse_set(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((marker, value)) if !marker.is_empty() => Ok((marker, value)),
        _ => Err(Error::ConfigError(format!(
            "invalid binding '{arg}', expected MARKER=VALUE"
        ))),
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
