//! Error handling for the mixer.
//! Defines the crate-wide error type and result alias.

use std::io;
use thiserror::Error;

/// Custom error types for mixer operations.
///
/// Unresolved markers are not errors: they stay in the output untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A context token that does not occur exactly twice in the working text.
    #[error(
        "Malformed context '{context}': expected exactly 2 occurrences, found {occurrences}."
    )]
    MalformedContextError { context: String, occurrences: usize },

    /// An empty string was passed where a context token is required.
    #[error("Context token must not be empty.")]
    EmptyTokenError,

    /// The template loader has nothing under the requested key.
    #[error("Template '{key}' does not exist.")]
    TemplateNotFoundError { key: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Failed to parse YAML: {0}.")]
    YAMLParseError(#[from] serde_yaml::Error),

    /// The output file exists and overwriting was not requested.
    #[error("Output file '{output}' already exists. Use --force to overwrite it.")]
    OutputExistsError { output: String },
}

/// Convenience type alias for Results with mixer's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
