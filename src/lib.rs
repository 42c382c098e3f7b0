//! Mixer is a small text-templating engine for HTML pages.
//! It merges values into marker tokens of a template and repeats, blanks or
//! removes blocks bounded by context tokens, so page markup stays separate
//! from the code that produces the values.
//!
//! # Template conventions
//! - A *marker* is any unique token, usually framed by distinctive
//!   punctuation (`---email---`), placed where one value goes.
//! - A *context* is any unique token that appears **exactly twice**; the text
//!   between its occurrences is a block that can be repeated per row, blanked
//!   or removed.
//!
//! Values are inserted verbatim. Escaping is up to the caller.

/// Bindings and binding values
pub mod binding;

/// Template loaders and the shared template cache
pub mod cache;

/// Command-line interface module for the mixer binary
pub mod cli;

/// Mix configuration documents (JSON or YAML)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Logger initialization for the binary
pub mod logger;

/// The template mixer itself
pub mod mixer;

/// Literal split and replace primitives
pub mod text;

pub use binding::{Binding, Value};
pub use cache::{FileSystemLoader, MemoryLoader, TemplateCache, TemplateLoader};
pub use error::{Error, Result};
pub use mixer::Mixer;
