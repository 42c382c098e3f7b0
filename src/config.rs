//! Mix configuration.
//! A configuration document describes structural edits and bindings so a mix
//! can be kept in a file next to its template instead of in code.
//!
//! ```yaml
//! edits:
//!   - remove_context: "---ads---"
//!   - add_html: { context: "---list---", html: "<li>---item---</li>" }
//! contexts:
//!   "---list---":
//!     - { "---item---": "first" }
//!     - { "---item---": "second" }
//! globals:
//!   "---title---": "Guestbook"
//! ```

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::binding::Value;
use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::mixer::Mixer;

/// A structural edit, applied before any binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit {
    RemoveContext(String),
    RemoveHtml(String),
    AddHtml { context: String, html: String },
}

/// One row of a context: markers in order, the first one starting the row.
pub type Row = IndexMap<String, serde_json::Value>;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub edits: Vec<Edit>,
    #[serde(default)]
    pub contexts: IndexMap<String, Vec<Row>>,
    #[serde(default)]
    pub globals: IndexMap<String, serde_json::Value>,
}

impl Config {
    /// Replays this configuration into `mixer`: edits first, then context
    /// rows, then globals.
    ///
    /// The first marker of a context's first row starts every row of that
    /// context, whatever its position in the later rows.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if an edit or row names a context that
    ///   does not occur exactly twice at that point
    /// * `Error::ConfigError` if a value is an array or an object, or a row
    ///   lacks its context's row-start marker
    pub fn apply(&self, mixer: &mut Mixer) -> Result<()> {
        for edit in &self.edits {
            debug!("Applying edit {edit:?}");
            match edit {
                Edit::RemoveContext(context) => mixer.remove_context(context)?,
                Edit::RemoveHtml(context) => mixer.remove_html(context)?,
                Edit::AddHtml { context, html } => mixer.add_html(html, context)?,
            }
        }

        for (context, rows) in &self.contexts {
            let Some(row_marker) = rows.first().and_then(|row| row.keys().next()) else {
                continue;
            };

            for (i, row) in rows.iter().enumerate() {
                let start = row.get(row_marker).ok_or_else(|| {
                    Error::ConfigError(format!(
                        "row {} of context '{context}' has no '{row_marker}' marker",
                        i + 1
                    ))
                })?;
                mixer.add_in_context(
                    context.as_str(),
                    row_marker.as_str(),
                    value_text(row_marker, start)?,
                )?;

                for (marker, value) in row.iter().filter(|(marker, _)| *marker != row_marker) {
                    let value = value_text(marker, value)?;
                    mixer.add_in_context(context.as_str(), marker.as_str(), value)?;
                }
            }
        }

        for (marker, value) in &self.globals {
            mixer.add_global(marker.as_str(), value_text(marker, value)?);
        }

        Ok(())
    }

    /// Appends `other` to this configuration. Later globals for the same
    /// marker replace earlier ones; context rows are concatenated.
    pub fn merge(&mut self, other: Config) {
        self.edits.extend(other.edits);
        for (context, rows) in other.contexts {
            self.contexts.entry(context).or_default().extend(rows);
        }
        self.globals.extend(other.globals);
    }
}

/// Converts a scalar configuration value into binding text.
fn value_text(marker: &str, value: &serde_json::Value) -> Result<Value> {
    match value {
        serde_json::Value::Null => Ok(Value::from(None::<&str>)),
        serde_json::Value::String(s) => Ok(Value::from(s)),
        serde_json::Value::Bool(b) => Ok(Value::from(*b)),
        serde_json::Value::Number(n) => Ok(Value::from(n.to_string())),
        _ => Err(Error::ConfigError(format!(
            "value of '{marker}' must be a string, number, boolean or null"
        ))),
    }
}

/// Parses a configuration document, trying JSON first and YAML second.
///
/// An empty document yields an empty configuration.
///
/// # Errors
/// * `Error::YAMLParseError` if the content is neither JSON nor YAML
/// * `Error::ConfigError` if the document does not match the schema
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let raw: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)?,
    };

    if raw.is_null() {
        return Ok(Config::default());
    }

    serde_json::from_value(raw).map_err(|e| Error::ConfigError(format!("Invalid schema: {e}")))
}

/// Reads and parses the configuration file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "Invalid configuration path: {}",
            path.display()
        )));
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
    parse_config(&content)
}

/// Finds the first default configuration file in `dir`.
///
/// Tries the names in [`CONFIG_FILES`] in order.
pub fn find_config<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|file| dir.as_ref().join(file))
        .find(|path| path.is_file())
}
