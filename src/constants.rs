//! Common constants used throughout the mixer.

/// Supported configuration file names, looked up next to a template
pub const CONFIG_FILES: [&str; 3] = ["mixer.json", "mixer.yml", "mixer.yaml"];

/// Text rendered for a missing (null) binding value
pub const NULL_VALUE: &str = "null";

/// Block body left behind by `Mixer::remove_html`
pub const EMPTY_BLOCK: &str = "\n";
