//! Mixer's command-line entry point.
//! Loads a template, applies configured edits and bindings, and writes the
//! mixed text to stdout or a file.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;
use mixer::{
    cache::{FileSystemLoader, TemplateCache},
    cli::{get_args, parse_set, Args},
    config::{find_config, load_config, parse_config, Config},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    mixer::Mixer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Ensures the output file is safe to write to.
///
/// # Errors
/// * Returns `Error::OutputExistsError` if the file exists and force is false
pub fn get_output_file<P: AsRef<Path>>(output: P, force: bool) -> Result<PathBuf> {
    let output = output.as_ref();
    if output.exists() && !force {
        return Err(Error::OutputExistsError {
            output: output.display().to_string(),
        });
    }
    Ok(output.to_path_buf())
}

fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Splits a template path into the loader root and the cache key.
fn template_location(template: &Path) -> Result<(PathBuf, String)> {
    let key = template
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::ConfigError(format!("invalid template path: {}", template.display()))
        })?;
    let root = match template.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((root, key.to_string()))
}

fn read_stdin_config() -> Result<Config> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_config(buffer.trim())
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the template (or one of its fragments) through the cache
/// 2. Loads the configuration file, explicit or next to the template
/// 3. Merges configuration from stdin and `--set` bindings
/// 4. Applies everything to a mixer and resolves it
/// 5. Writes the result to the output file or stdout
fn run(args: Args) -> Result<()> {
    let (root, key) = template_location(&args.template)?;
    let cache = TemplateCache::new(FileSystemLoader::new(&root));

    let mut mixer = match &args.fragment {
        Some(context) => Mixer::new(cache.load_fragment(&key, context)?),
        None => cache.mixer(&key)?,
    };

    let mut config = match args.config.clone().or_else(|| find_config(&root)) {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if args.stdin {
        config.merge(read_stdin_config()?);
    }
    for arg in &args.set {
        let (marker, value) = parse_set(arg)?;
        config.globals.insert(
            marker.to_string(),
            serde_json::Value::String(value.to_string()),
        );
    }

    config.apply(&mut mixer)?;
    debug!("Mixing '{}' with {} binding(s)", key, mixer.len());
    let mixed = mixer.resolve()?;

    match args.output {
        Some(output) => {
            let output = get_output_file(output, args.force)?;
            write_file(&mixed, &output)?;
            debug!("Wrote '{}'", output.display());
        }
        None => print!("{mixed}"),
    }
    Ok(())
}
