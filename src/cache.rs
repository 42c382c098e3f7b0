//! Template loading and caching.
//! Templates are loaded once per key and shared read-only between renders;
//! every [`Mixer`] gets its own copy of the cached text.

use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::mixer::Mixer;
use crate::text::split_in_three;

/// Trait for loading template text from different sources.
pub trait TemplateLoader: Send + Sync {
    /// Loads the template stored under `key`.
    ///
    /// # Returns
    /// * `Result<String>` - Template text
    ///
    /// # Errors
    /// * `Error::TemplateNotFoundError` if nothing exists under `key`
    fn load(&self, key: &str) -> Result<String>;
}

/// Loader for templates stored on the local filesystem.
///
/// Keys are paths relative to the loader root.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    root: PathBuf,
}

impl FileSystemLoader {
    /// Creates a new FileSystemLoader rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateLoader for FileSystemLoader {
    /// Reads `root/key` verbatim.
    ///
    /// # Errors
    /// * `Error::TemplateNotFoundError` if the file does not exist
    /// * `Error::IoError` if reading fails
    fn load(&self, key: &str) -> Result<String> {
        let path = self.root.join(key);
        if !path.is_file() {
            return Err(Error::TemplateNotFoundError {
                key: path.display().to_string(),
            });
        }

        debug!("Loading template from '{}'", path.display());
        std::fs::read_to_string(&path).map_err(Error::IoError)
    }
}

/// Loader that serves templates from an in-memory map.
///
/// Useful for tests and for templates bundled into the application.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    templates: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template to the loader.
    pub fn add(&mut self, key: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.templates.insert(key.into(), content.into());
        self
    }

    /// Creates a loader with the given templates.
    pub fn with_templates(
        templates: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut loader = Self::new();
        for (key, content) in templates {
            loader.add(key, content);
        }
        loader
    }
}

impl TemplateLoader for MemoryLoader {
    fn load(&self, key: &str) -> Result<String> {
        self.templates
            .get(key)
            .cloned()
            .ok_or_else(|| Error::TemplateNotFoundError {
                key: key.to_string(),
            })
    }
}

/// Cache of loaded templates keyed by page.
///
/// Loads happen outside the lock: two threads missing the same key both call
/// the loader and the last insert wins. Failed loads are not cached.
pub struct TemplateCache<L: TemplateLoader> {
    loader: L,
    entries: RwLock<HashMap<String, Arc<str>>>,
}

impl<L: TemplateLoader> TemplateCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the template under `key`, loading it on first use.
    ///
    /// # Errors
    /// * Any error of the underlying loader
    pub fn load_once(&self, key: &str) -> Result<Arc<str>> {
        if let Some(text) = self.get(key) {
            return Ok(text);
        }

        let text: Arc<str> = Arc::from(self.loader.load(key)?);
        debug!("Caching template '{}' ({} bytes)", key, text.len());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), Arc::clone(&text));
        Ok(text)
    }

    /// Returns the block bounded by `context` in the template under `key`.
    ///
    /// # Errors
    /// * Any error of the underlying loader
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the template
    pub fn load_fragment(&self, key: &str, context: &str) -> Result<String> {
        let text = self.load_once(key)?;
        let (_, block, _) = split_in_three(&text, context)?;
        Ok(block.to_string())
    }

    /// Creates a mixer over a private copy of the template under `key`.
    ///
    /// # Errors
    /// * Any error of the underlying loader
    pub fn mixer(&self, key: &str) -> Result<Mixer> {
        let text = self.load_once(key)?;
        Ok(Mixer::new(&*text))
    }

    fn get(&self, key: &str) -> Option<Arc<str>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets the cached template under `key`; the next load reads it again.
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
