//! The template mixer.
//!
//! A [`Mixer`] owns a private copy of a template and an ordered log of
//! bindings. Two placeholder conventions are understood:
//!
//! - a *marker* is any unique token (e.g. `---email---`) replaced by a value;
//! - a *context* is any unique token appearing exactly twice, bounding a
//!   block that can be repeated, blanked or removed as a unit.
//!
//! ```
//! use mixer::Mixer;
//!
//! let mut mixer = Mixer::new("<h1>---title---</h1><ul>---row---<li>---n---</li>---row---</ul>");
//! mixer.add_global("---title---", "Guests");
//! mixer.add_in_context("---row---", "---n---", "Ann").unwrap();
//! mixer.add_in_context("---row---", "---n---", "Bob").unwrap();
//!
//! assert_eq!(
//!     mixer.resolve().unwrap(),
//!     "<h1>Guests</h1><ul><li>Ann</li><li>Bob</li></ul>"
//! );
//! ```

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::binding::{Binding, Value};
use crate::constants::EMPTY_BLOCK;
use crate::error::Result;
use crate::text::{replace_all, split_in_three};

/// Merges marker and context bindings into a template.
///
/// Binding operations only record bindings; the working text changes only
/// through the structural edits [`remove_context`](Self::remove_context),
/// [`add_html`](Self::add_html) and [`remove_html`](Self::remove_html).
#[derive(Debug, Clone)]
pub struct Mixer {
    html: String,
    bindings: Vec<Binding>,
    /// Explicit contexts in first-reference order.
    contexts: IndexSet<String>,
}

impl Mixer {
    /// Creates a mixer over a private copy of `template`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            html: template.into(),
            bindings: Vec::new(),
            contexts: IndexSet::new(),
        }
    }

    /// Current working text, including any structural edits.
    pub fn template(&self) -> &str {
        &self.html
    }

    /// Registered bindings in registration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Adds a global binding, substituted everywhere after contexts are resolved.
    ///
    /// Adding the same marker again appends its value to the earlier ones.
    pub fn add_global(&mut self, marker: impl Into<String>, value: impl Into<Value>) {
        let binding = Binding::new(None, marker.into(), value.into());
        trace!("Adding global binding {} -> {}", binding.marker, binding.value);
        self.bindings.push(binding);
    }

    /// Adds a binding scoped to `context`.
    ///
    /// The first marker registered for a context starts a new row of the
    /// context's block each time it is added again.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the working text
    pub fn add_in_context(
        &mut self,
        context: impl Into<String>,
        marker: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let context = context.into();
        split_in_three(&self.html, &context)?;

        let binding = Binding::new(Some(context.clone()), marker.into(), value.into());
        trace!("Adding binding {} -> {} in '{}'", binding.marker, binding.value, context);
        self.contexts.insert(context);
        self.bindings.push(binding);
        Ok(())
    }

    /// Removes the first global binding equal to `(marker, value)`, if any.
    pub fn remove_binding(&mut self, marker: &str, value: impl Into<Value>) {
        self.remove_first(None, marker, &value.into());
    }

    /// Removes the first binding equal to `(marker, value)` in `context`, if any.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the working text
    pub fn remove_binding_in_context(
        &mut self,
        context: &str,
        marker: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        split_in_three(&self.html, context)?;
        self.remove_first(Some(context), marker, &value.into());
        Ok(())
    }

    fn remove_first(&mut self, context: Option<&str>, marker: &str, value: &Value) {
        let position = self
            .bindings
            .iter()
            .position(|b| b.is_in(context) && b.marker == marker && &b.value == value);
        match position {
            Some(i) => {
                self.bindings.remove(i);
            }
            None => debug!("No binding {marker} -> {value} to remove"),
        }
    }

    /// Drops every global binding.
    pub fn clear_global(&mut self) {
        self.bindings.retain(|b| !b.is_in(None));
    }

    /// Drops every binding of `context`.
    ///
    /// The block stays in the template and resolves to nothing.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the working text
    pub fn clear_context(&mut self, context: &str) -> Result<()> {
        split_in_three(&self.html, context)?;
        self.bindings.retain(|b| !b.is_in(Some(context)));
        self.contexts.insert(context.to_string());
        Ok(())
    }

    /// Drops every binding in every scope.
    pub fn clear_all(&mut self) {
        self.bindings.clear();
    }

    /// Deletes `context`, both of its tokens and its block from the working
    /// text. Bindings registered for it are discarded.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the working text
    pub fn remove_context(&mut self, context: &str) -> Result<()> {
        let (before, _, after) = split_in_three(&self.html, context)?;
        let html = format!("{before}{after}");
        debug!("Removed context '{context}'");

        self.html = html;
        self.bindings.retain(|b| !b.is_in(Some(context)));
        self.contexts.shift_remove(context);
        Ok(())
    }

    /// Replaces the block of `context` with `html_part`, keeping both tokens.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the working text
    pub fn add_html(&mut self, html_part: &str, context: &str) -> Result<()> {
        let (before, _, after) = split_in_three(&self.html, context)?;
        let html = format!("{before}{context}{html_part}{context}{after}");

        self.html = html;
        Ok(())
    }

    /// Blanks the block of `context` to a single newline, keeping both tokens.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if `context` does not occur exactly
    ///   twice in the working text
    pub fn remove_html(&mut self, context: &str) -> Result<()> {
        self.add_html(EMPTY_BLOCK, context)
    }

    /// Produces the mixed text.
    ///
    /// Contexts are resolved first, in the order they were first referenced,
    /// then global bindings are substituted across the whole text. Markers
    /// without a binding are left in place. The mixer is not modified, so
    /// calling this again yields the same text.
    ///
    /// # Errors
    /// * `Error::MalformedContextError` if a referenced context no longer
    ///   occurs exactly twice when its turn comes
    pub fn resolve(&self) -> Result<String> {
        let mut html = self.html.clone();

        for context in &self.contexts {
            let (before, block, after) = split_in_three(&html, context)?;
            let rows = self.render_rows(context, block);
            let mixed = format!("{before}{rows}{after}");
            html = mixed;
        }

        for (marker, value) in self.global_values() {
            html = replace_all(&html, marker, &value);
        }

        Ok(html)
    }

    /// Renders one copy of `block` per row of `context`'s bindings.
    fn render_rows(&self, context: &str, block: &str) -> String {
        let mut rows: Vec<String> = Vec::new();
        let mut row_marker: Option<&str> = None;

        for binding in self.bindings.iter().filter(|b| b.is_in(Some(context))) {
            let marker = binding.marker.as_str();
            if row_marker.is_none() {
                row_marker = Some(marker);
            }
            if row_marker == Some(marker) {
                rows.push(block.to_string());
            }
            if let Some(row) = rows.last_mut() {
                *row = replace_all(row, marker, binding.value.as_str());
            }
        }

        debug!("Resolved context '{}' into {} row(s)", context, rows.len());
        rows.concat()
    }

    /// Global values per marker, concatenated in registration order.
    fn global_values(&self) -> IndexMap<&str, String> {
        let mut values: IndexMap<&str, String> = IndexMap::new();
        for binding in self.bindings.iter().filter(|b| b.is_in(None)) {
            values
                .entry(binding.marker.as_str())
                .or_default()
                .push_str(binding.value.as_str());
        }
        values
    }
}
