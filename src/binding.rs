//! Bindings registered on a [`Mixer`](crate::mixer::Mixer).

use crate::constants::NULL_VALUE;

/// Text substituted for a marker.
///
/// Converts from strings, integers, booleans and `Option`s. `None` renders as
/// the literal text `"null"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value(String);

impl Value {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self(NULL_VALUE.to_string()),
        }
    }
}

macro_rules! value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

value_from_display!(bool, i32, i64, u32, u64, usize);

/// A registered `(context?, marker, value)` triple.
///
/// `context` is `None` for global bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub context: Option<String>,
    pub marker: String,
    pub value: Value,
}

impl Binding {
    pub fn new(context: Option<String>, marker: String, value: Value) -> Self {
        Self {
            context,
            marker,
            value,
        }
    }

    /// Whether this binding belongs to `context` (`None` for the global scope).
    pub fn is_in(&self, context: Option<&str>) -> bool {
        self.context.as_deref() == context
    }
}
