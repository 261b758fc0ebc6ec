//! Filter registry: name -> implementation
//!
//! A flat map with exact-name lookup. Registering a name that already
//! exists replaces the previous entry, which is how callers override the
//! built-ins. Resolution failure is not an error here; the executor
//! raises it so the message can carry the offending field.

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::filters;

/// A named, pure value transformation.
///
/// Implementations must be deterministic, must not mutate shared state,
/// and must tolerate `options` being empty. The one special case is
/// `filter_if`, which the executor hands the entire input document
/// instead of a single field's value.
pub trait Filter: Send + Sync {
    fn apply(&self, value: &Value, options: &[String]) -> Result<Value>;
}

/// Adapter that lets a plain closure act as a [`Filter`].
pub struct FilterFn<F>(pub F);

impl<F> Filter for FilterFn<F>
where
    F: Fn(&Value, &[String]) -> Result<Value> + Send + Sync,
{
    fn apply(&self, value: &Value, options: &[String]) -> Result<Value> {
        (self.0)(value, options)
    }
}

/// Mapping from filter name to implementation, override-capable.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the built-in filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.extend("capitalize", filters::Capitalize);
        registry.extend("cast", filters::Cast);
        registry.extend("escape", filters::Escape);
        registry.extend("format_date", filters::FormatDate);
        registry.extend("lowercase", filters::Lowercase);
        registry.extend("uppercase", filters::Uppercase);
        registry.extend("trim", filters::Trim);
        registry.extend("strip_tags", filters::StripTags::new());
        registry.extend("digit", filters::Digit::new());
        registry.extend("filter_if", filters::FilterIf);
        registry
    }

    /// Register or replace the filter stored under `name`. Last write
    /// wins; there is no removal operation.
    pub fn extend<F>(&mut self, name: impl Into<String>, filter: F)
    where
        F: Filter + 'static,
    {
        self.filters.insert(name.into(), Arc::new(filter));
    }

    /// Register or replace a filter backed by a plain closure.
    pub fn extend_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, &[String]) -> Result<Value> + Send + Sync + 'static,
    {
        self.extend(name, FilterFn(f));
    }

    /// Exact-name lookup.
    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.filters.get(name)
    }

    /// Registered filter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names())
            .finish()
    }
}
