//! Filter chain executor
//!
//! For every planned field present in the input, runs its chain in
//! declared order, threading each filter's output into the next. The
//! special `filter_if` rule reads the entire original document and sets
//! the chain's commit flag instead of touching the running value; when
//! the flag ends up false the field keeps its original value, discarding
//! everything the chain computed. An unresolved filter name aborts the
//! whole call.

use crate::error::{Error, Result};
use serde_json::Value;

use super::path;
use super::registry::{Filter, FilterRegistry};
use super::rules::{FieldPlan, ParsedRule, RuleSpec};

/// Name the executor special-cases as the commit gate.
const FILTER_IF: &str = "filter_if";

/// The sanitization engine: an eagerly parsed field plan plus a filter
/// registry snapshot. Holds no other state; each `sanitize` call is an
/// independent computation over its input.
#[derive(Debug)]
pub struct Sanitizer {
    plan: FieldPlan,
    registry: FilterRegistry,
}

impl Sanitizer {
    /// Create a sanitizer from an already-built plan and registry.
    pub fn new(plan: FieldPlan, registry: FilterRegistry) -> Self {
        Self { plan, registry }
    }

    /// Create a sanitizer from a JSON rules mapping (as loaded from a
    /// rules file), with the built-in filters. Fails fast on malformed
    /// rule declarations.
    pub fn from_rules(rules: &Value) -> Result<Self> {
        Ok(Self::new(
            FieldPlan::from_value(rules)?,
            FilterRegistry::with_builtins(),
        ))
    }

    pub fn plan(&self) -> &FieldPlan {
        &self.plan
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Run every field's chain and return the transformed document.
    ///
    /// Fields absent from the input are skipped without invoking any
    /// filter. Returns the fully transformed document or the first
    /// error; no partial result is ever returned.
    pub fn sanitize(&self, document: &Value) -> Result<Value> {
        let mut output = document.clone();

        for (field, chain) in self.plan.iter() {
            let Some(original) = path::get(document, field) else {
                log::trace!("field '{field}' absent, skipping chain");
                continue;
            };
            let original = original.clone();
            let mut value = original.clone();
            let mut commit = true;

            for rule in chain {
                match rule {
                    ParsedRule::Named { name, options } if name == FILTER_IF => {
                        let filter = self.resolve(name, field)?;
                        let verdict = filter.apply(document, options)?;
                        commit = super::filters::is_truthy(&verdict);
                        log::debug!("filter_if on '{field}' set commit={commit}");
                    }
                    ParsedRule::Named { name, options } => {
                        let filter = self.resolve(name, field)?;
                        value = filter.apply(&value, options)?;
                    }
                    ParsedRule::Inline(f) => {
                        value = f(&value);
                    }
                }
            }

            path::set(&mut output, field, if commit { value } else { original });
        }

        Ok(output)
    }

    fn resolve(&self, name: &str, field: &str) -> Result<&dyn Filter> {
        self.registry
            .resolve(name)
            .map(|filter| filter.as_ref())
            .ok_or_else(|| Error::UnknownFilter {
                name: name.to_string(),
                field: field.to_string(),
            })
    }
}

/// Fluent construction of a [`Sanitizer`]: declare per-field rules and
/// register custom or replacement filters, then build.
pub struct SanitizerBuilder {
    plan: FieldPlan,
    registry: FilterRegistry,
}

impl SanitizerBuilder {
    /// Start from the built-in filter set.
    pub fn new() -> Self {
        Self {
            plan: FieldPlan::new(),
            registry: FilterRegistry::with_builtins(),
        }
    }

    /// Declare rules for a field path.
    pub fn rule(mut self, field: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        self.plan.declare(field, spec.into());
        self
    }

    /// Declare an inline function rule for a field path.
    pub fn rule_fn<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.plan.declare(field, RuleSpec::inline(f));
        self
    }

    /// Register or replace a filter under `name`.
    pub fn filter<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.registry.extend(name, filter);
        self
    }

    /// Register or replace a filter backed by a plain closure.
    pub fn filter_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[String]) -> Result<Value> + Send + Sync + 'static,
    {
        self.registry.extend_fn(name, f);
        self
    }

    pub fn build(self) -> Sanitizer {
        Sanitizer::new(self.plan, self.registry)
    }
}

impl Default for SanitizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
