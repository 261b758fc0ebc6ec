//! Rule parsing
//!
//! A field's rule declaration is a pipe-delimited string
//! (`"trim|uppercase"`), a list of rule tokens, or an inline function.
//! String tokens follow the `name:opt1,opt2` grammar: split once on `:`,
//! options split on `,` and whitespace-trimmed. Tokens with an empty
//! name parse to nothing and are dropped silently.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::filters::type_name;

/// An inline rule body: a plain function of the field's value.
pub type InlineFilter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Per-field rule declaration as supplied by the caller.
#[derive(Clone)]
pub enum RuleSpec {
    /// Pipe-delimited rule tokens, e.g. `"trim|uppercase"`
    Pipe(String),
    /// One rule token per element
    List(Vec<String>),
    /// A single inline function
    Inline(InlineFilter),
}

impl RuleSpec {
    /// Wrap a closure as an inline rule spec.
    pub fn inline<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Inline(Arc::new(f))
    }
}

impl From<&str> for RuleSpec {
    fn from(s: &str) -> Self {
        Self::Pipe(s.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(s: String) -> Self {
        Self::Pipe(s)
    }
}

impl From<Vec<String>> for RuleSpec {
    fn from(tokens: Vec<String>) -> Self {
        Self::List(tokens)
    }
}

impl From<Vec<&str>> for RuleSpec {
    fn from(tokens: Vec<&str>) -> Self {
        Self::List(tokens.into_iter().map(str::to_string).collect())
    }
}

/// One step of a parsed filter chain.
#[derive(Clone)]
pub enum ParsedRule {
    /// A registry lookup by name, with untyped options
    Named { name: String, options: Vec<String> },
    /// An inline function applied directly
    Inline(InlineFilter),
}

impl fmt::Debug for ParsedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, options } => f
                .debug_struct("Named")
                .field("name", name)
                .field("options", options)
                .finish(),
            Self::Inline(_) => f.write_str("Inline(..)"),
        }
    }
}

/// Parse one string token. An empty name yields `None`.
fn parse_token(token: &str) -> Option<ParsedRule> {
    let (name, options) = match token.split_once(':') {
        Some((name, rest)) => (
            name,
            rest.split(',').map(|opt| opt.trim().to_string()).collect(),
        ),
        None => (token, Vec::new()),
    };
    if name.is_empty() {
        return None;
    }
    Some(ParsedRule::Named {
        name: name.to_string(),
        options,
    })
}

/// Parse a rule spec into its ordered chain.
pub fn parse(spec: &RuleSpec) -> Vec<ParsedRule> {
    match spec {
        RuleSpec::Pipe(s) => s.split('|').filter_map(parse_token).collect(),
        RuleSpec::List(tokens) => tokens.iter().filter_map(|t| parse_token(t)).collect(),
        RuleSpec::Inline(f) => vec![ParsedRule::Inline(f.clone())],
    }
}

/// Ordered mapping from field path to its parsed chain. Insertion order
/// is declaration order and is preserved through execution.
#[derive(Debug, Clone, Default)]
pub struct FieldPlan {
    fields: Vec<(String, Vec<ParsedRule>)>,
}

impl FieldPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare rules for a field. Declaring the same field again extends
    /// its existing chain in order.
    pub fn declare(&mut self, field: impl Into<String>, spec: RuleSpec) {
        let field = field.into();
        let rules = parse(&spec);
        if let Some((_, chain)) = self.fields.iter_mut().find(|(name, _)| *name == field) {
            chain.extend(rules);
        } else {
            self.fields.push((field, rules));
        }
    }

    /// Build a plan from a JSON mapping of `field -> string | list of
    /// strings`, as loaded from a rules file. Any other rule value is an
    /// unsupported-rule-type configuration error, raised here.
    pub fn from_value(rules: &Value) -> Result<Self> {
        let map = rules.as_object().ok_or_else(|| {
            Error::configuration("rules must be an object mapping fields to rule specs")
        })?;

        let mut plan = Self::new();
        for (field, raw) in map {
            let spec = match raw {
                Value::String(s) => RuleSpec::Pipe(s.clone()),
                Value::Array(items) => {
                    let mut tokens = Vec::with_capacity(items.len());
                    for item in items {
                        let Value::String(token) = item else {
                            return Err(Error::UnsupportedRule {
                                field: field.clone(),
                                found: type_name(item).to_string(),
                            });
                        };
                        tokens.push(token.clone());
                    }
                    RuleSpec::List(tokens)
                }
                other => {
                    return Err(Error::UnsupportedRule {
                        field: field.clone(),
                        found: type_name(other).to_string(),
                    })
                }
            };
            plan.declare(field, spec);
        }
        Ok(plan)
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParsedRule])> {
        self.fields
            .iter()
            .map(|(field, chain)| (field.as_str(), chain.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
