//! Declarative sanitization of nested JSON documents
//!
//! A per-field chain of named filters is declared with a compact rule
//! grammar (`"trim|uppercase"`, `"cast:int"`), resolved against an
//! override-capable registry, and executed against dot-delimited paths
//! into the document.
//!
//! # Module Organization
//!
//! - [`rules`] - Rule grammar parsing and the per-field plan
//! - [`registry`] - Filter trait and the name -> implementation registry
//! - [`filters`] - Built-in filters
//! - [`sanitizer`] - Chain executor and builder
//! - [`path`] - Dot-path access into nested documents
//!
//! # Example
//!
//! ```
//! use scrub_core::SanitizerBuilder;
//! use serde_json::json;
//!
//! let sanitizer = SanitizerBuilder::new()
//!     .rule("name", "trim|uppercase")
//!     .rule("phone", "digit")
//!     .build();
//!
//! let output = sanitizer
//!     .sanitize(&json!({"name": "  John  ", "phone": "(555) 123-4567"}))
//!     .unwrap();
//! assert_eq!(output, json!({"name": "JOHN", "phone": "5551234567"}));
//! ```

pub mod filters;
pub mod path;
pub mod registry;
pub mod rules;
pub mod sanitizer;


pub use registry::{Filter, FilterFn, FilterRegistry};
pub use rules::{FieldPlan, InlineFilter, ParsedRule, RuleSpec};
pub use sanitizer::{Sanitizer, SanitizerBuilder};
