//! Scrub Core - Declarative field sanitization for nested JSON documents
//!
//! This crate rewrites selected values of a nested document by applying
//! a declared, per-field chain of named filters. The caller supplies the
//! rules (a compact `name:opt1,opt2` grammar joined by `|`, lists of
//! tokens, or inline functions); the engine parses them once, resolves
//! filter names against an override-capable registry, walks dot-delimited
//! field paths, and executes each chain with a conditional-commit gate
//! (`filter_if`) that can veto a whole chain based on the full document.
//!
//! # Main Components
//!
//! - **Error Handling**: configuration vs. filter execution errors via `thiserror`
//! - **Rule Parser**: rule specs to ordered, typed per-field plans
//! - **Filter Registry**: built-ins plus caller overrides, last write wins
//! - **Chain Executor**: sequential composition with the commit flag
//!
//! # Example
//!
//! ```
//! use scrub_core::{Result, SanitizerBuilder};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let sanitizer = SanitizerBuilder::new()
//!         .rule("user.name", "trim|capitalize")
//!         .build();
//!     let output = sanitizer.sanitize(&json!({"user": {"name": "  ada  "}}))?;
//!     assert_eq!(output, json!({"user": {"name": "Ada"}}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod sanitize;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use sanitize::{
    Filter, FilterFn, FilterRegistry,
    FieldPlan, InlineFilter, ParsedRule, RuleSpec,
    Sanitizer, SanitizerBuilder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }
}
