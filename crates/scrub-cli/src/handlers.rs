//! Subcommand implementations

use crate::cli::ApplyArgs;
use crate::error::{Error, Result};
use scrub_core::{FilterRegistry, Sanitizer};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Load rules, sanitize the document, and write the result.
pub fn handle_apply(args: ApplyArgs) -> Result<()> {
    let rules = load_rules(&args.rules)?;
    let sanitizer = Sanitizer::from_rules(&rules)?;
    tracing::info!(
        fields = sanitizer.plan().len(),
        rules = %args.rules.display(),
        "rules loaded"
    );

    let document = load_document(args.input.as_deref())?;
    let output = sanitizer.sanitize(&document)?;

    let mut rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    rendered.push('\n');

    match args.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Print the built-in filter names, one per line.
pub fn handle_filters() -> Result<()> {
    for name in FilterRegistry::with_builtins().names() {
        println!("{name}");
    }
    Ok(())
}

/// Read a rules file; YAML when the extension says so, JSON otherwise.
fn load_rules(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        Ok(serde_yaml::from_str(&raw)?)
    } else {
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Read the input document from a file, or stdin when no path is given.
fn load_document(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}
