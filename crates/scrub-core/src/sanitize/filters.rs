//! Built-in filters
//!
//! Each filter is a pure `(value, options)` transform. String filters
//! pass non-string values through unchanged; conversion filters (`cast`,
//! `format_date`) raise a filter execution error on input they cannot
//! handle, and the engine propagates it untouched.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Number, Value};

use super::path;

/// Truthiness rule used by `filter_if` and the `bool` cast: null and
/// empty containers are false, numbers are compared against zero, and
/// the strings `""` and `"0"` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Strip surrounding whitespace.
pub struct Trim;

impl super::registry::Filter for Trim {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| s.trim().to_string()))
    }
}

/// Uppercase the whole string.
pub struct Uppercase;

impl super::registry::Filter for Uppercase {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| s.to_uppercase()))
    }
}

/// Lowercase the whole string.
pub struct Lowercase;

impl super::registry::Filter for Lowercase {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| s.to_lowercase()))
    }
}

/// Lowercase everything, then uppercase the first character.
pub struct Capitalize;

impl super::registry::Filter for Capitalize {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| {
            let lower = s.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }))
    }
}

/// Keep only ASCII digit characters.
pub struct Digit {
    non_digit: Regex,
}

impl Digit {
    pub fn new() -> Self {
        Self {
            non_digit: Regex::new(r"[^0-9]").expect("static pattern"),
        }
    }
}

impl Default for Digit {
    fn default() -> Self {
        Self::new()
    }
}

impl super::registry::Filter for Digit {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| {
            self.non_digit.replace_all(s, "").into_owned()
        }))
    }
}

/// Remove `<...>` tag runs from the string.
pub struct StripTags {
    tag: Regex,
}

impl StripTags {
    pub fn new() -> Self {
        Self {
            tag: Regex::new(r"<[^>]*>").expect("static pattern"),
        }
    }
}

impl Default for StripTags {
    fn default() -> Self {
        Self::new()
    }
}

impl super::registry::Filter for StripTags {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| self.tag.replace_all(s, "").into_owned()))
    }
}

/// HTML-escape `& < > " '`.
pub struct Escape;

impl super::registry::Filter for Escape {
    fn apply(&self, value: &Value, _options: &[String]) -> Result<Value> {
        Ok(map_str(value, |s| {
            s.replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('"', "&quot;")
                .replace('\'', "&#039;")
        }))
    }
}

/// Cast the value to the type named by `options[0]`: `int`/`integer`,
/// `float`/`double`, `string`, or `bool`/`boolean`.
pub struct Cast;

impl super::registry::Filter for Cast {
    fn apply(&self, value: &Value, options: &[String]) -> Result<Value> {
        let target = options
            .first()
            .ok_or_else(|| Error::filter("cast", "expected a target type option"))?;

        match target.as_str() {
            "int" | "integer" => cast_int(value),
            "float" | "double" => cast_float(value),
            "string" => cast_string(value),
            "bool" | "boolean" => Ok(Value::Bool(is_truthy(value))),
            other => Err(Error::filter(
                "cast",
                format!("unknown cast type '{other}'"),
            )),
        }
    }
}

fn cast_int(value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| Error::filter("cast", format!("cannot cast '{s}' to int"))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Number((f as i64).into()))
            } else {
                Err(Error::filter("cast", format!("cannot cast {n} to int")))
            }
        }
        Value::Bool(b) => Ok(Value::Number(i64::from(*b).into())),
        other => Err(Error::filter(
            "cast",
            format!("cannot cast {} to int", type_name(other)),
        )),
    }
}

fn cast_float(value: &Value) -> Result<Value> {
    let parsed = match value {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::filter("cast", format!("cannot cast '{s}' to float")))?,
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::filter("cast", format!("cannot cast {n} to float")))?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        other => {
            return Err(Error::filter(
                "cast",
                format!("cannot cast {} to float", type_name(other)),
            ))
        }
    };
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| Error::filter("cast", "float cast produced a non-finite number"))
}

fn cast_string(value: &Value) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(Error::filter(
            "cast",
            format!("cannot cast {} to string", type_name(other)),
        )),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reformat a date string. `options[0]` is the strftime pattern the
/// input is parsed with, `options[1]` the pattern the output is
/// formatted with. Accepts datetimes or bare dates (midnight assumed).
pub struct FormatDate;

impl super::registry::Filter for FormatDate {
    fn apply(&self, value: &Value, options: &[String]) -> Result<Value> {
        let (from, to) = match options {
            [from, to, ..] => (from.as_str(), to.as_str()),
            _ => {
                return Err(Error::filter(
                    "format_date",
                    "expected from and to format options",
                ))
            }
        };

        let Some(s) = value.as_str() else {
            return Ok(value.clone());
        };

        let parsed = NaiveDateTime::parse_from_str(s, from)
            .or_else(|_| {
                NaiveDate::parse_from_str(s, from)
                    .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
            })
            .map_err(|e| {
                Error::filter(
                    "format_date",
                    format!("cannot parse '{s}' with format '{from}': {e}"),
                )
            })?;

        Ok(Value::String(parsed.format(to).to_string()))
    }
}

/// Commit gate. Receives the entire input document (not the field's
/// value); `options[0]` names a dot path whose truthiness becomes the
/// chain's commit flag. An absent path reads as false.
pub struct FilterIf;

impl super::registry::Filter for FilterIf {
    fn apply(&self, document: &Value, options: &[String]) -> Result<Value> {
        let flag_path = options
            .first()
            .ok_or_else(|| Error::filter("filter_if", "expected a field path option"))?;
        let truthy = path::get(document, flag_path)
            .map(is_truthy)
            .unwrap_or(false);
        Ok(Value::Bool(truthy))
    }
}

fn map_str(value: &Value, f: impl FnOnce(&str) -> String) -> Value {
    match value.as_str() {
        Some(s) => Value::String(f(s)),
        None => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::registry::Filter;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trim() {
        assert_eq!(Trim.apply(&json!("  abc  "), &[]).unwrap(), json!("abc"));
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(Uppercase.apply(&json!("aB1"), &[]).unwrap(), json!("AB1"));
        assert_eq!(Lowercase.apply(&json!("HeLLo"), &[]).unwrap(), json!("hello"));
        assert_eq!(
            Capitalize.apply(&json!("jOHN doe"), &[]).unwrap(),
            json!("John doe")
        );
    }

    #[test]
    fn test_non_strings_pass_through() {
        assert_eq!(Uppercase.apply(&json!(42), &[]).unwrap(), json!(42));
        assert_eq!(Trim.apply(&json!(null), &[]).unwrap(), json!(null));
        assert_eq!(
            Digit::new().apply(&json!([1, 2]), &[]).unwrap(),
            json!([1, 2])
        );
    }

    #[test]
    fn test_digit() {
        assert_eq!(
            Digit::new().apply(&json!("(555) 123-4567"), &[]).unwrap(),
            json!("5551234567")
        );
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            StripTags::new().apply(&json!("<b>Hello</b>"), &[]).unwrap(),
            json!("Hello")
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            Escape.apply(&json!(r#"<a href="x">&'</a>"#), &[]).unwrap(),
            json!("&lt;a href=&quot;x&quot;&gt;&amp;&#039;&lt;/a&gt;")
        );
    }

    #[test]
    fn test_cast_int() {
        let opts = vec!["int".to_string()];
        assert_eq!(Cast.apply(&json!("42"), &opts).unwrap(), json!(42));
        assert_eq!(Cast.apply(&json!(3.9), &opts).unwrap(), json!(3));
        assert_eq!(Cast.apply(&json!(true), &opts).unwrap(), json!(1));
        assert!(Cast.apply(&json!("abc"), &opts).is_err());
    }

    #[test]
    fn test_cast_float_and_string() {
        assert_eq!(
            Cast.apply(&json!("1.5"), &["float".to_string()]).unwrap(),
            json!(1.5)
        );
        assert_eq!(
            Cast.apply(&json!(7), &["string".to_string()]).unwrap(),
            json!("7")
        );
    }

    #[test]
    fn test_cast_bool_uses_truthiness() {
        let opts = vec!["bool".to_string()];
        assert_eq!(Cast.apply(&json!("0"), &opts).unwrap(), json!(false));
        assert_eq!(Cast.apply(&json!("yes"), &opts).unwrap(), json!(true));
        assert_eq!(Cast.apply(&json!(0), &opts).unwrap(), json!(false));
    }

    #[test]
    fn test_cast_unknown_type_errors() {
        let err = Cast.apply(&json!("x"), &["widget".to_string()]).unwrap_err();
        assert!(err.to_string().contains("widget"));
    }

    #[test]
    fn test_format_date() {
        let opts = vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()];
        assert_eq!(
            FormatDate.apply(&json!("2025-03-09"), &opts).unwrap(),
            json!("09/03/2025")
        );
    }

    #[test]
    fn test_format_date_with_time() {
        let opts = vec!["%Y-%m-%d %H:%M:%S".to_string(), "%H:%M".to_string()];
        assert_eq!(
            FormatDate.apply(&json!("2025-03-09 14:30:00"), &opts).unwrap(),
            json!("14:30")
        );
    }

    #[test]
    fn test_format_date_bad_input_errors() {
        let opts = vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()];
        assert!(FormatDate.apply(&json!("not a date"), &opts).is_err());
        assert!(FormatDate.apply(&json!("2025-03-09"), &[]).is_err());
    }

    #[test]
    fn test_filter_if_reads_the_document() {
        let doc = json!({"flag": true, "name": "john"});
        let opts = vec!["flag".to_string()];
        assert_eq!(FilterIf.apply(&doc, &opts).unwrap(), json!(true));

        let doc = json!({"flag": 0});
        assert_eq!(FilterIf.apply(&doc, &opts).unwrap(), json!(false));

        let doc = json!({});
        assert_eq!(FilterIf.apply(&doc, &opts).unwrap(), json!(false));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([0])));
    }
}
