//! Dot-path access into nested JSON documents
//!
//! Paths are dot-delimited segments (`"user.address.city"`). A segment
//! addresses an object key, or an array index when it parses as an
//! unsigned integer and the current node is an array. `has` is total: it
//! returns `false` for any missing segment, intermediate ones included.
//! No wildcard support.

use serde_json::{Map, Value};

/// Look up the value at `path`, if present.
pub fn get<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Whether `path` resolves to a value in `document`.
pub fn has(document: &Value, path: &str) -> bool {
    get(document, path).is_some()
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// Array nodes are descended through (or assigned into) when the segment
/// is an in-bounds index; any other missing or scalar intermediate is
/// replaced with a fresh object.
pub fn set(document: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = document;
    let last = segments.len() - 1;

    for (i, segment) in segments.iter().enumerate() {
        if i == last {
            match current {
                Value::Array(items) => match segment.parse::<usize>() {
                    Ok(index) if index < items.len() => items[index] = value,
                    Ok(index) if index == items.len() => items.push(value),
                    _ => {}
                },
                Value::Object(map) => {
                    map.insert(segment.to_string(), value);
                }
                other => {
                    let mut map = Map::new();
                    map.insert(segment.to_string(), value);
                    *other = Value::Object(map);
                }
            }
            return;
        }

        let descend_index = match current {
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .filter(|index| *index < items.len()),
            _ => None,
        };

        current = match descend_index {
            Some(index) => &mut current.as_array_mut().unwrap()[index],
            None => {
                if !current.is_object() {
                    *current = Value::Object(Map::new());
                }
                current
                    .as_object_mut()
                    .unwrap()
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()))
            }
        };
    }
}
