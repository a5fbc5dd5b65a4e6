use serde_json::{Map, Value};

use crate::{format_json_pointer, JsonPointerError};

fn array_index(step: &str) -> Option<usize> {
    // RFC 6901: no sign, no leading zeros, "-" is past-the-end and never resolves
    if step.is_empty() || (step.len() > 1 && step.starts_with('0')) {
        return None;
    }
    if !step.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    step.parse().ok()
}

/// Get a value by path. Returns `None` when any step is missing.
///
/// ```
/// use levelboard_json_pointer::{get, parse_json_pointer};
/// use serde_json::json;
///
/// let panel = json!({"spec": {"data": {"spec": {"queries": [{"kind": "q"}]}}}});
/// let path = parse_json_pointer("/spec/data/spec/queries/0/kind");
/// assert_eq!(get(&panel, &path), Some(&json!("q")));
/// assert_eq!(get(&panel, &parse_json_pointer("/spec/layout")), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Object(map) => map.get(step)?,
            Value::Array(arr) => arr.get(array_index(step)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Object(map) => map.get_mut(step)?,
            Value::Array(arr) => arr.get_mut(array_index(step)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Walk `path` through objects, creating any missing or `null` member as an
/// empty object, and return the object found at the end.
///
/// Existing members keep their position; new ones are appended. The root is
/// never replaced.
///
/// # Errors
///
/// [`JsonPointerError::NotObject`] naming the first location that holds
/// something other than an object or `null`. A non-object root, `null`
/// included, is reported as `""`.
///
/// ```
/// use levelboard_json_pointer::{ensure_object, parse_json_pointer};
/// use serde_json::json;
///
/// let mut doc = json!({"kind": "Dashboard"});
/// let elements = ensure_object(&mut doc, &parse_json_pointer("/spec/elements")).unwrap();
/// elements.insert("panel-1".into(), json!({}));
/// assert_eq!(doc, json!({"kind": "Dashboard", "spec": {"elements": {"panel-1": {}}}}));
///
/// let mut bad = json!({"spec": "oops"});
/// assert!(ensure_object(&mut bad, &parse_json_pointer("/spec/elements")).is_err());
/// ```
pub fn ensure_object<'a>(
    val: &'a mut Value,
    path: &[String],
) -> Result<&'a mut Map<String, Value>, JsonPointerError> {
    let mut current = val;
    for (depth, step) in path.iter().enumerate() {
        let slot = match current {
            Value::Object(map) => map.entry(step.clone()).or_insert(Value::Null),
            _ => {
                return Err(JsonPointerError::NotObject(format_json_pointer(
                    &path[..depth],
                )))
            }
        };
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }
    match current {
        Value::Object(map) => Ok(map),
        _ => Err(JsonPointerError::NotObject(format_json_pointer(path))),
    }
}
