//! Whole-file JSON reads and writes for dashboard documents.
//!
//! Output is 2-space pretty JSON plus a trailing newline. Object members keep
//! the order they were read in (`serde_json` with `preserve_order`), so
//! untouched parts of a document serialize back unchanged. Floats are printed
//! in `serde_json`'s shortest form (`1e3` becomes `1000.0`) and stay that way on
//! later runs.

use std::fs;
use std::path::Path;

use levelboard_json_pointer::ensure_object;
use serde_json::{Map, Value};

use crate::error::{Result, SyncError};

fn spec_path() -> Vec<String> {
    vec!["spec".to_string()]
}

fn elements_path() -> Vec<String> {
    vec!["spec".to_string(), "elements".to_string()]
}

pub fn read_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| SyncError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-printed text of `doc`, newline-terminated.
pub fn render_document(doc: &Value) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(doc)?;
    text.push('\n');
    Ok(text)
}

/// Replace the contents of `path` with the rendered document.
pub fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let text = render_document(doc).map_err(|e| SyncError::io(path, e.into()))?;
    fs::write(path, text).map_err(|e| SyncError::io(path, e))
}

/// `spec.elements` of `doc`, created as empty objects where missing or `null`.
pub fn elements_mut<'a>(doc: &'a mut Value, path: &Path) -> Result<&'a mut Map<String, Value>> {
    ensure_object(doc, &elements_path()).map_err(|source| SyncError::Structure {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `spec.layout`, creating `spec` if needed.
pub fn set_layout(doc: &mut Value, layout: Value, path: &Path) -> Result<()> {
    let spec = ensure_object(doc, &spec_path()).map_err(|source| SyncError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    spec.insert("layout".to_string(), layout);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_is_two_space_with_newline() {
        let doc = json!({"kind": "Dashboard", "spec": {"elements": {}, "layout": [1]}});
        assert_eq!(
            render_document(&doc).unwrap(),
            "{\n  \"kind\": \"Dashboard\",\n  \"spec\": {\n    \"elements\": {},\n    \"layout\": [\n      1\n    ]\n  }\n}\n"
        );
    }

    #[test]
    fn render_keeps_key_order() {
        let text = "{\n  \"z\": 1,\n  \"a\": {\n    \"y\": true,\n    \"b\": null\n  }\n}\n";
        let doc: Value = serde_json::from_str(text).unwrap();
        assert_eq!(render_document(&doc).unwrap(), text);
    }

    #[test]
    fn elements_created_when_missing() {
        let mut doc = json!({"kind": "Dashboard"});
        elements_mut(&mut doc, Path::new("03-foo.json"))
            .unwrap()
            .insert("panel-1".into(), json!({}));
        assert_eq!(doc, json!({"kind": "Dashboard", "spec": {"elements": {"panel-1": {}}}}));
    }

    #[test]
    fn elements_on_non_object_spec() {
        let mut doc = json!({"spec": "broken"});
        let err = elements_mut(&mut doc, Path::new("03-foo.json")).unwrap_err();
        assert!(matches!(err, SyncError::Structure { .. }));
        assert!(err.to_string().starts_with("03-foo.json cannot hold panels"));
    }

    #[test]
    fn null_document_cannot_hold_panels() {
        let mut doc = Value::Null;
        let err = elements_mut(&mut doc, Path::new("03-foo.json")).unwrap_err();
        assert!(matches!(err, SyncError::Structure { .. }));
        assert!(set_layout(&mut doc, json!([]), Path::new("03-foo.json")).is_err());
        assert_eq!(doc, Value::Null);
    }

    #[test]
    fn number_text_settles_after_one_write() {
        let doc: Value = serde_json::from_str(r#"{"w": 1.0, "big": 1e3, "n": 7}"#).unwrap();
        let first = render_document(&doc).unwrap();
        assert_eq!(first, "{\n  \"w\": 1.0,\n  \"big\": 1000.0,\n  \"n\": 7\n}\n");
        let reread: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(render_document(&reread).unwrap(), first);
    }

    #[test]
    fn layout_replaced_in_place() {
        let mut doc = json!({"spec": {"layout": {"old": true}, "elements": {}}});
        set_layout(&mut doc, json!([{"x": 1}]), Path::new("03-foo.json")).unwrap();
        let keys: Vec<&String> = doc["spec"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["layout", "elements"]);
        assert_eq!(doc["spec"]["layout"], json!([{"x": 1}]));
    }
}
