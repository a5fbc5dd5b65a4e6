#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

pub const QUERY_PATH: &str = "/spec/data/spec/queries/0/spec/query/spec/parsedQuery";

pub fn panel(parsed_query: &str) -> Value {
    json!({
        "kind": "Panel",
        "spec": {
            "display": {"name": "Arrivals"},
            "data": {"kind": "QueryData", "spec": {"queries": [
                {"kind": "Query", "spec": {"query": {"kind": "Filter", "spec": {
                    "parsedQuery": parsed_query
                }}}}
            ]}}
        }
    })
}

pub fn arrival() -> Value {
    json!({
        "kind": "Dashboard",
        "metadata": {"name": "arrival"},
        "spec": {
            "elements": {
                "panel-1": panel(r#""scenario name":"X","level index":"0""#),
                "panel-2": panel(r#""level index":"0","deaths":"$gt:0""#),
                "title": {"kind": "Markdown", "spec": {"text": "# Arrival"}}
            },
            "layout": [
                {"x": 0, "y": 0, "w": 6, "content": {"$ref": "#/spec/elements/panel-1"}},
                {"x": 6, "y": 0, "w": 6, "content": {"$ref": "#/spec/elements/panel-2"}}
            ]
        }
    })
}

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(source: &Value) -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.write_json("01-arrival.json", source);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, text: &str) {
        fs::write(self.file(name), text).unwrap();
    }

    pub fn write_json(&self, name: &str, doc: &Value) {
        self.write(name, &format!("{}\n", serde_json::to_string_pretty(doc).unwrap()));
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).unwrap()
    }

    pub fn read_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.read(name)).unwrap()
    }

    pub fn parsed_query(&self, name: &str, panel: &str) -> String {
        let doc = self.read_json(name);
        let pointer = format!("/spec/elements/{panel}{QUERY_PATH}");
        doc.pointer(&pointer)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("{name}: no parsedQuery at {pointer}"))
            .to_string()
    }
}
