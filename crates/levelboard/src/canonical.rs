//! The canonical panels (and layout) captured once from the source dashboard.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::level_token::LevelToken;
use crate::options::{PanelSelection, SyncOptions};
use crate::query::QueryPaths;

const ELEMENTS: [&str; 2] = ["spec", "elements"];
const LAYOUT: [&str; 2] = ["spec", "layout"];

fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(doc, |current, step| current.as_object()?.get(*step))
        .filter(|value| !value.is_null())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPanel {
    template: Value,
    /// Copies of this panel must end up with at least one level token.
    pub requires_rewrite: bool,
}

impl CanonicalPanel {
    pub fn template(&self) -> &Value {
        &self.template
    }

    /// A fresh deep copy of the template, sharing nothing with it.
    pub fn instantiate(&self) -> Value {
        self.template.clone()
    }
}

/// Panel id → canonical panel, in propagation order, plus the optional
/// layout. Read-only once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSet {
    panels: IndexMap<String, CanonicalPanel>,
    layout: Option<Value>,
}

impl CanonicalSet {
    /// Select and classify panels from the parsed source dashboard.
    ///
    /// # Errors
    ///
    /// - [`SyncError::MissingPanels`] when fixed ids are absent (or `null`);
    /// - [`SyncError::NoPanels`] when selecting all panels of an empty source;
    /// - [`SyncError::MissingLayout`] when layout syncing is on and the source
    ///   has no `spec.layout`.
    pub fn resolve(
        source: &Value,
        source_path: &Path,
        options: &SyncOptions,
        paths: &QueryPaths,
        token: &LevelToken,
    ) -> Result<Self> {
        let elements = lookup(source, &ELEMENTS).and_then(Value::as_object);
        let mut panels = IndexMap::new();

        match &options.selection {
            PanelSelection::Fixed { panels: ids } => {
                if ids.is_empty() {
                    return Err(SyncError::NoPanels(source_path.to_path_buf()));
                }
                let mut missing = Vec::new();
                for id in ids {
                    let found = elements
                        .and_then(|map| map.get(id.as_str()))
                        .filter(|panel| !panel.is_null());
                    match found {
                        Some(template) => {
                            let panel = CanonicalPanel {
                                template: template.clone(),
                                requires_rewrite: true,
                            };
                            panels.insert(id.clone(), panel);
                        }
                        None => missing.push(id.clone()),
                    }
                }
                if !missing.is_empty() {
                    return Err(SyncError::MissingPanels {
                        path: source_path.to_path_buf(),
                        panels: missing,
                    });
                }
            }
            PanelSelection::All => {
                let Some(elements) = elements.filter(|map| !map.is_empty()) else {
                    return Err(SyncError::NoPanels(source_path.to_path_buf()));
                };
                for (id, template) in elements {
                    let requires_rewrite = !paths.scan(template, token).is_empty();
                    let panel = CanonicalPanel {
                        template: template.clone(),
                        requires_rewrite,
                    };
                    panels.insert(id.clone(), panel);
                }
            }
        }

        for (id, panel) in &panels {
            debug!(panel = %id, requires_rewrite = panel.requires_rewrite, "canonical panel");
        }

        let layout = if options.layout_enabled() {
            let layout = lookup(source, &LAYOUT)
                .ok_or_else(|| SyncError::MissingLayout(source_path.to_path_buf()))?;
            Some(layout.clone())
        } else {
            None
        };

        Ok(Self { panels, layout })
    }

    pub fn panels(&self) -> impl Iterator<Item = (&str, &CanonicalPanel)> {
        self.panels.iter().map(|(id, panel)| (id.as_str(), panel))
    }

    /// Panel id → whether its copies need a level-index rewrite.
    pub fn rewrite_flags(&self) -> IndexMap<&str, bool> {
        self.panels()
            .map(|(id, panel)| (id, panel.requires_rewrite))
            .collect()
    }

    pub fn layout(&self) -> Option<&Value> {
        self.layout.as_ref()
    }

    /// A fresh deep copy of the layout, if one is synced.
    pub fn instantiate_layout(&self) -> Option<Value> {
        self.layout.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(source: &Value, options: &SyncOptions) -> Result<CanonicalSet> {
        let paths = QueryPaths::from_options(options).unwrap();
        let token = LevelToken::new(&options.level_field).unwrap();
        CanonicalSet::resolve(source, Path::new("01-arrival.json"), options, &paths, &token)
    }

    fn leveled(index: &str) -> Value {
        json!({"spec": {"data": {"spec": {"queries": [
            {"spec": {"query": {"spec": {"parsedQuery": format!("\"level index\":\"{index}\"")}}}}
        ]}}}})
    }

    fn source() -> Value {
        json!({"spec": {
            "elements": {
                "panel-1": leveled("0"),
                "panel-2": leveled("0"),
                "title": {"kind": "Markdown", "spec": {"text": "Arrival"}}
            },
            "layout": [{"x": 0, "content": {"$ref": "#/spec/elements/panel-1"}}]
        }})
    }

    #[test]
    fn fixed_pair_selection() {
        let set = resolve(&source(), &SyncOptions::default()).unwrap();
        let flags: Vec<(&str, bool)> = set.rewrite_flags().into_iter().collect();
        assert_eq!(flags, [("panel-1", true), ("panel-2", true)]);
        assert!(set.layout().is_none());
    }

    #[test]
    fn fixed_selection_reports_every_missing_id() {
        let mut doc = source();
        doc["spec"]["elements"]["panel-2"] = Value::Null;
        let options = SyncOptions {
            selection: PanelSelection::Fixed {
                panels: vec!["panel-1".into(), "panel-2".into(), "panel-9".into()],
            },
            ..SyncOptions::default()
        };
        match resolve(&doc, &options) {
            Err(SyncError::MissingPanels { panels, .. }) => {
                assert_eq!(panels, ["panel-2", "panel-9"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fixed_selection_without_elements() {
        let err = resolve(&json!({"kind": "Dashboard"}), &SyncOptions::default()).unwrap_err();
        assert!(matches!(err, SyncError::MissingPanels { .. }));
    }

    #[test]
    fn all_selection_classifies() {
        let set = resolve(&source(), &SyncOptions::all_panels()).unwrap();
        let flags: Vec<(&str, bool)> = set.rewrite_flags().into_iter().collect();
        assert_eq!(flags, [("panel-1", true), ("panel-2", true), ("title", false)]);
        assert_eq!(set.layout(), Some(&source()["spec"]["layout"]));
    }

    #[test]
    fn all_selection_requires_panels() {
        let doc = json!({"spec": {"elements": {}, "layout": []}});
        let err = resolve(&doc, &SyncOptions::all_panels()).unwrap_err();
        assert!(matches!(err, SyncError::NoPanels(_)));
    }

    #[test]
    fn all_selection_requires_layout() {
        let mut doc = source();
        doc["spec"].as_object_mut().unwrap().remove("layout");
        let err = resolve(&doc, &SyncOptions::all_panels()).unwrap_err();
        assert!(matches!(err, SyncError::MissingLayout(_)));
    }

    #[test]
    fn instances_are_independent() {
        let set = resolve(&source(), &SyncOptions::default()).unwrap();
        let (_, panel) = set.panels().find(|(id, _)| *id == "panel-1").unwrap();
        let mut first = panel.instantiate();
        let second = panel.instantiate();
        first["spec"]["data"]["spec"]["queries"][0]["spec"]["query"]["spec"]["parsedQuery"] =
            json!("changed");
        assert_eq!(&second, panel.template());
        assert_ne!(&first, panel.template());
    }
}
