//! Run configuration for the synchronizer.
//!
//! Every field has a default, so an empty TOML file (or none at all) gives the
//! fixed `panel-1`/`panel-2` behaviour. The CLI layers its flags on top.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SyncError};

pub const DEFAULT_SOURCE_FILE: &str = "01-arrival.json";
pub const DEFAULT_LEVEL_FIELD: &str = "level index";
pub const DEFAULT_QUERIES_POINTER: &str = "/spec/data/spec/queries";
pub const DEFAULT_PARSED_QUERY_POINTER: &str = "/spec/query/spec/parsedQuery";
pub const DEFAULT_PANELS: [&str; 2] = ["panel-1", "panel-2"];

/// Which source panels form the canonical set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PanelSelection {
    /// Exactly these ids. All must exist in the source and all must carry a
    /// level-index token.
    Fixed {
        #[serde(default = "default_panels")]
        panels: Vec<String>,
    },
    /// Every panel of the source, each classified by whether its queries carry
    /// a level-index token.
    All,
}

impl Default for PanelSelection {
    fn default() -> Self {
        PanelSelection::Fixed {
            panels: default_panels(),
        }
    }
}

fn default_panels() -> Vec<String> {
    DEFAULT_PANELS.iter().map(|id| id.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncOptions {
    pub selection: PanelSelection,
    /// Source dashboard file name inside the dashboards directory, used when
    /// no explicit source path is given.
    pub source_file: String,
    /// Copy `spec.layout` too. `None` follows the selection: on for
    /// [`PanelSelection::All`], off for [`PanelSelection::Fixed`].
    pub sync_layout: Option<bool>,
    /// Field name of the embedded level token, e.g. `level index`.
    pub level_field: String,
    /// Pointer from a panel to its query list.
    pub queries_pointer: String,
    /// Pointer from a query entry to its parsed query string.
    pub parsed_query_pointer: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            selection: PanelSelection::default(),
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            sync_layout: None,
            level_field: DEFAULT_LEVEL_FIELD.to_string(),
            queries_pointer: DEFAULT_QUERIES_POINTER.to_string(),
            parsed_query_pointer: DEFAULT_PARSED_QUERY_POINTER.to_string(),
        }
    }
}

impl SyncOptions {
    /// Options for the general variant: all panels plus the layout.
    pub fn all_panels() -> Self {
        Self {
            selection: PanelSelection::All,
            ..Self::default()
        }
    }

    pub fn layout_enabled(&self) -> bool {
        self.sync_layout
            .unwrap_or(matches!(self.selection, PanelSelection::All))
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Self::from_toml_str(&text).map_err(|source| SyncError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
