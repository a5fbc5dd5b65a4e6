use std::path::PathBuf;

use levelboard_json_pointer::JsonPointerError;
use thiserror::Error;

// Messages leave out their `source`; print the chain (`{:#}` with anyhow) to
// see it.

/// Why a copied panel failed validation in a destination file.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// No query entry of the panel holds a `parsedQuery` string.
    #[error("unable to find parsedQuery")]
    MissingParsedQuery,
    /// `parsedQuery` strings exist but none carries the level-index token.
    #[error("parsedQuery missing level index token")]
    MissingLevelToken,
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Dashboards directory not found: {}", .0.display())]
    DashboardsDirNotFound(PathBuf),

    #[error("Source dashboard not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{} is missing {} in spec.elements", .path.display(), .panels.join(", "))]
    MissingPanels { path: PathBuf, panels: Vec<String> },

    #[error("{} has no panels in spec.elements", .0.display())]
    NoPanels(PathBuf),

    #[error("{} is missing spec.layout", .0.display())]
    MissingLayout(PathBuf),

    #[error("Failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} cannot hold panels", .path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: JsonPointerError,
    },

    #[error("{kind} for {panel} in {}", .path.display())]
    Validation {
        panel: String,
        path: PathBuf,
        kind: ValidationKind,
    },

    #[error("Invalid {name} pointer")]
    InvalidPointer {
        name: &'static str,
        #[source]
        source: JsonPointerError,
    },

    #[error("Invalid config {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid level field {0:?}")]
    InvalidLevelField(String),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
