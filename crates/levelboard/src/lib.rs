//! Keeps per-level dashboards in step with a canonical one.
//!
//! A dashboards directory holds one JSON document per game level, named
//! `NN-<name>.json`. One of them (by default `01-arrival.json`) is the source:
//! its panels are copied into every other level file, and the
//! `"level index":"<n>"` token inside each copied panel's parsed query is set
//! to that file's level index (`NN - 1`).
//!
//! # Example
//!
//! ```no_run
//! use levelboard::{SyncEvent, SyncOptions, Synchronizer};
//! use std::path::Path;
//!
//! let sync = Synchronizer::prepare(
//!     Path::new("dashboards/Marathon"),
//!     None,
//!     &SyncOptions::all_panels(),
//! )?;
//! sync.run(|event| {
//!     if let SyncEvent::Updated { file, .. } = event {
//!         println!("Updated {}", file.path.display());
//!     }
//! })?;
//! # Ok::<(), levelboard::SyncError>(())
//! ```

pub mod canonical;
pub mod cli;
pub mod document;
pub mod error;
pub mod level_file;
pub mod level_token;
pub mod options;
pub mod query;
pub mod sync;

pub use canonical::{CanonicalPanel, CanonicalSet};
pub use document::{read_document, render_document, write_document};
pub use error::{Result, SyncError, ValidationKind};
pub use level_file::{level_number, list_level_files, LevelFile};
pub use level_token::LevelToken;
pub use options::{PanelSelection, SyncOptions};
pub use query::{QueryPaths, RewriteSite, SiteScan};
pub use sync::{SyncEvent, SyncReport, Synchronizer};
