//! The panel synchronizer: load → select → iterate destinations →
//! clone + patch → validate → write.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::canonical::CanonicalSet;
use crate::document::{elements_mut, read_document, set_layout, write_document};
use crate::error::{Result, SyncError};
use crate::level_file::{list_level_files, LevelFile};
use crate::level_token::LevelToken;
use crate::options::SyncOptions;
use crate::query::QueryPaths;

/// Progress notifications emitted while a run walks the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    /// The file was patched and written.
    Updated { file: &'a LevelFile, tokens: usize },
    /// The file is the source dashboard and was left alone.
    SkippedSource { file: &'a LevelFile },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub updated: Vec<PathBuf>,
    pub skipped_source: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct Synchronizer {
    dashboards_dir: PathBuf,
    source_path: PathBuf,
    canonical: CanonicalSet,
    paths: QueryPaths,
    token: LevelToken,
}

impl Synchronizer {
    /// Check preconditions, parse the source dashboard and capture the
    /// canonical panels. Nothing is written.
    ///
    /// `source_path` defaults to [`SyncOptions::source_file`] inside
    /// `dashboards_dir`.
    pub fn prepare(
        dashboards_dir: &Path,
        source_path: Option<&Path>,
        options: &SyncOptions,
    ) -> Result<Self> {
        if !dashboards_dir.is_dir() {
            let shown = std::path::absolute(dashboards_dir)
                .unwrap_or_else(|_| dashboards_dir.to_path_buf());
            return Err(SyncError::DashboardsDirNotFound(shown));
        }
        let dashboards_dir =
            fs::canonicalize(dashboards_dir).map_err(|e| SyncError::io(dashboards_dir, e))?;

        let source_path = match source_path {
            Some(path) => path.to_path_buf(),
            None => dashboards_dir.join(&options.source_file),
        };
        if !source_path.exists() {
            let shown =
                std::path::absolute(&source_path).unwrap_or_else(|_| source_path.clone());
            return Err(SyncError::SourceNotFound(shown));
        }
        let source_path =
            fs::canonicalize(&source_path).map_err(|e| SyncError::io(&source_path, e))?;

        let paths = QueryPaths::from_options(options)?;
        let token = LevelToken::new(&options.level_field)?;
        let source = read_document(&source_path)?;
        let canonical = CanonicalSet::resolve(&source, &source_path, options, &paths, &token)?;

        info!(
            source = %source_path.display(),
            panels = canonical.panels().count(),
            layout = canonical.layout().is_some(),
            level_field = token.field(),
            "captured canonical panels"
        );
        debug!(rewrite = ?canonical.rewrite_flags(), "classified panels");

        Ok(Self {
            dashboards_dir,
            source_path,
            canonical,
            paths,
            token,
        })
    }

    pub fn dashboards_dir(&self) -> &Path {
        &self.dashboards_dir
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn canonical(&self) -> &CanonicalSet {
        &self.canonical
    }

    fn is_source(&self, file: &LevelFile) -> bool {
        if file.path == self.source_path {
            return true;
        }
        // the same file reached through a symlink
        fs::canonicalize(&file.path).is_ok_and(|real| real == self.source_path)
    }

    /// Paste fresh copies of the canonical panels (and layout) into `doc` and
    /// point their level tokens at `level_index`.
    ///
    /// `path` only labels errors. Returns the number of tokens rewritten. On
    /// error `doc` may be partially patched and must not be written.
    pub fn patch(&self, doc: &mut Value, level_index: i32, path: &Path) -> Result<usize> {
        let mut rewritten = 0;
        let elements = elements_mut(doc, path)?;
        for (id, panel) in self.canonical.panels() {
            let mut copy = panel.instantiate();
            let scan = self.paths.scan(&copy, &self.token);
            if panel.requires_rewrite {
                if let Some(kind) = scan.failure() {
                    return Err(SyncError::Validation {
                        panel: id.to_string(),
                        path: path.to_path_buf(),
                        kind,
                    });
                }
            }
            let tokens = self.paths.apply(&mut copy, &scan.sites, &self.token, level_index);
            debug!(panel = %id, tokens, level_index, "pasted panel");
            rewritten += tokens;
            elements.insert(id.to_string(), copy);
        }

        if let Some(layout) = self.canonical.instantiate_layout() {
            set_layout(doc, layout, path)?;
        }
        Ok(rewritten)
    }

    /// Read, patch and rewrite a single destination file.
    pub fn sync_file(&self, file: &LevelFile) -> Result<usize> {
        let mut doc = read_document(&file.path)?;
        let tokens = self.patch(&mut doc, file.level_index(), &file.path)?;
        write_document(&file.path, &doc)?;
        Ok(tokens)
    }

    /// Synchronize every level file of the directory, in file name order.
    ///
    /// Stops at the first error. Files written before it stay written; the
    /// failing file and everything after it are untouched.
    pub fn run<F>(&self, mut observer: F) -> Result<SyncReport>
    where
        F: FnMut(SyncEvent<'_>),
    {
        self.try_run(|event| {
            observer(event);
            Ok::<(), SyncError>(())
        })
    }

    /// [`run`](Self::run) with an observer that can stop the walk. An observer
    /// error is returned as is and no later file is touched.
    pub fn try_run<F, E>(&self, mut observer: F) -> std::result::Result<SyncReport, E>
    where
        F: FnMut(SyncEvent<'_>) -> std::result::Result<(), E>,
        E: From<SyncError>,
    {
        let mut report = SyncReport::default();
        for file in list_level_files(&self.dashboards_dir)? {
            if self.is_source(&file) {
                debug!(file = %file.name, "skipping source dashboard");
                observer(SyncEvent::SkippedSource { file: &file })?;
                report.skipped_source.push(file.path.clone());
                continue;
            }
            let tokens = self.sync_file(&file)?;
            info!(
                file = %file.name,
                level_index = file.level_index(),
                tokens,
                "updated dashboard"
            );
            observer(SyncEvent::Updated {
                file: &file,
                tokens,
            })?;
            report.updated.push(file.path.clone());
        }
        Ok(report)
    }
}
