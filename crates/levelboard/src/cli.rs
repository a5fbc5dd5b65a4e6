//! `sync-panels` command line: argument parsing, option layering, logging
//! setup and the run itself. The binary is a thin wrapper around [`main`].

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::options::{PanelSelection, SyncOptions};
use crate::sync::{SyncEvent, Synchronizer};

/// Copy the canonical panels of a source dashboard into every per-level
/// dashboard (`NN-*.json`) of a directory, pointing each copy's level index at
/// the destination's level.
#[derive(Debug, Parser)]
#[command(name = "sync-panels", version)]
pub struct Cli {
    /// Directory holding the per-level dashboard files
    pub dashboards_dir: PathBuf,

    /// Source dashboard [default: <DASHBOARDS_DIR>/01-arrival.json]
    pub source_dashboard: Option<PathBuf>,

    /// Propagate every panel of the source, plus its layout
    #[arg(long, conflicts_with = "panels")]
    pub all_panels: bool,

    /// Panel id to propagate (repeatable) [default: panel-1 panel-2]
    #[arg(long = "panel", value_name = "ID")]
    pub panels: Vec<String>,

    /// Also copy spec.layout
    #[arg(long, overrides_with = "no_layout")]
    pub layout: bool,

    /// Never copy spec.layout
    #[arg(long, overrides_with = "layout")]
    pub no_layout: bool,

    /// TOML file with synchronizer settings; flags take precedence
    #[arg(long, value_name = "FILE", env = "SYNC_PANELS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Config file (if any) with the command line flags applied on top.
    pub fn options(&self) -> anyhow::Result<SyncOptions> {
        let mut options = match &self.config {
            Some(path) => SyncOptions::from_toml_file(path)?,
            None => SyncOptions::default(),
        };
        if self.all_panels {
            options.selection = PanelSelection::All;
        } else if !self.panels.is_empty() {
            options.selection = PanelSelection::Fixed {
                panels: self.panels.clone(),
            };
        }
        if self.layout {
            options.sync_layout = Some(true);
        } else if self.no_layout {
            options.sync_layout = Some(false);
        }
        Ok(options)
    }
}

pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("levelboard={level}")));
    // a second init (tests driving `run` twice) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute a parsed command line. Confirmation lines go to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let options = cli.options()?;
    let sync = Synchronizer::prepare(
        &cli.dashboards_dir,
        cli.source_dashboard.as_deref(),
        &options,
    )?;
    let report = sync.try_run(|event| -> anyhow::Result<()> {
        if let SyncEvent::Updated { file, .. } = event {
            writeln!(out, "Updated {}", file.path.display())
                .context("writing confirmation output")?;
        }
        Ok(())
    })?;
    tracing::debug!(updated = report.updated.len(), "run finished");
    Ok(())
}

/// Process entry point: usage errors and failures exit with status 1.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_tracing(&cli.log_level);

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
