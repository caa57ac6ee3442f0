//! edit-history entrypoint: replay an editing script through the plugin.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::load_from;
use core_plugin::EditHistoryPlugin;
use core_plugin::memory::DEFAULT_VIEWPORT_ROWS;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod replay;
mod script;

use replay::Replayer;

const LOG_FILE_NAME: &str = "edit-history.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "edit-history",
    version,
    about = "Replay an editing script through the edit history plugin"
)]
struct Args {
    /// Script of editing steps to replay.
    pub script: PathBuf,
    /// Optional configuration file path (overrides discovery of `edit-history.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Visible rows per document viewport.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_ROWS)]
    pub rows: usize,
    /// Directory receiving `edit-history.log`.
    #[arg(long = "log-dir", default_value = ".")]
    pub log_dir: PathBuf,
}

fn configure_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_dir);
    install_panic_hook();
    info!(target: "runtime", script = %args.script.display(), "startup");

    let config = load_from(args.config.clone())?;
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let steps = script::parse(&source)?;

    let base_dir = args
        .script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let plugin = EditHistoryPlugin::from_config(&config);
    let mut replayer = Replayer::new(plugin, args.rows, base_dir);
    let report = replayer.run(&steps)?;

    let mut out = io::stdout().lock();
    for line in &report {
        writeln!(out, "{line}")?;
    }
    info!(
        target: "runtime",
        steps = steps.len(),
        documents = replayer.host().len(),
        histories = replayer.plugin().histories().len(),
        "shutdown"
    );
    Ok(())
}
