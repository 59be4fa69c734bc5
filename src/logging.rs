// logging.rs

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber for the interactive binary.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Setting
/// `REPLHIST_LOG=<file>` sends events to that file instead of stderr, so
/// log lines do not land in the middle of the prompt.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(log_path) = std::env::var_os("REPLHIST_LOG") {
        let log_path = Path::new(&log_path);
        match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(file_layer)
                    .init();
                tracing::debug!("logging to {}", log_path.display());
                return;
            }
            Err(e) => {
                eprintln!("Warning: cannot open log file {}: {}", log_path.display(), e);
            }
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
