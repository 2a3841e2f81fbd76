use chrono::{NaiveDate, Utc};
use enumber_core::error::EnumberError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Daily build log name, e.g. `additives_build_20240131.log`.
pub fn log_file_name(day: NaiveDate) -> String {
    format!("additives_build_{}.log", day.format("%Y%m%d"))
}

/// Run `f` with a subscriber scoped to this call.
///
/// Events go to stderr, and also to a dated file in `log_dir` when one is
/// given. The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn with_run_logging<T>(
    log_dir: Option<&Path>,
    f: impl FnOnce() -> T,
) -> Result<T, EnumberError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(log_file_name(Utc::now().date_naive())))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer);

    Ok(tracing::subscriber::with_default(subscriber, f))
}
