use std::{env, path::PathBuf, sync::Once};

use dinario_config::AppConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Overrides the whole application directory when set.
pub const HOME_ENV_VAR: &str = "DINARIO_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. A non-empty `RUST_LOG` wins;
/// otherwise `directive` (normally `dinario=info`) applies.
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = log_filter(rust_log.as_deref(), directive);
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

fn log_filter(rust_log: Option<&str>, directive: &str) -> EnvFilter {
    if let Some(rust_log) = rust_log.filter(|value| !value.trim().is_empty()) {
        match EnvFilter::try_new(rust_log) {
            Ok(filter) => return filter,
            Err(err) => eprintln!("ignoring {}=`{rust_log}`: {err}", EnvFilter::DEFAULT_ENV),
        }
    }
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("ignoring log filter `{directive}`: {err}");
        EnvFilter::default()
    })
}

/// Root directory for preferences and data: `DINARIO_HOME`, else the platform data dir.
pub fn app_data_dir() -> PathBuf {
    home_override().unwrap_or_else(AppConfig::default_app_dir)
}

/// Directory for finance documents: the configured `data_dir`, else `data` under [`app_data_dir`].
pub fn resolve_data_dir(config: &AppConfig) -> PathBuf {
    match home_override() {
        Some(home) if config.data_dir.is_none() => home.join("data"),
        _ => config.resolve_data_dir(),
    }
}

fn home_override() -> Option<PathBuf> {
    env::var_os(HOME_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
