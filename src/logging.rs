use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ToastConfig;

/// Overrides [`ToastConfig::log_filter`] when set.
pub const LOG_ENV: &str = "TOAST_LOG";

static INIT: Once = Once::new();

/// Filter directive for the stderr subscriber, if one was asked for.
fn requested_filter(env: Option<String>, config: &ToastConfig) -> Option<String> {
    env.filter(|directive| !directive.trim().is_empty())
        .or_else(|| config.log_filter.clone())
}

/// Installs a stderr subscriber once per process, but only when `TOAST_LOG` or
/// [`ToastConfig::log_filter`] asks for one. Otherwise events go through the
/// `tracing` facade to whatever the embedding process has installed.
pub fn init(config: &ToastConfig) {
    let Some(directive) = requested_filter(std::env::var(LOG_ENV).ok(), config) else {
        return;
    };

    INIT.call_once(|| {
        let installed = tracing_subscriber::registry()
            .with(EnvFilter::new(&directive))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!("toastlib logging initialized with '{}'", directive);
        }
    });
}
