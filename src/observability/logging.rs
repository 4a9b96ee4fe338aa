//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins when set; otherwise the configured level applies
//! - `endpoint.debug_logging` raises this crate to debug without touching
//!   dependencies
//! - The config-derived filter sits behind a reload handle, so level and
//!   `debug_logging` changes apply on hot reload

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::ServiceConfig;

/// Filter directives derived from config.
pub fn filter_directives(config: &ServiceConfig) -> String {
    let level = config.observability.log_level.to_ascii_lowercase();
    let crate_level = if config.endpoint.debug_logging {
        "debug"
    } else {
        level.as_str()
    };
    format!("{},secure_echo={},tower_http={}", level, crate_level, level)
}

/// Swaps the active log filter when a new config is activated.
#[derive(Clone, Default)]
pub struct LogFilterHandle {
    inner: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogFilterHandle {
    /// Rebuild the filter from `config`. No-op when `RUST_LOG` pinned it.
    pub fn apply(&self, config: &ServiceConfig) {
        let Some(handle) = &self.inner else {
            return;
        };
        let directives = filter_directives(config);
        match handle.reload(EnvFilter::new(&directives)) {
            Ok(()) => tracing::info!(filter = %directives, "Log filter updated"),
            Err(e) => tracing::warn!(error = %e, "Failed to update log filter"),
        }
    }
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &ServiceConfig) -> LogFilterHandle {
    // A subscriber may already be set (tests, embedding); keep the first one.
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
        return LogFilterHandle::default();
    }

    let (filter, handle) = reload::Layer::new(EnvFilter::new(filter_directives(config)));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    LogFilterHandle {
        inner: Some(handle),
    }
}
