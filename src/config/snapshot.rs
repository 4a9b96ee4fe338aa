//! Atomically swapped endpoint configuration.
//!
//! # Design Decisions
//! - Single writer (activation / reload), many readers (request handlers)
//! - Readers take one `Arc` snapshot per request and never see a
//!   partially-updated record
//! - No locks on the read path

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::EndpointConfig;

/// Shared, hot-swappable endpoint configuration.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<ArcSwap<EndpointConfig>>,
}

impl ConfigHandle {
    pub fn new(config: EndpointConfig) -> Self {
        let handle = Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        };
        handle.log_activation();
        handle
    }

    /// Current configuration snapshot.
    pub fn load(&self) -> Arc<EndpointConfig> {
        self.inner.load_full()
    }

    /// Replace the configuration wholesale.
    pub fn activate(&self, config: EndpointConfig) {
        self.inner.store(Arc::new(config));
        self.log_activation();
    }

    fn log_activation(&self) {
        let config = self.inner.load();
        tracing::info!(path = %config.servlet_path, "Endpoint activated");
        if config.debug_logging {
            tracing::debug!(
                max_response_size = config.max_response_size,
                "Debug logging enabled"
            );
        }
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(EndpointConfig::default())
    }
}
