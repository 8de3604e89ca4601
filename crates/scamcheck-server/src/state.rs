//! Application state shared across all requests

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use scamcheck_classifiers::MessageAnalyzer;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Analysis orchestrator (remote-first when a credential is configured)
    pub analyzer: Arc<MessageAnalyzer>,

    /// Per-caller request limiter
    pub rate_limiter: Arc<RateLimiter>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state from configuration and the process
    /// environment
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        let analyzer = MessageAnalyzer::from_env()?;
        Self::with_analyzer(config, metrics_handle, analyzer)
    }

    /// Initialize application state with an explicit analyzer
    pub fn with_analyzer(
        config: ServerConfig,
        metrics_handle: PrometheusHandle,
        analyzer: MessageAnalyzer,
    ) -> Result<Self> {
        let rate_limiter = RateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_secs),
        );

        Ok(Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            rate_limiter: Arc::new(rate_limiter),
            metrics_handle,
        })
    }
}
