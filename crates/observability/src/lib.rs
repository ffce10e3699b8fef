//! # Observability
//!
//! Log and metric plumbing for the estimator front-end.
//!
//! The estimator crates only *emit* `tracing` events and `metrics` macro
//! calls; nothing reaches the outside world until a subscriber and a
//! recorder are installed. [`Telemetry`] is that switchboard: pick a log
//! format, optionally hang a Prometheus scrape endpoint off it, and
//! `install()` once at startup.
//!
//! ## Example
//!
//! ```ignore
//! use observability::Telemetry;
//!
//! Telemetry::new()
//!     .json()
//!     .prometheus(([0, 0, 0, 0], 9100).into())
//!     .install()?;
//!
//! // after each filter update
//! observability::record_ingest_stats(&engine.stats());
//! ```

pub mod metrics;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-exports
pub use crate::metrics::{
    record_buffer_usage, record_ingest_stats, record_vibration, RunningStats, StatsSummary,
    VibrationAggregator, VibrationSummary,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line output for terminals and flight logs
    #[default]
    Compact,
    /// Multi-line human-readable output for interactive debugging
    Pretty,
    /// Structured JSON lines for log shipping
    Json,
}

/// Telemetry switchboard, built once at startup.
///
/// Without an exporter only the log subscriber is installed; `metrics`
/// macro calls then go to the no-op recorder, which is the right default
/// for flight targets.
#[derive(Debug, Clone)]
pub struct Telemetry {
    format: LogFormat,
    fallback_filter: String,
    exporter: Option<SocketAddr>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            fallback_filter: default_filter().to_string(),
            exporter: None,
        }
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-line human-readable logs.
    pub fn pretty(mut self) -> Self {
        self.format = LogFormat::Pretty;
        self
    }

    /// Structured JSON logs.
    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directives used when `RUST_LOG` is unset.
    pub fn fallback_filter(mut self, directives: impl Into<String>) -> Self {
        self.fallback_filter = directives.into();
        self
    }

    /// Expose a Prometheus scrape endpoint on `addr`.
    pub fn prometheus(mut self, addr: SocketAddr) -> Self {
        self.exporter = Some(addr);
        self
    }

    /// Install the subscriber and, if configured, the metrics recorder.
    ///
    /// Process-wide and once-only; a second call fails rather than
    /// silently re-routing telemetry.
    pub fn install(self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.fallback_filter));
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
            LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_target(true).with_current_span(false))
                .try_init(),
        }
        .context("tracing subscriber already installed")?;

        if let Some(addr) = self.exporter {
            PrometheusBuilder::new()
                .with_http_listener(addr)
                .install()
                .context("prometheus recorder already installed")?;
            tracing::info!(%addr, "prometheus scrape endpoint up");
        }

        tracing::debug!(format = ?self.format, exporter = ?self.exporter, "telemetry installed");
        Ok(())
    }
}

/// Quiet in release builds, chatty under `debug_assertions`.
fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Install the default telemetry: compact logs, no exporter.
pub fn init() -> Result<()> {
    Telemetry::new().install()
}
