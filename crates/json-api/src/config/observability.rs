//! Observability & Logging Config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level or filter directives, e.g. `info` or `cuantovale_app=debug`
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Requests slower than this are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

/// OpenTelemetry trace export settings. Export is off unless enabled.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export traces over OTLP
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces from an incoming `traceparent` header
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC endpoint
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP export timeout in seconds
    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3u64)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// Service name reported with every span
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "cuantovale-json")]
    pub otel_service_name: String,

    /// Service version reported with every span
    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    /// Deployment environment reported with every span
    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_deployment_environment: String,

    /// Fraction of root traces sampled
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,
}

impl ObservabilityConfig {
    /// Sampling ratio within `0.0..=1.0`; anything unreadable samples everything.
    #[must_use]
    pub fn trace_sample_ratio(&self) -> f64 {
        if self.otel_trace_sample_ratio.is_nan() {
            return 1.0;
        }

        self.otel_trace_sample_ratio.clamp(0.0, 1.0)
    }

    /// Incoming trace context only matters when spans are exported.
    #[must_use]
    pub fn parent_propagation(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        logging: LoggingConfig,

        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    #[test]
    fn sample_ratio_is_clamped() -> TestResult {
        let high = Harness::try_parse_from(["test", "--otel-trace-sample-ratio", "4"])?;
        let low = Harness::try_parse_from(["test", "--otel-trace-sample-ratio=-1"])?;
        let half = Harness::try_parse_from(["test", "--otel-trace-sample-ratio", "0.5"])?;

        assert!((high.observability.trace_sample_ratio() - 1.0).abs() < f64::EPSILON, "capped at 1");
        assert!(low.observability.trace_sample_ratio().abs() < f64::EPSILON, "floored at 0");
        assert!((half.observability.trace_sample_ratio() - 0.5).abs() < f64::EPSILON, "kept");

        Ok(())
    }

    #[test]
    fn propagation_needs_export() -> TestResult {
        let propagation_only =
            Harness::try_parse_from(["test", "--otel-parent-propagation-enabled"])?;
        let both = Harness::try_parse_from([
            "test",
            "--otel-enabled",
            "--otel-parent-propagation-enabled",
        ])?;

        assert!(
            !propagation_only.observability.parent_propagation(),
            "nothing to continue without export"
        );
        assert!(both.observability.parent_propagation(), "enabled together");

        Ok(())
    }

    #[test]
    fn json_logs_can_be_selected() -> TestResult {
        let harness = Harness::try_parse_from(["test", "--log-format", "json"])?;

        assert_eq!(harness.logging.log_format, LogFormat::Json);
        assert_eq!(harness.logging.slow_request_threshold_ms, 1_000);

        Ok(())
    }
}
