//! Telemetry lifecycle management.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Initialize structured logging and optional OpenTelemetry export.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        let tracer_provider = if config.observability.otel_enabled {
            global::set_text_map_propagator(TraceContextPropagator::new());

            Some(otel::build_tracer_provider(config)?)
        } else {
            None
        };

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            service = %config.observability.otel_service_name,
            log_format = ?config.logging.log_format,
            otel = config.observability.otel_enabled,
            endpoint = config
                .observability
                .otel_enabled
                .then_some(config.observability.otel_exporter_otlp_endpoint.as_str()),
            "observability ready"
        );

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans. Called last, after the server and the change
    /// listener have stopped.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        match provider.shutdown() {
            Ok(()) => info!("trace export flushed"),
            Err(source) => error!("failed to flush trace export: {source}"),
        }
    }
}
