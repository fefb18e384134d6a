//! CuantoVale JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use cuantovale_app::context::AppContext;

use crate::{
    config::ServerConfig,
    observability::{Observability, request_logging},
    state::State,
};

mod auth;
mod config;
mod extensions;
mod forms;
mod healthcheck;
mod live;
mod menu;
mod observability;
mod prices;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// CuantoVale JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "tracing subscriber failed to start, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let format = match config.display.date_format() {
        Ok(format) => format,
        Err(format_error) => {
            error!("invalid display settings: {format_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let shutdown_token = CancellationToken::new();

    let (app, change_listener) = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.database_max_connections,
        shutdown_token.clone(),
    )
    .await
    {
            Ok(app) => app,
            Err(init_error) => {
                error!("failed to initialize app context: {init_error}");

                process::exit(1);
            }
        };

    let state = State::new(app, format)
        .with_keep_alive(config.server.live_keep_alive())
        .with_shutdown(shutdown_token.clone())
        .into_shared();

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(state))
        .push(router::app_router());

    let doc = OpenApi::new("CuantoVale API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, shutdown_token).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    if let Err(join_error) = change_listener.await {
        error!("change listener task failed: {join_error}");
    }

    info!("Server stopped");

    observability.shutdown();
}
