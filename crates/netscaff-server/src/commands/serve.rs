//! Implementation of the `netscaff serve` command.

use tracing::{info, instrument};

use crate::{
    cli::ServeArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    http::{AppState, router},
    output::OutputManager,
};

/// Apply flag overrides and run the HTTP server until Ctrl-C.
#[instrument(skip_all)]
pub fn execute(args: ServeArgs, mut config: AppConfig, output: OutputManager) -> CliResult<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.dev_endpoints {
        config.server.dev_endpoints = true;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| server_error("failed to start the async runtime", e))?;

    runtime.block_on(serve(config, args.offline, output))
}

async fn serve(config: AppConfig, offline: bool, output: OutputManager) -> CliResult<()> {
    let addr = config.bind_address();
    let dev_endpoints = config.server.dev_endpoints;
    let state = AppState::new(config, offline);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| server_error(&format!("cannot bind {addr}"), e))?;

    info!(%addr, dev_endpoints, offline, "Server listening");
    output.success(&format!("Listening on http://{addr}"))?;
    if dev_endpoints {
        output.warning("Development routes under /api/dev are enabled")?;
    }
    if offline {
        output.info("Offline: SDK commands are simulated")?;
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| server_error("server stopped", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

fn server_error(message: &str, source: std::io::Error) -> CliError {
    CliError::Server {
        message: format!("{message}: {source}"),
        source: Some(Box::new(source)),
    }
}
