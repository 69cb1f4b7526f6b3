// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Foreground HTTP server

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use codementor_core::application::{build_registry, StandardClassroomService};
use codementor_core::domain::identity::IdentityId;
use codementor_core::domain::server_config::ServerConfig;
use codementor_core::infrastructure::OllamaAnalysisGateway;
use codementor_core::presentation::api;

pub async fn run(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config =
        ServerConfig::load_or_default(config_path).context("Failed to load configuration")?;

    if let Some(host) = host {
        config.spec.server.host = host;
    }
    if let Some(port) = port {
        config.spec.server.port = port;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    let registry = build_registry(&config.spec.seed).context("Failed to seed registry")?;
    let analyzer = OllamaAnalysisGateway::from_config(&config.spec.analysis)
        .context("Failed to initialize analysis gateway")?;

    info!(
        "Analysis gateway: {} (model {}, timeout {}s)",
        config.spec.analysis.endpoint, config.spec.analysis.model, config.spec.analysis.timeout_secs
    );

    let service = Arc::new(StandardClassroomService::new(
        Arc::new(RwLock::new(registry)),
        Arc::new(analyzer),
        config.spec.routing.fallback_instructor.map(IdentityId),
    ));

    let app = api::app(service, config.spec.server.static_dir.clone());

    let addr = format!("{}:{}", config.spec.server.host, config.spec.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("CodeMentor listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("CodeMentor shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
