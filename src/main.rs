// image-extractor - Ask Gemini about an uploaded image
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use image_extractor::cli::Args;
use image_extractor::config::AppConfig;
use image_extractor::gemini::GeminiClient;
use image_extractor::server::create_router;
use image_extractor::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load .env (GOOGLE_API_KEY) and configuration
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting image-extractor v{}", env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    // Phase 3: Build the inference client (credential checked on first use)
    let gemini_client = GeminiClient::new(&config.gemini)?;
    if !gemini_client.has_credential() {
        warn!("GOOGLE_API_KEY is not set; submissions will fail to authenticate");
    }
    info!("Using model {} at {}", config.gemini.model, gemini_client.base_url());

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, Arc::new(gemini_client))?;

    info!("Serving UI on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
