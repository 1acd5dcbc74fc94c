// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use pixelcrush_node::config::NodeConfig;
use pixelcrush_node::server::{build_router, ConcreteEngine, SharedEngine, HEIGHT, WIDTH};
use pixelcrush_node::telemetry::init_telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    init_telemetry();

    let cfg = match NodeConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    tracing::info!("Initializing pixelcrush node with config: {:?}", cfg);

    let engine = match ConcreteEngine::open(&cfg) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(
                "Failed to load snapshot {:?}: {}. Create one with `pixelcrush init {}`.",
                cfg.snapshot_path,
                e,
                cfg.snapshot_path.display()
            );
            std::process::exit(1);
        }
    };

    if cfg.warm_cache {
        if let Err(e) = engine.place_png() {
            tracing::error!("Initial render failed: {}", e);
            std::process::exit(1);
        }
    }
    tracing::info!("Initialized.");

    let shared_state: SharedEngine<WIDTH, HEIGHT> = Arc::new(engine);
    let app = build_router(shared_state, cfg.homepage.clone());

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
