//! User registration service - Entry point.

use auth_register::{
    api::{create_router, AppState},
    config::{Config, LogConfig},
    registration::UpsertController,
};
use identity_provider::{CognitoIdentityProvider, IdentityProvider, InMemoryIdentityProvider};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log);

    info!("Starting registration service");

    // Refuse to serve with a blank pool or client identifier
    if let Err(e) = config.cognito.ensure_ready() {
        error!("{}", e);
        std::process::exit(1);
    }

    let provider: Arc<dyn IdentityProvider> = if config.cognito.in_memory {
        warn!("Using in-memory identity provider, users are lost on restart");
        Arc::new(InMemoryIdentityProvider::new())
    } else {
        info!(
            user_pool_id = %config.cognito.user_pool_id,
            region = ?config.cognito.region,
            "Using Cognito identity provider"
        );
        Arc::new(
            CognitoIdentityProvider::from_env(
                config.cognito.region.as_deref(),
                config.cognito.endpoint_url.as_deref(),
            )
            .await,
        )
    };

    let controller = UpsertController::new(provider, config.cognito.clone());
    let app = create_router(AppState::new(controller));

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry().with(filter);

    if log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
