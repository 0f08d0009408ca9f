//! # HTTP Server
//!
//! Main HTTP server combining the roster, auth, and portal routers.
//!
//! This is the unified entry point for the campusd API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

use super::response::MessageResponse;
use super::state::AppState;
use super::{auth_routes, profile_routes, student_routes};

/// HTTP server for the campusd API
pub struct HttpServer {
    config: AppConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with a fresh state from the configuration
    pub fn new(config: AppConfig) -> Self {
        let state = Arc::new(AppState::new(&config));
        Self::with_state(config, state)
    }

    /// Create a server around pre-built state (used by the CLI for seeding)
    pub fn with_state(config: AppConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &AppConfig, state: Arc<AppState>) -> Router {
        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/api/health", get(health))
            // Public roster CRUD under /api/students
            .nest("/api/students", student_routes::router(state.clone()))
            // Register/login/logout/me under /api/auth
            .nest("/api/auth", auth_routes::router(state.clone()))
            // Token-gated portal under /api/student
            .nest("/api/student", profile_routes::router(state.clone()))
            // Stored pictures served as static files
            .nest_service("/uploads", ServeDir::new(&config.upload_dir))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}", e))
        })?;

        tracing::info!("Starting campusd HTTP server on {}", addr);
        tracing::info!("Health check: http://{}/api/health", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Server is running"))
}
