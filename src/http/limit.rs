//! # Rate Limiting
//!
//! Fixed-window per-client limiters. Rejections are an HTTP-boundary
//! concern (429 envelope), deliberately outside the pipeline taxonomy.
//! On protected routes the auth gate runs first, so unauthenticated
//! traffic never consumes a client's window.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Duration, Utc};

use super::response::ErrorBody;
use super::state::AppState;

/// Fixed-window request counter keyed by client
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: RwLock<HashMap<String, (u32, DateTime<Utc>)>>,
}

impl RateLimiter {
    /// Map size past which lapsed windows are swept out. Keys come from
    /// the `x-forwarded-for` header, so the map must not grow unboundedly
    /// on spoofed values.
    const EVICT_THRESHOLD: usize = 1024;

    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Count one request for `client`; `Err` when the window is full
    pub fn check(&self, client: &str) -> Result<(), RateLimited> {
        let now = Utc::now();

        let mut clients = match self.clients.write() {
            Ok(guard) => guard,
            // A poisoned limiter fails open rather than taking the API down
            Err(_) => return Ok(()),
        };

        if clients.len() > Self::EVICT_THRESHOLD {
            let window = self.window;
            clients.retain(|_, (_, start)| now - *start < window);
        }

        let entry = clients.entry(client.to_string()).or_insert((0, now));

        // Reset if in new window
        if now - entry.1 >= self.window {
            entry.0 = 0;
            entry.1 = now;
        }

        if entry.0 >= self.max_requests {
            return Err(RateLimited);
        }

        entry.0 += 1;
        Ok(())
    }
}

/// Window-full rejection
#[derive(Debug, Clone, Copy)]
pub struct RateLimited;

impl IntoResponse for RateLimited {
    fn into_response(self) -> Response {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorBody::message(
                "Too many requests, please try again later",
            )),
        )
            .into_response()
    }
}

/// The three service limiters
#[derive(Debug)]
pub struct RateLimits {
    /// Registration: 10 per 15 minutes
    pub register: RateLimiter,
    /// Login: 5 per 15 minutes
    pub login: RateLimiter,
    /// Authenticated API: 100 per 15 minutes
    pub api: RateLimiter,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            register: RateLimiter::new(10, Duration::minutes(15)),
            login: RateLimiter::new(5, Duration::minutes(15)),
            api: RateLimiter::new(100, Duration::minutes(15)),
        }
    }
}

/// Client key: first `x-forwarded-for` hop, else a shared local bucket
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "local".to_string())
}

// ==================
// Middleware
// ==================

pub async fn limit_register(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.limits.register, request, next).await
}

pub async fn limit_login(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.limits.login, request, next).await
}

pub async fn limit_api(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state.limits.api, request, next).await
}

async fn enforce(limiter: &RateLimiter, request: Request, next: Next) -> Response {
    match limiter.check(&client_key(request.headers())) {
        Ok(()) => next.run(request).await,
        Err(rejected) => rejected.into_response(),
    }
}
