// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use clap::Parser;
use confab_api::{
    AccountLoadResponse, ApiError, CacheStatsResponse, ClearCacheResponse,
    RefreshAccountsResponse, RoomUtilizationResponse, ValidateMeetingRequest, ValidationResponse,
    account_load, cache_stats, clear_cache, refresh_accounts, room_utilization, validate_meeting,
};
use confab_domain::{Room, ZoomAccount};
use confab_engine::{ConflictDetectionEngine, SystemClock};
use confab_store::InMemoryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Confab Server - HTTP server for the meeting conflict detection engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed the in-memory store with demo rooms and accounts
    #[arg(long, default_value_t = false)]
    seed: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The conflict detection engine.
    engine: Arc<ConflictDetectionEngine>,
}

/// Query parameters for the room utilization endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UtilizationQuery {
    /// First day of the inclusive range.
    start_date: NaiveDate,
    /// Last day of the inclusive range.
    end_date: NaiveDate,
}

/// API response for the health endpoint.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    /// Always "ok" when the server answers.
    status: String,
}

/// API error body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RoomNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ServiceUnavailable { .. } => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: err.to_string(),
            },
        }
    }
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/validate`.
///
/// Always answers 200: conflicts are data, not transport errors.
async fn handle_validate(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<ValidateMeetingRequest>,
) -> Json<ValidationResponse> {
    info!(title = %request.title, "Handling validate request");
    Json(validate_meeting(&app_state.engine, request))
}

/// Handler for GET `/cache/stats`.
async fn handle_cache_stats(AxumState(app_state): AxumState<AppState>) -> Json<CacheStatsResponse> {
    Json(cache_stats(&app_state.engine))
}

/// Handler for POST `/cache/clear`.
async fn handle_cache_clear(
    AxumState(app_state): AxumState<AppState>,
) -> Json<ClearCacheResponse> {
    Json(clear_cache(&app_state.engine))
}

/// Handler for GET `/accounts/load`.
async fn handle_account_load(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AccountLoadResponse>, HttpError> {
    let response: AccountLoadResponse = account_load(&app_state.engine)?;
    Ok(Json(response))
}

/// Handler for POST `/accounts/refresh`.
async fn handle_accounts_refresh(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<RefreshAccountsResponse>, HttpError> {
    let response: RefreshAccountsResponse = refresh_accounts(&app_state.engine)?;
    Ok(Json(response))
}

/// Handler for GET `/rooms/{room_id}/utilization`.
async fn handle_room_utilization(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<String>,
    Query(query): Query<UtilizationQuery>,
) -> Result<Json<RoomUtilizationResponse>, HttpError> {
    let response: RoomUtilizationResponse = room_utilization(
        &app_state.engine,
        &room_id,
        query.start_date,
        query.end_date,
    )?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/validate", post(handle_validate))
        .route("/cache/stats", get(handle_cache_stats))
        .route("/cache/clear", post(handle_cache_clear))
        .route("/accounts/load", get(handle_account_load))
        .route("/accounts/refresh", post(handle_accounts_refresh))
        .route("/rooms/{room_id}/utilization", get(handle_room_utilization))
        .with_state(app_state)
}

/// Seeds the store with a handful of demo rooms and accounts.
fn seed_demo_data(store: &InMemoryStore) -> Result<(), confab_store::StoreError> {
    for (id, name, capacity, location) in [
        ("room-aurora", "Aurora", 8_u32, "Building A, Floor 1"),
        ("room-borealis", "Borealis", 14, "Building A, Floor 2"),
        ("room-cascade", "Cascade", 30, "Building B, Floor 1"),
    ] {
        store.add_room(Room {
            id: id.to_string(),
            name: name.to_string(),
            capacity,
            is_active: true,
            location: Some(location.to_string()),
            equipment: Vec::new(),
        })?;
    }
    for id in ["zoom-1", "zoom-2"] {
        store.add_account(ZoomAccount {
            id: id.to_string(),
            is_active: true,
        })?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Confab Server");

    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    if args.seed {
        info!("Seeding demo rooms and accounts");
        seed_demo_data(&store)?;
    }

    let engine: Arc<ConflictDetectionEngine> = Arc::new(ConflictDetectionEngine::new(
        Arc::clone(&store) as Arc<dyn confab_store::MeetingStore>,
        Arc::new(SystemClock),
    ));

    let app_state: AppState = AppState { engine };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
