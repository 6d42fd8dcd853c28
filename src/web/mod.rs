//! Web API module for Centerline.
//!
//! JSON-file backend for the dashboard: the two stored collections are served
//! and overwritten as whole arrays, single points can be patched, and the map,
//! phasing dial and QR links are available as read-only projections.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1/settings` - Display and QR preferences for the dashboard
//! - `GET /api/v1/points` - Stored points, or `[]` when nothing is stored
//! - `POST /api/v1/points` - Overwrite the point collection
//! - `PATCH /api/v1/points/{id}` - Shallow-merge fields into one point
//! - `GET /api/v1/points/{id}/qr` - Deep link and QR image URL (optional ?size=)
//! - `GET /api/v1/layout` - Stored modules, or `[]` when nothing is stored
//! - `POST /api/v1/layout` - Overwrite the module collection
//! - `GET /api/v1/layout.svg` - Rendered module layout (optional ?print=)
//! - `GET /api/v1/map.svg` - Rendered map (optional ?selected=&print=)
//! - `GET /api/v1/phasing` - Dial markers for ?angle=
//! - `GET /api/v1/phasing.svg` - Rendered dial (optional ?angle=&print=)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::{Config, QR_SIZE_MAX, QR_SIZE_MIN};
use crate::constants::APP_VERSION;
use crate::export::dial_renderer::{dial_report, DialReport};
use crate::export::{render_dial, render_layout, render_map, RenderMode};
use crate::models::{Module, Point};
use crate::projection::{MapBackground, MapProjector, PhaseProjector, SimulatedAngle};
use crate::qr::QrLinkBuilder;
use crate::services::{Catalog, CatalogRepository, FileRepository};

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// JSON files backing the two collections
    repository: Arc<FileRepository>,
}

impl AppState {
    /// Creates a new application state serving the collections in `data_dir`.
    pub fn new(config: Config, data_dir: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            repository: Arc::new(FileRepository::new(data_dir)),
        }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.repository.dir()
    }

    /// Opens a catalog over the stored data, falling back to the built-in
    /// dataset where nothing usable is stored.
    fn catalog(&self) -> Catalog<FileRepository> {
        Catalog::open(
            FileRepository::new(self.repository.dir()),
            self.config.catalog_policy(),
        )
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Dashboard preferences read from the configuration file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Whether the sidebar starts collapsed.
    pub sidebar_collapsed: bool,
    /// Custom map background, if any.
    pub map_background: Option<String>,
    /// Base URL used for links from local-only hosts.
    pub public_base_url: Option<String>,
    /// Default QR image size in pixels.
    pub qr_size: u32,
}

/// Deep link of a point and the QR image request encoding it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    /// URL that opens the dashboard on the point.
    pub link: String,
    /// Image request for the external QR service.
    pub qr_image_url: String,
}

/// Query parameters for the QR endpoint.
#[derive(Debug, Deserialize)]
pub struct QrQuery {
    /// Image edge length in pixels.
    pub size: Option<u32>,
}

/// Query parameters for the map rendering.
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    /// Point to highlight.
    pub selected: Option<String>,
    /// High-contrast output without interactive hooks.
    #[serde(default)]
    pub print: bool,
}

/// Query parameters for the phasing dial.
#[derive(Debug, Default, Deserialize)]
pub struct PhasingQuery {
    /// Simulated cycle position in degrees.
    #[serde(default)]
    pub angle: f64,
    /// High-contrast output without interactive hooks.
    #[serde(default)]
    pub print: bool,
}

/// Query parameters for the layout rendering.
#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    /// High-contrast output without interactive hooks.
    #[serde(default)]
    pub print: bool,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

fn internal_error(error: &str, details: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(error, details.to_string())),
    )
}

fn point_not_found(id: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(format!("Point not found: {id}"))),
    )
}

fn svg_response(svg: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg)
}

/// Scheme the client used, as reported by a TLS-terminating proxy.
///
/// `X-Forwarded-Proto` wins over `Forwarded`; anything other than
/// `http`/`https` is ignored and the scheme defaults to `http`.
fn request_scheme(headers: &HeaderMap) -> &'static str {
    let forwarded_proto = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next());

    let forwarded = || {
        headers
            .get(header::FORWARDED)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|element| {
                element.split(';').find_map(|pair| {
                    let (key, value) = pair.split_once('=')?;
                    key.trim()
                        .eq_ignore_ascii_case("proto")
                        .then(|| value.trim().trim_matches('"'))
                })
            })
    };

    match forwarded_proto.or_else(forwarded).map(str::trim) {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    }
}

// ============================================================================
// Record Merging
// ============================================================================

/// Applies `patch` on top of `point`, replacing top-level fields only.
///
/// The id of the record is kept whatever the patch says. Returns an error
/// message when the patch is not an object or the merged record no longer
/// describes a valid point.
fn merge_point(point: &Point, patch: &Value) -> Result<Point, String> {
    let Value::Object(fields) = patch else {
        return Err("Patch body must be a JSON object".to_string());
    };

    let mut merged = serde_json::to_value(point).map_err(|e| e.to_string())?;
    if let Value::Object(record) = &mut merged {
        for (key, value) in fields {
            if key != "id" {
                record.insert(key.clone(), value.clone());
            }
        }
    }

    serde_json::from_value(merged).map_err(|e| e.to_string())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
    })
}

/// GET /api/v1/settings - Preferences the dashboard applies on load.
async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        sidebar_collapsed: state.config.display.sidebar_collapsed,
        map_background: state.config.display.map_background.clone(),
        public_base_url: state.config.qr.public_base_url.clone(),
        qr_size: state.config.qr.size,
    })
}

/// GET /api/v1/points - Stored point collection.
async fn get_points(State(state): State<AppState>) -> ApiResult<Json<Vec<Point>>> {
    let points = state
        .repository
        .load_points()
        .map_err(|e| internal_error("Failed to read points", e))?;

    Ok(Json(points.unwrap_or_default()))
}

/// POST /api/v1/points - Overwrite the point collection.
async fn save_points(
    State(state): State<AppState>,
    Json(points): Json<Vec<Point>>,
) -> ApiResult<StatusCode> {
    state
        .repository
        .save_points(&points)
        .map_err(|e| internal_error("Failed to save points", e))?;

    info!("Saved {} points", points.len());
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/points/{id} - Shallow-merge fields into one stored point.
async fn patch_point(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Json<Point>> {
    let mut points = state
        .repository
        .load_points()
        .map_err(|e| internal_error("Failed to read points", e))?
        .unwrap_or_default();

    let slot = points
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| point_not_found(&id))?;

    let merged = merge_point(slot, &patch).map_err(|details| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid point", details)),
        )
    })?;
    *slot = merged.clone();

    state
        .repository
        .save_points(&points)
        .map_err(|e| internal_error("Failed to save points", e))?;

    debug!("Patched point {id}");
    Ok(Json(merged))
}

/// GET /api/v1/points/{id}/qr - Deep link and QR image URL for one point.
async fn get_point_qr(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<QrQuery>,
    headers: HeaderMap,
) -> ApiResult<Json<QrResponse>> {
    let size = query.size.unwrap_or(state.config.qr.size);
    if !(QR_SIZE_MIN..=QR_SIZE_MAX).contains(&size) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!(
                "QR size must be between {QR_SIZE_MIN} and {QR_SIZE_MAX} pixels"
            ))),
        ));
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("Missing Host header")),
            )
        })?;

    if state.catalog().point(&id).is_none() {
        return Err(point_not_found(&id));
    }

    let scheme = request_scheme(&headers);
    let builder = QrLinkBuilder::new(format!("{scheme}://{host}"))
        .with_public_base_url(state.config.qr.public_base_url.as_deref())
        .with_service_url(&state.config.qr.service_url);

    Ok(Json(QrResponse {
        link: builder.link(&id),
        qr_image_url: builder.image_request(&id, size),
    }))
}

/// GET /api/v1/layout - Stored module collection.
async fn get_layout(State(state): State<AppState>) -> ApiResult<Json<Vec<Module>>> {
    let modules = state
        .repository
        .load_modules()
        .map_err(|e| internal_error("Failed to read layout", e))?;

    Ok(Json(modules.unwrap_or_default()))
}

/// POST /api/v1/layout - Overwrite the module collection.
async fn save_layout(
    State(state): State<AppState>,
    Json(modules): Json<Vec<Module>>,
) -> ApiResult<StatusCode> {
    state
        .repository
        .save_modules(&modules)
        .map_err(|e| internal_error("Failed to save layout", e))?;

    info!("Saved {} modules", modules.len());
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/layout.svg - Rendered module layout.
async fn layout_svg(
    State(state): State<AppState>,
    Query(query): Query<LayoutQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    svg_response(render_layout(
        catalog.modules(),
        RenderMode::from_print_flag(query.print),
    ))
}

/// GET /api/v1/map.svg - Rendered map with point markers.
async fn map_svg(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> ApiResult<impl IntoResponse> {
    let catalog = state.catalog();

    if let Some(id) = &query.selected {
        if catalog.point(id).is_none() {
            return Err(point_not_found(id));
        }
    }

    let background = MapBackground::from_setting(state.config.display.map_background.as_deref());
    let projector = MapProjector::new(catalog.points()).with_selected(query.selected.as_deref());
    let svg = render_map(
        &projector,
        &background,
        RenderMode::from_print_flag(query.print),
    );

    Ok(svg_response(svg))
}

/// GET /api/v1/phasing - Dial markers and near points at the simulated angle.
async fn get_phasing(
    State(state): State<AppState>,
    Query(query): Query<PhasingQuery>,
) -> Json<DialReport> {
    let catalog = state.catalog();
    let projector = PhaseProjector::new(catalog.points(), SimulatedAngle::new(query.angle));
    Json(dial_report(&projector))
}

/// GET /api/v1/phasing.svg - Rendered phasing dial.
async fn phasing_svg(
    State(state): State<AppState>,
    Query(query): Query<PhasingQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let projector = PhaseProjector::new(catalog.points(), SimulatedAngle::new(query.angle));
    svg_response(render_dial(
        &projector,
        RenderMode::from_print_flag(query.print),
    ))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The dashboard may be served from another origin on the shop-floor network.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/api/v1/settings", get(get_settings))
        // Point endpoints
        .route("/api/v1/points", get(get_points).post(save_points))
        .route("/api/v1/points/{id}", axum::routing::patch(patch_point))
        .route("/api/v1/points/{id}/qr", get(get_point_qr))
        // Layout endpoints
        .route("/api/v1/layout", get(get_layout).post(save_layout))
        .route("/api/v1/layout.svg", get(layout_svg))
        // Projections
        .route("/api/v1/map.svg", get(map_svg))
        .route("/api/v1/phasing", get(get_phasing))
        .route("/api/v1/phasing.svg", get(phasing_svg))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `data_dir` - Directory holding `points.json` and `layout.json`
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, data_dir: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config, data_dir);
    let app = create_router(state);

    info!("Starting Centerline web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
