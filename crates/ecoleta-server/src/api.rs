use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use ecoleta_shared::constants::UPLOADS_PATH;
use ecoleta_shared::{NewPoint, PointDetails, PointResponse, SerializedItem};
use ecoleta_store::{Database, PointFilter};

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let uploads = ServeDir::new(&state.config.uploads_path);

    Router::new()
        .route("/health", get(health_check))
        .route("/items", get(list_items))
        .route("/points", get(list_points).post(create_point))
        .route("/points/:id", get(show_point))
        .nest_service(UPLOADS_PATH, uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Query string of `GET /points`. `items` is a comma-separated id list.
#[derive(Debug, Default, Deserialize)]
struct PointsQuery {
    city: Option<String>,
    uf: Option<String>,
    items: Option<String>,
}

impl PointsQuery {
    fn into_filter(self) -> Result<PointFilter, ServerError> {
        let items = match self.items.as_deref() {
            Some(raw) => parse_item_ids(raw)?,
            None => Vec::new(),
        };

        Ok(PointFilter {
            city: self.city.filter(|c| !c.trim().is_empty()),
            uf: self
                .uf
                .map(|u| u.trim().to_ascii_uppercase())
                .filter(|u| !u.is_empty()),
            items,
        })
    }
}

fn parse_item_ids(raw: &str) -> Result<Vec<i64>, ServerError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ServerError::BadRequest(format!("Invalid item id: {s}")))
        })
        .collect()
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<SerializedItem>>, ServerError> {
    let items = state.db.lock().await.list_items()?;

    let endpoint = &state.config.endpoint_name;
    let serialized = items.iter().map(|item| item.serialize(endpoint)).collect();

    Ok(Json(serialized))
}

async fn create_point(
    State(state): State<AppState>,
    Json(new_point): Json<NewPoint>,
) -> Result<Json<PointResponse>, ServerError> {
    let new_point = new_point.normalized();
    new_point.validate()?;

    let point = state.db.lock().await.create_point(&new_point)?;

    info!(
        id = point.id,
        city = %point.city,
        uf = %point.uf,
        items = point.items.len(),
        "Collection point registered"
    );

    Ok(Json(point.into()))
}

async fn list_points(
    State(state): State<AppState>,
    Query(query): Query<PointsQuery>,
) -> Result<Json<Vec<PointResponse>>, ServerError> {
    let filter = query.into_filter()?;
    let points = state.db.lock().await.list_points(&filter)?;

    Ok(Json(points.into_iter().map(PointResponse::from).collect()))
}

async fn show_point(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PointDetails>, ServerError> {
    let (point, items) = {
        let db = state.db.lock().await;
        let point = db.get_point(id)?;
        let items = db.list_items_for_point(id)?;
        (point, items)
    };

    let endpoint = &state.config.endpoint_name;

    Ok(Json(PointDetails {
        point: point.into(),
        items: items.iter().map(|item| item.serialize(endpoint)).collect(),
    }))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
