// Dashboard HTTP API server
//
// `/` serves the page, `/api/charts` recomputes the three figures for the
// dropdown state carried in the query string.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use salescope_core::{ChartSet, Dataset, FilterState, SalescopeError};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::page::render_index;
use crate::{DashboardConfig, DashboardError, Result};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct DashboardState {
    dataset: Arc<Dataset>,
    index_html: Arc<str>,
}

impl DashboardState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let index_html = Arc::from(render_index(&dataset));
        Self {
            dataset,
            index_html,
        }
    }
}

pub fn build_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/charts", get(charts_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Dashboard HTTP server
pub struct DashboardServer {
    config: DashboardConfig,
    state: DashboardState,
}

impl DashboardServer {
    pub fn new(config: DashboardConfig, dataset: Arc<Dataset>) -> Self {
        Self {
            config,
            state: DashboardState::new(dataset),
        }
    }

    /// Load the configured CSV and build the server. Fails if the file is
    /// missing or malformed.
    pub fn from_config(config: DashboardConfig) -> Result<Self> {
        let dataset = Dataset::load(&config.data_path)?;
        Ok(Self::new(config, Arc::new(dataset)))
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = self.config.addr();
        info!(
            target: "dashboard",
            addr = %addr,
            rows = self.state.dataset.len(),
            "Starting Dashboard server"
        );

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| DashboardError::Bind {
                addr: addr.clone(),
                source,
            })?;
        info!(
            target: "dashboard",
            url = %format!("http://{}", addr),
            "Dashboard server ready"
        );

        serve_on(listener, self.state, shutdown).await
    }
}

/// Serve on an already bound listener.
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    state: DashboardState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(target: "dashboard", "Dashboard server stopped");
    Ok(())
}

async fn index_handler(State(state): State<DashboardState>) -> Html<String> {
    Html(state.index_html.to_string())
}

/// Raw dropdown values; absent means `All`.
#[derive(Debug, Default, Deserialize)]
struct ChartQuery {
    region: Option<String>,
    category: Option<String>,
}

async fn charts_handler(
    State(state): State<DashboardState>,
    Query(query): Query<ChartQuery>,
) -> std::result::Result<Json<ChartSet>, ApiError> {
    let filter = FilterState::parse(query.region.as_deref(), query.category.as_deref())?;
    debug!(
        target: "dashboard",
        region = %filter.region,
        category = %filter.category,
        "Recomputing charts"
    );
    Ok(Json(ChartSet::render(&state.dataset, &filter)))
}

/// Error surfaced to the browser as `{ "error": ... }`.
#[derive(Debug)]
struct ApiError(SalescopeError);

impl From<SalescopeError> for ApiError {
    fn from(e: SalescopeError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SalescopeError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}
