// 🌐 HTTP API - axum routes over the query engine
//
// Success bodies are the raw response shapes; failures are {"error": "..."}
// with 400 for bad months and 500 for anything the store or seed source did.

use crate::aggregation::{CategoryCounts, Combined, Histogram, Statistics};
use crate::db::SqliteStore;
use crate::engine::{Listing, ListingRequest, SalesAnalytics};
use crate::error::{QueryError, QueryResult};
use crate::seed;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SqliteStore>>,
    seed_url: String,
}

impl AppState {
    pub fn new(store: SqliteStore, seed_url: impl Into<String>) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            seed_url: seed_url.into(),
        }
    }

    fn query<T>(
        &self,
        run: impl FnOnce(SalesAnalytics<'_, SqliteStore>) -> QueryResult<T>,
    ) -> QueryResult<T> {
        let store = self
            .store
            .lock()
            .map_err(|_| QueryError::StoreUnavailable("store lock poisoned".to_string()))?;
        run(SalesAnalytics::new(&*store))
    }
}

/// Raw query-string pairs in arrival order; repeated keys are kept
type QueryPairs = Vec<(String, String)>;

fn listing_request(
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<ListingRequest, ApiError> {
    let Query(pairs) = query?;
    Ok(ListingRequest::from_pairs(&pairs))
}

#[derive(Serialize)]
struct InitResponse {
    message: &'static str,
    inserted: usize,
}

/// Error body: {"error": message}
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(err: anyhow::Error) -> Self {
        tracing::error!("request failed: {:#}", err);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{:#}", err),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        let status = if err.is_client_error() {
            tracing::debug!("rejected request: {}", err);
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("query failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("rejected query string: {}", rejection.body_text());
        ApiError {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/initialize-database - Reload the store from the seed URL
async fn initialize_database(
    State(state): State<AppState>,
) -> Result<Json<InitResponse>, ApiError> {
    let records = seed::fetch_remote(&state.seed_url)
        .await
        .map_err(ApiError::internal)?;

    let mut store = state
        .store
        .lock()
        .map_err(|_| QueryError::StoreUnavailable("store lock poisoned".to_string()))?;
    let inserted = store.replace_all(&records).map_err(ApiError::internal)?;

    Ok(Json(InitResponse {
        message: "Database initialized successfully",
        inserted,
    }))
}

/// GET /api/transactions?month=&search=&page=&pageSize=
async fn get_transactions(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Listing>, ApiError> {
    let request = listing_request(query)?;
    Ok(Json(state.query(|analytics| analytics.list(&request))?))
}

/// GET /api/statistics?month=
async fn get_statistics(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Statistics>, ApiError> {
    let params = listing_request(query)?;
    Ok(Json(state.query(|analytics| analytics.statistics(params.month.as_deref()))?))
}

/// GET /api/bar-chart?month=
async fn get_bar_chart(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Histogram>, ApiError> {
    let params = listing_request(query)?;
    Ok(Json(state.query(|analytics| analytics.histogram(params.month.as_deref()))?))
}

/// GET /api/pie-chart?month=
async fn get_pie_chart(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<CategoryCounts>, ApiError> {
    let params = listing_request(query)?;
    Ok(Json(state.query(|analytics| analytics.categories(params.month.as_deref()))?))
}

/// GET /api/combined-data?month=
async fn get_combined(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Combined>, ApiError> {
    let params = listing_request(query)?;
    Ok(Json(state.query(|analytics| analytics.combined(params.month.as_deref()))?))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/initialize-database", get(initialize_database))
        .route("/transactions", get(get_transactions))
        .route("/statistics", get(get_statistics))
        .route("/bar-chart", get(get_bar_chart))
        .route("/pie-chart", get(get_pie_chart))
        .route("/combined-data", get(get_combined))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
