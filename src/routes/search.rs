use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{RankingEngine, SearchSession};
use crate::models::{
    Candidate, ErrorResponse, HealthResponse, RefreshResponse, SearchRequest, SearchResponse,
};
use crate::services::{ReportsClient, SnapshotCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportsClient>,
    pub snapshots: Arc<SnapshotCache>,
    pub engine: RankingEngine,
    pub max_limit: u16,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/reports", web::get().to(list_reports))
        .route("/search", web::post().to(search))
        .route("/search/reset", web::post().to(reset_search))
        .route("/snapshot/refresh", web::post().to(refresh_snapshot));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Load the cached snapshot, or the error response to return when the reports
/// API cannot be reached
async fn load_snapshot(state: &AppState) -> Result<Arc<Vec<Candidate>>, HttpResponse> {
    state
        .snapshots
        .get_or_fetch(&state.reports)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load reports: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "failed_to_load_data".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        })
}

fn idle_response(state: &AppState, snapshot: Arc<Vec<Candidate>>) -> HttpResponse {
    let total_candidates = snapshot.len();
    let session = SearchSession::new(state.engine, snapshot);

    HttpResponse::Ok().json(SearchResponse {
        view: session.view(),
        total_candidates,
    })
}

/// Idle view: every report, unscored, with the neutral viewport
///
/// GET /api/v1/reports
async fn list_reports(state: web::Data<AppState>) -> impl Responder {
    match load_snapshot(&state).await {
        Ok(snapshot) => idle_response(&state, snapshot),
        Err(response) => response,
    }
}

/// Search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "category": "dog|cat|<custom>|all",
///   "behavior": "friendly|aggressive|injured|other|all",
///   "keyword": "string",
///   "onlyActive": true,
///   "lat": 13.7563,
///   "lng": 100.5018,
///   "viewport": "fitAll|centerBest",
///   "limit": 50
/// }
/// ```
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let snapshot = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    let mut request = req.into_inner();
    request.limit = request.limit.map(|limit| limit.min(state.max_limit));

    tracing::info!(
        "Searching {} reports: category={:?}, behavior={:?}, keyword={:?}, onlyActive={}",
        snapshot.len(),
        request.category,
        request.behavior,
        request.keyword,
        request.only_active
    );

    let total_candidates = snapshot.len();
    let mut session = SearchSession::new(state.engine, snapshot);
    session.search(&request);

    HttpResponse::Ok().json(SearchResponse {
        view: session.view(),
        total_candidates,
    })
}

/// Reset endpoint: discards the search and returns the idle view
///
/// POST /api/v1/search/reset
async fn reset_search(state: web::Data<AppState>) -> impl Responder {
    tracing::debug!("Search reset requested");
    match load_snapshot(&state).await {
        Ok(snapshot) => idle_response(&state, snapshot),
        Err(response) => response,
    }
}

/// Drop the cached snapshot and fetch a fresh one
///
/// POST /api/v1/snapshot/refresh
async fn refresh_snapshot(state: web::Data<AppState>) -> impl Responder {
    state.snapshots.invalidate().await;

    match load_snapshot(&state).await {
        Ok(snapshot) => HttpResponse::Ok().json(RefreshResponse {
            refreshed: true,
            total_candidates: snapshot.len(),
        }),
        Err(response) => response,
    }
}
