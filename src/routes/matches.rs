use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{normalize_request, CancellationToken, MatchError, Matcher};
use crate::models::{
    CandidateFilter, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    MatchCriteria, MatchResult, ProvidersResponse,
};
use crate::services::{DirectoryError, ProviderDirectory};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn ProviderDirectory>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/providers", web::get().to(list_providers));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::trace!("Health check (directory: {})", state.directory.name());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Failure modes of one match call
enum FindError {
    Match(MatchError),
    Directory(DirectoryError),
    Worker(String),
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "request": {
///     "blockchain": "Ethereum",
///     "projectType": "defi",
///     "budgetRange": {"min": 5000, "max": 50000},
///     "timeline": "normal",
///     "complexity": "medium"
///   },
///   "topK": 5,
///   "ecosystemOnly": false
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    // Reject bad criteria before touching the directory
    let criteria = match normalize_request(&req.request) {
        Ok(criteria) => criteria,
        Err(e) => {
            tracing::info!("Rejected match request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid criteria", e.to_string());
        }
    };

    let top_k = req
        .top_k
        .map(usize::from)
        .unwrap_or(state.matching.default_top_k)
        .min(state.matching.max_top_k);

    let filter = if req.ecosystem_only {
        CandidateFilter::for_criteria(&criteria)
    } else {
        CandidateFilter::default()
    };

    let match_id = uuid::Uuid::new_v4().to_string();
    let cancel = CancellationToken::new();
    let budget = Duration::from_millis(state.matching.timeout_ms);

    tracing::info!("Finding matches {} ({}, top_k: {})", match_id, filter, top_k);

    let outcome = tokio::time::timeout(
        budget,
        run_match(&state, criteria, filter, top_k, cancel.clone()),
    )
    .await;

    match outcome {
        Ok(Ok((matches, total_candidates))) => {
            tracing::info!(
                "Returning {} matches for {} (from {} candidates)",
                matches.len(),
                match_id,
                total_candidates
            );
            HttpResponse::Ok().json(FindMatchesResponse {
                match_id,
                matches,
                total_candidates,
                generated_at: chrono::Utc::now(),
            })
        }
        Ok(Err(FindError::Match(MatchError::InvalidCriteria(message)))) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid criteria", message)
        }
        Ok(Err(FindError::Match(MatchError::Cancelled))) => error_response(
            StatusCode::GATEWAY_TIMEOUT,
            "Matching cancelled",
            "Matching was cancelled before completion".to_string(),
        ),
        Ok(Err(FindError::Directory(e))) => {
            tracing::error!("Failed to fetch candidates for {}: {}", match_id, e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch candidates",
                e.to_string(),
            )
        }
        Ok(Err(FindError::Worker(message))) => {
            tracing::error!("Matching worker failed for {}: {}", match_id, message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Matching failed",
                message,
            )
        }
        Err(_) => {
            cancel.cancel();
            tracing::warn!("Match {} timed out after {:?}", match_id, budget);
            error_response(
                StatusCode::GATEWAY_TIMEOUT,
                "Matching timed out",
                format!("No result within {} ms", budget.as_millis()),
            )
        }
    }
}

/// Fetch the candidate pool and score it off the async executor
async fn run_match(
    state: &AppState,
    criteria: MatchCriteria,
    filter: CandidateFilter,
    top_k: usize,
    cancel: CancellationToken,
) -> Result<(Vec<MatchResult>, usize), FindError> {
    let candidates = state
        .directory
        .fetch_candidates(&filter)
        .await
        .map_err(FindError::Directory)?;

    let total_candidates = candidates.len();
    tracing::debug!("Found {} candidates ({})", total_candidates, filter);

    let matcher = state.matcher.clone();
    let matches = tokio::task::spawn_blocking(move || {
        matcher.match_criteria(&criteria, &candidates, Some(top_k), &cancel)
    })
    .await
    .map_err(|e| FindError::Worker(e.to_string()))?
    .map_err(FindError::Match)?;

    Ok((matches, total_candidates))
}

/// List providers endpoint
///
/// GET /api/v1/providers
async fn list_providers(state: web::Data<AppState>) -> impl Responder {
    match state
        .directory
        .fetch_candidates(&CandidateFilter::default())
        .await
    {
        Ok(providers) => HttpResponse::Ok().json(ProvidersResponse {
            count: providers.len(),
            providers,
        }),
        Err(e) => {
            tracing::error!("Failed to list providers: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch providers",
                e.to_string(),
            )
        }
    }
}
