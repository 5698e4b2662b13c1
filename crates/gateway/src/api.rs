//! HTTP API — the JSON surface consumed by the web UI.
//!
//! Endpoints:
//!
//! - `POST /api/recommend`   — Assemble and annotate recommendations
//! - `GET  /api/daily_flash` — One-sentence highlights teaser
//! - `POST /api/log_action`  — Record a user reaction (click log)
//!
//! The recommendation endpoints never fail on pipeline problems — degraded
//! requests still return 200 with an advisory `message`. Only malformed
//! client input earns a 4xx.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use techtide_core::article::{ActionLog, RecommendationItem};
use techtide_core::profile::UserProfile;
use techtide_core::store::UserStore;
use techtide_recommend::Recommender;
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Upper bound on a caller-supplied item count.
const MAX_LIMIT: usize = 50;

/// Shared state for the API.
pub struct GatewayState {
    pub recommender: Arc<Recommender>,
    pub users: Arc<dyn UserStore>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the API router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/recommend", post(recommend_handler))
        .route("/api/daily_flash", get(daily_flash_handler))
        .route("/api/log_action", post(log_action_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Payloads ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendPayload {
    #[serde(default)]
    pub user_id: Option<String>,

    /// Optional interest override; falls back to the stored profile
    #[serde(default)]
    pub interests: Option<Vec<String>>,

    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub items: Vec<RecommendationItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlashResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LogActionPayload {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
        .into_response()
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub async fn recommend_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RecommendPayload>,
) -> axum::response::Response {
    let Some(user_id) = payload.user_id.filter(|id| !id.trim().is_empty()) else {
        return bad_request("user_id is required");
    };

    // Explicit interests win; otherwise resolve from the stored profile.
    let interests = match payload.interests {
        Some(interests) if !interests.is_empty() => interests,
        _ => match state.users.interests(&user_id).await {
            Ok(interests) => interests,
            Err(e) => {
                warn!(error = %e, user_id = %user_id, "interest lookup failed");
                Vec::new()
            }
        },
    };

    let profile = UserProfile::new(interests);
    let recommendation = match payload.limit {
        Some(limit) if limit > 0 => {
            state
                .recommender
                .recommend(&profile, limit.min(MAX_LIMIT))
                .await
        }
        _ => state.recommender.recommend_default(&profile).await,
    };

    Json(RecommendResponse {
        items: recommendation.items,
        message: recommendation.diagnostic,
    })
    .into_response()
}

pub async fn daily_flash_handler(State(state): State<SharedState>) -> Json<FlashResponse> {
    Json(FlashResponse {
        message: state.recommender.daily_highlights().await,
    })
}

pub async fn log_action_handler(
    State(state): State<SharedState>,
    Json(payload): Json<LogActionPayload>,
) -> axum::response::Response {
    let (Some(user_id), Some(url), Some(title)) = (payload.user_id, payload.url, payload.title)
    else {
        return bad_request("user_id, url and title are required");
    };

    let log = ActionLog {
        user_id,
        title,
        url,
        action: payload.action.unwrap_or_else(|| "like".into()),
    };

    match state.users.record_action(log).await {
        Ok(()) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Err(e) => {
            warn!(error = %e, "failed to record action");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "failed to record action".into(),
                }),
            )
                .into_response()
        }
    }
}
