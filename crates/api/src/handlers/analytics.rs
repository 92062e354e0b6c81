//! Handlers for card analytics: public event recording and the
//! owner-facing summary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cardfolio_core::error::CoreError;
use cardfolio_core::types::DbId;
use cardfolio_db::models::analytics::{AnalyticsSummary, RecordEvent, PUBLIC_EVENT_TYPES};
use cardfolio_db::repositories::{AnalyticsRepo, CardRepo, SlugRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::cards::find_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Window of the daily view series in the summary.
const DAILY_VIEWS_DAYS: i32 = 30;

/// POST /api/v1/cards/{slug}/events
///
/// Public endpoint recording `qr_scan` / `share` / `contact_click`
/// against a shared card. `view` and `wallet_save` are recorded by
/// their own operations and cannot be posted here.
pub async fn record_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<RecordEvent>,
) -> AppResult<StatusCode> {
    if !PUBLIC_EVENT_TYPES.contains(&input.event_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown event type '{}' (expected one of: {})",
            input.event_type,
            PUBLIC_EVENT_TYPES.join(", ")
        ))));
    }

    let claim = SlugRepo::find_active(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No card is shared under slug '{slug}'")))?;

    // Private cards accept no public events.
    let card = CardRepo::find_by_id(&state.pool, claim.card_id)
        .await?
        .filter(|c| c.is_public)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusinessCard",
            id: claim.card_id,
        }))?;

    let mut conn = state.pool.acquire().await?;
    AnalyticsRepo::record(&mut conn, card.id, &input.event_type, input.referrer.as_deref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/business-cards/{id}/analytics
///
/// Owner-only summary: lifetime views, per-event-type counts, and the
/// daily view series for the last 30 days.
pub async fn card_analytics(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<AnalyticsSummary>> {
    let card = find_owned(&state, card_id, auth.user_id).await?;

    let events = AnalyticsRepo::counts_by_type(&state.pool, card.id).await?;
    let daily_views = AnalyticsRepo::daily_views(&state.pool, card.id, DAILY_VIEWS_DAYS).await?;

    Ok(Json(AnalyticsSummary {
        total_views: card.view_count,
        events,
        daily_views,
    }))
}
