//! Handlers for slug validation and availability checks.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::Json;
use cardfolio_core::slug::{candidate_slugs, normalize_slug, suggest_slugs, validate_slug};
use cardfolio_db::repositories::SlugRepo;
use chrono::Datelike;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Response body for the slug check endpoint.
#[derive(Debug, Serialize)]
pub struct CheckSlugResponse {
    /// The normalized form that was actually checked.
    pub slug: String,
    pub valid: bool,
    pub available: bool,
    /// Human-readable rejection reason when `valid` is false.
    pub reason: Option<String>,
    /// Up to 8 available alternatives when the slug is invalid or taken.
    pub suggestions: Vec<String>,
}

/// GET/POST /api/v1/slugs/check/{slug}
///
/// Read-only validity + availability check. Never mutates anything;
/// claiming happens through card create/update.
pub async fn check_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CheckSlugResponse>> {
    let normalized = normalize_slug(&slug);

    let (valid, reason) = match validate_slug(&normalized) {
        Ok(()) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    let available = if valid {
        SlugRepo::find_active(&state.pool, &normalized).await?.is_none()
    } else {
        false
    };

    let suggestions = if valid && available {
        Vec::new()
    } else {
        let year = chrono::Utc::now().year();
        let candidates = candidate_slugs(&normalized, year);
        let taken: HashSet<String> = SlugRepo::taken_among(&state.pool, &candidates)
            .await?
            .into_iter()
            .collect();
        suggest_slugs(&normalized, year, |c| taken.contains(c))
    };

    Ok(Json(CheckSlugResponse {
        slug: normalized,
        valid,
        available,
        reason,
        suggestions,
    }))
}
