//! Handlers for the `/business-cards` resource.
//!
//! Create and update are transactional end to end (card row, slug
//! claim, zones, version snapshot); see `CardRepo`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cardfolio_core::error::CoreError;
use cardfolio_core::slug::{normalize_slug, validate_slug};
use cardfolio_core::types::DbId;
use cardfolio_db::models::card::{
    BusinessCard, CardListParams, CreateBusinessCard, UpdateBusinessCard,
};
use cardfolio_db::models::zone::InteractiveZone;
use cardfolio_db::repositories::{CardRepo, SlugRepo, ZoneRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Valid values for `business_cards.card_type`.
const CARD_TYPES: &[&str] = &["personal", "corporate"];

/// Full card payload returned by the detail endpoint.
#[derive(Debug, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: BusinessCard,
    pub zones: Vec<InteractiveZone>,
    /// Public share URL for the active slug, if one is claimed.
    pub share_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/business-cards
///
/// Create a card from user-confirmed extraction results. The requested
/// slug is validated, then claimed atomically with the card itself.
pub async fn create_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateBusinessCard>,
) -> AppResult<(StatusCode, Json<CardDetail>)> {
    input.slug = normalize_slug(&input.slug);
    validate_slug(&input.slug)
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_card_type(input.card_type.as_deref())?;
    validate_zone_sides(input.zones.iter().map(|z| z.side.as_str()))?;

    // Pre-check for a friendlier message; a race still loses on
    // uq_custom_slugs_active inside the transaction.
    if SlugRepo::find_active(&state.pool, &input.slug).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Slug '{}' is already taken",
            input.slug
        ))));
    }

    let card = CardRepo::create(&state.pool, auth.user_id, &input).await?;
    let zones = ZoneRepo::list_by_card(&state.pool, card.id).await?;
    let share_url = card.slug.as_deref().map(|s| state.config.share_url(s));

    Ok((
        StatusCode::CREATED,
        Json(CardDetail {
            card,
            zones,
            share_url,
        }),
    ))
}

/// GET /api/v1/business-cards
///
/// List the caller's cards, optionally filtered by category.
pub async fn list_cards(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CardListParams>,
) -> AppResult<Json<DataResponse<Vec<BusinessCard>>>> {
    let cards = CardRepo::list_by_owner(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/business-cards/{id}
pub async fn get_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<CardDetail>> {
    let card = find_owned(&state, card_id, auth.user_id).await?;
    let zones = ZoneRepo::list_by_card(&state.pool, card.id).await?;
    let share_url = card.slug.as_deref().map(|s| state.config.share_url(s));

    Ok(Json(CardDetail {
        card,
        zones,
        share_url,
    }))
}

/// PUT /api/v1/business-cards/{id}
///
/// Update fields/category/type; a present `slug` performs the
/// transactional claim swap. Every update appends a version snapshot.
pub async fn update_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
    Json(mut input): Json<UpdateBusinessCard>,
) -> AppResult<Json<BusinessCard>> {
    validate_card_type(input.card_type.as_deref())?;

    if let Some(slug) = &input.slug {
        let normalized = normalize_slug(slug);
        validate_slug(&normalized)
            .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

        // Re-claiming the card's own slug is a no-op, not a conflict.
        if let Some(claim) = SlugRepo::find_active(&state.pool, &normalized).await? {
            if claim.card_id != card_id {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Slug '{normalized}' is already taken"
                ))));
            }
        }
        input.slug = Some(normalized);
    }

    let card = CardRepo::update(&state.pool, card_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusinessCard",
            id: card_id,
        }))?;

    Ok(Json(card))
}

/// DELETE /api/v1/business-cards/{id}
pub async fn delete_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CardRepo::delete(&state.pool, card_id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BusinessCard",
            id: card_id,
        }));
    }

    tracing::info!(card_id, user_id = auth.user_id, "Business card deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a card owned by the caller or fail with 404.
pub(crate) async fn find_owned(
    state: &AppState,
    card_id: DbId,
    user_id: DbId,
) -> AppResult<BusinessCard> {
    CardRepo::find_owned(&state.pool, card_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusinessCard",
            id: card_id,
        }))
}

fn validate_card_type(card_type: Option<&str>) -> AppResult<()> {
    if let Some(t) = card_type {
        if !CARD_TYPES.contains(&t) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown card type '{t}' (expected one of: {})",
                CARD_TYPES.join(", ")
            ))));
        }
    }
    Ok(())
}

fn validate_zone_sides<'a>(sides: impl Iterator<Item = &'a str>) -> AppResult<()> {
    for side in sides {
        side.parse::<cardfolio_core::types::CardSide>()
            .map_err(AppError::Core)?;
    }
    Ok(())
}
