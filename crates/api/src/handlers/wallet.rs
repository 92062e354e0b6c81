//! Handlers for the `/wallet` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cardfolio_core::error::CoreError;
use cardfolio_core::types::DbId;
use cardfolio_db::models::wallet::{
    SaveToWallet, UpdateWalletEntry, WalletCard, WalletEntry, WalletListParams,
};
use cardfolio_db::repositories::{CardRepo, SlugRepo, WalletRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/wallet
///
/// Save a card (by id or by slug) into the caller's wallet. A second
/// save of the same card is a 409 via `uq_wallet_user_card`; saving
/// your own card is rejected outright.
pub async fn save_to_wallet(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveToWallet>,
) -> AppResult<(StatusCode, Json<WalletEntry>)> {
    let card_id = resolve_card_id(&state, &input).await?;

    let card = CardRepo::find_by_id(&state.pool, card_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusinessCard",
            id: card_id,
        }))?;

    if card.owner_id == auth.user_id {
        return Err(AppError::BadRequest(
            "You cannot save your own card to your wallet".into(),
        ));
    }

    let entry = WalletRepo::save(&state.pool, auth.user_id, card.id, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/wallet
///
/// List saved cards, newest first with favorites on top. Supports
/// favorites-only, tag, and free-text filters.
pub async fn list_wallet(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<WalletListParams>,
) -> AppResult<Json<DataResponse<Vec<WalletCard>>>> {
    let entries = WalletRepo::list(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// PUT /api/v1/wallet/{id}
///
/// Update nickname/tags/favorite on a saved card.
pub async fn update_wallet_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
    Json(input): Json<UpdateWalletEntry>,
) -> AppResult<Json<WalletEntry>> {
    let entry = WalletRepo::update(&state.pool, entry_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WalletEntry",
            id: entry_id,
        }))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/wallet/{id}
pub async fn delete_wallet_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WalletRepo::delete(&state.pool, entry_id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "WalletEntry",
            id: entry_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the target card from `card_id` or `slug` (exactly one).
async fn resolve_card_id(state: &AppState, input: &SaveToWallet) -> AppResult<DbId> {
    match (&input.card_id, &input.slug) {
        (Some(id), None) => Ok(*id),
        (None, Some(slug)) => {
            let claim = SlugRepo::find_active(&state.pool, slug)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("No card is shared under slug '{slug}'"))
                })?;
            Ok(claim.card_id)
        }
        _ => Err(AppError::BadRequest(
            "Provide exactly one of 'card_id' or 'slug'".into(),
        )),
    }
}
