//! Handlers for card version history.

use axum::extract::{Path, State};
use axum::Json;
use cardfolio_core::error::CoreError;
use cardfolio_core::types::DbId;
use cardfolio_db::models::version::CardVersion;
use cardfolio_db::repositories::VersionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::cards::find_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/business-cards/{id}/versions
///
/// Snapshot history of an owned card, newest first.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CardVersion>>>> {
    find_owned(&state, card_id, auth.user_id).await?;

    let versions = VersionRepo::list_by_card(&state.pool, card_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /api/v1/business-cards/{id}/versions/{version}
pub async fn get_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((card_id, version_number)): Path<(DbId, i32)>,
) -> AppResult<Json<CardVersion>> {
    find_owned(&state, card_id, auth.user_id).await?;

    let version = VersionRepo::find_by_number(&state.pool, card_id, version_number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CardVersion",
            id: i64::from(version_number),
        }))?;
    Ok(Json(version))
}
