//! Handlers for the `/card-categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cardfolio_core::error::CoreError;
use cardfolio_core::types::DbId;
use cardfolio_db::models::category::{CardCategory, CreateCardCategory, UpdateCardCategory};
use cardfolio_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/card-categories
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CardCategory>>>> {
    let categories = CategoryRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/card-categories
///
/// Create a category. Duplicate name for the caller is a 409 via
/// `uq_card_categories_owner_name`.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCardCategory>,
) -> AppResult<(StatusCode, Json<CardCategory>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }

    let category = CategoryRepo::create(
        &state.pool,
        auth.user_id,
        &CreateCardCategory {
            name: name.to_string(),
            ..input
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/card-categories/{id}
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpdateCardCategory>,
) -> AppResult<Json<CardCategory>> {
    let category = CategoryRepo::update(&state.pool, category_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CardCategory",
            id: category_id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/card-categories/{id}
///
/// Cards referencing the category fall back to no category.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, category_id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CardCategory",
            id: category_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
