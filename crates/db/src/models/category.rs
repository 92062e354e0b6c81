//! Card category model and DTOs.

use cardfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `card_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CardCategory {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardCategory {
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a category. Absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCardCategory {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}
