//! Custom slug model.

use cardfolio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `custom_slugs` table.
///
/// A card accumulates one row per slug it has ever claimed; at most one
/// row per slug string is active at a time (partial unique index).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomSlug {
    pub id: DbId,
    pub slug: String,
    pub card_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
}
