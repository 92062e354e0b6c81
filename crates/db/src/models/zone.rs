//! Interactive zone model and DTOs.
//!
//! A zone is a per-field bounding box on a card image, produced by
//! extraction and rendered as a tappable region by clients.

use cardfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `interactive_zones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InteractiveZone {
    pub id: DbId,
    pub card_id: DbId,
    pub side: String,
    pub field_name: String,
    pub field_value: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub created_at: Timestamp,
}

/// DTO for inserting a zone alongside card create/update.
///
/// Coordinates are normalized to the image dimensions (0.0 .. 1.0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInteractiveZone {
    pub side: String,
    pub field_name: String,
    pub field_value: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
