//! Card version snapshot model.

use cardfolio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `business_card_versions` table.
///
/// Snapshots are append-only; `version_number` starts at 1 and
/// increases by one per card update.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CardVersion {
    pub id: DbId,
    pub card_id: DbId,
    pub version_number: i32,
    pub snapshot: serde_json::Value,
    pub created_at: Timestamp,
}
