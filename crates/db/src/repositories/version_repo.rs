//! Repository for the `business_card_versions` table.

use cardfolio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::version::CardVersion;

const VERSION_COLUMNS: &str = "id, card_id, version_number, snapshot, created_at";

/// Append-only snapshot storage. The next version number is computed in
/// the insert itself; `uq_card_versions_card_version` backstops races.
pub struct VersionRepo;

impl VersionRepo {
    /// Append the next snapshot for a card inside the caller's
    /// transaction. Numbering starts at 1.
    pub async fn append(
        conn: &mut PgConnection,
        card_id: DbId,
        snapshot: &serde_json::Value,
    ) -> Result<CardVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO business_card_versions (card_id, version_number, snapshot) \
             VALUES ($1, \
                     (SELECT COALESCE(MAX(version_number), 0) + 1 \
                      FROM business_card_versions WHERE card_id = $1), \
                     $2) \
             RETURNING {VERSION_COLUMNS}"
        );
        sqlx::query_as::<_, CardVersion>(&query)
            .bind(card_id)
            .bind(snapshot)
            .fetch_one(conn)
            .await
    }

    /// List a card's snapshots, newest first.
    pub async fn list_by_card(
        pool: &PgPool,
        card_id: DbId,
    ) -> Result<Vec<CardVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM business_card_versions \
             WHERE card_id = $1 \
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, CardVersion>(&query)
            .bind(card_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_number(
        pool: &PgPool,
        card_id: DbId,
        version_number: i32,
    ) -> Result<Option<CardVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM business_card_versions \
             WHERE card_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, CardVersion>(&query)
            .bind(card_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }
}
