//! Repository for the `interactive_zones` table.

use cardfolio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::zone::{CreateInteractiveZone, InteractiveZone};

const ZONE_COLUMNS: &str =
    "id, card_id, side, field_name, field_value, x, y, width, height, created_at";

/// Zone storage. Zones are always replaced wholesale for a card; a
/// partial zone edit has no meaning.
pub struct ZoneRepo;

impl ZoneRepo {
    pub async fn list_by_card(
        pool: &PgPool,
        card_id: DbId,
    ) -> Result<Vec<InteractiveZone>, sqlx::Error> {
        let query = format!(
            "SELECT {ZONE_COLUMNS} FROM interactive_zones \
             WHERE card_id = $1 \
             ORDER BY side, field_name"
        );
        sqlx::query_as::<_, InteractiveZone>(&query)
            .bind(card_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every zone of a card inside the caller's transaction.
    pub async fn replace_for_card(
        conn: &mut PgConnection,
        card_id: DbId,
        zones: &[CreateInteractiveZone],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM interactive_zones WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *conn)
            .await?;

        for zone in zones {
            sqlx::query(
                "INSERT INTO interactive_zones \
                     (card_id, side, field_name, field_value, x, y, width, height) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(card_id)
            .bind(&zone.side)
            .bind(&zone.field_name)
            .bind(&zone.field_value)
            .bind(zone.x)
            .bind(zone.y)
            .bind(zone.width)
            .bind(zone.height)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
