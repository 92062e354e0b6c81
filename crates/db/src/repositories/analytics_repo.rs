//! Repository for the `business_card_analytics` table.

use cardfolio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::analytics::{DailyViews, EventCount};

/// Append-only event recording and owner-facing aggregation.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Record one event. Takes a connection so callers can fold the
    /// write into a surrounding transaction (view counting, wallet
    /// save); pass `pool.acquire()` for standalone writes.
    pub async fn record(
        conn: &mut PgConnection,
        card_id: DbId,
        event_type: &str,
        referrer: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO business_card_analytics (card_id, event_type, referrer) \
             VALUES ($1, $2, $3)",
        )
        .bind(card_id)
        .bind(event_type)
        .bind(referrer)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Lifetime per-event-type counts for a card.
    pub async fn counts_by_type(
        pool: &PgPool,
        card_id: DbId,
    ) -> Result<Vec<EventCount>, sqlx::Error> {
        sqlx::query_as::<_, EventCount>(
            "SELECT event_type, COUNT(*) AS count \
             FROM business_card_analytics \
             WHERE card_id = $1 \
             GROUP BY event_type \
             ORDER BY event_type",
        )
        .bind(card_id)
        .fetch_all(pool)
        .await
    }

    /// Daily `view` counts over the trailing `days` days, oldest first.
    pub async fn daily_views(
        pool: &PgPool,
        card_id: DbId,
        days: i32,
    ) -> Result<Vec<DailyViews>, sqlx::Error> {
        sqlx::query_as::<_, DailyViews>(
            "SELECT date_trunc('day', occurred_at)::date AS day, COUNT(*) AS count \
             FROM business_card_analytics \
             WHERE card_id = $1 \
               AND event_type = 'view' \
               AND occurred_at >= now() - make_interval(days => $2) \
             GROUP BY day \
             ORDER BY day",
        )
        .bind(card_id)
        .bind(days)
        .fetch_all(pool)
        .await
    }
}
