//! Repository for the `custom_slugs` table.
//!
//! The single-active-owner invariant is carried by the partial unique
//! index `uq_custom_slugs_active` (slug WHERE is_active); a racing
//! claim loses with a unique violation the API maps to 409.

use cardfolio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::slug::CustomSlug;

const SLUG_COLUMNS: &str = "id, slug, card_id, is_active, created_at";

/// Slug claim storage. Claims are never deleted, only deactivated, so
/// the table doubles as the claim history of a card.
pub struct SlugRepo;

impl SlugRepo {
    /// Find the active claim for a slug string, if any.
    pub async fn find_active(pool: &PgPool, slug: &str) -> Result<Option<CustomSlug>, sqlx::Error> {
        let query = format!(
            "SELECT {SLUG_COLUMNS} FROM custom_slugs WHERE slug = $1 AND is_active"
        );
        sqlx::query_as::<_, CustomSlug>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Of the given candidates, return those that already have an
    /// active owner. One round-trip for the whole suggestion batch.
    pub async fn taken_among(
        pool: &PgPool,
        candidates: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT slug FROM custom_slugs WHERE slug = ANY($1) AND is_active",
        )
        .bind(candidates)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(s,)| s).collect())
    }

    /// List a card's claim history, newest first.
    pub async fn list_by_card(pool: &PgPool, card_id: DbId) -> Result<Vec<CustomSlug>, sqlx::Error> {
        let query = format!(
            "SELECT {SLUG_COLUMNS} FROM custom_slugs \
             WHERE card_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CustomSlug>(&query)
            .bind(card_id)
            .fetch_all(pool)
            .await
    }

    /// Make `slug` the card's active claim.
    ///
    /// Runs inside the caller's transaction: deactivates the card's
    /// current claims, inserts the new active row, and refreshes the
    /// denormalized `business_cards.slug` column. The card is never
    /// observable without an active slug.
    pub async fn activate(
        conn: &mut PgConnection,
        card_id: DbId,
        slug: &str,
    ) -> Result<CustomSlug, sqlx::Error> {
        sqlx::query(
            "UPDATE custom_slugs SET is_active = FALSE WHERE card_id = $1 AND is_active",
        )
        .bind(card_id)
        .execute(&mut *conn)
        .await?;

        let query = format!(
            "INSERT INTO custom_slugs (slug, card_id, is_active) \
             VALUES ($1, $2, TRUE) \
             RETURNING {SLUG_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CustomSlug>(&query)
            .bind(slug)
            .bind(card_id)
            .fetch_one(&mut *conn)
            .await?;

        sqlx::query("UPDATE business_cards SET slug = $2, updated_at = now() WHERE id = $1")
            .bind(card_id)
            .bind(slug)
            .execute(&mut *conn)
            .await?;

        Ok(row)
    }
}
