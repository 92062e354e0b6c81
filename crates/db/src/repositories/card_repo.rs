//! Repository for the `business_cards` table.
//!
//! Create and update are multi-statement operations (card row, slug
//! claim, zones, version snapshot); each runs in a single transaction
//! so a card is never observable in a half-written state.

use cardfolio_core::ocr::CardFields;
use cardfolio_core::types::DbId;
use sqlx::{PgConnection, PgPool, QueryBuilder};

use crate::models::card::{BusinessCard, CardListParams, CreateBusinessCard, UpdateBusinessCard};
use crate::repositories::{AnalyticsRepo, SlugRepo, VersionRepo, ZoneRepo};

/// Column list for `business_cards` queries.
const CARD_COLUMNS: &str = "\
    id, owner_id, category_id, card_type, slug, front_image_url, back_image_url, \
    full_name, job_title, company, phone, email, website, address, qr_code_url, \
    view_count, is_public, created_at, updated_at";

/// Default page size for card listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for card listing.
const MAX_LIMIT: i64 = 200;

/// CRUD plus public slug resolution for business cards.
pub struct CardRepo;

impl CardRepo {
    /// Create a card with its slug claim, zones, and version-1 snapshot
    /// in one transaction. Any failing step rolls the whole card back.
    ///
    /// The slug in `input` must already be normalized and validated; a
    /// racing claim of the same slug fails on `uq_custom_slugs_active`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateBusinessCard,
    ) -> Result<BusinessCard, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO business_cards \
                 (owner_id, category_id, card_type, is_public, \
                  full_name, job_title, company, phone, email, website, address, qr_code_url) \
             VALUES ($1, $2, COALESCE($3, 'personal'), COALESCE($4, TRUE), \
                     $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {CARD_COLUMNS}"
        );
        let mut card = sqlx::query_as::<_, BusinessCard>(&query)
            .bind(owner_id)
            .bind(input.category_id)
            .bind(input.card_type.as_deref())
            .bind(input.is_public)
            .bind(input.fields.full_name.as_deref())
            .bind(input.fields.job_title.as_deref())
            .bind(input.fields.company.as_deref())
            .bind(input.fields.phone.as_deref())
            .bind(input.fields.email.as_deref())
            .bind(input.fields.website.as_deref())
            .bind(input.fields.address.as_deref())
            .bind(input.fields.qr_code_url.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        SlugRepo::activate(&mut tx, card.id, &input.slug).await?;
        card.slug = Some(input.slug.clone());

        ZoneRepo::replace_for_card(&mut tx, card.id, &input.zones).await?;

        let snapshot = snapshot_of(&card)?;
        VersionRepo::append(&mut tx, card.id, &snapshot).await?;

        tx.commit().await?;

        tracing::info!(card_id = card.id, owner_id, slug = %input.slug, "Business card created");
        Ok(card)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BusinessCard>, sqlx::Error> {
        let query = format!("SELECT {CARD_COLUMNS} FROM business_cards WHERE id = $1");
        sqlx::query_as::<_, BusinessCard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a card only if it belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<BusinessCard>, sqlx::Error> {
        let query =
            format!("SELECT {CARD_COLUMNS} FROM business_cards WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, BusinessCard>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's cards, optionally filtered by category.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        params: &CardListParams,
    ) -> Result<Vec<BusinessCard>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let mut qb = QueryBuilder::new(format!(
            "SELECT {CARD_COLUMNS} FROM business_cards WHERE owner_id = "
        ));
        qb.push_bind(owner_id);
        if let Some(category_id) = params.category_id {
            qb.push(" AND category_id = ").push_bind(category_id);
        }
        qb.push(" ORDER BY updated_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<BusinessCard>().fetch_all(pool).await
    }

    /// Update a card owned by `owner_id` and append the next version
    /// snapshot, all in one transaction. A present `fields` value
    /// replaces the contact columns wholesale (extraction re-runs and
    /// manual edits both produce the full record); a present `slug`
    /// performs the claim swap. Returns `None` when the card does not
    /// exist or is not owned by the caller.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateBusinessCard,
    ) -> Result<Option<BusinessCard>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE business_cards SET \
                 card_type = COALESCE($3, card_type), \
                 category_id = COALESCE($4, category_id), \
                 is_public = COALESCE($5, is_public), \
                 updated_at = now() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {CARD_COLUMNS}"
        );
        let card = sqlx::query_as::<_, BusinessCard>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(input.card_type.as_deref())
            .bind(input.category_id)
            .bind(input.is_public)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut card) = card else {
            return Ok(None);
        };

        if let Some(fields) = &input.fields {
            card = Self::replace_fields(&mut tx, id, fields).await?;
        }

        if let Some(slug) = &input.slug {
            SlugRepo::activate(&mut tx, id, slug).await?;
            card.slug = Some(slug.clone());
        }

        let snapshot = snapshot_of(&card)?;
        VersionRepo::append(&mut tx, id, &snapshot).await?;

        tx.commit().await?;

        tracing::info!(card_id = id, owner_id, "Business card updated");
        Ok(Some(card))
    }

    /// Delete a card owned by `owner_id`; slugs, zones, wallet rows,
    /// analytics, and versions all cascade.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM business_cards WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve an active slug to its public card: bumps `view_count`
    /// and records a `view` event in the same transaction.
    ///
    /// Returns `None` for unknown/inactive slugs and for private cards;
    /// neither case leaves a trace in the counters.
    pub async fn resolve_public_by_slug(
        pool: &PgPool,
        slug: &str,
        referrer: Option<&str>,
    ) -> Result<Option<BusinessCard>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claim: Option<(DbId,)> = sqlx::query_as(
            "SELECT card_id FROM custom_slugs WHERE slug = $1 AND is_active",
        )
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((card_id,)) = claim else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE business_cards SET view_count = view_count + 1 \
             WHERE id = $1 AND is_public \
             RETURNING {CARD_COLUMNS}"
        );
        let card = sqlx::query_as::<_, BusinessCard>(&query)
            .bind(card_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(card) = card else {
            return Ok(None);
        };

        AnalyticsRepo::record(&mut tx, card.id, "view", referrer).await?;

        tx.commit().await?;
        Ok(Some(card))
    }

    /// Point one side's image URL at a freshly stored object. Returns
    /// the updated card, or `None` when the card is not the caller's.
    pub async fn set_image_url(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        side: &str,
        url: &str,
    ) -> Result<Option<BusinessCard>, sqlx::Error> {
        let column = match side {
            "front" => "front_image_url",
            _ => "back_image_url",
        };
        let query = format!(
            "UPDATE business_cards SET {column} = $3, updated_at = now() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {CARD_COLUMNS}"
        );
        sqlx::query_as::<_, BusinessCard>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Replace the contact columns wholesale (part of [`update`]).
    async fn replace_fields(
        conn: &mut PgConnection,
        id: DbId,
        fields: &CardFields,
    ) -> Result<BusinessCard, sqlx::Error> {
        let query = format!(
            "UPDATE business_cards SET \
                 full_name = $2, job_title = $3, company = $4, phone = $5, \
                 email = $6, website = $7, address = $8, qr_code_url = $9, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {CARD_COLUMNS}"
        );
        sqlx::query_as::<_, BusinessCard>(&query)
            .bind(id)
            .bind(fields.full_name.as_deref())
            .bind(fields.job_title.as_deref())
            .bind(fields.company.as_deref())
            .bind(fields.phone.as_deref())
            .bind(fields.email.as_deref())
            .bind(fields.website.as_deref())
            .bind(fields.address.as_deref())
            .bind(fields.qr_code_url.as_deref())
            .fetch_one(conn)
            .await
    }
}

/// Serialize a card row into its version snapshot.
fn snapshot_of(card: &BusinessCard) -> Result<serde_json::Value, sqlx::Error> {
    serde_json::to_value(card).map_err(|e| sqlx::Error::Protocol(e.to_string()))
}
