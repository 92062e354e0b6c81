//! Repository for the `business_card_wallet` table.

use cardfolio_core::types::DbId;
use sqlx::{PgPool, QueryBuilder};

use crate::models::wallet::{
    SaveToWallet, UpdateWalletEntry, WalletCard, WalletEntry, WalletListParams,
};
use crate::repositories::AnalyticsRepo;

const WALLET_COLUMNS: &str =
    "id, user_id, card_id, nickname, tags, is_favorite, created_at, updated_at";

/// Joined projection selected by the wallet listing.
const WALLET_CARD_COLUMNS: &str = "\
    w.id, w.card_id, w.nickname, w.tags, w.is_favorite, w.created_at AS saved_at, \
    c.slug, c.card_type, c.front_image_url, c.full_name, c.job_title, c.company, \
    c.phone, c.email, c.website";

/// Default page size for wallet listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for wallet listing.
const MAX_LIMIT: i64 = 200;

/// A user's collection of saved (non-owned) cards.
pub struct WalletRepo;

impl WalletRepo {
    /// Save a card into the user's wallet and record the `wallet_save`
    /// analytics event in the same transaction.
    ///
    /// A second save of the same card violates `uq_wallet_user_card`,
    /// which the API layer maps to 409; no duplicate row is possible.
    pub async fn save(
        pool: &PgPool,
        user_id: DbId,
        card_id: DbId,
        input: &SaveToWallet,
    ) -> Result<WalletEntry, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO business_card_wallet (user_id, card_id, nickname, tags) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {WALLET_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, WalletEntry>(&query)
            .bind(user_id)
            .bind(card_id)
            .bind(input.nickname.as_deref())
            .bind(&input.tags)
            .fetch_one(&mut *tx)
            .await?;

        AnalyticsRepo::record(&mut tx, card_id, "wallet_save", None).await?;

        tx.commit().await?;

        tracing::info!(user_id, card_id, "Card saved to wallet");
        Ok(entry)
    }

    /// List the user's wallet joined with card display columns.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        params: &WalletListParams,
    ) -> Result<Vec<WalletCard>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let mut qb = QueryBuilder::new(format!(
            "SELECT {WALLET_CARD_COLUMNS} \
             FROM business_card_wallet w \
             JOIN business_cards c ON c.id = w.card_id \
             WHERE w.user_id = "
        ));
        qb.push_bind(user_id);

        if params.favorites == Some(true) {
            qb.push(" AND w.is_favorite");
        }
        if let Some(tag) = &params.tag {
            qb.push(" AND ").push_bind(tag).push(" = ANY(w.tags)");
        }
        if let Some(search) = &params.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (w.nickname ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.full_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.company ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY w.is_favorite DESC, w.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<WalletCard>().fetch_all(pool).await
    }

    /// Find a wallet entry only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<WalletEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {WALLET_COLUMNS} FROM business_card_wallet WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, WalletEntry>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update nickname/tags/favorite on an owned entry. Returns `None`
    /// when the entry does not exist or belongs to someone else.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateWalletEntry,
    ) -> Result<Option<WalletEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE business_card_wallet SET \
                 nickname = COALESCE($3, nickname), \
                 tags = COALESCE($4, tags), \
                 is_favorite = COALESCE($5, is_favorite), \
                 updated_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {WALLET_COLUMNS}"
        );
        sqlx::query_as::<_, WalletEntry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.nickname.as_deref())
            .bind(input.tags.as_deref())
            .bind(input.is_favorite)
            .fetch_optional(pool)
            .await
    }

    /// Remove a saved card from the wallet.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM business_card_wallet WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
