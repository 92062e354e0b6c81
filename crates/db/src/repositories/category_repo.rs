//! Repository for the `card_categories` table.

use cardfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{CardCategory, CreateCardCategory, UpdateCardCategory};

const CATEGORY_COLUMNS: &str = "id, owner_id, name, icon, sort_order, created_at";

/// CRUD for a user's card categories. Every operation is scoped to the
/// owning user; there are no cross-user reads.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<CardCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM card_categories \
             WHERE owner_id = $1 \
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, CardCategory>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a category. Duplicate name for the same owner violates
    /// `uq_card_categories_owner_name`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCardCategory,
    ) -> Result<CardCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO card_categories (owner_id, name, icon, sort_order) \
             VALUES ($1, $2, $3, COALESCE($4, 0)) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, CardCategory>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.icon.as_deref())
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a category owned by `owner_id`. Returns `None` when the
    /// row does not exist or belongs to someone else.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateCardCategory,
    ) -> Result<Option<CardCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE card_categories SET \
                 name = COALESCE($3, name), \
                 icon = COALESCE($4, icon), \
                 sort_order = COALESCE($5, sort_order) \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, CardCategory>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(input.name.as_deref())
            .bind(input.icon.as_deref())
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category owned by `owner_id`. Cards referencing it keep
    /// a NULL category (FK is ON DELETE SET NULL).
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM card_categories WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
