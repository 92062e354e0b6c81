//! Wallet models and DTOs.

use cardfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `business_card_wallet` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WalletEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub card_id: DbId,
    pub nickname: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A wallet entry joined with the saved card's display columns, as
/// returned by the wallet listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WalletCard {
    pub id: DbId,
    pub card_id: DbId,
    pub nickname: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub saved_at: Timestamp,
    pub slug: Option<String>,
    pub card_type: String,
    pub front_image_url: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// DTO for saving a card to the wallet. Exactly one of `card_id` /
/// `slug` must be provided.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveToWallet {
    pub card_id: Option<DbId>,
    pub slug: Option<String>,
    pub nickname: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating a wallet entry. Absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWalletEntry {
    pub nickname: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

/// Query parameters for `GET /api/v1/wallet`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletListParams {
    /// Only favorites when true.
    pub favorites: Option<bool>,
    /// Entries carrying this tag.
    pub tag: Option<String>,
    /// Case-insensitive match over nickname, name, and company.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
