//! Business card model and DTOs.

use cardfolio_core::ocr::CardFields;
use cardfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::zone::CreateInteractiveZone;

/// A row from the `business_cards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BusinessCard {
    pub id: DbId,
    pub owner_id: DbId,
    pub category_id: Option<DbId>,
    pub card_type: String,
    /// Denormalized copy of the active `custom_slugs` row, if any.
    pub slug: Option<String>,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub qr_code_url: Option<String>,
    pub view_count: i64,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BusinessCard {
    /// The contact fields as a [`CardFields`] value (used for version
    /// snapshots and public payloads).
    pub fn fields(&self) -> CardFields {
        CardFields {
            full_name: self.full_name.clone(),
            job_title: self.job_title.clone(),
            company: self.company.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            address: self.address.clone(),
            qr_code_url: self.qr_code_url.clone(),
        }
    }
}

/// DTO for creating a card from confirmed extraction results.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBusinessCard {
    /// Requested slug; the handler validates and normalizes it first.
    pub slug: String,
    pub card_type: Option<String>,
    pub category_id: Option<DbId>,
    pub is_public: Option<bool>,
    /// The user-confirmed contact fields.
    #[serde(default)]
    pub fields: CardFields,
    /// Per-field bounding boxes from extraction, if the client kept them.
    #[serde(default)]
    pub zones: Vec<CreateInteractiveZone>,
}

/// DTO for updating a card. Absent fields stay unchanged; a present
/// `slug` triggers the transactional slug swap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBusinessCard {
    pub slug: Option<String>,
    pub card_type: Option<String>,
    pub category_id: Option<DbId>,
    pub is_public: Option<bool>,
    pub fields: Option<CardFields>,
}

/// Query parameters for `GET /api/v1/business-cards`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardListParams {
    pub category_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
