//! Public card resolution by slug (no authentication).

use axum::extract::{Path, State};
use axum::http::header::REFERER;
use axum::http::HeaderMap;
use axum::Json;
use cardfolio_core::ocr::CardFields;
use cardfolio_db::models::zone::InteractiveZone;
use cardfolio_db::repositories::{CardRepo, ZoneRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Public payload of a shared card. Owner identity and counters are
/// not exposed.
#[derive(Debug, Serialize)]
pub struct PublicCard {
    pub slug: String,
    pub card_type: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub fields: CardFields,
    pub zones: Vec<InteractiveZone>,
    /// Canonical share URL (what a QR code should encode).
    pub share_url: String,
}

/// GET /api/v1/cards/{slug}
///
/// Resolve an active slug to its public card. Bumps the view counter
/// and records a `view` event; unknown/inactive slugs and private
/// cards are an indistinguishable 404.
pub async fn resolve_card(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> AppResult<Json<PublicCard>> {
    let referrer = headers.get(REFERER).and_then(|v| v.to_str().ok());

    let card = CardRepo::resolve_public_by_slug(&state.pool, &slug, referrer)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No card is shared under slug '{slug}'")))?;

    let zones = ZoneRepo::list_by_card(&state.pool, card.id).await?;

    Ok(Json(PublicCard {
        share_url: state.config.share_url(&slug),
        slug,
        card_type: card.card_type,
        front_image_url: card.front_image_url,
        back_image_url: card.back_image_url,
        fields: CardFields {
            full_name: card.full_name,
            job_title: card.job_title,
            company: card.company,
            phone: card.phone,
            email: card.email,
            website: card.website,
            address: card.address,
            qr_code_url: card.qr_code_url,
        },
        zones,
    }))
}
