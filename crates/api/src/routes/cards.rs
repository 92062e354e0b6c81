use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analytics, cards, extraction, images, versions};
use crate::state::AppState;

/// Maximum multipart body size for image uploads and extraction (10 MiB).
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Business card routes mounted at `/business-cards`.
///
/// ```text
/// GET    /                     -> list_cards
/// POST   /                     -> create_card
/// POST   /extract              -> extract_card (multipart)
/// GET    /{id}                 -> get_card
/// PUT    /{id}                 -> update_card
/// DELETE /{id}                 -> delete_card
/// POST   /{id}/images          -> upload_images (multipart)
/// GET    /{id}/analytics       -> card_analytics
/// GET    /{id}/versions        -> list_versions
/// GET    /{id}/versions/{n}    -> get_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::list_cards).post(cards::create_card))
        .route("/extract", post(extraction::extract_card))
        .route(
            "/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/{id}/images", post(images::upload_images))
        .route("/{id}/analytics", get(analytics::card_analytics))
        .route("/{id}/versions", get(versions::list_versions))
        .route("/{id}/versions/{version}", get(versions::get_version))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
