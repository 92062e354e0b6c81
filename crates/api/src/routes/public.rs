use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analytics, public};
use crate::state::AppState;

/// Public (unauthenticated) card routes mounted at `/cards`.
///
/// ```text
/// GET  /{slug}         -> resolve_card
/// POST /{slug}/events  -> record_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(public::resolve_card))
        .route("/{slug}/events", post(analytics::record_event))
}
