pub mod auth;
pub mod cards;
pub mod categories;
pub mod health;
pub mod public;
pub mod slugs;
pub mod wallet;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current user (requires auth)
///
/// /business-cards                      list, create
/// /business-cards/extract              dual-side OCR extraction (POST)
/// /business-cards/{id}                 get, update, delete
/// /business-cards/{id}/images          upload front/back images (POST)
/// /business-cards/{id}/analytics       owner analytics summary (GET)
/// /business-cards/{id}/versions        snapshot history (GET)
/// /business-cards/{id}/versions/{n}    one snapshot (GET)
///
/// /slugs/check/{slug}                  validity + availability (GET, POST)
///
/// /wallet                              list, save
/// /wallet/{id}                         update, delete
///
/// /card-categories                     list, create
/// /card-categories/{id}                update, delete
///
/// /cards/{slug}                        public resolve (GET)
/// /cards/{slug}/events                 public event recording (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/business-cards", cards::router())
        .nest("/slugs", slugs::router())
        .nest("/wallet", wallet::router())
        .nest("/card-categories", categories::router())
        .nest("/cards", public::router())
}
