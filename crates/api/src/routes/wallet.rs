use axum::routing::{get, put};
use axum::Router;

use crate::handlers::wallet;
use crate::state::AppState;

/// Wallet routes mounted at `/wallet`.
///
/// ```text
/// GET    /      -> list_wallet
/// POST   /      -> save_to_wallet
/// PUT    /{id}  -> update_wallet_entry
/// DELETE /{id}  -> delete_wallet_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wallet::list_wallet).post(wallet::save_to_wallet))
        .route(
            "/{id}",
            put(wallet::update_wallet_entry).delete(wallet::delete_wallet_entry),
        )
}
