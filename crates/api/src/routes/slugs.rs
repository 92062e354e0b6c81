use axum::routing::get;
use axum::Router;

use crate::handlers::slugs;
use crate::state::AppState;

/// Slug routes mounted at `/slugs`.
///
/// The check is read-only; both verbs map to the same handler so
/// form-driven clients can POST without a preflighted GET.
///
/// ```text
/// GET/POST /check/{slug} -> check_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/check/{slug}",
        get(slugs::check_slug).post(slugs::check_slug),
    )
}
