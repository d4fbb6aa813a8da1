//! Route definitions for the `/criticas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/api/criticas`.
///
/// Delete takes its id in the query string (`DELETE /api/criticas?id=7`),
/// matching the published API contract.
///
/// ```text
/// GET    /                      -> list_reviews
/// POST   /                      -> create_review (caller becomes owner)
/// DELETE /?id={id}              -> delete_review (owner only)
/// GET    /{id}                  -> get_review
/// PUT    /{id}                  -> update_review (owner only)
/// GET    /byuser/{usuarioId}    -> reviews_by_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reviews::list_reviews)
                .post(reviews::create_review)
                .delete(reviews::delete_review),
        )
        .route(
            "/{id}",
            get(reviews::get_review).put(reviews::update_review),
        )
        .route("/byuser/{usuarioId}", get(reviews::reviews_by_user))
}
