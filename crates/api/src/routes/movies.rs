//! Route definitions for the `/peliculas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/api/peliculas`.
///
/// Reads require authentication; mutations require the `admin` role
/// (enforced by handler extractors).
///
/// ```text
/// GET    /               -> list_movies
/// POST   /               -> create_movie (admin)
/// GET    /{id}           -> get_movie
/// PUT    /{id}           -> update_movie (admin)
/// DELETE /{id}           -> delete_movie (admin)
/// GET    /{id}/criticas  -> get_movie_reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/{id}/criticas", get(movies::get_movie_reviews))
}
