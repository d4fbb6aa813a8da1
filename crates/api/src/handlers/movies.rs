//! Handlers for the `/api/peliculas` resource.
//!
//! Reads require authentication; mutations require the `admin` role via
//! [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use peliculas_core::error::CoreError;
use peliculas_core::types::DbId;
use peliculas_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use peliculas_db::models::review::Review;
use peliculas_db::repositories::{MovieRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::validate_request;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/peliculas`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "description must be 1-255 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "releaseDate is required"))]
    pub release_date: String,
}

/// Request body for `PUT /api/peliculas/{id}`: a full replacement object
/// whose `id` must match the path.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    pub id: DbId,
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "description must be 1-255 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "releaseDate is required"))]
    pub release_date: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/peliculas
pub async fn list_movies(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(movies))
}

/// GET /api/peliculas/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| movie_not_found(id))?;
    Ok(Json(movie))
}

/// GET /api/peliculas/{id}/criticas
///
/// List one movie's reviews. An unknown movie is a 404; a movie with no
/// reviews yet is an empty 200.
pub async fn get_movie_reviews(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Review>>> {
    if MovieRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(movie_not_found(id));
    }

    let reviews = ReviewRepo::list_for_movie(&state.pool, id).await?;
    Ok(Json(reviews))
}

/// POST /api/peliculas
///
/// Create a movie. Admin only. Returns 201 with the assigned id.
pub async fn create_movie(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    validate_request(&input)?;

    let create_dto = CreateMovie {
        title: input.title,
        description: input.description,
        release_date: input.release_date,
    };
    let movie = MovieRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(movie_id = movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PUT /api/peliculas/{id}
///
/// Full-replacement update. Admin only. The body id must match the path id,
/// and the target must exist (no blind update).
pub async fn update_movie(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovieRequest>,
) -> AppResult<Json<Movie>> {
    if id != input.id {
        return Err(AppError::BadRequest(
            "Movie id in the path does not match the id in the body".into(),
        ));
    }
    validate_request(&input)?;

    let update_dto = UpdateMovie {
        title: input.title,
        description: input.description,
        release_date: input.release_date,
    };
    let movie = MovieRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| movie_not_found(id))?;

    Ok(Json(movie))
}

/// DELETE /api/peliculas/{id}
///
/// Delete a movie and, by cascade, its reviews. Admin only.
pub async fn delete_movie(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MovieRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(movie_not_found(id));
    }

    tracing::info!(movie_id = id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn movie_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Movie",
        key: id.to_string(),
    })
}
