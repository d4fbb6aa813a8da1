//! Handlers for the `/api/criticas` resource.
//!
//! Any authenticated user may read and create; update and delete are gated
//! by the ownership predicate -- only the review's author may mutate it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use peliculas_core::error::CoreError;
use peliculas_core::ownership::ensure_owner;
use peliculas_core::types::DbId;
use peliculas_db::models::review::{CreateReview, Review, ReviewWithMovie, UpdateReview};
use peliculas_db::repositories::{MovieRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::validate_request;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating or updating a review. The owner is always the
/// authenticated caller; a `userId` in the body would be ignored by design,
/// so the DTO simply does not have one.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 1, max = 5, message = "score must be between 1 and 5"))]
    pub score: i32,
    pub movie_id: DbId,
}

/// Query parameters for `DELETE /api/criticas?id=<id>`.
#[derive(Debug, Deserialize)]
pub struct DeleteReviewParams {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/criticas
///
/// List all reviews with their movie joined in.
pub async fn list_reviews(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<ReviewWithMovie>>> {
    let reviews = ReviewRepo::list_with_movie(&state.pool).await?;
    Ok(Json(reviews))
}

/// GET /api/criticas/{id}
pub async fn get_review(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| review_not_found(id))?;
    Ok(Json(review))
}

/// POST /api/criticas
///
/// Create a review owned by the caller. The movie must exist; a second
/// review of the same movie by the same user is a 409 (the unique index
/// settles concurrent duplicates -- see the sqlx error classifier).
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_request(&input)?;
    ensure_movie_exists(&state, input.movie_id).await?;

    let create_dto = CreateReview {
        description: input.description,
        score: input.score,
        movie_id: input.movie_id,
        user_id: user.user_id,
    };
    let review = ReviewRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        review_id = review.id,
        movie_id = review.movie_id,
        user_id = review.user_id,
        "review created"
    );
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/criticas/{id}
///
/// Overwrite a review's description, score, and movie reference.
/// Owner only: absent -> 404, someone else's review -> 403, unchanged.
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<Review>> {
    validate_request(&input)?;

    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| review_not_found(id))?;
    ensure_owner(existing.user_id, user.user_id)?;

    ensure_movie_exists(&state, input.movie_id).await?;

    let update_dto = UpdateReview {
        description: input.description,
        score: input.score,
        movie_id: input.movie_id,
    };
    let review = ReviewRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| review_not_found(id))?;

    Ok(Json(review))
}

/// DELETE /api/criticas?id={id}
///
/// Delete a review by id (passed in the query string). Owner only.
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<DeleteReviewParams>,
) -> AppResult<StatusCode> {
    let existing = ReviewRepo::find_by_id(&state.pool, params.id)
        .await?
        .ok_or_else(|| review_not_found(params.id))?;
    ensure_owner(existing.user_id, user.user_id)?;

    ReviewRepo::delete(&state.pool, params.id).await?;

    tracing::info!(review_id = params.id, user_id = user.user_id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/criticas/byuser/{usuarioId}
///
/// List all reviews authored by one user. An empty list is a valid 200.
pub async fn reviews_by_user(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = ReviewRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(reviews))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_movie_exists(state: &AppState, movie_id: DbId) -> AppResult<()> {
    if MovieRepo::find_by_id(&state.pool, movie_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            key: movie_id.to_string(),
        }));
    }
    Ok(())
}

fn review_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        key: id.to_string(),
    })
}
