//! Review entity model and DTOs.

use peliculas_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::movie::Movie;

/// Full review row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub description: String,
    pub score: i32,
    pub movie_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review with its movie joined in, for listings where the client needs
/// the movie without a second round trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithMovie {
    pub id: DbId,
    pub description: String,
    pub score: i32,
    pub movie_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub movie: Movie,
}

/// Flat row produced by the reviews-join-movies query. Movie columns are
/// aliased with an `movie_` prefix so both entities can share one row.
#[derive(Debug, FromRow)]
pub struct ReviewWithMovieRow {
    pub id: DbId,
    pub description: String,
    pub score: i32,
    pub movie_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub movie_title: String,
    pub movie_description: String,
    pub movie_release_date: String,
    pub movie_created_at: Timestamp,
    pub movie_updated_at: Timestamp,
}

impl From<ReviewWithMovieRow> for ReviewWithMovie {
    fn from(row: ReviewWithMovieRow) -> Self {
        ReviewWithMovie {
            id: row.id,
            description: row.description,
            score: row.score,
            movie_id: row.movie_id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            movie: Movie {
                id: row.movie_id,
                title: row.movie_title,
                description: row.movie_description,
                release_date: row.movie_release_date,
                created_at: row.movie_created_at,
                updated_at: row.movie_updated_at,
            },
        }
    }
}

/// DTO for creating a new review. The owning `user_id` always comes from the
/// authenticated caller, never from the request body.
#[derive(Debug)]
pub struct CreateReview {
    pub description: String,
    pub score: i32,
    pub movie_id: DbId,
    pub user_id: DbId,
}

/// DTO for overwriting a review's mutable fields (ownership already checked).
#[derive(Debug)]
pub struct UpdateReview {
    pub description: String,
    pub score: i32,
    pub movie_id: DbId,
}
