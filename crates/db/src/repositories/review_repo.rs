//! Repository for the `reviews` table.

use sqlx::PgPool;

use peliculas_core::types::DbId;

use crate::models::review::{
    CreateReview, Review, ReviewWithMovie, ReviewWithMovieRow, UpdateReview,
};

const COLUMNS: &str = "id, description, score, movie_id, user_id, created_at, updated_at";

/// Join projection shared by the listing queries that embed the movie.
const JOINED_COLUMNS: &str = "r.id, r.description, r.score, r.movie_id, r.user_id, \
     r.created_at, r.updated_at, \
     m.title AS movie_title, m.description AS movie_description, \
     m.release_date AS movie_release_date, \
     m.created_at AS movie_created_at, m.updated_at AS movie_updated_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    ///
    /// A second review by the same user for the same movie violates
    /// `uq_reviews_user_movie`; callers translate that into a Conflict.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (description, score, movie_id, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.description)
            .bind(input.score)
            .bind(input.movie_id)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a review by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reviews with their movie joined in, newest first.
    pub async fn list_with_movie(pool: &PgPool) -> Result<Vec<ReviewWithMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM reviews r
             JOIN movies m ON m.id = r.movie_id
             ORDER BY r.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ReviewWithMovieRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ReviewWithMovie::from).collect())
    }

    /// List all reviews for one movie, newest first.
    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE movie_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Review>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// List all reviews authored by one user, newest first. An empty result
    /// is a valid outcome, not an error.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a review's description, score, and movie reference.
    ///
    /// Ownership must already have been checked; this is a plain row update.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                description = $2,
                score = $3,
                movie_id = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.score)
            .bind(input.movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
