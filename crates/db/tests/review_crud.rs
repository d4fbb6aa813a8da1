//! Repository-level tests for reviews: the unique (user, movie) index,
//! cascade behavior on movie deletion, and explicit not-found outcomes.

use sqlx::PgPool;

use peliculas_db::models::movie::{CreateMovie, UpdateMovie};
use peliculas_db::models::review::{CreateReview, UpdateReview};
use peliculas_db::models::user::CreateUser;
use peliculas_db::repositories::{MovieRepo, ReviewRepo, RoleRepo, UserRepo};

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "$argon2id$fake".to_string(),
            security_stamp: "stamp".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    user.id
}

async fn seed_movie(pool: &PgPool, title: &str) -> i64 {
    let movie = MovieRepo::create(
        pool,
        &CreateMovie {
            title: title.to_string(),
            description: "test movie".to_string(),
            release_date: "2020-01-01".to_string(),
        },
    )
    .await
    .expect("movie creation should succeed");
    movie.id
}

fn review_input(movie_id: i64, user_id: i64, score: i32) -> CreateReview {
    CreateReview {
        description: "fine".to_string(),
        score,
        movie_id,
        user_id,
    }
}

/// The second insert for the same (user, movie) pair fails on
/// `uq_reviews_user_movie`; this is the safety net concurrent requests race on.
#[sqlx::test]
async fn test_unique_user_movie_constraint(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let movie_id = seed_movie(&pool, "Dune").await;

    ReviewRepo::create(&pool, &review_input(movie_id, user_id, 5))
        .await
        .expect("first review should succeed");

    let err = ReviewRepo::create(&pool, &review_input(movie_id, user_id, 3))
        .await
        .expect_err("second review must violate the unique index");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_reviews_user_movie"));
        }
        other => panic!("expected a database error, got: {other}"),
    }
}

/// Deleting a movie deletes its reviews via ON DELETE CASCADE.
#[sqlx::test]
async fn test_movie_delete_cascades_to_reviews(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let movie_id = seed_movie(&pool, "Dune").await;

    let review = ReviewRepo::create(&pool, &review_input(movie_id, user_id, 5))
        .await
        .expect("review creation should succeed");

    let deleted = MovieRepo::delete(&pool, movie_id)
        .await
        .expect("movie deletion should succeed");
    assert!(deleted);

    let orphan = ReviewRepo::find_by_id(&pool, review.id)
        .await
        .expect("lookup should succeed");
    assert!(orphan.is_none(), "cascade must remove the movie's reviews");
}

/// Updates against absent rows return `None` instead of silently succeeding.
#[sqlx::test]
async fn test_update_absent_rows(pool: PgPool) {
    let result = MovieRepo::update(
        &pool,
        999_999,
        &UpdateMovie {
            title: "Ghost".to_string(),
            description: "absent".to_string(),
            release_date: "1990-01-01".to_string(),
        },
    )
    .await
    .expect("query should succeed");
    assert!(result.is_none());

    let result = ReviewRepo::update(
        &pool,
        999_999,
        &UpdateReview {
            description: "absent".to_string(),
            score: 3,
            movie_id: 1,
        },
    )
    .await
    .expect("query should succeed");
    assert!(result.is_none());

    let deleted = ReviewRepo::delete(&pool, 999_999)
        .await
        .expect("query should succeed");
    assert!(!deleted);
}

/// The joined listing embeds the movie row for each review.
#[sqlx::test]
async fn test_list_with_movie(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let movie_id = seed_movie(&pool, "Dune").await;
    ReviewRepo::create(&pool, &review_input(movie_id, user_id, 4))
        .await
        .expect("review creation should succeed");

    let listing = ReviewRepo::list_with_movie(&pool)
        .await
        .expect("listing should succeed");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].movie.id, movie_id);
    assert_eq!(listing[0].movie.title, "Dune");
    assert_eq!(listing[0].score, 4);
}

/// Role assignment bookkeeping: on-demand creation, membership checks, and
/// per-user name listings.
#[sqlx::test]
async fn test_role_assignment(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;

    // `admin` is seeded by the migration.
    let admin = RoleRepo::find_by_name(&pool, "admin")
        .await
        .expect("lookup should succeed")
        .expect("admin role must be seeded");

    assert!(!RoleRepo::user_has_role(&pool, user_id, admin.id)
        .await
        .expect("membership check should succeed"));

    RoleRepo::assign(&pool, user_id, admin.id)
        .await
        .expect("assignment should succeed");

    assert!(RoleRepo::user_has_role(&pool, user_id, admin.id)
        .await
        .expect("membership check should succeed"));

    let names = RoleRepo::list_names_for_user(&pool, user_id)
        .await
        .expect("listing should succeed");
    assert_eq!(names, vec!["admin".to_string()]);
}
