//! HTTP-level integration tests for the `/api/criticas` resource:
//! ownership checks, the one-review-per-user-per-movie rule, and the full
//! register -> login -> review scenario.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_admin_user, create_test_user, delete_auth, get_auth, login_user, post_json,
    post_json_auth, put_json_auth, token_for, TEST_PASSWORD,
};
use sqlx::PgPool;

use peliculas_db::models::movie::CreateMovie;
use peliculas_db::repositories::MovieRepo;

/// Insert a movie directly, returning its id.
async fn seed_movie(pool: &PgPool) -> i64 {
    let movie = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "Dune".to_string(),
            description: "A desert planet and its spice.".to_string(),
            release_date: "2021-10-22".to_string(),
        },
    )
    .await
    .expect("movie creation should succeed");
    movie.id
}

fn review_body(movie_id: i64, score: i32) -> serde_json::Value {
    serde_json::json!({
        "description": "Great",
        "score": score,
        "movieId": movie_id
    })
}

/// A valid creation is owned by the caller, and a subsequent get-by-id
/// returns matching description/score/movie/user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_get_review(pool: PgPool) {
    let user = create_test_user(&pool, "alice").await;
    let movie_id = seed_movie(&pool).await;
    let app = common::build_test_app(pool);
    let token = token_for(user.id, "alice", &[]);

    let response = post_json_auth(app.clone(), "/api/criticas", review_body(movie_id, 5), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["userId"], user.id, "review must be owned by the caller");

    let id = created["id"].as_i64().expect("created review must have an id");
    let response = get_auth(app, &format!("/api/criticas/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["description"], "Great");
    assert_eq!(fetched["score"], 5);
    assert_eq!(fetched["movieId"], movie_id);
    assert_eq!(fetched["userId"], user.id);
}

/// A second review of the same movie by the same user is a 409, and a
/// different user can still review the movie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_one_review_per_user_per_movie(pool: PgPool) {
    let alice = create_test_user(&pool, "alice").await;
    let bob = create_test_user(&pool, "bob").await;
    let movie_id = seed_movie(&pool).await;
    let app = common::build_test_app(pool);

    let alice_token = token_for(alice.id, "alice", &[]);
    let response =
        post_json_auth(app.clone(), "/api/criticas", review_body(movie_id, 5), &alice_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response =
        post_json_auth(app.clone(), "/api/criticas", review_body(movie_id, 3), &alice_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bob_token = token_for(bob.id, "bob", &[]);
    let response = post_json_auth(app, "/api/criticas", review_body(movie_id, 4), &bob_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Scores outside [1,5] are rejected before persistence.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_score_range(pool: PgPool) {
    let user = create_test_user(&pool, "alice").await;
    let movie_id = seed_movie(&pool).await;
    let app = common::build_test_app(pool);
    let token = token_for(user.id, "alice", &[]);

    for score in [0, 6] {
        let response =
            post_json_auth(app.clone(), "/api/criticas", review_body(movie_id, score), &token).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "score {score} must be rejected"
        );
    }
}

/// Reviewing a nonexistent movie is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_unknown_movie(pool: PgPool) {
    let user = create_test_user(&pool, "alice").await;
    let app = common::build_test_app(pool);
    let token = token_for(user.id, "alice", &[]);

    let response = post_json_auth(app, "/api/criticas", review_body(999999, 5), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Only the author may update or delete a review; a non-owner gets 403 and
/// the review is unchanged.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ownership_enforced(pool: PgPool) {
    let alice = create_test_user(&pool, "alice").await;
    let bob = create_test_user(&pool, "bob").await;
    let movie_id = seed_movie(&pool).await;
    let app = common::build_test_app(pool);

    let alice_token = token_for(alice.id, "alice", &[]);
    let response =
        post_json_auth(app.clone(), "/api/criticas", review_body(movie_id, 5), &alice_token).await;
    let review_id = body_json(response).await["id"].as_i64().unwrap();

    // Bob cannot update Alice's review.
    let bob_token = token_for(bob.id, "bob", &[]);
    let tampered = serde_json::json!({
        "description": "Terrible",
        "score": 1,
        "movieId": movie_id
    });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/criticas/{review_id}"),
        tampered,
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Bob cannot delete it either.
    let response =
        delete_auth(app.clone(), &format!("/api/criticas?id={review_id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The review is unchanged.
    let response = get_auth(app.clone(), &format!("/api/criticas/{review_id}"), &alice_token).await;
    let json = body_json(response).await;
    assert_eq!(json["description"], "Great");
    assert_eq!(json["score"], 5);

    // Alice herself may update it.
    let fixed = serde_json::json!({
        "description": "Even better on rewatch",
        "score": 4,
        "movieId": movie_id
    });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/criticas/{review_id}"),
        fixed,
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["score"], 4);

    // And delete it.
    let response = delete_auth(app.clone(), &format!("/api/criticas?id={review_id}"), &alice_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/criticas/{review_id}"), &alice_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Mutating a nonexistent review is a 404, not a crash.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mutate_absent_review(pool: PgPool) {
    let user = create_test_user(&pool, "alice").await;
    let movie_id = seed_movie(&pool).await;
    let app = common::build_test_app(pool);
    let token = token_for(user.id, "alice", &[]);

    let response = put_json_auth(
        app.clone(),
        "/api/criticas/999999",
        review_body(movie_id, 3),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, "/api/criticas?id=999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The global listing embeds the movie; the by-user listing returns the
/// author's reviews and an empty 200 for a user without any.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_listings(pool: PgPool) {
    let alice = create_test_user(&pool, "alice").await;
    let bob = create_test_user(&pool, "bob").await;
    let movie_id = seed_movie(&pool).await;
    let app = common::build_test_app(pool);
    let token = token_for(alice.id, "alice", &[]);

    post_json_auth(app.clone(), "/api/criticas", review_body(movie_id, 5), &token).await;

    let response = get_auth(app.clone(), "/api/criticas", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    let listing = listing.as_array().expect("listing must be an array");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["movie"]["title"], "Dune");

    let response = get_auth(app.clone(), &format!("/api/criticas/byuser/{}", alice.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // No reviews yet for bob: an empty list, not an error.
    let response = get_auth(app, &format!("/api/criticas/byuser/{}", bob.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

/// End-to-end scenario: register alice, log in, movie creation gated by the
/// admin role, review creation, duplicate conflict, cross-user forbidden.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_scenario(pool: PgPool) {
    create_admin_user(&pool, "root").await;
    let bob = create_test_user(&pool, "bob").await;
    let app = common::build_test_app(pool);

    // Register alice.
    let response = post_json(
        app.clone(),
        "/api/account/register",
        serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "Secret123!"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Login alice; the token carries her name.
    let alice_token = login_user(app.clone(), "alice", "Secret123!").await;
    let claims = peliculas_api::auth::jwt::validate_token(&alice_token, &common::test_config().jwt)
        .expect("token must validate");
    assert_eq!(claims.name, "alice");

    // Movie creation as non-admin is forbidden.
    let movie = serde_json::json!({
        "title": "Dune",
        "description": "Spice and sand.",
        "releaseDate": "2021-10-22"
    });
    let response = post_json_auth(app.clone(), "/api/peliculas", movie.clone(), &alice_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Same request as an admin succeeds with a generated id.
    let admin_token = login_user(app.clone(), "root", TEST_PASSWORD).await;
    let response = post_json_auth(app.clone(), "/api/peliculas", movie, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let movie_id = body_json(response).await["id"].as_i64().unwrap();

    // Alice reviews the movie.
    let review = serde_json::json!({ "description": "Great", "score": 5, "movieId": movie_id });
    let response = post_json_auth(app.clone(), "/api/criticas", review.clone(), &alice_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["userId"], claims.sub, "review must be owned by alice");

    // A second review of the same movie is a conflict.
    let response = post_json_auth(app.clone(), "/api/criticas", review, &alice_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Bob cannot touch alice's review.
    let bob_token = token_for(bob.id, "bob", &[]);
    let review_id = created["id"].as_i64().unwrap();
    let response = put_json_auth(
        app,
        &format!("/api/criticas/{review_id}"),
        serde_json::json!({ "description": "Meh", "score": 2, "movieId": movie_id }),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
