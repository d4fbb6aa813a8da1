//! Route builders, one module per resource.

pub mod account;
pub mod health;
pub mod movies;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /account/register          register (public)
/// /account/login             login (public)
/// /account/asignar-rol       assign role to user
/// /account/roles             list roles
/// /account/users             list users
/// /account/role              create role
///
/// /peliculas                 list (GET), create (POST, admin)
/// /peliculas/{id}            get (GET), update (PUT, admin), delete (DELETE, admin)
/// /peliculas/{id}/criticas   list a movie's reviews
///
/// /criticas                  list (GET), create (POST), delete by ?id= (DELETE)
/// /criticas/{id}             get (GET), update (PUT, owner only)
/// /criticas/byuser/{usuarioId}  list a user's reviews
/// ```
///
/// `GET /users/{id}/roles` lives at the root, outside `/api` -- see
/// [`crate::router::build_app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/account", account::router())
        .nest("/peliculas", movies::router())
        .nest("/criticas", reviews::router())
}
