//! Route definitions for the `/account` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/api/account`.
///
/// ```text
/// POST /register     -> register (public)
/// POST /login        -> login (public)
/// POST /asignar-rol  -> assign_role
/// GET  /roles        -> list_roles
/// GET  /users        -> list_users
/// POST /role         -> create_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/asignar-rol", post(account::assign_role))
        .route("/roles", get(account::list_roles))
        .route("/users", get(account::list_users))
        .route("/role", post(account::create_role))
}
