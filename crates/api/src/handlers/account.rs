//! Handlers for the `/api/account` resource (registration, login, roles)
//! plus the root-level user-roles lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use peliculas_core::error::CoreError;
use peliculas_core::types::{DbId, Timestamp};
use peliculas_db::models::role::Role;
use peliculas_db::models::user::{CreateUser, User, UserResponse};
use peliculas_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::validate_request;
use crate::middleware::rbac::RequireAuth;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Minimum password length enforced at registration.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/account/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/account/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expiration: Timestamp,
}

/// Request body for `POST /api/account/asignar-rol`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub username: String,
    pub role: String,
}

/// Request body for `POST /api/account/role`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/account/register
///
/// Create a user credential record. Returns a confirmation message only;
/// the client logs in separately to obtain a token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_request(&input)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash: hashed,
        security_stamp: Uuid::new_v4().to_string(),
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(MessageResponse::new("User created successfully")))
}

/// POST /api/account/login
///
/// Verify credentials and issue a signed JWT carrying one role claim per
/// assigned role. Unknown username and wrong password produce the same 401
/// so callers cannot enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid_credentials =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let roles = RoleRepo::list_names_for_user(&state.pool, user.id).await?;

    let (token, exp) = generate_access_token(user.id, &user.username, &roles, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expiration = chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AppError::InternalError("Token expiration out of range".into()))?;

    tracing::info!(user_id = user.id, username = %user.username, "login succeeded");
    Ok(Json(LoginResponse { token, expiration }))
}

/// POST /api/account/asignar-rol
///
/// Assign a role to a user. The role is created on demand if it does not
/// exist yet; assigning a role the user already holds is a conflict.
pub async fn assign_role(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<AssignRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    let target = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                key: input.username.clone(),
            })
        })?;

    let role_name = input.role.trim();
    if role_name.is_empty() {
        return Err(AppError::BadRequest("Role name must not be empty".into()));
    }

    let role = match RoleRepo::find_by_name(&state.pool, role_name).await? {
        Some(role) => role,
        None => RoleRepo::create(&state.pool, role_name).await?,
    };

    if RoleRepo::user_has_role(&state.pool, target.id, role.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "User already has this role".into(),
        )));
    }

    RoleRepo::assign(&state.pool, target.id, role.id).await?;

    tracing::info!(user_id = target.id, role = %role.name, "role assigned");
    Ok(Json(MessageResponse::new("Role assigned successfully")))
}

/// GET /api/account/roles
///
/// List all roles.
pub async fn list_roles(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Role>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(roles))
}

/// GET /api/account/users
///
/// List all users with resolved role names (never the password hash).
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    // Pre-fetch all assignments to avoid an N+1 query per user.
    let assignments = RoleRepo::list_assignments(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .map(|u| {
            let roles = assignments
                .iter()
                .filter(|(user_id, _)| *user_id == u.id)
                .map(|(_, name)| name.clone())
                .collect();
            build_user_response(u, roles)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /users/{id}/roles
///
/// List the role names assigned to one user.
pub async fn user_roles(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<String>>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                key: id.to_string(),
            })
        })?;

    let roles = RoleRepo::list_names_for_user(&state.pool, target.id).await?;
    Ok(Json(roles))
}

/// POST /api/account/role
///
/// Create a role. Duplicate names are a conflict.
pub async fn create_role(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<CreateRoleRequest>,
) -> AppResult<(StatusCode, Json<Role>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Role name must not be empty".into()));
    }

    if RoleRepo::find_by_name(&state.pool, name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Role '{name}' already exists"
        ))));
    }

    let role = RoleRepo::create(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a user row plus resolved role names to the safe response shape.
fn build_user_response(user: &User, roles: Vec<String>) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        roles,
        created_at: user.created_at,
    }
}
