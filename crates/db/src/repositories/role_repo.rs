//! Repository for the `roles` and `user_roles` tables.

use sqlx::PgPool;

use peliculas_core::types::DbId;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, created_at";

/// Provides role creation, lookup, and user-role assignment.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Role, sqlx::Error> {
        let query = format!("INSERT INTO roles (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY name");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// List the role names assigned to a user, ordered by name.
    pub async fn list_names_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT r.name FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// List all (user_id, role_name) pairs. Used to resolve role names for a
    /// user listing without an N+1 query per user.
    pub async fn list_assignments(pool: &PgPool) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT ur.user_id, r.name FROM user_roles ur
             JOIN roles r ON r.id = ur.role_id
             ORDER BY r.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Check whether a user already holds a role.
    pub async fn user_has_role(
        pool: &PgPool,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT user_id FROM user_roles WHERE user_id = $1 AND role_id = $2")
                .bind(user_id)
                .bind(role_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    /// Assign a role to a user.
    pub async fn assign(pool: &PgPool, user_id: DbId, role_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
