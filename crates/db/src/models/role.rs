//! Role entity model.

use peliculas_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full role row from the `roles` table.
///
/// Roles are immutable once created, so there is no update DTO.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
