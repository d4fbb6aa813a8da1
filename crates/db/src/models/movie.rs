//! Movie entity model and DTOs.

use peliculas_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie. Field lengths are validated at the API
/// boundary; the column widths are the storage-level backstop.
#[derive(Debug)]
pub struct CreateMovie {
    pub title: String,
    pub description: String,
    pub release_date: String,
}

/// DTO for a full-replacement movie update.
#[derive(Debug)]
pub struct UpdateMovie {
    pub title: String,
    pub description: String,
    pub release_date: String,
}
