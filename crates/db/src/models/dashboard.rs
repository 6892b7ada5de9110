//! Dashboard entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vista_core::types::{DbId, Timestamp};

/// A row from the `dashboards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDashboard {
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
}
