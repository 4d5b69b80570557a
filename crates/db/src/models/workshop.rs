//! Workshop entity model and DTOs.
//!
//! Columns are snake_case in the database; the JSON shape is camelCase to
//! match what the booking front-end reads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sharenet_core::error::CoreError;
use sharenet_core::types::{DbId, Timestamp};
use sharenet_core::workshop::validate_available_seats;

/// A row from the `workshops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: DbId,
    pub title: String,
    pub date: Timestamp,
    pub venue: String,
    pub available_seats: i32,
    pub spot_code: String,
    pub spot_name: String,
    pub category_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new workshop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshop {
    pub title: String,
    pub date: Timestamp,
    pub venue: String,
    pub available_seats: i32,
    pub spot_code: String,
    pub spot_name: String,
    pub category_name: String,
}

impl CreateWorkshop {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_available_seats(self.available_seats)
    }
}

/// DTO for updating an existing workshop. All fields optional; `id` is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkshop {
    pub title: Option<String>,
    pub date: Option<Timestamp>,
    pub venue: Option<String>,
    pub available_seats: Option<i32>,
    pub spot_code: Option<String>,
    pub spot_name: Option<String>,
    pub category_name: Option<String>,
}

impl UpdateWorkshop {
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.available_seats {
            Some(seats) => validate_available_seats(seats),
            None => Ok(()),
        }
    }
}
