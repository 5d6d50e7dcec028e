//! Project design specification model and DTOs.
//!
//! At most one design row exists per project (unique on `project_id`);
//! writes go through an upsert.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectDesign {
    pub id: DbId,
    pub project_id: DbId,
    pub floor_count: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub kitchens: Option<i32>,
    pub balconies: Option<i32>,
    pub special_rooms: Option<Vec<String>>,
    /// Free-form room-by-direction layout, stored as JSON.
    pub directional_rooms: Option<serde_json::Value>,
    pub kitchen_type: Option<String>,
    pub master_has_bathroom: Option<bool>,
    pub general_description: Option<String>,
    pub interior_design: Option<String>,
    pub room_distribution: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a design specification.
#[derive(Debug, Default, Deserialize)]
pub struct UpsertProjectDesign {
    pub floor_count: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub kitchens: Option<i32>,
    pub balconies: Option<i32>,
    pub special_rooms: Option<Vec<String>>,
    pub directional_rooms: Option<serde_json::Value>,
    pub kitchen_type: Option<String>,
    pub master_has_bathroom: Option<bool>,
    pub general_description: Option<String>,
    pub interior_design: Option<String>,
    pub room_distribution: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
}
