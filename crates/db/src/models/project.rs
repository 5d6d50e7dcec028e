//! Project entity model and DTOs.
//!
//! A project is the workflow subject: its `status` column always holds
//! one of the canonical workflow strings and is only changed through
//! the conditional transition methods on the project repository.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meemar_core::types::{DbId, Timestamp};

/// Full project row. Everything here is safe to serialize.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub project_type: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,

    pub proposed_payment_amount: Option<f64>,
    pub payment_notes: Option<String>,
    pub payment_status: String,

    pub progress_stage: i32,
    pub supervision_weeks_target: Option<i32>,
    pub supervision_weeks_completed: i32,

    pub budget: Option<f64>,
    pub location: Option<String>,
    pub land_area: Option<String>,
    pub plot_number: Option<String>,
    pub basin_number: Option<String>,
    pub land_location: Option<String>,
    pub planner5d_url: Option<String>,

    pub agreement_file: Option<String>,
    pub license_file: Option<String>,
    pub document_2d: Option<String>,
    pub document_3d: Option<String>,
    pub architectural_file: Option<String>,
    pub structural_file: Option<String>,
    pub electrical_file: Option<String>,
    pub mechanical_file: Option<String>,
    pub supervision_report_file: Option<String>,

    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,

    pub user_id: DbId,
    pub office_id: Option<DbId>,
    pub supervising_office_id: Option<DbId>,
    pub assigned_company_id: Option<DbId>,
}

/// DTO for creating a project request. The row starts in the initial
/// workflow status with the requesting user as owner.
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub project_type: String,
    pub user_id: DbId,
    pub office_id: DbId,
}

/// Owner-editable descriptive fields. All optional; absent fields are
/// left untouched. Workflow state is never writable through this DTO.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub location: Option<String>,
    pub land_area: Option<String>,
    pub plot_number: Option<String>,
    pub basin_number: Option<String>,
    pub land_location: Option<String>,
    pub planner5d_url: Option<String>,
}
