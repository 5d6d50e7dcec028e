//! Repository for the `project_designs` table.
//!
//! One row per project, enforced by a unique constraint; writes are
//! insert-or-replace.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::project_design::{ProjectDesign, UpsertProjectDesign};

/// Column list for `project_designs` queries.
const COLUMNS: &str = "id, project_id, floor_count, bedrooms, bathrooms, kitchens, \
                       balconies, special_rooms, directional_rooms, kitchen_type, \
                       master_has_bathroom, general_description, interior_design, \
                       room_distribution, budget_min, budget_max, created_at, updated_at";

/// Provides upsert and lookup for project design specifications.
pub struct ProjectDesignRepo;

impl ProjectDesignRepo {
    /// Find the design specification for a project.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectDesign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_designs WHERE project_id = $1");
        sqlx::query_as::<_, ProjectDesign>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the design specification for a project, or replace the
    /// existing one wholesale.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        input: &UpsertProjectDesign,
    ) -> Result<ProjectDesign, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_designs \
                 (project_id, floor_count, bedrooms, bathrooms, kitchens, balconies, \
                  special_rooms, directional_rooms, kitchen_type, master_has_bathroom, \
                  general_description, interior_design, room_distribution, \
                  budget_min, budget_max)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             ON CONFLICT (project_id) DO UPDATE SET
                floor_count = EXCLUDED.floor_count,
                bedrooms = EXCLUDED.bedrooms,
                bathrooms = EXCLUDED.bathrooms,
                kitchens = EXCLUDED.kitchens,
                balconies = EXCLUDED.balconies,
                special_rooms = EXCLUDED.special_rooms,
                directional_rooms = EXCLUDED.directional_rooms,
                kitchen_type = EXCLUDED.kitchen_type,
                master_has_bathroom = EXCLUDED.master_has_bathroom,
                general_description = EXCLUDED.general_description,
                interior_design = EXCLUDED.interior_design,
                room_distribution = EXCLUDED.room_distribution,
                budget_min = EXCLUDED.budget_min,
                budget_max = EXCLUDED.budget_max,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectDesign>(&query)
            .bind(project_id)
            .bind(input.floor_count)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.kitchens)
            .bind(input.balconies)
            .bind(&input.special_rooms)
            .bind(&input.directional_rooms)
            .bind(&input.kitchen_type)
            .bind(input.master_has_bathroom)
            .bind(&input.general_description)
            .bind(&input.interior_design)
            .bind(&input.room_distribution)
            .bind(input.budget_min)
            .bind(input.budget_max)
            .fetch_one(pool)
            .await
    }
}
