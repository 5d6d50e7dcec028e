//! Repository for the `projects` table.
//!
//! All workflow writes are compare-and-swap: the UPDATE carries the
//! status value the caller previously read, so a concurrent transition
//! makes the write affect zero rows instead of silently clobbering it.
//! Callers surface the zero-row case as a conflict.

use sqlx::PgPool;

use meemar_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Columns selected by every `projects` query.
const COLUMNS: &str = "id, name, description, project_type, status, rejection_reason, \
                       proposed_payment_amount, payment_notes, payment_status, \
                       progress_stage, supervision_weeks_target, supervision_weeks_completed, \
                       budget, location, land_area, plot_number, basin_number, land_location, \
                       planner5d_url, agreement_file, license_file, document_2d, document_3d, \
                       architectural_file, structural_file, electrical_file, mechanical_file, \
                       supervision_report_file, start_date, end_date, created_at, \
                       user_id, office_id, supervising_office_id, assigned_company_id";

/// Provides CRUD and workflow-transition operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project request. The status column takes its
    /// initial value from the table default.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, project_type, user_id, office_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.project_type)
            .bind(input.user_id)
            .bind(input.office_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects owned by a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List projects where the office is the design office or the
    /// supervising office, newest first.
    pub async fn list_for_office(
        pool: &PgPool,
        office_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE office_id = $1 OR supervising_office_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(office_id)
            .fetch_all(pool)
            .await
    }

    /// List projects assigned to a company for execution, newest first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE assigned_company_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over name and description.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<Project>, sqlx::Error> {
        let pattern = super::ilike_pattern(q);
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE name ILIKE $1 OR description ILIKE $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Update owner-editable descriptive fields. Only non-`None` fields
    /// in `input` are applied. Workflow columns are not touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_descriptive(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                budget = COALESCE($4, budget),
                location = COALESCE($5, location),
                land_area = COALESCE($6, land_area),
                plot_number = COALESCE($7, plot_number),
                basin_number = COALESCE($8, basin_number),
                land_location = COALESCE($9, land_location),
                planner5d_url = COALESCE($10, planner5d_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget)
            .bind(&input.location)
            .bind(&input.land_area)
            .bind(&input.plot_number)
            .bind(&input.basin_number)
            .bind(&input.land_location)
            .bind(&input.planner5d_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project owned by the given user. Returns `true` if a
    /// row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Workflow transitions (compare-and-swap on `status`)
    // -----------------------------------------------------------------------

    /// Office response to an initial request. Approve passes
    /// `rejection_reason = None`, which also clears any stale reason.
    pub async fn respond(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $3, rejection_reason = $4
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    /// Owner submits final project details. Descriptive fields arriving
    /// with the submission are applied in the same write; `start_date`
    /// is stamped only the first time through.
    pub async fn submit_details(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        details: &UpdateProject,
        supervision_weeks_target: Option<i32>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = $3,
                start_date = COALESCE(start_date, NOW()),
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                budget = COALESCE($6, budget),
                location = COALESCE($7, location),
                land_area = COALESCE($8, land_area),
                plot_number = COALESCE($9, plot_number),
                basin_number = COALESCE($10, basin_number),
                land_location = COALESCE($11, land_location),
                planner5d_url = COALESCE($12, planner5d_url),
                supervision_weeks_target = COALESCE($13, supervision_weeks_target)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(&details.name)
            .bind(&details.description)
            .bind(details.budget)
            .bind(&details.location)
            .bind(&details.land_area)
            .bind(&details.plot_number)
            .bind(&details.basin_number)
            .bind(&details.land_location)
            .bind(&details.planner5d_url)
            .bind(supervision_weeks_target)
            .fetch_optional(pool)
            .await
    }

    /// Office sends a payment proposal. `payment_status` moves to the
    /// pending-user-action value supplied by the caller.
    pub async fn propose_payment(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        amount: f64,
        notes: Option<&str>,
        payment_status: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = $3,
                proposed_payment_amount = $4,
                payment_notes = $5,
                payment_status = $6
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(amount)
            .bind(notes)
            .bind(payment_status)
            .fetch_optional(pool)
            .await
    }

    /// Successful checkout: mark the proposal paid and move the project
    /// into the working status.
    pub async fn record_payment(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        payment_status: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $3, payment_status = $4
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(payment_status)
            .fetch_optional(pool)
            .await
    }

    /// Attach an uploaded file to one of the document slot columns.
    /// `column` must be a slot column name from the domain layer, never
    /// caller-supplied text.
    pub async fn attach_document(
        pool: &PgPool,
        id: DbId,
        column: &str,
        file_path: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET {column} = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(file_path)
            .fetch_optional(pool)
            .await
    }

    /// Final deliverable upload: store the 2D document, complete the
    /// project, and stamp `end_date` the first time through.
    pub async fn complete_with_deliverable(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        file_path: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = $3,
                document_2d = $4,
                end_date = COALESCE(end_date, NOW())
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(file_path)
            .fetch_optional(pool)
            .await
    }

    /// Set the progress stage. When the final stage is reached the
    /// caller passes the completed status in `completed`; otherwise the
    /// status is left unchanged.
    pub async fn set_progress(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        stage: i32,
        completed: Option<&str>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET progress_stage = $3, status = COALESCE($4, status)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(stage)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    /// Owner requests supervision. The designated office and optional
    /// execution company are recorded and any reason from a previously
    /// rejected attempt is cleared.
    pub async fn request_supervision(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        supervising_office_id: DbId,
        assigned_company_id: Option<DbId>,
        supervision_weeks_target: Option<i32>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = $3,
                supervising_office_id = $4,
                assigned_company_id = $5,
                supervision_weeks_target = COALESCE($6, supervision_weeks_target),
                rejection_reason = NULL
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(supervising_office_id)
            .bind(assigned_company_id)
            .bind(supervision_weeks_target)
            .fetch_optional(pool)
            .await
    }

    /// Supervising office accepts the request.
    pub async fn approve_supervision(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $3, rejection_reason = NULL
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .fetch_optional(pool)
            .await
    }

    /// Supervising office declines the request. The designated office
    /// and company are detached so the owner can re-request elsewhere.
    pub async fn reject_supervision(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
        rejection_reason: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = $3,
                rejection_reason = $4,
                supervising_office_id = NULL,
                assigned_company_id = NULL
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    /// Weekly supervision report. Single slot: the stored file and the
    /// completed-week counter both follow the submitted week.
    pub async fn submit_supervision_report(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        file_path: &str,
        week_number: i32,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                supervision_report_file = $3,
                supervision_weeks_completed = $4
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(file_path)
            .bind(week_number)
            .fetch_optional(pool)
            .await
    }
}
