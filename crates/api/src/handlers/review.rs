//! Handlers for the `/reviews` resource.
//!
//! Reviews are authored by individual accounts against exactly one
//! target: an office, a company, or a project. Office and company
//! ratings are derived values; every write that touches a review
//! recomputes the mean for the targets involved.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use meemar_core::error::CoreError;
use meemar_core::rating::{average, validate_rating};
use meemar_core::types::DbId;
use meemar_db::models::review::{CreateReview, Review, UpdateReview};
use meemar_db::repositories::{CompanyRepo, OfficeRepo, ProjectRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthParty;
use crate::state::AppState;

/// POST /api/v1/reviews
pub async fn create(
    auth: AuthParty,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let user_id = auth.require_individual()?;

    validate_rating(input.rating)?;
    if input.target_count() != 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Exactly one of company_id, project_id, or office_id must be provided".to_string(),
        )));
    }
    ensure_target_exists(&state, &input).await?;

    let review = ReviewRepo::create(&state.pool, user_id, &input).await?;
    recompute_target_ratings(&state, &review).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/reviews/mine
pub async fn mine(auth: AuthParty, State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    let user_id = auth.require_individual()?;
    let reviews = ReviewRepo::list_for_author(&state.pool, user_id).await?;
    Ok(Json(reviews))
}

/// GET /api/v1/reviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    let review = fetch_review(&state, id).await?;
    Ok(Json(review))
}

/// PUT /api/v1/reviews/{id}
///
/// Author-only edit of the rating and/or comment. The target cannot be
/// moved; a rating change re-derives the target's mean.
pub async fn update(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<Value>> {
    let review = fetch_review(&state, id).await?;
    ensure_author(&auth, &review)?;

    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let updated = ReviewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    recompute_target_ratings(&state, &updated).await?;

    Ok(Json(json!({
        "message": "Review updated successfully.",
        "review": updated,
    })))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete(
    auth: AuthParty,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let review = fetch_review(&state, id).await?;
    ensure_author(&auth, &review)?;

    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }));
    }
    recompute_target_ratings(&state, &review).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_review(state: &AppState, id: DbId) -> AppResult<Review> {
    ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))
}

fn ensure_author(auth: &AuthParty, review: &Review) -> Result<(), AppError> {
    if auth.require_individual().is_ok() && review.user_id == auth.id {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "You are not the author of this review".to_string(),
    )))
}

/// 404 unless the review's single target exists.
async fn ensure_target_exists(state: &AppState, input: &CreateReview) -> AppResult<()> {
    if let Some(id) = input.office_id {
        OfficeRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Office",
                id,
            }))?;
    }
    if let Some(id) = input.company_id {
        CompanyRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Company",
                id,
            }))?;
    }
    if let Some(id) = input.project_id {
        ProjectRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }))?;
    }
    Ok(())
}

/// Re-derive the mean rating for whichever office or company the
/// review targets. Projects carry no derived rating.
async fn recompute_target_ratings(state: &AppState, review: &Review) -> AppResult<()> {
    if let Some(office_id) = review.office_id {
        let ratings = ReviewRepo::office_ratings(&state.pool, office_id).await?;
        OfficeRepo::set_rating(&state.pool, office_id, average(&ratings)).await?;
    }
    if let Some(company_id) = review.company_id {
        let ratings = ReviewRepo::company_ratings(&state.pool, company_id).await?;
        CompanyRepo::set_rating(&state.pool, company_id, average(&ratings)).await?;
    }
    Ok(())
}
