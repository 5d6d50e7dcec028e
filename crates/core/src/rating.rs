//! Review rating bounds and aggregation.

use crate::error::CoreError;

/// Lowest allowed review rating.
pub const MIN_RATING: i32 = 1;
/// Highest allowed review rating.
pub const MAX_RATING: i32 = 5;

/// Validate a review rating value.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING} (got {rating})"
        )));
    }
    Ok(())
}

/// Arithmetic mean of all ratings, rounded to 2 decimal places.
///
/// Returns `None` when there are no ratings; the caller stores NULL so a
/// target with no reviews shows no rating at all.
pub fn average(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
