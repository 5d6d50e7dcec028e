//! Payment sub-state constants and validation.

use crate::error::CoreError;

/// No payment activity yet.
pub const PAYMENT_STATUS_PENDING: &str = "Pending";
/// A proposal was sent; the owner must act.
pub const PAYMENT_STATUS_PENDING_USER_ACTION: &str = "Pending User Action";
/// The proposed amount was charged successfully.
pub const PAYMENT_STATUS_PAID: &str = "Paid";
/// The gateway declined the charge.
pub const PAYMENT_STATUS_FAILED: &str = "Failed";

/// All valid payment statuses.
pub const VALID_PAYMENT_STATUSES: &[&str] = &[
    PAYMENT_STATUS_PENDING,
    PAYMENT_STATUS_PENDING_USER_ACTION,
    PAYMENT_STATUS_PAID,
    PAYMENT_STATUS_FAILED,
];

/// Validate that a payment status string is one of the known values.
pub fn validate_payment_status(status: &str) -> Result<(), CoreError> {
    if VALID_PAYMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payment status '{status}'. Must be one of: {}",
            VALID_PAYMENT_STATUSES.join(", ")
        )))
    }
}

/// Validate a proposed or charged amount: finite and strictly positive.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Payment amount must be a positive number (got {amount})"
        )));
    }
    Ok(())
}
