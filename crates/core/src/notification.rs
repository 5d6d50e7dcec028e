//! Well-known notification type names.
//!
//! One constant per workflow side effect; the mobile clients key their
//! notification rendering off these exact strings.

/// A new project request landed at a design office.
pub const NEW_PROJECT_REQUEST: &str = "NEW_PROJECT_REQUEST";
/// The design office approved the initial request.
pub const PROJECT_APPROVED_BY_OFFICE: &str = "PROJECT_APPROVED_BY_OFFICE";
/// The design office rejected the initial request.
pub const PROJECT_REJECTED_BY_OFFICE: &str = "PROJECT_REJECTED_BY_OFFICE";
/// The owner submitted the signed agreement and final details.
pub const USER_SUBMITTED_PROJECT_DETAILS: &str = "USER_SUBMITTED_PROJECT_DETAILS";
/// The design office proposed a payment amount.
pub const OFFICE_PROPOSED_PAYMENT: &str = "OFFICE_PROPOSED_PAYMENT";
/// The owner's charge went through.
pub const PAYMENT_RECEIVED: &str = "PAYMENT_RECEIVED";
/// The office uploaded the final 2D deliverable.
pub const OFFICE_UPLOADED_FINAL_2D: &str = "OFFICE_UPLOADED_FINAL_2D";
/// The office advanced the execution progress stage.
pub const PROJECT_PROGRESS_UPDATED: &str = "PROJECT_PROGRESS_UPDATED";
/// An owner asked an office to supervise a project.
pub const NEW_SUPERVISION_REQUEST: &str = "NEW_SUPERVISION_REQUEST";
/// The supervising office accepted the engagement.
pub const SUPERVISION_REQUEST_APPROVED: &str = "SUPERVISION_REQUEST_APPROVED";
/// The supervising office declined the engagement.
pub const SUPERVISION_REQUEST_REJECTED: &str = "SUPERVISION_REQUEST_REJECTED";
/// The supervising office filed a weekly report.
pub const SUPERVISION_REPORT_SUBMITTED: &str = "SUPERVISION_REPORT_SUBMITTED";

/// All workflow-emitted notification types.
pub const WORKFLOW_NOTIFICATION_TYPES: &[&str] = &[
    NEW_PROJECT_REQUEST,
    PROJECT_APPROVED_BY_OFFICE,
    PROJECT_REJECTED_BY_OFFICE,
    USER_SUBMITTED_PROJECT_DETAILS,
    OFFICE_PROPOSED_PAYMENT,
    PAYMENT_RECEIVED,
    OFFICE_UPLOADED_FINAL_2D,
    PROJECT_PROGRESS_UPDATED,
    NEW_SUPERVISION_REQUEST,
    SUPERVISION_REQUEST_APPROVED,
    SUPERVISION_REQUEST_REJECTED,
    SUPERVISION_REPORT_SUBMITTED,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_types_are_distinct_and_nonempty() {
        for (i, a) in WORKFLOW_NOTIFICATION_TYPES.iter().enumerate() {
            assert!(!a.is_empty());
            for b in &WORKFLOW_NOTIFICATION_TYPES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
