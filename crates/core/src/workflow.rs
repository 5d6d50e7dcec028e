//! Project status workflow.
//!
//! Defines the canonical project statuses, the actions that move a project
//! between them, the actor each action is reserved to, and the allowed
//! source statuses per action. Every mutating project endpoint consults
//! this table through [`check_source`] / [`next_status`]; the repository
//! layer then applies the matching write as a compare-and-swap conditioned
//! on the status checked here, so a concurrent transition surfaces as a
//! conflict instead of a lost update.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Canonical project status. Stored as the exact display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    PendingOfficeApproval,
    OfficeApproved,
    OfficeRejected,
    DetailsSubmitted,
    AwaitingPaymentProposal,
    PaymentProposalSent,
    AwaitingUserPayment,
    InProgress,
    Completed,
    Cancelled,
    PendingSupervisionApproval,
    SupervisionRejected,
    UnderOfficeSupervision,
    SupervisionPaymentProposed,
    AwaitingSupervisionPayment,
    SupervisionCompleted,
}

/// Status assigned to a freshly created project request.
pub const INITIAL_STATUS: ProjectStatus = ProjectStatus::PendingOfficeApproval;

impl ProjectStatus {
    /// Return the status string as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingOfficeApproval => "Pending Office Approval",
            Self::OfficeApproved => "Office Approved - Awaiting Details",
            Self::OfficeRejected => "Office Rejected",
            Self::DetailsSubmitted => "Details Submitted - Pending Office Review",
            Self::AwaitingPaymentProposal => "Awaiting Payment Proposal",
            Self::PaymentProposalSent => "Payment Proposal Sent",
            Self::AwaitingUserPayment => "Awaiting User Payment",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::PendingSupervisionApproval => "Pending Supervision Approval",
            Self::SupervisionRejected => "Supervision Rejected",
            Self::UnderOfficeSupervision => "Under Office Supervision",
            Self::SupervisionPaymentProposed => "Supervision Payment Proposed",
            Self::AwaitingSupervisionPayment => "Awaiting Supervision Payment",
            Self::SupervisionCompleted => "Supervision Completed",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending Office Approval" => Some(Self::PendingOfficeApproval),
            "Office Approved - Awaiting Details" => Some(Self::OfficeApproved),
            "Office Rejected" => Some(Self::OfficeRejected),
            "Details Submitted - Pending Office Review" => Some(Self::DetailsSubmitted),
            "Awaiting Payment Proposal" => Some(Self::AwaitingPaymentProposal),
            "Payment Proposal Sent" => Some(Self::PaymentProposalSent),
            "Awaiting User Payment" => Some(Self::AwaitingUserPayment),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            "Pending Supervision Approval" => Some(Self::PendingSupervisionApproval),
            "Supervision Rejected" => Some(Self::SupervisionRejected),
            "Under Office Supervision" => Some(Self::UnderOfficeSupervision),
            "Supervision Payment Proposed" => Some(Self::SupervisionPaymentProposed),
            "Awaiting Supervision Payment" => Some(Self::AwaitingSupervisionPayment),
            "Supervision Completed" => Some(Self::SupervisionCompleted),
            _ => None,
        }
    }

    /// All valid status strings.
    pub const ALL: &'static [&'static str] = &[
        "Pending Office Approval",
        "Office Approved - Awaiting Details",
        "Office Rejected",
        "Details Submitted - Pending Office Review",
        "Awaiting Payment Proposal",
        "Payment Proposal Sent",
        "Awaiting User Payment",
        "In Progress",
        "Completed",
        "Cancelled",
        "Pending Supervision Approval",
        "Supervision Rejected",
        "Under Office Supervision",
        "Supervision Payment Proposed",
        "Awaiting Supervision Payment",
        "Supervision Completed",
    ];
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a stored status string is a member of the canonical set.
pub fn validate_status(status: &str) -> Result<ProjectStatus, CoreError> {
    ProjectStatus::from_str(status).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid project status '{status}'. Must be one of: {}",
            ProjectStatus::ALL.join(", ")
        ))
    })
}

// ---------------------------------------------------------------------------
// Actions and actors
// ---------------------------------------------------------------------------

/// A workflow action a request may attempt against a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    ApproveRequest,
    RejectRequest,
    SubmitFinalDetails,
    ProposePayment,
    SubmitPayment,
    UploadFinalDeliverable,
    AdvanceProgress,
    RequestSupervision,
    ApproveSupervision,
    RejectSupervision,
    SubmitSupervisionReport,
}

impl WorkflowAction {
    /// Human-readable verb used in error messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveRequest => "approve",
            Self::RejectRequest => "reject",
            Self::SubmitFinalDetails => "submit final details for",
            Self::ProposePayment => "propose payment for",
            Self::SubmitPayment => "pay for",
            Self::UploadFinalDeliverable => "upload the final deliverable for",
            Self::AdvanceProgress => "advance progress for",
            Self::RequestSupervision => "request supervision for",
            Self::ApproveSupervision => "approve supervision for",
            Self::RejectSupervision => "reject supervision for",
            Self::SubmitSupervisionReport => "submit a supervision report for",
        }
    }
}

/// Which project-bound actor may trigger an action.
///
/// The API layer matches the authenticated party against the corresponding
/// column: `user_id` for [`Owner`](RequiredActor::Owner), `office_id` for
/// [`DesignOffice`](RequiredActor::DesignOffice), `supervising_office_id`
/// for [`SupervisingOffice`](RequiredActor::SupervisingOffice).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredActor {
    Owner,
    DesignOffice,
    SupervisingOffice,
}

// ---------------------------------------------------------------------------
// Transition rules
// ---------------------------------------------------------------------------

/// One row of the workflow table: who may run an action, from which
/// statuses, and what status the project lands in afterwards.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub action: WorkflowAction,
    pub actor: RequiredActor,
    pub sources: &'static [ProjectStatus],
    /// `None` leaves the status unchanged.
    pub next: Option<ProjectStatus>,
}

use ProjectStatus::*;

/// Statuses from which an owner may still engage a supervising office.
/// `SupervisionRejected` is included: rejection clears the supervising
/// office so the owner can approach another one.
const SUPERVISION_REQUEST_SOURCES: &[ProjectStatus] = &[
    PendingOfficeApproval,
    OfficeApproved,
    OfficeRejected,
    DetailsSubmitted,
    AwaitingPaymentProposal,
    PaymentProposalSent,
    AwaitingUserPayment,
    SupervisionRejected,
];

/// The complete workflow table. One rule per action.
pub const TRANSITION_RULES: &[TransitionRule] = &[
    TransitionRule {
        action: WorkflowAction::ApproveRequest,
        actor: RequiredActor::DesignOffice,
        sources: &[PendingOfficeApproval],
        next: Some(OfficeApproved),
    },
    TransitionRule {
        action: WorkflowAction::RejectRequest,
        actor: RequiredActor::DesignOffice,
        sources: &[PendingOfficeApproval],
        next: Some(OfficeRejected),
    },
    TransitionRule {
        action: WorkflowAction::SubmitFinalDetails,
        actor: RequiredActor::Owner,
        sources: &[OfficeApproved],
        next: Some(DetailsSubmitted),
    },
    TransitionRule {
        action: WorkflowAction::ProposePayment,
        actor: RequiredActor::DesignOffice,
        sources: &[
            DetailsSubmitted,
            AwaitingPaymentProposal,
            PaymentProposalSent,
            UnderOfficeSupervision,
        ],
        next: Some(PaymentProposalSent),
    },
    TransitionRule {
        action: WorkflowAction::SubmitPayment,
        actor: RequiredActor::Owner,
        sources: &[PaymentProposalSent, AwaitingUserPayment],
        next: Some(InProgress),
    },
    TransitionRule {
        action: WorkflowAction::UploadFinalDeliverable,
        actor: RequiredActor::DesignOffice,
        sources: &[InProgress],
        next: Some(Completed),
    },
    TransitionRule {
        action: WorkflowAction::AdvanceProgress,
        actor: RequiredActor::DesignOffice,
        sources: &[InProgress],
        next: None,
    },
    TransitionRule {
        action: WorkflowAction::RequestSupervision,
        actor: RequiredActor::Owner,
        sources: SUPERVISION_REQUEST_SOURCES,
        next: Some(PendingSupervisionApproval),
    },
    TransitionRule {
        action: WorkflowAction::ApproveSupervision,
        actor: RequiredActor::SupervisingOffice,
        sources: &[PendingSupervisionApproval],
        next: Some(UnderOfficeSupervision),
    },
    TransitionRule {
        action: WorkflowAction::RejectSupervision,
        actor: RequiredActor::SupervisingOffice,
        sources: &[PendingSupervisionApproval],
        next: Some(SupervisionRejected),
    },
    TransitionRule {
        action: WorkflowAction::SubmitSupervisionReport,
        actor: RequiredActor::SupervisingOffice,
        sources: &[UnderOfficeSupervision],
        next: None,
    },
];

/// Look up the rule for an action. Every action has exactly one rule.
pub fn rule_for(action: WorkflowAction) -> &'static TransitionRule {
    TRANSITION_RULES
        .iter()
        .find(|r| r.action == action)
        .expect("every workflow action has a transition rule")
}

/// The actor an action is reserved to.
pub fn required_actor(action: WorkflowAction) -> RequiredActor {
    rule_for(action).actor
}

/// Check that `current` is a legal source status for `action`.
///
/// This is guard step 3: role and ownership have already been checked by
/// the caller. Returns `Conflict` so a stale or concurrent request maps
/// to HTTP 409.
pub fn check_source(action: WorkflowAction, current: ProjectStatus) -> Result<(), CoreError> {
    let rule = rule_for(action);
    if rule.sources.contains(&current) {
        return Ok(());
    }
    let allowed: Vec<&str> = rule.sources.iter().map(|s| s.as_str()).collect();
    Err(CoreError::Conflict(format!(
        "Cannot {} a project in status '{current}'. Allowed statuses: {}",
        action.as_str(),
        allowed.join(", ")
    )))
}

/// The status a project lands in after `action` fires from `current`.
pub fn next_status(action: WorkflowAction, current: ProjectStatus) -> ProjectStatus {
    rule_for(action).next.unwrap_or(current)
}

// ---------------------------------------------------------------------------
// Progress and supervision bounds
// ---------------------------------------------------------------------------

/// Lowest progress stage.
pub const MIN_PROGRESS_STAGE: i32 = 0;
/// Highest progress stage.
pub const MAX_PROGRESS_STAGE: i32 = 5;
/// Reaching this stage completes the project.
pub const COMPLETING_PROGRESS_STAGE: i32 = 5;

/// Validate a progress stage value.
pub fn validate_progress_stage(stage: i32) -> Result<(), CoreError> {
    if !(MIN_PROGRESS_STAGE..=MAX_PROGRESS_STAGE).contains(&stage) {
        return Err(CoreError::Validation(format!(
            "Progress stage must be between {MIN_PROGRESS_STAGE} and {MAX_PROGRESS_STAGE} (got {stage})"
        )));
    }
    Ok(())
}

/// Validate a supervision report week number against the project's target.
pub fn validate_week_number(week: i32, weeks_target: Option<i32>) -> Result<(), CoreError> {
    if week < 1 {
        return Err(CoreError::Validation(format!(
            "Week number must be at least 1 (got {week})"
        )));
    }
    match weeks_target {
        None => Err(CoreError::Validation(
            "Project has no supervision weeks target set".to_string(),
        )),
        Some(target) if week > target => Err(CoreError::Validation(format!(
            "Week number {week} exceeds the supervision weeks target of {target}"
        ))),
        Some(_) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_round_trip() {
        for s in ProjectStatus::ALL {
            let parsed = ProjectStatus::from_str(s).unwrap_or_else(|| panic!("'{s}' must parse"));
            assert_eq!(parsed.as_str(), *s);
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert!(ProjectStatus::from_str("In progress").is_none());
        assert!(ProjectStatus::from_str("").is_none());
        assert!(validate_status("Approved").is_err());
    }

    #[test]
    fn new_requests_start_pending_office_approval() {
        assert_eq!(INITIAL_STATUS.as_str(), "Pending Office Approval");
    }

    #[test]
    fn every_action_has_exactly_one_rule() {
        let actions = [
            WorkflowAction::ApproveRequest,
            WorkflowAction::RejectRequest,
            WorkflowAction::SubmitFinalDetails,
            WorkflowAction::ProposePayment,
            WorkflowAction::SubmitPayment,
            WorkflowAction::UploadFinalDeliverable,
            WorkflowAction::AdvanceProgress,
            WorkflowAction::RequestSupervision,
            WorkflowAction::ApproveSupervision,
            WorkflowAction::RejectSupervision,
            WorkflowAction::SubmitSupervisionReport,
        ];
        for action in actions {
            let count = TRANSITION_RULES.iter().filter(|r| r.action == action).count();
            assert_eq!(count, 1, "action {action:?} must have exactly one rule");
        }
        assert_eq!(TRANSITION_RULES.len(), actions.len());
    }

    #[test]
    fn completed_is_never_a_legal_source() {
        for rule in TRANSITION_RULES {
            assert!(
                !rule.sources.contains(&Completed),
                "completed projects must not transition via {:?}",
                rule.action
            );
        }
    }

    #[test]
    fn respond_only_from_pending_office_approval() {
        assert!(check_source(WorkflowAction::ApproveRequest, PendingOfficeApproval).is_ok());
        assert!(check_source(WorkflowAction::RejectRequest, PendingOfficeApproval).is_ok());
        assert!(check_source(WorkflowAction::ApproveRequest, OfficeApproved).is_err());
        assert!(check_source(WorkflowAction::RejectRequest, InProgress).is_err());
    }

    #[test]
    fn respond_moves_to_approved_or_rejected() {
        assert_eq!(
            next_status(WorkflowAction::ApproveRequest, PendingOfficeApproval),
            OfficeApproved
        );
        assert_eq!(
            next_status(WorkflowAction::RejectRequest, PendingOfficeApproval),
            OfficeRejected
        );
    }

    #[test]
    fn final_details_only_after_office_approval() {
        assert!(check_source(WorkflowAction::SubmitFinalDetails, OfficeApproved).is_ok());
        assert!(check_source(WorkflowAction::SubmitFinalDetails, PendingOfficeApproval).is_err());
        assert!(check_source(WorkflowAction::SubmitFinalDetails, DetailsSubmitted).is_err());
        assert_eq!(
            next_status(WorkflowAction::SubmitFinalDetails, OfficeApproved),
            DetailsSubmitted
        );
    }

    #[test]
    fn propose_payment_sources_include_supervision() {
        // The permissive superset: offices may re-propose, and may invoice
        // an ongoing supervision engagement.
        for status in [
            DetailsSubmitted,
            AwaitingPaymentProposal,
            PaymentProposalSent,
            UnderOfficeSupervision,
        ] {
            assert!(check_source(WorkflowAction::ProposePayment, status).is_ok());
        }
        assert!(check_source(WorkflowAction::ProposePayment, PendingOfficeApproval).is_err());
        assert!(check_source(WorkflowAction::ProposePayment, Completed).is_err());
    }

    #[test]
    fn payment_accepted_only_after_proposal() {
        assert!(check_source(WorkflowAction::SubmitPayment, PaymentProposalSent).is_ok());
        assert!(check_source(WorkflowAction::SubmitPayment, AwaitingUserPayment).is_ok());
        assert!(check_source(WorkflowAction::SubmitPayment, DetailsSubmitted).is_err());
        assert_eq!(next_status(WorkflowAction::SubmitPayment, PaymentProposalSent), InProgress);
    }

    #[test]
    fn final_deliverable_completes_the_project() {
        assert!(check_source(WorkflowAction::UploadFinalDeliverable, InProgress).is_ok());
        assert!(check_source(WorkflowAction::UploadFinalDeliverable, Completed).is_err());
        assert_eq!(next_status(WorkflowAction::UploadFinalDeliverable, InProgress), Completed);
    }

    #[test]
    fn progress_updates_leave_status_unchanged() {
        assert!(check_source(WorkflowAction::AdvanceProgress, InProgress).is_ok());
        assert_eq!(next_status(WorkflowAction::AdvanceProgress, InProgress), InProgress);
    }

    #[test]
    fn supervision_can_be_rerequested_after_rejection() {
        assert!(check_source(WorkflowAction::RequestSupervision, SupervisionRejected).is_ok());
    }

    #[test]
    fn supervision_request_blocked_once_in_progress() {
        assert!(check_source(WorkflowAction::RequestSupervision, InProgress).is_err());
        assert!(check_source(WorkflowAction::RequestSupervision, Completed).is_err());
        assert!(check_source(WorkflowAction::RequestSupervision, UnderOfficeSupervision).is_err());
    }

    #[test]
    fn supervision_response_only_while_pending() {
        assert!(check_source(WorkflowAction::ApproveSupervision, PendingSupervisionApproval).is_ok());
        assert!(check_source(WorkflowAction::RejectSupervision, PendingSupervisionApproval).is_ok());
        assert!(check_source(WorkflowAction::ApproveSupervision, UnderOfficeSupervision).is_err());
        assert_eq!(
            next_status(WorkflowAction::ApproveSupervision, PendingSupervisionApproval),
            UnderOfficeSupervision
        );
        assert_eq!(
            next_status(WorkflowAction::RejectSupervision, PendingSupervisionApproval),
            SupervisionRejected
        );
    }

    #[test]
    fn weekly_reports_only_under_supervision() {
        assert!(check_source(WorkflowAction::SubmitSupervisionReport, UnderOfficeSupervision).is_ok());
        assert!(check_source(WorkflowAction::SubmitSupervisionReport, PendingSupervisionApproval).is_err());
        assert_eq!(
            next_status(WorkflowAction::SubmitSupervisionReport, UnderOfficeSupervision),
            UnderOfficeSupervision
        );
    }

    #[test]
    fn actor_requirements_match_the_table() {
        assert_eq!(required_actor(WorkflowAction::ApproveRequest), RequiredActor::DesignOffice);
        assert_eq!(required_actor(WorkflowAction::SubmitFinalDetails), RequiredActor::Owner);
        assert_eq!(required_actor(WorkflowAction::SubmitPayment), RequiredActor::Owner);
        assert_eq!(
            required_actor(WorkflowAction::ApproveSupervision),
            RequiredActor::SupervisingOffice
        );
        assert_eq!(
            required_actor(WorkflowAction::SubmitSupervisionReport),
            RequiredActor::SupervisingOffice
        );
    }

    #[test]
    fn progress_stage_bounds() {
        assert!(validate_progress_stage(0).is_ok());
        assert!(validate_progress_stage(5).is_ok());
        assert!(validate_progress_stage(-1).is_err());
        assert!(validate_progress_stage(6).is_err());
    }

    #[test]
    fn week_number_bounds() {
        assert!(validate_week_number(1, Some(12)).is_ok());
        assert!(validate_week_number(12, Some(12)).is_ok());
        assert!(validate_week_number(0, Some(12)).is_err());
        assert!(validate_week_number(13, Some(12)).is_err());
        assert!(validate_week_number(1, None).is_err());
    }
}
