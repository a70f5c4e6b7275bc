//! Subscription state transition service.
//!
//! Each transition requires the exact predecessor state; anything else is an
//! explanatory invalid-transition error, never a silent no-op.

use chrono::Utc;
use uuid::Uuid;

use crate::subscription::error::SubscriptionError;
use crate::subscription::types::{SubscriptionAction, SubscriptionStatus};

/// Stateless service for subscription workflow transitions.
pub struct SubscriptionService;

impl SubscriptionService {
    /// Approve a subscription awaiting approval.
    ///
    /// # Returns
    /// * `Ok(SubscriptionAction::Approve)` if the transition is valid
    /// * `Err(SubscriptionError::InvalidTransition)` if not pending approval
    pub fn approve(
        current_status: SubscriptionStatus,
        approved_by: Uuid,
        approval_note: Option<String>,
    ) -> Result<SubscriptionAction, SubscriptionError> {
        match current_status {
            SubscriptionStatus::PendingApproval => Ok(SubscriptionAction::Approve {
                new_status: SubscriptionStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
                approval_note,
            }),
            _ => Err(SubscriptionError::InvalidTransition {
                from: current_status,
                to: SubscriptionStatus::Approved,
            }),
        }
    }

    /// Reject a subscription awaiting approval.
    ///
    /// A non-empty justification is mandatory.
    ///
    /// # Returns
    /// * `Ok(SubscriptionAction::Reject)` if the transition is valid
    /// * `Err(SubscriptionError::RejectionNoteRequired)` if the note is empty
    /// * `Err(SubscriptionError::InvalidTransition)` if not pending approval
    pub fn reject(
        current_status: SubscriptionStatus,
        rejection_note: String,
    ) -> Result<SubscriptionAction, SubscriptionError> {
        if rejection_note.trim().is_empty() {
            return Err(SubscriptionError::RejectionNoteRequired);
        }

        match current_status {
            SubscriptionStatus::PendingApproval => Ok(SubscriptionAction::Reject {
                new_status: SubscriptionStatus::Rejected,
                rejection_note,
                rejected_at: Utc::now(),
            }),
            _ => Err(SubscriptionError::InvalidTransition {
                from: current_status,
                to: SubscriptionStatus::Rejected,
            }),
        }
    }

    /// Cancel an active subscription.
    ///
    /// A non-empty justification is mandatory.
    ///
    /// # Returns
    /// * `Ok(SubscriptionAction::Cancel)` if the transition is valid
    /// * `Err(SubscriptionError::CancellationNoteRequired)` if the note is empty
    /// * `Err(SubscriptionError::InvalidTransition)` if not active
    pub fn cancel(
        current_status: SubscriptionStatus,
        cancellation_note: String,
    ) -> Result<SubscriptionAction, SubscriptionError> {
        if cancellation_note.trim().is_empty() {
            return Err(SubscriptionError::CancellationNoteRequired);
        }

        match current_status {
            SubscriptionStatus::Active => Ok(SubscriptionAction::Cancel {
                new_status: SubscriptionStatus::Cancelled,
                cancellation_note,
                cancelled_at: Utc::now(),
            }),
            _ => Err(SubscriptionError::InvalidTransition {
                from: current_status,
                to: SubscriptionStatus::Cancelled,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - PendingApproval → Approved (approve)
    /// - PendingApproval → Rejected (reject)
    /// - Approved → Active (external billing activation)
    /// - Active → Cancelled (cancel)
    #[must_use]
    pub fn is_valid_transition(from: SubscriptionStatus, to: SubscriptionStatus) -> bool {
        matches!(
            (from, to),
            (
                SubscriptionStatus::PendingApproval,
                SubscriptionStatus::Approved | SubscriptionStatus::Rejected
            ) | (SubscriptionStatus::Approved, SubscriptionStatus::Active)
                | (SubscriptionStatus::Active, SubscriptionStatus::Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_approve_from_pending() {
        let approver = Uuid::new_v4();
        let result = SubscriptionService::approve(
            SubscriptionStatus::PendingApproval,
            approver,
            Some("looks good".to_string()),
        );
        assert!(result.is_ok());
        let action = result.unwrap();
        assert_eq!(action.new_status(), SubscriptionStatus::Approved);
        if let SubscriptionAction::Approve {
            approved_by,
            approval_note,
            ..
        } = action
        {
            assert_eq!(approved_by, approver);
            assert_eq!(approval_note.as_deref(), Some("looks good"));
        } else {
            panic!("expected approve action");
        }
    }

    #[test]
    fn test_approve_without_note() {
        let result =
            SubscriptionService::approve(SubscriptionStatus::PendingApproval, Uuid::new_v4(), None);
        assert!(result.is_ok());
    }

    #[rstest]
    #[case(SubscriptionStatus::Approved)]
    #[case(SubscriptionStatus::Rejected)]
    #[case(SubscriptionStatus::Active)]
    #[case(SubscriptionStatus::Cancelled)]
    fn test_approve_from_non_pending_fails(#[case] status: SubscriptionStatus) {
        let result = SubscriptionService::approve(status, Uuid::new_v4(), None);
        assert!(matches!(
            result,
            Err(SubscriptionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_from_pending() {
        let result = SubscriptionService::reject(
            SubscriptionStatus::PendingApproval,
            "incomplete billing details".to_string(),
        );
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), SubscriptionStatus::Rejected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_reject_blank_note_fails(#[case] note: &str) {
        let result =
            SubscriptionService::reject(SubscriptionStatus::PendingApproval, note.to_string());
        assert!(matches!(
            result,
            Err(SubscriptionError::RejectionNoteRequired)
        ));
    }

    #[rstest]
    #[case(SubscriptionStatus::Approved)]
    #[case(SubscriptionStatus::Rejected)]
    #[case(SubscriptionStatus::Active)]
    fn test_reject_from_non_pending_fails(#[case] status: SubscriptionStatus) {
        let result = SubscriptionService::reject(status, "note".to_string());
        assert!(matches!(
            result,
            Err(SubscriptionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_from_active() {
        let result = SubscriptionService::cancel(
            SubscriptionStatus::Active,
            "moving to a different plan".to_string(),
        );
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), SubscriptionStatus::Cancelled);
    }

    #[test]
    fn test_cancel_blank_note_fails() {
        let result = SubscriptionService::cancel(SubscriptionStatus::Active, "  ".to_string());
        assert!(matches!(
            result,
            Err(SubscriptionError::CancellationNoteRequired)
        ));
    }

    #[rstest]
    #[case(SubscriptionStatus::PendingApproval)]
    #[case(SubscriptionStatus::Approved)]
    #[case(SubscriptionStatus::Rejected)]
    #[case(SubscriptionStatus::Cancelled)]
    fn test_cancel_from_non_active_fails(#[case] status: SubscriptionStatus) {
        let result = SubscriptionService::cancel(status, "note".to_string());
        assert!(matches!(
            result,
            Err(SubscriptionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(SubscriptionService::is_valid_transition(
            SubscriptionStatus::PendingApproval,
            SubscriptionStatus::Approved
        ));
        assert!(SubscriptionService::is_valid_transition(
            SubscriptionStatus::PendingApproval,
            SubscriptionStatus::Rejected
        ));
        assert!(SubscriptionService::is_valid_transition(
            SubscriptionStatus::Approved,
            SubscriptionStatus::Active
        ));
        assert!(SubscriptionService::is_valid_transition(
            SubscriptionStatus::Active,
            SubscriptionStatus::Cancelled
        ));

        assert!(!SubscriptionService::is_valid_transition(
            SubscriptionStatus::PendingApproval,
            SubscriptionStatus::Active
        ));
        assert!(!SubscriptionService::is_valid_transition(
            SubscriptionStatus::Rejected,
            SubscriptionStatus::Approved
        ));
        assert!(!SubscriptionService::is_valid_transition(
            SubscriptionStatus::Cancelled,
            SubscriptionStatus::Active
        ));
    }
}
