//! Subscription error types.

use thiserror::Error;
use uuid::Uuid;

use crate::subscription::types::SubscriptionStatus;

/// Errors that can occur during subscription operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// Attempted an invalid status transition.
    #[error("Invalid subscription transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: SubscriptionStatus,
        /// The attempted target status.
        to: SubscriptionStatus,
    },

    /// Rejection note is required but not provided.
    #[error("Rejection note is required")]
    RejectionNoteRequired,

    /// Cancellation note is required but not provided.
    #[error("Cancellation note is required")]
    CancellationNoteRequired,

    /// Subscription not found.
    #[error("Subscription {0} not found")]
    SubscriptionNotFound(Uuid),

    /// Product price not found.
    #[error("Product price {0} not found")]
    ProductPriceNotFound(Uuid),

    /// Subscriber user not found.
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    /// The product price carries a non-positive billing cycle.
    #[error("Invalid billing cycle of {0} months")]
    InvalidBillingCycle(i32),

    /// A derived schedule date fell outside the representable range.
    #[error("Billing schedule date out of range")]
    ScheduleOutOfRange,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl SubscriptionError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::InvalidBillingCycle(_) => 422,
            Self::RejectionNoteRequired | Self::CancellationNoteRequired => 400,
            Self::SubscriptionNotFound(_)
            | Self::ProductPriceNotFound(_)
            | Self::UserNotFound(_) => 404,
            Self::ScheduleOutOfRange | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionNoteRequired => "REJECTION_NOTE_REQUIRED",
            Self::CancellationNoteRequired => "CANCELLATION_NOTE_REQUIRED",
            Self::SubscriptionNotFound(_) => "SUBSCRIPTION_NOT_FOUND",
            Self::ProductPriceNotFound(_) => "PRODUCT_PRICE_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::InvalidBillingCycle(_) => "INVALID_BILLING_CYCLE",
            Self::ScheduleOutOfRange => "SCHEDULE_OUT_OF_RANGE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = SubscriptionError::InvalidTransition {
            from: SubscriptionStatus::Approved,
            to: SubscriptionStatus::Approved,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_note_required_errors() {
        assert_eq!(SubscriptionError::RejectionNoteRequired.status_code(), 400);
        assert_eq!(
            SubscriptionError::RejectionNoteRequired.error_code(),
            "REJECTION_NOTE_REQUIRED"
        );
        assert_eq!(
            SubscriptionError::CancellationNoteRequired.error_code(),
            "CANCELLATION_NOTE_REQUIRED"
        );
    }

    #[test]
    fn test_not_found_errors() {
        assert_eq!(
            SubscriptionError::SubscriptionNotFound(Uuid::nil()).status_code(),
            404
        );
        assert_eq!(
            SubscriptionError::UserNotFound(Uuid::nil()).error_code(),
            "USER_NOT_FOUND"
        );
    }

    #[test]
    fn test_invalid_billing_cycle_error() {
        let err = SubscriptionError::InvalidBillingCycle(0);
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_BILLING_CYCLE");
    }
}
