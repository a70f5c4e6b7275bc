//! Offer error types.

use thiserror::Error;
use uuid::Uuid;

use crate::offer::types::OfferStatus;

/// Errors that can occur during offer operations.
#[derive(Debug, Error)]
pub enum OfferError {
    /// Attempted an invalid status transition.
    #[error("Invalid offer transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: OfferStatus,
        /// The attempted target status.
        to: OfferStatus,
    },

    /// The acting user is not the offer's target user.
    #[error("User {user_id} is not the target of this offer")]
    NotOfferOwner {
        /// The user who attempted the action.
        user_id: Uuid,
    },

    /// Offer not found.
    #[error("Offer {0} not found")]
    OfferNotFound(Uuid),

    /// Product price not found.
    #[error("Product price {0} not found")]
    ProductPriceNotFound(Uuid),

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

impl OfferError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::InvalidBillingCycle(_) => 422,
            Self::NotOfferOwner { .. } => 403,
            Self::OfferNotFound(_) | Self::ProductPriceNotFound(_) => 404,
            Self::ScheduleOutOfRange | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotOfferOwner { .. } => "FORBIDDEN",
            Self::OfferNotFound(_) => "OFFER_NOT_FOUND",
            Self::ProductPriceNotFound(_) => "PRODUCT_PRICE_NOT_FOUND",
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
        let err = OfferError::InvalidTransition {
            from: OfferStatus::Accepted,
            to: OfferStatus::Rejected,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("accepted"));
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_not_owner_error() {
        let err = OfferError::NotOfferOwner {
            user_id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_not_found_errors() {
        assert_eq!(OfferError::OfferNotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(
            OfferError::ProductPriceNotFound(Uuid::nil()).error_code(),
            "PRODUCT_PRICE_NOT_FOUND"
        );
    }

    #[test]
    fn test_database_error() {
        let err = OfferError::Database("connection reset".into());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
