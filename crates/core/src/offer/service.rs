//! Offer state transition service.
//!
//! Both transitions guard ownership first: a descriptive failure with no
//! mutation when the acting user is not the offer's target user, then an
//! invalid-state failure unless the offer is still pending.

use chrono::Utc;
use uuid::Uuid;

use crate::offer::error::OfferError;
use crate::offer::types::{OfferAction, OfferStatus};

/// Stateless service for offer lifecycle transitions.
pub struct OfferService;

impl OfferService {
    /// Accept a pending offer.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the offer
    /// * `offer_user_id` - The offer's target user (the lead)
    /// * `acting_user_id` - The user performing the action
    ///
    /// # Returns
    /// * `Ok(OfferAction::Accept)` if the transition is valid
    /// * `Err(OfferError::NotOfferOwner)` if the acting user is not the target
    /// * `Err(OfferError::InvalidTransition)` if the offer is not pending
    pub fn accept(
        current_status: OfferStatus,
        offer_user_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<OfferAction, OfferError> {
        Self::check_owner(offer_user_id, acting_user_id)?;

        match current_status {
            OfferStatus::Pending => Ok(OfferAction::Accept {
                new_status: OfferStatus::Accepted,
                accepted_at: Utc::now(),
            }),
            _ => Err(OfferError::InvalidTransition {
                from: current_status,
                to: OfferStatus::Accepted,
            }),
        }
    }

    /// Reject a pending offer.
    ///
    /// Symmetric to [`accept`](Self::accept) but produces no subscription.
    pub fn reject(
        current_status: OfferStatus,
        offer_user_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<OfferAction, OfferError> {
        Self::check_owner(offer_user_id, acting_user_id)?;

        match current_status {
            OfferStatus::Pending => Ok(OfferAction::Reject {
                new_status: OfferStatus::Rejected,
            }),
            _ => Err(OfferError::InvalidTransition {
                from: current_status,
                to: OfferStatus::Rejected,
            }),
        }
    }

    fn check_owner(offer_user_id: Uuid, acting_user_id: Uuid) -> Result<(), OfferError> {
        if offer_user_id == acting_user_id {
            Ok(())
        } else {
            Err(OfferError::NotOfferOwner {
                user_id: acting_user_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_pending_offer() {
        let user = Uuid::new_v4();
        let result = OfferService::accept(OfferStatus::Pending, user, user);
        assert!(result.is_ok());
        let action = result.unwrap();
        assert_eq!(action.new_status(), OfferStatus::Accepted);
        assert!(matches!(action, OfferAction::Accept { .. }));
    }

    #[test]
    fn test_accept_decided_offer_fails() {
        let user = Uuid::new_v4();
        for status in [OfferStatus::Accepted, OfferStatus::Rejected] {
            let result = OfferService::accept(status, user, user);
            assert!(matches!(result, Err(OfferError::InvalidTransition { .. })));
        }
    }

    #[test]
    fn test_accept_by_non_owner_fails() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let result = OfferService::accept(OfferStatus::Pending, owner, other);
        assert!(matches!(result, Err(OfferError::NotOfferOwner { .. })));
    }

    #[test]
    fn test_ownership_checked_before_status() {
        // A non-owner must get a forbidden error even on a decided offer.
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let result = OfferService::accept(OfferStatus::Accepted, owner, other);
        assert!(matches!(result, Err(OfferError::NotOfferOwner { .. })));
    }

    #[test]
    fn test_reject_pending_offer() {
        let user = Uuid::new_v4();
        let result = OfferService::reject(OfferStatus::Pending, user, user);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), OfferStatus::Rejected);
    }

    #[test]
    fn test_reject_decided_offer_fails() {
        let user = Uuid::new_v4();
        let result = OfferService::reject(OfferStatus::Rejected, user, user);
        assert!(matches!(result, Err(OfferError::InvalidTransition { .. })));
    }

    #[test]
    fn test_reject_by_non_owner_fails() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let result = OfferService::reject(OfferStatus::Pending, owner, other);
        assert!(matches!(result, Err(OfferError::NotOfferOwner { .. })));
    }
}
