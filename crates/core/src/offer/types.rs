//! Offer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offer status in the sales lifecycle.
///
/// The valid transitions are:
/// - Pending → Accepted (accept)
/// - Pending → Rejected (reject)
///
/// Accepted and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Offer awaits the lead's decision.
    Pending,
    /// Offer was accepted; a subscription has been created from it.
    Accepted,
    /// Offer was declined by the lead.
    Rejected,
}

impl OfferStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the offer has been decided (terminal state).
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Offer state transition with audit data.
#[derive(Debug, Clone)]
pub enum OfferAction {
    /// Accept a pending offer.
    Accept {
        /// The new status after acceptance.
        new_status: OfferStatus,
        /// When the offer was accepted.
        accepted_at: DateTime<Utc>,
    },
    /// Reject a pending offer.
    Reject {
        /// The new status after rejection.
        new_status: OfferStatus,
    },
}

impl OfferAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> OfferStatus {
        match self {
            Self::Accept { new_status, .. } | Self::Reject { new_status } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(OfferStatus::Pending.as_str(), "pending");
        assert_eq!(OfferStatus::Accepted.as_str(), "accepted");
        assert_eq!(OfferStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OfferStatus::parse("pending"), Some(OfferStatus::Pending));
        assert_eq!(OfferStatus::parse("ACCEPTED"), Some(OfferStatus::Accepted));
        assert_eq!(OfferStatus::parse("Rejected"), Some(OfferStatus::Rejected));
        assert_eq!(OfferStatus::parse("invalid"), None);
    }

    #[test]
    fn test_status_is_decided() {
        assert!(!OfferStatus::Pending.is_decided());
        assert!(OfferStatus::Accepted.is_decided());
        assert!(OfferStatus::Rejected.is_decided());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", OfferStatus::Pending), "pending");
    }
}
