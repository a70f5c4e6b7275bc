//! Subscription domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Subscription status in the billing lifecycle.
///
/// The valid transitions are:
/// - PendingApproval → Approved (approve)
/// - PendingApproval → Rejected (reject)
/// - Active → Cancelled (cancel)
///
/// Approved → Active belongs to the external billing activation process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Awaiting a back-office approval decision.
    PendingApproval,
    /// Approved, awaiting activation by the billing process.
    Approved,
    /// Rejected during approval (terminal).
    Rejected,
    /// Actively billing.
    Active,
    /// Cancelled by request (terminal).
    Cancelled,
}

impl SubscriptionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the approval decision has been made.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::PendingApproval)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Billing recurrence interval, in whole months.
///
/// Stored as a month count so quarterly/semiannual/annual cycles share one
/// representation; zero is not a valid cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycle(u32);

impl BillingCycle {
    /// Monthly cycle.
    pub const MONTHLY: Self = Self(1);
    /// Quarterly cycle.
    pub const QUARTERLY: Self = Self(3);
    /// Semiannual cycle.
    pub const SEMIANNUAL: Self = Self(6);
    /// Annual cycle.
    pub const ANNUAL: Self = Self(12);

    /// Creates a cycle from a month count; `None` if zero.
    #[must_use]
    pub fn from_months(months: u32) -> Option<Self> {
        if months == 0 { None } else { Some(Self(months)) }
    }

    /// Returns the cycle length in months.
    #[must_use]
    pub const fn months(self) -> u32 {
        self.0
    }
}

/// Subscription state transition with audit data.
#[derive(Debug, Clone)]
pub enum SubscriptionAction {
    /// Approve a pending subscription.
    Approve {
        /// The new status after approval.
        new_status: SubscriptionStatus,
        /// The user who approved the subscription.
        approved_by: Uuid,
        /// When the subscription was approved.
        approved_at: DateTime<Utc>,
        /// Optional note from the approver.
        approval_note: Option<String>,
    },
    /// Reject a pending subscription.
    Reject {
        /// The new status after rejection.
        new_status: SubscriptionStatus,
        /// The mandatory rejection justification.
        rejection_note: String,
        /// When the subscription was rejected.
        rejected_at: DateTime<Utc>,
    },
    /// Cancel an active subscription.
    Cancel {
        /// The new status after cancellation.
        new_status: SubscriptionStatus,
        /// The mandatory cancellation justification.
        cancellation_note: String,
        /// When the subscription was cancelled.
        cancelled_at: DateTime<Utc>,
    },
}

impl SubscriptionAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> SubscriptionStatus {
        match self {
            Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Cancel { new_status, .. } => *new_status,
        }
    }
}
