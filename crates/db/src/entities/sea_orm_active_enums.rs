//! `SeaORM` active enums for database enum columns.
//!
//! Conversions to/from the `velora-core` domain enums live here so the
//! repositories can hand the core state machines plain domain values.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use velora_core::ledger::EntryKind as CoreEntryKind;
use velora_core::offer::OfferStatus as CoreOfferStatus;
use velora_core::subscription::SubscriptionStatus as CoreSubscriptionStatus;

/// Offer status column (`offer_status` postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "offer_status")]
pub enum OfferStatus {
    /// Offer awaits the lead's decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Offer was accepted.
    #[sea_orm(string_value = "accepted")]
    Accepted,
    /// Offer was declined.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Subscription status column (`subscription_status` postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subscription_status")]
pub enum SubscriptionStatus {
    /// Awaiting an approval decision.
    #[sea_orm(string_value = "pending_approval")]
    PendingApproval,
    /// Approved, awaiting billing activation.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected during approval.
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Actively billing.
    #[sea_orm(string_value = "active")]
    Active,
    /// Cancelled by request.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Wallet transaction kind column (`entry_kind` postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
pub enum EntryKind {
    /// Adds to the wallet balance.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Subtracts from the wallet balance.
    #[sea_orm(string_value = "debit")]
    Debit,
}

impl From<OfferStatus> for CoreOfferStatus {
    fn from(status: OfferStatus) -> Self {
        match status {
            OfferStatus::Pending => Self::Pending,
            OfferStatus::Accepted => Self::Accepted,
            OfferStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<CoreOfferStatus> for OfferStatus {
    fn from(status: CoreOfferStatus) -> Self {
        match status {
            CoreOfferStatus::Pending => Self::Pending,
            CoreOfferStatus::Accepted => Self::Accepted,
            CoreOfferStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<SubscriptionStatus> for CoreSubscriptionStatus {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::PendingApproval => Self::PendingApproval,
            SubscriptionStatus::Approved => Self::Approved,
            SubscriptionStatus::Rejected => Self::Rejected,
            SubscriptionStatus::Active => Self::Active,
            SubscriptionStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<CoreSubscriptionStatus> for SubscriptionStatus {
    fn from(status: CoreSubscriptionStatus) -> Self {
        match status {
            CoreSubscriptionStatus::PendingApproval => Self::PendingApproval,
            CoreSubscriptionStatus::Approved => Self::Approved,
            CoreSubscriptionStatus::Rejected => Self::Rejected,
            CoreSubscriptionStatus::Active => Self::Active,
            CoreSubscriptionStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<EntryKind> for CoreEntryKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Credit => Self::Credit,
            EntryKind::Debit => Self::Debit,
        }
    }
}

impl From<CoreEntryKind> for EntryKind {
    fn from(kind: CoreEntryKind) -> Self {
        match kind {
            CoreEntryKind::Credit => Self::Credit,
            CoreEntryKind::Debit => Self::Debit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_status_roundtrip() {
        for status in [
            CoreOfferStatus::Pending,
            CoreOfferStatus::Accepted,
            CoreOfferStatus::Rejected,
        ] {
            let db: OfferStatus = status.into();
            assert_eq!(CoreOfferStatus::from(db), status);
        }
    }

    #[test]
    fn test_subscription_status_roundtrip() {
        for status in [
            CoreSubscriptionStatus::PendingApproval,
            CoreSubscriptionStatus::Approved,
            CoreSubscriptionStatus::Rejected,
            CoreSubscriptionStatus::Active,
            CoreSubscriptionStatus::Cancelled,
        ] {
            let db: SubscriptionStatus = status.into();
            assert_eq!(CoreSubscriptionStatus::from(db), status);
        }
    }

    #[test]
    fn test_entry_kind_roundtrip() {
        for kind in [CoreEntryKind::Credit, CoreEntryKind::Debit] {
            let db: EntryKind = kind.into();
            assert_eq!(CoreEntryKind::from(db), kind);
        }
    }
}
