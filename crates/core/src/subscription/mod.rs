//! Subscription approval workflow and billing schedules.
//!
//! A subscription is created in `pending_approval` (from an accepted offer
//! or a self-apply) and moves through:
//! - PendingApproval → Approved (approve)
//! - PendingApproval → Rejected (reject, note required)
//! - Active → Cancelled (cancel, note required)
//!
//! Approved → Active is performed by the external billing activation
//! process; no operation in this crate makes that transition.

pub mod error;
pub mod schedule;
pub mod service;
pub mod types;

pub use error::SubscriptionError;
pub use schedule::BillingSchedule;
pub use service::SubscriptionService;
pub use types::{BillingCycle, SubscriptionAction, SubscriptionStatus};
