//! Billing schedule derivation.
//!
//! Two observed creation paths compute the next billing date differently and
//! are kept distinct rather than unified:
//! - offer-driven: `next_billing_date = start + 1 month` regardless of the
//!   billing cycle (historical behavior, flagged for clarification);
//! - self-apply: `next_billing_date = start + cycle months` (cycle-aware).
//!
//! Month arithmetic clamps the day to the destination month's length
//! (Jan 31 + 1 month = Feb 28/29).

use chrono::{Months, NaiveDate};

use crate::subscription::types::BillingCycle;

/// Derived subscription billing dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingSchedule {
    /// First day of the subscription.
    pub start_date: NaiveDate,
    /// Last day of the current term (`start + cycle months`).
    pub end_date: NaiveDate,
    /// Date of the next billing run.
    pub next_billing_date: NaiveDate,
}

impl BillingSchedule {
    /// Schedule for a subscription created from an accepted offer.
    ///
    /// The next billing date uses a fixed one-month lookahead regardless of
    /// the billing cycle. This mirrors the observed offer path and
    /// intentionally differs from [`Self::self_apply`].
    ///
    /// Returns `None` only when a date falls outside chrono's range.
    #[must_use]
    pub fn offer_driven(start_date: NaiveDate, cycle: BillingCycle) -> Option<Self> {
        Some(Self {
            start_date,
            end_date: add_months(start_date, cycle.months())?,
            next_billing_date: add_months(start_date, 1)?,
        })
    }

    /// Schedule for a subscription a user applied for directly.
    ///
    /// The next billing date is cycle-aware: `start + cycle months`.
    #[must_use]
    pub fn self_apply(start_date: NaiveDate, cycle: BillingCycle) -> Option<Self> {
        let term_end = add_months(start_date, cycle.months())?;
        Some(Self {
            start_date,
            end_date: term_end,
            next_billing_date: term_end,
        })
    }
}

/// Adds whole months to a date, clamping the day to the target month.
fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
