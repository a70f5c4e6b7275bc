//! Offer lifecycle logic.
//!
//! An offer extended to a lead starts `pending` and transitions exactly once
//! to `accepted` or `rejected`; it is immutable afterward. Acceptance is the
//! event that spawns a subscription (handled by the persistence layer using
//! the action produced here).

pub mod error;
pub mod service;
pub mod types;

pub use error::OfferError;
pub use service::OfferService;
pub use types::{OfferAction, OfferStatus};
