//! Wallet balance arithmetic.
//!
//! A wallet's balance is a maintained running total, mutated exclusively
//! through credit/debit postings. This module provides the pure arithmetic:
//! - posting a new entry (with overdraft check on debits)
//! - reversing an existing entry
//! - planning an edit (reverse original, apply new, possibly cross-wallet)
//!
//! Persistence and locking are the repository layer's concern.

pub mod error;
pub mod posting;
pub mod types;

#[cfg(test)]
mod posting_props;

pub use error::LedgerError;
pub use posting::{EditOutcome, plan_edit, post, reverse};
pub use types::{Entry, EntryKind};
