//! Balance posting, reversal, and edit planning.
//!
//! All functions are pure: they take balances in and return new balances,
//! so the repository layer can execute the result inside one database
//! transaction with the wallet rows locked.

use rust_decimal::Decimal;

use crate::ledger::error::LedgerError;
use crate::ledger::types::{Entry, EntryKind};

/// Applies a new entry to a balance.
///
/// A debit fails when `amount > balance` (exact decimal comparison, no
/// epsilon); a credit is unconditional.
///
/// # Errors
/// * `LedgerError::NonPositiveAmount` if the amount is zero or negative
/// * `LedgerError::InsufficientBalance` if a debit exceeds the balance
pub fn post(balance: Decimal, kind: EntryKind, amount: Decimal) -> Result<Decimal, LedgerError> {
    check_positive(amount)?;

    match kind {
        EntryKind::Credit => Ok(balance + amount),
        EntryKind::Debit => {
            if amount > balance {
                Err(LedgerError::InsufficientBalance {
                    requested: amount,
                    available: balance,
                })
            } else {
                Ok(balance - amount)
            }
        }
    }
}

/// Removes an existing entry's effect from a balance.
///
/// The inverse of [`post`]: reversing a debit adds the amount back,
/// reversing a credit subtracts it. No overdraft check applies; the entry
/// being reversed already passed its check when it was posted.
///
/// # Errors
/// * `LedgerError::NonPositiveAmount` if the amount is zero or negative
pub fn reverse(balance: Decimal, kind: EntryKind, amount: Decimal) -> Result<Decimal, LedgerError> {
    check_positive(amount)?;

    match kind {
        EntryKind::Credit => Ok(balance - amount),
        EntryKind::Debit => Ok(balance + amount),
    }
}

/// Resulting balances of an edit, ready to persist atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    /// New balance of the entry's original wallet.
    pub source_balance: Decimal,
    /// New balance of the destination wallet when the entry moved wallets;
    /// `None` when the destination is the original wallet (its final value
    /// is `source_balance`).
    pub destination_balance: Option<Decimal>,
}

/// Plans an edit of an existing entry.
///
/// Reverses the original entry on its wallet, then applies the new entry to
/// the destination. When the destination is the original wallet the new
/// entry is applied to the already-reversed balance, never to a stale read.
/// The overdraft check for a new debit runs against the destination's
/// post-reversal balance.
///
/// # Arguments
/// * `original` - The entry's current (kind, amount)
/// * `source_balance` - Current balance of the entry's wallet
/// * `destination_balance` - Current balance of the new wallet, or `None`
///   when the entry stays on its original wallet
/// * `new` - The entry's new (kind, amount)
///
/// # Errors
/// * `LedgerError::NonPositiveAmount` if either amount is not positive
/// * `LedgerError::InsufficientBalance` if the new debit exceeds the
///   destination's balance (nothing is applied; the caller rolls back)
pub fn plan_edit(
    original: Entry,
    source_balance: Decimal,
    destination_balance: Option<Decimal>,
    new: Entry,
) -> Result<EditOutcome, LedgerError> {
    let reversed = reverse(source_balance, original.kind, original.amount)?;

    match destination_balance {
        // Entry stays on its wallet: apply on top of the reversal.
        None => Ok(EditOutcome {
            source_balance: post(reversed, new.kind, new.amount)?,
            destination_balance: None,
        }),
        // Entry moves wallets: the source only loses the original effect,
        // the destination only gains the new one.
        Some(dest) => Ok(EditOutcome {
            source_balance: reversed,
            destination_balance: Some(post(dest, new.kind, new.amount)?),
        }),
    }
}

fn check_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        Err(LedgerError::NonPositiveAmount(amount))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_post_credit() {
        assert_eq!(
            post(dec!(100), EntryKind::Credit, dec!(50)),
            Ok(dec!(150))
        );
    }

    #[test]
    fn test_post_debit_within_balance() {
        assert_eq!(post(dec!(100), EntryKind::Debit, dec!(100)), Ok(dec!(0)));
    }

    #[test]
    fn test_post_debit_overdraft_fails() {
        let result = post(dec!(100), EntryKind::Debit, dec!(100.01));
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                requested: dec!(100.01),
                available: dec!(100),
            })
        );
    }

    #[test]
    fn test_post_non_positive_amount_fails() {
        assert!(matches!(
            post(dec!(100), EntryKind::Credit, dec!(0)),
            Err(LedgerError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            post(dec!(100), EntryKind::Debit, dec!(-1)),
            Err(LedgerError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_worked_example_from_requirements() {
        // balance 500000, debit 200000 -> 300000; debit 400000 -> rejected.
        let balance = post(dec!(500000), EntryKind::Debit, dec!(200000)).unwrap();
        assert_eq!(balance, dec!(300000));

        let result = post(balance, EntryKind::Debit, dec!(400000));
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                requested: dec!(400000),
                available: dec!(300000),
            })
        );
    }

    #[test]
    fn test_reverse_is_inverse_of_post() {
        for kind in [EntryKind::Credit, EntryKind::Debit] {
            let posted = post(dec!(100), kind, dec!(40)).unwrap();
            assert_eq!(reverse(posted, kind, dec!(40)), Ok(dec!(100)));
        }
    }

    #[test]
    fn test_reverse_debit_has_no_overdraft_check() {
        // Reversing a credit may legitimately pass below zero mid-edit.
        assert_eq!(reverse(dec!(10), EntryKind::Credit, dec!(25)), Ok(dec!(-15)));
    }

    #[test]
    fn test_edit_same_wallet_debit_to_credit() {
        // (debit 100) -> (credit 50) must raise the balance by 150.
        let outcome = plan_edit(
            Entry::new(EntryKind::Debit, dec!(100)),
            dec!(1000),
            None,
            Entry::new(EntryKind::Credit, dec!(50)),
        )
        .unwrap();
        assert_eq!(outcome.source_balance, dec!(1150));
        assert_eq!(outcome.destination_balance, None);
    }

    #[test]
    fn test_edit_same_wallet_overdraft_checked_post_reversal() {
        // Balance 30 with an original credit of 100: reversal leaves -70,
        // so any new debit must fail.
        let result = plan_edit(
            Entry::new(EntryKind::Credit, dec!(100)),
            dec!(30),
            None,
            Entry::new(EntryKind::Debit, dec!(10)),
        );
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_edit_same_wallet_reversal_enables_larger_debit() {
        // Original debit 100 reversed first, so a debit of 150 fits in a
        // balance that currently reads 100.
        let outcome = plan_edit(
            Entry::new(EntryKind::Debit, dec!(100)),
            dec!(100),
            None,
            Entry::new(EntryKind::Debit, dec!(150)),
        )
        .unwrap();
        assert_eq!(outcome.source_balance, dec!(50));
    }

    #[test]
    fn test_edit_cross_wallet() {
        // Source only loses the original effect; destination only gains the
        // new one.
        let outcome = plan_edit(
            Entry::new(EntryKind::Debit, dec!(100)),
            dec!(400),
            Some(dec!(50)),
            Entry::new(EntryKind::Credit, dec!(70)),
        )
        .unwrap();
        assert_eq!(outcome.source_balance, dec!(500));
        assert_eq!(outcome.destination_balance, Some(dec!(120)));
    }

    #[test]
    fn test_edit_cross_wallet_overdraft_on_destination() {
        let result = plan_edit(
            Entry::new(EntryKind::Credit, dec!(100)),
            dec!(400),
            Some(dec!(50)),
            Entry::new(EntryKind::Debit, dec!(60)),
        );
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                requested: dec!(60),
                available: dec!(50),
            })
        );
    }
}
