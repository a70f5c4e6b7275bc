//! Property-based tests for wallet balance postings.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::posting::{plan_edit, post, reverse};
use super::types::{Entry, EntryKind};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an entry kind.
fn entry_kind() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Credit), Just(EntryKind::Debit)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Replaying any sequence of individually-valid postings yields
    /// `initial + Σcredits − Σdebits`; rejected debits leave the balance
    /// unchanged.
    #[test]
    fn prop_replay_matches_net_effect(
        initial in positive_amount(),
        entries in prop::collection::vec((entry_kind(), positive_amount()), 0..40),
    ) {
        let mut balance = initial;
        let mut net = Decimal::ZERO;

        for (kind, amount) in entries {
            match post(balance, kind, amount) {
                Ok(new_balance) => {
                    balance = new_balance;
                    match kind {
                        EntryKind::Credit => net += amount,
                        EntryKind::Debit => net -= amount,
                    }
                }
                Err(_) => {
                    // Rejected debit: no mutation.
                }
            }
        }

        prop_assert_eq!(balance, initial + net);
    }

    /// A balance never goes negative through valid postings.
    #[test]
    fn prop_balance_never_negative(
        initial in positive_amount(),
        entries in prop::collection::vec((entry_kind(), positive_amount()), 0..40),
    ) {
        let mut balance = initial;
        for (kind, amount) in entries {
            if let Ok(new_balance) = post(balance, kind, amount) {
                balance = new_balance;
            }
            prop_assert!(balance >= Decimal::ZERO);
        }
    }

    /// Reversal is the exact inverse of posting.
    #[test]
    fn prop_reverse_inverts_post(
        balance in positive_amount(),
        kind in entry_kind(),
        amount in positive_amount(),
    ) {
        if let Ok(posted) = post(balance, kind, amount) {
            prop_assert_eq!(reverse(posted, kind, amount), Ok(balance));
        }
    }

    /// A same-wallet edit nets out to reversal-then-post.
    #[test]
    fn prop_same_wallet_edit_nets_out(
        balance in positive_amount(),
        original_kind in entry_kind(),
        original_amount in positive_amount(),
        new_kind in entry_kind(),
        new_amount in positive_amount(),
    ) {
        let original = Entry::new(original_kind, original_amount);
        let new = Entry::new(new_kind, new_amount);

        if let Ok(outcome) = plan_edit(original, balance, None, new) {
            let reversed = reverse(balance, original_kind, original_amount).unwrap();
            let expected = post(reversed, new_kind, new_amount).unwrap();
            prop_assert_eq!(outcome.source_balance, expected);
            prop_assert!(outcome.destination_balance.is_none());
        }
    }

    /// A cross-wallet edit never applies the new effect to the source.
    #[test]
    fn prop_cross_wallet_edit_isolates_wallets(
        source in positive_amount(),
        dest in positive_amount(),
        original_kind in entry_kind(),
        original_amount in positive_amount(),
        new_kind in entry_kind(),
        new_amount in positive_amount(),
    ) {
        let original = Entry::new(original_kind, original_amount);
        let new = Entry::new(new_kind, new_amount);

        if let Ok(outcome) = plan_edit(original, source, Some(dest), new) {
            // Source balance reflects only the reversal.
            let reversed = reverse(source, original_kind, original_amount).unwrap();
            prop_assert_eq!(outcome.source_balance, reversed);

            // Destination reflects only the new posting.
            let applied = post(dest, new_kind, new_amount).unwrap();
            prop_assert_eq!(outcome.destination_balance, Some(applied));
        }
    }
}
