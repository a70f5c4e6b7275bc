//! Ledger domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Adds to the wallet balance.
    Credit,
    /// Subtracts from the wallet balance; checked against the balance.
    Debit,
}

impl EntryKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (kind, amount) pair describing one ledger entry's balance effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Credit or debit.
    pub kind: EntryKind,
    /// Strictly positive amount.
    pub amount: Decimal,
}

impl Entry {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(kind: EntryKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(EntryKind::Credit.as_str(), "credit");
        assert_eq!(EntryKind::Debit.as_str(), "debit");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(EntryKind::parse("credit"), Some(EntryKind::Credit));
        assert_eq!(EntryKind::parse("DEBIT"), Some(EntryKind::Debit));
        assert_eq!(EntryKind::parse("transfer"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", EntryKind::Credit), "credit");
    }
}
