//! Human-readable reference number generation.
//!
//! Offers and subscriptions carry globally-unique, human-readable numbers
//! (`OFR-…` / `SUB-…`). The suffix is derived from a fresh UUIDv4, so
//! uniqueness holds across instances without coordination; the database
//! additionally enforces it with a unique index.

use uuid::Uuid;

/// Length of the random suffix in characters.
const SUFFIX_LEN: usize = 8;

/// Generates a unique offer number, e.g. `OFR-9F3A01BC`.
#[must_use]
pub fn offer_number() -> String {
    format!("OFR-{}", suffix())
}

/// Generates a unique subscription number, e.g. `SUB-4D21E7F0`.
#[must_use]
pub fn subscription_number() -> String {
    format!("SUB-{}", suffix())
}

fn suffix() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..SUFFIX_LEN].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_number_format() {
        let number = offer_number();
        assert!(number.starts_with("OFR-"));
        assert_eq!(number.len(), 4 + SUFFIX_LEN);
        assert!(
            number[4..].chars().all(|c| c.is_ascii_hexdigit()),
            "suffix should be hex: {number}"
        );
        assert_eq!(number[4..], number[4..].to_uppercase());
    }

    #[test]
    fn test_subscription_number_format() {
        let number = subscription_number();
        assert!(number.starts_with("SUB-"));
        assert_eq!(number.len(), 4 + SUFFIX_LEN);
    }

    #[test]
    fn test_numbers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(subscription_number()), "duplicate number");
        }
    }
}
