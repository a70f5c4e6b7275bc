//! Repository abstractions for data access.

pub mod offer;
pub mod subscription;
pub mod wallet;

pub use offer::OfferRepository;
pub use subscription::SubscriptionRepository;
pub use wallet::WalletRepository;
