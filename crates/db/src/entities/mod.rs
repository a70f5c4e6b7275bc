//! `SeaORM` entity definitions.

pub mod offers;
pub mod product_prices;
pub mod sea_orm_active_enums;
pub mod subscriptions;
pub mod user_wallets;
pub mod users;
pub mod wallet_transactions;
