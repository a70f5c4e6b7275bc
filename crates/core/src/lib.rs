//! Core business logic for Velora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, state machines, and calculations live here.
//!
//! # Modules
//!
//! - `offer` - Offer lifecycle (pending → accepted/rejected)
//! - `subscription` - Subscription approval workflow and billing schedules
//! - `ledger` - Wallet balance arithmetic for credit/debit postings
//! - `numbering` - Human-readable reference number generation

pub mod ledger;
pub mod numbering;
pub mod offer;
pub mod subscription;
