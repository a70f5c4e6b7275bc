//! Shared configuration for Velora.

pub mod config;

pub use config::{AppConfig, DatabaseConfig, LedgerConfig, ServerConfig};
