//! Core types and shared functionality for legisync.
//!
//! This crate provides:
//! - The legislative data model (bills, representatives, lookup results)
//! - Unified error types
//! - Layered configuration
//! - In-process TTL caches
//! - Durable SQLite store with migrations

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use cache::{KeyedTtlCache, TtlCache};
pub use config::AppConfig;
pub use error::Error;
pub use model::{Bill, BillAction, BillDetail, BillDocuments, LookupResult, Official, Representative};
pub use store::StoreDb;
