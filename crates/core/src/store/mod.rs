//! Durable SQLite store for reconciled legislative records.
//!
//! Two tables with upsert-by-unique-key semantics: bills (unique bill
//! number) and representatives (unique canonical district). Reconcilers
//! apply one transaction per sync run; there is no deletion path.

pub mod bills;
pub mod connection;
pub mod migrations;
pub mod representatives;

pub use crate::Error;

pub use connection::StoreDb;
