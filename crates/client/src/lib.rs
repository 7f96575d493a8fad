//! Client code for legisync.
//!
//! This crate provides the HTTP page retriever, the markup parsers tuned to
//! the origin site's known layout, the address-to-representative resolver,
//! the sync reconcilers, and the fetch façade consumed by the rest of the
//! application.

pub mod facade;
pub mod fetch;
pub mod mock;
pub mod parse;
pub mod resolver;
pub mod sync;

pub use facade::{DataFetcher, Mode};
pub use fetch::{FetchClient, FetchConfig, PageFetcher};
pub use resolver::{Address, AddressResolver};
pub use sync::{SyncSummary, sync_bills, sync_representatives};
