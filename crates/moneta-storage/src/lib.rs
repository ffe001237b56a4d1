//! moneta-storage
//!
//! Persistence adapter for the tracker. The external store is an opaque
//! string-keyed value store; this crate serializes the tracker state into
//! four independently keyed values, sanitizes whatever comes back out, and
//! ships two concrete backends (in-memory and one-file-per-key).

pub mod adapter;
pub mod sanitize;
pub mod store;

pub use adapter::*;
pub use sanitize::*;
pub use store::*;
