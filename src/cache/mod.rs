//! Cache module for persisting HTTP responses to disk
//!
//! This module provides a key-value store that keeps every fetched response
//! in one JSON file, plus a builder for deterministic request keys. Entries
//! have no expiry; once a response is cached it is served forever, which is
//! what lets repeated interactive sessions avoid redundant network calls.

mod key;
mod store;

pub use key::request_key;
pub use store::CacheStore;
