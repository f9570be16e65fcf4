//! Parkscout Library
//!
//! This module exposes the cache, fetch, and data modules for use in
//! integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod fetch;
