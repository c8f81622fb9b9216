//! Arby-X Live Core Library
//!
//! This crate provides the snapshot reconciliation engine behind the live
//! comparison ticker: change detection, staleness classification,
//! last-known-good fallback and auto-expiring highlights.

pub mod config;
pub mod error;
pub mod feed;
pub mod highlight;
#[cfg(feature = "http")]
pub mod http;
pub mod reconcile;
pub mod types;


pub use error::*;
pub use types::*;
