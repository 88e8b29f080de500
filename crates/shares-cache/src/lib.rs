#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/shares/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Storage backends for the snapshot store.
//!
//! This crate provides implementations of the [`StorageBackend`] trait from `shares-core`:
//!
//! - [`SqliteBackend`] - Persistent SQLite-based backend (default, requires `sqlite` feature)
//! - [`InMemoryBackend`] - Simple in-memory backend for testing
//! - [`NoopBackend`] - No-op backend that doesn't store anything

/// In-memory backend implementation.
pub mod memory;
/// No-op backend implementation.
pub mod noop;

/// SQLite-based backend implementation.
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the trait for convenience
pub use shares_core::StorageBackend;

// Re-export implementations
pub use memory::InMemoryBackend;
pub use noop::NoopBackend;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;
