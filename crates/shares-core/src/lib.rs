#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/shares/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the shares-outstanding pipeline.
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - [`ExtremumProcessor`](processor::ExtremumProcessor) - Validates, filters and reduces payloads
//! - [`SnapshotStore`](store::SnapshotStore) - Persists the last processed result
//! - [`StorageBackend`](store::StorageBackend) - Key/value storage abstraction
//! - [`DisclosureSource`](source::DisclosureSource) - Remote payload source
//! - [`Presenter`](source::Presenter) - Display abstraction
//! - [`PipelineConfig`](config::PipelineConfig) - Explicit pipeline configuration

/// Pipeline configuration.
pub mod config;
/// Error types for pipeline operations.
pub mod error;
/// Payload validation and max/min reduction.
pub mod processor;
/// Collaborator traits (remote source, presenter, render target).
pub mod source;
/// Snapshot persistence.
pub mod store;
/// Core data types (Snapshot, ExtremumPoint, Observation, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DisplaySlots, PipelineConfig};
pub use error::{Result, SharesError};
pub use processor::ExtremumProcessor;
pub use source::{DisclosureSource, Presenter, RenderTarget};
pub use store::{SnapshotStore, StorageBackend};
pub use types::{
    DisclosurePayload, DisclosureUnits, ExtremumPair, ExtremumPoint, Observation, Snapshot,
};
