#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/shares/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Cache-first shares-outstanding pipeline.
//!
//! This crate wires the pieces together: it re-exports the core types and
//! storage backends, renders results into named display slots, resolves the
//! company identifier from a query string, and provides the [`Pipeline`]
//! orchestrator that renders the stored snapshot before fetching a fresh one.
//!
//! # Features
//!
//! - `edgar` - SEC EDGAR remote client and [`Pipeline::with_edgar`]
//! - `cache-sqlite` - SQLite-based durable storage
//!
//! # Example
//!
//! ```rust,ignore
//! use shares::{Pipeline, PipelineConfig, SlotPresenter, SqliteBackend, TextSlots};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> shares::Result<()> {
//!     let config = PipelineConfig::default();
//!     let slots = Arc::new(TextSlots::new());
//!     let pipeline = Pipeline::with_edgar(
//!         config.clone(),
//!         Arc::new(SqliteBackend::new("shares.sqlite")?),
//!         Arc::new(SlotPresenter::new(config.slots.clone(), slots.clone())),
//!     )?;
//!
//!     pipeline.run_with_query("?CIK=0000320193").await;
//!     println!("{:#?}", slots.texts());
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use shares_core::*;

// Storage backends
#[cfg(feature = "cache-sqlite")]
pub use shares_cache::SqliteBackend;
pub use shares_cache::{InMemoryBackend, NoopBackend};

// Remote client
#[cfg(feature = "edgar")]
pub use shares_edgar::EdgarClient;

mod identifier;
mod pipeline;
mod presenter;

pub use identifier::{query_param, resolve_identifier};
pub use pipeline::{Pipeline, RunReport};
pub use presenter::{SlotPresenter, TextSlots, format_number};
