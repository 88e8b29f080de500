//! Collaborator traits for the pipeline.
//!
//! This module defines the capabilities the orchestrator is built from:
//!
//! - [`DisclosureSource`] - Fetches the raw disclosure payload for an identifier
//! - [`Presenter`] - Writes a result into the host's display slots
//! - [`RenderTarget`] - The host's write-only text surface

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

use crate::{error::Result, types::ExtremumPoint};

/// Source of raw disclosure payloads.
///
/// Implementations issue exactly one request per call; retry policy belongs to
/// the caller.
#[async_trait]
pub trait DisclosureSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches the raw disclosure payload for `identifier`.
    ///
    /// The identifier is passed through to the remote service unchanged.
    async fn fetch_disclosure(&self, identifier: &str) -> Result<Value>;
}

/// Writes an entity name and its max/min pair into the display.
///
/// Rendering never fails; any conversion to display text happens here.
pub trait Presenter: Send + Sync + Debug {
    /// Renders the given values.
    fn render(&self, entity_name: &str, max: &ExtremumPoint, min: &ExtremumPoint);
}

/// A write-only surface of named text slots owned by the host.
pub trait RenderTarget: Send + Sync + Debug {
    /// Replaces the text content of `slot`.
    fn set_text(&self, slot: &str, text: &str);
}

impl<T: RenderTarget + ?Sized> RenderTarget for Arc<T> {
    fn set_text(&self, slot: &str, text: &str) {
        (**self).set_text(slot, text);
    }
}
