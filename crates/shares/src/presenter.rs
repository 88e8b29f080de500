//! Rendering into named display slots.

use std::collections::BTreeMap;
use std::sync::RwLock;

use shares_core::{DisplaySlots, ExtremumPoint, Presenter, RenderTarget};
use tracing::trace;

/// Writes entity name and max/min pair into five named slots of a target.
#[derive(Debug)]
pub struct SlotPresenter<T> {
    slots: DisplaySlots,
    target: T,
}

impl<T: RenderTarget> SlotPresenter<T> {
    /// Create a presenter writing to `target` under the given slot identifiers.
    pub fn new(slots: DisplaySlots, target: T) -> Self {
        Self { slots, target }
    }

    /// The render target.
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: RenderTarget> Presenter for SlotPresenter<T> {
    fn render(&self, entity_name: &str, max: &ExtremumPoint, min: &ExtremumPoint) {
        trace!(entity = entity_name, "Rendering snapshot");
        self.target.set_text(&self.slots.entity_name, entity_name);
        self.target
            .set_text(&self.slots.max_value, &format_number(max.val));
        self.target.set_text(&self.slots.max_fiscal_year, &max.fy);
        self.target
            .set_text(&self.slots.min_value, &format_number(min.val));
        self.target.set_text(&self.slots.min_fiscal_year, &min.fy);
    }
}

/// In-process text slots.
///
/// Stands in for a host UI: slots start empty and hold whatever was last
/// written to them.
#[derive(Debug, Default)]
pub struct TextSlots {
    texts: RwLock<BTreeMap<String, String>>,
}

impl TextSlots {
    /// Create an empty set of slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of `slot`, or `None` if it was never written.
    pub fn get(&self, slot: &str) -> Option<String> {
        self.texts.read().ok()?.get(slot).cloned()
    }

    /// Copy of every written slot.
    pub fn texts(&self) -> BTreeMap<String, String> {
        self.texts
            .read()
            .map(|texts| texts.clone())
            .unwrap_or_default()
    }
}

impl RenderTarget for TextSlots {
    fn set_text(&self, slot: &str, text: &str) {
        if let Ok(mut texts) = self.texts.write() {
            texts.insert(slot.to_string(), text.to_string());
        }
    }
}

/// Formats a number the way a browser's `textContent` would show it.
///
/// Integral values print without a fractional part, very large and very
/// small magnitudes use exponent notation with an explicit sign.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    value.to_string()
}
