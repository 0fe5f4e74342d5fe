use std::collections::BTreeMap;

use crate::foundation::error::{HeroError, HeroResult};

/// Root margin in pixels; positive values grow the observed viewport, negative shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margins {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Margins {
    /// No margin.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };
}

/// Reveal behavior.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealOptions {
    /// Visible fraction at which a section counts as entered.
    pub threshold: f64,
    /// Clear the marker again when the section drops below the threshold.
    pub retrigger: bool,
    /// Adjustment applied to the viewport before measuring.
    pub root_margin: Margins,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            retrigger: false,
            root_margin: Margins::ZERO,
        }
    }
}

impl RevealOptions {
    /// Threshold must be in `(0, 1]`; margins must be finite.
    pub fn validate(&self) -> HeroResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > 1.0 {
            return Err(HeroError::reveal(format!(
                "threshold {} must be in (0, 1]",
                self.threshold
            )));
        }
        let m = self.root_margin;
        if ![m.top, m.right, m.bottom, m.left].iter().all(|v| v.is_finite()) {
            return Err(HeroError::reveal("root_margin must be finite"));
        }
        Ok(())
    }
}

/// One visibility report for an observed section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionEntry {
    /// Section identifier.
    pub id: String,
    /// Fraction of the section inside the (margin-adjusted) viewport.
    pub ratio: f64,
    /// Whether the section touches the viewport at all.
    pub is_intersecting: bool,
}

/// Capability to watch sections and report visibility crossings.
pub trait IntersectionSource {
    /// Start watching `id`.
    fn observe(&mut self, id: &str);
    /// Stop watching `id`.
    fn unobserve(&mut self, id: &str);
    /// Stop watching everything; no further entries are produced.
    fn disconnect(&mut self);
}

/// A change to a section's reveal marker.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "change", content = "id", rename_all = "snake_case")]
pub enum RevealChange {
    /// Marker added.
    Revealed(String),
    /// Marker removed (re-triggering mode only).
    Concealed(String),
}

/// Toggles a per-section "revealed" marker as sections cross a visibility threshold.
///
/// The observer is disconnected on [`disconnect`](Self::disconnect) or when the engine drops,
/// so removed views never receive callbacks.
#[derive(Debug)]
pub struct ScrollRevealEngine<S: IntersectionSource> {
    source: S,
    options: RevealOptions,
    revealed: BTreeMap<String, bool>,
    connected: bool,
}

impl<S: IntersectionSource> ScrollRevealEngine<S> {
    /// Engine over `source` with validated `options`.
    pub fn new(source: S, options: RevealOptions) -> HeroResult<Self> {
        options.validate()?;
        Ok(Self {
            source,
            options,
            revealed: BTreeMap::new(),
            connected: true,
        })
    }

    /// Register sections. Already-known sections keep their marker.
    pub fn observe<I, T>(&mut self, sections: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.connected = true;
        for id in sections {
            let id = id.into();
            if self.revealed.contains_key(&id) {
                continue;
            }
            self.source.observe(&id);
            self.revealed.insert(id, false);
        }
    }

    /// Apply a batch of visibility reports and return the marker changes.
    pub fn on_entries(&mut self, entries: &[IntersectionEntry]) -> Vec<RevealChange> {
        let mut changes = Vec::new();
        if !self.connected {
            return changes;
        }
        for entry in entries {
            let Some(revealed) = self.revealed.get_mut(&entry.id) else {
                tracing::trace!(id = %entry.id, "entry for unobserved section ignored");
                continue;
            };
            let above = entry.is_intersecting && entry.ratio >= self.options.threshold;
            if above && !*revealed {
                *revealed = true;
                tracing::debug!(id = %entry.id, ratio = entry.ratio, "section revealed");
                changes.push(RevealChange::Revealed(entry.id.clone()));
            } else if !above && *revealed && self.options.retrigger {
                *revealed = false;
                tracing::debug!(id = %entry.id, ratio = entry.ratio, "section concealed");
                changes.push(RevealChange::Concealed(entry.id.clone()));
            }
        }
        changes
    }

    /// Stop observing a section that left the page. Returns `false` if it was unknown.
    pub fn forget(&mut self, id: &str) -> bool {
        if self.revealed.remove(id).is_none() {
            return false;
        }
        self.source.unobserve(id);
        true
    }

    /// Disconnect the observer and drop all section state.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.revealed.clear();
        self.source.disconnect();
        tracing::debug!("reveal observer disconnected");
    }

    /// Whether `id` currently carries the marker.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.get(id).copied().unwrap_or(false)
    }

    /// Sections currently carrying the marker, sorted.
    pub fn revealed(&self) -> impl Iterator<Item = &str> {
        self.revealed
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.as_str())
    }

    /// Number of sections being observed.
    pub fn observed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Whether the observer is connected.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Options in use.
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The underlying source, mutably (e.g. to drive geometry).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: IntersectionSource> Drop for ScrollRevealEngine<S> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/engine.rs"]
mod tests;
