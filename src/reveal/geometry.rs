use std::collections::BTreeMap;

use crate::foundation::core::{Rect, Size};
use crate::reveal::engine::{IntersectionEntry, IntersectionSource, Margins};

/// Geometry-backed [`IntersectionSource`] over section rectangles in page coordinates.
///
/// Mirrors a browser intersection observer with a single threshold: every observed section is
/// reported once initially, then again only when it moves to the other side of the threshold.
#[derive(Debug)]
pub struct ViewportObserver {
    viewport: Size,
    scroll_y: f64,
    threshold: f64,
    root_margin: Margins,
    layout: BTreeMap<String, Rect>,
    // Last reported side of the threshold; `None` until the first report.
    observed: BTreeMap<String, Option<bool>>,
}

impl ViewportObserver {
    /// Observer for a viewport of `viewport` size.
    pub fn new(viewport: Size, threshold: f64, root_margin: Margins) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            threshold,
            root_margin,
            layout: BTreeMap::new(),
            observed: BTreeMap::new(),
        }
    }

    /// Place (or move) a section.
    pub fn set_section(&mut self, id: impl Into<String>, bounds: Rect) {
        self.layout.insert(id.into(), bounds);
    }

    /// Remove a section from the layout. It produces no further entries.
    pub fn remove_section(&mut self, id: &str) {
        self.layout.remove(id);
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Viewport rectangle after applying the root margin.
    pub fn root(&self) -> Rect {
        let m = self.root_margin;
        Rect::new(
            -m.left,
            self.scroll_y - m.top,
            self.viewport.width + m.right,
            self.scroll_y + self.viewport.height + m.bottom,
        )
    }

    /// Scroll to `y` and report threshold crossings.
    pub fn scroll_to(&mut self, y: f64) -> Vec<IntersectionEntry> {
        self.scroll_y = y.max(0.0);
        self.poll()
    }

    /// Report sections that were never reported or changed side since the last report.
    pub fn poll(&mut self) -> Vec<IntersectionEntry> {
        let root = self.root();
        let mut entries = Vec::new();
        for (id, last) in self.observed.iter_mut() {
            let Some(bounds) = self.layout.get(id) else {
                continue;
            };
            let (ratio, is_intersecting) = intersection(*bounds, root);
            let above = is_intersecting && ratio >= self.threshold;
            if *last != Some(above) {
                *last = Some(above);
                entries.push(IntersectionEntry {
                    id: id.clone(),
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }

    /// Visible fraction of `id` right now.
    pub fn ratio(&self, id: &str) -> Option<f64> {
        self.layout
            .get(id)
            .map(|bounds| intersection(*bounds, self.root()).0)
    }

    /// Number of observed sections.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}

impl IntersectionSource for ViewportObserver {
    fn observe(&mut self, id: &str) {
        self.observed.entry(id.to_string()).or_insert(None);
    }

    fn unobserve(&mut self, id: &str) {
        self.observed.remove(id);
    }

    fn disconnect(&mut self) {
        self.observed.clear();
    }
}

/// Visible fraction of `target` inside `root`, and whether they touch at all.
///
/// Edge-adjacent rectangles count as intersecting. Zero-area targets are fully visible when
/// they touch the root.
pub fn intersection(target: Rect, root: Rect) -> (f64, bool) {
    let touching = target.x0 <= root.x1
        && target.x1 >= root.x0
        && target.y0 <= root.y1
        && target.y1 >= root.y0;
    if !touching {
        return (0.0, false);
    }
    let area = target.area();
    if area <= 0.0 {
        return (1.0, true);
    }
    let visible = target.intersect(root).area();
    ((visible / area).clamp(0.0, 1.0), true)
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/geometry.rs"]
mod tests;
