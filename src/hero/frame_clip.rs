use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Rect};

/// Clip polygon (percent of frame size) and corner radii (percent) of the hero frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameClip {
    /// Clip polygon vertices in percent, clockwise from top-left.
    pub polygon: [Point; 4],
    /// Border radii in percent: top-left, top-right, bottom-right, bottom-left.
    pub radii: [f64; 4],
    /// Scroll progress that produced this clip, in `[0, 1]`.
    pub progress: f64,
}

const FULL_POLYGON: [Point; 4] = [
    Point::new(0.0, 0.0),
    Point::new(100.0, 0.0),
    Point::new(100.0, 100.0),
    Point::new(0.0, 100.0),
];

const RESTING_POLYGON: [Point; 4] = [
    Point::new(14.0, 0.0),
    Point::new(72.0, 0.0),
    Point::new(88.0, 90.0),
    Point::new(0.0, 95.0),
];

const RESTING_RADII: [f64; 4] = [0.0, 0.0, 40.0, 10.0];

impl FrameClip {
    /// Clip for a scrubbed scroll position.
    ///
    /// Progress is 0 while the frame's center sits at or below the viewport center, and 1 once
    /// the frame's bottom edge has scrolled up to the viewport center. In between it is eased.
    pub fn at_scroll(frame: Rect, viewport_height: f64, scroll_y: f64) -> Self {
        let half = viewport_height / 2.0;
        let start = frame.center().y - half;
        let end = frame.max_y() - half;
        let raw = if end > start {
            ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
        } else if scroll_y >= end {
            1.0
        } else {
            0.0
        };
        Self::at_progress(Ease::Power1InOut.apply(raw))
    }

    /// Clip at eased progress `t`: 0 is the full rectangle, 1 the resting shape.
    pub fn at_progress(t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mut polygon = FULL_POLYGON;
        for (p, rest) in polygon.iter_mut().zip(RESTING_POLYGON) {
            *p = p.lerp(rest, t);
        }
        let radii = RESTING_RADII.map(|r| r * t);
        Self {
            polygon,
            radii,
            progress: t,
        }
    }

    /// CSS `clip-path` value.
    pub fn css_clip_path(&self) -> String {
        let pts: Vec<String> = self
            .polygon
            .iter()
            .map(|p| format!("{}% {}%", fmt_pct(p.x), fmt_pct(p.y)))
            .collect();
        format!("polygon({})", pts.join(", "))
    }

    /// CSS `border-radius` value.
    pub fn css_border_radius(&self) -> String {
        let r: Vec<String> = self.radii.iter().map(|v| format!("{}%", fmt_pct(*v))).collect();
        r.join(" ")
    }
}

fn fmt_pct(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/frame_clip.rs"]
mod tests;
