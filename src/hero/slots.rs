use crate::animation::tween::Lerp;

/// One of the three hero render slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Full-frame slot bound to the cursor.
    Main,
    /// Small hover-gated hotspot bound to the cursor's successor.
    Preview,
    /// Hidden until a transition starts; bound to the incoming asset.
    Incoming,
}

/// Transform and opacity applied to a slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlotStyle {
    /// Uniform scale about the slot center.
    pub scale: f64,
    /// 0 is transparent, 1 is opaque.
    pub opacity: f64,
}

impl SlotStyle {
    /// Unscaled and opaque.
    pub const FULL: Self = Self {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Collapsed and transparent.
    pub const GONE: Self = Self {
        scale: 0.0,
        opacity: 0.0,
    };
}

impl Lerp for SlotStyle {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            scale: f64::lerp(&a.scale, &b.scale, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
        }
    }
}

/// What a render slot should show right now.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SlotView {
    /// Which slot.
    pub kind: SlotKind,
    /// Pool index bound to the slot.
    pub asset: usize,
    /// Source reference for that index.
    pub source: String,
    /// Whether the slot is visible at all.
    pub visible: bool,
    /// Sampled transform/opacity.
    pub style: SlotStyle,
}
