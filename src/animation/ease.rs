/// Easing curves used to shape normalized tween progress.
///
/// Names follow the `powerN` family common to web animation libraries: `Power1` is quadratic,
/// `Power2` cubic and `Power3` quartic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Quadratic ease-in.
    Power1In,
    /// Quadratic ease-out.
    Power1Out,
    /// Quadratic ease-in/out.
    #[default]
    Power1InOut,
    /// Cubic ease-in.
    Power2In,
    /// Cubic ease-out.
    Power2Out,
    /// Cubic ease-in/out.
    Power2InOut,
    /// Quartic ease-in.
    Power3In,
    /// Quartic ease-out.
    Power3Out,
    /// Quartic ease-in/out.
    Power3InOut,
}

#[derive(Clone, Copy)]
enum Shape {
    In,
    Out,
    InOut,
}

impl Ease {
    /// Map progress `t` (clamped to `[0, 1]`) through this curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let Some((exp, shape)) = self.curve() else {
            return t;
        };
        match shape {
            Shape::In => t.powi(exp),
            Shape::Out => 1.0 - (1.0 - t).powi(exp),
            Shape::InOut => {
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
        }
    }

    fn curve(self) -> Option<(i32, Shape)> {
        Some(match self {
            Self::Linear => return None,
            Self::Power1In => (2, Shape::In),
            Self::Power1Out => (2, Shape::Out),
            Self::Power1InOut => (2, Shape::InOut),
            Self::Power2In => (3, Shape::In),
            Self::Power2Out => (3, Shape::Out),
            Self::Power2InOut => (3, Shape::InOut),
            Self::Power3In => (4, Shape::In),
            Self::Power3Out => (4, Shape::Out),
            Self::Power3InOut => (4, Shape::InOut),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
