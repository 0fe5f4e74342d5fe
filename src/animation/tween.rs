use crate::animation::ease::Ease;
use crate::foundation::core::Millis;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` by `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Where a tween starts relative to the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Right after the current end of the timeline.
    Sequential,
    /// Relative to the current end; negative values overlap the previous tween.
    Offset(i64),
    /// Absolute time from the timeline origin.
    At(Millis),
}

/// Lifecycle of a tween at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenPhase {
    /// Not started yet.
    Pending,
    /// Between start and end.
    Running,
    /// Reached its end value.
    Done,
}

/// A single eased interpolation over a time window.
#[derive(Clone, Debug)]
pub struct Tween<T> {
    /// Value at and before `start`.
    pub from: T,
    /// Value at and after `start + duration`.
    pub to: T,
    /// Start time relative to the timeline origin.
    pub start: Millis,
    /// Length of the interpolation.
    pub duration: Millis,
    /// Curve applied to progress.
    pub ease: Ease,
}

impl<T: Lerp + Clone> Tween<T> {
    /// End time relative to the timeline origin.
    pub fn end(&self) -> Millis {
        self.start.after(self.duration)
    }

    /// Raw (uneased) progress at `t`, in `[0, 1]`.
    pub fn progress(&self, t: Millis) -> f64 {
        if t <= self.start {
            return 0.0;
        }
        if self.duration.0 == 0 || t >= self.end() {
            return 1.0;
        }
        t.since(self.start).0 as f64 / self.duration.0 as f64
    }

    /// Phase at `t`. A zero-length tween is `Done` from its start.
    pub fn phase(&self, t: Millis) -> TweenPhase {
        if t < self.start {
            TweenPhase::Pending
        } else if t >= self.end() {
            TweenPhase::Done
        } else {
            TweenPhase::Running
        }
    }

    /// Interpolated value at `t`.
    pub fn sample(&self, t: Millis) -> T {
        match self.phase(t) {
            TweenPhase::Pending => self.from.clone(),
            TweenPhase::Done => self.to.clone(),
            TweenPhase::Running => T::lerp(&self.from, &self.to, self.ease.apply(self.progress(t))),
        }
    }
}

/// Tweens laid out on a shared clock, each bound to a target key.
#[derive(Clone, Debug)]
pub struct Timeline<K, T> {
    tweens: Vec<(K, Tween<T>)>,
    end: Millis,
}

impl<K, T> Default for Timeline<K, T> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            end: Millis::ZERO,
        }
    }
}

impl<K, T> Timeline<K, T>
where
    K: Copy + PartialEq,
    T: Lerp + Clone,
{
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tween for `target` at `position`. Returns the resolved start time.
    pub fn push(
        &mut self,
        target: K,
        from: T,
        to: T,
        duration: Millis,
        ease: Ease,
        position: Position,
    ) -> Millis {
        let start = match position {
            Position::Sequential => self.end,
            Position::Offset(delta) => self.end.offset(delta),
            Position::At(at) => at,
        };
        let tween = Tween {
            from,
            to,
            start,
            duration,
            ease,
        };
        self.end = self.end.max(tween.end());
        self.tweens.push((target, tween));
        start
    }

    /// Total length: the latest tween end.
    pub fn duration(&self) -> Millis {
        self.end
    }

    /// `true` once every tween has reached its end value.
    pub fn is_done(&self, t: Millis) -> bool {
        t >= self.end
    }

    /// Value of `target` at `t`: the latest-starting tween that has begun wins; before any has
    /// begun, the first tween's `from` holds.
    pub fn sample(&self, target: K, t: Millis) -> Option<T> {
        let mut first = None;
        let mut active = None;
        for (key, tween) in &self.tweens {
            if *key != target {
                continue;
            }
            first.get_or_insert(tween);
            if tween.start <= t {
                active = Some(tween);
            }
        }
        active.or(first).map(|tween| tween.sample(t))
    }

    /// `true` once any tween for `target` has started.
    pub fn started(&self, target: K, t: Millis) -> bool {
        self.tweens
            .iter()
            .any(|(key, tween)| *key == target && tween.start <= t)
    }

    /// Earliest start time among the tweens for `target`.
    pub fn start_of(&self, target: K) -> Option<Millis> {
        self.tweens
            .iter()
            .filter(|(key, _)| *key == target)
            .map(|(_, tween)| tween.start)
            .min()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
