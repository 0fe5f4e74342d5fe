use crate::animation::ease::Ease;
use crate::animation::tween::{Position, Timeline};
use crate::foundation::core::Millis;
use crate::foundation::error::{HeroError, HeroResult};
use crate::hero::machine::{TransitionStart, TransitionTicket};
use crate::hero::slots::SlotStyle;

/// Durations and shape of the hero handoff animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionTimings {
    /// Incoming asset grows from the preview size to full frame.
    pub grow_ms: Millis,
    /// Outgoing asset shrinks and fades away.
    pub shrink_ms: Millis,
    /// How far the shrink starts before the grow ends.
    pub overlap_ms: Millis,
    /// Lock release deadline if completion is never signalled.
    pub fallback_ms: Millis,
    /// Curve for both phases.
    pub ease: Ease,
    /// Scale of the incoming asset when the grow starts.
    pub preview_scale: f64,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            grow_ms: Millis(1000),
            shrink_ms: Millis(1500),
            overlap_ms: Millis(500),
            fallback_ms: Millis(2500),
            ease: Ease::Power1InOut,
            preview_scale: 0.25,
        }
    }
}

impl TransitionTimings {
    /// Offset of the shrink phase from the transition start.
    pub fn shrink_start(&self) -> Millis {
        self.grow_ms.since(self.overlap_ms)
    }

    /// Time until both phases are finished.
    pub fn total(&self) -> Millis {
        self.grow_ms.max(self.shrink_start().after(self.shrink_ms))
    }

    /// Check durations and the fallback margin.
    pub fn validate(&self) -> HeroResult<()> {
        if self.grow_ms.0 == 0 || self.shrink_ms.0 == 0 {
            return Err(HeroError::transition(
                "transition grow_ms and shrink_ms must be > 0",
            ));
        }
        if self.overlap_ms > self.grow_ms {
            return Err(HeroError::transition(
                "transition overlap_ms must not exceed grow_ms",
            ));
        }
        if self.fallback_ms <= self.total() {
            return Err(HeroError::transition(format!(
                "transition fallback_ms ({}) must exceed the animation length ({})",
                self.fallback_ms,
                self.total()
            )));
        }
        if !self.preview_scale.is_finite() || self.preview_scale <= 0.0 || self.preview_scale > 1.0
        {
            return Err(HeroError::transition(
                "transition preview_scale must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    Incoming,
    Outgoing,
}

/// Side effects requested by the animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorSignal {
    /// Start playback of the incoming asset; sent when its grow begins.
    PlayMedia {
        /// Pool index to play.
        asset: usize,
    },
    /// Both phases finished.
    Completed(TransitionTicket),
}

/// Sampled styles for one animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatorFrame {
    /// Style of the incoming slot.
    pub incoming: SlotStyle,
    /// Style of the outgoing (main) slot.
    pub outgoing: SlotStyle,
    /// Signals raised by this frame.
    pub signals: Vec<AnimatorSignal>,
}

#[derive(Debug)]
struct ActiveTransition {
    start: TransitionStart,
    began_at: Millis,
    timeline: Timeline<Layer, SlotStyle>,
    playback_sent: bool,
}

/// Runs the two-phase grow/shrink handoff for one transition at a time.
///
/// Reads the indices it is given and reports completion; it never touches cursor or lock.
#[derive(Debug)]
pub struct TransitionAnimator {
    timings: TransitionTimings,
    active: Option<ActiveTransition>,
}

impl TransitionAnimator {
    /// Animator with the given timings.
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            timings,
            active: None,
        }
    }

    /// Timings in use.
    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    /// Begin animating `start` at `now`, returning signals for the first frame.
    pub fn play(&mut self, start: TransitionStart, now: Millis) -> Vec<AnimatorSignal> {
        if let Some(prev) = self.active.take() {
            tracing::warn!(
                ticket = prev.start.ticket.0,
                "replacing an unfinished transition animation"
            );
        }

        let t = &self.timings;
        let mut timeline = Timeline::new();
        timeline.push(
            Layer::Incoming,
            SlotStyle {
                scale: t.preview_scale,
                opacity: 1.0,
            },
            SlotStyle::FULL,
            t.grow_ms,
            t.ease,
            Position::Sequential,
        );
        timeline.push(
            Layer::Outgoing,
            SlotStyle::FULL,
            SlotStyle::GONE,
            t.shrink_ms,
            t.ease,
            Position::Offset(-(t.overlap_ms.0 as i64)),
        );

        self.active = Some(ActiveTransition {
            start,
            began_at: now,
            timeline,
            playback_sent: false,
        });
        self.frame(now).map(|f| f.signals).unwrap_or_default()
    }

    /// Advance to `now`. `None` when no transition is animating.
    pub fn frame(&mut self, now: Millis) -> Option<AnimatorFrame> {
        let active = self.active.as_mut()?;
        let local = now.since(active.began_at);
        let mut signals = Vec::new();

        if !active.playback_sent && active.timeline.started(Layer::Incoming, local) {
            active.playback_sent = true;
            signals.push(AnimatorSignal::PlayMedia {
                asset: active.start.next,
            });
        }

        let (incoming, outgoing) = sample_layers(&active.timeline, local);
        if active.timeline.is_done(local) {
            signals.push(AnimatorSignal::Completed(active.start.ticket));
            self.active = None;
        }
        Some(AnimatorFrame {
            incoming,
            outgoing,
            signals,
        })
    }

    /// Styles at `now` without advancing state.
    pub fn sample(&self, now: Millis) -> Option<(SlotStyle, SlotStyle)> {
        let active = self.active.as_ref()?;
        Some(sample_layers(&active.timeline, now.since(active.began_at)))
    }

    /// Drop the running animation, if any, returning its ticket.
    pub fn cancel(&mut self) -> Option<TransitionTicket> {
        self.active.take().map(|a| a.start.ticket)
    }

    /// Ticket of the running animation.
    pub fn active_ticket(&self) -> Option<TransitionTicket> {
        self.active.as_ref().map(|a| a.start.ticket)
    }
}

fn sample_layers(timeline: &Timeline<Layer, SlotStyle>, local: Millis) -> (SlotStyle, SlotStyle) {
    (
        timeline
            .sample(Layer::Incoming, local)
            .unwrap_or(SlotStyle::FULL),
        timeline
            .sample(Layer::Outgoing, local)
            .unwrap_or(SlotStyle::FULL),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/hero/animator.rs"]
mod tests;
