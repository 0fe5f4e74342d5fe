use crate::assets::pool::AssetPool;
use crate::assets::probe::{ProbeEvent, ProbeHost};
use crate::config::HeroConfig;
use crate::foundation::core::Millis;
use crate::foundation::error::HeroResult;
use crate::foundation::timer::{TimerId, TimerQueue};
use crate::hero::animator::{AnimatorSignal, TransitionAnimator};
use crate::hero::machine::{
    AdvanceOutcome, CompleteOutcome, HeroState, TransitionMachine, TransitionTicket,
};
use crate::hero::slots::{SlotKind, SlotStyle, SlotView};
use crate::preload::tracker::{PreloadTracker, ProbeResolution};

/// Inputs the hero reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroInput {
    /// The document finished loading; the main slot may start playing.
    DocumentReady,
    /// Pointer entered the preview hotspot.
    PointerEnter,
    /// Pointer left the preview hotspot.
    PointerLeave,
    /// Hotspot clicked.
    Click,
    /// A preload probe reached a terminal event.
    Probe {
        /// Pool index of the probe.
        index: usize,
        /// What happened.
        event: ProbeEvent,
    },
    /// The renderer is about to paint; animations advance.
    AnimationFrame,
    /// Time passed; only timers fire.
    Clock,
}

/// How a transition was finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishedBy {
    /// The animator signalled completion.
    Animator,
    /// The fallback deadline passed first.
    Fallback,
}

/// Why a click did not start a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredReason {
    /// A transition already holds the lock.
    Locked,
    /// The pool has no distinct next asset.
    NoDistinctNext,
}

/// Observable consequences of handling an input.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeroEffect {
    /// The pool became ready; the loading overlay goes away.
    LoadingCleared,
    /// Hover flag changed.
    HoverChanged {
        /// New value.
        hovering: bool,
    },
    /// A transition started.
    TransitionStarted {
        /// Outgoing index.
        current: usize,
        /// Incoming index.
        next: usize,
    },
    /// A slot's media should start playing.
    PlayMedia {
        /// Which slot.
        slot: SlotKind,
        /// Pool index bound to it.
        asset: usize,
    },
    /// The cursor advanced and the lock was released.
    TransitionFinished {
        /// New cursor.
        cursor: usize,
        /// Completion path.
        via: FinishedBy,
    },
    /// A click was dropped.
    AdvanceIgnored {
        /// Why.
        reason: IgnoredReason,
    },
}

#[derive(Clone, Copy, Debug)]
enum HeroTimer {
    FallbackUnlock(TransitionTicket),
}

/// Snapshot of what the hero should render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeroView {
    /// Loading overlay shown.
    pub loading: bool,
    /// Rotation state.
    pub state: HeroState,
    /// Cursor.
    pub cursor: usize,
    /// Main, preview and incoming slots, in that order.
    pub slots: Vec<SlotView>,
}

const PREVIEW_HIDDEN: SlotStyle = SlotStyle {
    scale: 0.5,
    opacity: 0.0,
};

/// Hero media orchestrator: preload gate, rotation, transition animation and fallback unlock.
///
/// Owns every piece of hero state; inputs arrive through [`handle`](Self::handle) with the
/// current session time.
#[derive(Debug)]
pub struct HeroController<P: ProbeHost> {
    pool: AssetPool,
    tracker: PreloadTracker,
    machine: TransitionMachine,
    animator: TransitionAnimator,
    timers: TimerQueue<HeroTimer>,
    fallback: Option<TimerId>,
    host: P,
    document_ready: bool,
    mounted: bool,
}

impl<P: ProbeHost> HeroController<P> {
    /// Mount the hero: build the pool and start preloading through `host`.
    pub fn mount(config: &HeroConfig, mut host: P) -> HeroResult<Self> {
        config.validate()?;
        let pool = config.assets.build()?;
        let mut tracker = PreloadTracker::new(pool.len());
        tracker.begin_preload(&mut host, &pool)?;
        let machine = TransitionMachine::new(pool.len(), config.initial_cursor);
        tracing::debug!(assets = pool.len(), cursor = machine.cursor(), "hero mounted");
        Ok(Self {
            pool,
            tracker,
            machine,
            animator: TransitionAnimator::new(config.transition),
            timers: TimerQueue::new(),
            fallback: None,
            host,
            document_ready: false,
            mounted: true,
        })
    }

    /// Apply one input at session time `now`. Timers due at or before `now` fire first.
    pub fn handle(&mut self, input: HeroInput, now: Millis) -> HeroResult<Vec<HeroEffect>> {
        if !self.mounted {
            tracing::trace!(?input, "input after unmount ignored");
            return Ok(Vec::new());
        }

        let mut effects = Vec::new();
        self.fire_timers(now, &mut effects);

        match input {
            HeroInput::DocumentReady => {
                if !self.document_ready {
                    self.document_ready = true;
                    effects.push(HeroEffect::PlayMedia {
                        slot: SlotKind::Main,
                        asset: self.machine.cursor(),
                    });
                }
            }
            HeroInput::PointerEnter => {
                if self.machine.on_hover_enter() {
                    effects.push(HeroEffect::HoverChanged { hovering: true });
                }
            }
            HeroInput::PointerLeave => {
                if self.machine.on_hover_leave() {
                    effects.push(HeroEffect::HoverChanged { hovering: false });
                }
            }
            HeroInput::Click => self.advance(now, &mut effects),
            HeroInput::Probe { index, event } => {
                let resolution = self.tracker.resolve(&mut self.host, index, &event)?;
                if let ProbeResolution::Settled {
                    became_ready: true, ..
                } = resolution
                {
                    effects.push(HeroEffect::LoadingCleared);
                }
            }
            HeroInput::AnimationFrame => {
                if let Some(frame) = self.animator.frame(now) {
                    for signal in frame.signals {
                        self.on_animator_signal(signal, &mut effects);
                    }
                }
            }
            HeroInput::Clock => {}
        }
        Ok(effects)
    }

    fn advance(&mut self, now: Millis, effects: &mut Vec<HeroEffect>) {
        let was_hovering = self.machine.is_hovering();
        match self.machine.request_advance() {
            AdvanceOutcome::Started(start) => {
                if !self.tracker.is_pool_ready() {
                    tracing::debug!(
                        settled = self.tracker.settled(),
                        "advancing before the pool is ready"
                    );
                }
                if was_hovering {
                    effects.push(HeroEffect::HoverChanged { hovering: false });
                }
                effects.push(HeroEffect::TransitionStarted {
                    current: start.current,
                    next: start.next,
                });
                let deadline = now.after(self.animator.timings().fallback_ms);
                self.fallback = Some(
                    self.timers
                        .schedule(deadline, HeroTimer::FallbackUnlock(start.ticket)),
                );
                for signal in self.animator.play(start, now) {
                    self.on_animator_signal(signal, effects);
                }
            }
            AdvanceOutcome::Locked => effects.push(HeroEffect::AdvanceIgnored {
                reason: IgnoredReason::Locked,
            }),
            AdvanceOutcome::Rejected => effects.push(HeroEffect::AdvanceIgnored {
                reason: IgnoredReason::NoDistinctNext,
            }),
        }
    }

    fn on_animator_signal(&mut self, signal: AnimatorSignal, effects: &mut Vec<HeroEffect>) {
        match signal {
            AnimatorSignal::PlayMedia { asset } => effects.push(HeroEffect::PlayMedia {
                slot: SlotKind::Incoming,
                asset,
            }),
            AnimatorSignal::Completed(ticket) => {
                if let Some(id) = self.fallback.take() {
                    self.timers.cancel(id);
                }
                self.finish(ticket, FinishedBy::Animator, effects);
            }
        }
    }

    fn fire_timers(&mut self, now: Millis, effects: &mut Vec<HeroEffect>) {
        for (id, timer) in self.timers.pop_due(now) {
            match timer {
                HeroTimer::FallbackUnlock(ticket) => {
                    if self.fallback == Some(id) {
                        self.fallback = None;
                    }
                    if self.machine.in_flight().map(|s| s.ticket) != Some(ticket) {
                        continue;
                    }
                    if self.animator.active_ticket() == Some(ticket) {
                        self.animator.cancel();
                    }
                    tracing::warn!(ticket = ticket.0, %now, "transition completion lost; fallback unlock");
                    self.finish(ticket, FinishedBy::Fallback, effects);
                }
            }
        }
    }

    fn finish(&mut self, ticket: TransitionTicket, via: FinishedBy, effects: &mut Vec<HeroEffect>) {
        if let CompleteOutcome::Advanced { cursor } = self.machine.complete(ticket) {
            effects.push(HeroEffect::TransitionFinished { cursor, via });
            effects.push(HeroEffect::PlayMedia {
                slot: SlotKind::Main,
                asset: cursor,
            });
        }
    }

    /// What to render at `now`.
    pub fn view(&self, now: Millis) -> HeroView {
        let cursor = self.machine.cursor();
        let hovering = self.machine.is_hovering();
        let in_flight = self.machine.in_flight();
        let (incoming_style, main_style) = self
            .animator
            .sample(now)
            .unwrap_or((SlotStyle::FULL, SlotStyle::FULL));

        let preview = self.machine.preview_index();
        let incoming = in_flight.map(|s| s.next).unwrap_or(preview);

        HeroView {
            loading: self.is_loading(),
            state: self.machine.state(),
            cursor,
            slots: vec![
                self.slot(SlotKind::Main, cursor, true, main_style),
                self.slot(
                    SlotKind::Preview,
                    preview,
                    hovering,
                    if hovering {
                        SlotStyle::FULL
                    } else {
                        PREVIEW_HIDDEN
                    },
                ),
                self.slot(
                    SlotKind::Incoming,
                    incoming,
                    in_flight.is_some(),
                    incoming_style,
                ),
            ],
        }
    }

    fn slot(&self, kind: SlotKind, asset: usize, visible: bool, style: SlotStyle) -> SlotView {
        SlotView {
            kind,
            asset,
            source: self.pool.get(asset).unwrap_or_default().to_string(),
            visible,
            style,
        }
    }

    /// Release probes, timers and any running animation. Later inputs are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.tracker.teardown(&mut self.host);
        self.timers.clear();
        self.fallback = None;
        self.animator.cancel();
        tracing::debug!("hero unmounted");
    }

    /// `true` until the preload gate opens.
    pub fn is_loading(&self) -> bool {
        !self.tracker.is_pool_ready()
    }

    /// `true` while a transition animation is running.
    pub fn is_animating(&self) -> bool {
        self.animator.active_ticket().is_some()
    }

    /// Next pending timer deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// The rotation state machine.
    pub fn machine(&self) -> &TransitionMachine {
        &self.machine
    }

    /// The preload tracker.
    pub fn tracker(&self) -> &PreloadTracker {
        &self.tracker
    }

    /// The asset pool.
    pub fn pool(&self) -> &AssetPool {
        &self.pool
    }

    /// The probe host.
    pub fn host(&self) -> &P {
        &self.host
    }

    /// The probe host, mutably (e.g. to drain a polled host).
    pub fn host_mut(&mut self) -> &mut P {
        &mut self.host
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/controller.rs"]
mod tests;
