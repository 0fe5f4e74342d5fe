//! Scripted landing sessions: replay timestamped inputs and record what happened.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::probe::{ManualProbeHost, ProbeEvent};
use crate::config::LandingConfig;
use crate::foundation::core::{Millis, Rect, Size};
use crate::foundation::error::{HeroError, HeroResult};
use crate::hero::controller::HeroInput;
use crate::hero::machine::HeroState;
use crate::page::landing::{LandingPage, PageEffect, PageInput, PageLayout};
use crate::page::scroll_lock::ScrollSurface;

/// A reveal section placed at full viewport width.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionDef {
    /// Section id.
    pub id: String,
    /// Top edge in page coordinates.
    pub top: f64,
    /// Height in pixels.
    pub height: f64,
}

/// A scripted action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum StepAction {
    /// Splash finished.
    SplashDone,
    /// Document load complete.
    DocumentReady,
    /// Probe delivered data.
    ProbeLoaded {
        /// Pool index.
        index: usize,
    },
    /// Probe errored.
    ProbeFailed {
        /// Pool index.
        index: usize,
        /// Informational reason.
        #[serde(default)]
        reason: String,
    },
    /// Pointer entered the hotspot.
    PointerEnter,
    /// Pointer left the hotspot.
    PointerLeave,
    /// Hotspot clicked.
    Click,
    /// Page scrolled.
    Scroll {
        /// New offset.
        y: f64,
    },
    /// Section removed from the document.
    RemoveSection {
        /// Section id.
        id: String,
    },
    /// Page torn down.
    Unmount,
    /// Nothing but the passage of time.
    Wait,
}

/// One timestamped action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// When the action happens.
    pub at_ms: Millis,
    /// What happens.
    #[serde(flatten)]
    pub action: StepAction,
}

fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}

fn default_frame_interval() -> Option<Millis> {
    Some(Millis(16))
}

/// A scripted session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Viewport size.
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    /// Hero frame bounds; defaults to the first viewport.
    #[serde(default)]
    pub hero_frame: Option<Rect>,
    /// Reveal sections.
    #[serde(default)]
    pub sections: Vec<SectionDef>,
    /// Animation frame cadence while a transition runs; `null` stalls rendering.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: Option<Millis>,
    /// Keep the clock running until this time after the last step.
    #[serde(default)]
    pub end_ms: Option<Millis>,
    /// Actions in non-decreasing time order.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HeroResult<Self> {
        serde_json::from_reader(r).map_err(|e| HeroError::serde(format!("parse scenario JSON: {e}")))
    }

    /// Parse from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> HeroResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HeroError::config(format!("open scenario '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Page layout described by this scenario.
    pub fn layout(&self) -> PageLayout {
        let w = self.viewport.width;
        PageLayout {
            viewport: self.viewport,
            hero_frame: self
                .hero_frame
                .unwrap_or_else(|| Rect::new(0.0, 0.0, w, self.viewport.height)),
            sections: self
                .sections
                .iter()
                .map(|s| (s.id.clone(), Rect::new(0.0, s.top, w, s.top + s.height)))
                .collect(),
        }
    }

    fn validate(&self) -> HeroResult<()> {
        if !self.steps.windows(2).all(|w| w[0].at_ms <= w[1].at_ms) {
            return Err(HeroError::config("scenario steps must be in time order"));
        }
        if self.frame_interval_ms == Some(Millis::ZERO) {
            return Err(HeroError::config("frame_interval_ms must be > 0 when set"));
        }
        Ok(())
    }
}

/// What triggered a trace record.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceCause {
    /// A scripted step.
    Step(StepAction),
    /// An animation frame.
    Frame,
    /// A timer deadline.
    Timer,
}

/// State after one processed event.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TraceRecord {
    /// Session time.
    pub at_ms: Millis,
    /// What was processed.
    pub cause: TraceCause,
    /// Effects it produced.
    pub effects: Vec<PageEffect>,
    /// Hero state afterwards.
    pub state: HeroState,
    /// Cursor afterwards.
    pub cursor: usize,
    /// Hover flag afterwards.
    pub hovering: bool,
    /// Transition lock afterwards.
    pub locked: bool,
    /// Loading overlay afterwards.
    pub loading: bool,
    /// Settled probes afterwards.
    pub settled: usize,
    /// Scroll lock afterwards.
    pub scroll_locked: bool,
    /// Revealed sections afterwards.
    pub revealed: Vec<String>,
}

/// Full replay output.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Trace {
    /// Records in processing order. Frames and timers appear only when they had effects.
    pub records: Vec<TraceRecord>,
}

impl Trace {
    /// Last record, if any.
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.last()
    }

    /// All effects in order.
    pub fn effects(&self) -> impl Iterator<Item = &PageEffect> {
        self.records.iter().flat_map(|r| r.effects.iter())
    }
}

struct Replay {
    page: LandingPage<ManualProbeHost>,
    frame_interval: Option<Millis>,
    clock: Millis,
    trace: Trace,
}

impl Replay {
    fn record(&mut self, cause: TraceCause, effects: Vec<PageEffect>) {
        let view = self.page.view(self.clock);
        let machine = self.page.hero().machine();
        self.trace.records.push(TraceRecord {
            at_ms: self.clock,
            cause,
            effects,
            state: view.hero.state,
            cursor: view.hero.cursor,
            hovering: machine.is_hovering(),
            locked: machine.is_locked(),
            loading: view.hero.loading,
            settled: self.page.hero().tracker().settled(),
            scroll_locked: view.scroll_locked,
            revealed: view.revealed,
        });
    }

    fn next_frame(&self) -> Option<Millis> {
        let interval = self.frame_interval?;
        if !self.page.hero().is_animating() {
            return None;
        }
        // Next tick on the interval grid; none once the grid runs past the end of time.
        let tick = (self.clock.0 / interval.0).checked_add(1)?;
        tick.checked_mul(interval.0).map(Millis)
    }

    /// Deliver animation frames and timer deadlines up to and including `target`.
    fn run_until(&mut self, target: Millis) -> HeroResult<()> {
        loop {
            let frame = self.next_frame().filter(|t| *t <= target);
            let deadline = self.page.hero().next_deadline().filter(|t| *t <= target);
            let (at, input, cause) = match (frame, deadline) {
                (Some(f), Some(d)) if d < f => (d, HeroInput::Clock, TraceCause::Timer),
                (Some(f), _) => (f, HeroInput::AnimationFrame, TraceCause::Frame),
                (None, Some(d)) => (d, HeroInput::Clock, TraceCause::Timer),
                (None, None) => break,
            };
            self.clock = at;
            let effects = self.page.handle(PageInput::Hero(input), at)?;
            if !effects.is_empty() {
                self.record(cause, effects);
            }
        }
        self.clock = self.clock.max(target);
        Ok(())
    }

    fn apply(&mut self, action: &StepAction) -> HeroResult<Vec<PageEffect>> {
        let input = match action.clone() {
            StepAction::SplashDone => PageInput::SplashDone,
            StepAction::DocumentReady => PageInput::Hero(HeroInput::DocumentReady),
            StepAction::ProbeLoaded { index } => PageInput::Hero(HeroInput::Probe {
                index,
                event: ProbeEvent::DataAvailable,
            }),
            StepAction::ProbeFailed { index, reason } => PageInput::Hero(HeroInput::Probe {
                index,
                event: ProbeEvent::Error(reason),
            }),
            StepAction::PointerEnter => PageInput::Hero(HeroInput::PointerEnter),
            StepAction::PointerLeave => PageInput::Hero(HeroInput::PointerLeave),
            StepAction::Click => PageInput::Hero(HeroInput::Click),
            StepAction::Scroll { y } => PageInput::Scroll { y },
            StepAction::RemoveSection { id } => PageInput::RemoveSection { id },
            StepAction::Wait => PageInput::Hero(HeroInput::Clock),
            StepAction::Unmount => {
                self.page.unmount();
                return Ok(Vec::new());
            }
        };
        self.page.handle(input, self.clock)
    }
}

/// Replay `scenario` against a freshly mounted page.
#[tracing::instrument(skip_all, fields(steps = scenario.steps.len()))]
pub fn run(config: &LandingConfig, scenario: &Scenario) -> HeroResult<Trace> {
    scenario.validate()?;
    let page = LandingPage::mount(
        config,
        ManualProbeHost::new(),
        scenario.layout(),
        ScrollSurface::new(),
    )?;
    let mut replay = Replay {
        page,
        frame_interval: scenario.frame_interval_ms,
        clock: Millis::ZERO,
        trace: Trace::default(),
    };

    for step in &scenario.steps {
        replay.run_until(step.at_ms)?;
        let effects = replay.apply(&step.action)?;
        replay.record(TraceCause::Step(step.action.clone()), effects);
    }
    if let Some(end) = scenario.end_ms {
        replay.run_until(end)?;
    }
    Ok(replay.trace)
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
