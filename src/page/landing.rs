use crate::assets::probe::ProbeHost;
use crate::config::LandingConfig;
use crate::foundation::core::{Millis, Rect, Size};
use crate::foundation::error::HeroResult;
use crate::hero::controller::{HeroController, HeroEffect, HeroInput, HeroView};
use crate::hero::frame_clip::FrameClip;
use crate::page::scroll_lock::{ScrollLockGuard, ScrollSurface};
use crate::reveal::engine::{RevealChange, ScrollRevealEngine};
use crate::reveal::geometry::ViewportObserver;

/// Page layout the landing controller measures against.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    /// Viewport size.
    pub viewport: Size,
    /// Hero frame bounds in page coordinates.
    pub hero_frame: Rect,
    /// Reveal sections in page coordinates, in document order.
    pub sections: Vec<(String, Rect)>,
}

/// Inputs at page level.
#[derive(Clone, Debug, PartialEq)]
pub enum PageInput {
    /// The splash finished; content becomes interactive.
    SplashDone,
    /// The page scrolled to `y`.
    Scroll {
        /// New scroll offset.
        y: f64,
    },
    /// A section was removed from the document.
    RemoveSection {
        /// Section id.
        id: String,
    },
    /// Forwarded to the hero.
    Hero(HeroInput),
}

/// Consequences of a page input.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEffect {
    /// Scroll lock released.
    ScrollUnlocked,
    /// Hero effect.
    Hero(HeroEffect),
    /// Reveal marker change.
    Reveal(RevealChange),
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageView {
    /// Splash still covering the page.
    pub splash: bool,
    /// Scroll currently suppressed.
    pub scroll_locked: bool,
    /// Current scroll offset.
    pub scroll_y: f64,
    /// Hero slots and loading overlay.
    pub hero: HeroView,
    /// Scroll-scrubbed hero frame shape.
    pub frame_clip: FrameClip,
    /// Sections carrying the reveal marker.
    pub revealed: Vec<String>,
}

/// Top-level landing page controller.
///
/// Holds the scroll lock while the splash shows, mounts the hero immediately so preloading
/// overlaps the splash, and connects the reveal observer once content is visible.
#[derive(Debug)]
pub struct LandingPage<P: ProbeHost> {
    surface: ScrollSurface,
    lock: Option<ScrollLockGuard>,
    hero: HeroController<P>,
    reveal: ScrollRevealEngine<ViewportObserver>,
    layout: PageLayout,
    scroll_y: f64,
    splash: bool,
    unmounted: bool,
}

impl<P: ProbeHost> LandingPage<P> {
    /// Mount the page on `surface`, locking its scroll until the splash is done.
    pub fn mount(
        config: &LandingConfig,
        host: P,
        layout: PageLayout,
        surface: ScrollSurface,
    ) -> HeroResult<Self> {
        config.validate()?;
        let mut observer = ViewportObserver::new(
            layout.viewport,
            config.reveal.threshold,
            config.reveal.root_margin,
        );
        for (id, bounds) in &layout.sections {
            observer.set_section(id.clone(), *bounds);
        }
        let reveal = ScrollRevealEngine::new(observer, config.reveal)?;
        let hero = HeroController::mount(&config.hero, host)?;
        let lock = Some(surface.lock());
        Ok(Self {
            surface,
            lock,
            hero,
            reveal,
            layout,
            scroll_y: 0.0,
            splash: true,
            unmounted: false,
        })
    }

    /// Apply one input at session time `now`. Inputs after [`unmount`](Self::unmount) are
    /// ignored.
    pub fn handle(&mut self, input: PageInput, now: Millis) -> HeroResult<Vec<PageEffect>> {
        let mut effects = Vec::new();
        if self.unmounted {
            tracing::trace!(?input, "page input after unmount ignored");
            return Ok(effects);
        }
        match input {
            PageInput::SplashDone => {
                if !self.splash {
                    return Ok(effects);
                }
                self.splash = false;
                self.lock = None;
                effects.push(PageEffect::ScrollUnlocked);
                let ids: Vec<String> = self.layout.sections.iter().map(|(id, _)| id.clone()).collect();
                self.reveal.observe(ids);
                let entries = self.reveal.source_mut().poll();
                effects.extend(self.reveal.on_entries(&entries).into_iter().map(PageEffect::Reveal));
            }
            PageInput::Scroll { y } => {
                if self.lock.is_some() {
                    tracing::trace!(y, "scroll ignored while locked");
                    return Ok(effects);
                }
                self.scroll_y = y.max(0.0);
                let entries = self.reveal.source_mut().scroll_to(self.scroll_y);
                effects.extend(self.reveal.on_entries(&entries).into_iter().map(PageEffect::Reveal));
            }
            PageInput::RemoveSection { id } => {
                self.layout.sections.retain(|(s, _)| *s != id);
                self.reveal.source_mut().remove_section(&id);
                self.reveal.forget(&id);
            }
            PageInput::Hero(input) => {
                effects.extend(self.hero.handle(input, now)?.into_iter().map(PageEffect::Hero));
            }
        }
        Ok(effects)
    }

    /// Snapshot for rendering at `now`.
    pub fn view(&self, now: Millis) -> PageView {
        PageView {
            splash: self.splash,
            scroll_locked: self.lock.is_some(),
            scroll_y: self.scroll_y,
            hero: self.hero.view(now),
            frame_clip: FrameClip::at_scroll(
                self.layout.hero_frame,
                self.layout.viewport.height,
                self.scroll_y,
            ),
            revealed: self.reveal.revealed().map(str::to_string).collect(),
        }
    }

    /// Tear down hero, observer and scroll lock.
    pub fn unmount(&mut self) {
        self.unmounted = true;
        self.hero.unmount();
        self.reveal.disconnect();
        self.lock = None;
    }

    /// The hero controller.
    pub fn hero(&self) -> &HeroController<P> {
        &self.hero
    }

    /// The hero controller, mutably.
    pub fn hero_mut(&mut self) -> &mut HeroController<P> {
        &mut self.hero
    }

    /// The reveal engine.
    pub fn reveal(&self) -> &ScrollRevealEngine<ViewportObserver> {
        &self.reveal
    }

    /// The scroll surface this page locks.
    pub fn surface(&self) -> &ScrollSurface {
        &self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/landing.rs"]
mod tests;
