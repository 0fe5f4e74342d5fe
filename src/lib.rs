//! Heroreel drives the hero section of an animated landing page.
//!
//! Everything runs against caller-supplied session time ([`Millis`]), so a browser shell, a
//! test, or the bundled scenario replayer all step the same code:
//!
//! - [`HeroController`] gates on asset preloading, rotates through a video pool and animates
//!   the transition between clips, with a fallback unlock if completion never arrives
//! - [`ScrollRevealEngine`] marks page sections as they scroll into view
//! - [`LandingPage`] ties both together behind a splash-time scroll lock
//! - [`session::run`] replays a scripted [`Scenario`] and records a [`Trace`]
#![forbid(unsafe_code)]

/// Easing curves and tweened timelines.
pub mod animation;
/// Asset pools and preload probes.
pub mod assets;
/// JSON configuration.
pub mod config;
/// Shared primitives: time, geometry, errors, timers.
pub mod foundation;
/// Hero rotation, transition animation and the orchestrating controller.
pub mod hero;
/// Landing page composition and scroll locking.
pub mod page;
/// Preload readiness tracking.
pub mod preload;
/// Scroll-triggered section reveals.
pub mod reveal;
/// Scripted session replay.
pub mod session;

pub use crate::assets::pool::AssetPool;
pub use crate::assets::probe::{FsProbeHost, ManualProbeHost, ProbeEvent, ProbeHandle, ProbeHost};
pub use crate::config::{AssetsDef, HeroConfig, LandingConfig};
pub use crate::foundation::core::{Millis, Point, Rect, Size};
pub use crate::foundation::error::{HeroError, HeroResult};
pub use crate::hero::animator::{TransitionAnimator, TransitionTimings};
pub use crate::hero::controller::{HeroController, HeroEffect, HeroInput, HeroView};
pub use crate::hero::machine::{HeroState, TransitionMachine};
pub use crate::page::landing::{LandingPage, PageEffect, PageInput, PageLayout, PageView};
pub use crate::preload::tracker::PreloadTracker;
pub use crate::reveal::engine::{IntersectionSource, RevealOptions, ScrollRevealEngine};
pub use crate::session::{Scenario, Trace};
