use super::*;
use crate::assets::probe::{ManualProbeHost, ProbeEvent};
use crate::page::scroll_lock::Overflow;
use crate::reveal::engine::RevealChange;

fn layout() -> PageLayout {
    PageLayout {
        viewport: Size::new(1280.0, 800.0),
        hero_frame: Rect::new(0.0, 0.0, 1280.0, 800.0),
        sections: vec![
            ("about".to_string(), Rect::new(0.0, 800.0, 1280.0, 1600.0)),
            ("story".to_string(), Rect::new(0.0, 1600.0, 1280.0, 2400.0)),
        ],
    }
}

fn mount(surface: &ScrollSurface) -> LandingPage<ManualProbeHost> {
    LandingPage::mount(
        &LandingConfig::default(),
        ManualProbeHost::new(),
        layout(),
        surface.clone(),
    )
    .unwrap()
}

#[test]
fn splash_holds_scroll_lock_and_preloads_behind_it() {
    let surface = ScrollSurface::new();
    let mut page = mount(&surface);
    assert_eq!(surface.overflow(), Overflow::Hidden);
    assert_eq!(page.hero().host().spawned_count(), 4);

    // Scrolling under the splash does nothing.
    assert!(page.handle(PageInput::Scroll { y: 500.0 }, Millis(0)).unwrap().is_empty());
    assert_eq!(page.view(Millis(0)).scroll_y, 0.0);

    let effects = page.handle(PageInput::SplashDone, Millis(10)).unwrap();
    assert_eq!(effects, vec![PageEffect::ScrollUnlocked]);
    assert_eq!(surface.overflow(), Overflow::Auto);
    assert_eq!(page.reveal().observed_count(), 2);

    assert!(page.handle(PageInput::SplashDone, Millis(11)).unwrap().is_empty());
}

#[test]
fn scrolling_reveals_sections_and_scrubs_frame() {
    let surface = ScrollSurface::new();
    let mut page = mount(&surface);
    page.handle(PageInput::SplashDone, Millis(0)).unwrap();

    let effects = page.handle(PageInput::Scroll { y: 200.0 }, Millis(5)).unwrap();
    assert_eq!(
        effects,
        vec![PageEffect::Reveal(RevealChange::Revealed("about".into()))]
    );
    let view = page.view(Millis(5));
    assert_eq!(view.revealed, vec!["about".to_string()]);
    assert!(view.frame_clip.progress > 0.0 && view.frame_clip.progress < 1.0);

    // Reveal without retrigger sticks when scrolling back.
    assert!(page.handle(PageInput::Scroll { y: 0.0 }, Millis(6)).unwrap().is_empty());
    assert_eq!(page.view(Millis(6)).frame_clip.progress, 0.0);
}

#[test]
fn removed_section_no_longer_reveals() {
    let surface = ScrollSurface::new();
    let mut page = mount(&surface);
    page.handle(PageInput::SplashDone, Millis(0)).unwrap();
    page.handle(
        PageInput::RemoveSection {
            id: "story".into(),
        },
        Millis(1),
    )
    .unwrap();
    let effects = page.handle(PageInput::Scroll { y: 1600.0 }, Millis(2)).unwrap();
    assert!(
        !effects.contains(&PageEffect::Reveal(RevealChange::Revealed("story".into())))
    );
    assert_eq!(page.reveal().observed_count(), 1);
}

#[test]
fn hero_inputs_are_forwarded() {
    let surface = ScrollSurface::new();
    let mut page = mount(&surface);
    for i in 0..3 {
        page.handle(
            PageInput::Hero(HeroInput::Probe {
                index: i,
                event: ProbeEvent::DataAvailable,
            }),
            Millis(i as u64),
        )
        .unwrap();
    }
    assert!(!page.view(Millis(3)).hero.loading);
}

#[test]
fn unmount_restores_scroll_and_disconnects() {
    let surface = ScrollSurface::new();
    let mut page = mount(&surface);
    page.unmount();
    assert_eq!(surface.overflow(), Overflow::Auto);
    assert!(!page.reveal().is_connected());
    assert_eq!(page.hero().host().live_count(), 0);
}

#[test]
fn inputs_after_unmount_do_not_revive_reveal() {
    let surface = ScrollSurface::new();
    let mut page = mount(&surface);
    page.unmount();

    let effects = page.handle(PageInput::SplashDone, Millis(10)).unwrap();
    assert!(effects.is_empty());
    assert!(!page.reveal().is_connected());
    assert_eq!(page.reveal().observed_count(), 0);
    assert_eq!(surface.overflow(), Overflow::Auto);

    let effects = page
        .handle(PageInput::Scroll { y: 900.0 }, Millis(20))
        .unwrap();
    assert!(effects.is_empty());
    assert_eq!(page.reveal().revealed().count(), 0);
}

#[test]
fn dropping_page_releases_lock() {
    let surface = ScrollSurface::new();
    let page = mount(&surface);
    drop(page);
    assert_eq!(surface.overflow(), Overflow::Auto);
}
