use super::*;

#[test]
fn guard_restores_on_drop() {
    let surface = ScrollSurface::new();
    {
        let _guard = surface.lock();
        assert_eq!(surface.overflow(), Overflow::Hidden);
    }
    assert_eq!(surface.overflow(), Overflow::Auto);
}

#[test]
fn nested_guards_unwind_in_order() {
    let surface = ScrollSurface::new();
    let outer = surface.lock();
    let inner = surface.clone().lock();
    drop(inner);
    assert_eq!(surface.overflow(), Overflow::Hidden);
    drop(outer);
    assert_eq!(surface.overflow(), Overflow::Auto);
}
