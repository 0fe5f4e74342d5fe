use std::cell::Cell;
use std::rc::Rc;

/// Page overflow mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// The page scrolls normally.
    Auto,
    /// Scrolling is suppressed.
    Hidden,
}

/// Shared handle to the page's scroll state.
///
/// Cloning yields another handle to the same state. Locks are taken with
/// [`lock`](Self::lock) and released when the guard drops.
#[derive(Clone, Debug)]
pub struct ScrollSurface {
    overflow: Rc<Cell<Overflow>>,
}

impl Default for ScrollSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSurface {
    /// A freely scrolling surface.
    pub fn new() -> Self {
        Self {
            overflow: Rc::new(Cell::new(Overflow::Auto)),
        }
    }

    /// Current overflow mode.
    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    /// Suppress scrolling until the guard drops.
    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn lock(&self) -> ScrollLockGuard {
        let previous = self.overflow.replace(Overflow::Hidden);
        ScrollLockGuard {
            overflow: Rc::clone(&self.overflow),
            previous,
        }
    }
}

/// Restores the overflow mode that was active when the lock was taken.
#[derive(Debug)]
pub struct ScrollLockGuard {
    overflow: Rc<Cell<Overflow>>,
    previous: Overflow,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.overflow.set(self.previous);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/scroll_lock.rs"]
mod tests;
