/// Observable state of the hero rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroState {
    /// Cursor stable, no hover, no transition.
    Idle,
    /// Pointer over the preview hotspot.
    Previewing,
    /// A transition is in flight and the lock is held.
    Transitioning,
}

/// Identifies one transition so its completion can be matched exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TransitionTicket(pub u64);

/// Emitted when a transition starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionStart {
    /// Ticket to hand back on completion.
    pub ticket: TransitionTicket,
    /// Cursor when the transition started (outgoing asset).
    pub current: usize,
    /// Asset that becomes current on completion (incoming asset).
    pub next: usize,
}

/// Result of [`TransitionMachine::request_advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The lock was taken and a transition started.
    Started(TransitionStart),
    /// Another transition is in flight; the request was dropped.
    Locked,
    /// The pool has no distinct next asset.
    Rejected,
}

/// Result of completing a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// The cursor moved and the lock was released.
    Advanced {
        /// New cursor.
        cursor: usize,
    },
    /// Nothing in flight matched; no change.
    Stale,
}

/// Owner of the rotation cursor, the hover flag and the transition lock.
///
/// Cursor and lock change only through [`request_advance`](Self::request_advance) and
/// [`complete`](Self::complete), so at most one transition is ever in flight.
#[derive(Debug)]
pub struct TransitionMachine {
    len: usize,
    cursor: usize,
    hovering: bool,
    in_flight: Option<TransitionStart>,
    next_ticket: u64,
}

impl TransitionMachine {
    /// Machine over `len` assets starting at `cursor` (taken modulo `len`).
    pub fn new(len: usize, cursor: usize) -> Self {
        let cursor = if len == 0 { 0 } else { cursor % len };
        Self {
            len,
            cursor,
            hovering: false,
            in_flight: None,
            next_ticket: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> HeroState {
        if self.in_flight.is_some() {
            HeroState::Transitioning
        } else if self.hovering {
            HeroState::Previewing
        } else {
            HeroState::Idle
        }
    }

    /// Index of the asset in the main slot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index shown in the preview slot.
    pub fn preview_index(&self) -> usize {
        self.successor(self.cursor)
    }

    // Rotation order: the next index, wrapping at the end of the pool.
    fn successor(&self, index: usize) -> usize {
        if self.len == 0 {
            0
        } else {
            (index + 1) % self.len
        }
    }

    /// Whether the pointer is over the hotspot.
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Whether a transition holds the lock.
    pub fn is_locked(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The transition in flight, if any.
    pub fn in_flight(&self) -> Option<TransitionStart> {
        self.in_flight
    }

    /// Pointer entered the hotspot. Returns `true` if the hover flag changed.
    pub fn on_hover_enter(&mut self) -> bool {
        self.set_hover(true)
    }

    /// Pointer left the hotspot. Returns `true` if the hover flag changed.
    pub fn on_hover_leave(&mut self) -> bool {
        self.set_hover(false)
    }

    fn set_hover(&mut self, hovering: bool) -> bool {
        if self.is_locked() || self.hovering == hovering {
            return false;
        }
        self.hovering = hovering;
        true
    }

    /// Start a transition to the next asset if the lock is free.
    pub fn request_advance(&mut self) -> AdvanceOutcome {
        if self.len < 2 {
            tracing::warn!(len = self.len, "advance rejected: pool has no distinct next asset");
            return AdvanceOutcome::Rejected;
        }
        if let Some(active) = self.in_flight {
            tracing::trace!(ticket = active.ticket.0, "advance ignored while transitioning");
            return AdvanceOutcome::Locked;
        }

        let start = TransitionStart {
            ticket: TransitionTicket(self.next_ticket),
            current: self.cursor,
            next: self.successor(self.cursor),
        };
        self.next_ticket += 1;
        self.in_flight = Some(start);
        self.hovering = false;
        tracing::debug!(
            ticket = start.ticket.0,
            current = start.current,
            next = start.next,
            "transition started"
        );
        AdvanceOutcome::Started(start)
    }

    /// Finish the transition identified by `ticket`. Stale or repeated calls change nothing.
    pub fn complete(&mut self, ticket: TransitionTicket) -> CompleteOutcome {
        match self.in_flight {
            Some(active) if active.ticket == ticket => {
                self.cursor = active.next;
                self.in_flight = None;
                tracing::debug!(ticket = ticket.0, cursor = self.cursor, "transition complete");
                CompleteOutcome::Advanced {
                    cursor: self.cursor,
                }
            }
            _ => CompleteOutcome::Stale,
        }
    }

    /// Finish whatever transition is in flight.
    pub fn on_transition_complete(&mut self) -> CompleteOutcome {
        match self.in_flight {
            Some(active) => self.complete(active.ticket),
            None => CompleteOutcome::Stale,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/machine.rs"]
mod tests;
