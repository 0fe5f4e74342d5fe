use crate::assets::pool::AssetPool;
use crate::assets::probe::{ProbeEvent, ProbeHandle, ProbeHost};
use crate::foundation::error::{HeroError, HeroResult};

/// Load status of one pool entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// No terminal event yet.
    Pending,
    /// Data became available.
    Ready,
    /// The probe errored. Still counts as settled.
    Failed,
}

impl ProbeStatus {
    /// `true` for `Ready` and `Failed`.
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// What a call to [`PreloadTracker::resolve`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeResolution {
    /// First terminal event for this probe; it was counted and disposed.
    Settled {
        /// Status the probe settled into.
        status: ProbeStatus,
        /// `true` if this resolution is the one that made the pool ready.
        became_ready: bool,
    },
    /// The probe had already settled; nothing changed.
    Duplicate,
}

/// Number of settled probes after which a pool of `n` assets counts as ready.
///
/// Deliberately `n - 1`: the hero unblocks before the very last asset finishes, trading strict
/// completeness for responsiveness. The last asset keeps loading in the background.
pub fn ready_threshold(n: usize) -> usize {
    n.saturating_sub(1)
}

/// Tracks background preload probes and the aggregate "pool ready" signal.
///
/// The settled count only ever grows. A probe that never reports a terminal event keeps the
/// pool from becoming ready; callers wanting a deadline apply it themselves.
#[derive(Debug)]
pub struct PreloadTracker {
    statuses: Vec<ProbeStatus>,
    handles: Vec<Option<ProbeHandle>>,
    settled: usize,
    began: bool,
}

impl PreloadTracker {
    /// Tracker for a pool of `len` assets, all pending.
    pub fn new(len: usize) -> Self {
        Self {
            statuses: vec![ProbeStatus::Pending; len],
            handles: vec![None; len],
            settled: 0,
            began: false,
        }
    }

    /// Spawn one probe per pool entry, in pool order. A second call is ignored.
    #[tracing::instrument(skip_all, fields(assets = pool.len()))]
    pub fn begin_preload<H: ProbeHost + ?Sized>(
        &mut self,
        host: &mut H,
        pool: &AssetPool,
    ) -> HeroResult<()> {
        if pool.len() != self.statuses.len() {
            return Err(HeroError::preload(format!(
                "tracker sized for {} assets, pool has {}",
                self.statuses.len(),
                pool.len()
            )));
        }
        if self.began {
            tracing::debug!("preload already started");
            return Ok(());
        }
        self.began = true;
        for (index, source) in pool.sources().iter().enumerate() {
            self.handles[index] = Some(host.spawn(index, source));
        }
        Ok(())
    }

    /// Record a terminal event for the probe at `index`.
    ///
    /// The first event settles the probe and disposes it; any later event is a `Duplicate`.
    pub fn resolve<H: ProbeHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        event: &ProbeEvent,
    ) -> HeroResult<ProbeResolution> {
        let Some(status) = self.statuses.get_mut(index) else {
            return Err(HeroError::preload(format!(
                "probe index {index} out of range for {} assets",
                self.handles.len()
            )));
        };
        if status.is_settled() {
            tracing::trace!(index, "duplicate terminal probe event ignored");
            return Ok(ProbeResolution::Duplicate);
        }

        *status = match event {
            ProbeEvent::DataAvailable => ProbeStatus::Ready,
            ProbeEvent::Error(reason) => {
                tracing::warn!(index, %reason, "asset failed to preload; counting it as settled");
                ProbeStatus::Failed
            }
        };
        let settled_as = *status;

        if let Some(handle) = self.handles[index].take() {
            host.dispose(handle);
        }

        let was_ready = self.is_pool_ready();
        self.settled += 1;
        let became_ready = !was_ready && self.is_pool_ready();
        if became_ready {
            tracing::debug!(settled = self.settled, "asset pool ready");
        }
        Ok(ProbeResolution::Settled {
            status: settled_as,
            became_ready,
        })
    }

    /// `true` once at least `N - 1` probes settled, by success or failure.
    pub fn is_pool_ready(&self) -> bool {
        self.settled >= ready_threshold(self.statuses.len())
    }

    /// Number of settled probes.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Status of one entry.
    pub fn status(&self, index: usize) -> Option<ProbeStatus> {
        self.statuses.get(index).copied()
    }

    /// Status of every entry, in pool order.
    pub fn statuses(&self) -> &[ProbeStatus] {
        &self.statuses
    }

    /// Probes spawned and not yet disposed.
    pub fn pending_probes(&self) -> usize {
        self.handles.iter().filter(|h| h.is_some()).count()
    }

    /// Dispose every probe still pending. Statuses stay as they are.
    pub fn teardown<H: ProbeHost + ?Sized>(&mut self, host: &mut H) {
        for handle in self.handles.iter_mut().filter_map(Option::take) {
            host.dispose(handle);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preload/tracker.rs"]
mod tests;
