use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// Opaque handle to a live load probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbeHandle(pub u64);

/// Terminal outcome of a load probe.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeEvent {
    /// Enough data arrived to show a first frame.
    DataAvailable,
    /// The probe failed; the reason is informational.
    Error(String),
}

/// Capability for issuing and freeing off-screen load probes.
///
/// Hosts only create and dispose probes. Terminal events reach the tracker through whatever
/// channel the host has (callbacks, a polled queue, a scripted scenario).
pub trait ProbeHost {
    /// Start loading `source` for pool slot `index`.
    fn spawn(&mut self, index: usize, source: &str) -> ProbeHandle;
    /// Release a probe. Called exactly once per handle.
    fn dispose(&mut self, handle: ProbeHandle);
}

/// Probe host whose terminal events are delivered by the caller.
///
/// Records spawns and disposals so leaks are observable.
#[derive(Debug, Default)]
pub struct ManualProbeHost {
    next: u64,
    live: BTreeMap<ProbeHandle, (usize, String)>,
    spawned: usize,
    disposed: usize,
}

impl ManualProbeHost {
    /// Create a host with no probes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes spawned and not yet disposed, as `(index, source)`.
    pub fn live(&self) -> impl Iterator<Item = (usize, &str)> {
        self.live.values().map(|(i, s)| (*i, s.as_str()))
    }

    /// Number of live probes.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total probes ever spawned.
    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    /// Total probes disposed.
    pub fn disposed_count(&self) -> usize {
        self.disposed
    }
}

impl ProbeHost for ManualProbeHost {
    fn spawn(&mut self, index: usize, source: &str) -> ProbeHandle {
        let handle = ProbeHandle(self.next);
        self.next += 1;
        self.spawned += 1;
        self.live.insert(handle, (index, source.to_string()));
        handle
    }

    fn dispose(&mut self, handle: ProbeHandle) {
        if self.live.remove(&handle).is_some() {
            self.disposed += 1;
        } else {
            tracing::warn!(?handle, "dispose of unknown probe");
        }
    }
}

/// Media container recognized from a file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// ISO base media (`ftyp` box): MP4, MOV, M4V.
    IsoBmff,
    /// EBML header: WebM, Matroska.
    Matroska,
}

/// Identify a media container from its first bytes.
pub fn sniff_container(header: &[u8]) -> Option<ContainerKind> {
    if header.len() >= 8 && &header[4..8] == b"ftyp" {
        return Some(ContainerKind::IsoBmff);
    }
    if header.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Some(ContainerKind::Matroska);
    }
    None
}

/// Probe host that checks sources on the local filesystem.
///
/// A probe is "data available" once the file opens and its header names a known container.
/// Spawned probes are queued; [`FsProbeHost::drain`] runs them and returns the terminal events.
#[derive(Debug)]
pub struct FsProbeHost {
    root: PathBuf,
    next: u64,
    queued: Vec<(ProbeHandle, usize, String)>,
    live: BTreeMap<ProbeHandle, usize>,
}

impl FsProbeHost {
    /// Resolve relative sources against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next: 0,
            queued: Vec::new(),
            live: BTreeMap::new(),
        }
    }

    /// Run every queued probe (in parallel) and return `(index, event)` in pool order.
    pub fn drain(&mut self) -> Vec<(usize, ProbeEvent)> {
        let queued = std::mem::take(&mut self.queued);
        let root = self.root.as_path();
        let mut events: Vec<(usize, ProbeEvent)> = queued
            .par_iter()
            .map(|(_, index, source)| (*index, probe_source(root, source)))
            .collect();
        events.sort_by_key(|(index, _)| *index);
        events
    }

    /// Number of probes not yet disposed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl ProbeHost for FsProbeHost {
    fn spawn(&mut self, index: usize, source: &str) -> ProbeHandle {
        let handle = ProbeHandle(self.next);
        self.next += 1;
        self.queued.push((handle, index, source.to_string()));
        self.live.insert(handle, index);
        handle
    }

    fn dispose(&mut self, handle: ProbeHandle) {
        self.queued.retain(|(h, _, _)| *h != handle);
        self.live.remove(&handle);
    }
}

fn probe_source(root: &Path, source: &str) -> ProbeEvent {
    if source.contains("://") {
        return ProbeEvent::Error(format!(
            "remote source '{source}' cannot be probed from disk"
        ));
    }
    let path = root.join(source);
    let mut header = [0u8; 16];
    let read = std::fs::File::open(&path).and_then(|mut f| f.read(&mut header));
    match read {
        Err(e) => ProbeEvent::Error(format!("open '{}': {e}", path.display())),
        Ok(n) => match sniff_container(&header[..n]) {
            Some(kind) => {
                tracing::debug!(path = %path.display(), ?kind, "probe data available");
                ProbeEvent::DataAvailable
            }
            None => ProbeEvent::Error(format!(
                "'{}' is not a recognized media container",
                path.display()
            )),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
