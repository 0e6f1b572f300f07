/// simply record how many object is collected
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GcResult {
    /// object that is not in cycle and is collected
    pub acyclic_cnt: usize,
    /// object that is in cycle and is collected
    pub cyclic_cnt: usize,
}

impl GcResult {
    fn new(tuple: (usize, usize)) -> Self {
        Self {
            acyclic_cnt: tuple.0,
            cyclic_cnt: tuple.1,
        }
    }
}

impl From<(usize, usize)> for GcResult {
    fn from(t: (usize, usize)) -> Self {
        Self::new(t)
    }
}

impl From<GcResult> for (usize, usize) {
    fn from(g: GcResult) -> Self {
        (g.acyclic_cnt, g.cyclic_cnt)
    }
}

impl From<GcResult> for usize {
    fn from(g: GcResult) -> Self {
        g.acyclic_cnt + g.cyclic_cnt
    }
}

/// Why an explicit collection pass did not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectError {
    /// A finalizer run by a pass asked for another pass on the same thread.
    #[error("a collection pass is already running on this thread")]
    Reentrant,
    #[error("could not stop the world to start a collection pass")]
    Busy,
    #[error("cycle sweeper panicked: {0}")]
    SweeperPanicked(String),
}

/// Snapshot of a collector's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcStats {
    pub enabled: bool,
    /// completed collection passes
    pub collections: usize,
}
