//! Per-run event counters (spec.md 4.G step 4.d): "blocks attempted,
//! pages moved, pages failed". Folded across zones by the node driver
//! (4.I) and the zonelist entry point's stall counter (4.H).

/// Accumulated counters for one or more zone runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionEvents {
    /// Pageblocks for which a migrate sweep (4.E) isolated at least one page.
    pub blocks_moved: usize,
    /// Pages successfully migrated.
    pub pages_moved: usize,
    /// Pages that failed migration and were put back to the LRU.
    pub pages_failed: usize,
    /// Zonelist entry-point invocations that reached a zone run instead
    /// of short-circuiting (spec.md 4.H: "Counts a 'stall' event").
    pub stalls: usize,
}

impl CompactionEvents {
    /// A zeroed counter set.
    pub const fn new() -> Self {
        Self { blocks_moved: 0, pages_moved: 0, pages_failed: 0, stalls: 0 }
    }

    /// Folds `other` into `self` in place (used when a multi-zone
    /// driver accumulates per-zone events).
    pub fn merge(&mut self, other: CompactionEvents) {
        self.blocks_moved += other.blocks_moved;
        self.pages_moved += other.pages_moved;
        self.pages_failed += other.pages_failed;
        self.stalls += other.stalls;
    }
}
