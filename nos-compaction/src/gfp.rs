//! GFP-style allocation-context flags and the per-zone tunables the
//! zonelist entry point (spec.md 4.H) and node driver (4.I) consult.
//!
//! Modeled after the teacher's bitflags usage in `types::PageFlags`.

/// Requested allocation order, or "compact everything greedily".
pub use crate::control::CompactionOrder;

bitflags::bitflags! {
    /// Subset of the caller's allocation-context flags relevant to
    /// compaction (spec.md 4.H: "Filters GFP flags"). The full GFP
    /// flag space (zone selection, reclaim behavior, ...) belongs to
    /// the page-allocator proper and is out of scope here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GfpFlags: u32 {
        /// Caller may re-enter the filesystem (`__GFP_FS`). Compaction
        /// is skipped when absent, since synchronous migration may need
        /// filesystem callbacks to write back dirty pages.
        const FS = 0b0000_0001;
        /// Caller may perform I/O (`__GFP_IO`). Compaction is skipped
        /// when absent, for the same reason as `FS`.
        const IO = 0b0000_0010;
        /// Caller wants movable-type memory (`__GFP_MOVABLE`).
        const MOVABLE = 0b0000_0100;
    }
}

impl GfpFlags {
    /// The default flags a generic higher-order allocation carries:
    /// filesystem and I/O reentrancy both permitted.
    pub const fn reclaimable() -> Self {
        Self::FS.union(Self::IO)
    }
}

/// A bitset of up to 64 NUMA node ids, mirroring `nodemask_t` truncated
/// to the node counts this crate's tests and benches exercise. The real
/// node/zonelist iteration machinery is an out-of-scope collaborator
/// (spec.md section 1); this is only the filter predicate 4.H applies
/// while walking a zonelist the caller already built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMask(u64);

impl NodeMask {
    /// A mask containing every node.
    pub const fn all() -> Self {
        Self(u64::MAX)
    }

    /// A mask containing no nodes.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A mask containing exactly `node_id`.
    pub const fn single(node_id: usize) -> Self {
        Self(1u64 << node_id)
    }

    /// Adds `node_id` to the mask.
    pub const fn with(self, node_id: usize) -> Self {
        Self(self.0 | (1u64 << node_id))
    }

    /// Whether `node_id` is a member.
    pub const fn contains(self, node_id: usize) -> bool {
        self.0 & (1u64 << node_id) != 0
    }
}

/// Per-zone tunables consulted by the driver and its callers (spec.md
/// section 6, "Tunables"): the external-fragmentation threshold below
/// which a zone is considered too unfragmented to be worth compacting,
/// plus the batching constants named in section 2's component table.
/// Constructed the way `nos-memory-management`'s allocators expose a
/// `pub const fn new()` / `Default` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionTunables {
    /// Fragmentation-index threshold in `[0, 1000]`; zones scoring
    /// within `0..=extfrag_threshold` are skipped as "not fragmented
    /// enough to be worth compacting" (spec.md section 6).
    pub extfrag_threshold: i32,
    /// `SWAP_CLUSTER_MAX` — periodic lock-release stride in 4.C.
    pub swap_cluster_max: usize,
    /// `COMPACT_CLUSTER_MAX` — migrate-batch size in 4.C.
    pub compact_cluster_max: usize,
    /// Build-time pageblock order, exposed here for callers assembling
    /// zonelists rather than reaching into `crate::types` directly.
    pub pageblock_order: u32,
}

impl CompactionTunables {
    /// Default tunables: threshold 500 (spec.md section 6's stated
    /// default), and the batching constants from `crate::types`.
    pub const fn new() -> Self {
        Self {
            extfrag_threshold: 500,
            swap_cluster_max: crate::types::SWAP_CLUSTER_MAX,
            compact_cluster_max: crate::types::COMPACT_CLUSTER_MAX,
            pageblock_order: crate::types::PAGEBLOCK_ORDER,
        }
    }

    /// Overrides the fragmentation threshold, clamped to `[0, 1000]`
    /// (spec.md section 6: "range [0, 1000]").
    pub fn set_extfrag_threshold(&mut self, threshold: i32) -> crate::error::Result<()> {
        if !(0..=1000).contains(&threshold) {
            return Err(crate::error::CompactionError::ThresholdOutOfRange.into());
        }
        self.extfrag_threshold = threshold;
        Ok(())
    }
}

impl Default for CompactionTunables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodemask_membership() {
        let mask = NodeMask::empty().with(2).with(5);
        assert!(mask.contains(2));
        assert!(mask.contains(5));
        assert!(!mask.contains(0));
    }

    #[test]
    fn default_threshold_is_500() {
        assert_eq!(CompactionTunables::new().extfrag_threshold, 500);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut tunables = CompactionTunables::new();
        assert!(tunables.set_extfrag_threshold(1001).is_err());
        assert!(tunables.set_extfrag_threshold(-1).is_err());
        assert_eq!(tunables.extfrag_threshold, 500);
        assert!(tunables.set_extfrag_threshold(0).is_ok());
    }
}
