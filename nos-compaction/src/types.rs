//! Core value types shared by every compaction component: page frame
//! numbers, migrate types, and the per-page flags the isolators test.

use nos_memory_management::{PAGE_SHIFT, PAGE_SIZE};

/// Build-time constant: the pageblock order (log2 of the number of
/// pages in one pageblock). Matches the "pageblock order" of spec.md
/// section 3 — a fixed, power-of-two-sized group of contiguous PFNs.
pub const PAGEBLOCK_ORDER: u32 = 9; // 2^9 * 4KiB = 2MiB pageblocks

/// Number of pages in one pageblock.
pub const PAGEBLOCK_NR_PAGES: usize = 1 << PAGEBLOCK_ORDER;

/// Highest buddy order the allocator supports (exclusive upper bound).
pub const MAX_ORDER: u32 = 11;

/// `MAX_ORDER_NR_PAGES` — used to skip invalid-PFN gaps at max-order
/// boundaries during the migrate-range scan (spec.md 4.C step 3).
pub const MAX_ORDER_NR_PAGES: usize = 1 << (MAX_ORDER - 1);

/// Pages isolated per migrate-range batch before the scan yields back
/// to its caller (spec.md 4.C step 11).
pub const COMPACT_CLUSTER_MAX: usize = 32;

/// PFN stride used for the periodic lock release inside the migrate
/// scan (spec.md 4.C step 1).
pub const SWAP_CLUSTER_MAX: usize = 32;

static_assertions::const_assert!(PAGEBLOCK_NR_PAGES.is_power_of_two());
static_assertions::const_assert!(MAX_ORDER_NR_PAGES.is_power_of_two());

/// A page frame number: the physical address of a page divided by
/// `PAGE_SIZE`. Thin wrapper so isolator code never confuses a PFN
/// with a byte address or a pageblock index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Pfn(pub usize);

impl Pfn {
    /// Wraps a raw PFN value.
    pub const fn new(pfn: usize) -> Self {
        Self(pfn)
    }

    /// The PFN of the pageblock this PFN belongs to.
    pub const fn pageblock_start(self) -> Pfn {
        Pfn(self.0 & !(PAGEBLOCK_NR_PAGES - 1))
    }

    /// The pageblock index (`low_pfn >> pageblock_order` in the
    /// original source).
    pub const fn pageblock_nr(self) -> usize {
        self.0 >> PAGEBLOCK_ORDER
    }

    /// Rounds this PFN up to the next pageblock boundary.
    pub const fn align_up_pageblock(self) -> Pfn {
        Pfn((self.0 + PAGEBLOCK_NR_PAGES - 1) & !(PAGEBLOCK_NR_PAGES - 1))
    }

    /// True if this PFN sits on a `MAX_ORDER_NR_PAGES` boundary.
    pub const fn is_max_order_aligned(self) -> bool {
        self.0 & (MAX_ORDER_NR_PAGES - 1) == 0
    }

    /// Byte address of this page frame.
    pub const fn addr(self) -> usize {
        self.0 << PAGE_SHIFT
    }
}

impl core::ops::Add<usize> for Pfn {
    type Output = Pfn;
    fn add(self, rhs: usize) -> Pfn {
        Pfn(self.0 + rhs)
    }
}

impl core::ops::Sub<usize> for Pfn {
    type Output = Pfn;
    fn sub(self, rhs: usize) -> Pfn {
        Pfn(self.0 - rhs)
    }
}

impl core::ops::AddAssign<usize> for Pfn {
    fn add_assign(&mut self, rhs: usize) {
        self.0 += rhs;
    }
}

impl From<usize> for Pfn {
    fn from(pfn: usize) -> Pfn {
        Pfn(pfn)
    }
}

static_assertions::assert_eq_size!(Pfn, usize);
static_assertions::const_assert_eq!(1usize << PAGE_SHIFT, PAGE_SIZE);

/// Pageblock migrate type (spec.md section 3). Determines whether a
/// block is a valid async compaction source/target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MigrateType {
    /// Ordinary user pages; freely relocatable.
    Movable,
    /// Kernel-reclaimable pages (e.g. dentry/inode caches).
    Reclaimable,
    /// Never relocatable.
    Unmovable,
    /// Contiguous memory allocator reservation; relocatable like Movable.
    Cma,
    /// Temporarily excluded from the buddy allocator (e.g. by CMA or
    /// memory hot-remove); never a valid source or target.
    Isolate,
    /// Emergency reserve; never a valid compaction target.
    Reserve,
}

impl MigrateType {
    /// Whether a pageblock of this type is a valid async-mode
    /// compaction source or target (spec.md 4: "async-suitable").
    pub const fn is_async_suitable(self) -> bool {
        matches!(self, MigrateType::Movable | MigrateType::Cma)
    }
}

bitflags::bitflags! {
    /// Per-page state bits the isolators consult. Mirrors the subset
    /// of page flags spec.md section 3 calls out as relevant: buddy
    /// membership, LRU membership, compound/huge state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PageFlags: u32 {
        /// Page is currently on a buddy free list.
        const BUDDY = 0b0000_0001;
        /// Page is currently on an LRU list.
        const LRU = 0b0000_0010;
        /// Page is the head of a compound (multi-page) allocation.
        const COMPOUND = 0b0000_0100;
        /// Page is part of a transparent huge page.
        const TRANS_HUGE = 0b0000_1000;
    }
}

/// Backing kind of an LRU page, used only for isolated-page statistics
/// (spec.md section 3: "used only for statistics").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingKind {
    /// Anonymous (swap-backed) memory.
    Anon,
    /// File-backed page cache.
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pageblock_start_rounds_down() {
        let pfn = Pfn::new(PAGEBLOCK_NR_PAGES * 3 + 7);
        assert_eq!(pfn.pageblock_start(), Pfn::new(PAGEBLOCK_NR_PAGES * 3));
    }

    #[test]
    fn align_up_pageblock_is_idempotent_on_boundary() {
        let pfn = Pfn::new(PAGEBLOCK_NR_PAGES * 2);
        assert_eq!(pfn.align_up_pageblock(), pfn);
    }

    #[test]
    fn align_up_pageblock_rounds_forward() {
        let pfn = Pfn::new(PAGEBLOCK_NR_PAGES * 2 + 1);
        assert_eq!(pfn.align_up_pageblock(), Pfn::new(PAGEBLOCK_NR_PAGES * 3));
    }

    #[test]
    fn async_suitable_types() {
        assert!(MigrateType::Movable.is_async_suitable());
        assert!(MigrateType::Cma.is_async_suitable());
        assert!(!MigrateType::Unmovable.is_async_suitable());
        assert!(!MigrateType::Reclaimable.is_async_suitable());
        assert!(!MigrateType::Isolate.is_async_suitable());
        assert!(!MigrateType::Reserve.is_async_suitable());
    }
}
