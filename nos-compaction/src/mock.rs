//! Small in-memory zone simulations implementing the `BuddyAllocator`
//! and `LruList` collaborator contracts (spec.md section 6), used only
//! by this crate's own tests and benchmarks. No kernel build links
//! this module — the real buddy allocator and LRU subsystem are
//! supplied by the embedding kernel, as spec.md section 1 requires.
//!
//! They are deliberately two separate types, not one: in a real
//! kernel the buddy allocator and the LRU lists are distinct
//! subsystems behind distinct locks, and a single combined mock would
//! force every caller to alias a `&dyn BuddyAllocator` against a
//! `&mut dyn LruList` over the same backing object.

extern crate alloc;

use alloc::vec::Vec;

use crate::types::{BackingKind, MigrateType, Pfn, PAGEBLOCK_NR_PAGES};
use crate::zone::{BuddyAllocator, LruCounts, LruList, Zone};

#[derive(Clone, Copy, Debug)]
struct FreeBlock {
    head: Pfn,
    order: u32,
    mtype: MigrateType,
}

/// A toy buddy allocator: a flat PFN space with a free-block list
/// driven by direct test setup rather than real allocation traffic.
pub struct MockBuddy {
    spanned_pages: usize,
    valid: Vec<bool>,
    free_blocks: Vec<FreeBlock>,
    migrate_types: Vec<MigrateType>,
    low_wmark: usize,
    fragindex: i32,
    force_watermark_ok: Option<bool>,
}

impl MockBuddy {
    /// Creates a buddy view of `spanned_pages` PFNs, all valid, all
    /// MOVABLE pageblocks, no free pages until the test populates it.
    pub fn new(spanned_pages: usize) -> Self {
        let blocks = spanned_pages.div_ceil(PAGEBLOCK_NR_PAGES);
        Self {
            spanned_pages,
            valid: alloc::vec![true; spanned_pages],
            free_blocks: Vec::new(),
            migrate_types: alloc::vec![MigrateType::Movable; blocks.max(1)],
            low_wmark: 32,
            fragindex: -1000,
            force_watermark_ok: None,
        }
    }

    /// Marks `[start_pfn, start_pfn + count)` as invalid (a hole).
    pub fn reserve(&mut self, start_pfn: usize, count: usize) {
        for pfn in start_pfn..start_pfn + count {
            self.valid[pfn] = false;
        }
    }

    /// Registers `count` order-0 free pages starting at `start_pfn`.
    pub fn free_order0_run(&mut self, start_pfn: usize, count: usize) {
        for pfn in start_pfn..start_pfn + count {
            let mtype = self.pageblock_migrate_type(Pfn::new(pfn));
            self.free_blocks.push(FreeBlock { head: Pfn::new(pfn), order: 0, mtype });
        }
    }

    /// Registers one free block of `order` at `head_pfn`.
    pub fn free_block(&mut self, head_pfn: usize, order: u32) {
        let mtype = self.pageblock_migrate_type(Pfn::new(head_pfn));
        self.free_blocks.push(FreeBlock { head: Pfn::new(head_pfn), order, mtype });
    }

    /// Sets the migrate type of the pageblock containing `pfn`.
    pub fn set_pageblock_type(&mut self, pfn: usize, mtype: MigrateType) {
        self.migrate_types[pfn / PAGEBLOCK_NR_PAGES] = mtype;
    }

    /// Overrides the fragmentation index reported for every order.
    pub fn set_fragindex(&mut self, fragindex: i32) {
        self.fragindex = fragindex;
    }

    /// Sets the low watermark, in pages.
    pub fn set_low_wmark(&mut self, pages: usize) {
        self.low_wmark = pages;
    }

    /// Forces `zone_watermark_ok` to always return a fixed value,
    /// bypassing the free-page-count computation.
    pub fn force_watermark_ok(&mut self, ok: bool) {
        self.force_watermark_ok = Some(ok);
    }

    /// Every currently-free order-0 PFN, sorted — used by round-trip tests.
    pub fn free_pfns(&self) -> Vec<Pfn> {
        let mut pfns: Vec<Pfn> =
            self.free_blocks.iter().filter(|b| b.order == 0).map(|b| b.head).collect();
        pfns.sort();
        pfns
    }

    fn total_free_pages(&self) -> usize {
        self.free_blocks.iter().map(|b| 1usize << b.order).sum()
    }
}

impl BuddyAllocator for MockBuddy {
    fn pfn_valid(&self, pfn: Pfn) -> bool {
        pfn.0 < self.spanned_pages && self.valid[pfn.0]
    }

    fn is_buddy_page(&self, pfn: Pfn) -> bool {
        self.free_blocks.iter().any(|b| b.head == pfn)
    }

    fn page_order(&self, pfn: Pfn) -> Option<u32> {
        self.free_blocks.iter().find(|b| b.head == pfn).map(|b| b.order)
    }

    fn pageblock_migrate_type(&self, pfn: Pfn) -> MigrateType {
        self.migrate_types[(pfn.0 / PAGEBLOCK_NR_PAGES).min(self.migrate_types.len() - 1)]
    }

    fn split_free_page(&mut self, pfn: Pfn) -> usize {
        if let Some(idx) = self.free_blocks.iter().position(|b| b.head == pfn) {
            let block = self.free_blocks.remove(idx);
            1usize << block.order
        } else {
            0
        }
    }

    fn capture_free_page(&mut self, order: u32, migrate_type: MigrateType) -> Option<Pfn> {
        let idx = self
            .free_blocks
            .iter()
            .position(|b| b.order == order && b.mtype == migrate_type)?;
        Some(self.free_blocks.remove(idx).head)
    }

    fn release_free_page(&mut self, pfn: Pfn) {
        let mtype = self.pageblock_migrate_type(pfn);
        self.free_blocks.push(FreeBlock { head: pfn, order: 0, mtype });
    }

    fn free_area_nonempty(&self, order: u32, migrate_type: MigrateType) -> bool {
        self.free_blocks.iter().any(|b| b.order == order && b.mtype == migrate_type)
    }

    fn free_area_has_any(&self, order: u32) -> bool {
        self.free_blocks.iter().any(|b| b.order == order)
    }

    fn zone_watermark_ok(&self, _zone: &Zone, order: u32, watermark: usize) -> bool {
        self.force_watermark_ok.unwrap_or_else(|| {
            self.total_free_pages() >= watermark
                && (order == 0 || self.free_blocks.iter().any(|b| b.order >= order))
        })
    }

    fn low_wmark_pages(&self, _zone: &Zone) -> usize {
        self.low_wmark
    }

    fn fragmentation_index(&self, _zone: &Zone, _order: u32) -> i32 {
        self.fragindex
    }
}

/// A toy LRU list: a membership bitmap plus a per-page backing kind.
pub struct MockLru {
    spanned_pages: usize,
    lru_linked: Vec<bool>,
    backing: Vec<Option<BackingKind>>,
    active: usize,
    inactive: usize,
}

impl MockLru {
    /// Creates an LRU view of `spanned_pages` PFNs, none on the LRU.
    pub fn new(spanned_pages: usize) -> Self {
        Self {
            spanned_pages,
            lru_linked: alloc::vec![false; spanned_pages],
            backing: alloc::vec![None; spanned_pages],
            active: 0,
            inactive: 0,
        }
    }

    /// Marks `[start_pfn, start_pfn + count)` as LRU-resident pages of
    /// the given backing kind.
    pub fn lru_range(&mut self, start_pfn: usize, count: usize, kind: BackingKind) {
        for pfn in start_pfn..start_pfn + count {
            self.lru_linked[pfn] = true;
            self.backing[pfn] = Some(kind);
        }
    }

    /// Sets the active/inactive LRU population reported to callers.
    pub fn set_lru_population(&mut self, active: usize, inactive: usize) {
        self.active = active;
        self.inactive = inactive;
    }

    /// Every PFN currently linked into the LRU, sorted.
    pub fn linked_pfns(&self) -> Vec<Pfn> {
        let mut pfns: Vec<Pfn> = self
            .lru_linked
            .iter()
            .enumerate()
            .filter(|(_, linked)| **linked)
            .map(|(pfn, _)| Pfn::new(pfn))
            .collect();
        pfns.sort();
        pfns
    }
}

impl LruList for MockLru {
    fn page_zone_matches(&self, pfn: Pfn, zone: &Zone) -> bool {
        zone.contains(pfn) && pfn.0 < self.spanned_pages
    }

    fn is_on_lru(&self, pfn: Pfn) -> bool {
        pfn.0 < self.spanned_pages && self.lru_linked[pfn.0] && self.backing[pfn.0].is_some()
    }

    fn compound_order(&self, _pfn: Pfn) -> Option<u32> {
        None
    }

    fn isolate_lru_page(&mut self, pfn: Pfn, _async_migrate: bool) -> bool {
        self.is_on_lru(pfn)
    }

    fn del_page_from_lru_list(&mut self, pfn: Pfn) {
        self.lru_linked[pfn.0] = false;
    }

    fn putback_lru_pages(&mut self, pages: &[Pfn]) {
        for pfn in pages {
            self.lru_linked[pfn.0] = true;
        }
    }

    fn backing_kind(&self, pfn: Pfn) -> BackingKind {
        self.backing[pfn.0].unwrap_or(BackingKind::Anon)
    }

    fn lru_counts(&self) -> LruCounts {
        LruCounts { active: self.active, inactive: self.inactive }
    }

    fn drain_local(&mut self) {}

    fn drain_all(&mut self) {}
}
