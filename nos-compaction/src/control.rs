//! The per-invocation, zone-scoped compaction control block (spec.md
//! section 3) and the requested-order type it carries.

extern crate alloc;

use alloc::vec::Vec;
use core::sync::atomic::AtomicBool;

use crate::types::{MigrateType, Pfn};

/// The requested allocation order, or "compact everything greedily".
///
/// spec.md encodes this as the sentinel order `-1`; we give the
/// sentinel its own variant instead so callers can't accidentally pass
/// an order through arithmetic meant only for `Order`. Design Notes
/// section of spec.md flags a related sentinel-handling bug in the
/// termination predicate's free-area scan (`area = &zone->free_area[cc->order]`
/// inside a loop over `order`) — see `driver::compact_finished`, which
/// indexes by the loop variable instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionOrder {
    /// Compact until a contiguous run of this order is produced.
    Order(u32),
    /// Greedy mode: compact the whole zone until cursors meet.
    Greedy,
}

impl CompactionOrder {
    /// True for `Greedy`.
    pub const fn is_greedy(self) -> bool {
        matches!(self, CompactionOrder::Greedy)
    }

    /// The numeric order, if any.
    pub const fn order(self) -> Option<u32> {
        match self {
            CompactionOrder::Order(o) => Some(o),
            CompactionOrder::Greedy => None,
        }
    }
}

/// Per-run, zone-scoped working state (spec.md section 3). Created by
/// the entry point, lives for one zone run, destroyed afterward; both
/// lists must be drained by every exit path (invariant 5).
pub struct CompactControl<'a> {
    /// Requested allocation order, or greedy mode.
    pub order: CompactionOrder,
    /// Caller's preferred migrate type.
    pub migratetype: MigrateType,
    /// `true` ⇒ may block and yield; `false` ⇒ must abort on contention.
    pub sync: bool,
    /// Rising cursor: next PFN to examine for migration sources.
    pub migrate_pfn: Pfn,
    /// Falling cursor (pageblock-aligned): next pageblock to scan for
    /// destinations.
    pub free_pfn: Pfn,
    /// Private destination list, off the buddy free lists.
    pub freepages: Vec<Pfn>,
    /// Private migrate-source list, off the LRU.
    pub migratepages: Vec<Pfn>,
    /// Set to `true` when an async attempt aborted on contention.
    pub contended: Option<&'a AtomicBool>,
    /// Single-cell output where the capture path deposits a page.
    pub capture_slot: Option<&'a mut Option<Pfn>>,
}

impl<'a> CompactControl<'a> {
    /// Creates a fresh control block for one zone run.
    pub fn new(
        order: CompactionOrder,
        migratetype: MigrateType,
        sync: bool,
        contended: Option<&'a AtomicBool>,
        capture_slot: Option<&'a mut Option<Pfn>>,
    ) -> Self {
        Self {
            order,
            migratetype,
            sync,
            migrate_pfn: Pfn::new(0),
            free_pfn: Pfn::new(0),
            freepages: Vec::new(),
            migratepages: Vec::new(),
            contended,
            capture_slot,
        }
    }

    /// Cached free-list length (`nr_freepages`).
    pub fn nr_freepages(&self) -> usize {
        self.freepages.len()
    }

    /// Cached migrate-list length (`nr_migratepages`).
    pub fn nr_migratepages(&self) -> usize {
        self.migratepages.len()
    }

    /// Records an async-mode lock contention event on the caller's
    /// back-reference, if one was supplied.
    pub fn mark_contended(&self) {
        if let Some(flag) = self.contended {
            flag.store(true, core::sync::atomic::Ordering::Relaxed);
        }
    }

    /// Whether an async attempt has observed lock contention and
    /// recorded it on the back-reference (spec.md section 5: "Async
    /// contention cancels by observation of the shared lock's
    /// contended state"). `false` when no back-reference was supplied.
    pub fn is_contended(&self) -> bool {
        match self.contended {
            Some(flag) => flag.load(core::sync::atomic::Ordering::Relaxed),
            None => false,
        }
    }

    /// Whether a capture slot exists and is already filled (spec.md
    /// 4.G.5: "If a capture slot exists and is filled ⇒ PARTIAL").
    pub fn capture_slot_filled(&self) -> bool {
        matches!(&self.capture_slot, Some(slot) if slot.is_some())
    }

    /// Deposits `page` into the capture slot if one exists and is
    /// still empty. Returns whether the deposit happened.
    pub fn deposit_capture(&mut self, page: Pfn) -> bool {
        match &mut self.capture_slot {
            Some(slot) if slot.is_none() => {
                **slot = Some(page);
                true
            }
            _ => false,
        }
    }

    /// Asserts the hard postcondition every exit path must satisfy:
    /// both private lists empty (spec.md section 7, invariant 4).
    pub fn assert_drained(&self) {
        debug_assert!(self.freepages.is_empty(), "freepages leaked on exit");
        debug_assert!(self.migratepages.is_empty(), "migratepages leaked on exit");
    }
}
