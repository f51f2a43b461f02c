//! 4.B — Free-page block isolator.
//!
//! Scans `[blockpfn, end_pfn)`, which must lie within one pageblock,
//! under the caller's already-held zone lock, splitting buddy pages
//! down to order 0 and harvesting them onto a private freelist.

extern crate alloc;

use alloc::vec::Vec;

use crate::types::Pfn;
use crate::zone::BuddyAllocator;

/// Isolates free pages from `[blockpfn, end_pfn)` onto `freelist`.
///
/// Caller must hold the zone lock. In `strict` mode, any invalid PFN,
/// non-buddy page, or failed split aborts the whole call with `0`
/// (even though some pages may already have been appended) — used by
/// range isolation, where any gap invalidates the result. In lax mode
/// the scan skips holes and keeps going — used by the compaction
/// sweep, which tolerates them.
///
/// Returns the total number of order-0 pages isolated.
pub fn isolate_freepages_block(
    buddy: &mut dyn BuddyAllocator,
    mut blockpfn: Pfn,
    end_pfn: Pfn,
    freelist: &mut Vec<Pfn>,
    strict: bool,
) -> usize {
    let mut total_isolated = 0usize;

    while blockpfn < end_pfn {
        if !buddy.pfn_valid(blockpfn) {
            if strict {
                return 0;
            }
            blockpfn += 1;
            continue;
        }

        if !buddy.is_buddy_page(blockpfn) {
            if strict {
                return 0;
            }
            blockpfn += 1;
            continue;
        }

        let isolated = buddy.split_free_page(blockpfn);
        if isolated == 0 && strict {
            return 0;
        }

        total_isolated += isolated;
        for i in 0..isolated {
            freelist.push(blockpfn + i);
        }

        // Skip past the pages just consumed; a zero-isolated lax-mode
        // failure falls through to the plain `blockpfn += 1` below.
        if isolated > 0 {
            blockpfn += isolated;
        } else {
            blockpfn += 1;
        }
    }

    total_isolated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBuddy;
    use crate::types::PAGEBLOCK_NR_PAGES;

    #[test]
    fn strict_isolates_contiguous_free_run() {
        let mut zone = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        zone.free_order0_run(0, 16);
        let mut freelist = Vec::new();
        let isolated = isolate_freepages_block(
            &mut zone,
            Pfn::new(0),
            Pfn::new(16),
            &mut freelist,
            true,
        );
        assert_eq!(isolated, 16);
        assert_eq!(freelist.len(), 16);
        for pfn in &freelist {
            assert!(!zone.is_buddy_page(*pfn));
        }
    }

    #[test]
    fn strict_aborts_on_gap() {
        let mut zone = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        zone.free_order0_run(0, 4);
        // PFN 4 is left allocated (not free) — a gap.
        zone.free_order0_run(5, 5);
        let mut freelist = Vec::new();
        let isolated = isolate_freepages_block(
            &mut zone,
            Pfn::new(0),
            Pfn::new(10),
            &mut freelist,
            true,
        );
        assert_eq!(isolated, 0);
    }

    #[test]
    fn lax_mode_skips_gaps() {
        let mut zone = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        zone.free_order0_run(0, 4);
        zone.free_order0_run(5, 5);
        let mut freelist = Vec::new();
        let isolated = isolate_freepages_block(
            &mut zone,
            Pfn::new(0),
            Pfn::new(10),
            &mut freelist,
            false,
        );
        assert_eq!(isolated, 8);
    }

    #[test]
    fn round_trip_release_restores_buddy_state() {
        let mut zone = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        zone.free_order0_run(0, 16);
        let snapshot = zone.free_pfns();
        let mut freelist = Vec::new();
        isolate_freepages_block(&mut zone, Pfn::new(0), Pfn::new(16), &mut freelist, true);
        assert!(zone.free_pfns().is_empty());
        for pfn in freelist {
            zone.release_free_page(pfn);
        }
        assert_eq!(zone.free_pfns(), snapshot);
    }
}
