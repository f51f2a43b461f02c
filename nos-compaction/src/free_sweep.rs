//! 4.D — Free-page sweep.
//!
//! Called lazily by the migration callback when the control block's
//! destination freelist runs dry. Walks pageblocks downward from
//! `cc.free_pfn`, invoking 4.B non-strictly on each suitable block,
//! until enough destinations exist or the sweep cursor would cross the
//! migrate cursor.

use crate::control::CompactControl;
use crate::isolate_free::isolate_freepages_block;
use crate::lock;
use crate::sched::Scheduler;
use crate::types::{MigrateType, Pfn, PAGEBLOCK_NR_PAGES};
use crate::zone::{BuddyAllocator, Zone};

/// Whether the pageblock starting at `pfn` is worth attempting (spec.md
/// 4.D step 2): never ISOLATE or RESERVE; otherwise suitable if it
/// already holds a pageblock-order-or-larger free page, or is itself
/// async-suitable (MOVABLE/CMA).
fn suitable_for_sweep(buddy: &dyn BuddyAllocator, pfn: Pfn) -> bool {
    let mtype = buddy.pageblock_migrate_type(pfn);
    if matches!(mtype, MigrateType::Isolate | MigrateType::Reserve) {
        return false;
    }
    if let Some(order) = buddy.page_order(pfn) {
        if order >= crate::types::PAGEBLOCK_ORDER {
            return true;
        }
    }
    mtype.is_async_suitable()
}

/// One step down the pageblock ladder, or `None` at the bottom of the zone.
fn step_down(pfn: Pfn, zone_start: Pfn) -> Option<Pfn> {
    if pfn < zone_start + PAGEBLOCK_NR_PAGES {
        None
    } else {
        Some(pfn - PAGEBLOCK_NR_PAGES)
    }
}

/// Draws destination pages onto `cc.freepages` until `migrate_remaining
/// <= nr_freepages`, the sweep cursor crosses `cc.migrate_pfn`, or lock
/// contention/a signal stops the sweep. Advances `cc.free_pfn` to the
/// highest pageblock actually drained from, per spec.md 4.D's final
/// step ("so the next sweep continues strictly below").
///
/// `migrate_remaining` stands in for `cc.nr_migratepages()`: the driver
/// calls this from inside the migration engine's destination callback
/// (spec.md section 9, "Callback-driven migration"), at which point the
/// migrate-source list has already been handed to the migration engine
/// and is being drained page by page, so the live count lives on the
/// caller's side rather than on `cc` itself.
pub fn isolate_freepages(
    zone: &Zone,
    buddy: &mut dyn BuddyAllocator,
    cc: &mut CompactControl<'_>,
    migrate_remaining: usize,
    sched: &mut dyn Scheduler,
) {
    let mut pfn = Some(cc.free_pfn.pageblock_start());
    let mut high_pfn: Option<Pfn> = None;

    while let Some(candidate) = pfn {
        if candidate <= cc.migrate_pfn {
            break;
        }
        if cc.nr_freepages() > 0 && migrate_remaining <= cc.nr_freepages() {
            break;
        }

        if !buddy.pfn_valid(candidate) || !zone.contains(candidate) {
            pfn = step_down(candidate, zone.start_pfn);
            continue;
        }

        if !suitable_for_sweep(buddy, candidate) {
            pfn = step_down(candidate, zone.start_pfn);
            continue;
        }

        let guard = lock::try_acquire(&zone.zone_lock, sched, cc.sync, cc.contended);
        let Some(guard) = guard else {
            break;
        };

        if !suitable_for_sweep(buddy, candidate) {
            drop(guard);
            pfn = step_down(candidate, zone.start_pfn);
            continue;
        }

        let block_end = core::cmp::min(candidate + PAGEBLOCK_NR_PAGES, zone.end_pfn());
        let isolated =
            isolate_freepages_block(buddy, candidate, block_end, &mut cc.freepages, false);
        drop(guard);

        if isolated > 0 {
            high_pfn.get_or_insert(candidate);
        }

        pfn = step_down(candidate, zone.start_pfn);
    }

    if let Some(high_pfn) = high_pfn {
        cc.free_pfn = high_pfn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{CompactControl, CompactionOrder};
    use crate::mock::MockBuddy;
    use crate::sched::mock::CountingScheduler;

    fn cc<'a>() -> CompactControl<'a> {
        CompactControl::new(CompactionOrder::Order(3), MigrateType::Movable, true, None, None)
    }

    #[test]
    fn draws_destinations_from_top_pageblock() {
        let zone = Zone::new(Pfn::new(0), PAGEBLOCK_NR_PAGES * 4);
        let mut buddy = MockBuddy::new(PAGEBLOCK_NR_PAGES * 4);
        buddy.free_order0_run(PAGEBLOCK_NR_PAGES * 3, 16);
        let mut control = cc();
        control.migrate_pfn = Pfn::new(0);
        control.free_pfn = zone.end_pfn();
        let mut sched = CountingScheduler::default();

        isolate_freepages(&zone, &mut buddy, &mut control, 0, &mut sched);

        assert_eq!(control.freepages.len(), 16);
        assert_eq!(control.free_pfn, Pfn::new(PAGEBLOCK_NR_PAGES * 3));
    }

    #[test]
    fn stops_at_migrate_cursor() {
        let zone = Zone::new(Pfn::new(0), PAGEBLOCK_NR_PAGES * 2);
        let mut buddy = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        let mut control = cc();
        control.migrate_pfn = Pfn::new(PAGEBLOCK_NR_PAGES);
        control.free_pfn = zone.end_pfn();
        let mut sched = CountingScheduler::default();

        isolate_freepages(&zone, &mut buddy, &mut control, 0, &mut sched);

        assert!(control.freepages.is_empty());
        assert_eq!(control.free_pfn, Pfn::new(PAGEBLOCK_NR_PAGES * 2));
    }
}
