//! 4.C — Migrate-page range isolator.
//!
//! Scans `[low_pfn, end_pfn)` under the LRU lock, pulling eligible
//! movable pages off the LRU onto the control block's private
//! migratelist.

use crate::control::CompactControl;
use crate::lock;
use crate::sched::Scheduler;
use crate::types::{BackingKind, Pfn, COMPACT_CLUSTER_MAX, MAX_ORDER_NR_PAGES, SWAP_CLUSTER_MAX};
use crate::zone::{BuddyAllocator, LruList, Zone};

/// Scan outcome: either a resume PFN, or an abort (too-many-isolated
/// backpressure, a lock contention abort, or a fatal signal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolateRangeOutcome {
    /// Resume scanning at this PFN on the next call.
    Resume(Pfn),
    /// Stop; the caller treats this the same as an empty result.
    Abort,
}

/// `too_many_isolated`: total isolated pages exceed half the live LRU
/// population (spec.md 4.C, "Backpressure").
fn too_many_isolated(zone: &Zone, lru: &dyn LruList) -> bool {
    let counts = lru.lru_counts();
    zone.isolated_total() > (counts.active + counts.inactive) / 2
}

/// Isolates migrate-source pages from `[low_pfn, end_pfn)` onto
/// `cc.migratepages`. Returns the PFN to resume scanning from.
pub fn isolate_migratepages_range(
    zone: &Zone,
    buddy: &dyn BuddyAllocator,
    lru: &mut dyn LruList,
    cc: &mut CompactControl<'_>,
    sched: &mut dyn Scheduler,
    mut low_pfn: Pfn,
    end_pfn: Pfn,
) -> IsolateRangeOutcome {
    while too_many_isolated(zone, lru) {
        if !cc.sync {
            return IsolateRangeOutcome::Abort;
        }
        sched.congestion_wait_short();
        if sched.fatal_signal_pending() {
            return IsolateRangeOutcome::Abort;
        }
    }

    sched.cond_resched();

    let mut held = Some(zone.lru_lock.lock());
    let mut last_pageblock_nr: Option<usize> = None;
    let mut isolated_anon = 0usize;
    let mut isolated_file = 0usize;

    while low_pfn < end_pfn {
        // 1. Periodic release: let other actors make progress.
        if (low_pfn.0 + 1) % SWAP_CLUSTER_MAX == 0 {
            held = None;
        }

        // 2. Lock check.
        held = lock::check_lock(&zone.lru_lock, held, sched, cc.sync, cc.contended);
        if held.is_none() {
            break;
        }

        // 3. Validity.
        if low_pfn.is_max_order_aligned() && !buddy.pfn_valid(low_pfn) {
            low_pfn += MAX_ORDER_NR_PAGES;
            continue;
        }
        if !buddy.pfn_valid(low_pfn) {
            low_pfn += 1;
            continue;
        }

        // 4. Zone membership.
        if !lru.page_zone_matches(low_pfn, zone) {
            low_pfn += 1;
            continue;
        }

        // 5. Buddy skip.
        if buddy.is_buddy_page(low_pfn) {
            low_pfn += 1;
            continue;
        }

        // 6. Async pageblock filter.
        let pageblock_nr = low_pfn.pageblock_nr();
        if !cc.sync && last_pageblock_nr != Some(pageblock_nr) {
            if !buddy.pageblock_migrate_type(low_pfn).is_async_suitable() {
                low_pfn = low_pfn.pageblock_start() + crate::types::PAGEBLOCK_NR_PAGES;
                last_pageblock_nr = Some(pageblock_nr);
                continue;
            }
        }
        last_pageblock_nr = Some(pageblock_nr);

        // 7. LRU filter.
        if !lru.is_on_lru(low_pfn) {
            low_pfn += 1;
            continue;
        }

        // 8. Compound skip.
        if let Some(order) = lru.compound_order(low_pfn) {
            low_pfn += 1usize << order;
            continue;
        }

        // 9. Attempt isolation.
        if !lru.isolate_lru_page(low_pfn, !cc.sync) {
            low_pfn += 1;
            continue;
        }

        // 10. Success: move from LRU to the private migratelist.
        let kind = lru.backing_kind(low_pfn);
        lru.del_page_from_lru_list(low_pfn);
        cc.migratepages.push(low_pfn);
        match kind {
            BackingKind::Anon => isolated_anon += 1,
            BackingKind::File => isolated_file += 1,
        }
        low_pfn += 1;

        // 11. Batching.
        if cc.nr_migratepages() == COMPACT_CLUSTER_MAX {
            break;
        }
    }

    let still_locked = held.is_some();
    zone.account_isolated(isolated_anon, isolated_file, still_locked);
    drop(held);

    IsolateRangeOutcome::Resume(low_pfn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::CompactControl;
    use crate::mock::{MockBuddy, MockLru};
    use crate::sched::mock::CountingScheduler;
    use crate::types::MigrateType;

    fn cc<'a>(sync: bool) -> CompactControl<'a> {
        CompactControl::new(
            crate::control::CompactionOrder::Order(3),
            MigrateType::Movable,
            sync,
            None,
            None,
        )
    }

    #[test]
    fn isolates_lru_pages_and_skips_free_ones() {
        let zone = Zone::new(Pfn::new(0), 1024);
        let buddy = {
            let mut b = MockBuddy::new(1024);
            b.free_order0_run(8, 4); // buddy pages, must be skipped
            b
        };
        let mut lru = MockLru::new(1024);
        lru.lru_range(0, 8, BackingKind::Anon);
        lru.set_lru_population(0, 100);
        let mut control = cc(true);
        let mut sched = CountingScheduler::default();

        let outcome = isolate_migratepages_range(
            &zone,
            &buddy,
            &mut lru,
            &mut control,
            &mut sched,
            Pfn::new(0),
            Pfn::new(12),
        );

        assert_eq!(outcome, IsolateRangeOutcome::Resume(Pfn::new(12)));
        assert_eq!(control.migratepages.len(), 8);
        assert_eq!(zone.isolated_total(), 8);
    }

    #[test]
    fn async_skips_non_suitable_pageblock() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        buddy.set_pageblock_type(0, MigrateType::Unmovable);
        let mut lru = MockLru::new(4096);
        lru.lru_range(0, 16, BackingKind::File);
        lru.set_lru_population(0, 100);
        let mut control = cc(false);
        let mut sched = CountingScheduler::default();

        let outcome = isolate_migratepages_range(
            &zone,
            &buddy,
            &mut lru,
            &mut control,
            &mut sched,
            Pfn::new(0),
            Pfn::new(crate::types::PAGEBLOCK_NR_PAGES),
        );

        assert_eq!(
            outcome,
            IsolateRangeOutcome::Resume(Pfn::new(crate::types::PAGEBLOCK_NR_PAGES))
        );
        assert!(control.migratepages.is_empty());
    }

    #[test]
    fn too_many_isolated_aborts_async() {
        let zone = Zone::new(Pfn::new(0), 1024);
        zone.account_isolated(100, 0, false);
        let buddy = MockBuddy::new(1024);
        let mut lru = MockLru::new(1024);
        lru.set_lru_population(10, 10); // isolated(100) > (10+10)/2
        let mut sched = CountingScheduler::default();

        let mut control = cc(false);
        let outcome = isolate_migratepages_range(
            &zone,
            &buddy,
            &mut lru,
            &mut control,
            &mut sched,
            Pfn::new(0),
            Pfn::new(4),
        );
        assert_eq!(outcome, IsolateRangeOutcome::Abort);
    }
}
