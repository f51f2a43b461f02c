//! 4.E — Migrate-page sweep.
//!
//! One pageblock per call: aligns `cc.migrate_pfn` to the next
//! pageblock boundary and invokes 4.C over `[low_pfn, end_pfn)`.

use crate::control::CompactControl;
use crate::isolate_migrate::{isolate_migratepages_range, IsolateRangeOutcome};
use crate::sched::Scheduler;
use crate::types::PAGEBLOCK_NR_PAGES;
use crate::zone::{BuddyAllocator, LruList, Zone};

/// Outcome of one migrate-sweep call (spec.md 4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateSweepOutcome {
    /// The isolator returned 0 under contention or signal.
    Abort,
    /// `end_pfn` reached `free_pfn`, or the block start PFN was
    /// invalid; the cursor still advances, but nothing was isolated.
    None,
    /// The migrate cursor advanced to the resume PFN with pages isolated.
    Success,
}

/// Advances `cc.migrate_pfn` by one pageblock, isolating migrate
/// sources from it onto `cc.migratepages`.
pub fn isolate_migratepages(
    zone: &Zone,
    buddy: &dyn BuddyAllocator,
    lru: &mut dyn LruList,
    cc: &mut CompactControl<'_>,
    sched: &mut dyn Scheduler,
) -> MigrateSweepOutcome {
    let block_end = core::cmp::min(
        cc.migrate_pfn.pageblock_start() + PAGEBLOCK_NR_PAGES,
        cc.free_pfn,
    );

    if !buddy.pfn_valid(cc.migrate_pfn) || cc.migrate_pfn >= cc.free_pfn {
        cc.migrate_pfn = block_end;
        return MigrateSweepOutcome::None;
    }

    let before = cc.nr_migratepages();
    match isolate_migratepages_range(zone, buddy, lru, cc, sched, cc.migrate_pfn, block_end) {
        IsolateRangeOutcome::Abort => MigrateSweepOutcome::Abort,
        IsolateRangeOutcome::Resume(resume) => {
            cc.migrate_pfn = resume;
            if cc.nr_migratepages() > before {
                MigrateSweepOutcome::Success
            } else {
                MigrateSweepOutcome::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{CompactControl, CompactionOrder};
    use crate::mock::{MockBuddy, MockLru};
    use crate::sched::mock::CountingScheduler;
    use crate::types::{BackingKind, MigrateType, Pfn};

    fn cc<'a>() -> CompactControl<'a> {
        CompactControl::new(CompactionOrder::Order(3), MigrateType::Movable, true, None, None)
    }

    #[test]
    fn advances_one_pageblock_and_isolates() {
        let zone = Zone::new(Pfn::new(0), PAGEBLOCK_NR_PAGES * 2);
        let buddy = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        let mut lru = MockLru::new(PAGEBLOCK_NR_PAGES * 2);
        lru.lru_range(0, 8, BackingKind::File);
        lru.set_lru_population(0, 100);
        let mut control = cc();
        control.migrate_pfn = Pfn::new(0);
        control.free_pfn = zone.end_pfn();
        let mut sched = CountingScheduler::default();

        let outcome = isolate_migratepages(&zone, &buddy, &mut lru, &mut control, &mut sched);

        assert_eq!(outcome, MigrateSweepOutcome::Success);
        assert_eq!(control.migratepages.len(), 8);
        assert_eq!(control.migrate_pfn, Pfn::new(PAGEBLOCK_NR_PAGES));
    }

    #[test]
    fn none_when_cursors_already_met() {
        let zone = Zone::new(Pfn::new(0), PAGEBLOCK_NR_PAGES * 2);
        let buddy = MockBuddy::new(PAGEBLOCK_NR_PAGES * 2);
        let mut lru = MockLru::new(PAGEBLOCK_NR_PAGES * 2);
        let mut control = cc();
        control.migrate_pfn = Pfn::new(PAGEBLOCK_NR_PAGES);
        control.free_pfn = Pfn::new(PAGEBLOCK_NR_PAGES);
        let mut sched = CountingScheduler::default();

        let outcome = isolate_migratepages(&zone, &buddy, &mut lru, &mut control, &mut sched);

        assert_eq!(outcome, MigrateSweepOutcome::None);
    }
}
