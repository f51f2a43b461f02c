//! 4.G — Zone compaction driver.
//!
//! Initialises cursors, alternates the migrate sweep (4.E), the
//! external migration engine, the free sweep (4.D, invoked lazily by
//! the engine's destination callback), and the capture path (4.F),
//! checks termination after each round, and reports the final status.

extern crate alloc;

use alloc::vec::Vec;

use crate::capture::capture_free_page;
use crate::control::CompactControl;
use crate::events::CompactionEvents;
use crate::free_sweep::isolate_freepages;
use crate::migrate_sweep::{isolate_migratepages, MigrateSweepOutcome};
use crate::sched::Scheduler;
use crate::types::{BackingKind, Pfn, MAX_ORDER, PAGEBLOCK_ORDER};
use crate::zone::{BuddyAllocator, LruList, MigrateMode, MigrateOutcome, MigrationEngine, Zone};

/// Status a zone run reports to its caller (spec.md section 6).
/// `CONTINUE` is internal only — never observed outside this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompactionStatus {
    /// Not attempted, or not worthwhile.
    Skipped,
    /// Run ended without full completion; may still have produced a
    /// usable page.
    Partial,
    /// Cursors met.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    Continue,
    Partial,
    Complete,
}

enum Suitability {
    Skipped,
    Partial,
    Continue,
}

/// `compaction_suitable` (spec.md 4.G step 1): consults watermarks and
/// the fragmentation index before a zone run is even attempted. Exposed
/// standalone so callers (the zonelist entry point, tests) can query it
/// without paying for a full `CompactControl`. The internal `CONTINUE`
/// case has no status of its own to report here — a caller that gets
/// past the gate still has to run `compact_zone` to find out anything
/// more, so it is folded into `Partial`.
pub fn compaction_suitable(
    zone: &Zone,
    buddy: &dyn BuddyAllocator,
    order: crate::control::CompactionOrder,
    extfrag_threshold: i32,
) -> CompactionStatus {
    match suitability(zone, buddy, order, extfrag_threshold) {
        Suitability::Skipped => CompactionStatus::Skipped,
        Suitability::Partial | Suitability::Continue => CompactionStatus::Partial,
    }
}

fn suitability(
    zone: &Zone,
    buddy: &dyn BuddyAllocator,
    order: crate::control::CompactionOrder,
    extfrag_threshold: i32,
) -> Suitability {
    let Some(order) = order.order() else {
        return Suitability::Continue;
    };

    let watermark = buddy.low_wmark_pages(zone) + (1usize << order);

    if !buddy.zone_watermark_ok(zone, 0, watermark) {
        return Suitability::Skipped;
    }
    if buddy.zone_watermark_ok(zone, order, watermark) {
        return Suitability::Partial;
    }

    let fragindex = buddy.fragmentation_index(zone, order);
    if (0..=extfrag_threshold).contains(&fragindex) {
        return Suitability::Skipped;
    }

    Suitability::Continue
}

/// `compact_finished` (spec.md 4.G step 5): the per-iteration
/// termination predicate.
///
/// The Design Notes flag that the source indexes the free-area scan by
/// `cc->order` inside a loop over `order`, which appears to ignore the
/// loop variable. This implementation indexes by the loop variable
/// instead (spec.md section 9, Open Questions).
fn compact_finished(
    zone: &Zone,
    buddy: &dyn BuddyAllocator,
    cc: &CompactControl<'_>,
    sched: &dyn Scheduler,
) -> Termination {
    if sched.fatal_signal_pending() {
        return Termination::Partial;
    }
    if cc.free_pfn <= cc.migrate_pfn {
        return Termination::Complete;
    }

    let Some(base_order) = cc.order.order() else {
        return Termination::Continue;
    };

    let watermark = buddy.low_wmark_pages(zone) + (1usize << base_order);
    if !buddy.zone_watermark_ok(zone, base_order, watermark) {
        return Termination::Continue;
    }

    if cc.capture_slot_filled() {
        return Termination::Partial;
    }

    for order in base_order..MAX_ORDER {
        if buddy.free_area_nonempty(order, cc.migratetype) {
            return Termination::Partial;
        }
        if order >= PAGEBLOCK_ORDER && buddy.free_area_has_any(order) {
            return Termination::Partial;
        }
    }

    Termination::Continue
}

/// Splits `pages` into (anon, file) counts via `lru.backing_kind`, for
/// reversing `Zone::account_isolated` on a putback path.
fn count_by_kind(lru: &dyn LruList, pages: &[Pfn]) -> (usize, usize) {
    let mut anon = 0;
    let mut file = 0;
    for &pfn in pages {
        match lru.backing_kind(pfn) {
            BackingKind::Anon => anon += 1,
            BackingKind::File => file += 1,
        }
    }
    (anon, file)
}

/// Releases every page remaining on `cc.freepages` back to the buddy
/// allocator and clears the list (spec.md 4.G step 6, invariant 5: "At
/// successful termination... residual free pages are released back to
/// the buddy allocator").
fn release_residual_freepages(buddy: &mut dyn BuddyAllocator, cc: &mut CompactControl<'_>) {
    for pfn in cc.freepages.drain(..) {
        buddy.release_free_page(pfn);
    }
}

/// Runs one zone to termination (spec.md 4.G). `cc` must be freshly
/// created for this run; both its private lists are guaranteed empty
/// on every return path (invariant 4, asserted via `cc.assert_drained`).
/// Returns the final status plus the event counters accumulated during
/// the run (spec.md section 2, "Update event counters").
pub fn compact_zone(
    zone: &Zone,
    buddy: &mut dyn BuddyAllocator,
    lru: &mut dyn LruList,
    migration: &mut dyn MigrationEngine,
    cc: &mut CompactControl<'_>,
    sched: &mut dyn Scheduler,
    extfrag_threshold: i32,
) -> (CompactionStatus, CompactionEvents) {
    let mut events = CompactionEvents::new();

    match suitability(zone, buddy, cc.order, extfrag_threshold) {
        Suitability::Skipped => return (CompactionStatus::Skipped, events),
        Suitability::Partial => return (CompactionStatus::Partial, events),
        Suitability::Continue => {}
    }

    cc.migrate_pfn = zone.start_pfn;
    cc.free_pfn = zone.end_pfn().pageblock_start();

    lru.drain_local();

    let status = loop {
        match compact_finished(zone, buddy, cc, sched) {
            Termination::Complete => break CompactionStatus::Complete,
            Termination::Partial => break CompactionStatus::Partial,
            Termination::Continue => {}
        }

        match isolate_migratepages(zone, buddy, lru, cc, sched) {
            MigrateSweepOutcome::Abort => break CompactionStatus::Partial,
            MigrateSweepOutcome::None => continue,
            MigrateSweepOutcome::Success => events.blocks_moved += 1,
        }

        // The isolator can abort mid-pageblock on lock contention
        // without itself returning `Abort` (it still resumes from
        // wherever it stopped), recording the event only on
        // `cc.contended`. An async run must cancel promptly on
        // observing that rather than carry on to migration (spec.md
        // section 5: "Async contention cancels by observation of the
        // shared lock's contended state").
        if cc.is_contended() {
            let stranded = core::mem::take(&mut cc.migratepages);
            if !stranded.is_empty() {
                let (anon, file) = count_by_kind(lru, &stranded);
                lru.putback_lru_pages(&stranded);
                zone.unaccount_isolated(anon, file);
            }
            break CompactionStatus::Partial;
        }

        let mode = if cc.sync { MigrateMode::SyncLight } else { MigrateMode::Async };

        // `sources` is lent to the migration engine and drained by it
        // (the `MigrationEngine` contract); the destination callback is
        // a pull interface that invokes the free sweep (4.D) lazily,
        // only once the private freelist actually runs dry, rather than
        // pre-isolating destinations migration may never need (spec.md
        // section 9, "Callback-driven migration").
        let mut sources = core::mem::take(&mut cc.migratepages);
        // Every page in `sources` was accounted as isolated when 4.C
        // isolated it; whatever happens to it below (migrated away or
        // put back on the LRU), it leaves the isolated count this
        // round, so the whole batch's anon/file split is captured here
        // while the PFNs are still valid, before migration can move
        // them (spec.md section 3 invariant 2).
        let (batch_anon, batch_file) = count_by_kind(lru, &sources);
        let outcome = migration.migrate_pages(
            &mut sources,
            &mut |remaining| {
                if cc.freepages.is_empty() {
                    isolate_freepages(zone, buddy, cc, remaining, sched);
                }
                cc.freepages.pop()
            },
            mode,
        );
        cc.migratepages = sources;

        match outcome {
            MigrateOutcome::Done { migrated, unmigrated } => {
                if !unmigrated.is_empty() {
                    lru.putback_lru_pages(&unmigrated);
                }
                zone.unaccount_isolated(batch_anon, batch_file);
                events.pages_moved += migrated;
                events.pages_failed += unmigrated.len();
            }
            MigrateOutcome::OutOfMemory { unmigrated } => {
                if !unmigrated.is_empty() {
                    lru.putback_lru_pages(&unmigrated);
                }
                zone.unaccount_isolated(batch_anon, batch_file);
                events.pages_failed += unmigrated.len();
                release_residual_freepages(buddy, cc);
                cc.assert_drained();
                return (CompactionStatus::Partial, events);
            }
        }

        capture_free_page(zone, buddy, cc, sched);
    };

    release_residual_freepages(buddy, cc);
    cc.assert_drained();

    (status, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::CompactionOrder;
    use crate::mock::{MockBuddy, MockLru};
    use crate::sched::mock::CountingScheduler;
    use crate::types::MigrateType;

    struct ImmediateMigration;

    impl MigrationEngine for ImmediateMigration {
        fn migrate_pages(
            &mut self,
            sources: &mut Vec<Pfn>,
            alloc_destination: &mut dyn FnMut(usize) -> Option<Pfn>,
            _mode: MigrateMode,
        ) -> MigrateOutcome {
            let mut migrated = 0;
            let mut unmigrated = Vec::new();
            let mut remaining = sources.len();
            for pfn in sources.drain(..) {
                remaining -= 1;
                if alloc_destination(remaining).is_some() {
                    migrated += 1;
                } else {
                    unmigrated.push(pfn);
                }
            }
            MigrateOutcome::Done { migrated, unmigrated }
        }
    }

    fn cc<'a>() -> CompactControl<'a> {
        CompactControl::new(CompactionOrder::Order(2), MigrateType::Movable, true, None, None)
    }

    #[test]
    fn skips_unfragmented_zone() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        buddy.force_watermark_ok(false);
        let mut lru = MockLru::new(4096);
        let mut migration = ImmediateMigration;
        let mut control = cc();
        let mut sched = CountingScheduler::default();

        let (status, events) = compact_zone(
            &zone,
            &mut buddy,
            &mut lru,
            &mut migration,
            &mut control,
            &mut sched,
            500,
        );

        assert_eq!(status, CompactionStatus::Skipped);
        assert_eq!(events, CompactionEvents::new());
    }

    #[test]
    fn reports_partial_when_already_satisfied() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        buddy.set_low_wmark(0);
        buddy.free_block(1024, 4);
        let mut lru = MockLru::new(4096);
        let mut migration = ImmediateMigration;
        let mut control = cc();
        let mut sched = CountingScheduler::default();

        let (status, _) = compact_zone(
            &zone,
            &mut buddy,
            &mut lru,
            &mut migration,
            &mut control,
            &mut sched,
            500,
        );

        assert_eq!(status, CompactionStatus::Partial);
        control.assert_drained();
    }

    #[test]
    fn drains_private_lists_on_every_exit_path() {
        let zone = Zone::new(Pfn::new(0), crate::types::PAGEBLOCK_NR_PAGES * 4);
        let mut buddy = MockBuddy::new(crate::types::PAGEBLOCK_NR_PAGES * 4);
        buddy.set_low_wmark(0);
        let mut lru = MockLru::new(crate::types::PAGEBLOCK_NR_PAGES * 4);
        lru.lru_range(0, 16, BackingKind::File);
        lru.set_lru_population(0, 1000);
        buddy.free_order0_run(crate::types::PAGEBLOCK_NR_PAGES * 3, 16);
        let mut migration = ImmediateMigration;
        let mut control = cc();
        let mut sched = CountingScheduler::default();

        let (status, events) = compact_zone(
            &zone,
            &mut buddy,
            &mut lru,
            &mut migration,
            &mut control,
            &mut sched,
            500,
        );

        assert!(matches!(status, CompactionStatus::Complete | CompactionStatus::Partial));
        assert!(control.freepages.is_empty());
        assert!(control.migratepages.is_empty());
        assert!(events.pages_moved > 0 || events.blocks_moved > 0);
    }
}
