//! 4.H — Zone-list entry point, and 4.I — node / multi-node driver.
//!
//! Both operate over a caller-supplied slice of zones rather than
//! walking zone/node/zonelist iteration machinery itself (spec.md
//! section 1 names that machinery an out-of-scope collaborator); the
//! caller is expected to have already built and ordered the zonelist
//! the way the embedding kernel's allocator would.

extern crate alloc;

use crate::control::{CompactControl, CompactionOrder};
use crate::driver::{compact_zone, CompactionStatus};
use crate::events::CompactionEvents;
use crate::gfp::GfpFlags;
use crate::sched::Scheduler;
use crate::types::MigrateType;
use crate::zone::{BuddyAllocator, LruList, MigrationEngine, Zone};

/// One zone and the collaborators that back it, as handed to
/// [`try_to_compact_pages`] / [`compact_node`]. Bundled together because
/// each zone in a zonelist is typically backed by its own buddy/LRU
/// instances (one per NUMA node), not a single global one.
pub struct ZoneHandle<'z> {
    /// NUMA node this zone belongs to, checked against the nodemask.
    pub node_id: usize,
    /// The zone itself.
    pub zone: &'z Zone,
    /// The buddy allocator backing this zone.
    pub buddy: &'z mut dyn BuddyAllocator,
    /// The LRU lists backing this zone.
    pub lru: &'z mut dyn LruList,
    /// The migration engine backing this zone.
    pub migration: &'z mut dyn MigrationEngine,
}

/// `try_to_compact_pages` (spec.md 4.H): runs 4.G over every zone in
/// `zones` whose node is in `nodemask`, in order, folding results by
/// `max` (`Complete` beats `Partial` beats `Skipped`) and breaking out
/// early once a zone's low watermark is already satisfied for `order`.
///
/// Short-circuits to `Skipped` without touching any zone when `order`
/// is zero, or when `gfp` forbids filesystem reentry or I/O — spec.md
/// 4.H: synchronous migration may need filesystem callbacks to write
/// back dirty pages, so compaction is pointless without both.
#[allow(clippy::too_many_arguments)]
pub fn try_to_compact_pages(
    zones: &mut [ZoneHandle<'_>],
    order: u32,
    gfp: GfpFlags,
    nodemask: crate::gfp::NodeMask,
    sync: bool,
    sched: &mut dyn Scheduler,
    tunables: &crate::gfp::CompactionTunables,
) -> (CompactionStatus, CompactionEvents) {
    let mut events = CompactionEvents::new();

    if order == 0 || !gfp.contains(GfpFlags::FS) || !gfp.contains(GfpFlags::IO) {
        return (CompactionStatus::Skipped, events);
    }

    #[cfg(feature = "log")]
    log::trace!("try_to_compact_pages: order={order} sync={sync}");

    events.stalls += 1;

    let mut best = CompactionStatus::Skipped;
    for handle in zones.iter_mut() {
        if !nodemask.contains(handle.node_id) {
            continue;
        }

        let contended = core::sync::atomic::AtomicBool::new(false);
        let mut control = CompactControl::new(
            CompactionOrder::Order(order),
            MigrateType::Movable,
            sync,
            Some(&contended),
            None,
        );

        let (status, zone_events) = compact_zone(
            handle.zone,
            handle.buddy,
            handle.lru,
            handle.migration,
            &mut control,
            sched,
            tunables.extfrag_threshold,
        );
        events.merge(zone_events);
        best = best.max(status);

        let watermark = handle.buddy.low_wmark_pages(handle.zone) + (1usize << order);
        if handle.buddy.zone_watermark_ok(handle.zone, order, watermark) {
            break;
        }
    }

    (best, events)
}

/// `compact_node` (spec.md 4.I, section 6): greedy (order = -1)
/// compaction of every zone belonging to `node_id`, honoring each
/// zone's deferral predicate (skips a zone that recently failed sync
/// compaction), and updating its deferral state from the outcome.
pub fn compact_node(
    zones: &mut [ZoneHandle<'_>],
    node_id: usize,
    sync: bool,
    sched: &mut dyn Scheduler,
    tunables: &crate::gfp::CompactionTunables,
) -> CompactionEvents {
    let mut events = CompactionEvents::new();

    for handle in zones.iter_mut() {
        if handle.node_id != node_id {
            continue;
        }
        if handle.zone.spanned_pages == 0 {
            continue;
        }
        // Greedy mode has no single numeric order to check deferral
        // against; order 0 is the least restrictive floor, matching
        // the teacher's "always attempt greedy unless explicitly
        // isolated" posture.
        if handle.zone.compaction_deferred(0) {
            continue;
        }

        let mut control = CompactControl::new(
            CompactionOrder::Greedy,
            MigrateType::Movable,
            sync,
            None,
            None,
        );

        let (status, zone_events) = compact_zone(
            handle.zone,
            handle.buddy,
            handle.lru,
            handle.migration,
            &mut control,
            sched,
            tunables.extfrag_threshold,
        );
        events.merge(zone_events);

        match status {
            CompactionStatus::Complete => handle.zone.clear_order_failed_at_or_below(0),
            CompactionStatus::Partial | CompactionStatus::Skipped if sync => {
                handle.zone.defer_compaction(0);
            }
            _ => {}
        }
    }

    events
}

/// `compact_pgdat` (spec.md section 6): the background/async per-node
/// convenience wrapper around [`compact_node`]. Drains LRU caches
/// across every zone on the node exactly once first (spec.md 4.I:
/// "Cross-node variant drains LRU caches globally once"), then runs
/// each zone greedily and asynchronously.
pub fn compact_pgdat(
    zones: &mut [ZoneHandle<'_>],
    node_id: usize,
    sched: &mut dyn Scheduler,
    tunables: &crate::gfp::CompactionTunables,
) -> CompactionEvents {
    for handle in zones.iter_mut() {
        if handle.node_id == node_id {
            handle.lru.drain_all();
        }
    }
    compact_node(zones, node_id, false, sched, tunables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBuddy, MockLru};
    use crate::sched::mock::CountingScheduler;
    use crate::types::Pfn;
    use crate::zone::{MigrateMode, MigrateOutcome};
    use alloc::vec::Vec;

    struct NoopMigration;

    impl MigrationEngine for NoopMigration {
        fn migrate_pages(
            &mut self,
            sources: &mut Vec<Pfn>,
            _alloc_destination: &mut dyn FnMut(usize) -> Option<Pfn>,
            _mode: MigrateMode,
        ) -> MigrateOutcome {
            let unmigrated = core::mem::take(sources);
            MigrateOutcome::Done { migrated: 0, unmigrated }
        }
    }

    #[test]
    fn skips_order_zero_without_touching_any_zone() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        buddy.force_watermark_ok(false);
        let mut lru = MockLru::new(4096);
        let mut migration = NoopMigration;
        let mut sched = CountingScheduler::default();
        let tunables = crate::gfp::CompactionTunables::new();

        let mut zones = [ZoneHandle {
            node_id: 0,
            zone: &zone,
            buddy: &mut buddy,
            lru: &mut lru,
            migration: &mut migration,
        }];

        let (status, events) = try_to_compact_pages(
            &mut zones,
            0,
            GfpFlags::reclaimable(),
            crate::gfp::NodeMask::all(),
            true,
            &mut sched,
            &tunables,
        );

        assert_eq!(status, CompactionStatus::Skipped);
        assert_eq!(events.stalls, 0);
    }

    #[test]
    fn skips_without_fs_or_io_reentry() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        let mut lru = MockLru::new(4096);
        let mut migration = NoopMigration;
        let mut sched = CountingScheduler::default();
        let tunables = crate::gfp::CompactionTunables::new();

        let mut zones = [ZoneHandle {
            node_id: 0,
            zone: &zone,
            buddy: &mut buddy,
            lru: &mut lru,
            migration: &mut migration,
        }];

        let (status, _) = try_to_compact_pages(
            &mut zones,
            2,
            GfpFlags::MOVABLE,
            crate::gfp::NodeMask::all(),
            true,
            &mut sched,
            &tunables,
        );

        assert_eq!(status, CompactionStatus::Skipped);
    }

    #[test]
    fn filters_zones_outside_nodemask() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        let mut lru = MockLru::new(4096);
        let mut migration = NoopMigration;
        let mut sched = CountingScheduler::default();
        let tunables = crate::gfp::CompactionTunables::new();

        let mut zones = [ZoneHandle {
            node_id: 3,
            zone: &zone,
            buddy: &mut buddy,
            lru: &mut lru,
            migration: &mut migration,
        }];

        let (status, events) = try_to_compact_pages(
            &mut zones,
            2,
            GfpFlags::reclaimable(),
            crate::gfp::NodeMask::empty().with(0),
            true,
            &mut sched,
            &tunables,
        );

        assert_eq!(status, CompactionStatus::Skipped);
        assert_eq!(events.stalls, 1);
    }

    #[test]
    fn compact_node_raises_deferral_after_sync_failure() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        let mut lru = MockLru::new(4096);
        let mut migration = NoopMigration;
        let mut sched = CountingScheduler::default();
        sched.signal_pending.set(true);
        let tunables = crate::gfp::CompactionTunables::new();

        let mut zones = [ZoneHandle {
            node_id: 0,
            zone: &zone,
            buddy: &mut buddy,
            lru: &mut lru,
            migration: &mut migration,
        }];

        compact_node(&mut zones, 0, true, &mut sched, &tunables);

        assert_eq!(zones[0].zone.deferred_count(), 1);
    }
}
