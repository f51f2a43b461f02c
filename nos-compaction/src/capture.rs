//! 4.F — Opportunistic capture path.
//!
//! Called after each migration batch. Races the allocator deliberately
//! to close the window between compaction producing a contiguous free
//! run and another CPU consuming it (spec.md section 9).

use crate::control::CompactControl;
use crate::lock;
use crate::sched::Scheduler;
use crate::types::{MigrateType, MAX_ORDER};
use crate::zone::{BuddyAllocator, Zone};

/// Migrate types searched for a capture candidate, given the caller's
/// preferred type (spec.md 4.F): MOVABLE requests may steal from any
/// regular type; everything else searches only its own type.
fn capture_candidate_types(preferred: MigrateType) -> &'static [MigrateType] {
    const REGULAR: [MigrateType; 3] =
        [MigrateType::Movable, MigrateType::Reclaimable, MigrateType::Unmovable];
    match preferred {
        MigrateType::Movable => &REGULAR,
        MigrateType::Reclaimable => &[MigrateType::Reclaimable],
        MigrateType::Unmovable => &[MigrateType::Unmovable],
        MigrateType::Cma => &[MigrateType::Cma],
        MigrateType::Isolate | MigrateType::Reserve => &[],
    }
}

/// Attempts to capture a freshly materialized free page at `cc.order`
/// or above into `cc.capture_slot`. No-op if no capture slot was
/// supplied, or it is already filled.
pub fn capture_free_page(
    zone: &Zone,
    buddy: &mut dyn BuddyAllocator,
    cc: &mut CompactControl<'_>,
    sched: &mut dyn Scheduler,
) {
    if cc.capture_slot_filled() {
        return;
    }
    let Some(start_order) = cc.order.order() else {
        return;
    };

    let types = capture_candidate_types(cc.migratetype);

    for order in start_order..MAX_ORDER {
        for &mtype in types {
            if !buddy.free_area_nonempty(order, mtype) {
                continue;
            }

            let Some(guard) = lock::try_acquire(&zone.zone_lock, sched, cc.sync, cc.contended)
            else {
                return;
            };

            if !buddy.free_area_nonempty(order, mtype) {
                drop(guard);
                continue;
            }

            if let Some(page) = buddy.capture_free_page(order, mtype) {
                drop(guard);
                cc.deposit_capture(page);
                return;
            }
            drop(guard);
        }
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
    fn captures_matching_free_block() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        buddy.free_block(256, 3);
        let mut slot = None;
        let mut control = cc();
        control.capture_slot = Some(&mut slot);
        let mut sched = CountingScheduler::default();

        capture_free_page(&zone, &mut buddy, &mut control, &mut sched);

        assert_eq!(slot, Some(Pfn::new(256)));
    }

    #[test]
    fn leaves_slot_empty_with_no_match() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        let mut slot = None;
        let mut control = cc();
        control.capture_slot = Some(&mut slot);
        let mut sched = CountingScheduler::default();

        capture_free_page(&zone, &mut buddy, &mut control, &mut sched);

        assert_eq!(slot, None);
    }

    #[test]
    fn skips_when_slot_already_filled() {
        let zone = Zone::new(Pfn::new(0), 4096);
        let mut buddy = MockBuddy::new(4096);
        buddy.free_block(256, 3);
        let mut slot = Some(Pfn::new(9));
        let mut control = cc();
        control.capture_slot = Some(&mut slot);
        let mut sched = CountingScheduler::default();

        capture_free_page(&zone, &mut buddy, &mut control, &mut sched);

        assert_eq!(slot, Some(Pfn::new(9)));
    }
}
