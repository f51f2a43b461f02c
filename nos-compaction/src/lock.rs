//! 4.A — Lock arbitration helper.
//!
//! Both zone-wide locks the engine holds (the buddy lock and the LRU
//! lock) are highly contended under load. This module is the *only*
//! place coarse locks are re-acquired mid-scan, so contention policy
//! stays uniform (spec.md section 4.A).

use core::sync::atomic::{AtomicUsize, Ordering};

use spin::{Mutex, MutexGuard};

use crate::sched::Scheduler;

/// A `spin::Mutex<()>` instrumented with a waiter counter so callers
/// can ask "is anyone else waiting on this lock right now", the way
/// the original relies on `spin_is_contended`. `spin`'s ticket lock
/// does not expose queue depth, so this crate tracks it explicitly.
pub struct ContendedLock {
    inner: Mutex<()>,
    waiters: AtomicUsize,
}

impl ContendedLock {
    /// Creates a new, uncontended lock.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(()),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Whether another caller is currently waiting to acquire this lock.
    pub fn is_contended(&self) -> bool {
        self.waiters.load(Ordering::Relaxed) > 0
    }

    /// Blocking acquire, counted as a waiter for the duration of the wait.
    pub fn lock(&self) -> ContendedGuard<'_> {
        self.waiters.fetch_add(1, Ordering::Relaxed);
        let guard = self.inner.lock();
        self.waiters.fetch_sub(1, Ordering::Relaxed);
        ContendedGuard { _guard: guard }
    }

    /// Non-blocking acquire.
    pub fn try_lock(&self) -> Option<ContendedGuard<'_>> {
        self.inner.try_lock().map(|guard| ContendedGuard { _guard: guard })
    }
}

impl Default for ContendedLock {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard released on drop, exactly like `MutexGuard`; kept as its
/// own type so `lock.rs` is the only module that names `spin::Mutex`.
pub struct ContendedGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

/// The arbitration policy (spec.md 4.A):
///
/// 1. If the task should yield, or the lock is contended:
///    - drop the guard if held;
///    - async: record contention, report aborted;
///    - sync: yield, then abort if a fatal signal arrived meanwhile.
/// 2. If not held and still going, acquire it.
///
/// Returns `None` on abort (caller must stop its scan); `Some(guard)`
/// otherwise, which may be a freshly (re-)acquired guard.
pub fn check_lock<'a>(
    lock: &'a ContendedLock,
    held: Option<ContendedGuard<'a>>,
    sched: &mut dyn Scheduler,
    sync: bool,
    contended_flag: Option<&core::sync::atomic::AtomicBool>,
) -> Option<ContendedGuard<'a>> {
    let mut held = held;

    if sched.need_resched() || lock.is_contended() {
        held = None; // dropping the guard here releases it

        if !sync {
            if let Some(flag) = contended_flag {
                flag.store(true, Ordering::Relaxed);
            }
            return None;
        }

        sched.cond_resched();
        if sched.fatal_signal_pending() {
            return None;
        }
    }

    if held.is_none() {
        held = Some(lock.lock());
    }

    held
}

/// `compact_trylock_irqsave`: the 4.A check starting from "not held".
/// Used by the free-page sweep and the capture path, both of which
/// only ever attempt-acquire rather than holding across iterations.
pub fn try_acquire<'a>(
    lock: &'a ContendedLock,
    sched: &mut dyn Scheduler,
    sync: bool,
    contended_flag: Option<&core::sync::atomic::AtomicBool>,
) -> Option<ContendedGuard<'a>> {
    check_lock(lock, None, sched, sync, contended_flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::mock::CountingScheduler;

    #[test]
    fn acquires_when_uncontended() {
        let lock = ContendedLock::new();
        let mut sched = CountingScheduler::default();
        let guard = check_lock(&lock, None, &mut sched, true, None);
        assert!(guard.is_some());
        assert_eq!(sched.resched_calls.get(), 0);
    }

    #[test]
    fn async_aborts_on_need_resched_and_marks_contended() {
        let lock = ContendedLock::new();
        let mut sched = CountingScheduler::default();
        sched.want_resched.set(true);
        let flag = core::sync::atomic::AtomicBool::new(false);
        let guard = check_lock(&lock, None, &mut sched, false, Some(&flag));
        assert!(guard.is_none());
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn sync_yields_then_reacquires() {
        let lock = ContendedLock::new();
        let mut sched = CountingScheduler::default();
        sched.want_resched.set(true);
        let guard = check_lock(&lock, None, &mut sched, true, None);
        assert!(guard.is_some());
        assert_eq!(sched.resched_calls.get(), 1);
    }

    #[test]
    fn sync_aborts_on_fatal_signal() {
        let lock = ContendedLock::new();
        let mut sched = CountingScheduler::default();
        sched.want_resched.set(true);
        sched.signal_pending.set(true);
        let guard = check_lock(&lock, None, &mut sched, true, None);
        assert!(guard.is_none());
    }

    #[test]
    fn releases_held_guard_on_contention() {
        let lock = ContendedLock::new();
        let mut sched = CountingScheduler::default();
        let held = lock.lock();
        // Simulate contention while held.
        sched.want_resched.set(true);
        let result = check_lock(&lock, Some(held), &mut sched, false, None);
        assert!(result.is_none());
        // Lock must actually be free now.
        assert!(lock.try_lock().is_some());
    }
}
