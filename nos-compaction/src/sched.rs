//! Scheduling/cancellation contract consumed by the lock arbitration
//! helper and the migrate-range backpressure wait (spec.md sections
//! 4.A, 4.C, 5). The real scheduler, timers, and signal delivery are
//! owned by the embedding kernel; this crate only calls through here.

/// Cooperative scheduling and cancellation primitives.
pub trait Scheduler {
    /// Whether the current task should yield (`need_resched()`).
    fn need_resched(&self) -> bool;
    /// Voluntarily yields the CPU (`cond_resched()`). Only ever called
    /// in `sync` mode — spec.md section 5 forbids it in async mode.
    fn cond_resched(&mut self);
    /// Whether a fatal signal is pending on the current task.
    fn fatal_signal_pending(&self) -> bool;
    /// Waits on a short congestion timer (`congestion_wait(..., HZ/10)`
    /// in the original), used by the too-many-isolated backpressure
    /// check in spec.md 4.C. Only ever called in `sync` mode.
    fn congestion_wait_short(&mut self);
}

#[cfg(any(test, feature = "std"))]
pub mod mock {
    //! A deterministic `Scheduler` for tests and benches: never asks
    //! to reschedule, never signals, and counts how many times each
    //! primitive was invoked so tests can assert on suspension points.
    use super::Scheduler;
    use core::cell::Cell;

    /// Test double that records call counts instead of actually
    /// yielding or sleeping.
    #[derive(Default)]
    pub struct CountingScheduler {
        /// Set to request `need_resched()` return true on the next call.
        pub want_resched: Cell<bool>,
        /// Set to make `fatal_signal_pending()` return true.
        pub signal_pending: Cell<bool>,
        /// Number of times `cond_resched` was called.
        pub resched_calls: Cell<usize>,
        /// Number of times `congestion_wait_short` was called.
        pub congestion_waits: Cell<usize>,
    }

    impl Scheduler for CountingScheduler {
        fn need_resched(&self) -> bool {
            self.want_resched.get()
        }

        fn cond_resched(&mut self) {
            self.resched_calls.set(self.resched_calls.get() + 1);
        }

        fn fatal_signal_pending(&self) -> bool {
            self.signal_pending.get()
        }

        fn congestion_wait_short(&mut self) {
            self.congestion_waits.set(self.congestion_waits.get() + 1);
        }
    }
}
