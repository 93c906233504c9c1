//! Blocking synchronization primitives for the queue.
//!
//! The heap itself is guarded by a `parking_lot::Mutex`; this module adds the
//! counting semaphore used to signal availability, and deadline helpers so a
//! single wait budget can span several blocking steps.

use std::time::Instant;

use parking_lot::{Condvar, Mutex, MutexGuard};
use prioq_core::{PqError, PqResult, Timeout};

/// Absolute form of a [`Timeout`], fixed when an operation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Must not block.
    Now,
    /// Block until this instant at the latest.
    At(Instant),
    /// Block as long as needed.
    Never,
}

impl Deadline {
    /// Starts the clock on `timeout`.
    pub fn after(timeout: Timeout) -> Self {
        match timeout {
            Timeout::NoWait => Deadline::Now,
            Timeout::After(d) if d.is_zero() => Deadline::Now,
            Timeout::After(d) => Instant::now()
                .checked_add(d)
                .map_or(Deadline::Never, Deadline::At),
            Timeout::Forever => Deadline::Never,
        }
    }

    /// Budget left until the deadline.
    pub fn remaining(&self) -> Timeout {
        match self {
            Deadline::Now => Timeout::NoWait,
            Deadline::At(at) => Timeout::from(at.saturating_duration_since(Instant::now())),
            Deadline::Never => Timeout::Forever,
        }
    }
}

/// Acquires `mutex`, giving up with [`PqError::Timeout`] at `deadline`.
pub fn lock_until<T>(mutex: &Mutex<T>, deadline: Deadline) -> PqResult<MutexGuard<'_, T>> {
    match deadline {
        Deadline::Now => mutex.try_lock(),
        Deadline::At(at) => mutex.try_lock_until(at),
        Deadline::Never => Some(mutex.lock()),
    }
    .ok_or(PqError::Timeout)
}

/// Counting semaphore with an upper bound.
///
/// Waiters block on a condition variable rather than spinning. Which waiter
/// wakes first when several are blocked is left to `parking_lot`.
#[derive(Debug)]
pub struct Semaphore {
    count: Mutex<usize>,
    max_count: usize,
    signal: Condvar,
}

impl Semaphore {
    /// Creates a semaphore holding `initial_count` permits, never more than
    /// `max_count`.
    ///
    /// Fails with [`PqError::Creation`] if `max_count` is zero or
    /// `initial_count` exceeds it.
    pub fn new(initial_count: usize, max_count: usize) -> PqResult<Self> {
        if max_count == 0 || initial_count > max_count {
            return Err(PqError::Creation);
        }
        Ok(Self {
            count: Mutex::new(initial_count),
            max_count,
            signal: Condvar::new(),
        })
    }

    /// Takes a permit if one is available, without blocking.
    pub fn try_acquire(&self) -> bool {
        let mut count = self.count.lock();
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    /// Takes a permit, blocking for at most `timeout`.
    pub fn acquire(&self, timeout: Timeout) -> PqResult<()> {
        self.acquire_until(Deadline::after(timeout))
    }

    /// Takes a permit, blocking until `deadline` at the latest.
    pub fn acquire_until(&self, deadline: Deadline) -> PqResult<()> {
        let mut count = self.count.lock();
        while *count == 0 {
            match deadline {
                Deadline::Now => return Err(PqError::Timeout),
                Deadline::At(at) => {
                    if self.signal.wait_until(&mut count, at).timed_out() && *count == 0 {
                        return Err(PqError::Timeout);
                    }
                }
                Deadline::Never => self.signal.wait(&mut count),
            }
        }
        *count -= 1;
        Ok(())
    }

    /// Returns a permit and wakes one waiter.
    ///
    /// Fails with [`PqError::CapacityExceeded`] if the count is already at
    /// its bound.
    pub fn release(&self) -> PqResult<()> {
        let mut count = self.count.lock();
        if *count >= self.max_count {
            return Err(PqError::CapacityExceeded);
        }
        *count += 1;
        drop(count);
        self.signal.notify_one();
        Ok(())
    }

    /// Current number of permits.
    pub fn count(&self) -> usize {
        *self.count.lock()
    }

    /// Upper bound on the number of permits.
    pub fn max_count(&self) -> usize {
        self.max_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn semaphore_rejects_bad_bounds() {
        assert_eq!(Semaphore::new(0, 0).err(), Some(PqError::Creation));
        assert_eq!(Semaphore::new(3, 2).err(), Some(PqError::Creation));
        assert!(Semaphore::new(2, 2).is_ok());
    }

    #[test]
    fn semaphore_release_and_acquire() {
        let sem = Semaphore::new(0, 2).expect("valid bounds");
        assert!(!sem.try_acquire());

        sem.release().expect("first release");
        sem.release().expect("second release");
        assert_eq!(sem.release(), Err(PqError::CapacityExceeded));
        assert_eq!(sem.count(), 2);

        assert_eq!(sem.acquire(Timeout::NoWait), Ok(()));
        assert!(sem.try_acquire());
        assert_eq!(sem.count(), 0);
    }

    #[test]
    fn semaphore_times_out_no_earlier_than_budget() {
        let sem = Semaphore::new(0, 1).expect("valid bounds");
        let budget = Duration::from_millis(30);

        let start = Instant::now();
        assert_eq!(sem.acquire(Timeout::After(budget)), Err(PqError::Timeout));
        assert!(start.elapsed() >= budget);
    }

    #[test]
    fn semaphore_wakes_blocked_waiter() {
        let sem = Arc::new(Semaphore::new(0, 1).expect("valid bounds"));
        let waiter = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || sem.acquire(Timeout::Forever))
        };

        thread::sleep(Duration::from_millis(10));
        sem.release().expect("release");
        assert_eq!(waiter.join().expect("waiter panicked"), Ok(()));
        assert_eq!(sem.count(), 0);
    }

    #[test]
    fn lock_until_times_out_while_held() {
        let mutex = Mutex::new(0u8);
        let _held = mutex.lock();

        assert!(matches!(lock_until(&mutex, Deadline::Now), Err(PqError::Timeout)));
        let deadline = Deadline::after(Timeout::After(Duration::from_millis(5)));
        assert!(matches!(lock_until(&mutex, deadline), Err(PqError::Timeout)));
    }

    #[test]
    fn deadline_remaining_budget() {
        assert_eq!(Deadline::after(Timeout::NoWait).remaining(), Timeout::NoWait);
        assert_eq!(Deadline::after(Timeout::Forever).remaining(), Timeout::Forever);
        match Deadline::after(Timeout::After(Duration::from_secs(60))).remaining() {
            Timeout::After(left) => assert!(left <= Duration::from_secs(60)),
            other => panic!("unexpected budget {other:?}"),
        }
    }
}
