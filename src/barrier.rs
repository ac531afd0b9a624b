//! Contains the CompletionBarrier, which blocks the rendering call
//! until every dispatched tile has been processed.  The target count
//! is registered at construction, before the first tile is enqueued,
//! so a worker finishing early can never race the caller's wait.

use std::sync::{Condvar, Mutex};

/// A counted completion barrier.  Workers call `complete_one` exactly
/// once per finished tile; `wait` returns once the registered total
/// has been reached.
pub struct CompletionBarrier {
    remaining: Mutex<usize>,
    all_done: Condvar,
}

impl CompletionBarrier {
    /// Registers the total number of completions the barrier waits
    /// for.  A total of zero makes `wait` return immediately.
    pub fn new(total: usize) -> CompletionBarrier {
        CompletionBarrier {
            remaining: Mutex::new(total),
            all_done: Condvar::new(),
        }
    }

    /// Records one completed unit of work, waking waiters when the
    /// count reaches zero.  Must be called at most `total` times.
    pub fn complete_one(&self) {
        let mut remaining = self.remaining.lock().unwrap();
        *remaining -= 1;
        if *remaining == 0 {
            self.all_done.notify_all();
        }
    }

    /// Blocks until every registered unit of work has completed.
    pub fn wait(&self) {
        let mut remaining = self.remaining.lock().unwrap();
        while *remaining > 0 {
            remaining = self.all_done.wait(remaining).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_releases_immediately() {
        CompletionBarrier::new(0).wait();
    }

    #[test]
    fn wait_releases_after_all_completions() {
        let barrier = CompletionBarrier::new(12);
        crossbeam::scope(|spawner| {
            let barrier = &barrier;
            for _ in 0..4 {
                spawner.spawn(move |_| {
                    for _ in 0..3 {
                        barrier.complete_one();
                    }
                });
            }
            barrier.wait();
        })
        .unwrap();
    }

    #[test]
    fn wait_blocks_until_the_last_completion() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let barrier = CompletionBarrier::new(1);
        let released = AtomicBool::new(false);
        crossbeam::scope(|spawner| {
            let barrier = &barrier;
            let released = &released;
            spawner.spawn(move |_| {
                barrier.wait();
                released.store(true, Ordering::SeqCst);
            });
            std::thread::sleep(std::time::Duration::from_millis(20));
            assert!(!released.load(Ordering::SeqCst));
            barrier.complete_one();
        })
        .unwrap();
        assert!(released.load(Ordering::SeqCst));
    }
}
