//! Single-lane admission gate for outbound calls.
//!
//! The queue holds the timestamps of recent transport calls and one lane.
//! Work waits for the lane in submission order (the lane is a fair
//! [`tokio::sync::Mutex`]), and every call made while holding the lane is
//! first admitted against the rolling window.

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;
use tracing::debug;

/// Default rolling window over which the cap applies.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Default share of the nominal quota the queue actually uses, in percent.
pub const DEFAULT_SAFETY_PERCENT: u32 = 80;

/// Derives the admission cap from a nominal per-window quota.
///
/// The result is never zero.
///
/// # Examples
///
/// ```
/// use motion_api::queue::effective_cap;
///
/// assert_eq!(effective_cap(10, 80), 8);
/// assert_eq!(effective_cap(12, 80), 9);
/// assert_eq!(effective_cap(1, 80), 1);
/// ```
#[must_use]
pub fn effective_cap(per_window: u32, safety_percent: u32) -> usize {
    let scaled = u64::from(per_window) * u64::from(safety_percent.min(100)) / 100;
    usize::try_from(scaled).unwrap_or(usize::MAX).max(1)
}

/// Start times of the calls made within the current window, oldest first.
#[derive(Debug, Default)]
struct AdmissionLog {
    started: VecDeque<Instant>,
}

impl AdmissionLog {
    fn evict(&mut self, now: Instant, window: Duration) {
        while self
            .started
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) >= window)
        {
            self.started.pop_front();
        }
    }
}

/// Bounds how many calls start per rolling window and runs them one at a
/// time.
#[derive(Debug)]
pub struct ThroughputQueue {
    cap: usize,
    window: Duration,
    lane: Mutex<AdmissionLog>,
}

impl ThroughputQueue {
    /// Creates a queue admitting at most `cap` calls per `window`.
    #[must_use]
    pub fn new(cap: usize, window: Duration) -> Self {
        Self {
            cap: cap.max(1),
            window,
            lane: Mutex::new(AdmissionLog::default()),
        }
    }

    /// Creates a queue from a nominal per-minute quota, keeping
    /// `safety_percent` of it.
    #[must_use]
    pub fn from_rate_limit(per_minute: u32, safety_percent: u32) -> Self {
        Self::new(effective_cap(per_minute, safety_percent), DEFAULT_WINDOW)
    }

    /// The admission cap per window.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// The rolling window length.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Waits for the lane. Callers get it in the order they asked.
    pub async fn acquire(&self) -> Lane<'_> {
        Lane {
            log: self.lane.lock().await,
            cap: self.cap,
            window: self.window,
        }
    }

    /// Runs `work` once it holds the lane and returns its output.
    ///
    /// The lane is released when the future completes, whatever its
    /// outcome.
    pub async fn enqueue<'q, F, Fut, T>(&'q self, work: F) -> T
    where
        F: FnOnce(Lane<'q>) -> Fut,
        Fut: Future<Output = T>,
    {
        let lane = self.acquire().await;
        work(lane).await
    }
}

/// Exclusive use of the outbound lane.
#[derive(Debug)]
pub struct Lane<'q> {
    log: MutexGuard<'q, AdmissionLog>,
    cap: usize,
    window: Duration,
}

impl Lane<'_> {
    /// Waits until one more call fits in the rolling window, then records
    /// it. Must be called right before every transport call.
    pub async fn admit(&mut self) {
        let now = Instant::now();
        self.log.evict(now, self.window);
        if self.log.started.len() >= self.cap {
            if let Some(&oldest) = self.log.started.front() {
                let ready_at = oldest + self.window;
                debug!(
                    wait_ms = ready_at.saturating_duration_since(now).as_millis() as u64,
                    cap = self.cap,
                    "admission window full"
                );
                tokio::time::sleep_until(ready_at).await;
            }
            self.log.evict(Instant::now(), self.window);
        }
        self.log.started.push_back(Instant::now());
    }

    /// Number of calls recorded in the current window.
    #[must_use]
    pub fn in_window(&self) -> usize {
        self.log.started.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn cap_derivation() {
        assert_eq!(effective_cap(10, 80), 8);
        assert_eq!(effective_cap(12, 80), 9);
        assert_eq!(effective_cap(100, 100), 100);
        assert_eq!(effective_cap(0, 80), 1);
        assert_eq!(effective_cap(10, 250), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn cap_plus_one_waits_for_window() {
        let queue = ThroughputQueue::new(3, Duration::from_secs(60));
        let start = Instant::now();
        let mut admitted = Vec::new();

        for _ in 0..4 {
            let mut lane = queue.acquire().await;
            lane.admit().await;
            admitted.push(Instant::now() - start);
        }

        assert_eq!(admitted[..3], [Duration::ZERO; 3]);
        assert_eq!(admitted[3], Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn window_rolls_per_admission() {
        let queue = ThroughputQueue::new(2, Duration::from_secs(60));
        let start = Instant::now();

        queue.acquire().await.admit().await;
        tokio::time::advance(Duration::from_secs(30)).await;
        queue.acquire().await.admit().await;

        // third call waits for the first one to leave the window
        queue.acquire().await.admit().await;
        assert_eq!(Instant::now() - start, Duration::from_secs(60));

        // fourth waits for the second
        queue.acquire().await.admit().await;
        assert_eq!(Instant::now() - start, Duration::from_secs(90));
    }

    #[tokio::test(start_paused = true)]
    async fn lane_is_fifo() {
        let queue = Arc::new(ThroughputQueue::new(10, Duration::from_secs(60)));
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let first = queue.acquire().await;
        let mut handles = Vec::new();
        for i in 0..5 {
            let queue = Arc::clone(&queue);
            let order = Arc::clone(&order);
            handles.push(tokio::spawn(async move {
                queue
                    .enqueue(|mut lane| async move {
                        lane.admit().await;
                        order.lock().unwrap().push(i);
                    })
                    .await;
            }));
            // let each task reach the lane before spawning the next
            tokio::task::yield_now().await;
        }
        drop(first);

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_returns_work_output() {
        let queue = ThroughputQueue::from_rate_limit(12, 80);
        assert_eq!(queue.cap(), 9);
        let value = queue
            .enqueue(|mut lane| async move {
                lane.admit().await;
                lane.in_window()
            })
            .await;
        assert_eq!(value, 1);
    }
}
