//! Fixed-interval task scheduler.
//!
//! Each registration gets its own background loop that fires the task
//! once immediately and then every `period`. Every tick spawns the task
//! and moves on without awaiting it, so a slow task never delays the next
//! tick. Tasks that must not overlap guard themselves (see
//! [`run_cycle`](crate::sync::run_cycle)).
//!
//! All loops share one [`CancellationToken`]; [`Scheduler::shutdown`]
//! stops them. Tasks already spawned by a tick run to completion.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Smallest period accepted; `tokio::time::interval` panics on zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Owner of the periodic loops.
pub struct Scheduler {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Build a scheduler whose loops stop when `cancel` (or a parent) fires.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            handles: Vec::new(),
        }
    }

    /// Invoke `task` now and then every `period`, until shutdown.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn register<F, Fut>(&mut self, name: &'static str, period: Duration, task: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let cancel = self.cancel.clone();
        debug!(task = name, ?period, "registering periodic task");
        self.handles
            .push(tokio::spawn(tick_loop(name, period, task, cancel)));
    }

    /// Number of registered loops.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Stop every loop and wait for them to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
        debug!("scheduler stopped");
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn tick_loop<F, Fut>(name: &'static str, period: Duration, task: F, cancel: CancellationToken)
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut interval = tokio::time::interval(period);
    // The first tick completes immediately, which gives the initial run.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                trace!(task = name, "tick");
                tokio::spawn(task());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl Fn() -> std::future::Ready<()> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_immediately_then_every_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.register("count", Duration::from_secs(1), counting_task(&counter));

        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn registrations_are_independent() {
        let fast = Arc::new(AtomicUsize::new(0));
        let slow = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.register("fast", Duration::from_millis(100), counting_task(&fast));
        scheduler.register("slow", Duration::from_secs(1), counting_task(&slow));
        assert_eq!(scheduler.len(), 2);

        tokio::time::sleep(Duration::from_millis(950)).await;
        settle().await;

        assert_eq!(fast.load(Ordering::SeqCst), 10);
        assert_eq!(slow.load(Ordering::SeqCst), 1);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler.register("count", Duration::from_secs(1), counting_task(&counter));
        settle().await;

        scheduler.shutdown().await;
        let after_shutdown = counter.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), after_shutdown);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_task_does_not_delay_ticks() {
        let started = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        let s = Arc::clone(&started);
        scheduler.register("slow", Duration::from_millis(100), move || {
            let s = Arc::clone(&s);
            async move {
                s.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(10)).await;
            }
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        settle().await;
        assert_eq!(started.load(Ordering::SeqCst), 4);

        scheduler.shutdown().await;
    }
}
