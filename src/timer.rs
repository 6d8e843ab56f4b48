//! Time sources for interval subscriptions.

use core::time::Duration;

use futures::future::BoxFuture;

#[cfg(any(test, feature = "testing"))]
use futures::channel::oneshot;
#[cfg(any(test, feature = "testing"))]
use futures::FutureExt;
#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// A source of delays for [`Subscription`](crate::Subscription)s.
///
/// Pair it with the [`Spawner`](crate::Spawner) of the same async runtime:
/// a tokio spawner with [`TokioTimer`], the test spawner with [`ManualTimer`].
pub trait Timer: Clone + Send + Sync + 'static {
    /// A future that completes once `period` has elapsed.
    fn sleep(&self, period: Duration) -> BoxFuture<'static, ()>;
}

/// Timer backed by `tokio::time`.
///
/// Only available with the `tokio` feature.
#[cfg(feature = "tokio")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "tokio")]
impl Timer for TokioTimer {
    fn sleep(&self, period: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(period))
    }
}

#[cfg(any(test, feature = "testing"))]
struct ManualClock {
    now: Duration,
    sleepers: Vec<(Duration, oneshot::Sender<()>)>,
}

#[cfg(any(test, feature = "testing"))]
/// Deterministic timer whose clock only moves when told to.
///
/// Only available with the `testing` feature.
///
/// Sleeps register a deadline relative to the current manual time and
/// complete once [`advance_to`](Self::advance_to) reaches it.
/// [`TestMvuDriver::advance_time`](crate::TestMvuDriver::advance_time) drives
/// it one deadline at a time so repeating subscriptions fire once per period.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use oxide_ticker::{ManualTimer, Timer};
///
/// let timer = ManualTimer::new();
/// let _sleep = timer.sleep(Duration::from_secs(1));
///
/// assert_eq!(timer.next_deadline(), Some(Duration::from_secs(1)));
/// assert_eq!(timer.advance_to(Duration::from_secs(1)), 1);
/// assert_eq!(timer.next_deadline(), None);
/// ```
pub struct ManualTimer {
    clock: Arc<Mutex<ManualClock>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for ManualTimer {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl ManualTimer {
    /// A clock starting at zero with no pending sleeps.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(Mutex::new(ManualClock {
                now: Duration::ZERO,
                sleepers: Vec::new(),
            })),
        }
    }

    /// Time elapsed on the manual clock.
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// The earliest deadline still awaited by a live sleep.
    pub fn next_deadline(&self) -> Option<Duration> {
        let mut clock = self.clock.lock();
        clock.sleepers.retain(|(_, waker)| !waker.is_canceled());
        clock.sleepers.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Move the clock forward to `instant` and wake every sleep that is due.
    ///
    /// The clock never moves backwards. Returns the number of sleeps woken.
    pub fn advance_to(&self, instant: Duration) -> usize {
        let mut clock = self.clock.lock();
        if instant > clock.now {
            clock.now = instant;
        }

        let now = clock.now;
        let (due, pending): (Vec<_>, Vec<_>) = clock
            .sleepers
            .drain(..)
            .partition(|(deadline, _)| *deadline <= now);
        clock.sleepers = pending;

        due.into_iter()
            .filter_map(|(_, waker)| waker.send(()).ok())
            .count()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Timer for ManualTimer {
    fn sleep(&self, period: Duration) -> BoxFuture<'static, ()> {
        let (waker, fired) = oneshot::channel();
        {
            let mut clock = self.clock.lock();
            let deadline = clock.now + period;
            clock.sleepers.push((deadline, waker));
        }
        fired.map(|_| ()).boxed()
    }
}
