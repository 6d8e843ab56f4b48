//! Long-running event sources bound to the mount lifecycle.

use core::time::Duration;

use futures::future::{AbortHandle, BoxFuture, FutureExt};

use crate::{Emitter, Timer};

/// A long-running event source started when the runtime mounts.
///
/// Returned from [`MvuLogic::subscriptions`](crate::MvuLogic::subscriptions).
/// The runtime keeps a [`SubscriptionHandle`] for every subscription it
/// starts and releases them all on unmount, so no source outlives the
/// component that asked for it.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use oxide_ticker::Subscription;
///
/// enum Event { Tick }
///
/// let every_second = Subscription::every(Duration::from_secs(1), || Event::Tick);
/// assert_eq!(every_second.period(), Duration::from_secs(1));
/// ```
pub struct Subscription<Event> {
    period: Duration,
    make_event: Box<dyn Fn() -> Event + Send>,
}

impl<Event: Send + 'static> Subscription<Event> {
    /// Emit `make_event()` once per `period`, starting one period after mount.
    pub fn every<F>(period: Duration, make_event: F) -> Self
    where
        F: Fn() -> Event + Send + 'static,
    {
        Self {
            period,
            make_event: Box::new(make_event),
        }
    }

    /// Time between emitted events.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Build the future that drives this subscription.
    ///
    /// Returns `None` for a zero period, which could never yield between ticks.
    pub(crate) fn into_task<T: Timer>(
        self,
        emitter: Emitter<Event>,
        timer: T,
    ) -> Option<BoxFuture<'static, ()>> {
        if self.period.is_zero() {
            tracing::warn!("refusing to start an interval subscription with a zero period");
            return None;
        }

        let Subscription { period, make_event } = self;
        let task = async move {
            loop {
                timer.sleep(period).await;
                if emitter.is_closed() {
                    break;
                }
                emitter.emit(make_event());
            }
            tracing::trace!(?period, "interval subscription stopped");
        };
        Some(task.boxed())
    }
}

/// Ownership of a running subscription.
///
/// Dropping the handle aborts the task at its
/// next suspension point. The task never emits again after that.
#[must_use = "dropping a SubscriptionHandle stops the subscription"]
pub struct SubscriptionHandle {
    abort: AbortHandle,
}

impl SubscriptionHandle {
    pub(crate) fn new(abort: AbortHandle) -> Self {
        Self { abort }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
