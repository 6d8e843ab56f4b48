//! The counter component: a count that grows by a fixed amount on every tick.

use core::time::Duration;

use crate::{CounterConfig, Effect, Emitter, MvuLogic, Subscription, DEFAULT_TICK_INTERVAL};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterModel {
    pub count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterEvent {
    Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterProps {
    pub count: u64,
}

/// Adds `amount` to the count once per tick interval while mounted.
///
/// The increment saturates at `u64::MAX`, so the count never decreases.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use oxide_ticker::{create_test_spawner, Counter, CounterModel, TestMvuRuntime, TestRenderer};
///
/// let renderer = TestRenderer::new();
/// let runtime = TestMvuRuntime::new(
///     CounterModel::default(),
///     Counter::new(5),
///     renderer.clone(),
///     create_test_spawner(),
/// );
///
/// let mut driver = runtime.run();
/// driver.advance_time(Duration::from_secs(2));
///
/// assert_eq!(renderer.last().map(|props| props.count), Some(10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counter {
    amount: u64,
    tick_interval: Duration,
}

impl Counter {
    /// A counter adding `amount` once per [`DEFAULT_TICK_INTERVAL`].
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn from_config(config: &CounterConfig) -> Self {
        Self::new(config.amount).with_tick_interval(config.tick_interval)
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl MvuLogic<CounterEvent, CounterModel, CounterProps> for Counter {
    fn init(&self, model: CounterModel) -> (CounterModel, Effect<CounterEvent>) {
        (model, Effect::none())
    }

    fn update(
        &self,
        event: CounterEvent,
        model: &CounterModel,
    ) -> (CounterModel, Effect<CounterEvent>) {
        match event {
            CounterEvent::Tick => {
                let count = model.count.saturating_add(self.amount);
                tracing::trace!(count, "tick");
                (CounterModel { count }, Effect::none())
            }
        }
    }

    fn view(&self, model: &CounterModel, _emitter: &Emitter<CounterEvent>) -> CounterProps {
        CounterProps { count: model.count }
    }

    fn subscriptions(&self, _model: &CounterModel) -> Vec<Subscription<CounterEvent>> {
        vec![Subscription::every(self.tick_interval, || CounterEvent::Tick)]
    }
}
