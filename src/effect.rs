//! Declarative effect system for describing deferred event processing.

use core::future::Future;

use futures::future::{self, BoxFuture, FutureExt};

use crate::Emitter;

/// Declarative description of events to be processed.
///
/// Effects describe one-shot asynchronous or deferred work that will
/// produce events. They are returned from [`MvuLogic::init`](crate::MvuLogic::init)
/// and [`MvuLogic::update`](crate::MvuLogic::update) alongside the new model state,
/// and the runtime hands the resulting future to its [`Spawner`](crate::Spawner).
///
/// Long-running event sources such as timers belong in
/// [`Subscription`](crate::Subscription) instead, so the runtime can release
/// them on unmount.
///
/// # Example
///
/// ```rust
/// use oxide_ticker::Effect;
///
/// enum Event {
///     LoadData,
///     DataLoaded(String),
/// }
///
/// // Trigger a follow-up event
/// let effect = Effect::just(Event::LoadData);
///
/// // Combine multiple effects
/// let effect = Effect::batch(vec![
///     Effect::just(Event::LoadData),
///     Effect::just(Event::DataLoaded("cached".to_string())),
/// ]);
///
/// // No side effects
/// let effect: Effect<Event> = Effect::none();
/// ```
#[allow(clippy::type_complexity)]
pub struct Effect<Event: Send>(Box<dyn FnOnce(Emitter<Event>) -> BoxFuture<'static, ()> + Send>);

impl<Event: Send + 'static> Effect<Event> {
    /// Turn the effect into a future bound to `emitter`.
    ///
    /// Nothing happens until the returned future is polled.
    pub fn execute(self, emitter: &Emitter<Event>) -> BoxFuture<'static, ()> {
        (self.0)(emitter.clone())
    }

    /// Create an effect that emits a single event.
    ///
    /// Useful for triggering immediate follow-up events.
    pub fn just(event: Event) -> Self {
        Self(Box::new(move |emitter: Emitter<Event>| {
            async move { emitter.emit(event) }.boxed()
        }))
    }

    /// Create an empty effect.
    ///
    /// Prefer this when semantically indicating "no side effects".
    pub fn none() -> Self {
        Self(Box::new(|_| future::ready(()).boxed()))
    }

    /// Combine multiple effects into a single effect.
    ///
    /// All effects are started together. Events they emit are queued in the
    /// order they are produced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_ticker::Effect;
    ///
    /// enum Event { A, B, C }
    ///
    /// let combined = Effect::batch(vec![
    ///     Effect::just(Event::A),
    ///     Effect::just(Event::B),
    ///     Effect::just(Event::C),
    /// ]);
    /// ```
    pub fn batch(effects: Vec<Effect<Event>>) -> Self {
        Self(Box::new(move |emitter: Emitter<Event>| {
            let futures: Vec<_> = effects
                .into_iter()
                .map(|effect| effect.execute(&emitter))
                .collect();
            future::join_all(futures).map(|_| ()).boxed()
        }))
    }

    /// Create an effect from an async block that receives the emitter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_ticker::Effect;
    ///
    /// enum Event { Loaded(u64) }
    ///
    /// let effect = Effect::from_async(|emitter| async move {
    ///     emitter.emit(Event::Loaded(42));
    /// });
    /// ```
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Emitter<Event>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Box::new(move |emitter: Emitter<Event>| f(emitter).boxed()))
    }
}
