//! Application logic trait defining the MVU contract.

use crate::{Effect, Emitter, Subscription};

/// Application logic trait defining the MVU contract.
///
/// Implementations provide three pure functions and an optional fourth:
/// - [`init`](Self::init): Initialize the model and produce initial effects
/// - [`update`](Self::update): Transform (Event, Model) → (Model, Effect)
/// - [`view`](Self::view): Derive Props from Model with event emitter capability
/// - [`subscriptions`](Self::subscriptions): Long-running event sources tied to the mount lifecycle
///
/// See the [crate-level documentation](crate) for a complete example.
pub trait MvuLogic<Event: Send, Model, Props> {
    /// Initialize the runtime from an initial model with effects and state changes as needed.
    ///
    /// This is called once when the runtime mounts.
    fn init(&self, model: Model) -> (Model, Effect<Event>);

    /// Reduce an event to an updated model and side effects.
    ///
    /// All state changes must happen through this function.
    fn update(&self, event: Event, model: &Model) -> (Model, Effect<Event>);

    /// Reduce to Props from the current model.
    ///
    /// The provided [`Emitter`] allows Props to contain callbacks that can
    /// trigger new events.
    fn view(&self, model: &Model, emitter: &Emitter<Event>) -> Props;

    /// Event sources to start when the runtime mounts.
    ///
    /// Called once with the initialized model. Every returned subscription is
    /// released when the runtime unmounts or is dropped.
    fn subscriptions(&self, _model: &Model) -> Vec<Subscription<Event>> {
        Vec::new()
    }
}
