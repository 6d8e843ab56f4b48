//! The page container around the counter.

use crate::{
    Counter, CounterConfig, CounterEvent, CounterModel, CounterProps, Effect, Emitter, MvuLogic,
    Node, Subscription,
};

/// Heading shown above the count.
pub const COUNT_HEADING: &str = "The count is:";

/// The page: a heading followed by the counter's value.
///
/// Owns the [`Counter`] and passes its amount down unchanged; all state
/// lives in the counter's model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct App {
    counter: Counter,
}

impl App {
    pub fn new(amount: u64) -> Self {
        Self {
            counter: Counter::new(amount),
        }
    }

    pub fn from_config(config: &CounterConfig) -> Self {
        Self {
            counter: Counter::from_config(config),
        }
    }
}

/// `<div><h2>The count is:</h2><h1>{count}</h1></div>`
pub fn page(props: &CounterProps) -> Node {
    Node::element(
        "div",
        [
            Node::element("h2", [Node::text(COUNT_HEADING)]),
            Node::element("h1", [Node::text(props.count.to_string())]),
        ],
    )
}

impl MvuLogic<CounterEvent, CounterModel, Node> for App {
    fn init(&self, model: CounterModel) -> (CounterModel, Effect<CounterEvent>) {
        self.counter.init(model)
    }

    fn update(
        &self,
        event: CounterEvent,
        model: &CounterModel,
    ) -> (CounterModel, Effect<CounterEvent>) {
        self.counter.update(event, model)
    }

    fn view(&self, model: &CounterModel, emitter: &Emitter<CounterEvent>) -> Node {
        page(&self.counter.view(model, emitter))
    }

    fn subscriptions(&self, model: &CounterModel) -> Vec<Subscription<CounterEvent>> {
        self.counter.subscriptions(model)
    }
}
