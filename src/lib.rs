//! A counter that ticks on a fixed interval, built on a lightweight
//! Model-View-Update (MVU) runtime with a real mount/unmount lifecycle.
//!
//! The runtime implements the MVU pattern with unidirectional data flow and
//! controlled side effects. Interval [`Subscription`]s are started when a
//! runtime mounts and released when it unmounts, so a timer never outlives the
//! component that started it.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use oxide_ticker::{Emitter, Effect, MvuLogic, MvuRuntime, Renderer, Subscription, Timer};
//! use futures::future::BoxFuture;
//!
//! #[derive(Clone)]
//! enum Event { Tick }
//!
//! #[derive(Clone)]
//! struct Model { count: u64 }
//!
//! struct Props { count: u64 }
//!
//! struct MyLogic { amount: u64 }
//!
//! impl MvuLogic<Event, Model, Props> for MyLogic {
//!     fn init(&self, model: Model) -> (Model, Effect<Event>) {
//!         (model, Effect::none())
//!     }
//!
//!     fn update(&self, event: Event, model: &Model) -> (Model, Effect<Event>) {
//!         match event {
//!             Event::Tick => (Model { count: model.count + self.amount }, Effect::none()),
//!         }
//!     }
//!
//!     fn view(&self, model: &Model, _emitter: &Emitter<Event>) -> Props {
//!         Props { count: model.count }
//!     }
//!
//!     fn subscriptions(&self, _model: &Model) -> Vec<Subscription<Event>> {
//!         vec![Subscription::every(Duration::from_secs(1), || Event::Tick)]
//!     }
//! }
//!
//! struct MyRenderer;
//! impl Renderer<Props> for MyRenderer {
//!     fn render(&mut self, _props: Props) {}
//! }
//!
//! #[derive(Clone)]
//! struct MyTimer;
//! impl Timer for MyTimer {
//!     fn sleep(&self, _period: Duration) -> BoxFuture<'static, ()> {
//!         // e.g. Box::pin(tokio::time::sleep(period))
//!         Box::pin(futures::future::pending())
//!     }
//! }
//!
//! // Spawn effect and subscription futures on your chosen runtime
//! let spawner = |_fut: BoxFuture<'static, ()>| {
//!     // e.g., tokio::spawn(fut);
//! };
//!
//! let mut runtime = MvuRuntime::new(
//!     Model { count: 0 },
//!     MyLogic { amount: 1 },
//!     MyRenderer,
//!     spawner,
//!     MyTimer,
//! );
//!
//! let unmount = runtime.unmount_handle();
//! unmount.unmount();
//! futures::executor::block_on(runtime.run());
//! ```

mod app;
mod config;
mod counter;
mod dom;
mod effect;
mod emitter;
mod error;
mod logic;
mod renderer;
mod runtime;
mod subscription;
mod timer;

// Public re-exports
pub use app::{page, App, COUNT_HEADING};
pub use config::{CounterConfig, DEFAULT_MOUNT_TARGET, DEFAULT_TICK_INTERVAL};
pub use counter::{Counter, CounterEvent, CounterModel, CounterProps};
pub use dom::{Document, Node, Root};
pub use effect::Effect;
pub use emitter::Emitter;
pub use error::Error;
pub use logic::MvuLogic;
pub use renderer::Renderer;
pub use runtime::{Lifecycle, MvuRuntime, Spawner, UnmountHandle};
pub use subscription::{Subscription, SubscriptionHandle};
pub use timer::Timer;

#[cfg(feature = "tokio")]
pub use timer::TokioTimer;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{create_test_spawner, TestMvuDriver, TestMvuRuntime, TestSpawner};
#[cfg(any(test, feature = "testing"))]
pub use timer::ManualTimer;
