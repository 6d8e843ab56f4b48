//! The MVU runtime that orchestrates the event loop and mount lifecycle.

#[cfg(any(test, feature = "testing"))]
use core::cell::RefCell;
#[cfg(any(test, feature = "testing"))]
use core::time::Duration;
#[cfg(any(test, feature = "testing"))]
use std::rc::Rc;

use flume::{Receiver, Sender};
use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt};

#[cfg(any(test, feature = "testing"))]
use futures::executor::LocalPool;
#[cfg(any(test, feature = "testing"))]
use futures::task::SpawnExt;

#[cfg(any(test, feature = "testing"))]
use crate::ManualTimer;
use crate::{Emitter, MvuLogic, Renderer, Subscription, SubscriptionHandle, Timer};

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want (tokio, async-std, embassy, etc.).
///
/// Function pointers and closures automatically implement this trait via the blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: BoxFuture<'static, ()>);
}

impl<F> Spawner for F
where
    F: Fn(BoxFuture<'static, ()>),
{
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self(future)
    }
}

/// Where a runtime is in its mount lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed but not yet mounted.
    Created,
    /// Rendering and processing events.
    Mounted,
    /// Torn down. Subscriptions are released and events are discarded.
    Unmounted,
}

/// Requests that a running [`MvuRuntime`] unmount.
///
/// Obtained from [`MvuRuntime::unmount_handle`]. Cheap to clone and safe to
/// use from any thread. Requests made after the runtime is gone are ignored.
#[derive(Clone)]
pub struct UnmountHandle(Sender<()>);

impl UnmountHandle {
    /// Ask the runtime to unmount. [`MvuRuntime::run`] returns once it has.
    pub fn unmount(&self) {
        // A full slot means an unmount is already pending.
        self.0.try_send(()).ok();
    }
}

enum Signal<Event> {
    Event(Event),
    Unmount,
}

/// The MVU runtime that orchestrates the event loop.
///
/// This is the core of the framework. When it mounts, it:
/// 1. Initializes the Model and initial Effects via [`MvuLogic::init`]
/// 2. Reduces the Model to Props via [`MvuLogic::view`] and delivers them to the [`Renderer`]
/// 3. Starts every [`Subscription`] from [`MvuLogic::subscriptions`]
///
/// Each event is then processed through [`MvuLogic::update`] and re-rendered.
/// When it unmounts, it releases all subscriptions and discards queued events,
/// so nothing started at mount outlives the component.
///
/// The runtime creates a single [`Emitter`] that can send events from any thread.
/// Events are queued via a lock-free channel and processed on the task that
/// awaits [`MvuRuntime::run`].
///
/// For testing with manual control, use [`TestMvuRuntime`] with a [`crate::TestRenderer`].
///
/// See the [crate-level documentation](crate) for a complete example.
///
/// # Type Parameters
///
/// * `Event` - The event type for your application
/// * `Model` - The model/state type for your application
/// * `Props` - The props type produced by the view function
/// * `Logic` - The logic implementation type (implements [`MvuLogic`])
/// * `Render` - The renderer implementation type (implements [`Renderer`])
/// * `Spawn` - The spawner implementation type (implements [`Spawner`])
/// * `Clock` - The timer driving subscriptions (implements [`Timer`])
pub struct MvuRuntime<Event, Model, Props, Logic, Render, Spawn, Clock>
where
    Event: Send + 'static,
    Model: Clone,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
    Clock: Timer,
{
    logic: Logic,
    renderer: Render,
    event_receiver: Receiver<Event>,
    model: Model,
    emitter: Emitter<Event>,
    spawner: Spawn,
    timer: Clock,
    unmount_sender: Sender<()>,
    unmount_receiver: Receiver<()>,
    subscriptions: Vec<SubscriptionHandle>,
    lifecycle: Lifecycle,
    _props: core::marker::PhantomData<Props>,
}

impl<Event, Model, Props, Logic, Render, Spawn, Clock>
    MvuRuntime<Event, Model, Props, Logic, Render, Spawn, Clock>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
    Clock: Timer,
{
    /// Create a new runtime.
    ///
    /// The runtime will not be mounted until [`MvuRuntime::run`] is called.
    ///
    /// # Arguments
    ///
    /// * `init_model` - The initial state
    /// * `logic` - Application logic implementing MvuLogic
    /// * `renderer` - Platform rendering implementation for rendering Props
    /// * `spawner` - Spawner to execute effects and subscriptions on your chosen runtime
    /// * `timer` - Time source for interval subscriptions, matching the spawner's runtime
    pub fn new(
        init_model: Model,
        logic: Logic,
        renderer: Render,
        spawner: Spawn,
        timer: Clock,
    ) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();
        let (unmount_sender, unmount_receiver) = flume::bounded(1);

        MvuRuntime {
            logic,
            renderer,
            event_receiver,
            model: init_model,
            emitter: Emitter::new(event_sender),
            spawner,
            timer,
            unmount_sender,
            unmount_receiver,
            subscriptions: Vec::new(),
            lifecycle: Lifecycle::Created,
            _props: core::marker::PhantomData,
        }
    }

    /// A handle that stops [`run`](Self::run) and tears the runtime down.
    pub fn unmount_handle(&self) -> UnmountHandle {
        UnmountHandle(self.unmount_sender.clone())
    }

    /// Where the runtime is in its mount lifecycle.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The current model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mount the runtime and process events until it is unmounted.
    ///
    /// - Uses MvuLogic::init to initialize the model and its initial effect.
    /// - Renders the initial Props and starts the logic's subscriptions.
    /// - Processes events from the channel until an [`UnmountHandle`] fires.
    /// - Unmounts: releases subscriptions and discards queued events.
    ///
    /// Events can be emitted from any thread via the Emitter, but are always processed
    /// sequentially on the task where this future is awaited/polled.
    ///
    /// A runtime mounts once. Calling this again after unmount returns immediately.
    pub async fn run(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            tracing::warn!(lifecycle = ?self.lifecycle, "runtime cannot be mounted again");
            return;
        }

        self.mount();

        loop {
            match self.next_signal().await {
                Signal::Event(event) => self.step(event),
                Signal::Unmount => break,
            }
        }

        self.unmount();
    }

    async fn next_signal(&self) -> Signal<Event> {
        let unmount = self.unmount_receiver.recv_async().fuse();
        let event = self.event_receiver.recv_async().fuse();
        futures::pin_mut!(unmount, event);

        futures::select_biased! {
            _ = unmount => Signal::Unmount,
            received = event => match received {
                Ok(event) => Signal::Event(event),
                // The runtime owns an emitter, so the channel only closes while dropping.
                Err(_) => Signal::Unmount,
            },
        }
    }

    fn mount(&mut self) {
        let (init_model, init_effect) = self.logic.init(self.model.clone());

        let initial_props = self.logic.view(&init_model, &self.emitter);
        self.renderer.render(initial_props);

        let subscriptions = self.logic.subscriptions(&init_model);
        self.model = init_model;
        self.lifecycle = Lifecycle::Mounted;

        self.spawner.spawn(init_effect.execute(&self.emitter));
        for subscription in subscriptions {
            self.subscribe(subscription);
        }

        tracing::debug!(subscriptions = self.subscriptions.len(), "mounted");
    }

    fn subscribe(&mut self, subscription: Subscription<Event>) {
        let Some(task) = subscription.into_task(self.emitter.clone(), self.timer.clone()) else {
            return;
        };

        let (abort, registration) = AbortHandle::new_pair();
        let task = Abortable::new(task, registration).map(|_| ());
        self.spawner.spawn(task.boxed());
        self.subscriptions.push(SubscriptionHandle::new(abort));
    }

    fn step(&mut self, event: Event) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }

        // Update model with event
        let (new_model, effect) = self.logic.update(event, &self.model);

        // Reduce to props and render
        let props = self.logic.view(&new_model, &self.emitter);
        self.renderer.render(props);

        self.model = new_model;

        self.spawner.spawn(effect.execute(&self.emitter));
        tracing::trace!("event processed");
    }

    fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }

        let released = self.subscriptions.len();
        self.subscriptions.clear();
        let discarded = self.event_receiver.drain().count();
        self.lifecycle = Lifecycle::Unmounted;

        tracing::debug!(released, discarded, "unmounted");
    }
}

#[cfg(any(test, feature = "testing"))]
/// Spawner that queues futures on a local pool instead of running them.
///
/// Only available with the `testing` feature or during tests.
///
/// Futures run when [`TestMvuDriver`] drives the pool, so interval
/// subscriptions make progress one deterministic step at a time.
#[derive(Clone)]
pub struct TestSpawner {
    pool: Rc<RefCell<LocalPool>>,
}

#[cfg(any(test, feature = "testing"))]
impl Spawner for TestSpawner {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        if let Err(err) = self.pool.borrow().spawner().spawn(future) {
            tracing::warn!(%err, "test spawner rejected a future");
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestSpawner {
    /// Run queued futures until none of them can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}

#[cfg(any(test, feature = "testing"))]
/// Creates a spawner for [`TestMvuRuntime`].
pub fn create_test_spawner() -> TestSpawner {
    TestSpawner {
        pool: Rc::new(RefCell::new(LocalPool::new())),
    }
}

#[cfg(any(test, feature = "testing"))]
type TestRuntime<Event, Model, Props, Logic, Render> =
    MvuRuntime<Event, Model, Props, Logic, Render, TestSpawner, ManualTimer>;

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Returned by [`TestMvuRuntime::run`]. Provides methods to process the
/// event queue, move the manual clock and unmount, for precise control in tests.
///
/// See [`TestMvuRuntime`] for usage.
pub struct TestMvuDriver<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    runtime: TestRuntime<Event, Model, Props, Logic, Render>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render> TestMvuDriver<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    /// Process all queued events.
    ///
    /// Runs spawned effects and processes the events they emit until the
    /// queue is empty. Call this after emitting events to drive the event
    /// loop in tests.
    pub fn process_events(&mut self) {
        loop {
            self.runtime.spawner.run_until_stalled();

            let mut processed = false;
            while let Ok(event) = self.runtime.event_receiver.try_recv() {
                self.runtime.step(event);
                processed = true;
            }

            if !processed {
                break;
            }
        }
    }

    /// Move the manual clock forward by `duration`, firing every deadline on the way.
    ///
    /// Deadlines fire one at a time and events are processed after each, so a
    /// subscription with period `p` ticks `duration / p` times.
    pub fn advance_time(&mut self, duration: Duration) {
        let target = self.runtime.timer.now() + duration;
        self.process_events();

        while let Some(deadline) = self
            .runtime
            .timer
            .next_deadline()
            .filter(|deadline| *deadline <= target)
        {
            self.runtime.timer.advance_to(deadline);
            self.process_events();
        }

        self.runtime.timer.advance_to(target);
        self.process_events();
    }

    /// Unmount the runtime, releasing subscriptions and discarding queued events.
    pub fn unmount(&mut self) {
        self.runtime.unmount();
        // Let aborted subscriptions observe their abort and drop their sleeps.
        self.runtime.spawner.run_until_stalled();
    }

    /// Where the runtime is in its mount lifecycle.
    pub fn lifecycle(&self) -> Lifecycle {
        self.runtime.lifecycle
    }

    /// The current model.
    pub fn model(&self) -> &Model {
        &self.runtime.model
    }

    /// The manual clock driving this runtime's subscriptions.
    pub fn timer(&self) -> &ManualTimer {
        &self.runtime.timer
    }

    /// Number of subscriptions currently held.
    pub fn active_subscriptions(&self) -> usize {
        self.runtime.subscriptions.len()
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime for MVU with manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`MvuRuntime`], this runtime does not automatically
/// process events when they are emitted. Instead, tests call
/// [`process_events`](TestMvuDriver::process_events) or
/// [`advance_time`](TestMvuDriver::advance_time) on the returned driver.
/// Subscriptions run on a [`ManualTimer`].
///
/// ```rust
/// use std::time::Duration;
/// use oxide_ticker::{Emitter, Effect, Renderer, MvuLogic, Subscription, TestMvuRuntime};
/// # #[derive(Clone)]
/// # enum Event { Tick }
/// # #[derive(Clone)]
/// # struct Model { count: i32 }
/// # struct Props { count: i32 }
/// # struct MyApp;
/// # impl MvuLogic<Event, Model, Props> for MyApp {
/// #     fn init(&self, model: Model) -> (Model, Effect<Event>) { (model, Effect::none()) }
/// #     fn update(&self, _event: Event, model: &Model) -> (Model, Effect<Event>) {
/// #         (Model { count: model.count + 1 }, Effect::none())
/// #     }
/// #     fn view(&self, model: &Model, _emitter: &Emitter<Event>) -> Props {
/// #         Props { count: model.count }
/// #     }
/// #     fn subscriptions(&self, _model: &Model) -> Vec<Subscription<Event>> {
/// #         vec![Subscription::every(Duration::from_secs(1), || Event::Tick)]
/// #     }
/// # }
/// # struct NullRenderer;
/// # impl Renderer<Props> for NullRenderer { fn render(&mut self, _props: Props) {} }
/// use oxide_ticker::create_test_spawner;
///
/// let runtime = TestMvuRuntime::new(
///     Model { count: 0 },
///     MyApp,
///     NullRenderer,
///     create_test_spawner()
/// );
/// let mut driver = runtime.run();
/// driver.advance_time(Duration::from_secs(3));
/// assert_eq!(driver.model().count, 3);
///
/// driver.unmount();
/// driver.advance_time(Duration::from_secs(3));
/// assert_eq!(driver.model().count, 3);
/// ```
pub struct TestMvuRuntime<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    runtime: TestRuntime<Event, Model, Props, Logic, Render>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render> TestMvuRuntime<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    /// Create a new test runtime driven by a fresh [`ManualTimer`].
    ///
    /// # Arguments
    ///
    /// * `init_model` - The initial state
    /// * `logic` - Application logic implementing MvuLogic
    /// * `renderer` - Platform rendering implementation for rendering Props
    /// * `spawner` - Test spawner from [`create_test_spawner`]
    pub fn new(init_model: Model, logic: Logic, renderer: Render, spawner: TestSpawner) -> Self {
        TestMvuRuntime {
            runtime: MvuRuntime::new(init_model, logic, renderer, spawner, ManualTimer::new()),
        }
    }

    /// Mounts the runtime and returns a driver for manual event processing.
    ///
    /// This renders the initial state, spawns the initial effect and starts
    /// subscriptions, then returns a [`TestMvuDriver`]. The initial effect does
    /// not run until the driver processes events.
    pub fn run(mut self) -> TestMvuDriver<Event, Model, Props, Logic, Render> {
        self.runtime.mount();
        self.runtime.spawner.run_until_stalled();

        TestMvuDriver {
            runtime: self.runtime,
        }
    }
}
