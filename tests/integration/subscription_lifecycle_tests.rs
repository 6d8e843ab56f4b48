use std::time::Duration;

use super::{build_integration_test, MockSubscriptionsDependency, TestEvent};
use mockall::predicate::eq;
use futures::future::BoxFuture;
use futures::task::SpawnExt;
use futures::FutureExt;
use oxide_ticker::{
    Counter, CounterModel, CounterProps, Effect, Emitter, Lifecycle, ManualTimer, MvuLogic,
    MvuRuntime, Renderer, Subscription, TestRenderer, Timer,
};

const PERIOD: Duration = Duration::from_millis(100);

fn every_period_increment() -> MockSubscriptionsDependency {
    let mut subscriptions = MockSubscriptionsDependency::new();
    subscriptions
        .expect_on_mount()
        .with(eq(0))
        .times(1)
        .returning(|_| vec![Subscription::every(PERIOD, || TestEvent::Increment)]);
    subscriptions
}

#[test]
fn given_an_interval_subscription_should_start_once_at_mount() {
    let test = build_integration_test()
        .given_subscriptions(every_period_increment())
        .build();

    assert_eq!(test.driver.active_subscriptions(), 1);
    assert_eq!(test.driver.timer().next_deadline(), Some(PERIOD));
}

#[test]
fn given_an_interval_subscription_should_not_fire_before_a_full_period() {
    let mut test = build_integration_test()
        .given_subscriptions(every_period_increment())
        .build();

    test.driver.advance_time(PERIOD - Duration::from_millis(1));

    assert_eq!(test.renders.count(), 1);
}

#[test]
fn given_an_interval_subscription_should_emit_once_per_period() {
    let mut test = build_integration_test()
        .given_subscriptions(every_period_increment())
        .build();

    test.driver.advance_time(PERIOD * 5);

    test.renders.with_renders(|renders| {
        let counts: Vec<_> = renders.iter().map(|props| props.count).collect();
        assert_eq!(counts, vec![0, 1, 2, 3, 4, 5]);
    });
}

#[test]
fn given_small_time_steps_should_accumulate_into_ticks() {
    let mut test = build_integration_test()
        .given_subscriptions(every_period_increment())
        .build();

    for _ in 0..10 {
        test.driver.advance_time(PERIOD / 4);
    }

    assert_eq!(test.driver.model().count, 2);
}

#[test]
fn given_a_mounted_interval_when_unmounted_should_release_it_and_stop_emitting() {
    let mut test = build_integration_test()
        .given_subscriptions(every_period_increment())
        .build();

    test.driver.advance_time(PERIOD * 2);
    test.driver.unmount();
    test.driver.advance_time(PERIOD * 10);

    assert_eq!(test.driver.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(test.driver.active_subscriptions(), 0);
    assert_eq!(test.driver.timer().next_deadline(), None);
    assert_eq!(test.renders.count(), 3);
    assert_eq!(test.driver.model().count, 2);
}

#[test]
fn given_unmount_called_twice_should_be_a_no_op() {
    let mut test = build_integration_test()
        .given_subscriptions(every_period_increment())
        .build();

    test.driver.unmount();
    test.driver.unmount();

    assert_eq!(test.driver.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(test.renders.count(), 1);
}

#[test]
fn given_a_zero_period_subscription_should_not_start_it() {
    let mut subscriptions = MockSubscriptionsDependency::new();
    subscriptions
        .expect_on_mount()
        .returning(|_| vec![Subscription::every(Duration::ZERO, || TestEvent::Increment)]);

    let mut test = build_integration_test()
        .given_subscriptions(subscriptions)
        .build();

    test.driver.advance_time(PERIOD);

    assert_eq!(test.driver.active_subscriptions(), 0);
    assert_eq!(test.renders.count(), 1);
}

#[test]
fn given_two_intervals_should_interleave_by_deadline() {
    let mut subscriptions = MockSubscriptionsDependency::new();
    subscriptions.expect_on_mount().returning(|_| {
        vec![
            Subscription::every(PERIOD, || TestEvent::Add(1)),
            Subscription::every(PERIOD * 3, || TestEvent::Add(100)),
        ]
    });

    let mut test = build_integration_test()
        .given_subscriptions(subscriptions)
        .build();

    test.driver.advance_time(PERIOD * 3);

    // Both intervals are due at 300ms; their relative order is unspecified.
    test.renders.with_renders(|renders| {
        let counts: Vec<_> = renders.iter().map(|props| props.count).collect();
        assert_eq!(counts.len(), 5);
        assert_eq!(counts[..3], [0, 1, 2]);
        assert_eq!(counts[4], 103);
    });
}

// The async run loop, driven by a real executor instead of the test driver.

#[derive(Clone)]
struct NeverTimer;

impl Timer for NeverTimer {
    fn sleep(&self, _period: Duration) -> BoxFuture<'static, ()> {
        Box::pin(futures::future::pending())
    }
}

struct Echo;

impl MvuLogic<u32, u32, u32> for Echo {
    fn init(&self, model: u32) -> (u32, Effect<u32>) {
        (model, Effect::just(7))
    }

    fn update(&self, event: u32, model: &u32) -> (u32, Effect<u32>) {
        (model + event, Effect::none())
    }

    fn view(&self, model: &u32, _emitter: &Emitter<u32>) -> u32 {
        *model
    }

    fn subscriptions(&self, _model: &u32) -> Vec<Subscription<u32>> {
        vec![Subscription::every(PERIOD, || 1)]
    }
}

struct Forward(flume::Sender<u32>);

impl Renderer<u32> for Forward {
    fn render(&mut self, props: u32) {
        self.0.send(props).ok();
    }
}

fn local_pool() -> (
    futures::executor::LocalPool,
    impl Fn(BoxFuture<'static, ()>) + Clone,
) {
    let pool = futures::executor::LocalPool::new();
    let spawner = pool.spawner();
    let spawn = move |future: BoxFuture<'static, ()>| {
        spawner.spawn(future).ok();
    };
    (pool, spawn)
}

#[test]
fn given_unmount_requested_before_run_should_mount_then_return() {
    let (mut pool, spawn) = local_pool();
    let (renders, rendered) = flume::unbounded();

    let mut runtime = MvuRuntime::new(0, Echo, Forward(renders), spawn, NeverTimer);
    runtime.unmount_handle().unmount();

    pool.run_until(runtime.run());

    assert_eq!(runtime.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(rendered.drain().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn given_a_running_runtime_when_unmount_requested_should_return_from_run() {
    let (mut pool, spawn) = local_pool();
    let (renders, rendered) = flume::unbounded();

    let mut runtime = MvuRuntime::new(0, Echo, Forward(renders), spawn.clone(), NeverTimer);
    let unmount = runtime.unmount_handle();
    spawn(Box::pin(async move {
        while let Ok(count) = rendered.recv_async().await {
            if count == 7 {
                unmount.unmount();
                break;
            }
        }
    }));

    pool.run_until(runtime.run());

    assert_eq!(runtime.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(*runtime.model(), 7);
}

#[test]
fn given_an_unmounted_runtime_when_run_again_should_not_remount() {
    let (mut pool, spawn) = local_pool();
    let (renders, rendered) = flume::unbounded();

    let mut runtime = MvuRuntime::new(0, Echo, Forward(renders), spawn, NeverTimer);
    runtime.unmount_handle().unmount();
    pool.run_until(runtime.run());
    pool.run_until(runtime.run());

    assert_eq!(rendered.drain().count(), 1);
}

// A real interval on the async run loop, with the clock moved by hand.

const SECOND: Duration = Duration::from_secs(1);

fn counts(renderer: &TestRenderer<CounterProps>) -> Vec<u64> {
    renderer.with_renders(|renders| renders.iter().map(|props| props.count).collect())
}

#[test]
fn given_a_ticking_runtime_when_unmounted_by_handle_should_stop_incrementing() {
    let (mut pool, spawn) = local_pool();
    let timer = ManualTimer::new();
    let renderer = TestRenderer::new();

    let mut runtime = MvuRuntime::new(
        CounterModel::default(),
        Counter::new(2),
        renderer.clone(),
        spawn,
        timer.clone(),
    );
    let unmount = runtime.unmount_handle();

    {
        let run = runtime.run();
        futures::pin_mut!(run);

        assert!(run.as_mut().now_or_never().is_none());
        pool.run_until_stalled();

        for second in 1..=3 {
            timer.advance_to(SECOND * second);
            pool.run_until_stalled();
            assert!(run.as_mut().now_or_never().is_none());
        }

        unmount.unmount();
        assert!(run.as_mut().now_or_never().is_some());
    }
    pool.run_until_stalled();

    timer.advance_to(SECOND * 10);
    pool.run_until_stalled();

    assert_eq!(runtime.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(timer.next_deadline(), None);
    assert_eq!(counts(&renderer), vec![0, 2, 4, 6]);
}

#[test]
fn given_a_mounted_runtime_when_dropped_should_release_its_timer() {
    let (mut pool, spawn) = local_pool();
    let timer = ManualTimer::new();
    let renderer = TestRenderer::new();

    let mut runtime = MvuRuntime::new(
        CounterModel::default(),
        Counter::new(2),
        renderer.clone(),
        spawn,
        timer.clone(),
    );

    {
        let run = runtime.run();
        futures::pin_mut!(run);
        assert!(run.as_mut().now_or_never().is_none());
    }
    pool.run_until_stalled();

    assert_eq!(runtime.lifecycle(), Lifecycle::Mounted);
    assert_eq!(timer.next_deadline(), Some(SECOND));

    drop(runtime);
    pool.run_until_stalled();
    timer.advance_to(SECOND * 5);
    pool.run_until_stalled();

    assert_eq!(timer.next_deadline(), None);
    assert_eq!(counts(&renderer), vec![0]);
}
