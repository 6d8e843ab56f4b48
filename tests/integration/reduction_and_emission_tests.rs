use super::{build_integration_test, TestEvent};
use oxide_ticker::{Effect, Lifecycle};

#[test]
fn given_no_initial_event_should_render_initial_props() {
    let test = build_integration_test().given_no_initial_event().build();

    assert_eq!(test.driver.lifecycle(), Lifecycle::Mounted);
    assert_eq!(test.renders.count(), 1);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[0].count, 0);
    });
}

#[test]
fn given_an_initial_increment_event_should_render_twice() {
    let mut test = build_integration_test()
        .given_an_initial_effect(Effect::just(TestEvent::Increment))
        .build();

    // Queued by the initial effect, but not processed until asked.
    assert_eq!(test.renders.count(), 1);

    test.driver.process_events();

    assert_eq!(test.renders.count(), 2);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[0].count, 0);
        assert_eq!(renders[1].count, 1);
    });
    assert_eq!(test.driver.model().count, 1);
}

#[test]
fn given_no_initial_event_when_props_callback_invoked_should_render_again() {
    let mut test = build_integration_test().given_no_initial_event().build();

    test.renders.with_renders(|renders| {
        (renders[0].on_increment)();
    });

    test.driver.process_events();

    assert_eq!(test.renders.count(), 2);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[1].count, 1);
    });
}

#[test]
fn given_stale_props_when_callback_invoked_should_reduce_from_current_model() {
    let mut test = build_integration_test().given_no_initial_event().build();

    for _ in 0..3 {
        test.renders.with_renders(|renders| {
            (renders[0].on_increment)();
        });
    }

    test.driver.process_events();

    test.renders.with_renders(|renders| {
        let counts: Vec<_> = renders.iter().map(|props| props.count).collect();
        assert_eq!(counts, vec![0, 1, 2, 3]);
    });
}

#[test]
fn given_unmounted_runtime_when_props_callback_invoked_should_not_render() {
    let mut test = build_integration_test().given_no_initial_event().build();

    test.driver.unmount();
    test.renders.with_renders(|renders| {
        (renders[0].on_increment)();
    });
    test.driver.process_events();

    assert_eq!(test.driver.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(test.renders.count(), 1);
    assert_eq!(test.driver.model().count, 0);
}
