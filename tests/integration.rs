// SPDX-License-Identifier: MPL-2.0
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use workshop_core::busy::{BusyCoordinator, WatchdogBus};
use workshop_core::config::{self, Config};
use workshop_core::notifications::ToastKind;
use workshop_core::Session;

#[test]
fn concurrent_fetches_share_one_indicator() {
    let session = Session::new();
    let busy = session.busy_handle();

    // Three screens fire overlapping fetches, each wrapping itself in a
    // show/hide pair. The indicator must stay up until the last finishes.
    busy.show("Loading jobs...");
    busy.show("Loading vehicles...");
    busy.show("Loading bookings...");

    busy.hide();
    busy.hide();
    assert!(session.busy().is_loading(), "one fetch still in flight");
    assert_eq!(session.busy().counter(), 1);

    busy.hide();
    assert!(!session.busy().is_loading());
}

#[test]
fn stuck_fetch_self_heals_and_is_diagnosable() {
    let bus = Rc::new(WatchdogBus::new());
    let busy = BusyCoordinator::with_safety_timeout(Duration::from_millis(50))
        .with_watchdog(Rc::clone(&bus));

    let fired = Rc::new(Cell::new(0));
    let fired_in_listener = Rc::clone(&fired);
    bus.register(move |event| {
        assert_eq!(event.message, "Testing");
        fired_in_listener.set(fired_in_listener.get() + 1);
    });

    // The matching hide() never arrives.
    busy.show("Testing");
    assert!(busy.is_loading());

    busy.tick_at(Instant::now() + Duration::from_millis(150));
    assert!(!busy.is_loading(), "indicator force-cleared");
    assert_eq!(fired.get(), 1, "exactly one watchdog callback fired");

    // Subsequent ticks stay quiet.
    busy.tick_at(Instant::now() + Duration::from_millis(300));
    assert_eq!(fired.get(), 1);
}

#[test]
fn notification_storm_degrades_without_losing_information() {
    let mut session = Session::new();

    for i in 0..9 {
        session
            .notifications_mut()
            .show(ToastKind::Warning, format!("job {i} changed"));
    }

    // Visible list is bounded and keeps insertion order.
    let visible: Vec<_> = session
        .notifications()
        .toasts()
        .map(|t| t.message().to_string())
        .collect();
    assert_eq!(
        visible,
        vec![
            "job 5 changed",
            "job 6 changed",
            "job 7 changed",
            "job 8 changed"
        ]
    );

    // Everything evicted is inspectable, most recent first.
    assert_eq!(session.notifications().overflow_count(), 5);
    let dropped: Vec<_> = session.notifications().overflow_messages().collect();
    assert_eq!(dropped[0], "job 4 changed");
    assert_eq!(dropped[4], "job 0 changed");

    session.notifications_mut().clear_overflow_history();
    assert_eq!(session.notifications().overflow_count(), 0);
}

#[test]
fn dismissed_toast_survives_its_stale_auto_dismiss_timer() {
    let mut session = Session::new();
    let start = Instant::now();

    let id = session.notifications_mut().show_for(
        ToastKind::Success,
        "Booking saved",
        Some(Duration::from_millis(200)),
    );

    // The user dismisses before the auto-dismiss deadline.
    assert!(session.notifications_mut().hide(id));

    // Both the grace deadline and the original auto-dismiss deadline pass;
    // the toast must be removed exactly once and the queue stays sane.
    session.tick_at(start + Duration::from_secs(1));
    session.tick_at(start + Duration::from_secs(2));
    assert!(session.notifications().is_empty());
    assert!(!session.notifications_mut().hide(id));
}

#[test]
fn session_is_configured_from_a_settings_file() {
    let dir = tempfile::tempdir().expect("failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let on_disk = Config {
        safety_timeout_ms: Some(2_000),
        max_visible_toasts: Some(2),
        toast_duration_ms: Some(1_000),
        toast_exit_grace_ms: Some(100),
        overflow_history_cap: Some(3),
    };
    config::save_to_path(&on_disk, &path).expect("failed to save config");

    let loaded = config::load_from_path(&path).expect("failed to load config");
    let mut session = Session::with_config(&loaded);

    session.notifications_mut().info("a");
    session.notifications_mut().info("b");
    session.notifications_mut().info("c");
    assert_eq!(session.notifications().visible_count(), 2);
    assert_eq!(session.notifications().overflow_count(), 1);

    let fired = Rc::new(Cell::new(0));
    let fired_in_listener = Rc::clone(&fired);
    session.watchdog().register(move |event| {
        assert_eq!(event.safety_timeout_ms, 2_000);
        fired_in_listener.set(fired_in_listener.get() + 1);
    });

    session.busy().show("Loading reports...");
    session.tick_at(Instant::now() + Duration::from_secs(3));
    assert_eq!(fired.get(), 1);
}

#[test]
fn watchdog_listeners_are_isolated_from_each_other() {
    let session = Session::new();
    let reached = Rc::new(Cell::new(false));

    session.watchdog().register(|_| panic!("telemetry sink exploded"));
    let reached_in_listener = Rc::clone(&reached);
    session
        .watchdog()
        .register(move |_| reached_in_listener.set(true));

    let busy = BusyCoordinator::with_safety_timeout(Duration::from_millis(50))
        .with_watchdog(session.watchdog_handle());
    busy.show("doomed fetch");
    busy.tick_at(Instant::now() + Duration::from_millis(100));

    assert!(reached.get(), "second listener still ran");
    assert!(!busy.is_loading(), "the forced clear completed normally");
}
