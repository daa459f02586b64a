// SPDX-License-Identifier: MPL-2.0
//! Reference-counted busy indicator with a self-healing safety timeout.
//!
//! Screens wrap every asynchronous fetch in a `show`/`hide` pair. A plain
//! boolean would let the first-finishing operation hide the indicator while
//! a slower sibling is still in flight, so the coordinator counts
//! outstanding operations instead and only clears when the count returns to
//! zero. If a `hide()` never arrives (an unguarded error path, an aborted
//! navigation), the safety deadline force-clears the indicator rather than
//! leaving it stuck forever, and the forced clear is reported on the
//! attached [`WatchdogBus`].

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::watchdog::{WatchdogBus, WatchdogEvent};
use crate::config::{Config, DEFAULT_BUSY_MESSAGE, DEFAULT_SAFETY_TIMEOUT_MS};

/// Unique identifier for a busy-state subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Snapshot of the busy indicator published to subscribers.
///
/// Invariant: `is_loading == (counter > 0)` at every observable instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyState {
    /// Whether any work is currently in progress.
    pub is_loading: bool,
    /// The most recent caller's message (last-writer-wins).
    pub message: String,
    /// Number of outstanding `show` calls not yet balanced by `hide`.
    pub counter: u32,
}

impl Default for BusyState {
    fn default() -> Self {
        Self {
            is_loading: false,
            message: DEFAULT_BUSY_MESSAGE.to_string(),
            counter: 0,
        }
    }
}

type Subscriber = Rc<dyn Fn(&BusyState)>;

/// Tracks overlapping work-in-progress requests for one UI session.
///
/// All methods take `&self`: the coordinator is shared by handle across
/// screens, and subscribers may re-enter it from inside a notification.
/// Single-threaded by design (`Rc`/`RefCell`), matching the cooperative
/// event-loop model of the host.
pub struct BusyCoordinator {
    state: RefCell<BusyState>,
    safety_deadline: Cell<Option<Instant>>,
    safety_timeout: Duration,
    subscribers: RefCell<Vec<(SubscriberId, Subscriber)>>,
    next_subscriber: Cell<u64>,
    watchdog: Option<Rc<WatchdogBus>>,
}

impl BusyCoordinator {
    /// Creates a coordinator with the default safety timeout and no
    /// watchdog bus attached.
    #[must_use]
    pub fn new() -> Self {
        Self::with_safety_timeout(Duration::from_millis(DEFAULT_SAFETY_TIMEOUT_MS))
    }

    /// Creates a coordinator with an explicit safety timeout.
    #[must_use]
    pub fn with_safety_timeout(safety_timeout: Duration) -> Self {
        Self {
            state: RefCell::new(BusyState::default()),
            safety_deadline: Cell::new(None),
            safety_timeout,
            subscribers: RefCell::new(Vec::new()),
            next_subscriber: Cell::new(0),
            watchdog: None,
        }
    }

    /// Creates a coordinator from the session configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_safety_timeout(config.safety_timeout())
    }

    /// Attaches the bus on which forced clears are reported.
    #[must_use]
    pub fn with_watchdog(mut self, bus: Rc<WatchdogBus>) -> Self {
        self.watchdog = Some(bus);
        self
    }

    /// Marks the start of one unit of work.
    ///
    /// Increments the outstanding-work counter and overwrites the displayed
    /// message with this caller's text: an earlier-started, later-finishing
    /// operation shows *its* message until it completes. The safety
    /// deadline is armed only on the idle-to-busy transition; overlapping
    /// `show` calls do not extend it.
    pub fn show(&self, message: impl Into<String>) {
        {
            let mut state = self.state.borrow_mut();
            state.counter += 1;
            state.message = message.into();
            state.is_loading = true;
        }
        if self.safety_deadline.get().is_none() {
            self.safety_deadline
                .set(Some(Instant::now() + self.safety_timeout));
        }
        self.notify_subscribers();
    }

    /// [`show`](Self::show) with the default "Loading..." message.
    pub fn show_default(&self) {
        self.show(DEFAULT_BUSY_MESSAGE);
    }

    /// Marks the end of one unit of work.
    ///
    /// The counter is floored at zero, so an unbalanced extra `hide()`
    /// (thrown exception between pairs, double completion handler) is a
    /// safe no-op. The indicator clears and the safety deadline is
    /// disarmed only when the last outstanding operation finishes.
    pub fn hide(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.counter = state.counter.saturating_sub(1);
            if state.counter == 0 {
                state.is_loading = false;
                self.safety_deadline.set(None);
            }
        }
        self.notify_subscribers();
    }

    /// Unconditionally clears the indicator.
    ///
    /// The last message is retained so a stuck operation can still be
    /// identified after the fact.
    pub fn reset(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.counter = 0;
            state.is_loading = false;
        }
        self.safety_deadline.set(None);
        self.notify_subscribers();
    }

    /// Checks the safety deadline against the current time.
    ///
    /// Should be called periodically from the host's event loop.
    pub fn tick(&self) {
        self.tick_at(Instant::now());
    }

    /// Checks the safety deadline against an explicit `now`.
    ///
    /// If the deadline has passed, the busy state is force-cleared,
    /// subscribers are notified, and exactly one safety-timeout event is
    /// published on the attached watchdog bus. Never panics and never
    /// reports an error to the caller; the forced clear *is* the report.
    pub fn tick_at(&self, now: Instant) {
        let Some(deadline) = self.safety_deadline.get() else {
            return;
        };
        if now < deadline {
            return;
        }
        self.safety_deadline.set(None);

        let timeout_ms = self.safety_timeout.as_millis() as u64;
        let message = {
            let mut state = self.state.borrow_mut();
            state.counter = 0;
            state.is_loading = false;
            // Keep the message so devs can inspect why it was stuck.
            state.message.clone()
        };
        log::warn!(
            "safety timeout ({timeout_ms} ms) fired; busy indicator force-cleared. message={message}"
        );

        self.notify_subscribers();
        if let Some(bus) = &self.watchdog {
            bus.notify(&WatchdogEvent::safety_timeout(message, timeout_ms));
        }
    }

    /// Registers a subscriber and returns its id for later removal.
    ///
    /// The subscriber is invoked with a state snapshot after every
    /// mutation (`show`, `hide`, `reset`, forced clear).
    pub fn subscribe(&self, subscriber: impl Fn(&BusyState) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber.get());
        self.next_subscriber.set(id.0 + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    /// Removes a subscriber. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Returns a snapshot of the current busy state.
    #[must_use]
    pub fn state(&self) -> BusyState {
        self.state.borrow().clone()
    }

    /// Returns whether any work is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Returns the number of outstanding operations.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.state.borrow().counter
    }

    /// Returns the most recent busy message.
    #[must_use]
    pub fn message(&self) -> String {
        self.state.borrow().message.clone()
    }

    /// Returns whether the safety deadline is currently armed.
    #[must_use]
    pub fn is_safety_armed(&self) -> bool {
        self.safety_deadline.get().is_some()
    }

    fn notify_subscribers(&self) {
        let snapshot: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        let state = self.state.borrow().clone();

        for subscriber in snapshot {
            if catch_unwind(AssertUnwindSafe(|| subscriber(&state))).is_err() {
                log::error!("busy-state subscriber panicked; continuing");
            }
        }
    }
}

impl Default for BusyCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BusyCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyCoordinator")
            .field("state", &self.state.borrow())
            .field("safety_armed", &self.is_safety_armed())
            .field("safety_timeout", &self.safety_timeout)
            .finish()
    }
}
