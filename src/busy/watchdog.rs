// SPDX-License-Identifier: MPL-2.0
//! Pub/sub relay for busy-indicator forced clears.
//!
//! When the safety timeout fires, the coordinator force-clears the busy
//! state and reports the event here. Consumers (test harnesses, telemetry)
//! observe forced clears through this bus without coupling to the
//! coordinator's internals.

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Unique identifier for a registered watchdog listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchdogListenerId(u64);

/// Kind of event published on the bus.
///
/// There is currently a single kind; the enum keeps the wire shape
/// explicit for telemetry consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WatchdogEventKind {
    /// The busy indicator was force-cleared after its safety timeout.
    SafetyTimeout,
}

/// Diagnostic record of a forced clear.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogEvent {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: WatchdogEventKind,
    /// The busy message that was on screen when the clear happened, kept
    /// so the stuck operation can be identified after the fact.
    pub message: String,
    /// The timeout that expired, in milliseconds.
    pub safety_timeout_ms: u64,
    /// Wall-clock time of the forced clear.
    pub time: DateTime<Utc>,
}

impl WatchdogEvent {
    /// Creates a safety-timeout event stamped with the current time.
    #[must_use]
    pub fn safety_timeout(message: impl Into<String>, safety_timeout_ms: u64) -> Self {
        Self {
            kind: WatchdogEventKind::SafetyTimeout,
            message: message.into(),
            safety_timeout_ms,
            time: Utc::now(),
        }
    }
}

type Listener = Rc<dyn Fn(&WatchdogEvent)>;

/// Synchronous, re-entrancy-safe listener registry.
///
/// `notify` invokes a snapshot of the listeners registered at call time, so
/// a listener may register or unregister (itself included) while the bus is
/// mid-delivery. A panicking listener is isolated: the panic is caught and
/// logged, the remaining listeners still run, and nothing reaches the
/// caller.
#[derive(Default)]
pub struct WatchdogBus {
    listeners: RefCell<Vec<(WatchdogListenerId, Listener)>>,
    next_id: RefCell<u64>,
}

impl WatchdogBus {
    /// Creates a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its id for later removal.
    pub fn register(&self, listener: impl Fn(&WatchdogEvent) + 'static) -> WatchdogListenerId {
        let mut next = self.next_id.borrow_mut();
        let id = WatchdogListenerId(*next);
        *next += 1;
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener.
    ///
    /// Returns `true` if the id was registered. Unregistering an unknown or
    /// already-removed id is a no-op.
    pub fn unregister(&self, id: WatchdogListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Synchronously delivers `event` to every currently registered
    /// listener.
    pub fn notify(&self, event: &WatchdogEvent) {
        // Snapshot before delivery: listeners may mutate the registry.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                log::error!("watchdog listener panicked; continuing with remaining listeners");
            }
        }
    }
}

impl std::fmt::Debug for WatchdogBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchdogBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
