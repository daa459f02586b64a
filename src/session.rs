// SPDX-License-Identifier: MPL-2.0
//! Composition root for one UI session.
//!
//! Exactly one `Session` is constructed when the front end boots and is
//! passed by handle to every screen; there is no hidden global instance.
//! It wires the busy coordinator to the watchdog bus, owns the toast
//! queue, and forwards event-loop ticks to both timer-bearing subsystems.

use std::rc::Rc;
use std::time::Instant;

use crate::busy::{BusyCoordinator, WatchdogBus};
use crate::config::Config;
use crate::notifications::NotificationQueue;

/// The coordination state shared by every screen of one UI session.
///
/// `!Send` by construction: the core is single-threaded and event-loop
/// driven, like the host it serves.
#[derive(Debug)]
pub struct Session {
    busy: Rc<BusyCoordinator>,
    notifications: NotificationQueue,
    watchdog: Rc<WatchdogBus>,
}

impl Session {
    /// Creates a session with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a session from loaded configuration.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        let watchdog = Rc::new(WatchdogBus::new());
        let busy = Rc::new(BusyCoordinator::from_config(config).with_watchdog(Rc::clone(&watchdog)));
        Self {
            busy,
            notifications: NotificationQueue::from_config(config),
            watchdog,
        }
    }

    /// The busy/loading indicator, wrapped around every asynchronous fetch.
    #[must_use]
    pub fn busy(&self) -> &BusyCoordinator {
        &self.busy
    }

    /// A clonable handle to the busy coordinator for long-lived call sites.
    #[must_use]
    pub fn busy_handle(&self) -> Rc<BusyCoordinator> {
        Rc::clone(&self.busy)
    }

    /// Read access to the toast queue (rendering, overflow inspection).
    #[must_use]
    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Mutable access to the toast queue (enqueue, dismiss, clear).
    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// The bus on which forced busy clears are reported.
    #[must_use]
    pub fn watchdog(&self) -> &WatchdogBus {
        &self.watchdog
    }

    /// A clonable handle to the watchdog bus for telemetry consumers.
    #[must_use]
    pub fn watchdog_handle(&self) -> Rc<WatchdogBus> {
        Rc::clone(&self.watchdog)
    }

    /// Advances every deadline-bearing subsystem against the current time.
    ///
    /// The host's event loop calls this periodically (every 100-500 ms is
    /// plenty for the granularities involved).
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances every deadline-bearing subsystem against an explicit `now`.
    pub fn tick_at(&mut self, now: Instant) {
        self.busy.tick_at(now);
        self.notifications.tick_at(now);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
