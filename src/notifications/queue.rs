// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `NotificationQueue` handles queuing, display timing, and dismissal
//! of toasts. It caps the number of visible toasts and records the message
//! of anything evicted under overflow so a storm of notifications degrades
//! gracefully instead of silently losing information.

use std::time::{Duration, Instant};

use super::history::OverflowHistory;
use super::toast::{Toast, ToastId, ToastKind};
use crate::config::{
    Config, DEFAULT_MAX_VISIBLE_TOASTS, DEFAULT_OVERFLOW_HISTORY_CAP, DEFAULT_TOAST_DURATION_MS,
    DEFAULT_TOAST_EXIT_GRACE_MS,
};

/// Marks the toast with the given id as leaving. Other entries are
/// untouched; an unknown id is a no-op.
fn mark_leaving(toasts: &mut [Toast], id: ToastId, remove_at: Instant) -> bool {
    match toasts.iter_mut().find(|t| t.id() == id) {
        Some(toast) if !toast.is_leaving() => {
            toast.begin_leaving(remove_at);
            true
        }
        _ => false,
    }
}

/// Removes exactly the toast with the given id, preserving the relative
/// order of the rest.
fn remove_by_id(toasts: &mut Vec<Toast>, id: ToastId) {
    toasts.retain(|t| t.id() != id);
}

/// Maintains the ordered, capped list of visible toasts for one UI session.
///
/// Toasts render in insertion order; eviction never reorders survivors.
/// All timing is deadline-based and driven by [`tick`](Self::tick) from the
/// host's event loop.
#[derive(Debug)]
pub struct NotificationQueue {
    toasts: Vec<Toast>,
    overflow: OverflowHistory,
    next_id: u64,
    max_visible: usize,
    default_duration: Duration,
    exit_grace: Duration,
}

impl NotificationQueue {
    /// Creates an empty queue with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            overflow: OverflowHistory::new(DEFAULT_OVERFLOW_HISTORY_CAP),
            next_id: 1,
            max_visible: DEFAULT_MAX_VISIBLE_TOASTS,
            default_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            exit_grace: Duration::from_millis(DEFAULT_TOAST_EXIT_GRACE_MS),
        }
    }

    /// Creates a queue from the session configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            toasts: Vec::new(),
            overflow: OverflowHistory::new(config.overflow_history_cap()),
            next_id: 1,
            max_visible: config.max_visible_toasts(),
            default_duration: config.toast_duration(),
            exit_grace: config.toast_exit_grace(),
        }
    }

    /// Overrides the visible-toast cap (at least 1).
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
    }

    /// Overrides the default auto-dismiss duration.
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Overrides the exit-transition grace period.
    #[must_use]
    pub fn with_exit_grace(mut self, grace: Duration) -> Self {
        self.exit_grace = grace;
        self
    }

    /// Appends a toast with the default auto-dismiss duration.
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        let duration = self.default_duration;
        self.show_for(kind, message, Some(duration))
    }

    /// Appends a toast with an explicit auto-dismiss duration.
    ///
    /// `None` or a zero duration disables auto-dismiss; the toast then
    /// stays until [`hide`](Self::hide) is called or it is evicted under
    /// overflow.
    ///
    /// If the queue would exceed its visible cap, one existing toast is
    /// evicted: the oldest that has not started leaving, or, when every
    /// existing toast is already leaving, the absolute oldest. The evicted
    /// message is recorded in the overflow history.
    pub fn show_for(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.show_at(kind, message.into(), duration, Instant::now())
    }

    /// Informational toast with the default duration.
    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Info, message)
    }

    /// Success toast with the default duration.
    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Success, message)
    }

    /// Error toast with the default duration.
    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Error, message)
    }

    /// Warning toast with the default duration.
    pub fn warning(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Warning, message)
    }

    fn show_at(
        &mut self,
        kind: ToastKind,
        message: String,
        duration: Option<Duration>,
        now: Instant,
    ) -> ToastId {
        let id = ToastId::new(self.next_id);
        self.next_id += 1;

        let expires_at = duration.filter(|d| !d.is_zero()).map(|d| now + d);
        self.toasts.push(Toast::new(id, kind, message, expires_at));

        if self.toasts.len() > self.max_visible {
            // Candidates are the pre-existing toasts only; the incoming
            // toast is never its own eviction victim.
            let last = self.toasts.len() - 1;
            let victim = self.toasts[..last]
                .iter()
                .position(|t| !t.is_leaving())
                .unwrap_or(0);
            let evicted = self.toasts.remove(victim);
            log::debug!(
                "toast overflow: dropping {} toast {:?}",
                evicted.kind().as_str(),
                evicted.message()
            );
            self.overflow.record(evicted.into_message());
        }

        id
    }

    /// Starts dismissing a toast: marks it leaving and schedules its
    /// physical removal after the exit grace period.
    ///
    /// Idempotent: hiding an unknown id, or one already leaving, changes
    /// nothing and returns `false`. Removal fires exactly once even if the
    /// toast's auto-dismiss deadline also expires.
    pub fn hide(&mut self, id: ToastId) -> bool {
        self.hide_at(id, Instant::now())
    }

    fn hide_at(&mut self, id: ToastId, now: Instant) -> bool {
        mark_leaving(&mut self.toasts, id, now + self.exit_grace)
    }

    /// Advances toast lifecycles against the current time.
    ///
    /// Should be called periodically from the host's event loop.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances toast lifecycles against an explicit `now`: toasts past
    /// their auto-dismiss deadline begin leaving, and leaving toasts past
    /// their grace deadline are removed.
    pub fn tick_at(&mut self, now: Instant) {
        let expired: Vec<ToastId> = self
            .toasts
            .iter()
            .filter(|t| !t.is_leaving() && t.expires_at.is_some_and(|d| now >= d))
            .map(Toast::id)
            .collect();
        for id in expired {
            self.hide_at(id, now);
        }

        let done: Vec<ToastId> = self
            .toasts
            .iter()
            .filter(|t| t.remove_at.is_some_and(|d| now >= d))
            .map(Toast::id)
            .collect();
        for id in done {
            remove_by_id(&mut self.toasts, id);
        }
    }

    /// Returns the visible toasts in insertion (display) order.
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Looks up a toast by id.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    /// Returns the number of visible toasts (including leaving ones).
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.toasts.len()
    }

    /// Returns true if no toasts are visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Removes every toast immediately, skipping exit transitions.
    /// The overflow history is untouched.
    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Returns the number of messages dropped under overflow.
    #[must_use]
    pub fn overflow_count(&self) -> usize {
        self.overflow.len()
    }

    /// Returns the dropped messages, most recently dropped first.
    pub fn overflow_messages(&self) -> impl Iterator<Item = &str> {
        self.overflow.iter()
    }

    /// Empties the dropped-message history.
    pub fn clear_overflow_history(&mut self) {
        self.overflow.clear();
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
