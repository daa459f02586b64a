// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` struct and `ToastKind` enum used by the
//! notification queue. A toast is visible from creation until it enters
//! the `leaving` state; it is physically removed once the exit-transition
//! grace period has elapsed.

use std::time::Instant;

/// Unique identifier for a toast.
///
/// Ids are monotonic per queue, so insertion order and id order agree
/// within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Visual category of a toast.
///
/// The kind only drives styling in the rendering layer; it has no effect
/// on queue ordering or lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention but nothing failed.
    Warning,
}

impl ToastKind {
    /// Stable identifier for styling hooks and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
        }
    }
}

/// A transient notification managed by the queue.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    message: String,
    /// Whether the exit transition has started.
    leaving: bool,
    /// Auto-dismiss deadline; `None` means manual dismiss only.
    pub(crate) expires_at: Option<Instant>,
    /// Physical-removal deadline, set when the toast enters `leaving`.
    pub(crate) remove_at: Option<Instant>,
}

impl Toast {
    pub(crate) fn new(
        id: ToastId,
        kind: ToastKind,
        message: String,
        expires_at: Option<Instant>,
    ) -> Self {
        Self {
            id,
            kind,
            message,
            leaving: false,
            expires_at,
            remove_at: None,
        }
    }

    /// Returns the toast's unique id.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the visual category.
    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether the exit transition has started.
    #[must_use]
    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    /// Starts the exit transition and supersedes the auto-dismiss deadline.
    pub(crate) fn begin_leaving(&mut self, remove_at: Instant) {
        self.leaving = true;
        self.expires_at = None;
        self.remove_at = Some(remove_at);
    }

    pub(crate) fn into_message(self) -> String {
        self.message
    }
}
