// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Toasts appear temporarily to inform users
//! about actions (booking saved, fetch failed, etc.) without blocking
//! interaction.
//!
//! # Components
//!
//! - [`toast`] - Core `Toast` struct with kind and leaving lifecycle
//! - [`queue`] - `NotificationQueue` for ordering, capping, and dismissal
//! - [`history`] - `OverflowHistory` bounded log of evicted messages
//!
//! # Usage
//!
//! ```
//! use workshop_core::notifications::{NotificationQueue, ToastKind};
//!
//! let mut queue = NotificationQueue::new();
//! let id = queue.show(ToastKind::Success, "Booking saved");
//!
//! // From the host's event loop:
//! queue.tick();
//!
//! // Or dismiss early; the toast plays its exit transition first.
//! queue.hide(id);
//! ```
//!
//! # Design Considerations
//!
//! - Toast duration: 4 s by default, per-toast override, zero disables
//! - Max visible toasts: 4; overflow evicts the oldest non-leaving toast
//!   and records its message rather than discarding it
//! - Exit transition: a dismissed toast stays for a 320 ms grace period
//!   in its `leaving` state so the UI can animate it out

pub mod history;
pub mod queue;
pub mod toast;

pub use history::OverflowHistory;
pub use queue::NotificationQueue;
pub use toast::{Toast, ToastId, ToastKind};
