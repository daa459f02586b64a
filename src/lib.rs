// SPDX-License-Identifier: MPL-2.0
//! `workshop_core` is the coordination layer shared by every screen of the
//! Workshop multi-role service-management front end.
//!
//! It provides the two pieces of UI state with real invariants:
//!
//! - [`busy`] — a reference-counted busy/loading indicator that stays
//!   correct under overlapping asynchronous operations and self-heals via a
//!   safety timeout if a `hide()` never arrives. Forced clears are reported
//!   on a small pub/sub [`busy::WatchdogBus`].
//! - [`notifications`] — a bounded, order-preserving toast queue with
//!   per-toast auto-dismiss, an exit-transition lifecycle, and a bounded
//!   history of messages dropped under overflow.
//!
//! Routing, page rendering, authentication, and REST access live outside
//! this crate and interact with it only through the narrow surface exposed
//! by [`session::Session`].
//!
//! Everything is single-threaded and event-loop driven: deferred work is
//! expressed as deadlines checked by an explicit `tick()`, never as
//! background threads.

#![doc(html_root_url = "https://docs.rs/workshop_core/0.1.0")]

pub mod busy;
pub mod config;
pub mod error;
pub mod notifications;
pub mod session;

pub use session::Session;
