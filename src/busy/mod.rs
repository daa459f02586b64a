// SPDX-License-Identifier: MPL-2.0
//! Busy/loading indicator coordination.
//!
//! Several screens fire concurrent fetches, each wrapping itself in a
//! `show`/`hide` pair. This module keeps the shared indicator correct
//! under arbitrary interleavings of those pairs and bounds the worst case
//! when pairing breaks:
//!
//! - [`coordinator`] - Reference-counted [`BusyCoordinator`] with the
//!   safety timeout
//! - [`watchdog`] - [`WatchdogBus`] pub/sub relay reporting forced clears
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use workshop_core::busy::{BusyCoordinator, WatchdogBus};
//!
//! let bus = Rc::new(WatchdogBus::new());
//! let busy = BusyCoordinator::new().with_watchdog(Rc::clone(&bus));
//!
//! busy.show("Loading jobs...");
//! // ... fetch completes ...
//! busy.hide();
//! assert!(!busy.is_loading());
//! ```

pub mod coordinator;
pub mod watchdog;

pub use coordinator::{BusyCoordinator, BusyState, SubscriberId};
pub use watchdog::{WatchdogBus, WatchdogEvent, WatchdogEventKind, WatchdogListenerId};
