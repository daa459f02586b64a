// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the tunables of
//! the coordination core. Constants are organized by category.
//!
//! # Categories
//!
//! - **Busy indicator**: safety timeout for the self-healing watchdog
//! - **Toasts**: visible cap, auto-dismiss duration, exit grace period
//! - **Overflow history**: bounded log of messages dropped under overflow

// ==========================================================================
// Busy Indicator Defaults
// ==========================================================================

/// Default safety timeout before a stuck busy indicator is force-cleared
/// (in milliseconds).
pub const DEFAULT_SAFETY_TIMEOUT_MS: u64 = 20_000;

/// Minimum allowed safety timeout (in milliseconds).
pub const MIN_SAFETY_TIMEOUT_MS: u64 = 1_000;

/// Default message shown while work is in progress.
pub const DEFAULT_BUSY_MESSAGE: &str = "Loading...";

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Maximum number of toasts visible at once.
pub const DEFAULT_MAX_VISIBLE_TOASTS: usize = 4;

/// Default auto-dismiss duration for a toast (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4_000;

/// Grace period between a toast entering its leaving state and its
/// physical removal, matching the exit transition length (in milliseconds).
pub const DEFAULT_TOAST_EXIT_GRACE_MS: u64 = 320;

// ==========================================================================
// Overflow History Defaults
// ==========================================================================

/// Maximum number of dropped toast messages retained for inspection.
pub const DEFAULT_OVERFLOW_HISTORY_CAP: usize = 10;
