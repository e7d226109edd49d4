//! Single-binding guard.
//!
//! A browser tab has one session history, so only one navigation stack may be
//! bound to it at a time. [`BindingSlot`] is the flag that enforces this: it is
//! taken with a compare-and-set when a binding starts and released when the
//! binding ends. [`BindingSlot::global`] is the slot shared by the whole
//! process; tests and embedders can hand their own `static` slot to
//! [`BrowserHistory::with_slot`](crate::history::BrowserHistory::with_slot).
//!
//! # Example
//!
//! ```
//! use navigator_history::BindingSlot;
//!
//! static SLOT: BindingSlot = BindingSlot::new();
//!
//! let guard = SLOT.acquire().expect("slot is free");
//! assert!(SLOT.is_bound());
//! assert!(SLOT.acquire().is_none());
//!
//! drop(guard);
//! assert!(!SLOT.is_bound());
//! ```

use crate::debug_log;
use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL_SLOT: BindingSlot = BindingSlot::new();

/// Process-wide "a binding is active" flag.
#[derive(Debug, Default)]
pub struct BindingSlot {
    bound: AtomicBool,
}

impl BindingSlot {
    /// A free slot.
    pub const fn new() -> Self {
        Self {
            bound: AtomicBool::new(false),
        }
    }

    /// The slot used by [`BrowserHistory::new`](crate::history::BrowserHistory::new).
    pub fn global() -> &'static BindingSlot {
        &GLOBAL_SLOT
    }

    /// Take the slot. `false` if it is already held.
    pub fn try_acquire(&self) -> bool {
        self.bound
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Free the slot.
    pub fn release(&self) {
        self.bound.store(false, Ordering::Release);
    }

    /// Return `true` while a binding holds the slot.
    pub fn is_bound(&self) -> bool {
        self.bound.load(Ordering::Acquire)
    }

    /// Take the slot and get a guard that frees it on drop.
    pub fn acquire(&self) -> Option<BindingGuard<'_>> {
        self.try_acquire().then(|| BindingGuard { slot: self })
    }
}

/// Holds a [`BindingSlot`] until dropped.
///
/// The bind future owns its guard, so the slot is freed exactly once however
/// the binding ends.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct BindingGuard<'a> {
    slot: &'a BindingSlot,
}

impl Drop for BindingGuard<'_> {
    fn drop(&mut self) {
        self.slot.release();
        debug_log!("Browser history binding released");
    }
}
