//! Error types for history synchronization.
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`HistoryError`] — the host itself misbehaved, e.g. `pushState` was
//!   rejected. These end the binding and are returned from
//!   [`BrowserHistory::bind`](crate::history::BrowserHistory::bind).
//! - [`SyncWarning`] — recoverable conditions the binder reports through the
//!   host's diagnostic sink and then moves on from, such as an address bar edit
//!   that is not a known route.
//!
//! # Examples
//!
//! ```
//! use navigator_history::error::{HistoryError, SyncWarning};
//!
//! let err = HistoryError::host_call("pushState", "SecurityError");
//! assert_eq!(err.to_string(), "History call `pushState` failed: SecurityError");
//!
//! let warning = SyncWarning::UnparseableFragment { fragment: "#nope".into() };
//! assert_eq!(warning.to_string(), "Unable to parse url fragment: `#nope`");
//! ```

use std::fmt;

// ============================================================================
// Fatal errors
// ============================================================================

/// Failure of the host capability layer.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The pop-state subscription could not be established
    Subscription { message: String },

    /// A history or location call was rejected by the host
    HostCall {
        operation: &'static str,
        message: String,
    },

    /// The host has no usable window, location or history object
    Unavailable { message: String },
}

impl HistoryError {
    /// Shorthand for [`HistoryError::HostCall`].
    pub fn host_call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::HostCall {
            operation,
            message: message.into(),
        }
    }

    /// Shorthand for [`HistoryError::Subscription`].
    pub fn subscription(message: impl Into<String>) -> Self {
        Self::Subscription {
            message: message.into(),
        }
    }

    /// Shorthand for [`HistoryError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Subscription { message } => {
                write!(f, "Unable to subscribe to popstate events: {}", message)
            }
            HistoryError::HostCall { operation, message } => {
                write!(f, "History call `{}` failed: {}", operation, message)
            }
            HistoryError::Unavailable { message } => {
                write!(f, "Browser history unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

// ============================================================================
// Recoverable conditions
// ============================================================================

/// A recoverable synchronization problem.
///
/// The binder never stops because of one of these; it reports the
/// [`Display`](std::fmt::Display) text through
/// [`BrowserHost::warn`](crate::host::BrowserHost::warn) and leaves the
/// navigation stack as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncWarning {
    /// Another binding already owns the browser history
    AlreadyBound,

    /// A manually entered fragment does not deserialize to a route key
    UnparseableFragment { fragment: String },

    /// One line of a stored stack snapshot does not deserialize
    UnparseableEntry { line: String, state: String },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::AlreadyBound => {
                write!(f, "BrowserHistory is already bound to another backstack")
            }
            SyncWarning::UnparseableFragment { fragment } => {
                write!(f, "Unable to parse url fragment: `{}`", fragment)
            }
            SyncWarning::UnparseableEntry { line, state } => write!(
                f,
                "Unable to restore item: `{}`; unable to restore back stack from history: `{}`",
                line, state
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
