//! Host capability surface.
//!
//! The binder never touches a concrete browser API. Everything it needs from
//! the environment is expressed by [`BrowserHost`]: reading the location and
//! the current history state, writing history entries, listening for
//! `popstate`, and a diagnostic sink. The `web` feature ships a `web-sys`
//! implementation ([`WindowHost`](crate::web::WindowHost)); tests use an
//! in-memory one.
//!
//! Pop-state notifications are delivered as a [`PopStateEvents`] stream.
//! Implementations create one with [`PopStateEvents::channel`], feed it from
//! their event callback through the returned [`PopStateSender`], and attach
//! the unsubscribe action with [`PopStateEvents::on_drop`].

use crate::error::HistoryError;
use crate::warn_log;
use futures::channel::mpsc;
use futures::stream::{Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// The parts of the current URL the binder cares about.
///
/// ```
/// use navigator_history::Location;
///
/// let location = Location::new("https://app.example", "/shop/", "#present?id=2");
/// assert_eq!(location.app_address(), "https://app.example/shop/");
/// assert_eq!(location.href(), "https://app.example/shop/#present?id=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Scheme, host and port, e.g. `https://app.example`
    pub origin: String,
    /// Path name, e.g. `/shop/`
    pub path: String,
    /// Fragment including the leading `#`, or empty
    pub fragment: String,
}

impl Location {
    /// Create a location from its parts.
    pub fn new(
        origin: impl Into<String>,
        path: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
            fragment: fragment.into(),
        }
    }

    /// `origin + path`: the prefix every displayed URL is built on.
    pub fn app_address(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }

    /// Full URL.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.origin, self.path, self.fragment)
    }
}

/// Browser-like environment the binder synchronizes with.
pub trait BrowserHost {
    /// Current location.
    fn location(&self) -> Result<Location, HistoryError>;

    /// State attached to the current history entry; `None` for entries the
    /// binder did not write (fresh load, address bar edit).
    fn history_state(&self) -> Result<Option<String>, HistoryError>;

    /// Add a history entry after the current one (`history.pushState`).
    fn push_state(&self, state: &str, url: &str) -> Result<(), HistoryError>;

    /// Overwrite the current history entry (`history.replaceState`).
    fn replace_state(&self, state: &str, url: &str) -> Result<(), HistoryError>;

    /// Subscribe to `popstate`; each item is the state of the entry navigated to.
    fn pop_state_events(&self) -> Result<PopStateEvents, HistoryError>;

    /// Diagnostic sink. Must not fail.
    fn warn(&self, message: &str) {
        warn_log!("{}", message);
    }
}

impl<H: BrowserHost + ?Sized> BrowserHost for Rc<H> {
    fn location(&self) -> Result<Location, HistoryError> {
        (**self).location()
    }

    fn history_state(&self) -> Result<Option<String>, HistoryError> {
        (**self).history_state()
    }

    fn push_state(&self, state: &str, url: &str) -> Result<(), HistoryError> {
        (**self).push_state(state, url)
    }

    fn replace_state(&self, state: &str, url: &str) -> Result<(), HistoryError> {
        (**self).replace_state(state, url)
    }

    fn pop_state_events(&self) -> Result<PopStateEvents, HistoryError> {
        (**self).pop_state_events()
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

// ============================================================================
// PopStateEvents
// ============================================================================

/// Feeding side of a [`PopStateEvents`] stream.
#[derive(Debug, Clone)]
pub struct PopStateSender {
    sender: mpsc::UnboundedSender<Option<String>>,
}

impl PopStateSender {
    /// Deliver one pop-state event. `false` once the subscriber is gone.
    pub fn send(&self, state: Option<String>) -> bool {
        self.sender.unbounded_send(state).is_ok()
    }

    /// Return `true` once the subscriber has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Stream of pop-state event states.
///
/// Dropping it runs the unsubscribe action registered with
/// [`on_drop`](Self::on_drop).
pub struct PopStateEvents {
    receiver: mpsc::UnboundedReceiver<Option<String>>,
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl PopStateEvents {
    /// Create a connected sender/stream pair.
    pub fn channel() -> (PopStateSender, PopStateEvents) {
        let (sender, receiver) = mpsc::unbounded();
        (
            PopStateSender { sender },
            PopStateEvents {
                receiver,
                unsubscribe: None,
            },
        )
    }

    /// Run `unsubscribe` when the stream is dropped.
    pub fn on_drop(mut self, unsubscribe: impl FnOnce() + 'static) -> Self {
        self.unsubscribe = Some(Box::new(unsubscribe));
        self
    }
}

impl Stream for PopStateEvents {
    type Item = Option<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl Drop for PopStateEvents {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for PopStateEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopStateEvents")
            .field("unsubscribe", &self.unsubscribe.is_some())
            .finish()
    }
}
