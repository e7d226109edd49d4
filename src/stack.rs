//! Observable navigation stack.
//!
//! [`NavigationStack`] is the list of route keys an application renders from:
//! the last entry is the screen on display. It is a cheap, cloneable handle
//! (clones share the same entries) meant for a single-threaded UI executor.
//!
//! Every structural change is published to subscribers as an immutable
//! snapshot through [`StackChanges`]. A new subscriber first receives the
//! current contents. Mutations that leave the contents unchanged publish
//! nothing, and a batch of edits made inside [`update`](NavigationStack::update)
//! publishes exactly once.
//!
//! # Example
//!
//! ```
//! use futures::StreamExt;
//! use navigator_history::NavigationStack;
//!
//! let stack = NavigationStack::new("main");
//! let mut changes = stack.subscribe();
//!
//! stack.push("detail");
//! stack.replace_all(["main", "detail"]); // same contents, not published
//! stack.pop();
//!
//! pollster::block_on(async {
//!     assert_eq!(changes.next().await, Some(vec!["main"]));
//!     assert_eq!(changes.next().await, Some(vec!["main", "detail"]));
//!     assert_eq!(changes.next().await, Some(vec!["main"]));
//! });
//! ```

use crate::trace_log;
use futures::channel::mpsc;
use futures::stream::{Stream, StreamExt};
use std::cell::RefCell;
use std::fmt;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

struct StackInner<T> {
    entries: Vec<T>,
    subscribers: Vec<mpsc::UnboundedSender<Vec<T>>>,
}

/// Shared, observable list of route keys.
pub struct NavigationStack<T> {
    inner: Rc<RefCell<StackInner<T>>>,
}

impl<T> Clone for NavigationStack<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NavigationStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("NavigationStack")
            .field("entries", &inner.entries)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq> NavigationStack<T> {
    /// Create a stack holding only the root entry.
    pub fn new(root: T) -> Self {
        Self::from_entries([root])
    }

    /// Create a stack from existing entries, oldest first.
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StackInner {
                entries: entries.into_iter().collect(),
                subscribers: Vec::new(),
            })),
        }
    }

    /// Append a key; it becomes the current screen.
    pub fn push(&self, key: T) {
        self.update(|entries| entries.push(key));
    }

    /// Remove and return the current screen.
    pub fn pop(&self) -> Option<T> {
        self.update(Vec::pop)
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.update(Vec::clear);
    }

    /// Swap the whole contents in one observable change.
    pub fn replace_all(&self, entries: impl IntoIterator<Item = T>) {
        let entries: Vec<T> = entries.into_iter().collect();
        self.update(move |current| *current = entries);
    }

    /// Apply several edits as a single change.
    ///
    /// Subscribers see one snapshot afterwards, or none if the contents ended
    /// up equal to what they were. The closure must not touch this stack.
    pub fn update<R>(&self, edit: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.clone();
        let result = edit(&mut inner.entries);

        if inner.entries != before {
            let snapshot = inner.entries.clone();
            inner
                .subscribers
                .retain(|subscriber| subscriber.unbounded_send(snapshot.clone()).is_ok());
            trace_log!(
                "Navigation stack changed: {} -> {} entries, {} subscribers",
                before.len(),
                snapshot.len(),
                inner.subscribers.len()
            );
        }

        result
    }

    /// Copy of the current entries, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.borrow().entries.clone()
    }

    /// The entry on display.
    pub fn current(&self) -> Option<T> {
        self.inner.borrow().entries.last().cloned()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Return `true` if the stack has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Observe the stack.
    ///
    /// The stream yields the current contents immediately, then one snapshot
    /// per change. It ends once every handle to the stack has been dropped.
    pub fn subscribe(&self) -> StackChanges<T> {
        let (sender, receiver) = mpsc::unbounded();
        let mut inner = self.inner.borrow_mut();
        // The receiver is still alive, so the replay cannot fail.
        let _ = sender.unbounded_send(inner.entries.clone());
        inner.subscribers.push(sender);
        StackChanges { receiver }
    }
}

/// Stream of stack snapshots returned by [`NavigationStack::subscribe`].
#[derive(Debug)]
pub struct StackChanges<T> {
    receiver: mpsc::UnboundedReceiver<Vec<T>>,
}

impl<T> Stream for StackChanges<T> {
    type Item = Vec<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

// ============================================================================
// Tests
// ============================================================================
