//! Two-way binding between a [`NavigationStack`] and browser session history.
//!
//! [`BrowserHistory::bind`] keeps the two in step for as long as its future
//! is polled:
//!
//! - **browser → stack**: a `popstate` carrying a stack snapshot replaces the
//!   stack with that snapshot; a `popstate` without state (the user typed a
//!   URL) appends the route named by the fragment.
//! - **stack → browser**: every stack change becomes a history entry. Changes
//!   that merely mirror what the browser already shows overwrite the current
//!   entry with `replaceState`; changes made by the application add an entry
//!   with `pushState`, so the back button walks them in reverse.
//!
//! Route keys stay opaque. The caller supplies `serialize` (key → fragment,
//! `None` for screens that should not appear in history) and `deserialize`
//! (fragment → key). History state is the serialized stack joined by `\n`,
//! oldest entry first, so a serialized key containing a raw newline is left out
//! of history like any other unrepresentable key. The
//! [`fragment`](crate::fragment) codec never produces one.
//!
//! The first history entry is tagged with [`ROOT_STATE`] when binding starts.
//! Navigating back to it restores the stack the binding started with.
//!
//! Only one binding may be active per [`BindingSlot`]. Dropping the future
//! ends the binding and frees the slot.
//!
//! # Example
//!
//! ```ignore
//! use navigator_history::{BrowserHistory, NavigationStack, RouteFragment};
//! use navigator_history::web::WindowHost;
//!
//! let stack = NavigationStack::new(Screen::Main);
//! let history = BrowserHistory::new(WindowHost::from_window()?);
//!
//! wasm_bindgen_futures::spawn_local(async move {
//!     let _ = history.bind(&stack, save_screen, restore_screen).await;
//! });
//! ```

use crate::binding::BindingSlot;
use crate::error::{HistoryError, SyncWarning};
use crate::host::{BrowserHost, PopStateEvents};
use crate::stack::NavigationStack;
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use futures::stream::{Stream, StreamExt};
use futures::FutureExt;
use std::cell::Cell;

/// State written to the history entry that was current when binding started.
pub const ROOT_STATE: &str = "navigator_history_root_entry";

/// Serialized form of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    /// Serialized keys joined by `\n`
    state: String,
    /// Last serialized key, shown in the address bar
    fragment: String,
}

impl Snapshot {
    /// Serialize `entries`, skipping keys that have no history form.
    /// `None` when nothing is left.
    fn of<T>(entries: &[T], serialize: &impl Fn(&T) -> Option<String>) -> Option<Self> {
        let lines: Vec<String> = entries
            .iter()
            .filter_map(serialize)
            .filter(|line| {
                let single = !line.contains('\n');
                if !single {
                    warn_log!("Serialized entry {:?} spans lines; left out of history", line);
                }
                single
            })
            .collect();
        let fragment = lines.last()?.clone();
        Some(Self {
            state: lines.join("\n"),
            fragment,
        })
    }
}

/// Binds navigation stacks to the session history of a [`BrowserHost`].
#[derive(Debug)]
pub struct BrowserHistory<H> {
    host: H,
    slot: &'static BindingSlot,
}

impl<H: BrowserHost> BrowserHistory<H> {
    /// Use the process-wide [`BindingSlot::global`].
    pub fn new(host: H) -> Self {
        Self::with_slot(host, BindingSlot::global())
    }

    /// Use a specific slot for the single-binding check.
    pub fn with_slot(host: H, slot: &'static BindingSlot) -> Self {
        Self { host, slot }
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Return `true` while some binding holds this instance's slot.
    pub fn is_bound(&self) -> bool {
        self.slot.is_bound()
    }

    /// Synchronize `stack` with the browser history until the returned future
    /// is dropped.
    ///
    /// If another binding already holds the slot this warns through
    /// [`BrowserHost::warn`] and returns `Ok(())` at once without touching the
    /// stack or the history. Unparseable fragments and snapshots are warned
    /// about and skipped. Only host failures end the binding with an error.
    pub async fn bind<T, S, D>(
        &self,
        stack: &NavigationStack<T>,
        serialize: S,
        deserialize: D,
    ) -> Result<(), HistoryError>
    where
        T: Clone + PartialEq,
        S: Fn(&T) -> Option<String>,
        D: Fn(&str) -> Option<T>,
    {
        let Some(_guard) = self.slot.acquire() else {
            self.host.warn(&SyncWarning::AlreadyBound.to_string());
            return Ok(());
        };

        let result = self.run(stack, serialize, deserialize).await;
        if let Err(err) = &result {
            error_log!("Browser history binding stopped: {}", err);
        }
        result
    }

    async fn run<T, S, D>(
        &self,
        stack: &NavigationStack<T>,
        serialize: S,
        deserialize: D,
    ) -> Result<(), HistoryError>
    where
        T: Clone + PartialEq,
        S: Fn(&T) -> Option<String>,
        D: Fn(&str) -> Option<T>,
    {
        let location = self.host.location()?;
        let app_address = location.app_address();

        // Read before seeding: the seed overwrites both.
        let initial_state = self.host.history_state()?;
        let initial_fragment = location.fragment;

        let root = Snapshot::of(&stack.snapshot(), &serialize);
        let seed_fragment = root.as_ref().map_or("", |root| root.fragment.as_str());
        self.host
            .replace_state(ROOT_STATE, &format!("{}{}", app_address, seed_fragment))?;
        info_log!("Browser history bound at {}", app_address);

        let events = self.host.pop_state_events()?;
        // The first item replays the stack the seed already reflects.
        let changes = stack.subscribe().skip(1);

        let sync = Synchronizer {
            host: &self.host,
            stack,
            app_address,
            root,
            resumed: Cell::new(None),
            serialize,
            deserialize,
        };
        sync.resume(initial_state, &initial_fragment);

        futures::try_join!(sync.follow_browser(events), sync.follow_stack(changes))?;

        debug_log!("Browser history event sources closed");
        Ok(())
    }
}

/// Shared state of the two synchronization loops.
struct Synchronizer<'a, H, T, S, D> {
    host: &'a H,
    stack: &'a NavigationStack<T>,
    app_address: String,
    root: Option<Snapshot>,
    /// Snapshot recorded in the entry the seed overwrote, restored on reload.
    /// Consumed by the first write.
    resumed: Cell<Option<String>>,
    serialize: S,
    deserialize: D,
}

impl<H, T, S, D> Synchronizer<'_, H, T, S, D>
where
    H: BrowserHost,
    T: Clone + PartialEq,
    S: Fn(&T) -> Option<String>,
    D: Fn(&str) -> Option<T>,
{
    /// Apply what the tab showed before the seed.
    fn resume(&self, initial_state: Option<String>, initial_fragment: &str) {
        // A fresh load without a fragment, or with the fragment of the screen
        // already on display, has nothing to open.
        match initial_state {
            Some(state) => {
                if self.restore_state(&state) && state != ROOT_STATE {
                    self.resumed.set(Some(state));
                }
            }
            None if initial_fragment.is_empty() || self.is_displayed(initial_fragment) => {}
            None => self.open_fragment(initial_fragment),
        }
    }

    /// Browser → stack.
    async fn follow_browser(&self, mut events: PopStateEvents) -> Result<(), HistoryError> {
        while let Some(state) = events.next().await {
            trace_log!("popstate with state {:?}", state);
            match state {
                Some(state) => {
                    self.restore_state(&state);
                }
                None => {
                    let fragment = self.host.location()?.fragment;
                    self.open_fragment(&fragment);
                }
            }
        }

        Ok(())
    }

    /// Stack → browser.
    async fn follow_stack(
        &self,
        mut changes: impl Stream<Item = Vec<T>> + Unpin,
    ) -> Result<(), HistoryError> {
        while let Some(mut entries) = changes.next().await {
            // Compare only the newest snapshot with the current entry.
            while let Some(Some(newer)) = changes.next().now_or_never() {
                entries = newer;
            }

            let Some(snapshot) = Snapshot::of(&entries, &self.serialize) else {
                trace_log!("Stack change with no history form ignored");
                continue;
            };

            let url = format!("{}{}", self.app_address, snapshot.fragment);
            let current = self.host.history_state()?;

            let resumed = self.resumed.take();
            if self.is_reflection(current.as_deref(), &snapshot.state, resumed.as_deref()) {
                trace_log!("replaceState {}", url);
                self.host.replace_state(&snapshot.state, &url)?;
            } else {
                trace_log!("pushState {}", url);
                self.host.push_state(&snapshot.state, &url)?;
            }
        }

        Ok(())
    }

    /// Whether `state` is what the current history entry already stands for.
    fn is_reflection(&self, current: Option<&str>, state: &str, resumed: Option<&str>) -> bool {
        match current {
            None => true,
            Some(ROOT_STATE) => {
                self.root.as_ref().is_some_and(|root| root.state == state)
                    || resumed == Some(state)
            }
            Some(current) => current == state,
        }
    }

    /// Whether `fragment` names the entry on top of the stack.
    fn is_displayed(&self, fragment: &str) -> bool {
        match (self.stack.current(), (self.deserialize)(fragment)) {
            (Some(current), Some(key)) => current == key,
            _ => false,
        }
    }

    /// Append the route named by a manually entered fragment.
    fn open_fragment(&self, fragment: &str) {
        match (self.deserialize)(fragment) {
            Some(key) => {
                debug_log!("Opening url fragment `{}`", fragment);
                self.stack.push(key);
            }
            None => self.host.warn(
                &SyncWarning::UnparseableFragment {
                    fragment: fragment.to_string(),
                }
                .to_string(),
            ),
        }
    }

    /// Replace the stack with a stored snapshot, all or nothing.
    /// `false` when the snapshot could not be restored.
    fn restore_state(&self, state: &str) -> bool {
        let state = if state == ROOT_STATE {
            match &self.root {
                Some(root) => root.state.as_str(),
                None => {
                    debug_log!("Root entry has no stored stack; nothing to restore");
                    return false;
                }
            }
        } else {
            state
        };

        let mut restored = Vec::new();
        for line in state.split('\n') {
            match (self.deserialize)(line) {
                Some(key) => restored.push(key),
                None => {
                    self.host.warn(
                        &SyncWarning::UnparseableEntry {
                            line: line.to_string(),
                            state: state.to_string(),
                        }
                        .to_string(),
                    );
                    return false;
                }
            }
        }

        trace_log!("Restoring {} entries from history", restored.len());
        self.stack.replace_all(restored);
        true
    }
}
