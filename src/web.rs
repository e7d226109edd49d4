//! `web-sys` host.
//!
//! [`WindowHost`] implements [`BrowserHost`] on top of the page's `window`:
//! `location`, `history.pushState` / `history.replaceState`, a `popstate`
//! listener, and `console.warn` as the diagnostic sink. History state is
//! stored as a plain JS string; any other value (including `null`) reads back
//! as `None`.
//!
//! Requires the `web` feature and a `wasm32` target.

use crate::error::HistoryError;
use crate::history::BrowserHistory;
use crate::host::{BrowserHost, Location, PopStateEvents};
use crate::stack::NavigationStack;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{History, PopStateEvent, Window};

const POPSTATE: &str = "popstate";

/// [`BrowserHost`] backed by a browser `window`.
#[derive(Debug, Clone)]
pub struct WindowHost {
    window: Window,
}

impl WindowHost {
    /// Wrap an existing window.
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Wrap the global `window`.
    pub fn from_window() -> Result<Self, HistoryError> {
        web_sys::window()
            .map(Self::new)
            .ok_or_else(|| HistoryError::unavailable("no global `window`"))
    }

    fn history(&self) -> Result<History, HistoryError> {
        self.window
            .history()
            .map_err(|err| HistoryError::unavailable(describe(&err)))
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl BrowserHost for WindowHost {
    fn location(&self) -> Result<Location, HistoryError> {
        let location = self.window.location();
        let read = |operation: &'static str, value: Result<String, JsValue>| {
            value.map_err(|err| HistoryError::host_call(operation, describe(&err)))
        };

        Ok(Location {
            origin: read("location.origin", location.origin())?,
            path: read("location.pathname", location.pathname())?,
            fragment: read("location.hash", location.hash())?,
        })
    }

    fn history_state(&self) -> Result<Option<String>, HistoryError> {
        let state = self
            .history()?
            .state()
            .map_err(|err| HistoryError::host_call("history.state", describe(&err)))?;
        Ok(state.as_string())
    }

    fn push_state(&self, state: &str, url: &str) -> Result<(), HistoryError> {
        self.history()?
            .push_state_with_url(&JsValue::from_str(state), "", Some(url))
            .map_err(|err| HistoryError::host_call("pushState", describe(&err)))
    }

    fn replace_state(&self, state: &str, url: &str) -> Result<(), HistoryError> {
        self.history()?
            .replace_state_with_url(&JsValue::from_str(state), "", Some(url))
            .map_err(|err| HistoryError::host_call("replaceState", describe(&err)))
    }

    fn pop_state_events(&self) -> Result<PopStateEvents, HistoryError> {
        let (sender, events) = PopStateEvents::channel();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<PopStateEvent>() {
                    sender.send(event.state().as_string());
                }
            },
        ));

        self.window
            .add_event_listener_with_callback(POPSTATE, callback.as_ref().unchecked_ref())
            .map_err(|err| HistoryError::subscription(describe(&err)))?;

        let window = self.window.clone();
        Ok(events.on_drop(move || {
            let _ = window
                .remove_event_listener_with_callback(POPSTATE, callback.as_ref().unchecked_ref());
        }))
    }

    fn warn(&self, message: &str) {
        web_sys::console::warn_1(&JsValue::from_str(message));
    }
}

/// Bind `stack` to the global window's history through the global
/// [`BindingSlot`](crate::binding::BindingSlot).
pub async fn bind_window_history<T, S, D>(
    stack: &NavigationStack<T>,
    serialize: S,
    deserialize: D,
) -> Result<(), HistoryError>
where
    T: Clone + PartialEq,
    S: Fn(&T) -> Option<String>,
    D: Fn(&str) -> Option<T>,
{
    BrowserHistory::new(WindowHost::from_window()?)
        .bind(stack, serialize, deserialize)
        .await
}
