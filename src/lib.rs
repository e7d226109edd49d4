//! # Navigator History
//!
//! Keeps an application's navigation stack and the browser's session history
//! in step, in both directions:
//!
//! - **Back / forward buttons** restore the stack that was on screen when the
//!   history entry was written.
//! - **Address bar edits** open the route named by the typed fragment.
//! - **In-app navigation** writes history entries, so the browser buttons and
//!   the displayed URL follow the app.
//!
//! # Quick Start
//!
//! ```no_run
//! use navigator_history::{BrowserHistory, NavigationStack, RouteFragment};
//! # use navigator_history::{BrowserHost, HistoryError, Location, PopStateEvents};
//! # struct MyHost;
//! # impl BrowserHost for MyHost {
//! #     fn location(&self) -> Result<Location, HistoryError> { unimplemented!() }
//! #     fn history_state(&self) -> Result<Option<String>, HistoryError> { unimplemented!() }
//! #     fn push_state(&self, _: &str, _: &str) -> Result<(), HistoryError> { unimplemented!() }
//! #     fn replace_state(&self, _: &str, _: &str) -> Result<(), HistoryError> { unimplemented!() }
//! #     fn pop_state_events(&self) -> Result<PopStateEvents, HistoryError> { unimplemented!() }
//! # }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Screen {
//!     Main,
//!     Present(u32),
//! }
//!
//! fn save(screen: &Screen) -> Option<String> {
//!     let route = match screen {
//!         Screen::Main => RouteFragment::new("main"),
//!         Screen::Present(id) => RouteFragment::new("present").with_param("id", id.to_string()),
//!     };
//!     Some(route.to_string())
//! }
//!
//! fn restore(fragment: &str) -> Option<Screen> {
//!     let route = RouteFragment::parse(fragment)?;
//!     match route.name.as_str() {
//!         "main" => Some(Screen::Main),
//!         "present" => Some(Screen::Present(route.params.get_as("id")?)),
//!         _ => None,
//!     }
//! }
//!
//! let stack = NavigationStack::new(Screen::Main);
//! let history = BrowserHistory::new(MyHost);
//!
//! // Runs until dropped; spawn it on the UI executor.
//! let binding = async move { history.bind(&stack, save, restore).await };
//! # drop(binding);
//! ```
//!
//! On `wasm32` the `web` feature provides [`web::WindowHost`] and
//! [`web::bind_window_history`].
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `web` - `web-sys` host for browsers

#![doc(html_root_url = "https://docs.rs/navigator-history/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Error handling
pub mod error;

// Fragment codec
pub mod fragment;
pub mod params;

// Synchronization
pub mod binding;
pub mod history;
pub mod host;
pub mod stack;

// Browser host
#[cfg(feature = "web")]
#[cfg_attr(docsrs, doc(cfg(feature = "web")))]
pub mod web;

// Re-export main types for convenient access
pub use binding::{BindingGuard, BindingSlot};
pub use error::{HistoryError, SyncWarning};
pub use fragment::{build_fragment, fragment_name, fragment_parameters, RouteFragment};
pub use history::{BrowserHistory, ROOT_STATE};
pub use host::{BrowserHost, Location, PopStateEvents, PopStateSender};
pub use params::FragmentParams;
pub use stack::{NavigationStack, StackChanges};
