//! Test utilities for history binding tests
//!
//! Provides an in-memory browser, a small route model, and a helper that runs
//! a binding on a `LocalPool` so tests can step it deterministically.

#![allow(dead_code)]

use futures::executor::LocalPool;
use futures::future::{abortable, AbortHandle, Aborted};
use futures::task::LocalSpawnExt;
use navigator_history::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const ORIGIN: &str = "https://app";
pub const PATH: &str = "/";

/// Initialize logging once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Route model
// ============================================================================

/// Screens of the test application
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Root,
    Detail(u32),
    /// Transient screen with no history form
    Dialog,
}

pub fn save_screen(screen: &Screen) -> Option<String> {
    match screen {
        Screen::Root => Some(RouteFragment::new("root").to_string()),
        Screen::Detail(id) => Some(
            RouteFragment::new("detail")
                .with_param("id", id.to_string())
                .to_string(),
        ),
        Screen::Dialog => None,
    }
}

pub fn restore_screen(fragment: &str) -> Option<Screen> {
    let route = RouteFragment::parse(fragment)?;
    match route.name.as_str() {
        "root" => Some(Screen::Root),
        "detail" => Some(Screen::Detail(route.params.get_as("id")?)),
        _ => None,
    }
}

pub fn url(fragment: &str) -> String {
    format!("{}{}{}", ORIGIN, PATH, fragment)
}

// ============================================================================
// In-memory browser
// ============================================================================

/// One session history entry
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub state: Option<String>,
    pub url: String,
}

/// A history write performed by the binder
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Push { state: String, url: String },
    Replace { state: String, url: String },
}

impl Write {
    pub fn push(state: &str, fragment: &str) -> Self {
        Write::Push {
            state: state.to_string(),
            url: url(fragment),
        }
    }

    pub fn replace(state: &str, fragment: &str) -> Self {
        Write::Replace {
            state: state.to_string(),
            url: url(fragment),
        }
    }
}

/// Browser session history kept in memory
#[derive(Debug)]
pub struct MockHost {
    entries: RefCell<Vec<Entry>>,
    index: Cell<usize>,
    writes: RefCell<Vec<Write>>,
    warnings: RefCell<Vec<String>>,
    listeners: RefCell<Vec<PopStateSender>>,
    subscriptions: Rc<Cell<usize>>,
    fail_subscription: Cell<bool>,
    reject_writes: Cell<bool>,
}

impl MockHost {
    /// Fresh tab at `https://app/` with no fragment and no state
    pub fn new() -> Rc<Self> {
        Self::with_current(None, "")
    }

    /// Tab whose current entry carries `state` and shows `fragment`
    pub fn with_current(state: Option<&str>, fragment: &str) -> Rc<Self> {
        Rc::new(Self {
            entries: RefCell::new(vec![Entry {
                state: state.map(String::from),
                url: url(fragment),
            }]),
            index: Cell::new(0),
            writes: RefCell::new(Vec::new()),
            warnings: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            subscriptions: Rc::new(Cell::new(0)),
            fail_subscription: Cell::new(false),
            reject_writes: Cell::new(false),
        })
    }

    pub fn fail_subscription(&self) {
        self.fail_subscription.set(true);
    }

    pub fn reject_writes(&self) {
        self.reject_writes.set(true);
    }

    /// Browser back button
    pub fn back(&self) {
        let index = self.index.get();
        assert!(index > 0, "no entry to go back to");
        self.index.set(index - 1);
        self.emit(self.current().state);
    }

    /// Browser forward button
    pub fn forward(&self) {
        let index = self.index.get() + 1;
        assert!(index < self.entries.borrow().len(), "no entry to go forward to");
        self.index.set(index);
        self.emit(self.current().state);
    }

    /// User types a new fragment into the address bar
    pub fn type_fragment(&self, fragment: &str) {
        let index = self.index.get();
        {
            let mut entries = self.entries.borrow_mut();
            entries.truncate(index + 1);
            entries.push(Entry {
                state: None,
                url: url(fragment),
            });
        }
        self.index.set(index + 1);
        self.emit(None);
    }

    /// Deliver a popstate without moving through history
    pub fn emit(&self, state: Option<String>) {
        for listener in self.listeners.borrow().iter() {
            listener.send(state.clone());
        }
    }

    pub fn current(&self) -> Entry {
        self.entries.borrow()[self.index.get()].clone()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.borrow().clone()
    }

    pub fn last_write(&self) -> Option<Write> {
        self.writes.borrow().last().cloned()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.get()
    }

    fn fragment_of(url: &str) -> String {
        url.find('#').map(|at| url[at..].to_string()).unwrap_or_default()
    }
}

impl BrowserHost for MockHost {
    fn location(&self) -> Result<Location, HistoryError> {
        Ok(Location::new(
            ORIGIN,
            PATH,
            Self::fragment_of(&self.current().url),
        ))
    }

    fn history_state(&self) -> Result<Option<String>, HistoryError> {
        Ok(self.current().state)
    }

    fn push_state(&self, state: &str, url: &str) -> Result<(), HistoryError> {
        if self.reject_writes.get() {
            return Err(HistoryError::host_call("pushState", "rejected"));
        }
        let index = self.index.get();
        {
            let mut entries = self.entries.borrow_mut();
            entries.truncate(index + 1);
            entries.push(Entry {
                state: Some(state.to_string()),
                url: url.to_string(),
            });
        }
        self.index.set(index + 1);
        self.writes.borrow_mut().push(Write::Push {
            state: state.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn replace_state(&self, state: &str, url: &str) -> Result<(), HistoryError> {
        if self.reject_writes.get() {
            return Err(HistoryError::host_call("replaceState", "rejected"));
        }
        self.entries.borrow_mut()[self.index.get()] = Entry {
            state: Some(state.to_string()),
            url: url.to_string(),
        };
        self.writes.borrow_mut().push(Write::Replace {
            state: state.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn pop_state_events(&self) -> Result<PopStateEvents, HistoryError> {
        if self.fail_subscription.get() {
            return Err(HistoryError::subscription("listener rejected"));
        }
        let (sender, events) = PopStateEvents::channel();
        self.listeners.borrow_mut().push(sender);

        let subscriptions = Rc::clone(&self.subscriptions);
        subscriptions.set(subscriptions.get() + 1);
        Ok(events.on_drop(move || subscriptions.set(subscriptions.get() - 1)))
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

// ============================================================================
// Binding driver
// ============================================================================

pub type Outcome = Result<Result<(), HistoryError>, Aborted>;

/// A binding spawned on a `LocalPool`
pub struct Binding {
    handle: AbortHandle,
    outcome: Rc<RefCell<Option<Outcome>>>,
}

impl Binding {
    /// Cancel the binding; takes effect on the next pool run
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// `None` while the binding is still running
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.outcome.borrow().is_none()
    }
}

/// Spawn `bind` for `stack` on `pool` with the test route model
pub fn spawn_binding(
    pool: &LocalPool,
    host: &Rc<MockHost>,
    slot: &'static BindingSlot,
    stack: &NavigationStack<Screen>,
) -> Binding {
    let history = BrowserHistory::with_slot(Rc::clone(host), slot);
    let stack = stack.clone();
    let (task, handle) =
        abortable(async move { history.bind(&stack, save_screen, restore_screen).await });

    let outcome = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&outcome);
    pool.spawner()
        .spawn_local(async move {
            let result = task.await;
            *sink.borrow_mut() = Some(result);
        })
        .expect("spawn binding");

    Binding { handle, outcome }
}

/// Common setup: fresh host, `[Root]` stack, binding already seeded
pub fn bound_root(
    slot: &'static BindingSlot,
) -> (LocalPool, Rc<MockHost>, NavigationStack<Screen>, Binding) {
    init_logging();
    let mut pool = LocalPool::new();
    let host = MockHost::new();
    let stack = NavigationStack::new(Screen::Root);
    let binding = spawn_binding(&pool, &host, slot, &stack);
    pool.run_until_stalled();
    (pool, host, stack, binding)
}
