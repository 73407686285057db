//! Screen routing
//!
//! View-models never talk to the UI toolkit directly; they ask a
//! [`Navigator`] to move between named screens. [`NavigationStack`] is the
//! in-process implementation the desktop shell renders from.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::shared::report::ReportKind;

/// Named screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    AdminLogin,
    AdminDashboard,
    Report(ReportKind),
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::AdminLogin => "Admin Login",
            Screen::AdminDashboard => "Admin Dashboard",
            Screen::Report(kind) => kind.title(),
        }
    }
}

/// Identity of one visit to a screen. Opening the same screen twice yields
/// two different entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// Routing operations available to view-models
pub trait Navigator: Send + Sync {
    fn current(&self) -> Screen;
    fn current_entry(&self) -> EntryId;
    /// Push a screen on top of the current one
    fn navigate(&self, screen: Screen);
    /// Swap the current screen without growing history
    fn replace(&self, screen: Screen);
    /// Pop the current screen; a no-op at the root
    fn go_back(&self);
    /// Pop only if `entry` is still on top. Returns whether it popped.
    fn go_back_from(&self, entry: EntryId) -> bool;
    /// Drop all history and show `screen`
    fn reset_to(&self, screen: Screen);
}

#[derive(Debug)]
struct History {
    entries: Vec<(EntryId, Screen)>,
    next_id: u64,
}

impl History {
    fn push(&mut self, screen: Screen) {
        self.next_id += 1;
        self.entries.push((EntryId(self.next_id), screen));
    }

    fn top(&self) -> (EntryId, Screen) {
        self.entries
            .last()
            .copied()
            .unwrap_or((EntryId(0), Screen::Home))
    }
}

/// Thread-safe in-memory navigation history
#[derive(Debug, Clone)]
pub struct NavigationStack {
    history: Arc<Mutex<History>>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

impl NavigationStack {
    pub fn new(initial: Screen) -> Self {
        let mut history = History {
            entries: Vec::new(),
            next_id: 0,
        };
        history.push(initial);
        Self {
            history: Arc::new(Mutex::new(history)),
        }
    }

    pub fn history(&self) -> Vec<Screen> {
        self.lock().entries.iter().map(|(_, screen)| *screen).collect()
    }

    pub fn depth(&self) -> usize {
        self.lock().entries.len()
    }

    /// Current entry and its screen, read together
    pub fn top(&self) -> (EntryId, Screen) {
        self.lock().top()
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        // A poisoned stack still holds a valid history
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Navigator for NavigationStack {
    fn current(&self) -> Screen {
        self.lock().top().1
    }

    fn current_entry(&self) -> EntryId {
        self.lock().top().0
    }

    fn navigate(&self, screen: Screen) {
        debug!(?screen, "navigate");
        self.lock().push(screen);
    }

    fn replace(&self, screen: Screen) {
        debug!(?screen, "replace");
        let mut history = self.lock();
        history.entries.pop();
        history.push(screen);
    }

    fn go_back(&self) {
        let mut history = self.lock();
        if history.entries.len() > 1 {
            history.entries.pop();
            debug!(screen = ?history.top().1, "back");
        }
    }

    fn go_back_from(&self, entry: EntryId) -> bool {
        let mut history = self.lock();
        if history.entries.len() > 1 && history.top().0 == entry {
            history.entries.pop();
            debug!(screen = ?history.top().1, "back");
            return true;
        }
        false
    }

    fn reset_to(&self, screen: Screen) {
        debug!(?screen, "reset");
        let mut history = self.lock();
        history.entries.clear();
        history.push(screen);
    }
}
