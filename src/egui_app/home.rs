//! Landing screen: ticket summary plus entry points to every form.

use std::sync::Arc;

use crate::egui_app::navigation::{Navigator, Screen};
use crate::egui_app::services::AppServices;
use crate::egui_app::tickets::{RefreshOutcome, TicketBoard, TicketSource};
use crate::shared::report::ReportKind;

/// A navigation button on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub screen: Screen,
    pub label: &'static str,
}

const ENTRIES: [NavEntry; 5] = [
    NavEntry {
        screen: Screen::AdminDashboard,
        label: "Admin Dashboard",
    },
    NavEntry {
        screen: Screen::Report(ReportKind::Hostel),
        label: "Hostel Report",
    },
    NavEntry {
        screen: Screen::Report(ReportKind::Transport),
        label: "Transport Report",
    },
    NavEntry {
        screen: Screen::Report(ReportKind::Company),
        label: "Company Report",
    },
    NavEntry {
        screen: Screen::Report(ReportKind::Harassment),
        label: "Harassment Report",
    },
];

pub struct HomeScreen {
    board: Arc<TicketBoard>,
    navigator: Arc<dyn Navigator>,
}

impl HomeScreen {
    pub fn new(services: &AppServices) -> Self {
        Self {
            board: Arc::new(TicketBoard::new(services, TicketSource::Home)),
            navigator: services.navigator.clone(),
        }
    }

    pub fn entries() -> &'static [NavEntry] {
        &ENTRIES
    }

    pub fn board(&self) -> &Arc<TicketBoard> {
        &self.board
    }

    pub async fn on_focus(&self) -> RefreshOutcome {
        self.board.on_focus().await
    }

    pub fn on_blur(&self) {
        self.board.on_blur();
    }

    /// Follow a home-screen entry. Without a session the dashboard sends
    /// the user on to the login screen when it loads.
    pub fn open(&self, entry: &NavEntry) {
        self.navigator.navigate(entry.screen);
    }
}
