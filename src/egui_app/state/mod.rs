use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::debug;

use crate::egui_app::api_client::ApiError;
use crate::egui_app::auth::AuthState;
use crate::egui_app::config::Config;
use crate::egui_app::credential_store::CredentialStore;
use crate::egui_app::home::HomeScreen;
use crate::egui_app::navigation::{EntryId, NavigationStack, Navigator, Screen};
use crate::egui_app::report_form::ReportForm;
use crate::egui_app::services::AppServices;
use crate::egui_app::tickets::{TicketBoard, TicketSource};

/// Central application state shared across egui views.
///
/// View-models own the data; this struct only holds what egui needs to
/// edit in place (text buffers) and bridges async results back to the UI
/// thread.
pub struct AppState {
    pub services: AppServices,
    pub navigation: NavigationStack,
    pub home: HomeScreen,
    pub dashboard: Arc<TicketBoard>,
    pub report: Option<Arc<ReportForm>>,

    pub auth_state: AuthState,
    pub employee_id_input: String,
    pub password_input: String,
    pub report_id_input: String,
    /// Dismissable notification
    pub notice: Option<String>,

    auth_result: Option<Receiver<Result<(), String>>>,
    notice_tx: Sender<String>,
    notice_rx: Receiver<String>,
    mounted: Option<(EntryId, Screen)>,
    runtime: Runtime,
}

impl AppState {
    pub fn new(
        runtime: Runtime,
        config: Config,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let navigation = NavigationStack::new(Screen::Home);
        let services = AppServices::new(
            config,
            credentials,
            Arc::new(navigation.clone()),
            runtime.handle().clone(),
        )?;
        runtime.block_on(services.auth.restore());

        let (notice_tx, notice_rx) = channel();

        Ok(Self {
            home: HomeScreen::new(&services),
            dashboard: Arc::new(TicketBoard::new(&services, TicketSource::Dashboard)),
            report: None,
            services,
            navigation,
            auth_state: AuthState::new(),
            employee_id_input: String::new(),
            password_input: String::new(),
            report_id_input: String::new(),
            notice: None,
            auth_result: None,
            notice_tx,
            notice_rx,
            mounted: None,
            runtime,
        })
    }

    pub fn current_screen(&self) -> Screen {
        self.navigation.current()
    }

    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(future);
    }

    /// Run focus and blur hooks when the navigator has moved since the
    /// last frame.
    pub fn sync_screen(&mut self) {
        let (entry, current) = self.navigation.top();
        if self.mounted.map(|(id, _)| id) == Some(entry) {
            return;
        }
        debug!(from = ?self.mounted.map(|(_, s)| s), to = ?current, "screen change");

        match self.mounted.map(|(_, screen)| screen) {
            Some(Screen::Home) => self.home.on_blur(),
            Some(Screen::AdminDashboard) => self.dashboard.on_blur(),
            Some(Screen::Report(_)) => self.report = None,
            _ => {}
        }

        match current {
            Screen::Home => {
                let board = self.home.board().clone();
                self.spawn(async move {
                    board.on_focus().await;
                });
            }
            Screen::AdminDashboard => {
                let board = self.dashboard.clone();
                self.spawn(async move {
                    board.on_focus().await;
                });
            }
            Screen::AdminLogin => {
                self.services.auth.acknowledge_redirect();
                self.password_input.clear();
            }
            Screen::Report(kind) => {
                let form = ReportForm::new(&self.services, kind);
                self.report_id_input = form.snapshot().employee_id;
                self.report = Some(Arc::new(form));
            }
        }
        self.mounted = Some((entry, current));
    }

    /// Drain results posted by background tasks
    pub fn check_results(&mut self) {
        if let Some(ref rx) = self.auth_result {
            if let Ok(result) = rx.try_recv() {
                self.auth_result = None;
                self.auth_state.loading = false;
                match result {
                    Ok(()) => {
                        self.auth_state.clear_error();
                        self.password_input.clear();
                    }
                    Err(e) => self.auth_state.set_error(e),
                }
            }
        }

        while let Ok(notice) = self.notice_rx.try_recv() {
            self.notice = Some(notice);
        }
    }

    pub fn handle_login(&mut self) {
        if self.auth_state.loading {
            return;
        }
        self.auth_state.loading = true;
        self.auth_state.clear_error();

        let auth = self.services.auth.clone();
        let employee_id = self.employee_id_input.clone();
        let password = self.password_input.clone();

        let (tx, rx) = channel();
        self.spawn(async move {
            let result = auth
                .login(&employee_id, &password)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(result);
        });
        self.auth_result = Some(rx);
    }

    pub fn handle_logout(&mut self) {
        let auth = self.services.auth.clone();
        let notices = self.notice_tx.clone();
        self.spawn(async move {
            if auth.logout().await.is_err() {
                let _ = notices.send(
                    "Logged out, but the saved session could not be removed.".to_string(),
                );
            }
        });
    }

    pub fn handle_submit(&mut self) {
        let Some(form) = self.report.clone() else {
            return;
        };
        // The form records its own error for display
        self.spawn(async move {
            let _ = form.submit().await;
        });
    }

    pub fn refresh_dashboard(&self) {
        let board = self.dashboard.clone();
        self.spawn(async move {
            board.refresh().await;
        });
    }

    pub fn go_back(&self) {
        self.navigation.go_back();
    }
}
