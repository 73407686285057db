/**
 * Grievance Desk - Desktop Entry Point
 *
 * Initializes logging and configuration, restores any saved admin session
 * and hands control to eframe.
 */
use std::sync::Arc;

use eframe::egui;
use grievance_desk::egui_app::credential_store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
use grievance_desk::egui_app::{theme, views, AppState, Config};

const DEFAULT_LOG_FILTER: &str = "grievance_desk=info";

fn init_tracing() {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();
}

fn credential_store() -> Arc<dyn CredentialStore> {
    match FileCredentialStore::in_data_dir() {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "using file credential store");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, session will not survive restarts");
            Arc::new(MemoryCredentialStore::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!(server_url = %config.server_url(), "configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let state = AppState::new(runtime, config, credential_store())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Grievance Desk",
        options,
        Box::new(move |cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(GrievanceApp { state }))
        }),
    )?;
    Ok(())
}

struct GrievanceApp {
    state: AppState,
}

impl eframe::App for GrievanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_results();
        self.state.sync_screen();

        views::render_top_bar(ctx, &mut self.state);

        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
