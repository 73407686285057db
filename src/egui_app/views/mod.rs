use eframe::egui;

use crate::egui_app::auth::AuthPhase;
use crate::egui_app::navigation::Screen;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{self, colors};
use crate::egui_app::tickets::LoadState;
use crate::shared::ticket::Ticket;

pub mod dashboard_view;
pub mod home_view;
pub mod login_view;
pub mod report_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let frame_style = egui::Frame::default()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            let screen = state.current_screen();

            ui.horizontal(|ui| {
                if state.navigation.depth() > 1 && ui.button("⬅ Back").clicked() {
                    state.go_back();
                }
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new(screen.title()).size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);
                    if state.services.auth.phase() == AuthPhase::LoggedIn
                        && ui.button("Logout").clicked()
                    {
                        state.handle_logout();
                    }
                });
            });

            if let Some(notice) = state.notice.clone() {
                ui.horizontal(|ui| {
                    ui.colored_label(colors::WARNING, notice);
                    if ui.small_button("✖").clicked() {
                        state.notice = None;
                    }
                });
            }
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(16));

    egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match state.current_screen() {
            Screen::Home => home_view::render(ui, state),
            Screen::AdminLogin => login_view::render(ui, state),
            Screen::AdminDashboard => dashboard_view::render(ui, state),
            Screen::Report(_) => report_view::render(ui, state),
        });
}

/// Shared rendering of a ticket board's load state
pub(crate) fn render_tickets(ui: &mut egui::Ui, load_state: &LoadState, empty_text: &str) {
    match load_state {
        LoadState::Idle => {}
        LoadState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.colored_label(colors::TEXT_SECONDARY, "Loading tickets...");
            });
        }
        LoadState::Empty => {
            ui.colored_label(colors::TEXT_SECONDARY, empty_text);
        }
        LoadState::Failed(message) => {
            ui.colored_label(colors::ERROR, message);
        }
        LoadState::Ready(tickets) => {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (position, ticket) in tickets.iter().enumerate() {
                    ui.push_id(ticket.key(position), |ui| render_ticket(ui, ticket));
                    ui.add_space(6.0);
                }
            });
        }
    }
}

fn render_ticket(ui: &mut egui::Ui, ticket: &Ticket) {
    let status = ticket.display_status();
    theme::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new(ticket.display_name()).strong(),
                );
                ui.colored_label(colors::TEXT_SECONDARY, ticket.sub_category_label());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(theme::status_color(status), status.label());
            });
        });
    });
}
