use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::views::render_tickets;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let tickets = state.dashboard.state();

    ui.horizontal(|ui| {
        ui.colored_label(
            colors::TEXT_LIGHT,
            egui::RichText::new("All tickets").size(22.0).strong(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!tickets.is_loading(), egui::Button::new("🔄 Refresh"))
                .clicked()
            {
                state.refresh_dashboard();
            }
        });
    });
    ui.add_space(12.0);

    render_tickets(ui, &tickets, "No tickets found.");
}
