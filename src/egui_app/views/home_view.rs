use eframe::egui;

use crate::egui_app::home::HomeScreen;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::views::render_tickets;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.colored_label(
            colors::TEXT_LIGHT,
            egui::RichText::new("Employee Grievance Desk").size(32.0).strong(),
        );
        ui.add_space(20.0);

        for entry in HomeScreen::entries() {
            let button = egui::Button::new(egui::RichText::new(entry.label).size(18.0))
                .min_size(egui::vec2(240.0, 40.0))
                .fill(colors::BUTTON_PRIMARY);
            if ui.add(button).clicked() {
                state.home.open(entry);
            }
            ui.add_space(8.0);
        }
    });

    ui.add_space(20.0);
    ui.separator();
    ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Recent tickets").size(18.0));
    ui.add_space(8.0);

    let tickets = state.home.board().state();
    render_tickets(ui, &tickets, "No tickets yet.");
}
