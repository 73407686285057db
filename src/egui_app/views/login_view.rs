use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let input_width = 280.0;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(
            egui::RichText::new("Admin Login")
                .size(28.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        ui.add_space(20.0);

        if let Some(ref error) = state.auth_state.error {
            ui.label(egui::RichText::new(error).color(colors::ERROR));
            ui.add_space(10.0);
        }

        ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(&mut state.employee_id_input).hint_text("Employee ID"),
        );
        ui.add_space(8.0);

        let password = ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(&mut state.password_input)
                .password(true)
                .hint_text("Password"),
        );
        ui.add_space(16.0);

        let submit_on_enter =
            password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if state.auth_state.loading {
            ui.spinner();
        } else {
            let button = egui::Button::new(egui::RichText::new("Login").size(18.0))
                .min_size(egui::vec2(input_width, 36.0))
                .fill(colors::BUTTON_PRIMARY);
            if ui.add(button).clicked() || submit_on_enter {
                state.handle_login();
            }
        }
    });
}
