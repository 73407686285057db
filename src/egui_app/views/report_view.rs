use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(form) = state.report.clone() else {
        return;
    };
    let snapshot = form.snapshot();

    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(form.title())
                .size(28.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
    });
    ui.add_space(20.0);

    if let Some(ref error) = snapshot.error {
        ui.horizontal(|ui| {
            ui.colored_label(colors::ERROR, error);
            if ui.small_button("✖").clicked() {
                form.dismiss_error();
            }
        });
        ui.add_space(8.0);
    }

    ui.colored_label(colors::TEXT_SECONDARY, "Employee ID");
    let id_input = ui.add(
        egui::TextEdit::singleline(&mut state.report_id_input)
            .hint_text("Enter your employee ID")
            .desired_width(280.0),
    );
    if id_input.changed() {
        form.set_employee_id(&state.report_id_input);
    }

    let lookup = &snapshot.lookup;
    if lookup.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.colored_label(colors::TEXT_SECONDARY, "Looking up employee...");
        });
    } else if let Some(ref name) = lookup.name {
        ui.colored_label(colors::SUCCESS, format!("Employee: {}", name));
    } else if let Some(ref error) = lookup.error {
        ui.colored_label(colors::WARNING, error);
    }
    ui.add_space(12.0);

    ui.colored_label(colors::TEXT_SECONDARY, "Subcategory");
    egui::ComboBox::from_id_salt("sub_category")
        .width(280.0)
        .selected_text(snapshot.sub_category.unwrap_or("Select a subcategory"))
        .show_ui(ui, |ui| {
            for (index, label) in form.sub_categories().iter().enumerate() {
                let selected = snapshot.sub_category == Some(*label);
                if ui.selectable_label(selected, *label).clicked() {
                    let _ = form.select_index(index);
                }
            }
        });
    ui.add_space(20.0);

    if snapshot.submitting {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.colored_label(colors::TEXT_SECONDARY, "Submitting...");
        });
    } else {
        let button = egui::Button::new(egui::RichText::new("Submit").size(18.0))
            .min_size(egui::vec2(280.0, 36.0))
            .fill(colors::BUTTON_PRIMARY);
        if ui.add(button).clicked() {
            state.handle_submit();
        }
    }
}
