//! Styling helpers.

use eframe::egui::{self, Color32, CornerRadius, Stroke};

use super::colors;
use crate::shared::ticket::TicketStatus;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.window_fill = colors::PANEL_BG;
    style.visuals.extreme_bg_color = colors::INPUT_BG;

    style.visuals.widgets.inactive.bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.hovered.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Frame for a single ticket row
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PANEL_BG)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
}

/// Badge color for a ticket status
pub fn status_color(status: TicketStatus) -> Color32 {
    match status {
        TicketStatus::Open => colors::ERROR,
        TicketStatus::InProgress => colors::WARNING,
        TicketStatus::Resolved => colors::SUCCESS,
        TicketStatus::Unknown => colors::NEUTRAL,
    }
}
