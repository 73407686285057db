//! Color constants for the grievance desk.

use eframe::egui::Color32;

/// Window background - Slate
pub const BG_DARK: Color32 = Color32::from_rgb(0x1E, 0x29, 0x3B);

/// Cards and list rows
pub const PANEL_BG: Color32 = Color32::from_rgb(0x27, 0x34, 0x49);

pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x0F, 0x17, 0x2A);

pub const INPUT_BG: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);

pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF1, 0xF5, 0xF9);

pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x94, 0xA3, 0xB8);

pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x25, 0x63, 0xEB);

pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);

pub const SUCCESS: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);

pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

pub const WARNING: Color32 = Color32::from_rgb(0xF5, 0x9E, 0x0B);

/// Status of a ticket nobody recognises
pub const NEUTRAL: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);
