//! Theme and styling for the MiniQuest UI
//!
//! Kid-friendly palette; the speaker colors (Child green, AI blue) come
//! from the original web client.

use egui::{Color32, Rounding, Visuals};

#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Warning color
    pub warning: Color32,
    /// Error color
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Listening indicator color
    pub listening: Color32,

    /// Bubble colors per speaker
    pub child_bubble: Color32,
    pub ai_bubble: Color32,

    /// Border radius for bubbles
    pub bubble_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Small spacing
    pub spacing_sm: f32,
    /// Large spacing
    pub spacing_lg: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(99, 102, 241),  // Indigo
            warning: Color32::from_rgb(234, 179, 8),   // Yellow
            error: Color32::from_rgb(239, 68, 68),     // Red

            bg_primary: Color32::from_rgb(17, 24, 39),   // Dark blue-gray
            bg_secondary: Color32::from_rgb(31, 41, 55), // Lighter blue-gray

            text_primary: Color32::from_rgb(249, 250, 251), // Almost white
            text_muted: Color32::from_rgb(156, 163, 175),   // Medium gray

            listening: Color32::from_rgb(239, 68, 68), // Red

            child_bubble: Color32::from_rgb(22, 163, 74), // Green
            ai_bubble: Color32::from_rgb(37, 99, 235),    // Blue

            bubble_rounding: Rounding::same(10.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_sm: 8.0,
            spacing_lg: 24.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        ctx.set_visuals(visuals);
    }
}
