//! Speak button
//!
//! Circular mic button that starts one voice capture. Disabled while a
//! capture is listening and re-enabled on either terminal outcome; when
//! the capture capability is missing it stays visible but inert, with the
//! status label explaining why.

use crate::session::ListeningState;
use crate::ui::theme::Theme;
use egui::{Color32, Rect, RichText, Sense, Vec2};

pub struct SpeakButton<'a> {
    listening: ListeningState,
    capture_available: bool,
    theme: &'a Theme,
}

impl<'a> SpeakButton<'a> {
    pub fn new(listening: ListeningState, capture_available: bool, theme: &'a Theme) -> Self {
        Self {
            listening,
            capture_available,
            theme,
        }
    }

    /// Show the button; returns true when a capture should start.
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut clicked = false;

        ui.vertical_centered(|ui| {
            let enabled = self.capture_available && self.listening.is_idle();

            let size = Vec2::splat(60.0);
            let sense = if enabled { Sense::click() } else { Sense::hover() };
            let (rect, response) = ui.allocate_exact_size(size, sense);

            if ui.is_rect_visible(rect) {
                self.paint_button(ui, rect, &response, enabled);
            }

            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, "Speak")
            });

            if enabled && response.clicked() {
                clicked = true;
            }

            ui.add_space(self.theme.spacing_sm);

            let (status, color) = if !self.capture_available {
                ("Voice input unavailable", self.theme.warning)
            } else if self.listening.is_listening() {
                ("Listening...", self.theme.listening)
            } else {
                ("Press to speak", self.theme.text_muted)
            };
            ui.label(RichText::new(status).size(12.0).color(color));
        });

        clicked
    }

    fn paint_button(
        &self,
        ui: &mut egui::Ui,
        rect: Rect,
        response: &egui::Response,
        enabled: bool,
    ) {
        let painter = ui.painter();
        let is_listening = self.listening.is_listening();

        let bg_color = if is_listening {
            self.theme.listening
        } else if !enabled {
            self.theme.bg_secondary
        } else if response.hovered() {
            self.theme.primary.gamma_multiply(1.2)
        } else {
            self.theme.primary
        };

        painter.circle_filled(rect.center(), 28.0, bg_color);

        self.draw_mic_icon(painter, rect.center(), enabled || is_listening);

        if is_listening {
            self.draw_pulsing_ring(ui, rect.center());
        }
    }

    fn draw_mic_icon(&self, painter: &egui::Painter, center: egui::Pos2, active: bool) {
        let color = if active {
            Color32::WHITE
        } else {
            self.theme.text_muted
        };

        // Mic body
        let mic_rect = Rect::from_center_size(
            egui::pos2(center.x, center.y - 3.0),
            Vec2::new(8.0, 14.0),
        );
        painter.rect_filled(mic_rect, 4.0, color);

        // Stand
        let stem_start = egui::pos2(center.x, center.y + 6.0);
        let stem_end = egui::pos2(center.x, center.y + 12.0);
        painter.line_segment([stem_start, stem_end], egui::Stroke::new(2.0, color));

        // Base
        painter.line_segment(
            [
                egui::pos2(center.x - 6.0, center.y + 12.0),
                egui::pos2(center.x + 6.0, center.y + 12.0),
            ],
            egui::Stroke::new(2.0, color),
        );
    }

    fn draw_pulsing_ring(&self, ui: &egui::Ui, center: egui::Pos2) {
        let t = ui.ctx().input(|i| i.time);
        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

        let radius = 30.0 + pulse * 8.0;
        let alpha = (1.0 - pulse) * 0.6;

        ui.painter().circle_stroke(
            center,
            radius,
            egui::Stroke::new(2.0 + pulse * 2.0, self.theme.listening.gamma_multiply(alpha)),
        );

        ui.ctx().request_repaint();
    }
}
