//! Transcript view
//!
//! Renders every turn in order, Child on the right in green, AI on the
//! left in blue. A pure function of the session.

use crate::session::{Session, Speaker, Turn};
use crate::ui::theme::Theme;
use egui::{Align, Color32, RichText};

pub struct TranscriptList<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> TranscriptList<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    let turns = self.session.transcript.turns();
                    if turns.is_empty() {
                        self.show_empty_state(ui);
                    } else {
                        for turn in turns {
                            self.show_turn(ui, turn);
                            ui.add_space(self.theme.spacing_sm);
                        }
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.label(
                RichText::new("Welcome to MiniQuest")
                    .size(24.0)
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("Press Start Quest to begin your adventure, then speak your moves.")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_turn(&self, ui: &mut egui::Ui, turn: &Turn) {
        let is_child = turn.speaker == Speaker::Child;
        let bubble_color = if is_child {
            self.theme.child_bubble
        } else {
            self.theme.ai_bubble
        };

        let align = if is_child { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            // Speaker label
            ui.label(
                RichText::new(turn.speaker.to_string())
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    let response = ui.label(RichText::new(&turn.text).color(Color32::WHITE));
                    let accessible = format!("{} turn: {}", turn.speaker, turn.text);
                    response.widget_info(move || {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &accessible)
                    });
                });

            let time_str = turn.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }
}
