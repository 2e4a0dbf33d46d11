//! Main application struct and eframe integration

use crate::session::SessionController;
use crate::ui::components::{SpeakButton, TranscriptList};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, TopBottomPanel};

pub struct MiniquestApp {
    controller: SessionController,
    theme: Theme,
}

impl MiniquestApp {
    pub fn new(cc: &eframe::CreationContext<'_>, controller: SessionController) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self { controller, theme }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("MiniQuest")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Voice Quest")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(quest_id) = &self.controller.session().quest_id {
                            ui.label(
                                RichText::new(format!("Quest {}", quest_id))
                                    .size(11.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.theme.text_muted),
                            );
                        }
                    });
                });
            });
    }

    fn show_controls(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("controls")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    let error_message = self.controller.last_error().map(|e| e.user_message());
                    if let Some(message) = error_message {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(message).color(self.theme.error));
                            if ui.small_button("✕").clicked() {
                                self.controller.clear_error();
                            }
                        });
                        ui.add_space(self.theme.spacing_sm);
                    }

                    ui.horizontal(|ui| {
                        // Start Quest is always enabled; a failed start can
                        // simply be pressed again
                        let start = ui.button(RichText::new("Start Quest").size(16.0));
                        start.widget_info(|| {
                            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Start Quest")
                        });
                        if start.clicked() {
                            // Failures land in last_error and show in the banner
                            let _ = self.controller.start_quest();
                        }

                        ui.add_space(self.theme.spacing);

                        let speak = SpeakButton::new(
                            self.controller.session().listening,
                            self.controller.capture_available(),
                            &self.theme,
                        );
                        if speak.show(ui) {
                            let _ = self.controller.speak();
                        }
                    });
                });
            });
    }

    fn show_transcript(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                TranscriptList::new(self.controller.session(), &self.theme).show(ui);
            });
    }
}

impl eframe::App for MiniquestApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Fold worker events into the session before rendering
        self.controller.poll();

        self.show_header(ctx);
        self.show_controls(ctx);
        self.show_transcript(ctx);

        // Keep polling while a capture or request can still complete
        if self.controller.session().listening.is_listening() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}
