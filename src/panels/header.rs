use egui::{Button, Color32, RichText};

use crate::state::EditorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Back,
    Export,
}

/// Top bar of the editor: back to search, title, export
pub fn editor_header(ctx: &egui::Context, state: &EditorState, exporting: bool) -> Option<HeaderAction> {
    let mut action = None;

    egui::TopBottomPanel::top("editor_header")
        .frame(
            egui::Frame::none()
                .fill(Color32::from_rgb(0x1f, 0x29, 0x37))
                .inner_margin(12.0),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("⏴ Back").color(Color32::WHITE))
                    .clicked()
                {
                    action = Some(HeaderAction::Back);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if exporting { "Exporting..." } else { "⮋ Export" };
                    let enabled = state.can_export() && !exporting;
                    let button = Button::new(RichText::new(label).color(Color32::WHITE)).fill(
                        if enabled {
                            Color32::from_rgb(0x16, 0xa3, 0x4a)
                        } else {
                            Color32::from_gray(0x6b)
                        },
                    );
                    if ui.add_enabled(enabled, button).clicked() {
                        action = Some(HeaderAction::Export);
                    }

                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new("Image Editor")
                                .heading()
                                .strong()
                                .color(Color32::WHITE),
                        );
                    });
                });
            });
        });

    action
}
