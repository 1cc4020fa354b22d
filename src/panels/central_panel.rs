use egui::{Align2, Color32, FontId, Rect, RichText, Sense};

use crate::command::Command;
use crate::renderer::{CanvasTransform, Renderer};
use crate::state::{EditorState, LoadState};

const OVERLAY_COLOR: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);

/// What happened on the canvas this frame
#[derive(Debug, Default)]
pub struct CanvasOutput {
    pub commands: Vec<Command>,
    /// Screen rect the canvas was drawn in, used to crop export captures
    pub canvas_rect: Option<Rect>,
    /// The user asked to leave a failed scene
    pub choose_another: bool,
}

/// The canvas with its loading and failure overlays
pub fn central_panel(
    ctx: &egui::Context,
    renderer: &mut Renderer,
    state: &EditorState,
    show_selection: bool,
) -> CanvasOutput {
    let mut output = CanvasOutput::default();

    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();
        let transform = CanvasTransform::fit(available);
        let response = ui.allocate_rect(transform.rect, Sense::click_and_drag());
        let painter = ui.painter_at(transform.rect);

        renderer.render(ctx, &painter, &transform, state, show_selection);
        output.commands = renderer.interact(&response, &transform, state);
        output.canvas_rect = Some(transform.rect);

        match state.load_state() {
            LoadState::Ready => {}
            LoadState::Loading => {
                painter.rect_filled(transform.rect, 0.0, OVERLAY_COLOR);
                ui.put(
                    Rect::from_center_size(transform.rect.center(), egui::vec2(48.0, 48.0)),
                    egui::Spinner::new().size(48.0),
                );
                painter.text(
                    transform.rect.center() + egui::vec2(0.0, 48.0),
                    Align2::CENTER_CENTER,
                    "Loading your image...",
                    FontId::proportional(16.0),
                    Color32::from_gray(0x37),
                );
            }
            LoadState::Failed => {
                painter.rect_filled(transform.rect, 0.0, OVERLAY_COLOR);
                let card = Rect::from_center_size(transform.rect.center(), egui::vec2(320.0, 150.0));
                ui.allocate_new_ui(egui::UiBuilder::new().max_rect(card), |ui| {
                    egui::Frame::none()
                        .fill(Color32::from_rgb(0xfe, 0xf2, 0xf2))
                        .rounding(8.0)
                        .inner_margin(16.0)
                        .show(ui, |ui| {
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("Oops! Loading failed")
                                        .color(Color32::from_rgb(0xdc, 0x26, 0x26))
                                        .strong(),
                                );
                                ui.label("We couldn't load your image. Please try another one.");
                                ui.add_space(8.0);
                                if ui.button("Choose Another Image").clicked() {
                                    output.choose_another = true;
                                }
                            });
                        });
                });
            }
        }
    });

    output
}
