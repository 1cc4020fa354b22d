use egui::{Color32, RichText, Sense, Stroke, vec2};

use crate::search::{SearchRequest, SearchState};

const THUMBNAIL_SIZE: f32 = 180.0;
const HIGHLIGHT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Submit(SearchRequest),
    /// Hand the chosen image over to the editor
    OpenEditor(String),
}

/// Search form, error banner and result grid
pub fn search_panel(ctx: &egui::Context, search: &mut SearchState) -> Option<SearchAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.set_max_width(720.0);
            ui.horizontal(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(&mut search.query)
                        .hint_text("Search for images...")
                        .desired_width(560.0),
                );
                let submitted_with_enter =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let label = if search.is_loading() { "Searching..." } else { "Search" };
                let clicked = ui
                    .add_enabled(search.can_submit(), egui::Button::new(label))
                    .clicked();

                // Enter may start a search while another is in flight; only
                // the newest response is shown
                if clicked || submitted_with_enter {
                    if let Some(request) = search.begin() {
                        action = Some(SearchAction::Submit(request));
                    }
                }
            });

            if let Some(error) = search.error() {
                ui.add_space(12.0);
                egui::Frame::none()
                    .fill(Color32::from_rgb(0xfe, 0xe2, 0xe2))
                    .stroke(Stroke::new(1.0, Color32::from_rgb(0xef, 0x44, 0x44)))
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(error).color(Color32::from_rgb(0xb9, 0x1c, 0x1c)));
                    });
            }
        });

        ui.add_space(24.0);

        if search.is_loading() {
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(48.0));
            });
            return;
        }

        if search.hits().is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("No images found. Try searching again.")
                        .color(Color32::from_gray(0x6b)),
                );
            });
            return;
        }

        if let Some(open) = result_grid(ui, search) {
            action = Some(open);
        }
    });

    action
}

fn result_grid(ui: &mut egui::Ui, search: &mut SearchState) -> Option<SearchAction> {
    let mut action = None;
    let mut clicked = None;
    let columns = ((ui.available_width() / (THUMBNAIL_SIZE + 16.0)) as usize).max(1);

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("search_results")
            .spacing([16.0, 16.0])
            .show(ui, |ui| {
                for (index, hit) in search.hits().iter().enumerate() {
                    let highlighted = search.highlighted() == Some(index);
                    let response = ui.add(
                        egui::Image::new(hit.preview_url.as_str())
                            .fit_to_exact_size(vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE))
                            .maintain_aspect_ratio(false)
                            .rounding(8.0)
                            .sense(Sense::click()),
                    );
                    let response = if hit.alt_text.is_empty() {
                        response
                    } else {
                        response.on_hover_text(&hit.alt_text)
                    };

                    if highlighted {
                        ui.painter()
                            .rect_stroke(response.rect.expand(2.0), 8.0, Stroke::new(4.0, HIGHLIGHT));
                        let button_rect =
                            egui::Rect::from_center_size(response.rect.center(), vec2(120.0, 32.0));
                        if ui
                            .put(button_rect, egui::Button::new("Add Captions"))
                            .clicked()
                        {
                            action = search
                                .chosen_url()
                                .map(|url| SearchAction::OpenEditor(url.to_owned()));
                        }
                    } else if response.clicked() {
                        clicked = Some(index);
                    }

                    if (index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    });

    if let Some(index) = clicked {
        search.highlight(index);
    }
    action
}
