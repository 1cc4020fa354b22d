use egui::{Align2, Color32, FontId, Response, Sense, Ui, vec2};

/// Square icon-over-label button used by the shape and object action panels
pub struct ToolButton {
    pub icon: &'static str,
    pub label: &'static str,
    pub danger: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, label: &'static str) -> Self {
        Self {
            icon,
            label,
            danger: false,
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let button_size = vec2(72.0, 52.0);
        let sense = if ui.is_enabled() {
            Sense::click()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = match (self.danger, response.hovered() && ui.is_enabled()) {
                (true, true) => Color32::from_rgb(0xfe, 0xca, 0xca),
                (true, false) => Color32::from_rgb(0xfe, 0xe2, 0xe2),
                (false, true) => Color32::from_gray(0xe5),
                (false, false) => Color32::WHITE,
            };
            let text_color = match (self.danger, ui.is_enabled()) {
                (_, false) => Color32::from_gray(160),
                (true, true) => Color32::from_rgb(0xb9, 0x1c, 0x1c),
                (false, true) => Color32::from_gray(0x37),
            };

            ui.painter().rect_filled(rect, 6.0, bg_color);
            ui.painter().text(
                rect.center() - vec2(0.0, 9.0),
                Align2::CENTER_CENTER,
                self.icon,
                FontId::proportional(18.0),
                text_color,
            );
            ui.painter().text(
                rect.center() + vec2(0.0, 13.0),
                Align2::CENTER_CENTER,
                self.label,
                FontId::proportional(11.0),
                text_color,
            );
        }

        response
    }
}
