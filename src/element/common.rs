use egui::{Color32, FontId, Pos2, Rect, Vec2};

// Canvas and default object geometry
pub const CANVAS_SIZE: Vec2 = Vec2::new(800.0, 600.0);
pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(0xf8, 0xfa, 0xfc);

pub const DEFAULT_TEXT: &str = "Edit me";
pub const DEFAULT_FONT_SIZE: f32 = 24.0;
pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 120.0;
pub const DEFAULT_FONT_COLOR: Color32 = Color32::BLACK;

pub const DEFAULT_SHAPE_SIZE: Vec2 = Vec2::new(100.0, 100.0);
pub const DEFAULT_CIRCLE_RADIUS: f32 = 50.0;
pub const DEFAULT_SHAPE_COLOR: Color32 = Color32::from_rgb(0xff, 0x00, 0x00);

pub const BACKGROUND_SCALE: f32 = 1.5;

/// Smallest width or height a resize can shrink a shape to
pub const MIN_OBJECT_EXTENT: f32 = 4.0;

const TEXT_PADDING: f32 = 10.0;

/// Center of the canvas in canvas coordinates
pub fn canvas_center() -> Pos2 {
    (CANVAS_SIZE / 2.0).to_pos2()
}

/// Size of a single line of caption text as it will be painted, in canvas
/// units.
pub trait TextMeasure {
    fn text_size(&self, content: &str, font_size: f32) -> Vec2;
}

/// Lays the text out with the context's fonts, exactly as the renderer does.
///
/// Fonts only exist after the first frame has started.
impl TextMeasure for egui::Context {
    fn text_size(&self, content: &str, font_size: f32) -> Vec2 {
        self.fonts(|fonts| {
            fonts
                .layout_no_wrap(
                    content.to_owned(),
                    FontId::proportional(font_size),
                    Color32::PLACEHOLDER,
                )
                .size()
        })
    }
}

/// Clickable box around a line of text of the given size
pub(crate) fn text_bounds(center: Pos2, size: Vec2) -> Rect {
    Rect::from_center_size(center, size).expand(TEXT_PADDING)
}

/// Vertices of an apex-up isosceles triangle inscribed in `rect`
pub fn triangle_points(rect: Rect) -> [Pos2; 3] {
    [
        Pos2::new(rect.center().x, rect.min.y),
        Pos2::new(rect.max.x, rect.max.y),
        Pos2::new(rect.min.x, rect.max.y),
    ]
}

pub(crate) fn point_in_triangle(p: Pos2, [a, b, c]: [Pos2; 3]) -> bool {
    fn sign(p: Pos2, a: Pos2, b: Pos2) -> f32 {
        (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
    }

    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

pub fn clamp_font_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    } else {
        DEFAULT_FONT_SIZE
    }
}
