use std::sync::Arc;

use egui::{
    Align2, Color32, ColorImage, Context, CursorIcon, FontId, Painter, Pos2, Rect, Response, Shape,
    Stroke, TextureHandle, TextureOptions, Vec2,
};
use log::debug;

use crate::command::Command;
use crate::element::{CANVAS_BACKGROUND, CANVAS_SIZE, ObjectKind, SceneObject, triangle_points};
use crate::state::EditorState;

const SELECTION_COLOR: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const SELECTION_PADDING: f32 = 4.0;
const PLACEHOLDER_COLOR: Color32 = Color32::from_gray(200);
const HANDLE_SIZE: f32 = 10.0;

/// A corner of the selection outline, where the resize handles sit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn position(self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorIcon::ResizeNwSe,
            Corner::TopRight | Corner::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }

    /// The corner whose handle contains `pos`, if any
    pub fn at(rect: Rect, pos: Pos2) -> Option<Corner> {
        Corner::ALL.into_iter().find(|corner| {
            Rect::from_center_size(corner.position(rect), Vec2::splat(HANDLE_SIZE)).contains(pos)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Drag {
    #[default]
    None,
    Move,
    Resize,
}

/// Maps the fixed-size canvas into the screen rect it is shown in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Screen rect covered by the canvas
    pub rect: Rect,
    /// Screen points per canvas unit
    pub zoom: f32,
}

impl CanvasTransform {
    /// Largest uniform fit of the canvas inside `available`, centered
    pub fn fit(available: Rect) -> Self {
        let zoom = (available.width() / CANVAS_SIZE.x)
            .min(available.height() / CANVAS_SIZE.y)
            .max(f32::EPSILON);
        let rect = Rect::from_center_size(available.center(), CANVAS_SIZE * zoom);
        Self { rect, zoom }
    }

    pub fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2() * self.zoom
    }

    pub fn to_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }

    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        ((pos - self.rect.min) / self.zoom).to_pos2()
    }

    pub fn to_canvas_delta(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }
}

/// Draws the scene and turns pointer input on the canvas into commands
#[derive(Default)]
pub struct Renderer {
    background_texture: Option<(Arc<ColorImage>, TextureHandle)>,
    drag: Drag,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_background_texture", &self.background_texture.is_some())
            .field("drag", &self.drag)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the background pixels once per loaded image
    fn sync_background_texture(&mut self, ctx: &Context, state: &EditorState) {
        let Some(background) = state.background() else {
            self.background_texture = None;
            return;
        };

        let up_to_date = self
            .background_texture
            .as_ref()
            .is_some_and(|(pixels, _)| Arc::ptr_eq(pixels, &background.pixels));
        if !up_to_date {
            debug!("Uploading background texture for {}", background.url);
            let handle = ctx.load_texture(
                "background",
                (*background.pixels).clone(),
                TextureOptions::LINEAR,
            );
            self.background_texture = Some((background.pixels.clone(), handle));
        }
    }

    /// Draw the scene back to front.
    ///
    /// `show_selection` is off while a frame is being captured for export.
    pub fn render(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        transform: &CanvasTransform,
        state: &EditorState,
        show_selection: bool,
    ) {
        self.sync_background_texture(ctx, state);

        let painter = painter.with_clip_rect(transform.rect);
        painter.rect_filled(transform.rect, 0.0, CANVAS_BACKGROUND);

        for object in state.scene().objects() {
            self.draw_object(ctx, &painter, transform, object);
        }

        if !show_selection {
            return;
        }
        if let Some(outline) = selection_outline(ctx, transform, state) {
            painter.rect_stroke(outline, 0.0, Stroke::new(1.5, SELECTION_COLOR));
            if state.is_interactive() {
                for corner in Corner::ALL {
                    let handle =
                        Rect::from_center_size(corner.position(outline), Vec2::splat(HANDLE_SIZE));
                    painter.rect_filled(handle, 2.0, SELECTION_COLOR);
                    painter.rect_stroke(handle, 2.0, Stroke::new(1.0, Color32::WHITE));
                }
            }
        }
    }

    fn draw_object(
        &self,
        ctx: &Context,
        painter: &Painter,
        transform: &CanvasTransform,
        object: &SceneObject,
    ) {
        let screen_rect = transform.to_screen_rect(object.bounds(ctx));
        match object.kind() {
            ObjectKind::Image { .. } => match &self.background_texture {
                Some((_, texture)) => {
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(texture.id(), screen_rect, uv, Color32::WHITE);
                }
                None => {
                    painter.rect_filled(screen_rect, 0.0, PLACEHOLDER_COLOR);
                }
            },
            ObjectKind::Rectangle { fill, .. } => {
                painter.rect_filled(screen_rect, 0.0, *fill);
            }
            ObjectKind::Circle { radius, fill } => {
                painter.circle_filled(
                    transform.to_screen(object.center()),
                    radius * transform.zoom,
                    *fill,
                );
            }
            ObjectKind::Triangle { fill, .. } => {
                let points = triangle_points(screen_rect).to_vec();
                painter.add(Shape::convex_polygon(points, *fill, Stroke::NONE));
            }
            ObjectKind::Text {
                content,
                font_size,
                color,
            } => {
                painter.text(
                    transform.to_screen(object.center()),
                    Align2::CENTER_CENTER,
                    content,
                    FontId::proportional(font_size * transform.zoom),
                    *color,
                );
            }
        }
    }

    /// Translate clicks and drags on the canvas into commands.
    ///
    /// A click selects the topmost object under the pointer (or clears the
    /// selection on empty canvas). A drag that starts on a corner handle of
    /// the selection resizes it; any other drag moves the object it started
    /// on.
    pub fn interact(
        &mut self,
        response: &Response,
        transform: &CanvasTransform,
        state: &EditorState,
    ) -> Vec<Command> {
        let mut commands = Vec::new();
        if !state.is_interactive() {
            self.drag = Drag::None;
            return commands;
        }

        let ctx = &response.ctx;
        let outline = selection_outline(ctx, transform, state);
        let handle_under =
            |pos: Option<Pos2>| outline.zip(pos).and_then(|(rect, pos)| Corner::at(rect, pos));
        let hit = |pos: Option<Pos2>| {
            pos.and_then(|pos| state.scene().hit_test(transform.to_canvas(pos), ctx))
        };

        if let Some(corner) = handle_under(response.hover_pos()) {
            ctx.set_cursor_icon(corner.cursor_icon());
        }

        if response.clicked() {
            commands.push(Command::SelectObject(hit(response.interact_pointer_pos())));
        }

        if response.drag_started() {
            // The pointer has already moved past the drag threshold
            let origin = ctx
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if handle_under(origin).is_some() {
                self.drag = Drag::Resize;
            } else {
                let target = hit(origin);
                if target != state.selection() {
                    commands.push(Command::SelectObject(target));
                }
                self.drag = if target.is_some() { Drag::Move } else { Drag::None };
            }
        }

        if response.dragged() {
            match self.drag {
                Drag::Move => {
                    let delta = transform.to_canvas_delta(response.drag_delta());
                    if delta != Vec2::ZERO {
                        commands.push(Command::MoveSelected(delta));
                    }
                }
                Drag::Resize => {
                    if let Some(factor) = resize_factor(response, transform, state) {
                        commands.push(Command::ScaleSelected(factor));
                    }
                }
                Drag::None => {}
            }
        }

        if response.drag_stopped() {
            self.drag = Drag::None;
        }

        commands
    }
}

/// Screen rect of the selection outline, handles sit on its corners
fn selection_outline(ctx: &Context, transform: &CanvasTransform, state: &EditorState) -> Option<Rect> {
    let selected = state.selected()?;
    Some(
        transform
            .to_screen_rect(selected.bounds(ctx))
            .expand(SELECTION_PADDING),
    )
}

/// Ratio of the pointer's distance from the selection center after and
/// before this frame's drag
fn resize_factor(response: &Response, transform: &CanvasTransform, state: &EditorState) -> Option<f32> {
    let pos = response.interact_pointer_pos()?;
    let center = transform.to_screen(state.selected()?.center());
    let before = (pos - response.drag_delta() - center).length();
    let after = (pos - center).length();
    if before <= f32::EPSILON {
        return None;
    }
    let factor = after / before;
    (factor.is_finite() && factor != 1.0).then_some(factor)
}
