use std::fmt;
use std::str::FromStr;

use egui::{Color32, Pos2, Rect, Vec2};
use uuid::Uuid;

mod common;

pub use common::{
    BACKGROUND_SCALE, CANVAS_BACKGROUND, CANVAS_SIZE, DEFAULT_CIRCLE_RADIUS, DEFAULT_FONT_COLOR,
    DEFAULT_FONT_SIZE, DEFAULT_SHAPE_COLOR, DEFAULT_SHAPE_SIZE, DEFAULT_TEXT, MAX_FONT_SIZE,
    MIN_FONT_SIZE, MIN_OBJECT_EXTENT, TextMeasure, canvas_center, clamp_font_size, triangle_points,
};
use crate::error::UnknownShape;

/// Stable identifier of an object within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shapes offered by the shape tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Triangle];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "◻",
            ShapeKind::Circle => "○",
            ShapeKind::Triangle => "△",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            _ => Err(UnknownShape(s.to_owned())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific geometry and style of a scene object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Text {
        content: String,
        font_size: f32,
        color: Color32,
    },
    Rectangle {
        size: Vec2,
        fill: Color32,
    },
    Circle {
        radius: f32,
        fill: Color32,
    },
    Triangle {
        size: Vec2,
        fill: Color32,
    },
    /// The background photo. `size` is the decoded pixel size.
    Image {
        size: Vec2,
        scale: f32,
    },
}

/// One editable primitive on the canvas.
///
/// Objects carry no z-order of their own: paint order is their position in
/// the owning [`crate::scene::Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    id: ObjectId,
    center: Pos2,
    kind: ObjectKind,
}

impl SceneObject {
    pub fn new(kind: ObjectKind, center: Pos2) -> Self {
        Self {
            id: ObjectId::new(),
            center,
            kind,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ObjectKind {
        &mut self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ObjectKind::Text { .. } => "text",
            ObjectKind::Rectangle { .. } => "rectangle",
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Triangle { .. } => "triangle",
            ObjectKind::Image { .. } => "image",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text { .. })
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Uniformly resize around the center.
    ///
    /// Captions scale through their font size and stay within the font size
    /// range; shapes never shrink below [`MIN_OBJECT_EXTENT`].
    pub fn scale_by(&mut self, factor: f32) {
        match &mut self.kind {
            ObjectKind::Text { font_size, .. } => *font_size = clamp_font_size(*font_size * factor),
            ObjectKind::Rectangle { size, .. } | ObjectKind::Triangle { size, .. } => {
                *size = (*size * factor).max(Vec2::splat(MIN_OBJECT_EXTENT));
            }
            ObjectKind::Circle { radius, .. } => {
                *radius = (*radius * factor).max(MIN_OBJECT_EXTENT / 2.0);
            }
            ObjectKind::Image { size, scale } => {
                let min_scale = MIN_OBJECT_EXTENT / size.min_elem().max(1.0);
                *scale = (*scale * factor).max(min_scale);
            }
        }
    }

    /// Axis-aligned bounds in canvas coordinates
    pub fn bounds(&self, text: &dyn TextMeasure) -> Rect {
        match &self.kind {
            ObjectKind::Text {
                content, font_size, ..
            } => common::text_bounds(self.center, text.text_size(content, *font_size)),
            ObjectKind::Rectangle { size, .. } | ObjectKind::Triangle { size, .. } => {
                Rect::from_center_size(self.center, *size)
            }
            ObjectKind::Circle { radius, .. } => {
                Rect::from_center_size(self.center, Vec2::splat(radius * 2.0))
            }
            ObjectKind::Image { size, scale } => Rect::from_center_size(self.center, *size * *scale),
        }
    }

    pub fn hit_test(&self, pos: Pos2, text: &dyn TextMeasure) -> bool {
        match &self.kind {
            ObjectKind::Circle { radius, .. } => self.center.distance(pos) <= *radius,
            ObjectKind::Triangle { .. } => {
                common::point_in_triangle(pos, triangle_points(self.bounds(text)))
            }
            _ => self.bounds(text).contains(pos),
        }
    }
}

/// Constructors for the objects the editor creates
pub mod factory {
    use super::*;

    /// A text object; empty content falls back to the placeholder text
    pub fn text(content: &str, font_size: f32, color: Color32, center: Pos2) -> SceneObject {
        let content = if content.is_empty() {
            DEFAULT_TEXT.to_owned()
        } else {
            content.to_owned()
        };
        SceneObject::new(
            ObjectKind::Text {
                content,
                font_size: clamp_font_size(font_size),
                color,
            },
            center,
        )
    }

    /// A shape with its default dimensions
    pub fn shape(kind: ShapeKind, fill: Color32, center: Pos2) -> SceneObject {
        let kind = match kind {
            ShapeKind::Rectangle => ObjectKind::Rectangle {
                size: DEFAULT_SHAPE_SIZE,
                fill,
            },
            ShapeKind::Circle => ObjectKind::Circle {
                radius: DEFAULT_CIRCLE_RADIUS,
                fill,
            },
            ShapeKind::Triangle => ObjectKind::Triangle {
                size: DEFAULT_SHAPE_SIZE,
                fill,
            },
        };
        SceneObject::new(kind, center)
    }

    /// The background photo at the default scale
    pub fn background(size: Vec2, center: Pos2) -> SceneObject {
        SceneObject::new(
            ObjectKind::Image {
                size,
                scale: BACKGROUND_SCALE,
            },
            center,
        )
    }
}
