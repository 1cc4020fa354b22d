use egui::{Color32, Vec2};

use super::CommandResult;
use crate::element::{ObjectId, ShapeKind};
use crate::scene::Reorder;
use crate::state::EditorState;

/// Edits the panels and canvas can ask the editor to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a new caption at the canvas center
    AddText {
        content: String,
        font_size: f32,
        font_color: Color32,
    },

    /// Restyle the selected caption in place
    UpdateText {
        content: String,
        font_size: f32,
        font_color: Color32,
    },

    /// Add a new shape at the canvas center
    AddShape { kind: ShapeKind, fill: Color32 },

    BringForward,
    SendBackward,
    DeleteSelected,

    /// Selection made directly on the canvas
    SelectObject(Option<ObjectId>),

    /// Drag of the selected object, in canvas units
    MoveSelected(Vec2),

    /// Corner-handle resize of the selected object by a uniform factor
    ScaleSelected(f32),
}

impl Command {
    /// Execute the command against the editor
    pub fn execute(&self, state: &mut EditorState) -> CommandResult {
        match self {
            Command::AddText {
                content,
                font_size,
                font_color,
            } => state.add_text(content, *font_size, *font_color).map(|_| ()),

            Command::UpdateText {
                content,
                font_size,
                font_color,
            } => state.update_text(*font_size, *font_color, content),

            Command::AddShape { kind, fill } => state.add_shape(*kind, *fill).map(|_| ()),

            Command::BringForward => state.reorder_selected(Reorder::Forward),

            Command::SendBackward => state.reorder_selected(Reorder::Backward),

            Command::DeleteSelected => state.delete_selected(),

            Command::SelectObject(id) => state.on_external_selection_changed(*id),

            Command::MoveSelected(delta) => state.translate_selected(*delta),

            Command::ScaleSelected(factor) => state.scale_selected(*factor),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddText { .. } => "add_text",
            Command::UpdateText { .. } => "update_text",
            Command::AddShape { .. } => "add_shape",
            Command::BringForward => "bring_forward",
            Command::SendBackward => "send_backward",
            Command::DeleteSelected => "delete_selected",
            Command::SelectObject(_) => "select_object",
            Command::MoveSelected(_) => "move_selected",
            Command::ScaleSelected(_) => "scale_selected",
        }
    }
}
