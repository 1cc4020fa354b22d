use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Color32, DragValue, RichText, Ui};

use crate::command::Command;
use crate::components::ToolButton;
use crate::element::{MAX_FONT_SIZE, MIN_FONT_SIZE, ShapeKind};
use crate::state::{EditorState, TextAction, ToolMode};

const TEXT_ACCENT: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
const SHAPE_ACCENT: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);

/// Left side panel with the text tool, the shape tool and the object actions.
///
/// Form edits are written straight into the editor's tool state; anything
/// that changes the scene comes back as a command.
pub fn tools_panel(ctx: &egui::Context, state: &mut EditorState) -> Option<Command> {
    let mut command = None;

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .exact_width(300.0)
        .show(ctx, |ui| {
            ui.add_enabled_ui(state.is_interactive(), |ui| {
                ui.add_space(8.0);
                let text = text_section(ui, state);
                let shape = shape_section(ui, state);
                let actions = object_actions(ui, state);
                command = text.or(shape).or(actions);
            });
        });

    command
}

fn section_heading(ui: &mut Ui, icon: &str, title: &str, accent: Color32, active: bool) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).color(accent));
        let title = RichText::new(title).strong();
        ui.label(if active { title.color(accent) } else { title });
    });
}

fn color_row(ui: &mut Ui, color: &mut Color32) {
    ui.horizontal(|ui| {
        ui.label("Color");
        color_edit_button_srgba(ui, color, Alpha::Opaque);
        ui.small(color.to_hex());
    });
}

fn text_section(ui: &mut Ui, state: &mut EditorState) -> Option<Command> {
    let mut command = None;
    let action = state.text_action();
    let active = state.tool_mode() == Some(ToolMode::Text);

    ui.group(|ui| {
        section_heading(ui, "✏", "Text", TEXT_ACCENT, active);

        ui.label("Content");
        ui.add(
            egui::TextEdit::singleline(&mut state.text_tool.content)
                .hint_text("Enter text")
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            ui.label("Size");
            ui.add(
                DragValue::new(&mut state.text_tool.font_size)
                    .range(MIN_FONT_SIZE..=MAX_FONT_SIZE)
                    .speed(1.0),
            );
        });
        color_row(ui, &mut state.text_tool.font_color);

        let tool = &state.text_tool;
        if ui
            .add_sized([ui.available_width(), 28.0], egui::Button::new(action.label()))
            .clicked()
        {
            command = Some(match action {
                TextAction::Add => Command::AddText {
                    content: tool.content.clone(),
                    font_size: tool.font_size,
                    font_color: tool.font_color,
                },
                TextAction::Update => Command::UpdateText {
                    content: tool.content.clone(),
                    font_size: tool.font_size,
                    font_color: tool.font_color,
                },
            });
        }
    });

    command
}

fn shape_section(ui: &mut Ui, state: &mut EditorState) -> Option<Command> {
    let mut command = None;
    let active = state.tool_mode() == Some(ToolMode::Shape);

    ui.group(|ui| {
        section_heading(ui, "⬛", "Shapes", SHAPE_ACCENT, active);

        ui.horizontal(|ui| {
            for kind in ShapeKind::ALL {
                if ToolButton::new(kind.icon(), kind.label()).show(ui).clicked() {
                    command = Some(Command::AddShape {
                        kind,
                        fill: state.shape_color,
                    });
                }
            }
        });
        color_row(ui, &mut state.shape_color);
    });

    command
}

fn object_actions(ui: &mut Ui, state: &EditorState) -> Option<Command> {
    state.selection()?;

    let mut command = None;
    ui.group(|ui| {
        ui.label(RichText::new("Object Actions").strong());
        ui.horizontal(|ui| {
            if ToolButton::new("⬆", "Forward")
                .show(ui)
                .on_hover_text("Bring forward")
                .clicked()
            {
                command = Some(Command::BringForward);
            }
            if ToolButton::new("⬇", "Backward")
                .show(ui)
                .on_hover_text("Send backward")
                .clicked()
            {
                command = Some(Command::SendBackward);
            }
            if ToolButton::new("🗑", "Delete")
                .danger()
                .show(ui)
                .on_hover_text("Delete")
                .clicked()
            {
                command = Some(Command::DeleteSelected);
            }
        });
    });

    command
}
