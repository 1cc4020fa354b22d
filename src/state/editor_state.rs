//! The scene-edit state machine.
//!
//! `EditorState` owns everything one editing session needs: the [`Scene`],
//! the lifecycle of the background image, the tool mode and the values of the
//! text and shape tool forms.
//!
//! # Load lifecycle
//!
//! ```text
//!                 background decoded
//!   ┌──────────┐ ───────────────────► ┌─────────┐
//!   │ Loading  │                      │  Ready  │  (only interactive state)
//!   └──────────┘ ───────────────────► └─────────┘
//!        ▲        fetch/decode failed ┌─────────┐
//!        │                         └─►│ Failed  │  (terminal for this scene)
//!   initialize(url)                   └─────────┘
//! ```
//!
//! Every `initialize` hands out a new [`LoadTicket`]. A load result is only
//! applied when it carries the ticket of the most recent `initialize`, so a
//! slow response for a previous image can never overwrite the current one.
//!
//! # Commands
//!
//! Edit commands return a [`CommandResult`]. An `Err` means the command was
//! skipped and nothing changed; it is never a reason to abort.
use egui::{Color32, Vec2};
use log::{debug, info, warn};

use super::{BackgroundImage, LoadState, LoadTicket};
use crate::command::{CommandError, CommandResult};
use crate::element::{
    DEFAULT_FONT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_SHAPE_COLOR, ObjectId, ObjectKind, SceneObject,
    ShapeKind, canvas_center, clamp_font_size, factory,
};
use crate::error::ImageLoadFailure;
use crate::export::ExportRequest;
use crate::scene::{Reorder, Scene};

/// Which tool panel is contextually relevant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMode {
    Text,
    Shape,
}

/// What the text tool's button does right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    Add,
    Update,
}

impl TextAction {
    pub fn label(self) -> &'static str {
        match self {
            TextAction::Add => "Add Text",
            TextAction::Update => "Update Text",
        }
    }
}

/// Values shown in the text tool form
#[derive(Debug, Clone, PartialEq)]
pub struct TextTool {
    pub content: String,
    pub font_size: f32,
    pub font_color: Color32,
}

impl Default for TextTool {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: DEFAULT_FONT_COLOR,
        }
    }
}

#[derive(Debug)]
pub struct EditorState {
    scene: Scene,
    load_state: LoadState,
    generation: u64,
    source_url: Option<String>,
    background: Option<BackgroundImage>,
    tool_mode: Option<ToolMode>,
    pub text_tool: TextTool,
    pub shape_color: Color32,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A new editor waiting for its first background image
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            load_state: LoadState::Loading,
            generation: 0,
            source_url: None,
            background: None,
            tool_mode: None,
            text_tool: TextTool::default(),
            shape_color: DEFAULT_SHAPE_COLOR,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Decoded pixels of the background photo, once loaded
    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn tool_mode(&self) -> Option<ToolMode> {
        self.tool_mode
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.scene.selection()
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.scene.selected()
    }

    pub fn is_interactive(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn can_export(&self) -> bool {
        self.is_interactive()
    }

    pub fn text_action(&self) -> TextAction {
        match self.selected() {
            Some(obj) if obj.is_text() => TextAction::Update,
            _ => TextAction::Add,
        }
    }

    fn ensure_interactive(&self) -> CommandResult {
        if self.is_interactive() {
            Ok(())
        } else {
            Err(CommandError::NotInteractive(self.load_state))
        }
    }

    /// Start a new scene on top of the image at `url`.
    ///
    /// The caller is responsible for fetching the image and passing the
    /// outcome back to [`EditorState::on_background_loaded`] with the
    /// returned ticket.
    pub fn initialize(&mut self, url: &str) -> Result<LoadTicket, CommandError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CommandError::InvalidArgument(
                "background url must not be empty".to_owned(),
            ));
        }

        self.generation += 1;
        self.load_state = LoadState::Loading;
        self.scene.clear();
        self.background = None;
        self.tool_mode = None;
        self.source_url = Some(url.to_owned());

        info!("Loading background #{} from {}", self.generation, url);
        Ok(LoadTicket(self.generation))
    }

    /// Apply the outcome of a background load.
    ///
    /// Returns `false` when the ticket is stale and the outcome was ignored.
    pub fn on_background_loaded(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<BackgroundImage, ImageLoadFailure>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "Ignoring stale background result #{} (current #{})",
                ticket.0, self.generation
            );
            return false;
        }

        match outcome {
            Ok(image) => {
                let background = factory::background(image.size(), canvas_center());
                self.scene.clear();
                let id = self.scene.push(background);
                self.scene.select(Some(id));
                info!(
                    "Background #{} ready ({}x{})",
                    ticket.0, image.pixels.size[0], image.pixels.size[1]
                );
                self.background = Some(image);
                self.tool_mode = None;
                self.load_state = LoadState::Ready;
            }
            Err(failure) => {
                warn!("Background #{} failed: {}", ticket.0, failure);
                self.scene.clear();
                self.background = None;
                self.tool_mode = None;
                self.load_state = LoadState::Failed;
            }
        }
        true
    }

    /// Add a caption at the canvas center and select it
    pub fn add_text(
        &mut self,
        content: &str,
        font_size: f32,
        font_color: Color32,
    ) -> Result<ObjectId, CommandError> {
        self.ensure_interactive()?;

        let text = factory::text(content, font_size, font_color, canvas_center());
        let id = self.scene.push(text);
        self.scene.select(Some(id));
        self.tool_mode = Some(ToolMode::Text);
        Ok(id)
    }

    /// Restyle the selected caption in place
    pub fn update_text(&mut self, font_size: f32, font_color: Color32, content: &str) -> CommandResult {
        self.ensure_interactive()?;

        let selected = self.scene.selected_mut().ok_or(CommandError::NoSelection)?;
        match selected.kind_mut() {
            ObjectKind::Text {
                content: current,
                font_size: size,
                color,
            } => {
                content.clone_into(current);
                *size = clamp_font_size(font_size);
                *color = font_color;
                Ok(())
            }
            _ => Err(CommandError::NotText),
        }
    }

    /// Add a shape at the canvas center and select it
    pub fn add_shape(&mut self, kind: ShapeKind, fill: Color32) -> Result<ObjectId, CommandError> {
        self.ensure_interactive()?;

        let shape = factory::shape(kind, fill, canvas_center());
        let id = self.scene.push(shape);
        self.scene.select(Some(id));
        self.tool_mode = Some(ToolMode::Shape);
        Ok(id)
    }

    /// Like [`EditorState::add_shape`], for a shape given by name
    pub fn add_shape_named(&mut self, kind: &str, fill: Color32) -> Result<ObjectId, CommandError> {
        let kind: ShapeKind = kind.parse().map_err(|err| {
            warn!("Rejected add_shape: {err}");
            CommandError::from(err)
        })?;
        self.add_shape(kind, fill)
    }

    /// Move the selection one step toward the front or back.
    ///
    /// At the top (or bottom) this succeeds without changing anything.
    pub fn reorder_selected(&mut self, direction: Reorder) -> CommandResult {
        self.ensure_interactive()?;

        let id = self.scene.selection().ok_or(CommandError::NoSelection)?;
        if !self.scene.reorder(id, direction) {
            debug!("{id} already at the {direction:?} boundary");
        }
        Ok(())
    }

    pub fn bring_forward(&mut self) -> CommandResult {
        self.reorder_selected(Reorder::Forward)
    }

    pub fn send_backward(&mut self) -> CommandResult {
        self.reorder_selected(Reorder::Backward)
    }

    pub fn delete_selected(&mut self) -> CommandResult {
        self.ensure_interactive()?;

        let id = self.scene.selection().ok_or(CommandError::NoSelection)?;
        self.scene.remove(id);
        self.scene.select(None);
        self.tool_mode = None;
        Ok(())
    }

    /// Sync with a selection made directly on the canvas.
    ///
    /// Selecting a caption loads its live values into the text tool so that
    /// editing resumes from the object rather than from stale form values.
    pub fn on_external_selection_changed(&mut self, id: Option<ObjectId>) -> CommandResult {
        self.ensure_interactive()?;

        self.scene.select(id);
        match self.scene.selected().map(SceneObject::kind) {
            Some(ObjectKind::Text {
                content,
                font_size,
                color,
            }) => {
                self.text_tool = TextTool {
                    content: content.clone(),
                    font_size: *font_size,
                    font_color: *color,
                };
                self.tool_mode = Some(ToolMode::Text);
            }
            _ => self.tool_mode = None,
        }
        Ok(())
    }

    /// Drag the selected object by `delta` canvas units
    pub fn translate_selected(&mut self, delta: Vec2) -> CommandResult {
        self.ensure_interactive()?;

        let selected = self.scene.selected_mut().ok_or(CommandError::NoSelection)?;
        selected.translate(delta);
        Ok(())
    }

    /// Resize the selected object by `factor` around its center.
    ///
    /// Resizing a caption also moves the text tool's size along, so a later
    /// "Update Text" keeps the new size.
    pub fn scale_selected(&mut self, factor: f32) -> CommandResult {
        self.ensure_interactive()?;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CommandError::InvalidArgument(format!(
                "scale factor must be positive, got {factor}"
            )));
        }

        let selected = self.scene.selected_mut().ok_or(CommandError::NoSelection)?;
        selected.scale_by(factor);
        if let ObjectKind::Text { font_size, .. } = selected.kind() {
            self.text_tool.font_size = *font_size;
        }
        Ok(())
    }

    /// Ask for an export of the current canvas.
    ///
    /// The scene is left untouched; the returned request names the file the
    /// captured frame should be written to.
    pub fn request_export(&self) -> Result<ExportRequest, CommandError> {
        if !self.can_export() {
            return Err(CommandError::ExportUnavailable);
        }
        Ok(ExportRequest::new())
    }
}
