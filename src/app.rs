use egui::{Color32, Rect};
use log::{debug, error, info, warn};

use crate::command::Command;
use crate::config::AppConfig;
use crate::element::{DEFAULT_FONT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_SHAPE_COLOR, clamp_font_size};
use crate::export::{ExportService, PendingExport};
use crate::loader::{BackgroundLoader, PendingLoad};
use crate::panels::{self, HeaderAction, SearchAction};
use crate::renderer::Renderer;
use crate::search::{ImageSearchClient, PendingSearch, SearchRequest, SearchState};
use crate::state::EditorState;

/// Which view is on screen. The editor view carries the one value handed
/// over from search: the URL of the chosen image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Search,
    Editor { image_url: String },
}

/// UI preferences restored between runs. Scene contents are never saved.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub last_query: String,
    pub font_size: f32,
    pub font_color: String,
    pub shape_color: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_query: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: DEFAULT_FONT_COLOR.to_hex(),
            shape_color: DEFAULT_SHAPE_COLOR.to_hex(),
        }
    }
}

impl Preferences {
    fn color_or(hex: &str, fallback: Color32) -> Color32 {
        Color32::from_hex(hex).unwrap_or(fallback)
    }

    /// Copy the stored tool settings into a fresh editor
    pub fn apply(&self, editor: &mut EditorState) {
        editor.text_tool.font_size = clamp_font_size(self.font_size);
        editor.text_tool.font_color = Self::color_or(&self.font_color, DEFAULT_FONT_COLOR);
        editor.shape_color = Self::color_or(&self.shape_color, DEFAULT_SHAPE_COLOR);
    }

    pub fn capture(search: &SearchState, editor: &EditorState) -> Self {
        Self {
            last_query: search.query.clone(),
            font_size: editor.text_tool.font_size,
            font_color: editor.text_tool.font_color.to_hex(),
            shape_color: editor.shape_color.to_hex(),
        }
    }
}

pub struct CaptionApp {
    route: Route,
    search: SearchState,
    search_client: ImageSearchClient,
    pending_searches: Vec<PendingSearch>,
    editor: EditorState,
    loader: BackgroundLoader,
    pending_loads: Vec<PendingLoad>,
    renderer: Renderer,
    exporter: ExportService,
    pending_export: Option<PendingExport>,
    canvas_rect: Option<Rect>,
    ctx: egui::Context,
}

impl CaptionApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let preferences: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut editor = EditorState::new();
        preferences.apply(&mut editor);

        info!("Starting with {config:?}");
        Self {
            route: Route::Search,
            search: SearchState::new(preferences.last_query),
            search_client: ImageSearchClient::new(&config),
            pending_searches: Vec::new(),
            editor,
            loader: BackgroundLoader::new(&cc.egui_ctx),
            pending_loads: Vec::new(),
            renderer: Renderer::new(),
            exporter: ExportService::new(config.export_dir),
            pending_export: None,
            canvas_rect: None,
            ctx: cc.egui_ctx.clone(),
        }
    }

    fn start_search(&mut self, request: SearchRequest) {
        info!("Searching for {:?} (#{})", request.query, request.generation);
        let ctx = self.ctx.clone();
        let pending = self
            .search_client
            .spawn(request, move || ctx.request_repaint());
        self.pending_searches.push(pending);
    }

    fn open_editor(&mut self, image_url: String) {
        match self.editor.initialize(&image_url) {
            Ok(ticket) => {
                self.pending_loads.push(self.loader.spawn(&image_url, ticket));
                self.pending_export = None;
                self.route = Route::Editor { image_url };
            }
            Err(err) => warn!("Cannot open editor: {err}"),
        }
    }

    fn back_to_search(&mut self) {
        self.pending_export = None;
        self.route = Route::Search;
    }

    /// Collect finished background work. Stale results are dropped by the
    /// state objects themselves.
    fn poll_tasks(&mut self) {
        let mut searches = Vec::new();
        self.pending_searches.retain_mut(|pending| match pending.poll() {
            Some(result) => {
                searches.push((pending.generation(), result));
                false
            }
            None => true,
        });
        for (generation, result) in searches {
            self.search.resolve(generation, result);
        }

        let mut loads = Vec::new();
        self.pending_loads.retain_mut(|pending| match pending.poll() {
            Some(outcome) => {
                loads.push(outcome);
                false
            }
            None => true,
        });
        for outcome in loads {
            self.editor.on_background_loaded(outcome.ticket, outcome.result);
        }
    }

    fn execute(&mut self, command: Command) {
        if let Err(err) = command.execute(&mut self.editor) {
            debug!("Skipped {}: {err}", command.name());
        }
    }

    fn begin_export(&mut self, ctx: &egui::Context) {
        match self.editor.request_export() {
            Ok(request) => {
                info!("Capturing canvas for {}", request.file_name);
                self.pending_export = Some(PendingExport::new(request));
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
            }
            Err(err) => warn!("Export rejected: {err}"),
        }
    }

    /// Write the captured frame once the screenshot arrives
    fn finish_export(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending_export.as_mut() else {
            return;
        };
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            if pending.tick() {
                ctx.request_repaint();
            } else {
                error!("Download failed: no capture for {}", pending.request().file_name);
                self.pending_export = None;
            }
            return;
        };
        let Some(request) = self.pending_export.take().map(PendingExport::into_request) else {
            return;
        };

        let frame = match self.canvas_rect {
            Some(rect) => screenshot.region(&rect, Some(ctx.pixels_per_point())),
            None => (*screenshot).clone(),
        };
        if let Err(err) = self.exporter.write(&request, &frame) {
            error!("Download failed: {err}");
        }
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        match panels::editor_header(ctx, &self.editor, self.pending_export.is_some()) {
            Some(HeaderAction::Back) => {
                self.back_to_search();
                return;
            }
            Some(HeaderAction::Export) => self.begin_export(ctx),
            None => {}
        }

        if let Some(command) = panels::tools_panel(ctx, &mut self.editor) {
            self.execute(command);
        }

        let output = panels::central_panel(
            ctx,
            &mut self.renderer,
            &self.editor,
            self.pending_export.is_none(),
        );
        self.canvas_rect = output.canvas_rect;
        for command in output.commands {
            self.execute(command);
        }
        if output.choose_another {
            self.back_to_search();
        }
    }
}

impl eframe::App for CaptionApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(
            storage,
            eframe::APP_KEY,
            &Preferences::capture(&self.search, &self.editor),
        );
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();
        self.finish_export(ctx);

        if self.route != Route::Search {
            self.show_editor(ctx);
            return;
        }

        match panels::search_panel(ctx, &mut self.search) {
            Some(SearchAction::Submit(request)) => self.start_search(request),
            Some(SearchAction::OpenEditor(url)) => self.open_editor(url),
            None => {}
        }
    }
}
