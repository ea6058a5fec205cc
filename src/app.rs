use crate::bitmap::ImageLoader;
use crate::config::AppConfig;
use crate::controller::DrawingController;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::surface::{Canvas, Surface};

pub struct SketchpadApp {
    controller: DrawingController<Canvas>,
    renderer: Renderer,
    input: InputHandler,
    files: FileHandler,
    loader: ImageLoader,
    text_input: String,
    image_error: Option<String>,
}

impl SketchpadApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let canvas = Canvas::new(config.canvas_size());
        let controller = DrawingController::new(canvas)
            .with_palette(config.palette())
            .with_line_width(config.line_width);

        Self {
            controller,
            renderer: Renderer::new(config.texture_cache_size),
            input: InputHandler::new(egui::Rect::NOTHING),
            files: FileHandler::new(),
            loader: ImageLoader::new(),
            text_input: String::new(),
            image_error: None,
        }
    }

    pub fn controller(&self) -> &DrawingController<Canvas> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DrawingController<Canvas> {
        &mut self.controller
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        self.controller.surface().size()
    }

    pub fn text_input_mut(&mut self) -> &mut String {
        &mut self.text_input
    }

    pub fn add_text(&mut self) {
        self.controller.add_text(&self.text_input);
    }

    pub fn loading_image(&self) -> Option<&str> {
        self.loader.pending_name()
    }

    pub fn image_error(&self) -> Option<&str> {
        self.image_error.as_deref()
    }

    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            self.controller.handle_event(event);
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.render(ctx, painter, rect, self.controller.surface());
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.files.preview_files_being_dropped(ctx);
        if !self.files.check_for_dropped_files(ctx) {
            return;
        }
        if let Some(upload) = self.files.take_image_upload() {
            self.image_error = None;
            self.loader.start(upload.name, upload.bytes);
        }
    }

    fn poll_image_load(&mut self, ctx: &egui::Context) {
        if !self.loader.is_loading() {
            return;
        }
        match self.loader.poll() {
            Some((name, result)) => {
                if let Err(err) = self.controller.image_loaded(result) {
                    log::error!("Could not load {}: {}", name, err);
                    self.image_error = Some(format!("Could not load {}: {}", name, err));
                }
            }
            // Keep polling until the decode finishes
            None => ctx.request_repaint(),
        }
    }
}

impl eframe::App for SketchpadApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.poll_image_load(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
