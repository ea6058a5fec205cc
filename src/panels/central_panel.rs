use crate::SketchpadApp;

pub fn central_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(app.canvas_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        app.handle_input(ctx, canvas_rect);
        app.render(ctx, &painter, canvas_rect);
    });
}
