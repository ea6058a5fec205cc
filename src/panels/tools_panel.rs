use crate::SketchpadApp;
use crate::tools::Tool;
use egui::{Button, Color32, RichText, Stroke, vec2};

const SWATCH_SIZE: f32 = 22.0;

pub fn tools_panel(app: &mut SketchpadApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.controller().tool();
            for tool in Tool::ALL {
                let label = format!("{} {}", tool.icon(), tool.name());
                if ui.selectable_label(active_tool == tool, label).clicked() {
                    app.controller_mut().select_tool(tool);
                }
            }
            ui.separator();

            ui.heading("Color");
            let swatches = app.controller().palette().swatches().to_vec();
            ui.horizontal_wrapped(|ui| {
                for (index, color) in swatches.iter().enumerate() {
                    let active = app.controller().palette().is_active(index);
                    let outline = if active {
                        Stroke::new(3.0, ui.visuals().selection.stroke.color)
                    } else {
                        Stroke::new(1.0, Color32::GRAY)
                    };
                    let button = Button::new("")
                        .fill(color.color32())
                        .stroke(outline)
                        .min_size(vec2(SWATCH_SIZE, SWATCH_SIZE));
                    if ui.add(button).on_hover_text(color.to_hex()).clicked() {
                        app.controller_mut().select_swatch(index);
                    }
                }
            });
            ui.label(format!("Pen: {}", app.controller().pen_color()));
            ui.separator();

            ui.heading("Text");
            ui.text_edit_singleline(app.text_input_mut());
            if ui.button("Add text").clicked() {
                app.add_text();
            }
            ui.separator();

            ui.heading("Image");
            if let Some(name) = app.loading_image() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Loading {}", name));
                });
            } else if let Some(image) = app.controller().selected_image() {
                let size = image.bitmap.size();
                ui.label(format!("{}x{} at ({:.0}, {:.0})", size.x, size.y, image.position.x, image.position.y));
            } else {
                ui.label("Drop an image file onto the window.");
            }
            if let Some(err) = app.image_error() {
                ui.label(RichText::new(err).color(ui.visuals().error_fg_color));
            }
        });
}
