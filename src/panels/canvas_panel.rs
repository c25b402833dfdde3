use egui::{Color32, ColorImage, Key, Modifiers, TextureHandle, TextureOptions};

use crate::app::BoardApp;
use crate::canvas::CanvasAction;
use crate::input::InputHandler;
use crate::surface::{PixmapSurface, RasterSurface};

/// GPU copy of the board plus the pointer translator for its rect
pub struct CanvasView {
    texture: Option<TextureHandle>,
    /// Surface revision last uploaded
    uploaded: Option<u64>,
    input: InputHandler,
}

impl CanvasView {
    pub fn new() -> Self {
        Self {
            texture: None,
            uploaded: None,
            input: InputHandler::new(egui::Rect::NOTHING),
        }
    }

    /// Re-uploads the surface only when its pixels changed
    fn texture(&mut self, ctx: &egui::Context, surface: &PixmapSurface) -> &TextureHandle {
        let revision = surface.revision();
        let stale = self.uploaded != Some(revision);
        let [width, height] = surface.size();
        let image = || {
            ColorImage::from_rgba_premultiplied(
                [width as usize, height as usize],
                surface.pixels(),
            )
        };

        let texture = match &mut self.texture {
            Some(texture) => {
                if stale {
                    texture.set(image(), TextureOptions::NEAREST);
                }
                texture
            }
            slot => slot.insert(ctx.load_texture("board_canvas", image(), TextureOptions::NEAREST)),
        };
        self.uploaded = Some(revision);
        texture
    }
}

impl Default for CanvasView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn canvas_panel(app: &mut BoardApp, ui: &mut egui::Ui) {
    toolbar(app, ui);
    shortcuts(app, ui.ctx());
    ui.separator();

    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
    let rect = response.rect;

    // The board follows the panel; resizing keeps what is drawn
    let target = [rect.width().floor() as u32, rect.height().floor() as u32];
    if target[0] > 0 && target[1] > 0 && target != app.canvas.surface().size() {
        app.canvas.resize(target[0], target[1]);
    }

    // The confirmation window sits on top of the board and owns the pointer
    if !app.show_clear_confirm {
        app.canvas_view.input.set_canvas_rect(rect);
        for event in app.canvas_view.input.process_input(ui.ctx()) {
            app.canvas.handle_input(event);
        }
    }

    // Land deferred undo/redo restores before showing the board
    app.canvas.settle();

    let [width, height] = app.canvas.surface().size();
    let texture = app.canvas_view.texture(ui.ctx(), app.canvas.surface());
    let image_rect =
        egui::Rect::from_min_size(rect.min, egui::vec2(width as f32, height as f32));
    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        Color32::WHITE,
    );
}

fn toolbar(app: &mut BoardApp, ui: &mut egui::Ui) {
    let mut actions = Vec::new();
    let tools = *app.canvas.tools();

    ui.horizontal_wrapped(|ui| {
        for color in &app.config.palette {
            let selected = !tools.eraser_active() && tools.color() == *color;
            if color_swatch(ui, *color, selected).clicked() {
                actions.push(CanvasAction::SelectColor(*color));
            }
        }
        ui.separator();

        for width in &app.config.widths {
            if ui
                .selectable_label(tools.width() == *width, format!("{width}px"))
                .clicked()
            {
                actions.push(CanvasAction::SelectWidth(*width));
            }
        }
        ui.separator();

        if ui.selectable_label(tools.eraser_active(), "Eraser").clicked() {
            actions.push(CanvasAction::ToggleEraser);
        }
        ui.separator();

        if ui
            .add_enabled(app.canvas.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            actions.push(CanvasAction::Undo);
        }
        if ui
            .add_enabled(app.canvas.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            actions.push(CanvasAction::Redo);
        }
        if ui.button("Clear").clicked() {
            app.show_clear_confirm = true;
        }
        if ui.button("Download").clicked() {
            app.notice = Some(match app.canvas.download(app.saver.as_mut()) {
                Ok(name) => format!("Saved {name}"),
                Err(err) => {
                    log::error!("Download failed: {}", err);
                    format!("Download failed: {err}")
                }
            });
        }
    });

    for action in actions {
        app.canvas.apply(action);
    }
}

fn color_swatch(ui: &mut egui::Ui, color: Color32, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
    let stroke = if selected {
        ui.visuals().selection.stroke
    } else {
        ui.visuals().widgets.inactive.bg_stroke
    };
    ui.painter().rect_filled(rect, 4.0, color);
    ui.painter().rect_stroke(rect.expand(if selected { 2.0 } else { 0.0 }), 4.0, stroke);
    response
}

fn shortcuts(app: &mut BoardApp, ctx: &egui::Context) {
    let (redo, undo) = ctx.input_mut(|input| {
        let redo = input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
            || input.consume_key(Modifiers::COMMAND, Key::Y);
        let undo = input.consume_key(Modifiers::COMMAND, Key::Z);
        (redo, undo)
    });
    if redo {
        app.canvas.apply(CanvasAction::Redo);
    }
    if undo {
        app.canvas.apply(CanvasAction::Undo);
    }
}

pub fn clear_confirm_window(app: &mut BoardApp, ctx: &egui::Context) {
    egui::Window::new("Clear canvas")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label("Clear everything on the board?");
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.canvas.apply(CanvasAction::Clear);
                    app.show_clear_confirm = false;
                }
                if ui.button("Cancel").clicked() {
                    app.show_clear_confirm = false;
                }
            });
        });
}
