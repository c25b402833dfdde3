mod canvas_panel;
mod roulette_panel;
mod timer_panel;

pub use canvas_panel::{CanvasView, canvas_panel, clear_confirm_window};
pub use roulette_panel::{TopicEditor, roulette_panel, topic_editor_window};
pub use timer_panel::timer_panel;

use crate::app::{BoardApp, Screen};

/// Screen tabs plus a strip that can be swiped left or right
pub fn top_bar(app: &mut BoardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("screen_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let current = app.screen();
            for (index, screen) in Screen::ALL.iter().enumerate() {
                if ui.selectable_label(current == *screen, screen.label()).clicked() {
                    log::debug!("Screen selected from UI: {}", screen.label());
                    app.carousel.set_index(index);
                }
            }
        });

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 22.0),
            egui::Sense::drag(),
        );
        if let Some(pos) = response.interact_pointer_pos() {
            if response.drag_started() {
                app.carousel.press(pos.x);
            } else if response.dragged() {
                app.carousel.drag(pos.x);
            }
        }
        if response.drag_stopped() && app.carousel.release() {
            log::debug!("Swiped to {}", app.screen().label());
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, ui.visuals().faint_bg_color);
        painter.text(
            rect.center() + egui::vec2(app.carousel.offset(), 0.0),
            egui::Align2::CENTER_CENTER,
            format!(
                "< swipe >   {} / {}",
                app.carousel.index() + 1,
                app.carousel.count()
            ),
            egui::FontId::proportional(13.0),
            ui.visuals().weak_text_color(),
        );
    });
}

pub fn status_bar(app: &mut BoardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let history = app.canvas.history();
            ui.label(format!(
                "History: {}/{}",
                history.position() + 1,
                history.len()
            ));
            ui.separator();
            if let Some(notice) = &app.notice {
                ui.label(notice);
            }
        });
    });
}
