use egui::Color32;

use crate::app::BoardApp;
use crate::timer::Urgency;

/// Text, fill and border colours for each urgency band
fn display_colors(urgency: Urgency) -> (Color32, Color32, Color32) {
    let pale_blue = Color32::from_rgb(0xE3, 0xF2, 0xFD);
    match urgency {
        Urgency::Normal => (
            Color32::from_rgb(0x19, 0x76, 0xD2),
            pale_blue,
            Color32::from_rgb(0x21, 0x96, 0xF3),
        ),
        Urgency::Warning => (
            Color32::from_rgb(0xFF, 0x6F, 0x00),
            pale_blue,
            Color32::from_rgb(0xFF, 0x6F, 0x00),
        ),
        Urgency::Expired => {
            let red = Color32::from_rgb(0xD3, 0x2F, 0x2F);
            (Color32::WHITE, red, red)
        }
    }
}

pub fn timer_panel(app: &mut BoardApp, ui: &mut egui::Ui, now: f64) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.2);

        let (mut text, mut fill, mut border) = display_colors(app.timer.urgency());
        if app.timer.is_dimmed() {
            text = text.gamma_multiply(0.3);
            fill = fill.gamma_multiply(0.3);
            border = border.gamma_multiply(0.3);
        }
        egui::Frame::none()
            .fill(fill)
            .stroke(egui::Stroke::new(3.0, border))
            .rounding(12.0)
            .inner_margin(egui::Margin::symmetric(32.0, 16.0))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(app.timer.display_text())
                        .monospace()
                        .size(72.0)
                        .color(text),
                );
            });
        ui.add_space(24.0);

        ui.horizontal(|ui| {
            let can_start = !app.timer.is_running() && app.timer.remaining_ms() > 0;
            if ui.add_enabled(can_start, egui::Button::new("Start")).clicked() {
                app.timer.start(now);
            }
            if ui.button("Stop").clicked() {
                app.timer.stop(now);
            }
        });
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            for seconds in &app.config.timer.presets {
                let selected = app.timer.last_preset() == *seconds;
                if ui
                    .selectable_label(selected, format!("{seconds}s"))
                    .clicked()
                {
                    app.timer.set_time(*seconds, &mut app.alerts);
                    app.notice = None;
                }
            }
        });
    });
}
