use crate::app::BoardApp;

/// Open topic editor: the text being edited and an optional warning
#[derive(Debug, Clone)]
pub struct TopicEditor {
    pub text: String,
    pub warning: Option<String>,
}

pub fn roulette_panel(app: &mut BoardApp, ui: &mut egui::Ui, now: f64) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.2);

        let mut display = egui::RichText::new(app.roulette.display()).size(56.0).strong();
        if app.roulette.is_spinning() {
            display = display.weak();
        }
        ui.label(display);
        ui.add_space(24.0);

        ui.horizontal(|ui| {
            let spin = ui.add_enabled(
                !app.roulette.is_spinning(),
                egui::Button::new(egui::RichText::new("Spin").size(20.0)),
            );
            if spin.clicked() {
                app.roulette.start_spin(now);
            }
            if ui.button("Edit topics").clicked() {
                app.topic_editor = Some(TopicEditor {
                    text: app.roulette.edit_text(),
                    warning: None,
                });
            }
        });
        ui.label(format!("{} topics", app.roulette.topics().len()));
    });
}

pub fn topic_editor_window(app: &mut BoardApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    let Some(editor) = &mut app.topic_editor else {
        return;
    };
    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    egui::Window::new("Edit topics")
        .open(&mut open)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label("One topic per line");
            ui.add(
                egui::TextEdit::multiline(&mut editor.text)
                    .desired_rows(12)
                    .desired_width(f32::INFINITY),
            );
            if let Some(warning) = &editor.warning {
                ui.colored_label(ui.visuals().warn_fg_color, warning);
            }
            ui.horizontal(|ui| {
                save = ui.button("Save").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if save {
        match app.roulette.replace_topics(&editor.text) {
            Ok(count) => {
                app.topics_dirty = true;
                app.notice = Some(format!("Saved {count} topics"));
                app.topic_editor = None;
                app.persist_topics(frame);
            }
            Err(err) => editor.warning = Some(err.to_string()),
        }
    } else if cancel || !open {
        app.topic_editor = None;
    }
}
