use serde::{Deserialize, Serialize};

use crate::alerts::PageAlerts;
use crate::canvas::CanvasController;
use crate::config::BoardConfig;
use crate::error::BoardResult;
use crate::file_saver::FileSaver;
use crate::panels::{self, CanvasView, TopicEditor};
use crate::roulette::{Roulette, UuidPicker};
use crate::screens::ScreenCarousel;
use crate::surface::PixmapSurface;
use crate::timer::Countdown;
use crate::tool::ToolState;

/// Storage key for tool, timer and screen preferences
const PREFERENCES_KEY: &str = "board_preferences";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Canvas,
    Roulette,
    Timer,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Canvas, Screen::Roulette, Screen::Timer];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Canvas => "Canvas",
            Screen::Roulette => "Roulette",
            Screen::Timer => "Timer",
        }
    }
}

/// We derive Deserialize/Serialize so we can persist preferences on shutdown.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct Preferences {
    tools: Option<ToolState>,
    timer_preset: Option<u32>,
    screen: usize,
}

pub struct BoardApp {
    pub(crate) config: BoardConfig,
    pub(crate) carousel: ScreenCarousel,
    pub(crate) canvas: CanvasController<PixmapSurface>,
    pub(crate) canvas_view: CanvasView,
    /// Clear confirmation window is open
    pub(crate) show_clear_confirm: bool,
    pub(crate) saver: Box<dyn FileSaver>,
    pub(crate) roulette: Roulette,
    pub(crate) picker: UuidPicker,
    pub(crate) topic_editor: Option<TopicEditor>,
    /// Topics changed since the last write to storage
    pub(crate) topics_dirty: bool,
    pub(crate) timer: Countdown,
    pub(crate) alerts: PageAlerts,
    /// One-line status shown in the bottom bar
    pub(crate) notice: Option<String>,
}

impl BoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig) -> BoardResult<Self> {
        config.validate()?;

        let prefs: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, PREFERENCES_KEY))
            .unwrap_or_default();

        let tools = prefs
            .tools
            .map(|tools| ToolState::new(tools.color(), tools.width()))
            .unwrap_or_else(|| ToolState::new(config.default_color, config.default_width));

        let surface = PixmapSurface::new(config.canvas_width, config.canvas_height)?
            .with_jpeg_quality(config.jpeg_quality);
        let canvas = CanvasController::with_capacity(surface, tools, config.history_capacity)?;

        let mut carousel = ScreenCarousel::new(Screen::ALL.len());
        carousel.set_index(prefs.screen);

        let mut alerts = PageAlerts::new(cc.egui_ctx.clone());
        let mut timer = Countdown::new(&config.timer);
        if let Some(preset) = prefs.timer_preset.filter(|p| *p > 0) {
            timer.set_time(preset, &mut alerts);
        }

        let roulette = Roulette::load(cc.storage, &config.roulette);

        log::info!(
            "Board ready: {}x{} canvas, {} topics",
            config.canvas_width,
            config.canvas_height,
            roulette.topics().len()
        );

        Ok(Self {
            carousel,
            canvas,
            canvas_view: CanvasView::new(),
            show_clear_confirm: false,
            saver: default_saver(&config),
            roulette,
            picker: UuidPicker,
            topic_editor: None,
            topics_dirty: false,
            timer,
            alerts,
            notice: None,
            config,
        })
    }

    pub fn screen(&self) -> Screen {
        Screen::ALL[self.carousel.index()]
    }

    /// Writes topics right away when storage is available
    pub(crate) fn persist_topics(&mut self, frame: &mut eframe::Frame) {
        if let Some(storage) = frame.storage_mut() {
            self.roulette.save(storage);
            self.topics_dirty = false;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_saver(config: &BoardConfig) -> Box<dyn FileSaver> {
    Box::new(crate::file_saver::DirectorySaver::new(&config.download_dir))
}

#[cfg(target_arch = "wasm32")]
fn default_saver(_config: &BoardConfig) -> Box<dyn FileSaver> {
    Box::new(crate::file_saver::BrowserDownload)
}

impl eframe::App for BoardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let prefs = Preferences {
            tools: Some(*self.canvas.tools()),
            timer_preset: Some(self.timer.last_preset()),
            screen: self.carousel.index(),
        };
        eframe::set_value(storage, PREFERENCES_KEY, &prefs);
        if self.topics_dirty {
            self.roulette.save(storage);
            self.topics_dirty = false;
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        // Widgets keep running while another screen is showing
        if self.timer.tick(now, &mut self.alerts).is_some() {
            self.notice = Some("Time is up".to_owned());
        }
        if self.timer.is_running() {
            ctx.request_repaint();
        } else if self.timer.is_alerting() {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                self.config.timer.blink_interval_ms,
            ));
        }
        if self.roulette.is_spinning() {
            self.roulette.tick(now, &mut self.picker);
            ctx.request_repaint_after(std::time::Duration::from_millis(
                self.config.roulette.spin_interval_ms,
            ));
        }

        panels::top_bar(self, ctx);
        panels::status_bar(self, ctx);

        let mut panel_frame = egui::Frame::central_panel(&ctx.style());
        if let Some(fill) = self.alerts.flash_fill() {
            panel_frame = panel_frame.fill(fill);
        }
        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| match self.screen() {
                Screen::Canvas => panels::canvas_panel(self, ui),
                Screen::Roulette => panels::roulette_panel(self, ui, now),
                Screen::Timer => panels::timer_panel(self, ui, now),
            });

        if self.show_clear_confirm {
            panels::clear_confirm_window(self, ctx);
        }
        if self.topic_editor.is_some() {
            panels::topic_editor_window(self, ctx, frame);
        }
    }
}
