use egui::{Color32, Pos2};

use crate::error::{BoardResult, SurfaceResult};
use crate::file_saver::FileSaver;
use crate::history::{DEFAULT_CAPACITY, History};
use crate::input::CanvasInput;
use crate::stroke::StrokeSession;
use crate::surface::{RasterSurface, Snapshot};
use crate::tool::ToolState;
use crate::util::time;

/// Toolbar actions the canvas understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    SelectColor(Color32),
    SelectWidth(u32),
    ToggleEraser,
    Undo,
    Redo,
    /// Clear the board. Callers ask the user to confirm first.
    Clear,
}

/// Drives a raster surface from pointer input and toolbar actions, and
/// checkpoints every completed stroke into a bounded undo history.
pub struct CanvasController<S: RasterSurface> {
    surface: S,
    history: History<Snapshot>,
    tools: ToolState,
    session: StrokeSession,
}

impl<S: RasterSurface> std::fmt::Debug for CanvasController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasController")
            .field("tools", &self.tools)
            .field("history_len", &self.history.len())
            .field("history_position", &self.history.position())
            .field("stroke", &self.session.current_state_name())
            .finish()
    }
}

impl<S: RasterSurface> CanvasController<S> {
    /// Clears `surface` and records the blank board as the first checkpoint
    pub fn new(surface: S, tools: ToolState) -> SurfaceResult<Self> {
        Self::with_capacity(surface, tools, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(mut surface: S, tools: ToolState, capacity: usize) -> SurfaceResult<Self> {
        surface.clear();
        let blank = surface.capture_snapshot()?;
        Ok(Self {
            surface,
            history: History::with_capacity(blank, capacity),
            tools,
            session: StrokeSession::new(),
        })
    }

    pub fn handle_input(&mut self, input: CanvasInput) {
        match input {
            CanvasInput::Press(point) => self.pointer_down(point),
            CanvasInput::Move(point) => self.pointer_move(point),
            CanvasInput::Release | CanvasInput::Leave => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, point: Pos2) {
        // Land any queued restore first so the new stroke sits on top of it
        self.settle();
        self.session.begin(point, &self.tools);
    }

    pub fn pointer_move(&mut self, point: Pos2) {
        self.session.extend(point, &mut self.surface);
    }

    pub fn pointer_up(&mut self) {
        if let Some(ended) = self.session.end() {
            log::debug!(
                "Stroke finished: {} segments, eraser: {}",
                ended.segments,
                ended.style.is_eraser()
            );
            self.settle();
            self.checkpoint();
        }
    }

    pub fn apply(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::SelectColor(color) => self.tools.select_color(color),
            CanvasAction::SelectWidth(width) => self.tools.select_width(width),
            CanvasAction::ToggleEraser => self.tools.toggle_eraser(),
            CanvasAction::Undo => self.undo(),
            CanvasAction::Redo => self.redo(),
            CanvasAction::Clear => self.clear(),
        }
    }

    /// Steps back one checkpoint. Ignored while a stroke is in progress.
    pub fn undo(&mut self) {
        if self.session.is_active() {
            log::debug!("Ignoring undo during a stroke");
            return;
        }
        if let Some(snapshot) = self.history.undo() {
            self.surface.restore_snapshot(snapshot.clone());
            log::debug!("Undo to checkpoint {}", self.history.position());
        }
    }

    pub fn redo(&mut self) {
        if self.session.is_active() {
            log::debug!("Ignoring redo during a stroke");
            return;
        }
        if let Some(snapshot) = self.history.redo() {
            self.surface.restore_snapshot(snapshot.clone());
            log::debug!("Redo to checkpoint {}", self.history.position());
        }
    }

    pub fn clear(&mut self) {
        // A queued restore would otherwise land over the cleared board
        self.settle();
        self.surface.clear();
        self.checkpoint();
        log::info!("Canvas cleared");
    }

    /// Exports the board and hands it to `saver`. Returns the file name used.
    pub fn download(&mut self, saver: &mut dyn FileSaver) -> BoardResult<String> {
        self.settle();
        let bytes = self.surface.export_opaque_image()?;
        let file_name = download_file_name(&time::iso_timestamp());
        saver.save(&file_name, &bytes)?;
        log::info!("Saved {} ({} bytes)", file_name, bytes.len());
        Ok(file_name)
    }

    /// Completes a pending restore. A decode failure leaves the board as it
    /// is and is only logged.
    pub fn settle(&mut self) -> bool {
        match self.surface.settle() {
            Ok(restored) => restored,
            Err(err) => {
                log::warn!("Could not restore checkpoint, keeping current board: {}", err);
                false
            }
        }
    }

    /// Resizes the surface; pixels are preserved, history is untouched
    pub fn resize(&mut self, width: u32, height: u32) {
        self.settle();
        if let Err(err) = self.surface.resize(width, height) {
            log::error!("Failed to resize canvas: {}", err);
        }
    }

    fn checkpoint(&mut self) {
        match self.surface.capture_snapshot() {
            Ok(snapshot) => self.history.push(snapshot),
            Err(err) => log::error!("Failed to capture checkpoint: {}", err),
        }
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_active()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

/// `drawing_<timestamp>.jpg` with `:` and `.` replaced so the name is
/// valid on every file system
pub fn download_file_name(iso_timestamp: &str) -> String {
    format!("drawing_{}.jpg", iso_timestamp.replace([':', '.'], "-"))
}
