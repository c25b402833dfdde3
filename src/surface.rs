use std::sync::Arc;

use egui::{Color32, Pos2};
use image::ImageEncoder;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::error::{SurfaceError, SurfaceResult};
use crate::tool::{BACKGROUND, StrokeStyle};

/// JPEG quality used for downloads (0.9 on a 0..1 scale)
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Immutable, losslessly encoded image of the whole surface at one instant.
///
/// Cloning is cheap: the encoded bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("encoded_len", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    /// Wraps already encoded PNG bytes. Nothing is decoded until restore.
    pub fn from_png(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            png: png.into(),
            width,
            height,
        }
    }

    pub fn encoded(&self) -> &[u8] {
        &self.png
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

/// A 2D drawing surface the canvas controller paints on.
///
/// Restoring a snapshot is deferred: `restore_snapshot` only records the
/// request, and the decode lands on the next `settle`, fully replacing the
/// live pixels at that point.
pub trait RasterSurface {
    /// Width and height in pixels
    fn size(&self) -> [u32; 2];

    /// Fills the whole surface with opaque white
    fn clear(&mut self);

    /// Draws a round-capped, round-joined line from `from` to `to`
    fn stroke_segment(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle);

    fn capture_snapshot(&self) -> SurfaceResult<Snapshot>;

    /// Queues `snapshot` to replace the live pixels. A later request
    /// replaces an earlier one that has not landed yet.
    fn restore_snapshot(&mut self, snapshot: Snapshot);

    fn has_pending_restore(&self) -> bool;

    /// Completes a pending restore. Returns `Ok(true)` when pixels were
    /// replaced and `Ok(false)` when nothing was pending. On a decode
    /// error the live pixels are left untouched.
    fn settle(&mut self) -> SurfaceResult<bool>;

    /// Encodes the surface composited over opaque white as a JPEG
    fn export_opaque_image(&self) -> SurfaceResult<Vec<u8>>;

    /// Changes the surface size, keeping existing pixels anchored top-left
    fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()>;
}

/// CPU raster surface backed by a tiny-skia pixmap
pub struct PixmapSurface {
    pixmap: Pixmap,
    pending: Option<Snapshot>,
    jpeg_quality: u8,
    /// Bumped on every pixel change so views can skip re-uploads
    revision: u64,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("pending_restore", &self.pending.is_some())
            .field("revision", &self.revision)
            .finish()
    }
}

impl PixmapSurface {
    /// Creates a white surface. Zero dimensions are bumped to one pixel.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let mut surface = Self {
            pixmap: blank_pixmap(width, height)?,
            pending: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            revision: 0,
        };
        surface.clear();
        Ok(surface)
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Premultiplied RGBA pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Colour of a single pixel, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixmap.pixel(x, y).map(|p| {
            Color32::from_rgba_premultiplied(p.red(), p.green(), p.blue(), p.alpha())
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replaces the live pixels with `image`, on white where it does not reach
    fn replace_pixels(&mut self, image: &Pixmap) {
        if image.width() == self.pixmap.width() && image.height() == self.pixmap.height() {
            self.pixmap.data_mut().copy_from_slice(image.data());
        } else {
            self.pixmap.fill(skia_color(BACKGROUND));
            self.pixmap.draw_pixmap(
                0,
                0,
                image.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        self.touch();
    }
}

impl RasterSurface for PixmapSurface {
    fn size(&self) -> [u32; 2] {
        [self.pixmap.width(), self.pixmap.height()]
    }

    fn clear(&mut self) {
        self.pixmap.fill(skia_color(BACKGROUND));
        self.touch();
    }

    fn stroke_segment(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle) {
        let mut paint = Paint::default();
        let [r, g, b, a] = style.color().to_srgba_unmultiplied();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let width = style.line_width();

        if from == to {
            // A zero-length line still leaves a round dot
            if let Some(dot) = PathBuilder::from_circle(from.x, from.y, width / 2.0) {
                self.pixmap.fill_path(
                    &dot,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
                self.touch();
            }
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            log::debug!("Skipping degenerate segment {:?} -> {:?}", from, to);
            return;
        };

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        self.touch();
    }

    fn capture_snapshot(&self) -> SurfaceResult<Snapshot> {
        let png = self
            .pixmap
            .encode_png()
            .map_err(|e| SurfaceError::SnapshotEncode(e.to_string()))?;
        Ok(Snapshot::from_png(
            png,
            self.pixmap.width(),
            self.pixmap.height(),
        ))
    }

    fn restore_snapshot(&mut self, snapshot: Snapshot) {
        if self.pending.replace(snapshot).is_some() {
            log::debug!("Superseding a restore that had not landed yet");
        }
    }

    fn has_pending_restore(&self) -> bool {
        self.pending.is_some()
    }

    fn settle(&mut self) -> SurfaceResult<bool> {
        let Some(snapshot) = self.pending.take() else {
            return Ok(false);
        };
        let decoded = Pixmap::decode_png(snapshot.encoded())
            .map_err(|e| SurfaceError::SnapshotDecode(e.to_string()))?;
        self.replace_pixels(&decoded);
        Ok(true)
    }

    fn export_opaque_image(&self) -> SurfaceResult<Vec<u8>> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());

        // Composite over white so any transparency becomes background
        let mut flattened = blank_pixmap(width, height)?;
        flattened.fill(skia_color(BACKGROUND));
        flattened.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        // Fully opaque now, so premultiplied equals straight RGB
        let rgb: Vec<u8> = flattened
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.jpeg_quality);
        encoder.write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)?;
        Ok(buf.into_inner())
    }

    fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        let (width, height) = (width.max(1), height.max(1));
        if [width, height] == self.size() {
            return Ok(());
        }
        let previous = std::mem::replace(&mut self.pixmap, blank_pixmap(width, height)?);
        self.replace_pixels(&previous);
        log::debug!("Resized surface to {}x{}", width, height);
        Ok(())
    }
}

fn blank_pixmap(width: u32, height: u32) -> SurfaceResult<Pixmap> {
    let (width, height) = (width.max(1), height.max(1));
    Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })
}

fn skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}
