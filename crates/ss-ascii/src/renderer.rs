use ss_core::StreamError;
use ss_core::config::RenderConfig;
use ss_core::frame::{Cell, CellGrid, FrameBuffer};
use ss_core::ramp::Ramp;

use crate::glyph::GlyphMapper;
use crate::resize::Resizer;

/// Transforme une frame brute en grille de cellules.
///
/// Aspect ratio is preserved: `rows = round(width · src_h / src_w)`,
/// clamped to at least one row. The downsampled scratch buffer is reused
/// across frames; the output grid is a fresh, ephemeral value.
///
/// Rendering is a pure transform of its inputs: the same frame under the
/// same configuration always yields a byte-identical grid.
pub struct FrameRenderer {
    width: u32,
    color: bool,
    mapper: GlyphMapper,
    resizer: Resizer,
    scratch: FrameBuffer,
}

impl FrameRenderer {
    /// Build a renderer for one session. The ramp is resolved here, once.
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            width: config.width.max(1),
            color: config.color,
            mapper: GlyphMapper::new(Ramp::from_style(config.ramp), config.contrast),
            resizer: Resizer::new(),
            scratch: FrameBuffer::new(0, 0),
        }
    }

    /// Render one raw frame into a cell grid.
    ///
    /// # Errors
    /// Returns [`StreamError::InvalidFrame`] for a zero-width or
    /// zero-height frame; no partial output is produced.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<CellGrid, StreamError> {
        if frame.width == 0 || frame.height == 0 {
            return Err(StreamError::InvalidFrame {
                width: frame.width,
                height: frame.height,
            });
        }

        let height = ((f64::from(self.width) * f64::from(frame.height)
            / f64::from(frame.width))
            .round() as u32)
            .max(1);

        if self.scratch.width != self.width || self.scratch.height != height {
            log::debug!("renderer: grille {}×{height}", self.width);
            self.scratch = FrameBuffer::new(self.width, height);
        }
        self.resizer.resize_into(frame, &mut self.scratch)?;

        let mut grid = CellGrid::new(self.width as u16, height as u16);
        for y in 0..height {
            for x in 0..self.width {
                let lum = self.scratch.luminance(x, y);
                let glyph = self.mapper.map(lum);
                // Color carries the cell's pre-luminance RGB, not the glyph index.
                let color = self.color.then(|| self.scratch.pixel(x, y));
                grid.set(x as u16, y as u16, Cell { glyph, color });
            }
        }
        Ok(grid)
    }
}
