/// Raw RGB frame as delivered by the decode pipe.
///
/// Pixels are RGB row-major, 3 bytes per pixel, no padding. Dimensions are
/// the source's native resolution; one buffer is reused across the whole
/// session and never retained past a pacing-loop iteration.
///
/// # Example
/// ```
/// use ss_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 300);
/// ```
pub struct FrameBuffer {
    /// Pixels RGB, row-major, 3 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer pré-alloué aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 3) as usize],
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 3) as usize;
        if idx + 2 >= self.data.len() {
            return (0, 0, 0);
        }
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Luminance perceptuelle BT.709, entière [0, 255].
    ///
    /// # Example
    /// ```
    /// use ss_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(1, 1);
    /// fb.data.copy_from_slice(&[255, 255, 255]);
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b) = self.pixel(x, y);
        ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
    }
}

/// Single rendered cell: one glyph, optionally carrying the original
/// pixel color. Serialization to escape sequences happens at the sink
/// boundary, never here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Caractère à afficher.
    pub glyph: char,
    /// Couleur foreground (RGB), `None` en mode monochrome.
    pub color: Option<(u8, u8, u8)>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: None,
        }
    }
}

/// One rendered frame: a grid of cells, `height` rows of `width` cells.
///
/// # Example
/// ```
/// use ss_core::frame::{Cell, CellGrid};
/// let mut grid = CellGrid::new(80, 24);
/// grid.set(0, 0, Cell { glyph: '@', color: None });
/// assert_eq!(grid.get(0, 0).glyph, '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<Cell>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

impl CellGrid {
    /// Crée une grille pré-allouée.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &Cell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }
}
