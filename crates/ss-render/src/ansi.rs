use std::fmt::Write as _;

use ss_core::frame::CellGrid;

/// Serialize a cell grid to one textual frame.
///
/// Rows top-to-bottom joined by `\n`, no trailing newline. Colored cells
/// are wrapped in a truecolor SGR sequence and reset immediately, so every
/// printable unit stays self-contained.
///
/// # Example
/// ```
/// use ss_core::frame::{Cell, CellGrid};
/// use ss_render::ansi::encode_grid;
/// let mut grid = CellGrid::new(2, 1);
/// grid.set(1, 0, Cell { glyph: '@', color: None });
/// assert_eq!(encode_grid(&grid), " @");
/// ```
#[must_use]
pub fn encode_grid(grid: &CellGrid) -> String {
    // 20 bytes par cellule colorisée (escape + glyphe + reset).
    let per_cell = if grid.cells.iter().any(|c| c.color.is_some()) {
        24
    } else {
        4
    };
    let mut out =
        String::with_capacity(grid.cells.len() * per_cell + grid.height as usize);

    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for cell in row {
            match cell.color {
                Some((r, g, b)) => {
                    // String formatting is infallible.
                    let _ = write!(out, "\x1b[38;2;{r};{g};{b}m{}\x1b[0m", cell.glyph);
                }
                None => out.push(cell.glyph),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::frame::Cell;

    #[test]
    fn monochrome_grid_is_plain_text() {
        let mut grid = CellGrid::new(3, 2);
        for x in 0..3 {
            grid.set(x, 0, Cell { glyph: '#', color: None });
        }
        assert_eq!(encode_grid(&grid), "###\n   ");
    }

    #[test]
    fn colored_cell_is_wrapped_and_reset() {
        let mut grid = CellGrid::new(1, 1);
        grid.set(
            0,
            0,
            Cell {
                glyph: '@',
                color: Some((255, 128, 0)),
            },
        );
        assert_eq!(encode_grid(&grid), "\x1b[38;2;255;128;0m@\x1b[0m");
    }

    #[test]
    fn no_trailing_newline() {
        let grid = CellGrid::new(2, 2);
        let text = encode_grid(&grid);
        assert_eq!(text.lines().count(), 2);
        assert!(!text.ends_with('\n'));
    }
}
