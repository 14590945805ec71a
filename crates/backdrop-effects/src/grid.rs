//! Cell raster the effects paint into.

use backdrop_core::Viewport;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::color::mix;

/// One painted terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

/// Row-major grid of optional cells, sized to the viewport.
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    viewport: Viewport,
    cells: Vec<Option<Cell>>,
}

impl CellGrid {
    pub fn new(viewport: Viewport) -> Self {
        let len = viewport.cols as usize * viewport.rows as usize;
        Self {
            viewport,
            cells: vec![None; len],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            *self = Self::new(viewport);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.viewport.cols && row < self.viewport.rows)
            .then(|| row as usize * self.viewport.cols as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.index(col, row).and_then(|i| self.cells[i])
    }

    /// Paint a cell; out-of-range positions are ignored.
    pub fn set(&mut self, col: u16, row: u16, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Some(Cell { ch, fg });
        }
    }

    /// Paint translucently over whatever is already there.
    ///
    /// The glyph is replaced; the colour is blended with the existing one.
    pub fn blend(&mut self, col: u16, row: u16, ch: char, fg: Color, alpha: f32) {
        if let Some(i) = self.index(col, row) {
            let fg = match self.cells[i] {
                Some(under) => mix(under.fg, fg, alpha),
                None => fg,
            };
            self.cells[i] = Some(Cell { ch, fg });
        }
    }

    /// Paint the cell under a pixel position, if any.
    pub fn plot_px(&mut self, x: f32, y: f32, ch: char, fg: Color) {
        if let Some((col, row)) = self.viewport.cell_at_px(x, y) {
            self.set(col, row, ch, fg);
        }
    }

    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Convert to styled lines for a `Paragraph`.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let cols = self.viewport.cols.max(1) as usize;
        self.cells
            .chunks(cols)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(c) => Span::styled(c.ch.to_string(), Style::new().fg(c.fg)),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut grid = CellGrid::new(Viewport::new(4, 3));
        grid.set(4, 0, '*', Color::White);
        grid.set(0, 3, '*', Color::White);
        assert_eq!(grid.painted(), 0);
        grid.set(3, 2, '*', Color::White);
        assert_eq!(
            grid.get(3, 2),
            Some(Cell {
                ch: '*',
                fg: Color::White
            })
        );
    }

    #[test]
    fn test_plot_px_maps_to_cells() {
        let mut grid = CellGrid::new(Viewport::new(4, 3));
        grid.plot_px(9.0, 17.0, '+', Color::White);
        assert!(grid.get(1, 1).is_some());
        grid.plot_px(-1.0, 0.0, '+', Color::White);
        assert_eq!(grid.painted(), 1);
    }

    #[test]
    fn test_lines_match_viewport() {
        let mut grid = CellGrid::new(Viewport::new(5, 2));
        grid.set(0, 1, 'x', Color::White);
        let lines = grid.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans.len(), 5);
        assert_eq!(lines[1].spans[0].content, "x");
    }

    #[test]
    fn test_blend_mixes_colour() {
        let mut grid = CellGrid::new(Viewport::new(1, 1));
        grid.set(0, 0, '█', Color::Black);
        grid.blend(0, 0, '▒', Color::White, 0.5);
        let cell = grid.get(0, 0).expect("painted");
        assert_eq!(cell.ch, '▒');
        assert_eq!(cell.fg, Color::Rgb(128, 128, 128));
    }
}
