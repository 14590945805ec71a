//! Viewport geometry and device classification.

/// Width of one terminal cell in simulated pixels.
pub const CELL_WIDTH_PX: f32 = 8.0;

/// Height of one terminal cell in simulated pixels.
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Viewports narrower than this many columns are treated as touch devices.
///
/// A pixel breakpoint would put a plain 80 column terminal (640 px) on the
/// touch side, so the threshold is counted in columns instead.
pub const DEFAULT_NARROW_BREAKPOINT_COLS: u16 = 64;

/// Input class of the device showing the effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceClass {
    /// Precise pointer available; pointer-driven motion enabled.
    #[default]
    Desktop,
    /// Narrow or touch viewport; pointer-driven motion pinned to centre.
    Narrow,
}

impl DeviceClass {
    /// Classify a viewport by its width in columns.
    pub fn detect(cols: u16, breakpoint_cols: u16, force_touch: bool) -> Self {
        if force_touch || cols < breakpoint_cols {
            DeviceClass::Narrow
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_narrow(self) -> bool {
        self == DeviceClass::Narrow
    }
}

/// Drawable area in terminal cells, with its derived pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub device: DeviceClass,
}

impl Viewport {
    /// Viewport classified with the default breakpoint.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self::classify(cols, rows, DEFAULT_NARROW_BREAKPOINT_COLS, false)
    }

    pub fn classify(cols: u16, rows: u16, breakpoint_cols: u16, force_touch: bool) -> Self {
        Self {
            cols,
            rows,
            device: DeviceClass::detect(cols, breakpoint_cols, force_touch),
        }
    }

    pub fn width_px(&self) -> f32 {
        self.cols as f32 * CELL_WIDTH_PX
    }

    pub fn height_px(&self) -> f32 {
        self.rows as f32 * CELL_HEIGHT_PX
    }

    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Pixel coordinates of the centre of a cell.
    pub fn cell_center_px(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * CELL_WIDTH_PX,
            (row as f32 + 0.5) * CELL_HEIGHT_PX,
        )
    }

    /// Cell containing a pixel position, if it lies inside the viewport.
    pub fn cell_at_px(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let col = (x / CELL_WIDTH_PX) as u32;
        let row = (y / CELL_HEIGHT_PX) as u32;
        if col < self.cols as u32 && row < self.rows as u32 {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_detection() {
        assert_eq!(Viewport::new(56, 20).device, DeviceClass::Narrow);
        assert_eq!(Viewport::new(120, 40).device, DeviceClass::Desktop);
        assert_eq!(
            Viewport::classify(200, 50, DEFAULT_NARROW_BREAKPOINT_COLS, true).device,
            DeviceClass::Narrow
        );
        assert_eq!(Viewport::classify(100, 30, 120, false).device, DeviceClass::Narrow);
    }

    #[test]
    fn test_standard_terminal_is_desktop() {
        assert_eq!(Viewport::new(80, 24).device, DeviceClass::Desktop);
        assert_eq!(
            Viewport::new(DEFAULT_NARROW_BREAKPOINT_COLS, 24).device,
            DeviceClass::Desktop
        );
        assert_eq!(
            Viewport::new(DEFAULT_NARROW_BREAKPOINT_COLS - 1, 24).device,
            DeviceClass::Narrow
        );
    }

    #[test]
    fn test_cell_lookup() {
        let vp = Viewport::new(100, 30);
        assert_eq!(vp.cell_at_px(0.0, 0.0), Some((0, 0)));
        assert_eq!(vp.cell_at_px(799.9, 479.9), Some((99, 29)));
        assert_eq!(vp.cell_at_px(800.0, 10.0), None);
        assert_eq!(vp.cell_at_px(-0.1, 10.0), None);
        assert_eq!(vp.cell_at_px(f32::NAN, 10.0), None);
        let (x, y) = vp.cell_center_px(3, 2);
        assert_eq!(vp.cell_at_px(x, y), Some((3, 2)));
    }
}
