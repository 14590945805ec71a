//! Translucent hero card in the middle of the parallax hero, tilting
//! towards the pointer.

use backdrop_core::{DeviceClass, PointerState, Viewport};
use glam::{Mat2, Mat3, Vec2};
use ratatui::style::Color;

use super::Effect;
use crate::clock::FrameTime;
use crate::color::hex;
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

/// Side of the square card in pixels.
pub const CARD_SIZE_PX: f32 = 320.0;
/// Tilt in degrees per unit of pointer offset; ±10° at the viewport edges.
pub const TILT_DEG: f32 = 20.0;

const BORDER_PX: f32 = 12.0;
const GLOW_PX: f32 = 40.0;
const FILL_ALPHA: f32 = 0.6;
const BORDER_ALPHA: f32 = 0.3;
const GLOW_ALPHA: f32 = 0.5;
const GOLD: Color = hex(0xFFD700);

/// Card rotation in degrees `(around x, around y)` for a pointer.
pub fn card_tilt(pointer: PointerState, device: DeviceClass) -> Vec2 {
    match device {
        DeviceClass::Narrow => Vec2::ZERO,
        DeviceClass::Desktop => {
            let (dx, dy) = pointer.offset_from_center();
            Vec2::new(dy, dx) * TILT_DEG
        }
    }
}

#[derive(Debug, Default)]
pub struct HeroCard {
    tilt: Vec2,
}

impl HeroCard {
    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }

    /// Card plane to screen, ignoring depth.
    fn footprint(&self) -> Mat2 {
        let r = Mat3::from_rotation_x(self.tilt.x.to_radians())
            * Mat3::from_rotation_y(self.tilt.y.to_radians());
        Mat2::from_cols(r.x_axis.truncate(), r.y_axis.truncate())
    }

    /// Card-plane coordinates under a screen offset from the card centre.
    ///
    /// `None` when the card is seen edge-on.
    pub fn to_card(&self, offset: Vec2) -> Option<Vec2> {
        let m = self.footprint();
        (m.determinant().abs() > 1e-4).then(|| m.inverse() * offset)
    }

    /// Screen offsets of the four corners from the card centre.
    pub fn corners(&self) -> [Vec2; 4] {
        let m = self.footprint();
        let h = CARD_SIZE_PX / 2.0;
        [
            m * Vec2::new(-h, -h),
            m * Vec2::new(h, -h),
            m * Vec2::new(h, h),
            m * Vec2::new(-h, h),
        ]
    }
}

impl Effect for HeroCard {
    fn name(&self) -> &'static str {
        "card"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, _frame: FrameTime, input: &FrameInput) {
        self.tilt = card_tilt(input.pointer, input.device);
    }

    fn paint(&self, grid: &mut CellGrid) {
        let vp = grid.viewport();
        if vp.is_empty() {
            return;
        }
        let center = Vec2::new(vp.width_px(), vp.height_px()) * 0.5;
        let half = CARD_SIZE_PX / 2.0;
        for row in 0..vp.rows {
            for col in 0..vp.cols {
                let (x, y) = vp.cell_center_px(col, row);
                let Some(uv) = self.to_card(Vec2::new(x, y) - center) else {
                    continue;
                };
                let edge = uv.abs().max_element();
                let under = grid.get(col, row).map_or('█', |c| c.ch);
                if edge <= half - BORDER_PX {
                    grid.blend(col, row, under, Color::Black, FILL_ALPHA);
                } else if edge <= half {
                    grid.blend(col, row, '█', GOLD, BORDER_ALPHA);
                } else if edge <= half + GLOW_PX {
                    let alpha = GLOW_ALPHA * (1.0 - (edge - half) / GLOW_PX);
                    grid.blend(col, row, under, GOLD, alpha);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(vp: Viewport) -> CellGrid {
        let mut grid = CellGrid::new(vp);
        for row in 0..vp.rows {
            for col in 0..vp.cols {
                grid.set(col, row, '•', Color::White);
            }
        }
        grid
    }

    #[test]
    fn test_tilt_follows_pointer() {
        assert_eq!(
            card_tilt(PointerState::centered(), DeviceClass::Desktop),
            Vec2::ZERO
        );
        let t = card_tilt(PointerState::from_fractions(1.0, 0.0), DeviceClass::Desktop);
        assert!((t.x + 10.0).abs() < 1e-5);
        assert!((t.y - 10.0).abs() < 1e-5);
        assert_eq!(
            card_tilt(PointerState::from_fractions(1.0, 0.0), DeviceClass::Narrow),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_tilted_card_is_foreshortened() {
        let flat = HeroCard::default();
        let inside = Vec2::new(159.0, 0.0);
        assert!(flat.to_card(inside).expect("flat").x <= CARD_SIZE_PX / 2.0);

        let mut tilted = HeroCard::default();
        tilted.update(
            FrameTime::default(),
            &FrameInput {
                pointer: PointerState::from_fractions(1.0, 0.5),
                ..Default::default()
            },
        );
        assert!(tilted.to_card(inside).expect("tilted").x > CARD_SIZE_PX / 2.0);
        for corner in tilted.corners() {
            let uv = tilted.to_card(corner).expect("tilted");
            assert!((uv.abs() - Vec2::splat(CARD_SIZE_PX / 2.0)).length() < 1e-3);
        }
    }

    #[test]
    fn test_paint_darkens_fill_and_keeps_glyphs() {
        let vp = Viewport::new(120, 40);
        let mut grid = filled(vp);
        HeroCard::default().paint(&mut grid);

        let fill = grid.get(60, 20).expect("painted");
        assert_eq!(fill.ch, '•');
        assert_eq!(fill.fg, Color::Rgb(102, 102, 102));

        let border = grid.get(79, 20).expect("painted");
        assert_eq!(border.ch, '█');

        let outside = grid.get(0, 0).expect("painted");
        assert_eq!(outside.fg, Color::White);
    }
}
