//! Stacked translucent layers displaced by the pointer.

use backdrop_core::{DeviceClass, PointerState, Viewport};
use glam::Vec2;
use ratatui::style::Color;

use super::Effect;
use crate::clock::FrameTime;
use crate::color::{hex, mix};
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

/// Displacement in pixels at full pointer deflection and speed 1.
pub const BASE_AMPLITUDE: f32 = 100.0;

/// Blur added per stacking index, in pixels.
pub const BLUR_STEP_PX: f32 = 12.0;

/// Section backdrop behind the layers, top-left to bottom-right.
const BACKDROP: [Color; 3] = [hex(0x713F12), hex(0x8B4513), hex(0x78350F)];
/// Darkening overlay for readability.
const OVERLAY_ALPHA: f32 = 0.3;

/// One layer of the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Fraction of the base amplitude this layer moves by.
    pub speed: f32,
    pub opacity: f32,
    /// Gradient start (top-left) and end (bottom-right) with their alphas.
    pub from: (Color, f32),
    pub to: (Color, f32),
    /// Ellipse size relative to the viewport.
    pub scale: f32,
}

impl ParallaxLayer {
    /// Blur radius for a layer at stacking index `index`.
    pub fn blur_px(index: usize) -> f32 {
        index as f32 * BLUR_STEP_PX
    }
}

/// The three gold layers of the interactive hero.
pub fn default_layers() -> Vec<ParallaxLayer> {
    vec![
        ParallaxLayer {
            speed: 0.02,
            opacity: 1.0,
            from: (hex(0x713F12), 1.0),
            to: (hex(0x78350F), 1.0),
            scale: 1.4,
        },
        ParallaxLayer {
            speed: 0.06,
            opacity: 0.7,
            from: (hex(0xFFD700), 0.3),
            to: (hex(0xFFA500), 0.2),
            scale: 0.9,
        },
        ParallaxLayer {
            speed: 0.12,
            opacity: 0.5,
            from: (hex(0xFFA500), 0.2),
            to: (hex(0xFFD700), 0.1),
            scale: 0.55,
        },
    ]
}

/// Displacement of a layer for a pointer on a device.
pub fn displacement(
    layer: &ParallaxLayer,
    pointer: PointerState,
    device: DeviceClass,
    amplitude: f32,
) -> Vec2 {
    match device {
        DeviceClass::Narrow => Vec2::ZERO,
        DeviceClass::Desktop => {
            let (dx, dy) = pointer.offset_from_center();
            Vec2::new(dx, dy) * amplitude * layer.speed
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Layer stack state: only the per-layer offsets change, and only with the pointer.
#[derive(Debug)]
pub struct ParallaxLayerStack {
    layers: Vec<ParallaxLayer>,
    amplitude: f32,
    offsets: Vec<Vec2>,
}

impl Default for ParallaxLayerStack {
    fn default() -> Self {
        Self::new(default_layers(), BASE_AMPLITUDE)
    }
}

impl ParallaxLayerStack {
    pub fn new(layers: Vec<ParallaxLayer>, amplitude: f32) -> Self {
        let offsets = vec![Vec2::ZERO; layers.len()];
        Self {
            layers,
            amplitude,
            offsets,
        }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    /// Current displacement of each layer.
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// Recompute layer offsets for a pointer.
    pub fn apply_pointer(&mut self, pointer: PointerState, device: DeviceClass) {
        for (offset, layer) in self.offsets.iter_mut().zip(&self.layers) {
            *offset = displacement(layer, pointer, device, self.amplitude);
        }
    }

    fn backdrop_at(x: f32, y: f32, size: Vec2) -> Color {
        let t = ((x / size.x + y / size.y) * 0.5).clamp(0.0, 1.0);
        if t < 0.5 {
            mix(BACKDROP[0], BACKDROP[1], t * 2.0)
        } else {
            mix(BACKDROP[1], BACKDROP[2], (t - 0.5) * 2.0)
        }
    }
}

impl Effect for ParallaxLayerStack {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, _frame: FrameTime, input: &FrameInput) {
        self.apply_pointer(input.pointer, input.device);
    }

    fn paint(&self, grid: &mut CellGrid) {
        let vp = grid.viewport();
        if vp.is_empty() {
            return;
        }
        let size = Vec2::new(vp.width_px(), vp.height_px());
        let center = size * 0.5;

        for row in 0..vp.rows {
            for col in 0..vp.cols {
                let (x, y) = vp.cell_center_px(col, row);
                let mut color = Self::backdrop_at(x, y, size);
                for (index, (layer, offset)) in self.layers.iter().zip(&self.offsets).enumerate() {
                    let radii = size * 0.5 * layer.scale;
                    let rel = Vec2::new(x, y) - (center + *offset);
                    let d = (rel / radii).length();
                    // soft edge widens with the layer's blur
                    let soft = 0.05 + ParallaxLayer::blur_px(index) / radii.min_element();
                    let coverage = 1.0 - smoothstep(1.0 - soft, 1.0 + soft, d);
                    if coverage <= 0.0 {
                        continue;
                    }
                    let corner = center + *offset - radii;
                    let t = (((x - corner.x) / (2.0 * radii.x) + (y - corner.y) / (2.0 * radii.y))
                        * 0.5)
                        .clamp(0.0, 1.0);
                    let tint = mix(layer.from.0, layer.to.0, t);
                    let alpha = layer.from.1 + (layer.to.1 - layer.from.1) * t;
                    color = mix(color, tint, alpha * layer.opacity * coverage);
                }
                grid.set(col, row, '█', mix(color, Color::Black, OVERLAY_ALPHA));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displacement_formula() {
        let layer = default_layers()[2];
        let d = displacement(
            &layer,
            PointerState::from_fractions(1.0, 0.0),
            DeviceClass::Desktop,
            BASE_AMPLITUDE,
        );
        assert!((d.x - 6.0).abs() < 1e-5);
        assert!((d.y + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_displacement_monotonic_and_continuous() {
        for layer in default_layers() {
            let mut prev: Option<f32> = None;
            for step in 0..=1_000 {
                let frac = step as f32 / 1_000.0;
                let d = displacement(
                    &layer,
                    PointerState::from_fractions(frac, 0.3),
                    DeviceClass::Desktop,
                    BASE_AMPLITUDE,
                );
                if let Some(p) = prev {
                    assert!(d.x >= p, "not monotonic at {frac}");
                    // a step of 0.001 can move at most amplitude * speed * 0.001
                    assert!(d.x - p <= BASE_AMPLITUDE * layer.speed * 0.001 + 1e-5);
                }
                prev = Some(d.x);
            }
        }
    }

    #[test]
    fn test_deeper_layers_move_further() {
        let mut stack = ParallaxLayerStack::default();
        stack.apply_pointer(PointerState::from_fractions(0.9, 0.9), DeviceClass::Desktop);
        let xs: Vec<f32> = stack.offsets().iter().map(|o| o.x).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
        assert_eq!(ParallaxLayer::blur_px(0), 0.0);
        assert_eq!(ParallaxLayer::blur_px(2), 24.0);
    }

    #[test]
    fn test_narrow_matches_centered_pointer() {
        let mut narrow = ParallaxLayerStack::default();
        narrow.apply_pointer(PointerState::from_fractions(0.0, 1.0), DeviceClass::Narrow);
        let mut centered = ParallaxLayerStack::default();
        centered.apply_pointer(PointerState::centered(), DeviceClass::Desktop);
        assert_eq!(narrow.offsets(), centered.offsets());
    }

    #[test]
    fn test_static_without_pointer_motion() {
        let mut stack = ParallaxLayerStack::default();
        let input = FrameInput {
            pointer: PointerState::from_fractions(0.7, 0.2),
            ..Default::default()
        };
        stack.update(FrameTime::default(), &input);
        let before = stack.offsets().to_vec();
        let later = FrameTime {
            elapsed: std::time::Duration::from_secs(10),
            delta: std::time::Duration::from_millis(16),
        };
        stack.update(later, &input);
        assert_eq!(stack.offsets(), &before[..]);
    }

    #[test]
    fn test_paint_covers_viewport() {
        let vp = Viewport::new(40, 12);
        let mut grid = CellGrid::new(vp);
        ParallaxLayerStack::default().paint(&mut grid);
        assert_eq!(grid.painted(), 40 * 12);
    }
}
