//! Liquid blob: a ring of control points morphed by summed sinusoids and
//! pushed outward by a nearby pointer.

use std::fmt::Write as _;

use backdrop_core::{DeviceClass, PointerState, Viewport};
use glam::Vec2;
use ratatui::style::Color;

use super::Effect;
use crate::chars::{SHADE_CHARS, ramp};
use crate::clock::FrameTime;
use crate::color::{hex, hsl, mix};
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

/// Coordinate space the blob is simulated in.
pub const VIEW_BOX: Vec2 = Vec2::new(960.0, 680.0);

/// Blur radius of the halo drawn around the blob, in view box units.
const GLOW_RADIUS: f32 = 32.0;
const BLOB_OPACITY: f32 = 0.95;
const OVERLAY_OPACITY: f32 = 0.35;
const UMBER: Color = hex(0x2C1F0A);
/// Curve samples per segment when rasterizing.
const SAMPLES_PER_SEGMENT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Cosine,
}

/// One oscillation term: `amplitude * wave(frequency * t + phase_step * index)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase_step: f32,
    pub wave: Wave,
}

impl Harmonic {
    pub fn eval(&self, index: usize, t: f32) -> f32 {
        let arg = self.frequency * t + self.phase_step * index as f32;
        self.amplitude
            * match self.wave {
                Wave::Sine => arg.sin(),
                Wave::Cosine => arg.cos(),
            }
    }
}

/// Shape and motion parameters of the blob.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobParams {
    /// Control points on the ring (at least 3).
    pub points: usize,
    pub radius: f32,
    pub center: Vec2,
    pub harmonics: Vec<Harmonic>,
    /// Pointer distance below which a point is pushed out.
    pub repel_threshold: f32,
    /// Push per unit of distance inside the threshold.
    pub repel_strength: f32,
    /// Upper bound on the push.
    pub repel_cap: f32,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            points: 8,
            radius: 260.0,
            center: Vec2::new(480.0, 340.0),
            harmonics: vec![
                Harmonic {
                    amplitude: 32.0,
                    frequency: 1.2,
                    phase_step: 1.0,
                    wave: Wave::Sine,
                },
                Harmonic {
                    amplitude: 18.0,
                    frequency: 0.7,
                    phase_step: 1.7,
                    wave: Wave::Cosine,
                },
            ],
            repel_threshold: 180.0,
            repel_strength: 0.7,
            repel_cap: 126.0,
        }
    }
}

impl BlobParams {
    /// Largest deviation the harmonics alone can produce.
    pub fn amplitude_sum(&self) -> f32 {
        self.harmonics.iter().map(|h| h.amplitude.abs()).sum()
    }
}

/// Quadratic Bézier piece of the outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl QuadSegment {
    pub fn at(&self, s: f32) -> Vec2 {
        let u = 1.0 - s;
        self.start * (u * u) + self.control * (2.0 * u * s) + self.end * (s * s)
    }
}

/// Closed outline through the midpoints of consecutive control points.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobPath {
    pub segments: Vec<QuadSegment>,
}

impl BlobPath {
    /// Each control point becomes the Bézier control of the segment joining
    /// the midpoints on either side of it.
    pub fn through(points: &[Vec2]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| {
                let prev = points[(i + n - 1) % n];
                let cur = points[i];
                let next = points[(i + 1) % n];
                QuadSegment {
                    start: (prev + cur) * 0.5,
                    control: cur,
                    end: (cur + next) * 0.5,
                }
            })
            .collect();
        Self { segments }
    }

    /// SVG path data for the outline.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        if let Some(first) = self.segments.first() {
            let _ = write!(d, "M {:.2},{:.2}", first.start.x, first.start.y);
        }
        for seg in &self.segments {
            let _ = write!(
                d,
                " Q {:.2},{:.2} {:.2},{:.2}",
                seg.control.x, seg.control.y, seg.end.x, seg.end.y
            );
        }
        d.push_str(" Z");
        d
    }

    /// Polyline approximation with `steps` samples per segment.
    pub fn sample(&self, steps: usize) -> Vec<Vec2> {
        let steps = steps.max(1);
        self.segments
            .iter()
            .flat_map(|seg| (0..steps).map(move |k| seg.at(k as f32 / steps as f32)))
            .collect()
    }
}

/// Even-odd point-in-polygon test.
fn contains(polygon: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the closed polyline.
fn distance_to_outline(polygon: &[Vec2], p: Vec2) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            let ab = b - a;
            let t = if ab.length_squared() > 0.0 {
                ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0)
            } else {
                0.0
            };
            p.distance(a + ab * t)
        })
        .fold(f32::INFINITY, f32::min)
}

/// Morphing blob state.
#[derive(Debug)]
pub struct BlobMorpher {
    params: BlobParams,
    base_angles: Vec<f32>,
    points: Vec<Vec2>,
    radii: Vec<f32>,
    pointer: PointerState,
    device: DeviceClass,
}

impl Default for BlobMorpher {
    fn default() -> Self {
        Self::new(BlobParams::default())
    }
}

impl BlobMorpher {
    pub fn new(mut params: BlobParams) -> Self {
        params.points = params.points.max(3);
        params.radius = params.radius.max(0.0);
        let n = params.points;
        let base_angles: Vec<f32> = (0..n)
            .map(|i| i as f32 / n as f32 * std::f32::consts::TAU)
            .collect();
        let points = base_angles
            .iter()
            .map(|a| params.center + Vec2::from_angle(*a) * params.radius)
            .collect();
        Self {
            radii: vec![params.radius; n],
            params,
            base_angles,
            points,
            pointer: PointerState::centered(),
            device: DeviceClass::Desktop,
        }
    }

    pub fn params(&self) -> &BlobParams {
        &self.params
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// Radius of point `index` at time `t` from the harmonics alone.
    pub fn oscillation(&self, index: usize, t: f32) -> f32 {
        self.params.radius
            + self
                .params
                .harmonics
                .iter()
                .map(|h| h.eval(index, t))
                .sum::<f32>()
    }

    /// Recompute every control point for time `t` (seconds).
    ///
    /// Repulsion is measured from each point's previous position, so a
    /// pushed point moves away from the pointer and the push decays.
    pub fn morph(&mut self, t: f32, pointer: PointerState, repulsion: bool) {
        let target = Vec2::new(pointer.x_frac, pointer.y_frac) * VIEW_BOX;
        for i in 0..self.points.len() {
            let mut r = self.oscillation(i, t);
            if repulsion {
                let d = self.points[i].distance(target);
                if d < self.params.repel_threshold {
                    let push = (self.params.repel_threshold - d) * self.params.repel_strength;
                    r += push.min(self.params.repel_cap);
                }
            }
            let r = r.max(0.0);
            self.radii[i] = r;
            self.points[i] = self.params.center + Vec2::from_angle(self.base_angles[i]) * r;
        }
    }

    pub fn path(&self) -> BlobPath {
        BlobPath::through(&self.points)
    }

    /// Gradient hue, 45° (yellow) shifted by up to ±15° with the pointer.
    pub fn hue(&self) -> f32 {
        45.0 + (self.pointer.x_frac - 0.5) * 30.0
    }

    pub fn glow_opacity(&self) -> f32 {
        match self.device {
            DeviceClass::Narrow => 0.18,
            DeviceClass::Desktop => 0.22 + (self.pointer.x_frac - 0.5).abs() * 0.18,
        }
    }
}

impl Effect for BlobMorpher {
    fn name(&self) -> &'static str {
        "liquid blob"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.device = viewport.device;
    }

    fn update(&mut self, frame: FrameTime, input: &FrameInput) {
        self.device = input.device;
        self.pointer = match input.device {
            DeviceClass::Desktop => input.pointer,
            DeviceClass::Narrow => input.pointer.pinned(),
        };
        self.morph(
            frame.elapsed_secs(),
            self.pointer,
            input.device == DeviceClass::Desktop,
        );
    }

    fn paint(&self, grid: &mut CellGrid) {
        let vp = grid.viewport();
        if vp.is_empty() {
            return;
        }
        // fit the view box inside the viewport, centred
        let screen = Vec2::new(vp.width_px(), vp.height_px());
        let scale = (screen.x / VIEW_BOX.x).min(screen.y / VIEW_BOX.y);
        let origin = (screen - VIEW_BOX * scale) * 0.5;

        let outline = self.path().sample(SAMPLES_PER_SEGMENT);
        let hue = self.hue();
        let inner = hsl(hue, 1.0, 0.8);
        let outer = hsl(hue + 80.0, 0.8, 0.7);
        let glow = self.glow_opacity();
        let falloff = self.params.radius * 1.25;

        for row in 0..vp.rows {
            for col in 0..vp.cols {
                let (x, y) = vp.cell_center_px(col, row);
                let p = (Vec2::new(x, y) - origin) / scale;
                if contains(&outline, p) {
                    let t = (p.distance(self.params.center) / falloff).min(1.0);
                    let fill = mix(UMBER, mix(inner, outer, t), BLOB_OPACITY);
                    grid.set(col, row, '█', mix(fill, UMBER, OVERLAY_OPACITY));
                } else {
                    let edge = distance_to_outline(&outline, p);
                    if edge < GLOW_RADIUS {
                        let a = glow * (1.0 - edge / GLOW_RADIUS);
                        let ch = ramp(SHADE_CHARS, a / 0.4);
                        grid.set(col, row, ch, mix(UMBER, outer, a * 2.0));
                    }
                }
            }
        }
    }
}
