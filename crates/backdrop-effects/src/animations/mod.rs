//! Effect implementations.

pub mod blob;
pub mod card;
pub mod hero3d;
pub mod parallax;
pub mod particles;
pub mod ripple;
pub mod trail;
pub mod wave;

use backdrop_core::Viewport;

use crate::clock::FrameTime;
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

/// A background effect owned by the scene and driven once per frame.
pub trait Effect {
    fn name(&self) -> &'static str;

    /// Viewport changed (or first mount).
    fn resize(&mut self, viewport: Viewport);

    /// Advance the simulation by one frame.
    fn update(&mut self, frame: FrameTime, input: &FrameInput);

    /// Draw the current state.
    fn paint(&self, grid: &mut CellGrid);
}
