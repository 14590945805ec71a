//! Core types shared across the backdrop crates.

mod countdown;
mod effect;
mod pointer;
mod theme;
mod viewport;

pub use countdown::{Countdown, TimeLeft};
pub use effect::{AnimationSpeed, EffectStyle};
pub use pointer::PointerState;
pub use theme::ColorTheme;
pub use viewport::{
    CELL_HEIGHT_PX, CELL_WIDTH_PX, DEFAULT_NARROW_BREAKPOINT_COLS, DeviceClass, Viewport,
};
