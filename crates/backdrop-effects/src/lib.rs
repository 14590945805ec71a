//! Procedural background effects for backdrop.
//!
//! Every effect is an owned simulation driven once per frame by a
//! [`Scene`]: a drifting starfield, a morphing liquid blob, stacked
//! parallax layers (with a cursor trail, click ripples and a tilting hero
//! card), a tilting wave grid and a spinning sphere in a particle cloud. Pointer input is sampled by a throttled [`PointerTracker`]
//! and handed to the effects as a per-frame snapshot. Mounting an effect
//! registers it with the [`FrameClock`] and the tracker; the returned
//! guards deregister it when the effect is dropped.

mod animations;
mod camera;
mod chars;
mod clock;
mod color;
mod grid;
mod pointer;
mod registry;
mod scene;

pub use animations::{
    Effect,
    blob::{BlobMorpher, BlobParams, BlobPath, Harmonic, QuadSegment, Wave},
    card::{HeroCard, card_tilt},
    hero3d::Hero3D,
    parallax::{ParallaxLayer, ParallaxLayerStack},
    particles::{Bounds, ParticleColor, ParticleField, Star},
    ripple::{ActiveRipple, Ripple},
    trail::{ParticleTrail, TrailParticle},
    wave::{GridDot, WaveGrid},
};
pub use camera::PerspectiveCamera;
pub use clock::{FrameClock, FrameTime, REFERENCE_FRAME};
pub use color::{hex, hsl, mix};
pub use grid::{Cell, CellGrid};
pub use pointer::{Click, DEFAULT_THROTTLE, FrameInput, PointerTracker};
pub use registry::{Registry, Subscription};
pub use scene::{Scene, SceneOptions};
