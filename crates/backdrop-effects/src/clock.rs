//! Frame clock driving the per-frame updates.

use std::time::Duration;

use crate::registry::{Registry, Subscription};

/// Nominal frame length the per-frame constants were tuned for.
pub const REFERENCE_FRAME: Duration = Duration::from_micros(16_667);

/// Timing handed to every effect for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Animation time since the first tick, speed scaling applied.
    pub elapsed: Duration,
    /// Animation time since the previous tick.
    pub delta: Duration,
}

impl FrameTime {
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Delta measured in reference frames; 1.0 at 60 fps.
    pub fn frame_scale(&self) -> f32 {
        self.delta.as_secs_f32() / REFERENCE_FRAME.as_secs_f32()
    }
}

/// Produces [`FrameTime`]s from a monotonic timestamp and tracks which
/// effects are subscribed to frames.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Option<Duration>,
    elapsed: Duration,
    time_scale: f64,
    frames: u64,
    subscribers: Registry,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            elapsed: Duration::ZERO,
            time_scale: 1.0,
            frames: 0,
            subscribers: Registry::new(),
        }
    }

    /// Register for frame callbacks until the guard is dropped.
    pub fn subscribe(&self) -> Subscription {
        self.subscribers.register()
    }

    /// Number of live frame subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Set the factor applied to wall-clock deltas.
    ///
    /// Elapsed time is accumulated, so changing the scale never makes the
    /// animation jump.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() {
            f64::from(scale.max(0.0))
        } else {
            1.0
        };
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance to `now` (a monotonic timestamp) and return the frame timing.
    ///
    /// The first tick has a zero delta. A timestamp earlier than the last one
    /// is treated as no time passing.
    pub fn tick(&mut self, now: Duration) -> FrameTime {
        let raw = match self.last_tick {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now.max(self.last_tick.unwrap_or(now)));
        let delta = raw.mul_f64(self.time_scale);
        self.elapsed += delta;
        self.frames += 1;
        FrameTime {
            elapsed: self.elapsed,
            delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(Duration::from_secs(5));
        assert_eq!(ft.delta, Duration::ZERO);
        assert_eq!(ft.elapsed, Duration::ZERO);
        let ft = clock.tick(Duration::from_millis(5_020));
        assert_eq!(ft.delta, Duration::from_millis(20));
        assert_eq!(ft.elapsed, Duration::from_millis(20));
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_backwards_time_saturates() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_millis(100));
        let ft = clock.tick(Duration::from_millis(50));
        assert_eq!(ft.delta, Duration::ZERO);
        let ft = clock.tick(Duration::from_millis(110));
        assert_eq!(ft.delta, Duration::from_millis(10));
    }

    #[test]
    fn test_time_scale_accumulates() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::ZERO);
        clock.set_time_scale(2.0);
        let ft = clock.tick(Duration::from_millis(100));
        assert_eq!(ft.elapsed, Duration::from_millis(200));
        clock.set_time_scale(0.5);
        let ft = clock.tick(Duration::from_millis(200));
        assert_eq!(ft.elapsed, Duration::from_millis(250));
    }

    #[test]
    fn test_subscriptions_are_counted() {
        let clock = FrameClock::new();
        let sub = clock.subscribe();
        assert_eq!(clock.subscriber_count(), 1);
        assert!(sub.is_active());
        drop(sub);
        assert_eq!(clock.subscriber_count(), 0);
    }

    #[test]
    fn test_frame_scale_is_one_at_reference_rate() {
        let ft = FrameTime {
            elapsed: Duration::ZERO,
            delta: REFERENCE_FRAME,
        };
        assert!((ft.frame_scale() - 1.0).abs() < 1e-4);
    }
}
