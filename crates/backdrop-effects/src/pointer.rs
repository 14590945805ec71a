//! Pointer tracking with throttled sampling.

use std::time::Duration;

use backdrop_core::{DeviceClass, PointerState, Viewport};

use crate::registry::{Registry, Subscription};

/// Default minimum spacing between accepted pointer samples (~60 Hz).
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(16);

/// A click in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub x: f32,
    pub y: f32,
}

/// Everything an effect reads from the input side during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer as of the start of the frame, pinned to centre on narrow devices.
    pub pointer: PointerState,
    pub device: DeviceClass,
    /// Clicks received since the previous frame.
    pub clicks: Vec<Click>,
}

/// Samples terminal mouse input into a [`PointerState`].
///
/// Input is only delivered while at least one listener is registered,
/// mirroring a page that only listens while an effect is mounted.
#[derive(Debug)]
pub struct PointerTracker {
    state: PointerState,
    viewport: Viewport,
    throttle: Duration,
    last_accepted: Option<Duration>,
    clicks: Vec<Click>,
    listeners: Registry,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE)
    }
}

impl PointerTracker {
    pub fn new(throttle: Duration) -> Self {
        Self {
            state: PointerState::centered(),
            viewport: Viewport::default(),
            throttle,
            last_accepted: None,
            clicks: Vec::new(),
            listeners: Registry::new(),
        }
    }

    /// Subscribe to input events until the guard is dropped.
    pub fn listen(&self) -> Subscription {
        self.listeners.register()
    }

    /// Number of live input listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn device(&self) -> DeviceClass {
        self.viewport.device
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Pointer moved over the cell at `(col, row)` at monotonic time `now`.
    ///
    /// Returns whether the sample was accepted. Samples closer than the
    /// throttle window to the last accepted one are dropped. Narrow devices
    /// do not track hover.
    pub fn on_move(&mut self, col: u16, row: u16, now: Duration) -> bool {
        if self.listeners.is_empty() || self.viewport.device.is_narrow() {
            return false;
        }
        if let Some(last) = self.last_accepted
            && now.saturating_sub(last) < self.throttle
        {
            return false;
        }
        self.last_accepted = Some(now);

        let (x, y) = self.viewport.cell_center_px(col, row);
        let width = self.viewport.width_px().max(1.0);
        let height = self.viewport.height_px().max(1.0);
        self.state = PointerState {
            client_x: x as i32,
            client_y: y as i32,
            active: true,
            ..PointerState::from_fractions(x / width, y / height)
        };
        true
    }

    /// Touch dragged over `(col, row)`.
    ///
    /// Touch only moves the client position (for the cursor trail); the
    /// fractions that drive parallax stay where they are.
    pub fn on_touch(&mut self, col: u16, row: u16) -> bool {
        if self.listeners.is_empty() || !self.viewport.device.is_narrow() {
            return false;
        }
        let (x, y) = self.viewport.cell_center_px(col, row);
        self.state.client_x = x as i32;
        self.state.client_y = y as i32;
        self.state.active = true;
        true
    }

    /// Click or tap on `(col, row)`, queued until the next frame.
    pub fn on_click(&mut self, col: u16, row: u16) {
        if self.listeners.is_empty() {
            return;
        }
        let (x, y) = self.viewport.cell_center_px(col, row);
        self.clicks.push(Click { x, y });
    }

    /// Pointer as consumers see it; pinned to centre on narrow devices.
    pub fn snapshot(&self) -> PointerState {
        if self.viewport.device.is_narrow() {
            self.state.pinned()
        } else {
            self.state
        }
    }

    /// Snapshot the pointer and drain pending clicks for a new frame.
    pub fn begin_frame(&mut self) -> FrameInput {
        FrameInput {
            pointer: self.snapshot(),
            device: self.viewport.device,
            clicks: std::mem::take(&mut self.clicks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Viewport {
        Viewport::new(120, 40)
    }

    #[test]
    fn test_move_normalizes_to_fractions() {
        let mut tracker = PointerTracker::default();
        let _listener = tracker.listen();
        tracker.resize(desktop());
        assert!(tracker.on_move(0, 0, Duration::ZERO));
        let p = tracker.snapshot();
        assert!(p.x_frac > 0.0 && p.x_frac < 0.01);
        assert!(p.y_frac > 0.0 && p.y_frac < 0.02);
        assert!(p.active);

        assert!(tracker.on_move(119, 39, Duration::from_millis(100)));
        let p = tracker.snapshot();
        assert!(p.x_frac > 0.99 && p.x_frac <= 1.0);
        assert!(p.y_frac > 0.98 && p.y_frac <= 1.0);
        assert_eq!((p.client_x, p.client_y), (956, 632));
    }

    #[test]
    fn test_throttle_drops_samples_inside_window() {
        let mut tracker = PointerTracker::new(Duration::from_millis(16));
        let _listener = tracker.listen();
        tracker.resize(desktop());
        assert!(tracker.on_move(10, 10, Duration::from_millis(1000)));
        assert!(!tracker.on_move(60, 20, Duration::from_millis(1010)));
        // the dropped sample is not queued
        let p = tracker.snapshot();
        assert_eq!(p.client_x, 84);
        assert!(tracker.on_move(60, 20, Duration::from_millis(1016)));
        assert_eq!(tracker.snapshot().client_x, 484);
    }

    #[test]
    fn test_no_delivery_without_listener() {
        let mut tracker = PointerTracker::default();
        tracker.resize(desktop());
        assert!(!tracker.on_move(5, 5, Duration::ZERO));
        tracker.on_click(5, 5);
        assert!(tracker.begin_frame().clicks.is_empty());
        assert_eq!(tracker.snapshot(), PointerState::centered());
    }

    #[test]
    fn test_narrow_device_pins_pointer() {
        let mut tracker = PointerTracker::default();
        let _listener = tracker.listen();
        tracker.resize(Viewport::new(60, 20));
        assert!(!tracker.on_move(0, 0, Duration::ZERO));
        assert!(tracker.on_touch(3, 4));
        let input = tracker.begin_frame();
        assert_eq!(input.device, DeviceClass::Narrow);
        assert_eq!(input.pointer.offset_from_center(), (0.0, 0.0));
        assert_eq!((input.pointer.client_x, input.pointer.client_y), (28, 72));
        assert!(input.pointer.active);
    }

    #[test]
    fn test_clicks_drain_once() {
        let mut tracker = PointerTracker::default();
        let _listener = tracker.listen();
        tracker.resize(desktop());
        tracker.on_click(1, 1);
        tracker.on_click(2, 2);
        assert_eq!(tracker.begin_frame().clicks.len(), 2);
        assert!(tracker.begin_frame().clicks.is_empty());
    }
}
