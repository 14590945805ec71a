//! Pointer position snapshot.

/// Pointer position as seen by the effects during one frame.
///
/// Fractions are relative to the viewport and always lie in `[0, 1]`.
/// Client coordinates are in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x_frac: f32,
    pub y_frac: f32,
    pub client_x: i32,
    pub client_y: i32,
    /// Set once any pointer or touch sample has been received.
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::centered()
    }
}

impl PointerState {
    /// Neutral pointer at the viewport centre.
    pub const fn centered() -> Self {
        Self {
            x_frac: 0.5,
            y_frac: 0.5,
            client_x: 0,
            client_y: 0,
            active: false,
        }
    }

    /// Build a pointer from fractions, clamping them into `[0, 1]`.
    ///
    /// NaN collapses to the centre.
    pub fn from_fractions(x_frac: f32, y_frac: f32) -> Self {
        Self {
            x_frac: clamp_frac(x_frac),
            y_frac: clamp_frac(y_frac),
            ..Self::centered()
        }
    }

    /// The same pointer with its fractions pinned to the centre.
    pub fn pinned(self) -> Self {
        Self {
            x_frac: 0.5,
            y_frac: 0.5,
            ..self
        }
    }

    /// Signed offset of the pointer from the centre, in `[-0.5, 0.5]`.
    pub fn offset_from_center(&self) -> (f32, f32) {
        (self.x_frac - 0.5, self.y_frac - 0.5)
    }
}

fn clamp_frac(v: f32) -> f32 {
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_are_clamped() {
        let p = PointerState::from_fractions(-3.0, 7.5);
        assert_eq!((p.x_frac, p.y_frac), (0.0, 1.0));
        let p = PointerState::from_fractions(f32::NAN, 0.25);
        assert_eq!((p.x_frac, p.y_frac), (0.5, 0.25));
    }

    #[test]
    fn test_pinned_keeps_client_position() {
        let p = PointerState {
            x_frac: 0.9,
            y_frac: 0.1,
            client_x: 40,
            client_y: 12,
            active: true,
        }
        .pinned();
        assert_eq!(p.offset_from_center(), (0.0, 0.0));
        assert_eq!((p.client_x, p.client_y, p.active), (40, 12, true));
    }
}
