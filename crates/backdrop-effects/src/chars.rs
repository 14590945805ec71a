//! Character ramps for the effects.

/// Star glyphs from smallest to largest apparent size.
pub const STAR_CHARS: &[char] = &['·', '•', '✦', '✸'];

/// Fill density ramp, light to solid.
pub const SHADE_CHARS: &[char] = &['░', '▒', '▓', '█'];

/// Wave grid dots from far to near.
pub const DOT_CHARS: &[char] = &['·', '•', '●'];

/// Trail glyphs as a particle grows while fading.
pub const TRAIL_CHARS: &[char] = &['•', '●', '◉', '◯'];

/// Pick from a ramp by a value in `0..=1`.
pub fn ramp(chars: &[char], t: f32) -> char {
    let last = chars.len().saturating_sub(1);
    let idx = (t.clamp(0.0, 1.0) * chars.len() as f32) as usize;
    chars[idx.min(last)]
}
