//! Colour helpers shared by the effects.

use ratatui::style::Color;

/// Colour from a `0xRRGGBB` literal.
pub const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Convert HSL (hue in degrees, saturation and lightness in `0..=1`) to RGB.
///
/// Hue wraps, so `-30.0` and `330.0` are the same colour.
pub fn hsl(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    Color::Rgb(channel(r + m), channel(g + m), channel(b + m))
}

fn channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn rgb(color: Color) -> Option<(f32, f32, f32)> {
    match color {
        Color::Rgb(r, g, b) => Some((r as f32, g as f32, b as f32)),
        Color::White => Some((255.0, 255.0, 255.0)),
        Color::Black | Color::Reset => Some((0.0, 0.0, 0.0)),
        _ => None,
    }
}

/// Blend `over` onto `under` with opacity `alpha`.
///
/// Named palette colours other than black/white cannot be blended and
/// fall back to whichever side dominates.
pub fn mix(under: Color, over: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (rgb(under), rgb(over)) {
        (Some((r0, g0, b0)), Some((r1, g1, b1))) => Color::Rgb(
            channel((r0 + (r1 - r0) * alpha) / 255.0),
            channel((g0 + (g1 - g0) * alpha) / 255.0),
            channel((b0 + (b1 - b0) * alpha) / 255.0),
        ),
        _ if alpha >= 0.5 => over,
        _ => under,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
        assert_eq!(hsl(-120.0, 1.0, 0.5), hsl(240.0, 1.0, 0.5));
        assert_eq!(hsl(42.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_mix_endpoints() {
        let a = hex(0x102030);
        let b = hex(0xF0E0D0);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(Color::Black, Color::White, 0.5), Color::Rgb(128, 128, 128));
    }
}
