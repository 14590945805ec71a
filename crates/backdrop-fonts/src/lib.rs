//! Block glyph fonts for the backdrop countdown banner.

use backdrop_core::TimeLeft;

/// Height of every glyph in rows.
pub const GLYPH_HEIGHT: usize = 5;

/// Half-block digits (5 lines tall, 5 chars wide).
pub const DIGITS: [[&str; GLYPH_HEIGHT]; 10] = [
    // 0
    ["▄▀▀▀▄", "█  ▄█", "█ ▀ █", "█▀  █", "▀▄▄▄▀"],
    // 1
    [" ▄█  ", "▀ █  ", "  █  ", "  █  ", "▄▄█▄▄"],
    // 2
    ["▄▀▀▀▄", "    █", " ▄▄▀ ", "▄▀   ", "█▄▄▄▄"],
    // 3
    ["▄▀▀▀▄", "    █", "  ▀▀▄", "    █", "▀▄▄▄▀"],
    // 4
    ["   ▄█", "  ▀ █", "▄▀  █", "▀▀▀▀█", "    █"],
    // 5
    ["█▀▀▀▀", "█▄▄▄ ", "    █", "    █", "▀▄▄▄▀"],
    // 6
    [" ▄▀▀ ", "█    ", "█▀▀▀▄", "█   █", "▀▄▄▄▀"],
    // 7
    ["▀▀▀▀█", "   ▄▀", "  ▄▀ ", "  █  ", "  █  "],
    // 8
    ["▄▀▀▀▄", "█   █", "▄▀▀▀▄", "█   █", "▀▄▄▄▀"],
    // 9
    ["▄▀▀▀▄", "█   █", "▀▄▄▄█", "    █", " ▄▄▀ "],
];

/// Unit separator (5 lines tall, 1 char wide).
pub const SEPARATOR: [&str; GLYPH_HEIGHT] = [" ", "▪", " ", "▪", " "];

/// Captions printed under each unit group.
pub const UNIT_LABELS: [&str; 4] = ["DAYS", "HOURS", "MINUTES", "SECONDS"];

/// Append the glyphs of a number, zero padded to at least two digits.
fn push_number(line: &mut String, value: u32, row: usize) {
    let digits = format!("{value:02}");
    for (i, d) in digits.bytes().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(DIGITS[(d - b'0') as usize][row]);
    }
}

/// Width in chars of a two-or-more digit group.
fn group_width(value: u32) -> usize {
    let n = format!("{value:02}").len();
    n * 5 + (n - 1)
}

/// Build the countdown banner as `DD ▪ HH ▪ MM ▪ SS`.
///
/// Days grow past two digits when needed; the other units are always two.
pub fn build_countdown_art(left: &TimeLeft) -> Vec<String> {
    let units = [left.days, left.hours, left.minutes, left.seconds];
    (0..GLYPH_HEIGHT)
        .map(|row| {
            let mut line = String::new();
            for (i, value) in units.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                    line.push_str(SEPARATOR[row]);
                    line.push(' ');
                }
                push_number(&mut line, *value, row);
            }
            line
        })
        .collect()
}

/// Caption line aligned under the groups produced by [`build_countdown_art`].
pub fn build_unit_labels(left: &TimeLeft) -> String {
    let units = [left.days, left.hours, left.minutes, left.seconds];
    let mut line = String::new();
    for (i, (value, label)) in units.iter().zip(UNIT_LABELS).enumerate() {
        if i > 0 {
            line.push_str("   ");
        }
        let width = group_width(*value);
        line.push_str(&format!("{label:^width$}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_glyphs_are_rectangular() {
        for glyph in DIGITS {
            for row in glyph {
                assert_eq!(width(row), 5);
            }
        }
    }

    #[test]
    fn test_art_rows_have_equal_width() {
        let left = TimeLeft {
            days: 123,
            hours: 4,
            minutes: 5,
            seconds: 59,
        };
        let art = build_countdown_art(&left);
        assert_eq!(art.len(), GLYPH_HEIGHT);
        let w = width(&art[0]);
        assert!(art.iter().all(|row| width(row) == w));
        // three digit days + three two digit groups + separators
        assert_eq!(w, 17 + 3 * 11 + 3 * 3);
        assert_eq!(width(&build_unit_labels(&left)), w);
    }
}
