//! Text drawn over the effect: countdown banner and key help.

use backdrop_core::{Countdown, EffectStyle};
use backdrop_fonts::{GLYPH_HEIGHT, build_countdown_art, build_unit_labels};
use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

/// Countdown banner contents.
#[derive(Debug, Clone)]
pub struct Banner<'a> {
    pub countdown: Countdown,
    pub label: &'a str,
    pub now: NaiveDateTime,
}

/// Split `area` into the banner block (centred) and the help line (bottom).
fn layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),                   // label
        Constraint::Length(1),                   // spacing
        Constraint::Length(GLYPH_HEIGHT as u16), // big digits
        Constraint::Length(1),                   // unit captions
        Constraint::Fill(1),
        Constraint::Length(1), // help
    ])
    .split(area);
    (chunks[1], chunks[3], chunks[4], chunks[6])
}

/// Draw the countdown banner centred in `area`.
pub fn render_banner(frame: &mut Frame, area: Rect, banner: &Banner<'_>, color: Color) {
    let (label_area, digits_area, units_area, _) = layout(area);
    let left = banner.countdown.remaining(banner.now);

    let label = if banner.countdown.is_over(banner.now) {
        "It has begun".to_string()
    } else {
        banner.label.to_string()
    };
    frame.render_widget(
        Paragraph::new(label)
            .style(Style::new().fg(color).bold())
            .alignment(Alignment::Center),
        label_area,
    );

    let digits: Vec<Line> = build_countdown_art(&left)
        .into_iter()
        .map(|s| Line::from(s).style(Style::new().fg(color)))
        .collect();
    frame.render_widget(
        Paragraph::new(digits).alignment(Alignment::Center),
        digits_area,
    );

    frame.render_widget(
        Paragraph::new(build_unit_labels(&left))
            .style(Style::new().fg(color))
            .alignment(Alignment::Center),
        units_area,
    );
}

/// Draw the key help on the bottom line of `area`.
pub fn render_help(frame: &mut Frame, area: Rect, style: EffectStyle, color: Color) {
    let (_, _, _, help_area) = layout(area);
    let help = Line::from(vec![
        "q".bold().fg(color),
        " quit  ".dark_gray(),
        "e".bold().fg(color),
        format!(" effect ({})  ", style.name()).dark_gray(),
        "s".bold().fg(color),
        " speed  ".dark_gray(),
        "c".bold().fg(color),
        " color  ".dark_gray(),
        "t".bold().fg(color),
        " countdown".dark_gray(),
    ])
    .centered();
    frame.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn test_banner_shows_label_and_units() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        let banner = Banner {
            countdown: Countdown::new(at(6, 9)),
            label: "Doors open in",
            now: at(1, 9),
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_banner(frame, area, &banner, Color::White);
                render_help(frame, area, EffectStyle::Starfield, Color::White);
            })
            .expect("draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("Doors open in"));
        assert!(text.contains("DAYS"));
        assert!(text.contains("SECONDS"));
        assert!(text.contains("starfield"));
    }

    #[test]
    fn test_banner_after_target() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        let banner = Banner {
            countdown: Countdown::new(at(6, 9)),
            label: "Doors open in",
            now: at(7, 9),
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_banner(frame, area, &banner, Color::White);
            })
            .expect("draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("It has begun"));
        assert!(!text.contains("Doors open in"));
    }
}
