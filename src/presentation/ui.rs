use crate::application::{App, Focus};
use crate::domain::{CreatureCard, StatBar};
use crate::presentation::TerminalView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SPINNER_FRAMES: [&str; 10] = [
    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
];
const STAT_NAME_WIDTH: usize = 12;
const NEUTRAL_BADGE: Color = Color::DarkGray;

pub fn render_ui(f: &mut Frame, app: &App, view: &TerminalView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_search_row(f, app, view, chunks[1]);
    render_body(f, app, view, chunks[2]);
    render_status_bar(f, app, view, chunks[3]);

    if app.help_visible {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("dexcard - Creature Lookup | F1: help | Esc: quit")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_search_row(f: &mut Frame, app: &App, view: &TerminalView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    let input_border = if app.focus == Focus::Input {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(view.input_text.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Name or ID")
            .border_style(input_border),
    );
    f.render_widget(input, chunks[0]);

    let submit_style = match (view.submit_enabled, app.focus) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, Focus::Submit) => Style::default().fg(Color::Black).bg(Color::Yellow),
        (true, Focus::Input) => Style::default().fg(Color::Green),
    };
    let submit = Paragraph::new(" Search ")
        .style(submit_style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(submit, chunks[1]);

    if app.focus == Focus::Input && !app.help_visible {
        let x = chunks[0]
            .x
            .saturating_add(1)
            .saturating_add(cursor_column(&view.input_text, app.cursor_position));
        let max_x = chunks[0].x.saturating_add(chunks[0].width.saturating_sub(2));
        f.set_cursor_position((x.min(max_x), chunks[0].y.saturating_add(1)));
    }
}

fn render_body(f: &mut Frame, app: &App, view: &TerminalView, area: Rect) {
    if view.loading_visible {
        let spinner = SPINNER_FRAMES[app.tick % SPINNER_FRAMES.len()];
        let loading = Paragraph::new(format!("{} Loading...", spinner))
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, area);
        return;
    }

    if view.error_visible {
        let error = Paragraph::new(view.error_text.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Error"));
        f.render_widget(error, area);
        return;
    }

    match (&view.card, view.results_visible) {
        (Some(card), true) => render_card(f, card, area),
        _ => {
            let hint = Paragraph::new("Type a name or number and press Enter.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(hint, area);
        }
    }
}

fn render_card(f: &mut Frame, card: &CreatureCard, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bar_width = (inner.width as usize).saturating_sub(STAT_NAME_WIDTH + 6).max(1);
    let lines = card_lines(card, bar_width);
    f.render_widget(Paragraph::new(lines), inner);
}

fn card_lines(card: &CreatureCard, bar_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut title = vec![
        Span::styled(card.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  #{}", card.number), Style::default().fg(Color::Gray)),
        Span::raw("   "),
    ];
    for badge in &card.types {
        let bg = badge
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(NEUTRAL_BADGE);
        title.push(Span::styled(
            format!(" {} ", badge.label),
            Style::default().fg(Color::Black).bg(bg),
        ));
        title.push(Span::raw(" "));
    }
    lines.push(Line::from(title));
    lines.push(Line::from(""));

    let artwork = card.image_url.clone().unwrap_or_else(|| "none".to_string());
    lines.push(detail_line("Artwork", artwork));
    lines.push(detail_line("Height", format!("{} m", card.height_m)));
    lines.push(detail_line("Weight", format!("{} kg", card.weight_kg)));
    let experience = card
        .base_experience
        .map(|xp| xp.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    lines.push(detail_line("Base Experience", experience));

    let mut abilities = vec![Span::styled(
        format!("{:<17}", "Abilities"),
        Style::default().fg(Color::Yellow),
    )];
    for (i, ability) in card.abilities.iter().enumerate() {
        if i > 0 {
            abilities.push(Span::raw(", "));
        }
        if ability.hidden {
            abilities.push(Span::styled(
                format!("{} (hidden)", ability.label),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        } else {
            abilities.push(Span::raw(ability.label.clone()));
        }
    }
    lines.push(Line::from(abilities));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Base Stats",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for stat in &card.stats {
        lines.push(stat_line(stat, bar_width));
    }

    lines
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<17}", label), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn stat_line(stat: &StatBar, bar_width: usize) -> Line<'static> {
    let filled = filled_cells(stat.percentage, bar_width);
    Line::from(vec![
        Span::raw(format!("{:<width$}", stat.name, width = STAT_NAME_WIDTH)),
        Span::raw(format!("{:>4} ", stat.value)),
        Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Display columns taken by the first `cursor` characters of `input`.
///
/// Wide characters count twice; the result saturates at `u16::MAX`.
pub fn cursor_column(input: &str, cursor: usize) -> u16 {
    let before: String = input.chars().take(cursor).collect();
    u16::try_from(Span::raw(before).width()).unwrap_or(u16::MAX)
}

/// Number of bar cells to fill. The percentage itself may exceed 100 or
/// drop below 0; the drawn bar is clipped to its width like an overflowing
/// box.
pub fn filled_cells(percentage: f64, width: usize) -> usize {
    if !percentage.is_finite() || percentage <= 0.0 {
        return 0;
    }
    let cells = (percentage / 100.0 * width as f64).round();
    (cells as usize).min(width)
}

/// Parses `#RRGGBB` into a terminal color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn render_status_bar(f: &mut Frame, app: &App, view: &TerminalView, area: Rect) {
    let text = if app.help_visible {
        "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/F1: close help".to_string()
    } else if view.loading_visible {
        format!("Looking up \"{}\"...", view.input_text.trim())
    } else {
        "Enter: search | Tab: switch focus | Ctrl+U: clear | F1: help | Esc: quit".to_string()
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(if view.loading_visible {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("dexcard Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub const HELP_TEXT: &str = r#"DEXCARD CREATURE LOOKUP

=== SEARCHING ===
Type a creature name (pikachu) or national number (25).
Input is trimmed and lower-cased before the request is sent.
Enter           Search from the input field
Tab             Switch focus between the input and the Search button
Enter/Space     Press the Search button (disabled while loading)
Ctrl+U          Clear the input field

=== EDITING ===
←/→             Move the cursor
Home/End        Jump to start/end of the input
Backspace/Del   Delete characters

=== THE CARD ===
#NNN            Number, zero-padded to three digits
Types           Colored badges (gray for unrecognized types)
Height/Weight   Meters and kilograms, one decimal place
Base Stats      Bars scaled against 255

=== ERRORS ===
Empty input     Nothing is sent; enter a name or ID first
Not found       The service has no entry for that name or number
Fetch failed    Network trouble or an unexpected reply; try again

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1          Close this help window

Esc or Ctrl+C   Quit"#;
