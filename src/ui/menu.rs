use ratatui::prelude::*;
use ratatui::widgets::*;

use onslaught::config::{GAME_TITLE, PLAYER_NAME_MAX_LENGTH};
use onslaught::input::ControlScheme;
use onslaught::scores::{LeaderboardStore, ScoreEntry};

use crate::app::App;

const BANNER: &str = r#"
  ___   _   _      _   ___ _____ ___ ___
 / __| /_\ | |    /_\ / __|_   _|_ _/ __|
| (_ |/ _ \| |__ / _ \ (__  | |  | | (__
 \___/_/ \_\____/_/ \_\___| |_| |___\___|
    ___  _ __  ___ _      _   _   _  ___ _  _ _____
   / _ \| '_ \/ __| |    /_\ | | | |/ __| || |_   _|
  | (_) | | | \__ \ |__ / _ \| |_| | (_ | __ | | |
   \___/|_| |_|___/____/_/ \_\\___/ \___|_||_| |_|"#;

const ACCENT: Color = Color::Rgb(255, 220, 80);
const KEY: Color = Color::Rgb(80, 200, 255);
const DIM: Color = Color::Rgb(140, 140, 140);
const PANEL_BG: Color = Color::Rgb(15, 15, 25);

pub fn render_menu<B: LeaderboardStore>(frame: &mut Frame, area: Rect, app: &App<B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(10), // Name + controls
            Constraint::Min(0),     // Best scores
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 255, 80)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_name_entry(frame, cols[0], &app.name_buffer, app.scheme);
    render_controls(frame, cols[1]);

    render_best(frame, chunks[2], &app.best, app.board_error.as_deref());

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" start  ", Style::default().fg(DIM)),
        Span::styled("Tab", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" controls  ", Style::default().fg(DIM)),
        Span::styled("Esc", Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(" quit", Style::default().fg(DIM)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

fn render_name_entry(frame: &mut Frame, area: Rect, name_buffer: &str, scheme: ControlScheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {GAME_TITLE} "))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Typed chars + underscores for the rest
    let typed_len = name_buffer.chars().count();
    let remaining = PLAYER_NAME_MAX_LENGTH.saturating_sub(typed_len);
    let display_name = format!("{}{}", name_buffer, "_".repeat(remaining));

    let scheme_span = |s: ControlScheme| {
        let style = if s == scheme {
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        Span::styled(format!(" {} ", s.label()), style)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Enter your name:", Style::default().fg(Color::Rgb(180, 180, 200)))),
        Line::from(vec![
            Span::styled("    [ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(display_name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Controls:", Style::default().fg(Color::Rgb(180, 180, 200)))),
        Line::from(vec![
            Span::raw("    "),
            scheme_span(ControlScheme::Arrows),
            Span::raw("  "),
            scheme_span(ControlScheme::Wasd),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let row = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {key:<12}"), Style::default().fg(KEY)),
            Span::styled(what, Style::default().fg(DIM)),
        ])
    };
    let controls = Paragraph::new(vec![
        Line::from(""),
        row("Move", "Arrows or WASD"),
        row("Space", "Shoot"),
        row("F", "Normal / Powered"),
        row("P", "Pause / Unpause"),
        row("B", "Boss screen"),
        row("R", "Menu, after the game"),
        row("Ctrl+C", "Quit"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" Controls ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, area);
}

fn render_best(frame: &mut Frame, area: Rect, best: &[ScoreEntry], error: Option<&str>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" High Scores ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let medal_colors = [
        Color::Rgb(255, 215, 0),   // Gold
        Color::Rgb(192, 192, 192), // Silver
        Color::Rgb(205, 127, 50),  // Bronze
    ];

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("  Leaderboard unavailable: {error}"),
            Style::default().fg(Color::Red),
        )));
    } else if best.is_empty() {
        lines.push(Line::from(Span::styled("  No scores yet", Style::default().fg(Color::Rgb(60, 60, 80)))));
    }
    for (rank, entry) in best.iter().enumerate() {
        let color = medal_colors.get(rank).copied().unwrap_or(Color::Rgb(200, 200, 220));
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>2}. ", rank + 1), Style::default().fg(DIM)),
            Span::styled(format!("{:<10} ", entry.name), Style::default().fg(Color::Rgb(200, 200, 220))),
            Span::styled(entry.score.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}
