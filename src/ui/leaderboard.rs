use ratatui::prelude::*;
use ratatui::widgets::*;

use onslaught::game::Session;
use onslaught::scores::LEADERBOARD_SIZE;

use super::centered;

pub fn render_leaderboard(frame: &mut Frame, area: Rect, session: &Session) {
    let rect = centered(area, 44, LEADERBOARD_SIZE as u16 + 8);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" Leaderboard ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    let entries = session.leaderboard().unwrap_or_default();
    let player = session.player_name();
    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let style = if entry.name == player {
                Style::default().fg(Color::Black).bg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(200, 200, 220))
            };
            Row::new(vec![
                Cell::from(format!("{}", rank + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(entry.score.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(6), Constraint::Min(12), Constraint::Length(8)],
    )
    .header(
        Row::new(vec!["Rank", "Name", "Score"])
            .style(Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .column_spacing(2);
    frame.render_widget(table, chunks[0]);

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("R", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to return to Menu", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(prompt, chunks[1]);
}
