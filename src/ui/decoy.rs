use ratatui::prelude::*;
use ratatui::widgets::*;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Plain spreadsheet shown in place of the game. Nothing on it moves.
pub fn render_decoy(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" budget_q3_final_v2.csv ")
        .style(Style::default().fg(Color::Gray).bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let rows: Vec<Row> = ledger_rows()
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(Cell::from)))
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(Row::new(vec!["Month", "Revenue", "Costs", "Net"]).style(Style::default().add_modifier(Modifier::UNDERLINED)))
    .column_spacing(2);
    frame.render_widget(table, chunks[0]);

    frame.render_widget(
        Paragraph::new(" Ready").style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Made-up but self-consistent figures: net is always revenue minus costs.
fn ledger_rows() -> Vec<[String; 4]> {
    MONTHS
        .iter()
        .zip(0u32..)
        .map(|(month, i)| {
            let revenue = 41_200 + i * 1_375 + (i * 7 % 5) * 610;
            let costs = 33_900 + i * 940 + (i * 3 % 4) * 455;
            let net = i64::from(revenue) - i64::from(costs);
            [
                month.to_string(),
                format!("{revenue:>10}"),
                format!("{costs:>10}"),
                format!("{net:>10}"),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_covers_a_year_and_adds_up() {
        let rows = ledger_rows();
        assert_eq!(rows.len(), 12);
        for [_, revenue, costs, net] in rows {
            let parse = |s: &str| s.trim().parse::<i64>().unwrap();
            assert_eq!(parse(&revenue) - parse(&costs), parse(&net));
        }
    }
}
