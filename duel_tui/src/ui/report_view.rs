//! Game over screen

use super::{section, snapshot_lines};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(report) = &app.report else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let mut lines: Vec<Line> = report
        .headline
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    lines.push(Line::from(format!("Total turns: {}", report.total_turns)));
    if let Some(enemies) = report.enemies_encountered {
        lines.push(Line::from(format!("Enemies encountered: {enemies}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Thanks for playing!",
        Style::default().fg(Color::Yellow),
    )));

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Result "));
    f.render_widget(summary, chunks[0]);

    let constraints: Vec<Constraint> = report
        .finals
        .iter()
        .map(|_| Constraint::Ratio(1, report.finals.len() as u32))
        .collect();
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(chunks[1]);

    for (snapshot, panel) in report.finals.iter().zip(panels.iter()) {
        let mut lines = vec![section("Final Stats")];
        lines.extend(snapshot_lines(snapshot, panel.width));
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", snapshot.name)),
        );
        f.render_widget(paragraph, *panel);
    }
}
