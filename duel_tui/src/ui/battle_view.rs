//! Battle screen: stat panels, battle log and command line

use super::{draw_keybindings, draw_title, snapshot_lines};
use crate::battle::BattleView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, view: &BattleView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title bar
            Constraint::Length(12), // Stat panels
            Constraint::Min(5),     // Battle log
            Constraint::Length(5),  // Command line
            Constraint::Length(3),  // Keybindings footer
        ])
        .split(area);

    draw_title(f, &format!("{} - Turn {}", view.mode, view.turn), chunks[0]);
    draw_panels(f, view, chunks[1]);
    draw_log(f, view, chunks[2]);
    draw_command(f, view, chunks[3]);

    let keys = if view.command.is_some() {
        vec![
            ("a/d/s/w", "Attack/Defend/Search/Weaken"),
            ("Enter", "Act"),
            ("↑/↓", "Scroll log"),
            ("Esc", "Quit"),
        ]
    } else {
        vec![
            ("any", "Next turn"),
            ("f", "Fast-forward"),
            ("↑/↓", "Scroll log"),
            ("Esc", "Quit"),
        ]
    };
    draw_keybindings(f, &keys, chunks[4]);
}

fn draw_panels(f: &mut Frame, view: &BattleView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let Some((left, right)) = &view.panels else {
        return;
    };

    for (snapshot, chunk) in [(left, chunks[0]), (right, chunks[1])] {
        let title_style = if snapshot.is_alive() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        let paragraph = Paragraph::new(snapshot_lines(snapshot, chunk.width)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", snapshot.name), title_style)),
        );
        f.render_widget(paragraph, chunk);
    }
}

fn log_style(line: &str) -> Style {
    if line.starts_with("━━━") {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if line.contains("has slain") || line.contains("has fallen") {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if line.contains("steps forward") {
        Style::default().fg(Color::Magenta)
    } else if line.contains("attacks!") {
        Style::default().fg(Color::Red)
    } else if line.contains("defends!") {
        Style::default().fg(Color::Blue)
    } else if line.contains("weakens") {
        Style::default().fg(Color::Magenta)
    } else if line.contains("found") || line.contains("highground") {
        Style::default().fg(Color::Yellow)
    } else if line.contains("Invalid Action") {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_log(f: &mut Frame, view: &BattleView, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    // keep the scrolled-to line at the bottom of the panel
    let start = (view.log_scroll + 1).saturating_sub(height);

    let items: Vec<ListItem> = view
        .log
        .iter()
        .skip(start)
        .take(height)
        .map(|line| ListItem::new(Line::from(Span::styled(line.clone(), log_style(line)))))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Battle Log (↑/↓ to scroll) "),
    );

    f.render_widget(list, area);
}

fn draw_command(f: &mut Frame, view: &BattleView, area: Rect) {
    let lines = match &view.command {
        Some(command) => {
            let mut lines = Vec::new();
            if let Some(previous) = &command.previous {
                lines.push(Line::from(vec![
                    Span::styled("Last move: ", Style::default().fg(Color::Gray)),
                    Span::styled(previous.clone(), log_style(previous)),
                ]));
            }
            match &command.rejected {
                Some(rejected) => lines.push(Line::from(Span::styled(
                    format!("INVALID INPUT! '{rejected}' is not an action. Try again."),
                    Style::default().fg(Color::Red),
                ))),
                None => lines.push(Line::from(Span::styled(
                    format!(
                        "{}'s actions: Attack (A), Defend (D), Search (S), Weaken (W)",
                        command.actor
                    ),
                    Style::default().fg(Color::Gray),
                ))),
            }
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Yellow)),
                Span::styled(command.input.clone(), Style::default().fg(Color::White)),
                Span::styled("_", Style::default().fg(Color::DarkGray)),
            ]));
            lines
        }
        None => vec![Line::from(Span::styled(
            view.hint,
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Command "));
    f.render_widget(paragraph, area);
}
