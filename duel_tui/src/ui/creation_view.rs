//! Character creation: name, stat choice, allocation and confirmation

use super::{section, snapshot_lines};
use crate::app::{App, Screen, StatField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut lines = match app.screen {
        Screen::Naming => naming_lines(app),
        Screen::ChooseStats => choice_lines(app),
        Screen::Allocate => allocation_lines(app),
        _ => confirm_lines(app),
    };

    if let Some(notice) = &app.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Create "));
    f.render_widget(paragraph, chunks[0]);

    draw_preview(f, app, chunks[1]);
}

fn naming_lines(app: &App) -> Vec<Line<'static>> {
    vec![
        Line::from("What is the name of your character?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::styled(app.name_input.clone(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
    ]
}

fn choice_lines(app: &App) -> Vec<Line<'static>> {
    let options = ["No, use the recommended preset", "Yes, spend the points myself"];
    let mut lines = vec![
        Line::from(format!(
            "Would you like to choose {}'s stats?",
            app.name_input.trim()
        )),
        Line::from(""),
    ];
    for (i, option) in options.iter().enumerate() {
        let selected = i == app.stats_choice;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", if selected { " ▶ " } else { "   " }, option),
            style,
        )));
    }
    lines
}

fn allocation_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("You have "),
            Span::styled(
                format!("{}", app.points_remaining()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" of {} points to use.", app.budget())),
        ]),
        Line::from(""),
        section("Stats"),
    ];

    for (i, field) in StatField::all().iter().enumerate() {
        let selected = i == app.stat_cursor;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { " ▶ " } else { "   " }, style),
            Span::styled(format!("{:30}", field.name()), style),
            Span::styled(
                format!("{:>3}", field.points(&app.allocation)),
                Style::default().fg(Color::White),
            ),
        ]));
    }
    lines
}

fn confirm_lines(app: &App) -> Vec<Line<'static>> {
    let Some(pending) = &app.pending else {
        return Vec::new();
    };
    let mut lines: Vec<Line<'static>> = pending
        .snapshot()
        .to_string()
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Are {}'s stats acceptable? (y/n)",
        pending.name()
    )));
    lines
}

/// Live stat preview for the character being built
fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let constants = &app.constants().player;
    let preview = match (&app.pending, app.screen) {
        (Some(pending), _) => Some(pending.clone()),
        (None, Screen::Allocate) => Some(duel_core::Character::allocated_player(
            app.name_input.trim(),
            app.allocation,
            constants,
        )),
        _ => None,
    };

    let lines = match &preview {
        Some(character) => snapshot_lines(&character.snapshot(), area.width),
        None => vec![Line::from(Span::styled(
            "No stats chosen yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Preview "));
    f.render_widget(paragraph, area);
}
