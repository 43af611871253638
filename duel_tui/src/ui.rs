//! UI rendering

pub mod battle_view;
mod creation_view;
mod help_view;
mod menu_view;
mod report_view;

use crate::app::{App, Screen};
use duel_core::StatSnapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_title(f, &screen_title(app), chunks[0]);

    if app.show_help {
        help_view::draw(f, app, chunks[1]);
    } else {
        match app.screen {
            Screen::ModeSelect => menu_view::draw(f, app, chunks[1]),
            Screen::Naming | Screen::ChooseStats | Screen::Allocate | Screen::Confirm => {
                creation_view::draw(f, app, chunks[1])
            }
            Screen::GameOver => report_view::draw(f, app, chunks[1]),
        }
    }

    draw_keybindings(f, &screen_keys(app), chunks[2]);
}

fn screen_title(app: &App) -> String {
    match app.screen {
        Screen::ModeSelect => "Welcome to the game!".to_string(),
        Screen::Naming | Screen::ChooseStats | Screen::Allocate | Screen::Confirm => {
            if app.mode().human_players() > 1 {
                format!("Player {} Character Creation", app.creating_player())
            } else {
                "Character Creation".to_string()
            }
        }
        Screen::GameOver => "GAME OVER".to_string(),
    }
}

fn screen_keys(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.show_help {
        return vec![("any", "Close help")];
    }
    match app.screen {
        Screen::ModeSelect => vec![
            ("↑/↓", "Select"),
            ("1-3/Enter", "Play"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        Screen::Naming => vec![("Enter", "Confirm name"), ("Esc", "Back")],
        Screen::ChooseStats => vec![
            ("y", "Choose stats"),
            ("n", "Use preset"),
            ("Esc", "Back"),
        ],
        Screen::Allocate => vec![
            ("↑/↓", "Select stat"),
            ("←/→", "Remove/add point"),
            ("Enter", "Done"),
            ("Esc", "Back"),
        ],
        Screen::Confirm => vec![("y", "Accept"), ("n", "Redo stats")],
        Screen::GameOver => vec![("n/Enter", "New game"), ("q", "Quit")],
    }
}

pub fn draw_title(f: &mut Frame, title: &str, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title(" Duel "))
    .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

pub fn draw_keybindings(f: &mut Frame, keys: &[(&str, &str)], area: Rect) {
    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Section header in the `═══ Name ═══` style
pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn health_color(current: i32, max: i32) -> Color {
    let percent = if max > 0 {
        i64::from(current) * 100 / i64::from(max)
    } else {
        0
    };
    if percent > 50 {
        Color::Green
    } else if percent > 25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Text health bar; current health above the base fills the whole bar
pub fn health_bar(current: i32, max: i32, width: usize) -> String {
    let filled = if max > 0 {
        let clamped = current.clamp(0, max) as usize;
        clamped * width / max as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn stat_line(name: &str, value: i32) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:12}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{}", value), Style::default().fg(Color::White)),
    ])
}

/// Stats of one combatant for a side panel
pub fn snapshot_lines(snapshot: &StatSnapshot, width: u16) -> Vec<Line<'static>> {
    let color = health_color(snapshot.current_health, snapshot.base_health);
    let bar_width = width.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Health: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", snapshot.current_health, snapshot.base_health),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            health_bar(snapshot.current_health, snapshot.base_health, bar_width),
            Style::default().fg(color),
        )),
        Line::from(""),
        stat_line("Attack", snapshot.attack),
        stat_line("Defense", snapshot.defense),
        stat_line("Search", snapshot.search),
        stat_line("Toughness", snapshot.toughness),
        stat_line("Weaken", snapshot.weaken_modifier),
    ];
    if let Some(level) = snapshot.level {
        lines.push(stat_line("Level", level as i32));
    }
    lines
}
