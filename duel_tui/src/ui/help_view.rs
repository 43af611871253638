//! Help view

use super::section;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let player = &app.constants().player;
    let lines = vec![
        section("Actions"),
        key_line("attack / a", "Deal max(1, attack - enemy defense) damage"),
        key_line("defend / d", &format!("+{} defense", player.defend_amount)),
        key_line("search / s", "Roll for a random find"),
        key_line("weaken / w", "Drain enemy health, defense and search"),
        Line::from(""),
        section("Search Finds"),
        Line::from("  2%  Jackpot: +bonus to attack, defense and search, +3x bonus health"),
        Line::from("  10% Magnifying glass: +bonus search"),
        Line::from("  10% Poison: +1 to weakens"),
        Line::from("  28% Healing potion: +3x bonus health"),
        Line::from("  50% Weapon: +bonus attack"),
        Line::from(Span::styled(
            "  bonus is a roll between 1 and your search",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        section("Game Modes"),
        Line::from("  Player vs AI: every slain robot is replaced by a stronger one"),
        Line::from("  Player vs Player: both players type commands in turn"),
        Line::from("  AI vs AI: watch two random robots fight"),
        Line::from(""),
        section("Character Creation"),
        Line::from(format!(
            "  {} points: attack +3, defense +3, search +1, toughness +5% health per point",
            player.point_budget
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
