//! Battle loop - Plays one game on the terminal
//!
//! Human turns block inside [`TerminalInput`], which redraws the battle view
//! and reads keys until a command is typed. AI vs AI games pause after every
//! turn unless fast-forwarded.

use crate::app::GameSetup;
use crate::ui;
use crossterm::{
    event::{self, DisableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use duel_core::{
    CommandInput, GameConstants, GameMode, GameReport, GameSession, Prompt, StatSnapshot,
    TurnRecord,
};
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::process;
use std::rc::Rc;
use tracing::{error, info};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;
pub type SharedTui = Rc<RefCell<Tui>>;

/// Keep the log from growing without bound
const MAX_LOG_LINES: usize = 500;

/// Command line being typed by a human side
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    pub actor: String,
    pub input: String,
    /// What the opponent did earlier this turn
    pub previous: Option<String>,
    pub rejected: Option<String>,
}

/// Everything the battle screen shows
#[derive(Debug, Clone)]
pub struct BattleView {
    pub mode: GameMode,
    pub turn: u32,
    /// Left and right stat panels
    pub panels: Option<(StatSnapshot, StatSnapshot)>,
    pub log: Vec<String>,
    pub log_scroll: usize,
    pub command: Option<CommandLine>,
    pub hint: &'static str,
}

impl BattleView {
    pub fn new(mode: GameMode) -> Self {
        BattleView {
            mode,
            turn: 0,
            panels: None,
            log: vec![format!("{mode} - fight!")],
            log_scroll: 0,
            command: None,
            hint: "",
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
        self.log_scroll = self.log.len().saturating_sub(1);
    }

    /// Append the lines for one finished turn
    pub fn push_record(&mut self, record: &TurnRecord) {
        self.turn = record.turn;
        self.push_line(format!("━━━ Turn {} ━━━", record.turn));
        self.push_line(format!("  [{}]", record.first_outcome));
        self.push_line(format!("  [{}]", record.second_outcome));
        if let Some(respawn) = &record.respawn {
            self.push_line(format!(
                "{} has slain {}!",
                record.first_before.name, respawn.slain.name
            ));
            self.push_line(format!("{} steps forward.", respawn.replacement.name));
        }
    }

    pub fn scroll_up(&mut self) {
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.log_scroll + 1 < self.log.len() {
            self.log_scroll += 1;
        }
    }
}

/// Blocking command source for one human side
pub struct TerminalInput {
    terminal: SharedTui,
    view: Rc<RefCell<BattleView>>,
}

impl TerminalInput {
    pub fn new(terminal: SharedTui, view: Rc<RefCell<BattleView>>) -> Self {
        TerminalInput { terminal, view }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            redraw(&self.terminal, &self.view)?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_quit(&key) {
                return Ok(None);
            }

            let mut view = self.view.borrow_mut();
            match key.code {
                KeyCode::Up => view.scroll_up(),
                KeyCode::Down => view.scroll_down(),
                code => {
                    let Some(command) = view.command.as_mut() else {
                        continue;
                    };
                    match code {
                        KeyCode::Char(c) => command.input.push(c),
                        KeyCode::Backspace => {
                            command.input.pop();
                        }
                        KeyCode::Enter if !command.input.trim().is_empty() => {
                            return Ok(Some(std::mem::take(&mut command.input)));
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    /// Leave the game from inside a blocking read
    fn exit(&self, status: i32) -> ! {
        if let Err(err) = restore_terminal(&mut self.terminal.borrow_mut()) {
            eprintln!("duel_tui: failed to restore terminal: {err}");
        }
        process::exit(status)
    }
}

impl CommandInput for TerminalInput {
    fn read_command(&mut self, prompt: &Prompt<'_>) -> String {
        {
            let mut view = self.view.borrow_mut();
            view.turn = prompt.turn;
            view.panels = Some((prompt.actor.snapshot(), prompt.opponent.snapshot()));
            view.hint = "Type a command and press Enter";
            view.command = Some(CommandLine {
                actor: prompt.actor.name().to_string(),
                input: String::new(),
                previous: prompt.previous.map(ToString::to_string),
                rejected: prompt.rejected.map(str::to_string),
            });
        }

        let line = match self.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!(turn = prompt.turn, "quit during battle");
                self.exit(0)
            }
            Err(err) => {
                error!(%err, "terminal input failed");
                self.exit(1)
            }
        };

        self.view.borrow_mut().command = None;
        line
    }
}

/// What the player asked for between AI turns
enum Pace {
    Next,
    FastForward,
    Quit,
}

/// Play one game to the end; `None` if the player quit an AI vs AI game
pub fn play(
    terminal: &SharedTui,
    setup: GameSetup,
    constants: &GameConstants,
    rng: &mut ChaCha8Rng,
) -> io::Result<Option<GameReport>> {
    let view = Rc::new(RefCell::new(BattleView::new(setup.mode)));
    let input = || TerminalInput::new(Rc::clone(terminal), Rc::clone(&view));
    let mut players = setup.players.into_iter();

    let mut game = match (setup.mode, players.next(), players.next()) {
        (GameMode::PlayerVsAi, Some(player), _) => {
            GameSession::player_vs_ai(player, input(), constants, rng)
        }
        (GameMode::PlayerVsPlayer, Some(first), Some(second)) => {
            GameSession::player_vs_player(first, input(), second, input(), constants)
        }
        (GameMode::AiVsAi, ..) => GameSession::ai_vs_ai(constants, rng),
        (mode, ..) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{mode} needs {} created characters", mode.human_players()),
            ));
        }
    };

    {
        let mut view = view.borrow_mut();
        let first = game.character(duel_core::Side::First).name().to_string();
        let second = game.character(duel_core::Side::Second).name().to_string();
        view.push_line(format!("{first} faces {second}."));
    }

    let mut fast_forward = false;
    while let Some(record) = game.play_turn(rng) {
        {
            let mut view = view.borrow_mut();
            view.push_record(&record);
            view.panels = Some((
                game.character(duel_core::Side::First).snapshot(),
                game.character(duel_core::Side::Second).snapshot(),
            ));
        }

        if game.mode() == GameMode::AiVsAi && !fast_forward && !game.is_over() {
            match wait_for_pace(terminal, &view)? {
                Pace::Next => {}
                Pace::FastForward => fast_forward = true,
                Pace::Quit => return Ok(None),
            }
        }
    }

    Ok(game.report())
}

fn wait_for_pace(terminal: &SharedTui, view: &Rc<RefCell<BattleView>>) -> io::Result<Pace> {
    view.borrow_mut().hint = "Any key: next turn  |  f: fast-forward  |  Esc: quit";
    loop {
        redraw(terminal, view)?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(&key) {
            return Ok(Pace::Quit);
        }
        match key.code {
            KeyCode::Up => view.borrow_mut().scroll_up(),
            KeyCode::Down => view.borrow_mut().scroll_down(),
            KeyCode::Char('f') => return Ok(Pace::FastForward),
            _ => return Ok(Pace::Next),
        }
    }
}

fn redraw(terminal: &SharedTui, view: &Rc<RefCell<BattleView>>) -> io::Result<()> {
    let view = view.borrow();
    terminal.borrow_mut().draw(|f| {
        let area = f.area();
        ui::battle_view::draw(f, &view, area);
    })?;
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers),
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

/// Restore terminal
pub fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{ScriptedDice, ScriptedPolicy};
    use duel_core::{Character, Combatant, GameContext, SessionState};
    use duel_core::session::ScriptedInput;

    #[test]
    fn test_log_records_turns_and_respawns() {
        let constants = GameConstants::default();
        let enemy = {
            let mut context = GameContext::new();
            let mut dice = ScriptedDice::new([0; 9]);
            context.spawn_enemy(&constants.enemy, &mut dice)
        };
        let mut game = GameSession::new(
            GameMode::PlayerVsAi,
            Combatant::human(
                Character::default_player("Ana", &constants.player),
                ScriptedInput::new(["highground", "attack"]),
            ),
            Combatant::ai(enemy, ScriptedPolicy::new(["defend"])),
            GameContext {
                turn: 0,
                enemies_encountered: 1,
            },
            &constants,
        );
        let mut dice = ScriptedDice::default();
        let record = game.play_turn(&mut dice).unwrap();
        assert_eq!(record.state, SessionState::Active);

        let mut view = BattleView::new(GameMode::PlayerVsAi);
        view.push_record(&record);

        assert_eq!(view.turn, 1);
        assert_eq!(view.log[1], "━━━ Turn 1 ━━━");
        assert_eq!(view.log[2], "  [Ana attacks! (3 damage dealt)]");
        assert_eq!(view.log_scroll, view.log.len() - 1);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut view = BattleView::new(GameMode::AiVsAi);
        for i in 0..(MAX_LOG_LINES + 10) {
            view.push_line(format!("line {i}"));
        }
        assert_eq!(view.log.len(), MAX_LOG_LINES);
        assert_eq!(view.log.last().map(String::as_str), Some("line 509"));

        view.scroll_down();
        assert_eq!(view.log_scroll, MAX_LOG_LINES - 1);
        view.scroll_up();
        assert_eq!(view.log_scroll, MAX_LOG_LINES - 2);
    }
}
