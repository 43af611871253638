//! Application state

use crossterm::event::KeyCode;
use duel_core::{Character, GameConstants, GameMode, GameReport, StatAllocation};

/// Longest name accepted during character creation
const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ModeSelect,
    Naming,
    /// Preset stats or hand allocation
    ChooseStats,
    Allocate,
    Confirm,
    GameOver,
}

/// Stat rows on the allocation screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Attack,
    Defense,
    Search,
    Toughness,
}

impl StatField {
    pub fn all() -> &'static [StatField] {
        &[
            StatField::Attack,
            StatField::Defense,
            StatField::Search,
            StatField::Toughness,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatField::Attack => "Attack (+3/point)",
            StatField::Defense => "Defense (+3/point)",
            StatField::Search => "Search (+1/point)",
            StatField::Toughness => "Toughness (+5% health/point)",
        }
    }

    pub fn points(&self, allocation: &StatAllocation) -> u32 {
        match self {
            StatField::Attack => allocation.attack,
            StatField::Defense => allocation.defense,
            StatField::Search => allocation.search,
            StatField::Toughness => allocation.toughness,
        }
    }

    fn points_mut<'a>(&self, allocation: &'a mut StatAllocation) -> &'a mut u32 {
        match self {
            StatField::Attack => &mut allocation.attack,
            StatField::Defense => &mut allocation.defense,
            StatField::Search => &mut allocation.search,
            StatField::Toughness => &mut allocation.toughness,
        }
    }
}

/// Everything needed to start a game, handed over once creation is done
#[derive(Debug)]
pub struct GameSetup {
    pub mode: GameMode,
    pub players: Vec<Character>,
}

pub struct App {
    pub screen: Screen,
    pub mode_index: usize,
    pub name_input: String,
    /// 0 = preset stats, 1 = choose stats
    pub stats_choice: usize,
    pub allocation: StatAllocation,
    pub stat_cursor: usize,
    /// Character waiting for confirmation
    pub pending: Option<Character>,
    /// Characters already confirmed for the selected mode
    pub players: Vec<Character>,
    pub report: Option<GameReport>,
    /// One-line message about rejected input
    pub notice: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    constants: GameConstants,
    setup: Option<GameSetup>,
}

impl App {
    pub fn new(constants: GameConstants) -> Self {
        App {
            screen: Screen::ModeSelect,
            mode_index: 0,
            name_input: String::new(),
            stats_choice: 0,
            allocation: StatAllocation::default(),
            stat_cursor: 0,
            pending: None,
            players: Vec::new(),
            report: None,
            notice: None,
            show_help: false,
            should_quit: false,
            constants,
            setup: None,
        }
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    pub fn mode(&self) -> GameMode {
        GameMode::all()[self.mode_index]
    }

    /// 1-based number of the player currently being created
    pub fn creating_player(&self) -> usize {
        self.players.len() + 1
    }

    pub fn budget(&self) -> u32 {
        self.constants.player.point_budget
    }

    pub fn points_remaining(&self) -> u32 {
        self.allocation.remaining(self.budget()).unwrap_or(0)
    }

    pub fn selected_field(&self) -> StatField {
        StatField::all()[self.stat_cursor]
    }

    /// Finished setup, if creation just completed
    pub fn take_setup(&mut self) -> Option<GameSetup> {
        self.setup.take()
    }

    pub fn show_report(&mut self, report: GameReport) {
        self.report = Some(report);
        self.screen = Screen::GameOver;
    }

    pub fn on_key(&mut self, code: KeyCode) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        self.notice = None;

        match self.screen {
            Screen::ModeSelect => self.on_mode_key(code),
            Screen::Naming => self.on_naming_key(code),
            Screen::ChooseStats => self.on_choose_stats_key(code),
            Screen::Allocate => self.on_allocate_key(code),
            Screen::Confirm => self.on_confirm_key(code),
            Screen::GameOver => self.on_game_over_key(code),
        }
    }

    fn on_mode_key(&mut self, code: KeyCode) {
        let modes = GameMode::all().len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.mode_index = (self.mode_index + modes - 1) % modes;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.mode_index = (self.mode_index + 1) % modes;
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.mode_index = c as usize - '1' as usize;
                self.select_mode();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.notice = Some(format!(
                    "INVALID INPUT! Game mode '{c}' not recognized. Try again"
                ));
            }
            KeyCode::Enter => self.select_mode(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn on_naming_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if self.name_input.chars().count() < MAX_NAME_LEN => {
                self.name_input.push(c);
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Enter => self.confirm_name(),
            KeyCode::Esc => self.reset(),
            _ => {}
        }
    }

    fn on_choose_stats_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j') => {
                self.stats_choice = 1 - self.stats_choice;
            }
            KeyCode::Char('y') => self.start_allocation(),
            KeyCode::Char('n') => self.choose_preset(),
            KeyCode::Enter if self.stats_choice == 1 => self.start_allocation(),
            KeyCode::Enter => self.choose_preset(),
            KeyCode::Esc => self.screen = Screen::Naming,
            _ => {}
        }
    }

    fn on_allocate_key(&mut self, code: KeyCode) {
        let fields = StatField::all().len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.stat_cursor = (self.stat_cursor + fields - 1) % fields;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.stat_cursor = (self.stat_cursor + 1) % fields;
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => self.add_point(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.remove_point(),
            KeyCode::Enter => self.finish_allocation(),
            KeyCode::Esc => self.screen = Screen::ChooseStats,
            _ => {}
        }
    }

    fn on_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => self.accept_character(),
            KeyCode::Char('n') | KeyCode::Esc => {
                self.pending = None;
                self.screen = Screen::ChooseStats;
            }
            _ => {}
        }
    }

    fn on_game_over_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('n') | KeyCode::Enter => self.reset(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn select_mode(&mut self) {
        self.players.clear();
        if self.mode().human_players() == 0 {
            self.finish_setup();
        } else {
            self.name_input.clear();
            self.screen = Screen::Naming;
        }
    }

    fn confirm_name(&mut self) {
        if self.name_input.trim().is_empty() {
            self.notice = Some("Name cannot be empty".to_string());
            return;
        }
        self.stats_choice = 0;
        self.screen = Screen::ChooseStats;
    }

    fn choose_preset(&mut self) {
        let character = Character::default_player(self.name_input.trim(), &self.constants.player);
        self.pending = Some(character);
        self.screen = Screen::Confirm;
    }

    fn start_allocation(&mut self) {
        self.allocation = StatAllocation::default();
        self.stat_cursor = 0;
        self.screen = Screen::Allocate;
    }

    fn add_point(&mut self) {
        let mut next = self.allocation;
        *self.selected_field().points_mut(&mut next) += 1;
        match next.validate(self.budget()) {
            Ok(()) => self.allocation = next,
            Err(err) => self.notice = Some(format!("INVALID INPUT! {err}")),
        }
    }

    fn remove_point(&mut self) {
        let field = self.selected_field();
        let points = field.points_mut(&mut self.allocation);
        *points = points.saturating_sub(1);
    }

    fn finish_allocation(&mut self) {
        if let Err(err) = self.allocation.validate(self.budget()) {
            self.notice = Some(format!("INVALID INPUT! {err}"));
            return;
        }
        let character = Character::allocated_player(
            self.name_input.trim(),
            self.allocation,
            &self.constants.player,
        );
        self.pending = Some(character);
        self.screen = Screen::Confirm;
    }

    fn accept_character(&mut self) {
        let Some(character) = self.pending.take() else {
            return;
        };
        tracing::info!(
            player = self.creating_player(),
            name = character.name(),
            "character created"
        );
        self.players.push(character);

        if self.players.len() >= self.mode().human_players() {
            self.finish_setup();
        } else {
            self.name_input.clear();
            self.screen = Screen::Naming;
        }
    }

    fn finish_setup(&mut self) {
        self.setup = Some(GameSetup {
            mode: self.mode(),
            players: std::mem::take(&mut self.players),
        });
    }

    fn reset(&mut self) {
        self.screen = Screen::ModeSelect;
        self.name_input.clear();
        self.players.clear();
        self.pending = None;
        self.report = None;
    }
}
