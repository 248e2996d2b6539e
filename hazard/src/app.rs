//! Main application state and logic

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use hazard_core::{DieConfig, DieError, GameSession, RngRoller, RollOutcome, RollResult};

/// How long the final face stays on screen before the win/loss banner.
pub const REVEAL_DELAY: Duration = Duration::from_secs(2);

/// Which screen the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Collecting die configuration from the player.
    Setup,
    /// A game is running (or just finished).
    Playing,
}

/// Fields of the setup form, visited in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Sides,
    DieType,
    LoadFactor,
    LoadedSide,
}

/// In-progress die configuration input.
#[derive(Debug)]
pub struct SetupForm {
    pub field: SetupField,
    pub sides: String,
    pub wants_loaded: bool,
    pub load_factor: String,
    pub loaded_side: String,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn new() -> Self {
        Self {
            field: SetupField::Sides,
            sides: String::new(),
            wants_loaded: false,
            load_factor: String::new(),
            loaded_side: String::new(),
            error: None,
        }
    }

    fn active_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            SetupField::Sides => Some(&mut self.sides),
            SetupField::LoadFactor => Some(&mut self.load_factor),
            SetupField::LoadedSide => Some(&mut self.loaded_side),
            SetupField::DieType => None,
        }
    }
}

impl Default for SetupForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A running (or just-finished) game and its display state.
pub struct Game {
    pub session: GameSession,
    pub history: Vec<RollResult>,
    /// Set when a terminal result lands; the banner stays hidden until then.
    banner_at: Option<Instant>,
}

impl Game {
    fn new(die: DieConfig) -> Self {
        Self {
            session: GameSession::new(die),
            history: Vec::new(),
            banner_at: None,
        }
    }

    /// The most recent roll, if any.
    pub fn last_roll(&self) -> Option<RollResult> {
        self.history.last().copied()
    }

    /// Whether the win/loss banner should be on screen yet.
    pub fn banner_visible(&self) -> bool {
        self.banner_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Main application state
pub struct App {
    pub screen: Screen,
    pub form: SetupForm,
    pub game: Option<Game>,
    pub status: Option<String>,
    pub should_quit: bool,
    roller: RngRoller,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Setup,
            form: SetupForm::new(),
            game: None,
            status: None,
            should_quit: false,
            roller: RngRoller::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.screen {
            Screen::Setup => self.handle_setup_key(key.code),
            Screen::Playing => self.handle_play_key(key.code),
        }
    }

    fn handle_setup_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(buffer) = self.form.active_buffer() {
                    if buffer.len() < 3 {
                        buffer.push(c);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.form.active_buffer() {
                    buffer.pop();
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab
                if self.form.field == SetupField::DieType =>
            {
                self.form.wants_loaded = !self.form.wants_loaded;
            }
            KeyCode::Char('f') if self.form.field == SetupField::DieType => {
                self.form.wants_loaded = false;
            }
            KeyCode::Char('l') if self.form.field == SetupField::DieType => {
                self.form.wants_loaded = true;
            }
            KeyCode::Enter => self.advance_form(),
            _ => {}
        }
    }

    fn advance_form(&mut self) {
        match self.form.field {
            SetupField::Sides => self.form.field = SetupField::DieType,
            SetupField::DieType => {
                if self.form.wants_loaded {
                    self.form.field = SetupField::LoadFactor;
                } else {
                    self.submit();
                }
            }
            SetupField::LoadFactor => self.form.field = SetupField::LoadedSide,
            SetupField::LoadedSide => self.submit(),
        }
    }

    /// Validate the form and start a game, or bounce back to the offending
    /// field with the error message.
    fn submit(&mut self) {
        let load = if self.form.wants_loaded {
            Some((self.form.load_factor.clone(), self.form.loaded_side.clone()))
        } else {
            None
        };
        let load = load.as_ref().map(|(f, s)| (f.as_str(), s.as_str()));

        match DieConfig::from_input(&self.form.sides, load) {
            Ok(die) => {
                self.game = Some(Game::new(die));
                self.screen = Screen::Playing;
                self.status = None;
            }
            Err(err) => {
                self.form.field = match &err {
                    DieError::InvalidSideCount(_) => SetupField::Sides,
                    DieError::InvalidLoadFactor(_) => SetupField::LoadFactor,
                    DieError::InvalidLoadedSide { .. } => SetupField::LoadedSide,
                };
                self.form.error = Some(err.to_string());
                if let Some(buffer) = self.form.active_buffer() {
                    buffer.clear();
                }
            }
        }
    }

    fn handle_play_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char(' ') | KeyCode::Enter => self.roll(),
            KeyCode::Char('n') => self.new_game(),
            _ => {}
        }
    }

    fn roll(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if game.session.is_over() {
            self.status = Some("The game is over; press n to play again.".to_string());
            return;
        }
        match game.session.roll(&mut self.roller) {
            Ok(result) => {
                game.history.push(result);
                if result.outcome != RollOutcome::Continue {
                    game.banner_at = Some(Instant::now() + REVEAL_DELAY);
                }
                self.status = None;
            }
            Err(err) => {
                // Unreachable while the is_over check above holds; the
                // session defends its own invariant either way.
                self.status = Some(err.to_string());
            }
        }
    }

    fn new_game(&mut self) {
        self.form = SetupForm::new();
        self.screen = Screen::Setup;
        self.game = None;
        self.status = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
