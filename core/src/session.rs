use core::ops::RangeInclusive;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine counts offered on the start menu.
pub const MINE_CHOICES: RangeInclusive<CellCount> = 1..=9;

pub const DEFAULT_MINES: CellCount = 5;

pub const DEFAULT_COINS_PER_LEVEL: Coins = 10;

pub const DEFAULT_LEVEL_MESSAGE_DELAY_MS: u32 = 2000;

pub const LEVEL_COMPLETE_MESSAGE: &str = "Level Complete!";

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub time_limit_secs: u32,
    pub coins_per_level: Coins,
    /// How long "Level Complete!" stays up before the next countdown starts.
    pub level_message_delay_ms: u32,
    /// Completing this level ends the session as cleared; `None` plays forever.
    pub max_level: Option<Level>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            coins_per_level: DEFAULT_COINS_PER_LEVEL,
            level_message_delay_ms: DEFAULT_LEVEL_MESSAGE_DELAY_MS,
            max_level: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameOverCause {
    MineHit,
    TimeUp,
}

impl GameOverCause {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MineHit => "You clicked a mine! Game Over!",
            Self::TimeUp => "Time's Up! Game Over!",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    Menu,
    Playing,
    GameOver(GameOverCause),
    /// The configured last level was completed.
    Cleared,
}

impl SessionPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver(_) | Self::Cleared)
    }
}

/// Handle for the delayed end of a level transition.
///
/// Only the ticket of the most recent level completion within the current session is
/// honoured; anything issued before a start, reset or menu return is stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransitionTicket {
    epoch: u32,
    level: Level,
}

impl TransitionTicket {
    pub fn level(&self) -> Level {
        self.level
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SessionEvent {
    NoChange,
    Revealed,
    HitMine,
    /// The board was cleared and the next one is already in place. Hand the ticket back
    /// through [`Session::finish_level_transition`] once the message delay is over.
    LevelComplete(TransitionTicket),
    Cleared,
}

impl SessionEvent {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Everything one player session needs: current board, level, coins, pause state and the
/// level countdown.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    phase: SessionPhase,
    mines: CellCount,
    level: Level,
    coins: Coins,
    paused: bool,
    engine: Option<PlayEngine>,
    countdown: Countdown,
    pending_transition: Option<TransitionTicket>,
    epoch: u32,
    seeds: SmallRng,
}

impl Session {
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        Self {
            config,
            phase: SessionPhase::Menu,
            mines: DEFAULT_MINES,
            level: 1,
            coins: 0,
            paused: false,
            engine: None,
            countdown: Countdown::new(),
            pending_transition: None,
            epoch: 0,
            seeds: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mines(&self) -> CellCount {
        self.mines
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn coins(&self) -> Coins {
        self.coins
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    pub fn pending_transition(&self) -> Option<TransitionTicket> {
        self.pending_transition
    }

    pub fn board_size(&self) -> Coord {
        self.engine
            .as_ref()
            .map_or_else(|| board_size_for_level(self.level), |engine| engine.size())
    }

    /// Coordinates off the board read as hidden.
    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.engine
            .as_ref()
            .and_then(|engine| engine.get(coords))
            .unwrap_or(CellState::Hidden)
    }

    pub fn level_message(&self) -> Option<&'static str> {
        self.pending_transition.map(|_| LEVEL_COMPLETE_MESSAGE)
    }

    pub fn pause_label(&self) -> &'static str {
        if self.paused { "Resume" } else { "Pause" }
    }

    /// Begins a fresh board for the current level with `mines` mines and a full countdown.
    pub fn start(&mut self, mines: CellCount) -> Result<()> {
        let board = BoardConfig::for_level(self.level, mines)?;
        let layout = RandomLayoutGenerator::new(self.seeds.random()).generate(board)?;

        self.epoch = self.epoch.wrapping_add(1);
        self.mines = mines;
        self.engine = Some(PlayEngine::new(layout));
        self.paused = false;
        self.pending_transition = None;
        self.phase = SessionPhase::Playing;
        self.start_countdown();

        log::info!(
            "level {} started: {}x{} with {} mines",
            self.level,
            board.size,
            board.size,
            mines
        );
        Ok(())
    }

    /// Flips the pause flag and returns the new value. Only a game in progress can be paused.
    pub fn toggle_pause(&mut self) -> Result<bool> {
        if !matches!(self.phase, SessionPhase::Playing) {
            return Err(GameError::NotPlaying);
        }

        self.paused = !self.paused;
        if self.paused {
            self.countdown.pause();
        } else {
            self.countdown.resume();
        }
        log::debug!("paused: {}", self.paused);
        Ok(self.paused)
    }

    /// Back to level 1 with no coins, then starts again with the session's mine count.
    pub fn reset(&mut self) -> Result<()> {
        log::debug!("reset from level {} with {} coins", self.level, self.coins);
        self.level = 1;
        self.coins = 0;
        self.countdown.clear();
        self.pending_transition = None;
        self.start(self.mines)
    }

    /// Reset triggered from the end-of-game popup.
    pub fn restart(&mut self) -> Result<()> {
        log::debug!("restart after {:?}", self.phase);
        self.reset()
    }

    /// Abandons the session. Level and coins are lost.
    pub fn return_to_menu(&mut self) {
        log::debug!("return to menu from {:?}", self.phase);
        self.epoch = self.epoch.wrapping_add(1);
        self.phase = SessionPhase::Menu;
        self.engine = None;
        self.countdown.clear();
        self.pending_transition = None;
        self.paused = false;
        self.level = 1;
        self.coins = 0;
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<SessionEvent> {
        match self.phase {
            SessionPhase::Playing => {}
            SessionPhase::Menu => return Err(GameError::NotPlaying),
            SessionPhase::GameOver(_) | SessionPhase::Cleared => {
                return Err(GameError::AlreadyEnded);
            }
        }
        if self.paused {
            return Err(GameError::Paused);
        }

        let engine = self.engine.as_mut().ok_or(GameError::NotPlaying)?;
        Ok(match engine.reveal(coords)? {
            RevealOutcome::NoChange => SessionEvent::NoChange,
            RevealOutcome::Revealed => SessionEvent::Revealed,
            RevealOutcome::HitMine => {
                log::info!("mine hit at {:?} on level {}", coords, self.level);
                self.end_game(GameOverCause::MineHit);
                SessionEvent::HitMine
            }
            RevealOutcome::Won => self.complete_level()?,
        })
    }

    /// One second of the level countdown.
    pub fn tick(&mut self) -> TickOutcome {
        if !matches!(self.phase, SessionPhase::Playing) || self.paused {
            return TickOutcome::Ignored;
        }

        let outcome = self.countdown.tick();
        if let TickOutcome::Expired = outcome {
            log::info!("time is up on level {}", self.level);
            self.end_game(GameOverCause::TimeUp);
        }
        outcome
    }

    /// Clears the level message and restarts the countdown, unless `ticket` is stale.
    pub fn finish_level_transition(&mut self, ticket: TransitionTicket) -> bool {
        if self.pending_transition != Some(ticket) {
            log::debug!("ignoring stale level transition {:?}", ticket);
            return false;
        }

        self.pending_transition = None;
        self.start_countdown();
        if self.paused {
            self.countdown.pause();
        }
        log::debug!("level {} countdown started", self.level);
        true
    }

    fn start_countdown(&mut self) {
        self.countdown.start(self.config.time_limit_secs);
        if let CountdownState::Expired = self.countdown.state() {
            log::info!("no time on the clock for level {}", self.level);
            self.end_game(GameOverCause::TimeUp);
        }
    }

    fn complete_level(&mut self) -> Result<SessionEvent> {
        let completed = self.level;
        self.coins = self.coins.saturating_add(self.config.coins_per_level);

        if self.config.max_level.is_some_and(|max| completed >= max) {
            log::info!("final level {} cleared with {} coins", completed, self.coins);
            self.phase = SessionPhase::Cleared;
            self.countdown.stop();
            self.pending_transition = None;
            return Ok(SessionEvent::Cleared);
        }

        self.level = completed.saturating_add(1);
        let board = BoardConfig::for_level(self.level, self.mines)?;
        let layout = RandomLayoutGenerator::new(self.seeds.random()).generate(board)?;
        self.engine = Some(PlayEngine::new(layout));
        self.countdown.stop();

        let ticket = TransitionTicket {
            epoch: self.epoch,
            level: self.level,
        };
        self.pending_transition = Some(ticket);
        log::info!(
            "level {} complete, {} coins, next board {}x{}",
            completed,
            self.coins,
            board.size,
            board.size
        );
        Ok(SessionEvent::LevelComplete(ticket))
    }

    fn end_game(&mut self, cause: GameOverCause) {
        self.phase = SessionPhase::GameOver(cause);
        self.countdown.stop();
        self.pending_transition = None;
    }
}
