//! # Game State Module
//!
//! Session orchestration across several levels.
//!
//! A [`GameSession`] owns the level layouts, the level currently being
//! played and the naming counters. It decides when a level is cleared, when
//! the game is won and how a retry rebuilds the current level, while the
//! [`Level`] itself stays in charge of every rule inside a turn.

use crate::game::{Direction, GameEvent, Level, LevelStatus, Player, SpawnCounter, TurnReport};
use crate::loading::LevelLayout;
use crate::{CytaleError, CytaleResult, GameConfig};
use serde::{Deserialize, Serialize};

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Moves that changed the player's cell
    pub steps_taken: u64,
    /// Moves into walls or doors
    pub blocked_moves: u64,
    /// Coins picked up
    pub coins_collected: u32,
    /// Traps stepped on
    pub traps_triggered: u32,
    /// Times a monster hurt the player
    pub monster_hits: u32,
    /// Number of times the player has died
    pub deaths: u32,
    /// Levels whose coins were all collected
    pub levels_cleared: u32,
    /// Level attempts restarted after a death
    pub retries: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => self.steps_taken += 1,
            GameEvent::MoveBlocked { .. } => self.blocked_moves += 1,
            GameEvent::CoinCollected { .. } => self.coins_collected += 1,
            GameEvent::TrapTriggered { .. } => self.traps_triggered += 1,
            GameEvent::PlayerAttacked { .. } => self.monster_hits += 1,
            GameEvent::PlayerDied => self.deaths += 1,
            GameEvent::LevelCompleted => self.levels_cleared += 1,
            GameEvent::PlayerRespawned { .. } => {}
        }
    }
}

/// Where the session stands between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// A level is in progress
    Playing,
    /// The current level is cleared and another one follows
    LevelCleared,
    /// The last level is cleared
    Victory,
    /// The player died on the current level
    PlayerDied,
}

/// End-of-game report, serializable for the `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub player_name: String,
    pub score: u32,
    pub health: u32,
    pub level_name: String,
    pub level_number: usize,
    pub levels_total: usize,
    pub turns: u64,
    pub completion_state: GameCompletionState,
    pub statistics: GameStatistics,
}

/// A play-through of an ordered list of levels with one player.
#[derive(Debug, Clone)]
pub struct GameSession {
    layouts: Vec<LevelLayout>,
    current_index: usize,
    level: Level,
    config: GameConfig,
    counter: SpawnCounter,
    /// Current game turn number
    pub turn_number: u64,
    /// Game statistics for player progress
    pub statistics: GameStatistics,
    /// Current game completion state
    pub completion_state: GameCompletionState,
}

impl GameSession {
    /// Starts a session on the first layout.
    ///
    /// Without a name the player is named from the session's counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::{GameConfig, GameSession, LevelLayout};
    ///
    /// let session = GameSession::new(vec![LevelLayout::builtin()], None, GameConfig::new(7)).unwrap();
    /// assert_eq!(session.player().name(), "Player1");
    /// assert_eq!(session.turn_number, 0);
    /// ```
    pub fn new(
        layouts: Vec<LevelLayout>,
        player_name: Option<String>,
        config: GameConfig,
    ) -> CytaleResult<Self> {
        let first = layouts
            .first()
            .ok_or_else(|| CytaleError::InvalidState("No levels to play".to_string()))?;

        let mut counter = SpawnCounter::new();
        let name = player_name.unwrap_or_else(|| counter.next_player_name());
        let player = Player::new(name, config.initial_health);
        let level = Self::build_level(first, 0, player, &config, &mut counter)?;

        log::info!("Starting level '{}' (1/{})", first.name, layouts.len());

        Ok(Self {
            layouts,
            current_index: 0,
            level,
            config,
            counter,
            turn_number: 0,
            statistics: GameStatistics::new(),
            completion_state: GameCompletionState::Playing,
        })
    }

    fn build_level(
        layout: &LevelLayout,
        index: usize,
        player: Player,
        config: &GameConfig,
        counter: &mut SpawnCounter,
    ) -> CytaleResult<Level> {
        // Each level gets its own monster stream so levels replay independently.
        let mut level_config = config.clone();
        level_config.seed = config.seed.wrapping_add(index as u64);
        Level::load(&layout.rows, player, &level_config, counter)
    }

    /// Plays one move on the current level.
    ///
    /// Fails with [`CytaleError::InvalidState`] once the level is cleared, won
    /// or lost; the caller must advance or retry first.
    pub fn apply_move(&mut self, direction: Direction) -> CytaleResult<TurnReport> {
        if self.completion_state != GameCompletionState::Playing {
            return Err(CytaleError::InvalidState(format!(
                "Cannot move while {:?}",
                self.completion_state
            )));
        }

        let report = self.level.apply_move(direction);
        self.turn_number += 1;
        for event in &report.events {
            self.statistics.update_from_event(event);
        }

        self.completion_state = match report.status {
            LevelStatus::InProgress => GameCompletionState::Playing,
            LevelStatus::PlayerDead => GameCompletionState::PlayerDied,
            LevelStatus::Completed if self.is_last_level() => GameCompletionState::Victory,
            LevelStatus::Completed => GameCompletionState::LevelCleared,
        };

        Ok(report)
    }

    /// Moves on to the next layout, carrying the player's score and health.
    ///
    /// Returns `false` when there is no next level to go to.
    pub fn advance_level(&mut self) -> CytaleResult<bool> {
        if self.completion_state != GameCompletionState::LevelCleared {
            return Ok(false);
        }

        let next_index = self.current_index + 1;
        let Some(layout) = self.layouts.get(next_index) else {
            return Ok(false);
        };

        let player = self.level.player().clone();
        self.level = Self::build_level(layout, next_index, player, &self.config, &mut self.counter)?;
        self.current_index = next_index;
        self.completion_state = GameCompletionState::Playing;

        log::info!(
            "Starting level '{}' ({}/{})",
            layout.name,
            next_index + 1,
            self.layouts.len()
        );
        Ok(true)
    }

    /// Rebuilds the current level from its layout and resets the player.
    ///
    /// Only a dead player can retry.
    pub fn retry(&mut self) -> CytaleResult<()> {
        if self.completion_state != GameCompletionState::PlayerDied {
            return Err(CytaleError::InvalidState(format!(
                "cannot retry while {:?}",
                self.completion_state
            )));
        }

        let layout = &self.layouts[self.current_index];
        let player = self.level.player().clone();
        let mut level =
            Self::build_level(layout, self.current_index, player, &self.config, &mut self.counter)?;
        level.reset_player();

        self.level = level;
        self.statistics.retries += 1;
        self.completion_state = GameCompletionState::Playing;

        log::info!("Retrying level '{}'", layout.name);
        Ok(())
    }

    /// True once the game is won or the player is dead.
    pub fn is_over(&self) -> bool {
        matches!(
            self.completion_state,
            GameCompletionState::Victory | GameCompletionState::PlayerDied
        )
    }

    fn is_last_level(&self) -> bool {
        self.current_index + 1 >= self.layouts.len()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        self.level.player()
    }

    pub fn level_name(&self) -> &str {
        &self.layouts[self.current_index].name
    }

    /// Zero-based index of the current level.
    pub fn level_index(&self) -> usize {
        self.current_index
    }

    pub fn levels_total(&self) -> usize {
        self.layouts.len()
    }

    pub fn summary(&self) -> SessionSummary {
        let player = self.player();
        SessionSummary {
            player_name: player.name().to_string(),
            score: player.score(),
            health: player.health(),
            level_name: self.level_name().to_string(),
            level_number: self.current_index + 1,
            levels_total: self.layouts.len(),
            turns: self.turn_number,
            completion_state: self.completion_state,
            statistics: self.statistics.clone(),
        }
    }

    /// Serializes the summary as pretty JSON.
    pub fn summary_json(&self) -> CytaleResult<String> {
        serde_json::to_string_pretty(&self.summary()).map_err(CytaleError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    fn layout(name: &str, rows: &[&str]) -> LevelLayout {
        LevelLayout::new(name, rows.iter().map(|row| row.to_string()).collect())
    }

    fn two_level_session() -> GameSession {
        GameSession::new(
            vec![layout("first", &["1.#"]), layout("second", &["#1.*"])],
            Some("Hero".to_string()),
            GameConfig::new(3),
        )
        .unwrap()
    }

    #[test]
    fn test_session_requires_levels() {
        let result = GameSession::new(vec![], None, GameConfig::new(1));
        assert!(matches!(result, Err(CytaleError::InvalidState(_))));
    }

    #[test]
    fn test_level_progression_to_victory() -> CytaleResult<()> {
        let mut session = two_level_session();

        session.apply_move(Direction::Right)?;
        assert_eq!(session.completion_state, GameCompletionState::LevelCleared);
        assert!(session.apply_move(Direction::Right).is_err());

        assert!(session.advance_level()?);
        assert_eq!(session.level_name(), "second");
        assert_eq!(session.player().score(), 10);
        assert_eq!(session.player().location(), Location::new(1, 0));

        session.apply_move(Direction::Right)?;
        assert_eq!(session.completion_state, GameCompletionState::Victory);
        assert!(session.is_over());
        assert!(!session.advance_level()?);

        assert_eq!(session.player().score(), 20);
        assert_eq!(session.statistics.coins_collected, 2);
        assert_eq!(session.statistics.levels_cleared, 2);
        assert_eq!(session.turn_number, 2);
        Ok(())
    }

    #[test]
    fn test_death_and_retry() -> CytaleResult<()> {
        let mut session = GameSession::new(
            vec![layout("traps", &["#1*.#"])],
            None,
            GameConfig::new(9).with_initial_health(2),
        )?;

        session.apply_move(Direction::Right)?;
        assert_eq!(session.completion_state, GameCompletionState::Playing);
        session.apply_move(Direction::Right)?;
        assert_eq!(session.completion_state, GameCompletionState::PlayerDied);
        assert_eq!(session.statistics.deaths, 1);
        assert_eq!(session.statistics.traps_triggered, 2);

        session.retry()?;
        assert_eq!(session.completion_state, GameCompletionState::Playing);
        assert_eq!(session.player().health(), 2);
        assert_eq!(session.player().score(), 0);
        assert_eq!(session.player().location(), Location::new(1, 0));
        assert_eq!(session.statistics.retries, 1);
        Ok(())
    }

    #[test]
    fn test_retry_requires_a_death() -> CytaleResult<()> {
        let mut session = two_level_session();
        assert!(matches!(session.retry(), Err(CytaleError::InvalidState(_))));

        session.apply_move(Direction::Right)?;
        assert_eq!(session.completion_state, GameCompletionState::LevelCleared);
        assert!(matches!(session.retry(), Err(CytaleError::InvalidState(_))));
        assert_eq!(session.statistics.retries, 0);
        assert_eq!(session.player().score(), 10);
        Ok(())
    }

    #[test]
    fn test_summary_json() -> CytaleResult<()> {
        let mut session = two_level_session();
        session.apply_move(Direction::Right)?;

        let json = session.summary_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["player_name"], "Hero");
        assert_eq!(value["score"], 10);
        assert_eq!(value["completion_state"], "LevelCleared");
        Ok(())
    }
}
