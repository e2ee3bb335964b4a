//! # CyTale
//!
//! A turn-based, single-player console maze game.
//!
//! ## Architecture Overview
//!
//! The crate is split between a level simulation core and the thin
//! collaborators that drive it from a terminal:
//!
//! - **Game**: grid, cells, player, monsters and the [`Level`] state machine
//! - **Session**: level progression, retries and statistics ([`GameSession`])
//! - **Loading**: reading rectangular character layouts from text or disk
//! - **Input**: mapping typed commands to movement directions
//! - **Rendering**: drawing a level and its messages as plain text
//!
//! One command produces exactly one [`Level::move_player`] call, which fully
//! resolves terrain, coin, trap and monster effects and then advances every
//! monster by one tick before returning.

pub mod game;
pub mod input;
pub mod loading;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use input::*;
pub use loading::*;
pub use rendering::*;

pub use config::GameConfig;

/// Errors raised while building a level from a layout.
///
/// These are only produced during level construction and are always fatal to
/// that load attempt.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The layout has no `'1'` spawn marker
    #[error("player spawn ('1') not found in level layout")]
    MissingSpawn,

    /// The layout has more than one `'1'` spawn marker
    #[error("duplicate player spawn at ({x}, {y}), first spawn was at ({first_x}, {first_y})")]
    DuplicateSpawn {
        x: i32,
        y: i32,
        first_x: i32,
        first_y: i32,
    },

    /// The layout has no rows, or a row with no cells
    #[error("level layout is empty")]
    EmptyLayout,

    /// Rows of the layout differ in width
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character outside the known cell and marker symbols
    #[error("unknown cell symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: i32, y: i32 },

    /// The spawn is out of bounds or on a non-walkable cell
    #[error("invalid spawn position ({x}, {y}): {reason}")]
    InvalidSpawnPosition { x: i32, y: i32, reason: String },
}

/// Core error type for the CyTale game engine.
#[derive(thiserror::Error, Debug)]
pub enum CytaleError {
    /// Level construction failed
    #[error("Level load error: {0}")]
    Load(#[from] LoadError),

    /// A location outside the grid was looked up
    #[error("Location ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// A direction outside the four cardinal moves was supplied
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Session is in a state that does not allow the operation
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the CyTale codebase.
pub type CytaleResult<T> = Result<T, CytaleError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    use serde::{Deserialize, Serialize};

    /// Health a player starts every level attempt with
    pub const DEFAULT_PLAYER_HEALTH: u32 = 5;

    /// Health every monster is created with
    pub const DEFAULT_MONSTER_HEALTH: u32 = 5;

    /// Score awarded for each coin
    pub const COIN_VALUE: u32 = 10;

    /// Health lost when stepping on a trap or touching a monster
    pub const DEFAULT_DAMAGE: u32 = 1;

    /// Layout marker for the player spawn
    pub const SPAWN_SYMBOL: char = '1';

    /// Layout marker for a floor cell holding a coin
    pub const COIN_SYMBOL: char = '.';

    /// Layout marker and display glyph for a monster
    pub const MONSTER_SYMBOL: char = 'R';

    /// Display glyph for a cell that still holds a coin
    pub const COIN_GLYPH: char = 'C';

    /// Display glyph for the player
    pub const PLAYER_GLYPH: char = '1';

    /// Tunable rules for a game session.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::GameConfig;
    ///
    /// let config = GameConfig::new(42);
    /// assert_eq!(config.initial_health, 5);
    /// assert_eq!(config.coin_value, 10);
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GameConfig {
        /// Seed for monster movement
        pub seed: u64,
        /// Health the player starts with
        pub initial_health: u32,
        /// Score per coin
        pub coin_value: u32,
        /// Health lost on a trap
        pub trap_damage: u32,
        /// Health lost when a monster is touched
        pub contact_damage: u32,
        /// Health monsters are created with
        pub monster_health: u32,
    }

    impl GameConfig {
        /// Creates the standard rule set.
        pub fn new(seed: u64) -> Self {
            Self {
                seed,
                initial_health: DEFAULT_PLAYER_HEALTH,
                coin_value: COIN_VALUE,
                trap_damage: DEFAULT_DAMAGE,
                contact_damage: DEFAULT_DAMAGE,
                monster_health: DEFAULT_MONSTER_HEALTH,
            }
        }

        /// Sets the player's starting health.
        pub fn with_initial_health(mut self, health: u32) -> Self {
            self.initial_health = health;
            self
        }
    }

    impl Default for GameConfig {
        fn default() -> Self {
            Self::new(12345)
        }
    }
}
