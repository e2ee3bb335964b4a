//! # Input Module
//!
//! Translating typed console commands into player inputs.

use crate::game::Direction;

/// Help text listing the accepted commands.
pub const HELP_TEXT: &str =
    "Move with z/q/s/d or w/a/s/d (or top/bot/left/right), 'help' for this text, 'exit' to quit";

/// Input handler for processing player commands.
///
/// Each line the player types is turned into at most one [`PlayerInput`].
/// Unrecognized lines yield `None` and never reach the level.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler with Vi keys disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_line("z"), Some(PlayerInput::Move(Direction::Top)));
    /// assert_eq!(input_handler.parse_line("dance"), None);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: false,
        }
    }

    /// Creates an input handler that also accepts h/j/k/l.
    pub fn with_vi_keys() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of player input.
    pub fn parse_line(&self, line: &str) -> Option<PlayerInput> {
        let token = line.trim().to_ascii_lowercase();

        match token.as_str() {
            "exit" | "quit" => return Some(PlayerInput::Quit),
            "help" | "?" => return Some(PlayerInput::Help),
            _ => {}
        }

        // ZQSD and WASD share 's' and 'd'
        let direction = match token.as_str() {
            "z" | "w" => Some(Direction::Top),
            "q" | "a" => Some(Direction::Left),
            "s" => Some(Direction::Bot),
            "d" => Some(Direction::Right),
            "h" if self.vi_keys_enabled => Some(Direction::Left),
            "j" if self.vi_keys_enabled => Some(Direction::Bot),
            "k" if self.vi_keys_enabled => Some(Direction::Top),
            "l" if self.vi_keys_enabled => Some(Direction::Right),
            other => other.parse::<Direction>().ok(),
        };

        direction.map(PlayerInput::Move)
    }
}

/// Player input types that can be processed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in a direction
    Move(Direction),
    /// Quit the game
    Quit,
    /// Show help information
    Help,
}

/// Answers to yes/no prompts, such as "retry?".
pub fn parse_confirmation(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "o" | "oui" => Some(true),
        "n" | "no" | "non" => Some(false),
        _ => None,
    }
}
