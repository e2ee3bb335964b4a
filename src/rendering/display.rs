//! # Display Management
//!
//! Plain-text rendering of a level, the player status and the message log.

use crate::config::PLAYER_GLYPH;
use crate::game::{Entity, GameEvent, Level, Location, Player};
use std::fmt::Write as _;

/// Terminal display manager for the game.
///
/// Produces strings instead of drawing, so the game loop decides where they
/// are printed.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Number of recent messages shown under the map
    pub visible_messages: usize,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    /// Creates a new display manager.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 100,
            visible_messages: 3,
        }
    }

    /// The glyph drawn at `location`.
    ///
    /// The player wins over entities, and the first entity wins over the
    /// terrain (or coin) underneath.
    pub fn symbol_at(level: &Level, location: Location) -> char {
        if level.player().location() == location {
            return PLAYER_GLYPH;
        }

        if let Some(entity) = level.entities_at(location).first() {
            return entity.symbol();
        }

        level
            .grid()
            .cell_at(location)
            .map(|cell| cell.symbol())
            .unwrap_or(' ')
    }

    /// Renders the map, one line per row, each glyph followed by a space.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::{GameConfig, Level, Player, SpawnCounter, TerminalDisplay};
    ///
    /// let level = Level::load(
    ///     &["#.#", "#1#"],
    ///     Player::new("Hero", 5),
    ///     &GameConfig::new(1),
    ///     &mut SpawnCounter::new(),
    /// )
    /// .unwrap();
    /// assert_eq!(TerminalDisplay::render_map(&level), "# C # \n# 1 # \n");
    /// ```
    pub fn render_map(level: &Level) -> String {
        let mut out = String::with_capacity(level.width() * level.height() * 2 + level.height());
        for row in level.grid().rows() {
            for cell in row {
                out.push(Self::symbol_at(level, cell.location()));
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Formats the player's status line.
    pub fn status_line(player: &Player) -> String {
        format!("{} | health {}", player, player.health())
    }

    /// Renders the full frame: map, status line and recent messages.
    pub fn render_frame(&self, level: &Level) -> String {
        let mut frame = Self::render_map(level);
        let _ = writeln!(frame, "{}", Self::status_line(level.player()));
        let _ = writeln!(frame, "Coins left: {}", level.coins_remaining());
        for message in self.recent_messages() {
            let _ = writeln!(frame, "> {}", message);
        }
        frame
    }

    /// The most recent messages, oldest first.
    pub fn recent_messages(&self) -> &[String] {
        let start = self.messages.len().saturating_sub(self.visible_messages);
        &self.messages[start..]
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Logs the console message of every event that has one.
    pub fn add_events(&mut self, events: &[GameEvent]) {
        for message in events.iter().filter_map(GameEvent::message) {
            self.add_message(message);
        }
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, SpawnCounter};

    fn level(rows: &[&str]) -> Level {
        Level::load(
            rows,
            Player::new("Hero", 5),
            &GameConfig::new(1),
            &mut SpawnCounter::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_symbol_priority() {
        let level = level(&["1R*D"]);
        assert_eq!(TerminalDisplay::symbol_at(&level, Location::new(0, 0)), '1');
        assert_eq!(TerminalDisplay::symbol_at(&level, Location::new(1, 0)), 'R');
        assert_eq!(TerminalDisplay::symbol_at(&level, Location::new(2, 0)), '*');
        assert_eq!(TerminalDisplay::symbol_at(&level, Location::new(3, 0)), 'D');
    }

    #[test]
    fn test_message_history_is_bounded() {
        let mut display = TerminalDisplay::new();
        display.max_messages = 2;
        for i in 0..5 {
            display.add_message(format!("message {}", i));
        }
        assert_eq!(display.messages, vec!["message 3", "message 4"]);
    }

    #[test]
    fn test_recent_messages_window() {
        let mut display = TerminalDisplay::new();
        assert!(display.recent_messages().is_empty());
        for i in 0..5 {
            display.add_message(format!("m{}", i));
        }
        assert_eq!(display.recent_messages(), ["m2", "m3", "m4"]);
    }

    #[test]
    fn test_frame_contains_status() {
        let level = level(&["1."]);
        let frame = TerminalDisplay::new().render_frame(&level);
        assert!(frame.starts_with("1 C \n"));
        assert!(frame.contains("Hero : 0 pt | health 5"));
        assert!(frame.contains("Coins left: 1"));
    }
}
