//! # Loading Module
//!
//! Reading level layouts from text and from disk.
//!
//! A layout is a rectangular block of characters, one string per row. This
//! module only splits and names the rows; [`crate::Level::load`] interprets
//! the symbols.

use crate::CytaleResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The maze shipped with the game, used when no level file is given.
///
/// The corridors are the classic 10x10 CyTale maze. Coins, the spawn, one
/// monster and a trap are added on top, and the open gap at the end of row 7
/// is closed with a door.
const DEFAULT_LAYOUT: [&str; 10] = [
    "# ########",
    " 1. #.  R#",
    "# # # ## #",
    "# # .* # #",
    "# #### # #",
    "#  . # #.#",
    "#### # # #",
    "#. #   . D",
    "# ###### #",
    "########.#",
];

/// Named rows of a level layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Display name, usually the file stem
    pub name: String,
    /// One string per row, top to bottom
    pub rows: Vec<String>,
}

impl LevelLayout {
    /// Creates a layout from already-split rows.
    pub fn new(name: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Splits `text` into rows.
    ///
    /// Windows line endings are accepted and a single trailing newline does
    /// not produce an extra empty row.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::LevelLayout;
    ///
    /// let layout = LevelLayout::parse("tiny", "#1#\r\n#.#\n");
    /// assert_eq!(layout.rows, vec!["#1#".to_string(), "#.#".to_string()]);
    /// ```
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self::new(name, rows)
    }

    /// Reads a layout file, naming it after the file stem.
    pub fn from_file(path: impl AsRef<Path>) -> CytaleResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("Read level '{}' from {}", name, path.display());
        Ok(Self::parse(name, &text))
    }

    /// The built-in maze.
    pub fn builtin() -> Self {
        Self::new(
            "builtin",
            DEFAULT_LAYOUT.iter().map(|row| row.to_string()).collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.rows
            .first()
            .map(|row| row.chars().count())
            .unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Reads every path in order, stopping at the first failure.
pub fn load_layouts<P: AsRef<Path>>(paths: &[P]) -> CytaleResult<Vec<LevelLayout>> {
    paths.iter().map(LevelLayout::from_file).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, Level, Player, SpawnCounter};

    #[test]
    fn test_parse_strips_carriage_returns() {
        let layout = LevelLayout::parse("crlf", "#1\r\n .\r\n");
        assert_eq!(layout.rows, vec!["#1", " ."]);
        assert_eq!(layout.width(), 2);
        assert_eq!(layout.height(), 2);
    }

    #[test]
    fn test_parse_keeps_trailing_spaces() {
        let layout = LevelLayout::parse("spaces", "1  \n   ");
        assert_eq!(layout.rows, vec!["1  ", "   "]);
    }

    #[test]
    fn test_builtin_layout_loads() {
        let layout = LevelLayout::builtin();
        assert_eq!(layout.width(), 10);
        assert_eq!(layout.height(), 10);

        let level = Level::load(
            &layout.rows,
            Player::new("Hero", 5),
            &GameConfig::new(1),
            &mut SpawnCounter::new(),
        )
        .unwrap();
        assert_eq!(level.player().location(), crate::Location::new(1, 1));
        assert!(!level.is_completed());
        assert_eq!(level.entities().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = LevelLayout::from_file("/definitely/not/here/level.txt");
        assert!(matches!(result, Err(crate::CytaleError::Io(_))));
    }
}
