//! # Game Events
//!
//! Facts produced by a turn, in the order they happened.

use crate::game::{Direction, Location};
use serde::{Deserialize, Serialize};

/// Something that happened while resolving a move or a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player stepped onto a walkable cell
    PlayerMoved { from: Location, to: Location },
    /// The target cell was not walkable
    MoveBlocked {
        direction: Direction,
        target: Location,
    },
    /// A coin was picked up
    CoinCollected { location: Location, value: u32 },
    /// The player stepped onto a trap
    TrapTriggered { location: Location },
    /// An entity hurt the player
    PlayerAttacked {
        attacker: String,
        damage: u32,
        health: u32,
    },
    /// The player was sent back to spawn
    PlayerRespawned { location: Location },
    /// The player's health reached zero
    PlayerDied,
    /// The last coin was collected
    LevelCompleted,
}

impl GameEvent {
    /// Human-readable message for the console, if this event warrants one.
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::PlayerMoved { .. } => None,
            GameEvent::MoveBlocked { .. } => None,
            GameEvent::CoinCollected { value, .. } => Some(format!("Picked up a coin (+{})", value)),
            GameEvent::TrapTriggered { .. } => Some("It's a trap!".to_string()),
            GameEvent::PlayerAttacked {
                attacker, health, ..
            } => Some(format!(
                "{} attacked Player! Player health is now {}",
                attacker, health
            )),
            GameEvent::PlayerRespawned { .. } => Some("Back to the start...".to_string()),
            GameEvent::PlayerDied => Some("You died.".to_string()),
            GameEvent::LevelCompleted => Some("All coins collected!".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_message_names_attacker() {
        let event = GameEvent::PlayerAttacked {
            attacker: "MONSTER2".to_string(),
            damage: 1,
            health: 3,
        };
        assert_eq!(
            event.message().unwrap(),
            "MONSTER2 attacked Player! Player health is now 3"
        );
    }

    #[test]
    fn test_movement_is_silent() {
        let event = GameEvent::PlayerMoved {
            from: Location::new(1, 1),
            to: Location::new(2, 1),
        };
        assert!(event.message().is_none());
    }
}
