//! # Entities Module
//!
//! The player and the non-player actors that share the grid with it.

use crate::config::MONSTER_SYMBOL;
use crate::game::{CellType, Direction, Grid, Location};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Explicit naming counters for a game session.
///
/// Every monster and default-named player gets a sequence number from here,
/// so names stay unique across the levels of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCounter {
    monsters: u32,
    players: u32,
}

impl SpawnCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next monster name, `MONSTER0`, `MONSTER1`, ...
    pub fn next_monster_name(&mut self) -> String {
        let name = format!("MONSTER{}", self.monsters);
        self.monsters += 1;
        name
    }

    /// Returns the next default player name, `Player1`, `Player2`, ...
    pub fn next_player_name(&mut self) -> String {
        self.players += 1;
        format!("Player{}", self.players)
    }

    pub fn monsters_spawned(&self) -> u32 {
        self.monsters
    }
}

/// The player's mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u32,
    health: u32,
    location: Location,
}

impl Player {
    /// Creates a player with no score at the origin.
    ///
    /// The level the player is handed to moves it onto the spawn.
    pub fn new(name: impl Into<String>, health: u32) -> Self {
        Self {
            name: name.into(),
            score: 0,
            health,
            location: Location::origin(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Removes points, stopping at zero.
    pub fn remove_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Removes health, stopping at zero.
    pub fn remove_health(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restores score 0, `health` and `location`.
    pub fn reset(&mut self, health: u32, location: Location) {
        self.score = 0;
        self.health = health;
        self.location = location;
    }

    /// Value snapshot for callers outside the level.
    pub fn state(&self) -> PlayerState {
        PlayerState {
            name: self.name.clone(),
            score: self.score,
            health: self.health,
            location: self.location,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.score > 1 { "s" } else { "" };
        write!(f, "{} : {} pt{}", self.name, self.score, plural)
    }
}

/// Snapshot of a player returned from each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub score: u32,
    pub health: u32,
    pub location: Location,
}

/// What touching an entity does to the player.
///
/// The level applies the effect, so every form of damage goes through the
/// same respawn path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactEffect {
    /// Damage the player and send them back to spawn
    Damage(u32),
    /// Nothing happens
    None,
}

/// Common behavior for anything that occupies a cell besides the player.
pub trait Entity {
    /// Display name, used in messages.
    fn name(&self) -> &str;

    /// Current location.
    fn location(&self) -> Location;

    /// Display glyph.
    fn symbol(&self) -> char;

    /// Acts once. Entities only read terrain, never each other.
    fn tick(&mut self, grid: &Grid, rng: &mut StdRng);

    /// Reaction when the player steps onto this entity's cell.
    fn on_player_contact(&self) -> ContactEffect;
}

/// A wandering monster that hurts the player on contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    name: String,
    health: u32,
    location: Location,
    contact_damage: u32,
}

impl Monster {
    pub fn new(
        name: impl Into<String>,
        health: u32,
        location: Location,
        contact_damage: u32,
    ) -> Self {
        Self {
            name: name.into(),
            health,
            location,
            contact_damage,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    // Nothing in a player move damages monsters yet.
    pub fn receive_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    /// Monsters walk anywhere walkable except traps.
    pub fn can_enter(cell_type: CellType) -> bool {
        cell_type.is_walkable() && cell_type != CellType::Trap
    }
}

impl Entity for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Location {
        self.location
    }

    fn symbol(&self) -> char {
        MONSTER_SYMBOL
    }

    fn tick(&mut self, grid: &Grid, rng: &mut StdRng) {
        let directions = Direction::all();
        let direction = directions[rng.gen_range(0..directions.len())];
        let target = grid.wrap(self.location, direction.to_delta());

        match grid.cell_at(target) {
            Ok(cell) if Self::can_enter(cell.cell_type()) => {
                log::trace!("{} moves {} to {}", self.name, direction, target);
                self.location = target;
            }
            _ => {
                log::trace!("{} stays at {}", self.name, self.location);
            }
        }
    }

    fn on_player_contact(&self) -> ContactEffect {
        ContactEffect::Damage(self.contact_damage)
    }
}

/// Closed set of entity kinds a level can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcreteEntity {
    Monster(Monster),
}

impl Entity for ConcreteEntity {
    fn name(&self) -> &str {
        match self {
            ConcreteEntity::Monster(monster) => monster.name(),
        }
    }

    fn location(&self) -> Location {
        match self {
            ConcreteEntity::Monster(monster) => monster.location(),
        }
    }

    fn symbol(&self) -> char {
        match self {
            ConcreteEntity::Monster(monster) => monster.symbol(),
        }
    }

    fn tick(&mut self, grid: &Grid, rng: &mut StdRng) {
        match self {
            ConcreteEntity::Monster(monster) => monster.tick(grid, rng),
        }
    }

    fn on_player_contact(&self) -> ContactEffect {
        match self {
            ConcreteEntity::Monster(monster) => monster.on_player_contact(),
        }
    }
}

impl From<Monster> for ConcreteEntity {
    fn from(monster: Monster) -> Self {
        ConcreteEntity::Monster(monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_counter_sequences() {
        let mut counter = SpawnCounter::new();
        assert_eq!(counter.next_monster_name(), "MONSTER0");
        assert_eq!(counter.next_monster_name(), "MONSTER1");
        assert_eq!(counter.next_player_name(), "Player1");
        assert_eq!(counter.monsters_spawned(), 2);
    }

    #[test]
    fn test_player_health_floors_at_zero() {
        let mut player = Player::new("Hero", 2);
        player.remove_health(1);
        assert_eq!(player.health(), 1);
        player.remove_health(5);
        assert_eq!(player.health(), 0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_player_score_and_display() {
        let mut player = Player::new("Hero", 5);
        assert_eq!(player.to_string(), "Hero : 0 pt");
        player.add_score(10);
        assert_eq!(player.to_string(), "Hero : 10 pts");
        player.remove_score(25);
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn test_player_reset() {
        let mut player = Player::new("Hero", 5);
        player.add_score(30);
        player.remove_health(4);
        player.set_location(Location::new(4, 4));
        player.reset(5, Location::new(1, 1));
        assert_eq!(player.score(), 0);
        assert_eq!(player.health(), 5);
        assert_eq!(player.location(), Location::new(1, 1));
    }

    #[test]
    fn test_monster_never_enters_trap_or_wall() {
        // Monster in the middle, surrounded by a trap and walls.
        let mut grid = Grid::filled(3, 3, CellType::Wall).unwrap();
        grid.set_cell(Location::new(1, 1), CellType::Floor, false).unwrap();
        grid.set_cell(Location::new(0, 1), CellType::Trap, false).unwrap();
        grid.set_cell(Location::new(1, 0), CellType::Door, false).unwrap();

        let mut monster = Monster::new("MONSTER0", 5, Location::new(1, 1), 1);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            monster.tick(&grid, &mut rng);
            assert_eq!(monster.location(), Location::new(1, 1));
        }
    }

    #[test]
    fn test_monster_moves_one_step_with_wrap() {
        let grid = Grid::filled(5, 4, CellType::Floor).unwrap();
        let start = Location::new(0, 0);
        let mut monster = Monster::new("MONSTER0", 5, start, 1);
        let mut rng = StdRng::seed_from_u64(99);

        let neighbours: Vec<Location> = Direction::all()
            .iter()
            .map(|d| grid.wrap(start, d.to_delta()))
            .collect();
        monster.tick(&grid, &mut rng);
        assert!(neighbours.contains(&monster.location()));
    }

    #[test]
    fn test_monster_contact_and_damage() {
        let mut monster = Monster::new("MONSTER3", 5, Location::new(2, 2), 1);
        assert_eq!(monster.on_player_contact(), ContactEffect::Damage(1));
        monster.receive_damage(7);
        assert_eq!(monster.health(), 0);
        assert_eq!(monster.symbol(), 'R');
    }

    #[test]
    fn test_concrete_entity_dispatch() {
        let entity: ConcreteEntity =
            Monster::new("MONSTER0", 5, Location::new(3, 1), 2).into();
        assert_eq!(entity.name(), "MONSTER0");
        assert_eq!(entity.location(), Location::new(3, 1));
        assert_eq!(entity.on_player_contact(), ContactEffect::Damage(2));
    }
}
