//! # Level Module
//!
//! The level state machine: loading a layout, resolving player moves and
//! advancing monsters one tick at a time.

use crate::config::{COIN_SYMBOL, MONSTER_SYMBOL, SPAWN_SYMBOL};
use crate::game::{
    Cell, CellType, ConcreteEntity, ContactEffect, Direction, Entity, GameEvent, Grid, Location,
    Monster, Player, PlayerState, SpawnCounter,
};
use crate::{CytaleResult, GameConfig, LoadError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a level stands after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    /// Coins remain and the player is alive
    InProgress,
    /// No coins remain
    Completed,
    /// The player's health reached zero
    PlayerDead,
}

/// Result of one [`Level::apply_move`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: PlayerState,
    pub status: LevelStatus,
    pub events: Vec<GameEvent>,
}

/// A single maze: terrain, the player, monsters and the spawn point.
///
/// The level exclusively owns all of its state. Callers drive it through
/// [`Level::move_player`] (or [`Level::apply_move`]) and read it back through
/// the query methods.
#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid,
    player: Player,
    entities: Vec<ConcreteEntity>,
    /// Entity positions into `entities`, in list order
    entity_index: HashMap<Location, Vec<usize>>,
    default_spawn: Location,
    config: GameConfig,
    rng: StdRng,
    ticks: u64,
}

impl Level {
    /// Builds a level from rows of layout characters.
    ///
    /// `'1'` marks the spawn, `'.'` a coin on floor and `'R'` a monster on
    /// floor; every other character must be a terrain symbol. Monsters are
    /// named from `counter`. The player is moved onto the spawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::{GameConfig, Level, Location, Player, SpawnCounter};
    ///
    /// let rows = ["#.#", "#1#", "###"];
    /// let level = Level::load(
    ///     &rows,
    ///     Player::new("Hero", 5),
    ///     &GameConfig::new(1),
    ///     &mut SpawnCounter::new(),
    /// )
    /// .unwrap();
    /// assert_eq!(level.player().location(), Location::new(1, 1));
    /// assert_eq!(level.coins_remaining(), 1);
    /// ```
    pub fn load<S: AsRef<str>>(
        rows: &[S],
        player: Player,
        config: &GameConfig,
        counter: &mut SpawnCounter,
    ) -> CytaleResult<Self> {
        let rows: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 || rows.iter().any(Vec::is_empty) {
            return Err(LoadError::EmptyLayout.into());
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(LoadError::RaggedLayout {
                row,
                expected: width,
                found,
            }
            .into());
        }

        let mut spawn: Option<Location> = None;
        let mut entities = Vec::new();
        let mut cells = Vec::with_capacity(rows.len());

        for (y, row) in rows.iter().enumerate() {
            let mut cell_row = Vec::with_capacity(width);
            for (x, &symbol) in row.iter().enumerate() {
                let location = Location::new(x as i32, y as i32);
                let mut has_coin = false;

                let cell_type = match symbol {
                    SPAWN_SYMBOL => {
                        if let Some(first) = spawn {
                            return Err(LoadError::DuplicateSpawn {
                                x: location.x,
                                y: location.y,
                                first_x: first.x,
                                first_y: first.y,
                            }
                            .into());
                        }
                        spawn = Some(location);
                        CellType::Floor
                    }
                    COIN_SYMBOL => {
                        has_coin = true;
                        CellType::Floor
                    }
                    MONSTER_SYMBOL => {
                        let monster = Monster::new(
                            counter.next_monster_name(),
                            config.monster_health,
                            location,
                            config.contact_damage,
                        );
                        entities.push(ConcreteEntity::Monster(monster));
                        CellType::Floor
                    }
                    other => CellType::from_symbol(other, location.x, location.y)?,
                };

                cell_row.push(Cell::new(cell_type, location, has_coin));
            }
            cells.push(cell_row);
        }

        let spawn = spawn.ok_or(LoadError::MissingSpawn)?;
        let grid = Grid::new(cells)?;

        log::debug!(
            "Loaded {}x{} level with {} coins and {} monsters, spawn at {}",
            grid.width(),
            grid.height(),
            grid.coins_remaining(),
            entities.len(),
            spawn
        );

        Ok(Self::assemble(grid, spawn, entities, player, config))
    }

    /// Builds a level from an existing grid and explicit spawn coordinates.
    ///
    /// Fails with [`LoadError::InvalidSpawnPosition`] if the spawn is outside
    /// the grid or on a cell the player cannot stand on.
    pub fn from_grid(
        grid: Grid,
        spawn: Location,
        player: Player,
        config: &GameConfig,
    ) -> CytaleResult<Self> {
        let reason = match grid.cell_at(spawn) {
            Err(_) => Some("out of bounds"),
            Ok(cell) if !cell.is_walkable() => Some("not walkable"),
            Ok(_) => None,
        };
        if let Some(reason) = reason {
            return Err(LoadError::InvalidSpawnPosition {
                x: spawn.x,
                y: spawn.y,
                reason: reason.to_string(),
            }
            .into());
        }

        Ok(Self::assemble(grid, spawn, Vec::new(), player, config))
    }

    fn assemble(
        grid: Grid,
        spawn: Location,
        entities: Vec<ConcreteEntity>,
        mut player: Player,
        config: &GameConfig,
    ) -> Self {
        player.set_location(spawn);

        let mut level = Self {
            grid,
            player,
            entities,
            entity_index: HashMap::new(),
            default_spawn: spawn,
            config: config.clone(),
            rng: StdRng::seed_from_u64(config.seed),
            ticks: 0,
        };
        level.rebuild_index();
        level
    }

    /// Moves the player one cell, resolves what it lands on, then ticks.
    ///
    /// A blocked move leaves the player in place but the tick still runs.
    /// Returns the events of the turn in the order they happened.
    pub fn move_player(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let was_completed = self.is_completed();

        let from = self.player.location();
        let target = self.grid.wrap(from, direction.to_delta());
        let target_type = self
            .grid
            .cell_at(target)
            .ok()
            .map(Cell::cell_type)
            .filter(|cell_type| cell_type.is_walkable());

        match target_type {
            Some(cell_type) => {
                log::debug!("Player moves {} from {} to {}", direction, from, target);
                self.player.set_location(target);
                events.push(GameEvent::PlayerMoved { from, to: target });

                if let Ok(cell) = self.grid.cell_at_mut(target) {
                    if cell.take_coin() {
                        self.player.add_score(self.config.coin_value);
                        events.push(GameEvent::CoinCollected {
                            location: target,
                            value: self.config.coin_value,
                        });
                    }
                }

                if cell_type == CellType::Trap {
                    log::info!("Player stepped on a trap at {}", target);
                    events.push(GameEvent::TrapTriggered { location: target });
                    self.apply_damage(self.config.trap_damage, None, &mut events);
                }

                self.resolve_contacts(&mut events);
            }
            None => {
                log::debug!("Player move {} into {} is blocked", direction, target);
                events.push(GameEvent::MoveBlocked { direction, target });
            }
        }

        self.tick();

        // A turn that kills the player does not clear the level.
        if !was_completed && self.is_completed() && !self.player.is_dead() {
            log::info!("Level completed with score {}", self.player.score());
            events.push(GameEvent::LevelCompleted);
        }

        events
    }

    /// Moves the player and reports the resulting state in one value.
    pub fn apply_move(&mut self, direction: Direction) -> TurnReport {
        let events = self.move_player(direction);
        TurnReport {
            player: self.player.state(),
            status: self.status(),
            events,
        }
    }

    /// Damages the player and sends them back to the default spawn.
    ///
    /// This is the single path for every kind of damage.
    pub fn damage_player(&mut self, amount: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.apply_damage(amount, None, &mut events);
        events
    }

    fn apply_damage(
        &mut self,
        amount: u32,
        attacker: Option<String>,
        events: &mut Vec<GameEvent>,
    ) {
        let was_alive = !self.player.is_dead();
        self.player.remove_health(amount);

        if let Some(attacker) = attacker {
            log::info!(
                "{} attacked Player! Player health is now {}",
                attacker,
                self.player.health()
            );
            events.push(GameEvent::PlayerAttacked {
                attacker,
                damage: amount,
                health: self.player.health(),
            });
        }

        self.player.set_location(self.default_spawn);
        events.push(GameEvent::PlayerRespawned {
            location: self.default_spawn,
        });

        if was_alive && self.player.is_dead() {
            log::info!("Player {} died", self.player.name());
            events.push(GameEvent::PlayerDied);
        }
    }

    fn resolve_contacts(&mut self, events: &mut Vec<GameEvent>) {
        let here = self.player.location();
        let contacts: Vec<(String, ContactEffect)> = self
            .entities_at(here)
            .into_iter()
            .map(|entity| (entity.name().to_string(), entity.on_player_contact()))
            .collect();

        for (name, effect) in contacts {
            match effect {
                ContactEffect::Damage(amount) => self.apply_damage(amount, Some(name), events),
                ContactEffect::None => {}
            }
        }
    }

    /// Advances every entity once, in list order.
    ///
    /// Entities only see terrain, so none of them observes another's move
    /// from the same tick.
    pub fn tick(&mut self) {
        self.entity_index.clear();
        for entity in &mut self.entities {
            entity.tick(&self.grid, &mut self.rng);
        }
        self.rebuild_index();
        self.ticks += 1;
    }

    fn rebuild_index(&mut self) {
        self.entity_index.clear();
        for (position, entity) in self.entities.iter().enumerate() {
            self.entity_index
                .entry(entity.location())
                .or_default()
                .push(position);
        }
    }

    /// Restores the player to score 0, initial health and the default spawn.
    pub fn reset_player(&mut self) {
        self.player.reset(self.config.initial_health, self.default_spawn);
    }

    /// True when no cell holds a coin.
    pub fn is_completed(&self) -> bool {
        self.grid.cells().all(|cell| !cell.has_coin())
    }

    pub fn coins_remaining(&self) -> usize {
        self.grid.coins_remaining()
    }

    pub fn is_player_dead(&self) -> bool {
        self.player.is_dead()
    }

    /// Death takes precedence over completion.
    pub fn status(&self) -> LevelStatus {
        if self.is_player_dead() {
            LevelStatus::PlayerDead
        } else if self.is_completed() {
            LevelStatus::Completed
        } else {
            LevelStatus::InProgress
        }
    }

    /// All entities at `location`, in list order.
    pub fn entities_at(&self, location: Location) -> Vec<&ConcreteEntity> {
        self.entity_index
            .get(&location)
            .map(|positions| positions.iter().map(|&i| &self.entities[i]).collect())
            .unwrap_or_default()
    }

    pub fn entities(&self) -> &[ConcreteEntity] {
        &self.entities
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn default_spawn(&self) -> Location {
        self.default_spawn
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Number of ticks run since load.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
