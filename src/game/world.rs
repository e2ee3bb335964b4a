//! # World Module
//!
//! Terrain representation: cell kinds, individual cells and the level grid.

use crate::config::COIN_GLYPH;
use crate::game::Location;
use crate::{CytaleError, CytaleResult, LoadError};
use serde::{Deserialize, Serialize};

/// Closed set of terrain kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Wall,
    Floor,
    /// Parsed and drawn, but blocks movement like a wall.
    Door,
    /// Walkable; costs the player health and sends them back to spawn.
    Trap,
}

impl CellType {
    /// Returns the display symbol for this terrain.
    pub fn symbol(self) -> char {
        match self {
            CellType::Wall => '#',
            CellType::Floor => ' ',
            CellType::Door => 'D',
            CellType::Trap => '*',
        }
    }

    /// Returns true if the player may stand on this terrain.
    pub fn is_walkable(self) -> bool {
        matches!(self, CellType::Floor | CellType::Trap)
    }

    /// Parses a terrain symbol.
    ///
    /// Only terrain symbols are accepted here; the spawn, coin and monster
    /// markers are resolved by the level loader before a cell is built.
    ///
    /// # Examples
    ///
    /// ```
    /// use cytale::CellType;
    ///
    /// assert_eq!(CellType::from_symbol('#', 0, 0).unwrap(), CellType::Wall);
    /// assert!(CellType::from_symbol('?', 0, 0).is_err());
    /// ```
    pub fn from_symbol(symbol: char, x: i32, y: i32) -> Result<CellType, LoadError> {
        Self::all()
            .into_iter()
            .find(|cell_type| cell_type.symbol() == symbol)
            .ok_or(LoadError::UnknownSymbol { symbol, x, y })
    }

    /// Returns every terrain kind.
    pub fn all() -> [CellType; 4] {
        [CellType::Wall, CellType::Floor, CellType::Door, CellType::Trap]
    }
}

/// One grid position: terrain plus coin presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    cell_type: CellType,
    location: Location,
    has_coin: bool,
}

impl Cell {
    /// Creates a cell. A coin is only kept when the terrain is walkable.
    pub fn new(cell_type: CellType, location: Location, has_coin: bool) -> Self {
        Self {
            cell_type,
            location,
            has_coin: has_coin && cell_type.is_walkable(),
        }
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn has_coin(&self) -> bool {
        self.has_coin
    }

    pub fn is_walkable(&self) -> bool {
        self.cell_type.is_walkable()
    }

    /// Removes the coin, returning whether there was one to take.
    pub fn take_coin(&mut self) -> bool {
        std::mem::replace(&mut self.has_coin, false)
    }

    /// Display symbol: the coin glyph while a coin remains, else the terrain.
    pub fn symbol(&self) -> char {
        if self.has_coin {
            COIN_GLYPH
        } else {
            self.cell_type.symbol()
        }
    }
}

/// Rectangular array of cells, indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Builds a grid from rows of cells.
    ///
    /// Fails with [`LoadError::EmptyLayout`] when there are no rows or the
    /// first row is empty, and [`LoadError::RaggedLayout`] when a row's width
    /// differs from the first.
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self, LoadError> {
        let height = cells.len();
        let width = cells.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LoadError::EmptyLayout);
        }

        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(LoadError::RaggedLayout {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Builds a `width × height` grid of one terrain kind with no coins.
    pub fn filled(width: usize, height: usize, cell_type: CellType) -> Result<Self, LoadError> {
        let cells = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| Cell::new(cell_type, Location::new(x as i32, y as i32), false))
                    .collect()
            })
            .collect();
        Self::new(cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if `location` lies inside `[0,width) × [0,height)`.
    pub fn contains(&self, location: Location) -> bool {
        location.x >= 0
            && location.y >= 0
            && (location.x as usize) < self.width
            && (location.y as usize) < self.height
    }

    /// Looks up the cell at `location`.
    pub fn cell_at(&self, location: Location) -> CytaleResult<&Cell> {
        if !self.contains(location) {
            return Err(self.out_of_bounds(location));
        }
        Ok(&self.cells[location.y as usize][location.x as usize])
    }

    /// Looks up the cell at `location` mutably.
    pub fn cell_at_mut(&mut self, location: Location) -> CytaleResult<&mut Cell> {
        if !self.contains(location) {
            return Err(self.out_of_bounds(location));
        }
        Ok(&mut self.cells[location.y as usize][location.x as usize])
    }

    /// Replaces the cell at `location`, keeping the coin only on walkable terrain.
    pub fn set_cell(
        &mut self,
        location: Location,
        cell_type: CellType,
        has_coin: bool,
    ) -> CytaleResult<()> {
        let cell = self.cell_at_mut(location)?;
        *cell = Cell::new(cell_type, location, has_coin);
        Ok(())
    }

    /// Returns the neighbour of `location` in `delta`, wrapping at the edges.
    pub fn wrap(&self, location: Location, delta: Location) -> Location {
        location.wrapped(delta, self.width, self.height)
    }

    /// Iterates over all rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }

    /// Number of coins still on the grid.
    pub fn coins_remaining(&self) -> usize {
        self.cells().filter(|cell| cell.has_coin()).count()
    }

    fn out_of_bounds(&self, location: Location) -> CytaleError {
        CytaleError::OutOfBounds {
            x: location.x,
            y: location.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_symbols_round_trip() {
        for cell_type in CellType::all() {
            assert_eq!(
                CellType::from_symbol(cell_type.symbol(), 0, 0).unwrap(),
                cell_type
            );
        }
    }

    #[test]
    fn test_cell_type_walkability() {
        assert!(CellType::Floor.is_walkable());
        assert!(CellType::Trap.is_walkable());
        assert!(!CellType::Wall.is_walkable());
        assert!(!CellType::Door.is_walkable());
    }

    #[test]
    fn test_markers_are_not_cell_types() {
        for symbol in ['1', '.', 'R', 'x'] {
            let err = CellType::from_symbol(symbol, 2, 3).unwrap_err();
            assert_eq!(err, LoadError::UnknownSymbol { symbol, x: 2, y: 3 });
        }
    }

    #[test]
    fn test_cell_coin_never_on_wall() {
        let wall = Cell::new(CellType::Wall, Location::new(0, 0), true);
        assert!(!wall.has_coin());
        assert_eq!(wall.symbol(), '#');
    }

    #[test]
    fn test_take_coin_once() {
        let mut cell = Cell::new(CellType::Floor, Location::new(1, 0), true);
        assert_eq!(cell.symbol(), 'C');
        assert!(cell.take_coin());
        assert!(!cell.take_coin());
        assert_eq!(cell.symbol(), ' ');
    }

    #[test]
    fn test_grid_rejects_empty_and_ragged() {
        assert_eq!(Grid::new(vec![]).unwrap_err(), LoadError::EmptyLayout);
        assert_eq!(Grid::new(vec![vec![]]).unwrap_err(), LoadError::EmptyLayout);

        let row = |len: usize, y: i32| -> Vec<Cell> {
            (0..len)
                .map(|x| Cell::new(CellType::Floor, Location::new(x as i32, y), false))
                .collect()
        };
        let err = Grid::new(vec![row(3, 0), row(2, 1)]).unwrap_err();
        assert_eq!(
            err,
            LoadError::RaggedLayout {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = Grid::filled(4, 3, CellType::Floor).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.cell_at(Location::new(3, 2)).is_ok());
        for loc in [
            Location::new(4, 0),
            Location::new(0, 3),
            Location::new(-1, 0),
            Location::new(0, -1),
        ] {
            assert!(matches!(
                grid.cell_at(loc),
                Err(CytaleError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_coins_remaining() {
        let mut grid = Grid::filled(3, 3, CellType::Floor).unwrap();
        assert_eq!(grid.coins_remaining(), 0);
        grid.set_cell(Location::new(1, 1), CellType::Floor, true).unwrap();
        grid.set_cell(Location::new(2, 2), CellType::Wall, true).unwrap();
        assert_eq!(grid.coins_remaining(), 1);
    }
}
