//! Board representation
//!
//! The board is a fixed 31×31 grid. Coordinates follow the referee's convention: `x` is the
//! column, `y` is the row, `(0, 0)` is the top-left corner.

use std::fmt;

/// Side length of the board.
pub const BOARD_SIZE: usize = 31;
/// Number of cells on the board.
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
/// The opening cell `(15, 15)`.
pub const CENTER: Pos = Pos { x: 15, y: 15 };

/// Content of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    /// Nobody played here yet
    #[default]
    Empty,
    /// Stone of this agent
    Agent,
    /// Stone of the remote player
    Opponent,
}

impl Stone {
    /// The other side. `Empty` stays `Empty`.
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Agent => Stone::Opponent,
            Stone::Opponent => Stone::Agent,
            Stone::Empty => Stone::Empty,
        }
    }
}

/// A cell on the board, always in bounds.
///
/// Use [`Pos::try_new`] to convert untrusted signed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Column
    pub x: u8,
    /// Row
    pub y: u8,
}

impl Pos {
    /// Panics in debug builds if out of bounds.
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE);
        Self { x, y }
    }

    /// `None` when `(x, y)` is outside the board.
    #[inline]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if Self::is_in_bounds(x, y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// True iff `0 <= x < 31` and `0 <= y < 31`.
    #[inline]
    pub fn is_in_bounds(x: i32, y: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
    }

    /// The cell at `self + (dx, dy) * steps`, if still on the board.
    #[inline]
    pub fn offset(self, (dx, dy): (i32, i32), steps: i32) -> Option<Pos> {
        Self::try_new(self.x as i32 + dx * steps, self.y as i32 + dy * steps)
    }

    #[inline]
    fn to_index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    #[inline]
    fn from_index(idx: usize) -> Self {
        Self {
            x: (idx % BOARD_SIZE) as u8,
            y: (idx / BOARD_SIZE) as u8,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cell occupancy of a single game.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Stone; TOTAL_CELLS],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [Stone::Empty; TOTAL_CELLS],
        }
    }

    /// Stone at `pos`
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index()]
    }

    /// True iff nobody played at `pos`
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// True iff `(x, y)` is on the board and the cell is empty.
    #[inline]
    pub fn is_valid_move(&self, x: i32, y: i32) -> bool {
        Pos::try_new(x, y).is_some_and(|pos| self.is_empty(pos))
    }

    /// Writes `stone` at `pos`.
    ///
    /// The caller checks [`Board::is_valid_move`] beforehand: an occupied cell is never
    /// overwritten during a game.
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.is_empty(pos), "{pos} is already occupied");
        self.cells[pos.to_index()] = stone;
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.cells.fill(Stone::Empty);
    }

    /// Total stones on board
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != Stone::Empty).count()
    }

    /// No stone at all
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|&s| s == Stone::Empty)
    }

    /// No empty cell left
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&s| s != Stone::Empty)
    }

    /// Empty cells in row-major order, starting at `(0, 0)`.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == Stone::Empty)
            .map(|(idx, _)| Pos::from_index(idx))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let c = match self.get(Pos::new(x as u8, y as u8)) {
                    Stone::Agent => 'X',
                    Stone::Opponent => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
