use std::fmt;

pub mod direction;
pub mod error;
pub mod logic;
pub mod metrics;

pub use direction::{get_direction_from_offset, Direction};
pub use error::BoardError;

/// A 4×4 grid of tile values, row-major. Each cell is either 0 (empty) or a power
/// of two. Boards are plain values: every operation returns a new board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board([[u32; 4]; 4]);

impl Board {
    pub const EMPTY: Self = Self([[0; 4]; 4]);

    /// Builds a board without validating the cells.
    pub const fn from_cells(cells: [[u32; 4]; 4]) -> Self {
        Self(cells)
    }

    pub const fn cells(&self) -> [[u32; 4]; 4] {
        self.0
    }

    pub const fn row(&self, i: usize) -> [u32; 4] {
        self.0[i]
    }

    pub const fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    #[must_use]
    pub const fn with_cell(self, row: usize, col: usize, value: u32) -> Self {
        let mut cells = self.0;
        cells[row][col] = value;

        Self(cells)
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell == 0)
                .map(move |(j, _)| (i, j))
        })
    }

    pub fn count_empty_cells(&self) -> u32 {
        self.0.iter().flatten().filter(|&&cell| cell == 0).count() as u32
    }

    pub fn max_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl TryFrom<[[u32; 4]; 4]> for Board {
    type Error = BoardError;

    fn try_from(cells: [[u32; 4]; 4]) -> Result<Self, Self::Error> {
        for (row, line) in cells.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && !value.is_power_of_two() {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
            }
        }

        Ok(Self(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }

            for (j, cell) in row.iter().enumerate() {
                if j != 0 {
                    f.write_str(" ")?;
                }

                if *cell == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{cell:>6}")?;
                }
            }
        }

        Ok(())
    }
}

pub const fn mirror_board(board: Board) -> Board {
    let mut cells = board.0;
    let mut i = 0;

    while i < 4 {
        let row = board.0[i];
        cells[i] = [row[3], row[2], row[1], row[0]];
        i += 1;
    }

    Board(cells)
}

pub const fn transpose_board(board: Board) -> Board {
    let mut cells = [[0; 4]; 4];
    let mut i = 0;

    while i < 4 {
        let mut j = 0;

        while j < 4 {
            cells[j][i] = board.0[i][j];
            j += 1;
        }

        i += 1;
    }

    Board(cells)
}

/// Transpose followed by mirroring each row; a quarter turn clockwise.
pub const fn transpose_rotate_board(board: Board) -> Board {
    mirror_board(transpose_board(board))
}

/// Inverse of [`transpose_rotate_board`].
pub const fn rotate_transpose_board(board: Board) -> Board {
    transpose_board(mirror_board(board))
}
