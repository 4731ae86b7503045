use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) holds {value}, which is not zero or a power of two")]
    InvalidTile { row: usize, col: usize, value: u32 },
}
