pub use core_2048::*;

pub mod ai;
pub mod game;
