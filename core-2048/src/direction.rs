use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// All four directions in the order used for tie-breaking.
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Up, Self::Down, Self::Left, Self::Right].into_iter()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        };

        f.write_str(name)
    }
}

/// Classifies a swipe displacement by its dominant axis, in screen coordinates
/// (positive `y` points down). Equal magnitudes, including no movement at all, give
/// `None`.
pub fn get_direction_from_offset(x: f32, y: f32) -> Option<Direction> {
    let (abs_x, abs_y) = (x.abs(), y.abs());

    if abs_x > abs_y {
        Some(if x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if abs_y > abs_x {
        Some(if y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}
