use std::{
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::{AsRawFd, RawFd},
};

use lib_2048::Board;
use tracing::warn;

const SQUARE_HEIGHT: usize = 3;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPARATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

fn tile_colour(tile: u32) -> Option<u8> {
    tile.trailing_zeros()
        .checked_sub(1)
        .filter(|_| tile != 0)
        .map(|i| COLOUR_TABLE[i as usize % COLOUR_TABLE.len()])
}

fn draw_padding_row(out: &mut impl Write, row: [u32; 4]) -> io::Result<()> {
    for tile in row {
        if let Some(colour) = tile_colour(tile) {
            write!(out, "┃\x1b[{}m       \x1b[m", colour + 10)?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    Ok(())
}

fn draw_board_row(out: &mut impl Write, row: [u32; 4]) -> io::Result<()> {
    for _ in 0..(SQUARE_HEIGHT - 1) / 2 {
        draw_padding_row(out, row)?;
    }

    out.write_all(b"\x1b[E")?;

    for tile in row {
        if let Some(colour) = tile_colour(tile) {
            write!(out, "┃\x1b[7m\x1b[{colour}m{tile:^7}\x1b[m")?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    out.write_all(b"\x1b[E")?;

    for _ in 0..(SQUARE_HEIGHT - 1).div_ceil(2) {
        draw_padding_row(out, row)?;
    }

    Ok(())
}

fn write_header(out: &mut impl Write, score: u32, best_score: u32) -> io::Result<()> {
    write!(out, "Score: {score}  Best: {best_score}\x1b[K")
}

pub fn draw_board(out: &mut impl Write, board: Board, score: u32, best_score: u32) -> io::Result<()> {
    out.write_all(b"\n")?;
    write_header(out, score, best_score)?;
    out.write_all(b"\n")?;
    out.write_all(TOP_ROW)?;

    for i in 0..4 {
        if i != 0 {
            out.write_all(SEPARATOR_ROW)?;
        }

        for _ in 0..SQUARE_HEIGHT {
            out.write_all(EMPTY_ROW)?;
        }
    }

    out.write_all(BOTTOM_ROW)?;

    redraw_board(out, Board::EMPTY, board, (score, score), best_score)
}

/// Redraws the rows that differ between `old_board` and `new_board`, and the header
/// when the score changed. The cursor starts and ends on the line below the board.
pub fn redraw_board(
    out: &mut impl Write,
    old_board: Board,
    new_board: Board,
    (old_score, new_score): (u32, u32),
    best_score: u32,
) -> io::Result<()> {
    let mut current_line = if new_score != old_score {
        let target_line = SQUARE_HEIGHT * 4 + 6;
        write!(out, "\x1b[{target_line}F")?;
        write_header(out, new_score, best_score)?;

        target_line
    } else {
        0
    };

    let changed_rows = (0..4).filter(|&i| new_board.row(i) != old_board.row(i));

    for row in changed_rows {
        let final_row_to_end = (SQUARE_HEIGHT - 1).div_ceil(2) + 2;
        let between_rows = SQUARE_HEIGHT + 1;
        let target_line = final_row_to_end + between_rows * (3 - row) + 1;

        if target_line > current_line {
            write!(out, "\x1b[{}F", target_line - current_line)?;
        } else {
            write!(out, "\x1b[{}E", current_line - target_line)?;
        }

        draw_board_row(out, new_board.row(row))?;
        current_line = target_line - 2;
    }

    if current_line != 0 {
        write!(out, "\x1b[{current_line}E")?;
    }

    out.flush()
}

/// Replaces the line below the board without moving off it.
pub fn draw_status(out: &mut impl Write, message: &str) -> io::Result<()> {
    write!(out, "\r\x1b[2K{message}\r")?;
    out.flush()
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios = MaybeUninit::uninit();

    unsafe {
        if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(termios.assume_init())
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(fd, libc::TCSADRAIN, termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

/// Echo and line buffering stay off while this is alive; dropping it restores the
/// settings found on entry.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
}

impl RawMode {
    pub fn enable(fd: &impl AsRawFd) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut termios = original;
        termios.c_lflag &= !(libc::ECHO | libc::ICANON);

        set_termios(fd, &termios)?;

        Ok(Self { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(error) = set_termios(self.fd, &self.original) {
            warn!(%error, "could not restore terminal settings");
        }
    }
}
