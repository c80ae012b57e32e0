//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.
//!
//! A Mailbox is an array of size Files x Ranks where each index may contain a
//! chess piece or be empty.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use crate::coretypes::{
    Color, Piece, PieceKind, Square, SquareIndexable, NUM_FILES, NUM_RANKS, NUM_SQUARES,
};

/// Classic 8x8 square board representation of Chess board.
/// Index starts at A1.
/// A1 = idx 0
/// B1 = idx 1
/// A2 = idx 8
/// H8 = idx 63
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [Option<Piece>; Self::SIZE],
}

impl Mailbox {
    pub const FILES: usize = NUM_FILES;
    pub const RANKS: usize = NUM_RANKS;
    pub const SIZE: usize = NUM_SQUARES;

    /// Creates an empty Mailbox, where all squares are None.
    pub const fn new() -> Self {
        Mailbox {
            board: [None; Mailbox::SIZE],
        }
    }

    /// Create Mailbox with pieces arranged in starting chess position.
    pub fn start_position() -> Self {
        use Color::*;
        use PieceKind::*;
        use Square::*;
        let mut mb = Self::new();

        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (file, piece_kind) in back_rank.into_iter().enumerate() {
            mb[A1 as usize + file] = Some(Piece::new(White, piece_kind));
            mb[A2 as usize + file] = Some(Piece::new(White, Pawn));
            mb[A7 as usize + file] = Some(Piece::new(Black, Pawn));
            mb[A8 as usize + file] = Some(Piece::new(Black, piece_kind));
        }

        mb
    }

    pub fn board(&self) -> &[Option<Piece>; Self::SIZE] {
        &self.board
    }

    /// Iterator over every occupied square and the piece on it, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| self[square].map(|piece| (square, piece)))
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626);

        pretty.push_str(RANK_SEP);
        for rank in (0..Self::RANKS).rev() {
            pretty.push_str("| ");

            for file in 0..Self::FILES {
                pretty.push(match self[rank * Self::FILES + file] {
                    Some(piece) => char::from(piece),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&(rank + 1).to_string());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

/// Be careful with accessing with usize, as usize value out of bounds will panic.
impl Index<usize> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.board[idx]
    }
}

impl IndexMut<usize> for Mailbox {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.board[idx]
    }
}

impl<I: SquareIndexable> Index<I> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, idx: I) -> &Self::Output {
        &self.board[idx.idx()]
    }
}

impl<I: SquareIndexable> IndexMut<I> for Mailbox {
    fn index_mut(&mut self, idx: I) -> &mut Self::Output {
        &mut self.board[idx.idx()]
    }
}

/// Default value is that of a standard starting chess position.
impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::start_position()
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn start_position_layout() {
        let mb = Mailbox::start_position();
        assert_eq!(mb[E1], Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(mb[D8], Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(mb[H2], Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(mb[A7], Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(mb[E4], None);
        assert_eq!(mb.pieces().count(), 32);
    }

    #[test]
    fn pretty_start_position_mailbox() {
        let mb = Mailbox::start_position();
        let pretty = mb.pretty();
        let first_rank = pretty.lines().nth(1).unwrap();
        assert_eq!(first_rank, "| r | n | b | q | k | b | n | r | 8");
        assert!(pretty.ends_with("  a   b   c   d   e   f   g   h\n"));
    }
}
