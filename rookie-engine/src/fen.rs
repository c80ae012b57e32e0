//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//! <https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation>
//!
//! Rookie models four fields:
//! `<placement> <side to move> <castling> <en passant>`
//! The half-move clock and full-move number may follow. They are checked to be
//! numbers and then ignored, and are never written.
//!
//! Example:
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -

use std::convert::TryFrom;
use std::error;
use std::fmt::{self, Display};

use crate::board::Board;
use crate::coretypes::{Castling, Color, Piece, PieceKind, Rank, Square};
use crate::coretypes::{NUM_FILES, NUM_RANKS};
use crate::error::Result;
use crate::mailbox::Mailbox;

/// Fen trait allows for a type to be parsed from a FEN string and serialized to one.
pub trait Fen: Sized {
    /// Attempt to parse a FEN string into implementing type.
    fn parse_fen(fen: &str) -> std::result::Result<Self, ParseFenError>;

    /// Returns FEN string representation of implementing type.
    fn to_fen(&self) -> String;
}

/// Why a FEN string was rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParseFenError {
    /// Wrong number of whitespace separated fields.
    IllFormed,
    /// Piece placement field has a bad rank count, square count, or character.
    Placement,
    /// Side to move is not `w` or `b`.
    SideToMove,
    /// Castling is not `-` or a set of `KQkq`.
    Castling,
    /// En passant is not `-` or a square on the third or sixth rank.
    EnPassant,
    /// Half-move clock or full-move number is not a number.
    MoveCounters,
    /// A side does not have exactly one king.
    KingCount,
    /// A side has more than 16 pieces.
    PieceCount,
    /// A side has more than 8 pawns.
    PawnCount,
    /// A pawn stands on the first or last rank.
    PawnOnBackRank,
}

impl ParseFenError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseFenError::IllFormed => "expected 4 or 6 whitespace separated fields",
            ParseFenError::Placement => "piece placement malformed",
            ParseFenError::SideToMove => "side to move is not w|b",
            ParseFenError::Castling => "castling malformed",
            ParseFenError::EnPassant => "en passant malformed",
            ParseFenError::MoveCounters => "move counters malformed",
            ParseFenError::KingCount => "each side needs exactly one king",
            ParseFenError::PieceCount => "a side has more than 16 pieces",
            ParseFenError::PawnCount => "a side has more than 8 pawns",
            ParseFenError::PawnOnBackRank => "pawn on first or last rank",
        }
    }
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl error::Error for ParseFenError {}

/// Decode position text into a Board.
pub fn load_position(text: &str) -> Result<Board> {
    Ok(Board::parse_fen(text)?)
}

impl Fen for Board {
    fn parse_fen(fen: &str) -> std::result::Result<Self, ParseFenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(ParseFenError::IllFormed);
        }

        let state = parse_placement(fields[0])?;
        let turn = parse_side_to_move(fields[1])?;
        let castling = fields[2]
            .parse::<Castling>()
            .map_err(|_| ParseFenError::Castling)?;
        let en_passant = parse_en_passant(fields[3])?;
        for counter in &fields[4..] {
            counter
                .parse::<u32>()
                .map_err(|_| ParseFenError::MoveCounters)?;
        }

        validate_material(&state)?;

        Ok(Board {
            state,
            turn,
            castling,
            en_passant,
        })
    }

    fn to_fen(&self) -> String {
        let en_passant = match self.en_passant {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {}",
            placement_to_fen(&self.state),
            self.turn,
            self.castling,
            en_passant
        )
    }
}

/// Placement ::= rank8 '/' rank7 '/' ... '/' rank1
/// Each rank is a sequence of piece letters and digits 1-8 counting empty squares,
/// which must total exactly 8 squares.
fn parse_placement(placement: &str) -> std::result::Result<Mailbox, ParseFenError> {
    let mut mailbox = Mailbox::new();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err(ParseFenError::Placement);
    }

    for (rank_text, rank) in ranks.into_iter().zip((0..NUM_RANKS).rev()) {
        let mut file = 0usize;
        for ch in rank_text.chars() {
            match ch {
                '1'..='8' => file += ch as usize - '0' as usize,
                _ => {
                    let piece = Piece::try_from(ch).map_err(|_| ParseFenError::Placement)?;
                    if file >= NUM_FILES {
                        return Err(ParseFenError::Placement);
                    }
                    mailbox[rank * NUM_FILES + file] = Some(piece);
                    file += 1;
                }
            }
            if file > NUM_FILES {
                return Err(ParseFenError::Placement);
            }
        }
        if file != NUM_FILES {
            return Err(ParseFenError::Placement);
        }
    }

    Ok(mailbox)
}

fn parse_side_to_move(side: &str) -> std::result::Result<Color, ParseFenError> {
    match side {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ParseFenError::SideToMove),
    }
}

fn parse_en_passant(en_passant: &str) -> std::result::Result<Option<Square>, ParseFenError> {
    if en_passant == "-" {
        return Ok(None);
    }
    let square = en_passant
        .parse::<Square>()
        .map_err(|_| ParseFenError::EnPassant)?;
    match square.rank() {
        Rank::R3 | Rank::R6 => Ok(Some(square)),
        _ => Err(ParseFenError::EnPassant),
    }
}

/// Rejects material no legal game can reach.
fn validate_material(state: &Mailbox) -> std::result::Result<(), ParseFenError> {
    for color in Color::ALL {
        let pieces = || state.pieces().filter(move |(_, piece)| piece.color() == color);
        let count_of = |piece_kind: PieceKind| {
            pieces()
                .filter(|(_, piece)| piece.piece_kind() == piece_kind)
                .count()
        };

        if count_of(PieceKind::King) != 1 {
            return Err(ParseFenError::KingCount);
        }
        if pieces().count() > 16 {
            return Err(ParseFenError::PieceCount);
        }
        if count_of(PieceKind::Pawn) > 8 {
            return Err(ParseFenError::PawnCount);
        }
    }

    let pawn_on_back_rank = state.pieces().any(|(square, piece)| {
        piece.piece_kind() == PieceKind::Pawn && matches!(square.rank(), Rank::R1 | Rank::R8)
    });
    if pawn_on_back_rank {
        return Err(ParseFenError::PawnOnBackRank);
    }

    Ok(())
}

fn placement_to_fen(state: &Mailbox) -> String {
    let mut placement = String::with_capacity(64 + 7);

    for rank in (0..NUM_RANKS).rev() {
        let mut empty = 0u8;
        for file in 0..NUM_FILES {
            match state[rank * NUM_FILES + file] {
                Some(piece) => {
                    if empty > 0 {
                        placement.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    placement.push(char::from(piece));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push((b'0' + empty) as char);
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use Square::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

    #[test]
    fn parse_start_position() {
        let board = Board::parse_fen(START_FEN).unwrap();
        assert_eq!(board, Board::start_position());
        assert_eq!(board.to_fen(), START_FEN);

        let with_counters = format!("{START_FEN} 0 1");
        assert_eq!(Board::parse_fen(&with_counters).unwrap(), board);
    }

    #[test]
    fn parse_fields() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq e3";
        let board = Board::parse_fen(fen).unwrap();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.castling(), Castling::W_KING | Castling::B_QUEEN);
        assert_eq!(board.en_passant(), Some(E3));
        assert_eq!(
            board.state()[F3],
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(
            board.state()[A7],
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn reject_malformed_text() {
        let cases = [
            ("", ParseFenError::IllFormed),
            ("8/8/8/8/8/8/8/8 w", ParseFenError::IllFormed),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0", ParseFenError::IllFormed),
            ("4k3/8/8/8/8/8/4K3 w - -", ParseFenError::Placement),
            ("4k3/8/8/8/8/8/8/4K4 w - -", ParseFenError::Placement),
            ("4k3/8/8/8/8/8/8/4K2 w - -", ParseFenError::Placement),
            ("4k3/8/8/8/8/8/8/4X3 w - -", ParseFenError::Placement),
            ("4k3/8/8/8/8/8/8/4K3 x - -", ParseFenError::SideToMove),
            ("4k3/8/8/8/8/8/8/4K3 w KX -", ParseFenError::Castling),
            ("4k3/8/8/8/8/8/8/4K3 w - e4", ParseFenError::EnPassant),
            ("4k3/8/8/8/8/8/8/4K3 w - z9", ParseFenError::EnPassant),
            ("4k3/8/8/8/8/8/8/4K3 w - - a 1", ParseFenError::MoveCounters),
            ("8/8/8/8/8/8/8/4K3 w - -", ParseFenError::KingCount),
            ("4k3/8/8/8/8/8/8/3KK3 w - -", ParseFenError::KingCount),
            ("4k3/8/8/8/8/8/PPPPPPPP/P3K3 w - -", ParseFenError::PawnCount),
            ("4k3/8/8/8/8/8/8/4K2P w - -", ParseFenError::PawnOnBackRank),
            (
                "4k3/8/8/8/QQQQQQQQ/QQQQQQQQ/8/QQQQK3 w - -",
                ParseFenError::PieceCount,
            ),
        ];

        for (fen, expected) in cases {
            assert_eq!(Board::parse_fen(fen), Err(expected), "{fen}");
        }
    }

    #[test]
    fn load_position_reports_format_error() {
        let board = load_position(START_FEN).unwrap();
        assert_eq!(board, Board::start_position());

        let err = load_position("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fen);
    }
}
