//! Static Evaluation Functions.
//!
//! Every score here is relative to a given side: positive values are good for
//! that side, negative values are good for its opponent.

use crate::board::Board;
use crate::coretypes::{Color, Cp, CpKind, PieceKind, PlyKind};
use crate::coretypes::PieceKind::*;

impl PieceKind {
    /// Default, independent value per piece.
    pub const fn centipawns(&self) -> Cp {
        Cp(match self {
            Pawn => 100, // 100 Centipawn == 1 Pawn
            Knight => 300,
            Bishop => 300,
            Rook => 500,
            Queen => 900,
            King => 0,
        })
    }
}

// Evaluation Constants
const MOBILITY_CP: Cp = Cp(10);

/// Terms used by `evaluate`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Evaluation {
    /// Material balance only.
    #[default]
    Material,
    /// Material balance plus the difference in legal move counts.
    MaterialMobility,
}

/// Given a terminal node where `mover` has no legal moves, return a score relative
/// to `side` representing a checkmate or a draw.
/// A checkmate `ply` plies from the root scores a little less than one at the root,
/// so shorter mates are preferred and longer ones are delayed.
pub fn terminal(board: &Board, side: Color, mover: Color, ply: PlyKind) -> Cp {
    if !board.is_in_check(mover) {
        Cp::DRAW
    } else if mover == side {
        -Cp::mate_in(ply)
    } else {
        Cp::mate_in(ply)
    }
}

/// Primary evaluate function for engine, with return relative to `side`.
/// Statically evaluates a non-terminal board.
pub fn evaluate(board: &Board, side: Color, evaluation: Evaluation) -> Cp {
    match evaluation {
        Evaluation::Material => material(board, side),
        Evaluation::MaterialMobility => material(board, side) + mobility(board, side),
    }
}

/// Returns strength difference of pieces on the board.
/// Each piece of `side` adds its value, each opposing piece subtracts it.
pub fn material(board: &Board, side: Color) -> Cp {
    board
        .state()
        .pieces()
        .map(|(_, piece)| match piece.color() == side {
            true => piece.piece_kind().centipawns(),
            false => -piece.piece_kind().centipawns(),
        })
        .fold(Cp::default(), |acc, value| acc + value)
}

/// Returns the legal move count of `side` minus that of its opponent, in centipawns.
pub fn mobility(board: &Board, side: Color) -> Cp {
    let own = board.find_all_legal_moves(side).len() as CpKind;
    let opponent = board.find_all_legal_moves(!side).len() as CpKind;
    MOBILITY_CP * (own - opponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn start_position_is_even() {
        let board = Board::start_position();
        for side in Color::ALL {
            assert_eq!(material(&board, side), Cp(0));
            assert_eq!(mobility(&board, side), Cp(0));
            assert_eq!(evaluate(&board, side, Evaluation::MaterialMobility), Cp(0));
        }
    }

    #[test]
    fn material_is_relative_to_side() {
        // White is up a rook, black has an extra pawn.
        let board = Board::parse_fen("4k3/p7/8/8/8/8/8/R3K3 w - -").unwrap();
        assert_eq!(material(&board, Color::White), Cp(400));
        assert_eq!(material(&board, Color::Black), Cp(-400));
        assert_eq!(evaluate(&board, Color::White, Evaluation::Material), Cp(400));
    }

    #[test]
    fn terminal_scores_mates_and_draws() {
        // Back rank mate, black to move.
        let mated = Board::parse_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - -").unwrap();
        assert_eq!(terminal(&mated, Color::White, Color::Black, 1), Cp::mate_in(1));
        assert_eq!(terminal(&mated, Color::Black, Color::Black, 1), -Cp::mate_in(1));
        assert!(terminal(&mated, Color::White, Color::Black, 3) < Cp::mate_in(1));

        let stalemate = Board::parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
        assert_eq!(terminal(&stalemate, Color::White, Color::Black, 1), Cp::DRAW);
    }

    #[test]
    fn mobility_counts_legal_moves() {
        // White queen and king versus a lone black king.
        let board = Board::parse_fen("7k/8/8/8/8/8/8/Q3K3 w - -").unwrap();
        let white = board.find_all_legal_moves(Color::White).len() as CpKind;
        let black = board.find_all_legal_moves(Color::Black).len() as CpKind;
        assert!(white > black);
        assert_eq!(mobility(&board, Color::White), Cp(10 * (white - black)));
        assert_eq!(mobility(&board, Color::Black), -mobility(&board, Color::White));
        assert_eq!(
            evaluate(&board, Color::White, Evaluation::MaterialMobility),
            Cp(900) + mobility(&board, Color::White)
        );
    }
}
