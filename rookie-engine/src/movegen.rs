//! Pseudo-legal move generation and attack detection.
//!
//! Every function here only reads a Board. Moves are pseudo-legal, meaning they
//! follow the movement pattern of a piece but may leave the mover's own king
//! in check. The check-filter lives in `Board::find_legal_moves`.

use crate::board::Board;
use crate::coretypes::{Castling, Color, File, Move, Piece, PieceKind, Square};
use crate::coretypes::{PieceKind::*, Square::*};
use crate::mailbox::Mailbox;
use crate::movelist::PieceMoveList;

/// File and rank steps of a knight jump.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// File and rank steps to the 8 neighbouring squares.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Ray directions of a bishop.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Ray directions of a rook.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Generate the pseudo-legal moves of the piece of `color` standing on `from`.
/// Returns an empty list if `from` is empty or holds a piece of the other color.
pub fn pseudo_legal_moves(board: &Board, from: Square, color: Color) -> PieceMoveList {
    let mut moves = PieceMoveList::new();

    let piece = match board.state[from] {
        Some(piece) if piece.color == color => piece,
        _ => return moves,
    };

    match piece.piece_kind {
        Pawn => pawn_pseudo_moves(&mut moves, board, from, color),
        Knight => knight_pseudo_moves(&mut moves, &board.state, from, color),
        Bishop => bishop_pseudo_moves(&mut moves, &board.state, from, color),
        Rook => rook_pseudo_moves(&mut moves, &board.state, from, color),
        Queen => queen_pseudo_moves(&mut moves, &board.state, from, color),
        King => {
            king_pseudo_moves(&mut moves, &board.state, from, color);
            castling_pseudo_moves(&mut moves, board, from, color);
        }
    }

    moves
}

/// Returns true if the square holds a piece of the other color.
fn is_enemy(state: &Mailbox, square: Square, color: Color) -> bool {
    matches!(state[square], Some(piece) if piece.color != color)
}

/// Promotes to a queen when the pawn lands on its last rank.
fn pawn_promotion(to: Square, color: Color) -> Option<PieceKind> {
    (to.rank() == color.promotion_rank()).then_some(Queen)
}

/// Pawn pushes, followed by captures and en passant.
/// A double push requires both squares in front of the pawn to be empty.
/// En passant requires the passed pawn to still stand behind the target square.
pub fn pawn_pseudo_moves(moves: &mut PieceMoveList, board: &Board, from: Square, color: Color) {
    let state = &board.state;
    let forward = color.pawn_direction();

    if let Some(single) = from.offset(0, forward) {
        if state[single].is_none() {
            moves.push(Move::new(from, single, pawn_promotion(single, color)));

            if from.rank() == color.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if state[double].is_none() {
                        moves.push(Move::new(from, double, None));
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        let target = match from.offset(file_delta, forward) {
            Some(target) => target,
            None => continue,
        };

        if is_enemy(state, target, color) {
            moves.push(Move::new(from, target, pawn_promotion(target, color)));
        } else if board.en_passant == Some(target) {
            let passed = target.offset(0, -forward);
            let passed_pawn = Piece::new(!color, Pawn);
            if passed.map_or(false, |passed| state[passed] == Some(passed_pawn)) {
                moves.push(Move::en_passant(from, target));
            }
        }
    }
}

/// Leaper moves: each offset is included if the target is empty or holds an enemy piece.
fn leaper_pseudo_moves(
    moves: &mut PieceMoveList,
    state: &Mailbox,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
) {
    for &(file_delta, rank_delta) in offsets {
        if let Some(to) = from.offset(file_delta, rank_delta) {
            match state[to] {
                Some(piece) if piece.color == color => (),
                _ => moves.push(Move::new(from, to, None)),
            }
        }
    }
}

/// Slider moves: each ray stops at the board edge, after an enemy piece, or before a friendly piece.
fn slider_pseudo_moves(
    moves: &mut PieceMoveList,
    state: &Mailbox,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) {
    for &(file_delta, rank_delta) in directions {
        let mut ray = from.offset(file_delta, rank_delta);
        while let Some(to) = ray {
            match state[to] {
                None => moves.push(Move::new(from, to, None)),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(Move::new(from, to, None));
                    }
                    break;
                }
            }
            ray = to.offset(file_delta, rank_delta);
        }
    }
}

pub fn knight_pseudo_moves(moves: &mut PieceMoveList, state: &Mailbox, from: Square, color: Color) {
    leaper_pseudo_moves(moves, state, from, color, &KNIGHT_OFFSETS);
}

pub fn bishop_pseudo_moves(moves: &mut PieceMoveList, state: &Mailbox, from: Square, color: Color) {
    slider_pseudo_moves(moves, state, from, color, &DIAGONALS);
}

pub fn rook_pseudo_moves(moves: &mut PieceMoveList, state: &Mailbox, from: Square, color: Color) {
    slider_pseudo_moves(moves, state, from, color, &ORTHOGONALS);
}

/// Queen moves are the union of bishop and rook rays.
pub fn queen_pseudo_moves(moves: &mut PieceMoveList, state: &Mailbox, from: Square, color: Color) {
    bishop_pseudo_moves(moves, state, from, color);
    rook_pseudo_moves(moves, state, from, color);
}

/// King steps to neighbouring squares. Castling is generated separately.
pub fn king_pseudo_moves(moves: &mut PieceMoveList, state: &Mailbox, from: Square, color: Color) {
    leaper_pseudo_moves(moves, state, from, color, &KING_OFFSETS);
}

/// Castling, queen side then king side.
/// Requires the castling right, the king and rook on their home squares, and
/// every square strictly between them to be empty.
/// Attacked squares are not considered here.
pub fn castling_pseudo_moves(moves: &mut PieceMoveList, board: &Board, from: Square, color: Color) {
    let home = color.home_rank();
    let king_home = Square::from((File::E, home));
    let wings = [
        (Castling::queen_side(color), File::A, File::C),
        (Castling::king_side(color), File::H, File::G),
    ];
    let state = &board.state;
    if from != king_home || state[from] != Some(Piece::new(color, King)) {
        return;
    }

    let rook = Some(Piece::new(color, Rook));
    for (rights, rook_file, king_file) in wings {
        let rook_home = Square::from((rook_file, home));
        let king_to = Square::from((king_file, home));
        if !board.castling.has(rights) || state[rook_home] != rook {
            continue;
        }
        let (low, high) = match rook_home < king_home {
            true => (rook_home as u8 + 1, king_home as u8),
            false => (king_home as u8 + 1, rook_home as u8),
        };
        let path_is_empty = (low..high)
            .filter_map(Square::from_u8)
            .all(|between| state[between].is_none());

        if path_is_empty {
            moves.push(Move::castle(from, king_to));
        }
    }
}

/// Returns the square a castling king passes over on its way to `to`.
pub fn castling_transit(to: Square) -> Option<Square> {
    match to {
        G1 => Some(F1),
        C1 => Some(D1),
        G8 => Some(F8),
        C8 => Some(D8),
        _ => None,
    }
}

/// Returns the (from, to) squares of the rook that moves along with a castling king landing on `to`.
pub fn castling_rook_squares(to: Square) -> Option<(Square, Square)> {
    match to {
        G1 => Some((H1, F1)),
        C1 => Some((A1, D1)),
        G8 => Some((H8, F8)),
        C8 => Some((A8, D8)),
        _ => None,
    }
}

///////////////////////
// Reverse Detection //
///////////////////////

/// Returns true if any piece of color `by` attacks `target`.
/// Works in reverse, walking knight, king, pawn, and sliding patterns outward
/// from the target and looking for a matching attacker.
pub fn is_attacked(state: &Mailbox, target: Square, by: Color) -> bool {
    pawn_attackers_to(state, target, by)
        || knight_attackers_to(state, target, by)
        || king_attackers_to(state, target, by)
        || diagonal_attackers_to(state, target, by)
        || orthogonal_attackers_to(state, target, by)
}

/// Pawns of `by` attack diagonally forward, so look diagonally backward from the target.
pub fn pawn_attackers_to(state: &Mailbox, target: Square, by: Color) -> bool {
    let pawn = Some(Piece::new(by, Pawn));
    [-1, 1].into_iter().any(|file_delta| {
        target
            .offset(file_delta, -by.pawn_direction())
            .map_or(false, |square| state[square] == pawn)
    })
}

pub fn knight_attackers_to(state: &Mailbox, target: Square, by: Color) -> bool {
    leaper_attackers_to(state, target, Piece::new(by, Knight), &KNIGHT_OFFSETS)
}

pub fn king_attackers_to(state: &Mailbox, target: Square, by: Color) -> bool {
    leaper_attackers_to(state, target, Piece::new(by, King), &KING_OFFSETS)
}

/// Bishops and queens along diagonals.
pub fn diagonal_attackers_to(state: &Mailbox, target: Square, by: Color) -> bool {
    slider_attackers_to(state, target, by, Bishop, &DIAGONALS)
}

/// Rooks and queens along ranks and files.
pub fn orthogonal_attackers_to(state: &Mailbox, target: Square, by: Color) -> bool {
    slider_attackers_to(state, target, by, Rook, &ORTHOGONALS)
}

fn leaper_attackers_to(state: &Mailbox, target: Square, attacker: Piece, offsets: &[(i8, i8)]) -> bool {
    offsets.iter().any(|&(file_delta, rank_delta)| {
        target
            .offset(file_delta, rank_delta)
            .map_or(false, |square| state[square] == Some(attacker))
    })
}

fn slider_attackers_to(
    state: &Mailbox,
    target: Square,
    by: Color,
    slider: PieceKind,
    directions: &[(i8, i8)],
) -> bool {
    for &(file_delta, rank_delta) in directions {
        let mut ray = target.offset(file_delta, rank_delta);
        while let Some(square) = ray {
            if let Some(piece) = state[square] {
                if piece.color == by && (piece.piece_kind == slider || piece.piece_kind == Queen) {
                    return true;
                }
                break;
            }
            ray = square.offset(file_delta, rank_delta);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn moves_from(fen: &str, from: Square) -> PieceMoveList {
        let board = Board::parse_fen(fen).unwrap();
        pseudo_legal_moves(&board, from, board.turn())
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let board = Board::start_position();
        let moves = pseudo_legal_moves(&board, E2, Color::White);
        assert_eq!(moves.as_slice(), &[Move::new(E2, E3, None), Move::new(E2, E4, None)]);

        // Blocked double push, one capture.
        let moves = moves_from("4k3/8/8/8/8/4n3/3pP3/4K3 w - - 0 1", E2);
        assert!(moves.is_empty());
        let moves = moves_from("4k3/8/8/8/8/3nn3/4P3/4K3 w - - 0 1", E2);
        assert_eq!(moves.as_slice(), &[Move::new(E2, D3, None)]);
    }

    #[test]
    fn pawn_promotes_to_queen() {
        let moves = moves_from("3r3k/4P3/8/8/8/8/8/K7 w - - 0 1", E7);
        assert_eq!(
            moves.as_slice(),
            &[Move::new(E7, E8, Some(Queen)), Move::new(E7, D8, Some(Queen))]
        );

        let moves = moves_from("k7/8/8/8/8/8/1p6/7K b - - 0 1", B2);
        assert_eq!(moves.as_slice(), &[Move::new(B2, B1, Some(Queen))]);
    }

    #[test]
    fn pawn_en_passant_requires_passed_pawn() {
        let moves = moves_from("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1", D5);
        assert!(moves.contains(&Move::en_passant(D5, E6)));
        assert!(moves.contains(&Move::new(D5, D6, None)));

        // Target square set but no pawn behind it.
        let moves = moves_from("4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1", D5);
        assert_eq!(moves.as_slice(), &[Move::new(D5, D6, None)]);
    }

    #[test]
    fn knight_and_king_leaps() {
        let board = Board::start_position();
        assert_eq!(pseudo_legal_moves(&board, G1, Color::White).len(), 2);
        assert_eq!(pseudo_legal_moves(&board, E1, Color::White).len(), 0);
        assert_eq!(pseudo_legal_moves(&board, G1, Color::Black).len(), 0);

        let moves = moves_from("8/8/8/8/3N4/8/8/k6K w - - 0 1", D4);
        assert_eq!(moves.len(), 8);
        let moves = moves_from("k7/8/8/8/8/8/8/N6K w - - 0 1", A1);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn sliders_stop_at_pieces() {
        // Rook on d4: friendly pawn on d6, enemy pawn on f4.
        let moves = moves_from("k7/8/3P4/8/3R1p2/8/8/7K w - - 0 1", D4);
        assert!(moves.contains(&Move::new(D4, D5, None)));
        assert!(!moves.contains(&Move::new(D4, D6, None)));
        assert!(moves.contains(&Move::new(D4, F4, None)));
        assert!(!moves.contains(&Move::new(D4, G4, None)));
        assert_eq!(moves.len(), 1 + 2 + 3 + 3);

        let moves = moves_from("k7/8/8/8/3Q4/8/8/7K w - - 0 1", D4);
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn castling_needs_rights_home_pieces_and_empty_path() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let moves = moves_from(fen, E1);
        assert!(moves.contains(&Move::castle(E1, C1)));
        assert!(moves.contains(&Move::castle(E1, G1)));

        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1", E8);
        assert!(moves.contains(&Move::castle(E8, C8)));
        assert!(!moves.contains(&Move::castle(E8, G8)));

        // Knight on b1 blocks the queen side.
        let moves = moves_from("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1", E1);
        assert!(!moves.contains(&Move::castle(E1, C1)));
        assert!(moves.contains(&Move::castle(E1, G1)));

        // Right claimed but rook is missing.
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1", E1);
        assert!(!moves.contains(&Move::castle(E1, G1)));
    }

    #[test]
    fn castling_stays_on_own_home_rank() {
        // Black king and rooks standing on White's home rank.
        let moves = moves_from("7K/8/8/8/8/8/8/r3k2r b kq - 0 1", E1);
        assert!(!moves.is_empty());
        assert!(!moves.contains(&Move::castle(E1, C1)));
        assert!(!moves.contains(&Move::castle(E1, G1)));

        let moves = moves_from("r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1", E8);
        assert!(moves.contains(&Move::castle(E8, C8)));
        assert!(moves.contains(&Move::castle(E8, G8)));
    }

    #[test]
    fn reverse_attack_detection() {
        let board = Board::parse_fen("4k3/8/8/8/3b4/8/1N6/4K2R w - - 0 1").unwrap();
        let state = board.state();
        assert!(is_attacked(state, H8, Color::White));
        assert!(is_attacked(state, D3, Color::White));
        assert!(is_attacked(state, F2, Color::Black));
        assert!(is_attacked(state, G1, Color::Black));
        assert!(!is_attacked(state, A1, Color::Black));
        assert!(!is_attacked(state, H1, Color::Black));
        assert!(is_attacked(state, D7, Color::Black));

        let board = Board::parse_fen("4k3/8/8/8/8/3p4/8/4K3 w - - 0 1").unwrap();
        assert!(pawn_attackers_to(board.state(), E2, Color::Black));
        assert!(pawn_attackers_to(board.state(), C2, Color::Black));
        assert!(!pawn_attackers_to(board.state(), D2, Color::Black));
        assert!(!pawn_attackers_to(board.state(), E4, Color::Black));
    }
}
