//! Rules
//!
//! Checks rule outcomes that only show up over a sequence of moves:
//! castling rights, the en passant window, and game ending positions.

use rookie_engine::coretypes::{Color::*, Move, Square::*};
use rookie_engine::fen::Fen;
use rookie_engine::*;

fn play_all(game: &mut Game, moves: &[&str]) {
    for text in moves {
        game.play_text(text)
            .unwrap_or_else(|err| panic!("{text} rejected: {err}"));
    }
}

#[test]
fn start_position_has_twenty_moves() {
    let board = Board::start_position();
    assert_eq!(board.find_all_legal_moves(White).len(), 20);
    assert_eq!(board.find_all_legal_moves(Black).len(), 20);
}

#[test]
fn fools_mate() {
    let mut game = Game::start_position();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(game.board.is_in_check(White));
    assert!(game.board.is_in_checkmate(White));
    assert!(!game.board.is_in_stalemate(White));
    assert!(game.board.find_all_legal_moves(White).is_empty());
    assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Black }));
}

#[test]
fn stalemate_is_not_checkmate() {
    let board = Board::parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
    assert!(board.is_in_stalemate(Black));
    assert!(!board.is_in_checkmate(Black));
    assert!(!board.is_in_check(Black));
}

#[test]
fn castling_rights_never_return() {
    let mut game = Game::start_position();
    play_all(&mut game, &["h2h4", "a7a5", "h1h3", "a8a6"]);
    assert_eq!(game.board.castling().to_string(), "Qk");

    // Rooks going home do not restore the rights.
    play_all(&mut game, &["h3h1", "a6a8"]);
    assert_eq!(game.board.castling().to_string(), "Qk");

    // Undo does restore them.
    game.undo().unwrap();
    game.undo().unwrap();
    game.undo().unwrap();
    assert_eq!(game.board.castling().to_string(), "Qkq");
}

#[test]
fn capture_on_corner_clears_right() {
    let mut game =
        Game::from(Board::parse_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap());
    play_all(&mut game, &["g2a8"]);
    assert_eq!(game.board.castling().to_string(), "KQk");
    assert!(!game.board.is_legal_move(Move::castle(E8, C8)));
    assert!(game.board.is_legal_move(Move::castle(E8, G8)));
}

#[test]
fn castling_moves_the_rook() {
    let mut game =
        Game::from(Board::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap());
    let played = game.play_text("e1g1").unwrap();
    assert!(played.is_castling());
    play_all(&mut game, &["e8c8"]);
    assert_eq!(game.board.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - -");
}

#[test]
fn en_passant_lasts_one_ply() {
    let base = Board::parse_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - -").unwrap();

    let mut game = Game::from(base);
    play_all(&mut game, &["d7d5"]);
    assert_eq!(game.board.en_passant(), Some(D6));
    let played = game.play_text("e5d6").unwrap();
    assert!(played.is_en_passant());
    assert_eq!(game.board.state()[D5], None);

    let mut game = Game::from(base);
    play_all(&mut game, &["d7d5", "e1f1", "e8f8"]);
    assert_eq!(game.board.en_passant(), None);
    assert!(game.play_text("e5d6").is_err());
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    let board = Board::parse_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - -").unwrap();
    assert!(board.find_legal_moves(E2, White).is_empty());
    assert!(board
        .find_all_legal_moves(White)
        .iter()
        .all(|move_| move_.from() == E1));
}

#[test]
fn check_detection_agrees_with_generation() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -",
        "4k3/8/8/8/8/8/3p4/4K3 w - -",
        "4k3/8/5N2/8/8/8/8/4K3 b - -",
        "4k3/8/8/8/8/8/8/4K2r w - -",
        "4k3/8/8/8/B7/8/8/4K3 b - -",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ];
    for fen in fens {
        let board = Board::parse_fen(fen).unwrap();
        for color in Color::ALL {
            assert_eq!(
                board.is_in_check(color),
                board.is_in_check_by_generation(color),
                "{fen} {color}"
            );
        }
    }
}

#[test]
fn explicit_promotion_is_honoured() {
    let mut board = Board::parse_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
    let legal = board.find_legal_moves(A7, White);
    assert_eq!(legal.as_slice(), &[Move::new(A7, A8, Some(PieceKind::Queen))]);

    let move_info = board.make_move(Move::new(A7, A8, Some(PieceKind::Knight)));
    assert_eq!(
        board.state()[A8],
        Some(Piece::new(White, PieceKind::Knight))
    );
    board.undo_move(move_info);
    assert_eq!(board.to_fen(), "4k3/P7/8/8/8/8/8/4K3 w - -");
}
