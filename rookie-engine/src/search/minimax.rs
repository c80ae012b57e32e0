//! Minimax implementation.
//!
//! Plain minimax visits every node of the tree to a fixed depth. It is far slower
//! than alpha-beta but has no bounds to get wrong, so it serves as a reference for
//! the value alpha-beta must find.

use std::cmp;
use std::time::Instant;

use super::{Context, SearchResult};
use crate::board::Board;
use crate::coretypes::{Color, Cp, Move, PlyKind, MAX_DEPTH};
use crate::eval::Evaluation;

/// Base minimax call. Searches the moves of `player` to depth `ply`, clamped to 1..=MAX_DEPTH.
/// It returns the best move and score for the position in the search tree,
/// or None if `player` has no legal moves.
pub fn minimax(
    board: &mut Board,
    player: Color,
    ply: PlyKind,
    evaluation: Evaluation,
) -> Option<SearchResult> {
    let ply = ply.clamp(1, MAX_DEPTH);
    let start = Instant::now();
    let mut context = Context::new(player, evaluation, None);

    let (score, best_move) = minimax_root(&mut context, board, ply)?;
    Some(context.into_result(best_move, score, ply, start))
}

/// Minimax root is almost the same as minimax impl, except it links a Cp score to its node.
/// A move replaces the current best only if it scores strictly better.
fn minimax_root(context: &mut Context, board: &mut Board, ply: PlyKind) -> Option<(Cp, Move)> {
    context.nodes += 1;
    let legal_moves = board.find_all_legal_moves(context.root);
    let mut best: Option<(Cp, Move)> = None;

    for legal_move in legal_moves {
        let move_info = board.make_move(legal_move);
        let move_cp = minimax_impl::<false>(context, board, ply - 1, 1);
        board.undo_move(move_info);

        if best.map_or(true, |(best_cp, _)| move_cp > best_cp) {
            best = Some((move_cp, legal_move));
        }
    }

    best
}

fn minimax_impl<const MAXIMIZING: bool>(
    context: &mut Context,
    board: &mut Board,
    depth: PlyKind,
    ply: PlyKind,
) -> Cp {
    context.nodes += 1;
    let mover = context.mover::<MAXIMIZING>();

    if depth == 0 {
        return context.leaf(board, mover, ply);
    }

    // Stop at terminal node: Checkmate/Stalemate.
    let legal_moves = board.find_all_legal_moves(mover);
    if legal_moves.is_empty() {
        return crate::eval::terminal(board, context.root, mover, ply);
    }

    let mut best_cp;

    if MAXIMIZING {
        best_cp = Cp::MIN;

        for legal_move in legal_moves {
            let move_info = board.make_move(legal_move);
            let move_cp = minimax_impl::<false>(context, board, depth - 1, ply + 1);
            board.undo_move(move_info);
            best_cp = cmp::max(best_cp, move_cp);
        }
    } else {
        best_cp = Cp::MAX;

        for legal_move in legal_moves {
            let move_info = board.make_move(legal_move);
            let move_cp = minimax_impl::<true>(context, board, depth - 1, ply + 1);
            board.undo_move(move_info);
            best_cp = cmp::min(best_cp, move_cp);
        }
    }

    best_cp
}
