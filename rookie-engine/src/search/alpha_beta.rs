//! Minimax with Alpha-Beta pruning implementation.

use std::cmp;
use std::time::Instant;

use super::{static_ply, Context, SearchResult};
use crate::board::Board;
use crate::coretypes::{Color, Cp, Move, PlyKind, MAX_DEPTH};
use crate::eval::Evaluation;

/// Base alpha_beta call. Searches the moves of `player` to depth `ply`, clamped to
/// 1..=MAX_DEPTH, stopping early once `deadline` passes.
/// It returns the best move and score for the position in the search tree,
/// or None if `player` has no legal moves.
/// A stopped result holds the best move among the root moves searched in full.
/// If the deadline passes before any root move is searched in full, the result
/// comes from a static ply with depth 0.
pub fn alpha_beta(
    board: &mut Board,
    player: Color,
    ply: PlyKind,
    evaluation: Evaluation,
    deadline: Option<Instant>,
) -> Option<SearchResult> {
    let ply = ply.clamp(1, MAX_DEPTH);
    let start = Instant::now();
    let mut context = Context::new(player, evaluation, deadline);

    match alpha_beta_root(&mut context, board, ply) {
        Some((score, best_move)) => Some(context.into_result(best_move, score, ply, start)),
        None if context.stopped => {
            let mut search_result = static_ply(board, player, evaluation)?;
            search_result.nodes += context.nodes;
            search_result.elapsed = start.elapsed();
            Some(search_result)
        }
        None => None,
    }
}

/// Properties of Alpha-Beta pruning.
/// * The maxing player can only update alpha from its children.
/// * The minning player can only update beta from its children.
/// * Alpha and Beta can only be inherited from their ancestors, and are otherwise Alpha=-Inf, Beta=Inf.
/// * Alpha is usually less than Beta. When they are equal or cross, a cut off occurs.

/// alpha_beta_root is almost the same as alpha_beta impl, except it links a Cp score to its node.
/// The root player always maximizes, so Beta stays infinite and no root move is pruned.
/// A move replaces the current best only if it scores strictly better.
fn alpha_beta_root(context: &mut Context, board: &mut Board, ply: PlyKind) -> Option<(Cp, Move)> {
    context.nodes += 1;
    let legal_moves = board.find_all_legal_moves(context.root);

    let mut best: Option<(Cp, Move)> = None;
    let mut alpha = Cp::MIN;
    let beta = Cp::MAX;

    for legal_move in legal_moves {
        let move_info = board.make_move(legal_move);
        let move_cp = alpha_beta_impl::<false>(context, board, ply - 1, 1, alpha, beta);
        board.undo_move(move_info);

        // A subtree cut short by the deadline only returns a bound.
        if context.stopped {
            break;
        }
        if best.map_or(true, |(best_cp, _)| move_cp > best_cp) {
            best = Some((move_cp, legal_move));
            alpha = cmp::max(alpha, move_cp);
        }
    }

    best
}

/// `depth` is the number of plies left to search, `ply` is the distance from the root.
fn alpha_beta_impl<const MAXIMIZING: bool>(
    context: &mut Context,
    board: &mut Board,
    depth: PlyKind,
    ply: PlyKind,
    mut alpha: Cp,
    mut beta: Cp,
) -> Cp {
    context.nodes += 1;
    let mover = context.mover::<MAXIMIZING>();

    // Stop at leaf: last depth, or out of time. The clock is read at every node.
    let out_of_time = context.out_of_time();
    if depth == 0 || out_of_time {
        return context.leaf(board, mover, ply);
    }

    // Stop at terminal node: Checkmate/Stalemate.
    let legal_moves = board.find_all_legal_moves(mover);
    if legal_moves.is_empty() {
        return crate::eval::terminal(board, context.root, mover, ply);
    }

    if MAXIMIZING {
        let mut best_cp = Cp::MIN;

        for legal_move in legal_moves {
            let move_info = board.make_move(legal_move);
            let move_cp = alpha_beta_impl::<false>(context, board, depth - 1, ply + 1, alpha, beta);
            board.undo_move(move_info);

            if context.stopped {
                break;
            }
            best_cp = cmp::max(best_cp, move_cp);
            alpha = cmp::max(alpha, best_cp);
            if best_cp >= beta {
                // Beta cutoff
                break;
            }
        }
        best_cp
    } else {
        let mut best_cp = Cp::MAX;

        for legal_move in legal_moves {
            let move_info = board.make_move(legal_move);
            let move_cp = alpha_beta_impl::<true>(context, board, depth - 1, ply + 1, alpha, beta);
            board.undo_move(move_info);

            if context.stopped {
                break;
            }
            best_cp = cmp::min(best_cp, move_cp);
            beta = cmp::min(beta, best_cp);
            if best_cp <= alpha {
                // Alpha cutoff
                break;
            }
        }
        best_cp
    }
}
