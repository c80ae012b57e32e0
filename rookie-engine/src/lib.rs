//! Rookie Engine, a chess rules engine with an alpha-beta computer opponent.
//!
//! A [`Board`] holds the authoritative position, generates fully legal moves,
//! and can apply and undo them exactly. [`search`] picks a move for either
//! side to a fixed depth or within a move time.
//!
//! ```
//! use rookie_engine::{load_position, search, Color, Evaluation, Mode, SearchConfig};
//!
//! let mut board = load_position("6k1/5ppp/8/8/8/8/8/R5K1 w - -").unwrap();
//! let config = SearchConfig::new(Mode::depth(2), Evaluation::Material);
//! let best_move = search::get_best_move(&mut board, Color::White, config).unwrap();
//! assert_eq!(best_move.to_string(), "a1a8");
//! ```

pub mod board;
pub mod coretypes;
pub mod error;
pub mod eval;
pub mod fen;
pub mod game;
pub mod mailbox;
pub mod movegen;
pub mod movelist;
pub mod perft;
pub mod search;
pub mod timeman;

pub use board::{Board, MoveInfo};
pub use coretypes::{Castling, Color, Cp, File, Move, Piece, PieceKind, Rank, Square};
pub use error::{Error, ErrorKind, Result};
pub use eval::Evaluation;
pub use fen::{load_position, Fen, ParseFenError};
pub use game::{Game, Outcome};
pub use mailbox::Mailbox;
pub use movelist::MoveList;
pub use perft::{perft, PerftInfo};
pub use search::{SearchConfig, SearchResult};
pub use timeman::Mode;
