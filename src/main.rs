//! Terminal host for playing chess against the Rookie engine.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use rookie_engine::fen::Fen;
use rookie_engine::search::{self, SearchConfig};
use rookie_engine::{load_position, Board, Color, Evaluation, Game, Mode, Move};

/// Which sides the engine plays.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Computer {
    White,
    Black,
    #[value(name = "none")]
    Neither,
    Both,
}

impl Computer {
    fn plays(&self, color: Color) -> bool {
        match self {
            Computer::White => color == Color::White,
            Computer::Black => color == Color::Black,
            Computer::Neither => false,
            Computer::Both => true,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rookie", version, about = "Play chess against the Rookie engine")]
struct Args {
    /// Search to a fixed depth in plies instead of by move time.
    #[arg(long, conflicts_with = "movetime")]
    depth: Option<u8>,

    /// Milliseconds the engine may think per move.
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Sides played by the engine.
    #[arg(long, value_enum, default_value_t = Computer::Black)]
    computer: Computer,

    /// Starting position in FEN.
    #[arg(long)]
    fen: Option<String>,

    /// Stop after this many engine turns when the engine plays both sides.
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Add the mobility term to the evaluation.
    #[arg(long)]
    mobility: bool,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        let mode = match self.depth {
            Some(ply) => Mode::depth(ply),
            None => Mode::movetime(Duration::from_millis(self.movetime)),
        };
        let evaluation = match self.mobility {
            true => Evaluation::MaterialMobility,
            false => Evaluation::Material,
        };
        SearchConfig::new(mode, evaluation)
    }
}

enum Command {
    Exit,
    NewGame,
    Help,
    Undo,
    Fen,
    Moves,
    Play(Move),
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        if let Ok(move_) = s.parse() {
            return Self::Play(move_);
        }
        match s {
            "exit" | "quit" => Self::Exit,
            "newgame" | "ng" => Self::NewGame,
            "help" => Self::Help,
            "undo" => Self::Undo,
            "fen" => Self::Fen,
            "moves" => Self::Moves,
            _ => Self::Unknown,
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn print_help() {
    println!("Commands:");
    println!("newgame | ng => Begin a new game from the starting position.");
    println!("undo => Take back your last move and the engine's reply.");
    println!("fen => Print the current position in FEN.");
    println!("moves => List the legal moves of the side to move.");
    println!("help => Print this help text.");
    println!("exit => End the game.");
    println!("\nTo make a move, enter it in coordinate form.");
    println!("Examples: e2e4, e1g1 (castle), e7e8q (promote).");
}

/// Prints the board and any check or game end. Returns true if the game is over.
fn report(game: &Game) -> bool {
    println!("{}", game.board);
    let turn = game.turn();
    match game.outcome() {
        Some(outcome) => {
            println!("Game over: {outcome}.");
            true
        }
        None => {
            if game.board.is_in_check(turn) {
                println!("{} is in check.", color_name(turn));
            }
            false
        }
    }
}

/// Searches for the side to move and plays the best move found.
fn engine_move(game: &mut Game, config: SearchConfig) {
    let turn = game.turn();
    println!("thinking...");

    let result = match search::search(&mut game.board, turn, config) {
        Some(result) => result,
        None => {
            warn!("engine has no legal move for {turn}");
            return;
        }
    };
    debug!("{result}");

    match game.play(result.best_move) {
        Ok(move_) => println!(
            "Rookie played {move_}. score: {} depth: {} nodes: {} nps: {}",
            result.score,
            result.depth,
            result.nodes,
            result.nps()
        ),
        Err(err) => warn!("engine move {} rejected: {err}", result.best_move),
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.search_config();
    let base_board = match &args.fen {
        Some(fen) => load_position(fen)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?,
        None => Board::start_position(),
    };
    info!("search {} with {:?}", config.mode, config.evaluation);

    println!("Rookie 0.1.0, type help for commands.\n");
    let mut game = Game::from(base_board);
    let mut engine_turns = 0;
    let mut input = String::new();

    loop {
        let game_over = report(&game);

        if !game_over && args.computer.plays(game.turn()) {
            if args.computer == Computer::Both && engine_turns >= args.max_turns {
                println!("Stopping after {engine_turns} engine turns.");
                break;
            }
            engine_move(&mut game, config);
            engine_turns += 1;
            continue;
        }
        if game_over && args.computer == Computer::Both {
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            break;
        }

        match Command::from(input.trim()) {
            Command::Exit => break,
            Command::NewGame => {
                game = Game::from(base_board);
                engine_turns = 0;
                println!("Starting new game...");
            }
            Command::Help => print_help(),
            Command::Fen => println!("{}", game.board.to_fen()),
            Command::Moves => {
                let moves: Vec<String> = game
                    .board
                    .find_all_legal_moves(game.turn())
                    .iter()
                    .map(|move_| move_.to_string())
                    .collect();
                println!("{}", moves.join(" "));
            }
            Command::Undo => {
                // Take back the engine's reply too, so the human is to move again.
                let plies = match args.computer {
                    Computer::Neither => 1,
                    _ => 2,
                };
                for _ in 0..plies {
                    match game.undo() {
                        Ok(move_) => println!("Undo move {move_}."),
                        Err(err) => {
                            println!("{err}");
                            break;
                        }
                    }
                }
            }
            Command::Play(move_) => {
                if game_over {
                    println!("The game is over, start a newgame or undo.");
                    continue;
                }
                if let Err(err) = game.play(move_) {
                    println!("{err}. No action taken.");
                }
            }
            Command::Unknown => println!("Invalid command: {}", input.trim()),
        }
    }

    Ok(())
}
