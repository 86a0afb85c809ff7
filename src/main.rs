use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;

use std::io::{stdin, stdout, Write};

use four_in_a_row::{
    board::{Board, Player},
    engine::{Difficulty, DifficultyPolicy, Engine},
    error::MoveError,
    rules::GameOutcome,
    session::GameSession,
    solver::Algorithm,
};

mod display;

/// Four in a row against a friend or the computer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Who plays against player one: player or computer
    #[arg(value_parser = parse_opponent)]
    opponent: Player,

    /// Number of rows, between 4 and 9
    rows: usize,

    /// Number of columns, between 4 and 9
    cols: usize,

    /// Who moves first: player1, player2 or computer
    #[arg(value_parser = parse_first)]
    first: Player,

    /// easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    #[arg(long)]
    medium_algorithm: Option<Algorithm>,

    #[arg(long)]
    medium_depth: Option<usize>,

    #[arg(long)]
    hard_algorithm: Option<Algorithm>,

    #[arg(long)]
    hard_depth: Option<usize>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "warn")]
    log_level: log::Level,
}

fn parse_opponent(arg: &str) -> Result<Player, String> {
    match arg.to_lowercase().as_str() {
        "player" => Ok(Player::PlayerTwo),
        "computer" => Ok(Player::Automated),
        _ => Err("options: player / computer".to_string()),
    }
}

fn parse_first(arg: &str) -> Result<Player, String> {
    match arg.to_lowercase().as_str() {
        "player1" => Ok(Player::PlayerOne),
        "player2" => Ok(Player::PlayerTwo),
        "computer" => Ok(Player::Automated),
        _ => Err("options: player1 / player2 / computer".to_string()),
    }
}

fn policy(args: &Args) -> DifficultyPolicy {
    let mut policy = DifficultyPolicy::default();
    if let Some(algorithm) = args.medium_algorithm {
        policy.medium.algorithm = algorithm;
    }
    if let Some(depth) = args.medium_depth {
        policy.medium.depth = depth;
    }
    if let Some(algorithm) = args.hard_algorithm {
        policy.hard.algorithm = algorithm;
    }
    if let Some(depth) = args.hard_depth {
        policy.hard.depth = depth;
    }
    policy
}

/// Reads a 1-indexed column, `None` on end of input
fn read_column(cols: usize) -> Result<Option<usize>> {
    let mut input_str = String::new();
    if stdin().read_line(&mut input_str)? == 0 {
        return Ok(None);
    }
    match input_str.trim().parse::<usize>() {
        Ok(column @ 1..=9) if column <= cols => Ok(Some(column - 1)),
        _ => Err(anyhow!(
            "Invalid column '{}', columns must be between 1 and {}",
            input_str.trim(),
            cols
        )),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level)?;

    let board = Board::new(args.rows, args.cols)?;
    let mut session = GameSession::new(board, args.opponent, args.first)?;

    let mut engine = Engine::new(policy(&args));
    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }
    info!("starting {}x{} game, {:?}", args.rows, args.cols, engine.policy());

    println!("Welcome to Four in a Row\n");

    // game loop
    loop {
        display::draw(session.board())?;

        match session.outcome() {
            GameOutcome::InProgress => {
                let column = if session.turn() == Player::Automated {
                    println!("Computer is thinking...");
                    stdout().flush()?;

                    if args.difficulty == Difficulty::Easy {
                        std::thread::sleep(engine.policy().easy_delay);
                    }
                    let column = session.suggest(&mut engine, args.difficulty)?;
                    println!("Computer plays {}", column + 1);
                    column
                } else {
                    print!("{} move > ", session.turn());
                    stdout().flush()?;
                    match read_column(args.cols) {
                        Ok(Some(column)) => column,
                        Ok(None) => return Ok(()),
                        Err(err) => {
                            println!("{}", err);
                            continue;
                        }
                    }
                };

                match session.play(column) {
                    Ok(_) => {}
                    Err(MoveError::ColumnFull(_)) => {
                        println!("Column {} is already full!", column + 1);
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            // end states
            GameOutcome::Win(winner) => {
                println!("Winner: {}!", winner);
                break;
            }
            GameOutcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
