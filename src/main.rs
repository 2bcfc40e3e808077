use clap::Parser;
use knightfall::controller::{EngineOptions, GameController, MoveResultType};
use knightfall::engine::SearchLimits;
use knightfall::game::evaluate;
use knightfall::utils::{BoardSquare, BoardSquareExt, GUICommand};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "knightfall")]
#[command(about = "Material-only alpha-beta chess engine speaking a UCI-like protocol")]
#[command(long_about = None)]
struct Cli {
    /// Search depth in plies
    #[arg(short, long, default_value_t = EngineOptions::default().depth)]
    depth: usize,

    /// Worker threads for the root search
    #[arg(short, long, default_value_t = EngineOptions::default().threads)]
    threads: usize,

    /// Starting position (defaults to the standard one)
    #[arg(short, long)]
    fen: Option<String>,

    /// Apply side to move, castling, en passant and clocks from loaded positions
    #[arg(long)]
    honor_fen_state: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut options = EngineOptions::default();
    options.set_option("Depth", &cli.depth.to_string());
    options.set_option("Threads", &cli.threads.to_string());
    options.honor_fen_state = cli.honor_fen_state;

    let mut controller = GameController::with_options(options);

    if let Some(fen) = &cli.fen {
        if let Err(error) = controller.new_game_from_fen(fen) {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }

    loop {
        match GUICommand::receive() {
            GUICommand::UCI => {
                println!("id name knightfall {}", env!("GIT_HASH"));
                println!("id author knightfall developers");
                for option in EngineOptions::describe() {
                    println!("{}", option);
                }
                println!("uciok");
            }
            GUICommand::IsReady => println!("readyok"),
            GUICommand::NewGame => controller.new_game(),
            GUICommand::StartPosition(moves) => {
                controller.new_game();
                controller.play_moves(&moves);
            }
            GUICommand::FenPosition(fen, moves) => match controller.new_game_from_fen(&fen) {
                Ok(()) => {
                    controller.play_moves(&moves);
                }
                Err(error) => log::warn!("Rejected position: {}", error),
            },
            GUICommand::SetOption(name, value) => {
                controller.options.set_option(&name, &value);
            }
            GUICommand::Perft(depth_string) => match depth_string.parse::<usize>() {
                Ok(depth) => {
                    let start = Instant::now();
                    let divide = controller.perft(depth);

                    for (board_move, count) in &divide {
                        println!("{}: {}", board_move, count);
                    }

                    let nodes: usize = divide.iter().map(|(_, count)| count).sum();
                    println!("\nNodes searched: {}", nodes);
                    log::info!("Perft {} took {} ms", depth, start.elapsed().as_millis());
                }
                Err(_) => log::warn!("Invalid perft depth: {}", depth_string),
            },
            GUICommand::Search(params) => {
                let limits = SearchLimits::parse(&params, controller.options.depth);
                let start = Instant::now();
                let result = controller.search_with(limits);

                println!(
                    "info depth {} score cp {} nodes {} time {}",
                    result.depth,
                    result.score,
                    result.nodes,
                    start.elapsed().as_millis()
                );

                match result.best_move {
                    Some(best_move) => println!("bestmove {}", best_move),
                    None => println!("bestmove 0000"),
                }
            }
            GUICommand::Display => controller.print(),
            GUICommand::Moves(square) => {
                let moves = controller.game.get_moves();

                match square {
                    Some(name) => match BoardSquare::parse(&name) {
                        Some(from) => {
                            let targets = moves
                                .iter()
                                .filter(|m| m.from == from)
                                .map(|m| m.to)
                                .collect::<Vec<_>>();

                            controller.print_with_moves(&targets);
                        }
                        None => log::warn!("Invalid square: {}", name),
                    },
                    None => println!(
                        "{}",
                        moves.iter().map(|m| m.unparse()).collect::<Vec<_>>().join(" ")
                    ),
                }
            }
            GUICommand::Undo => {
                if controller.try_unmove_piece() == MoveResultType::NoHistory {
                    log::warn!("Nothing to undo");
                }
            }
            GUICommand::Eval => println!("{}", evaluate(&controller.game)),
            GUICommand::Quit => break,
            GUICommand::Invalid(input) => {
                if !input.is_empty() {
                    log::warn!("Unknown command: {}", input);
                }
            }
        }
    }
}
