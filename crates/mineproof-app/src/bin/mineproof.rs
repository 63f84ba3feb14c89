//! Mineproof command-line entry point.

use std::{process::ExitCode, sync::Arc};

use clap::Parser as _;
use mineproof_agent::oracle_channel;
use mineproof_app::{
    AppError, bench,
    cli::{BenchArgs, Cli, Command, PlayArgs},
    console, game_factory, version,
};
use mineproof_game::EventBus;
use portable_atomic::AtomicBool;

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    log::info!("mineproof {}", version::build_version());

    let result = match cli.command {
        Command::Play(args) => play(&args),
        Command::Bench(args) => run_bench(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn play(args: &PlayArgs) -> Result<(), AppError> {
    let config = args.board.config()?;
    let seed = args.board.seed.unwrap_or_else(rand::random);
    println!(
        "{} board with {} mines (seed {seed})",
        config.size(),
        config.mines()
    );

    let bus = EventBus::new();
    console::attach_printer(&bus);
    let awaiting = Arc::new(AtomicBool::new(false));
    console::attach_gate(&bus, &awaiting);

    let (tx, rx) = oracle_channel();
    // Blocked on stdin until the process exits; never joined.
    let _producer = console::spawn_stdin_producer(tx, awaiting);

    let mut controller = game_factory::new_game(config, seed, bus, rx);
    let state = controller.run()?;
    let stats = controller.agent().stats();
    println!("{state} after {} moves", controller.moves_played());
    println!(
        "proofs per tier: {:?} (attempts {:?})",
        stats.proofs(),
        stats.attempts()
    );
    Ok(())
}

fn run_bench(args: &BenchArgs) -> Result<(), AppError> {
    if args.games == 0 {
        return Err(AppError::NoGames);
    }
    let config = args.board.config()?;
    let seed = args.board.seed.unwrap_or_else(rand::random);
    println!(
        "{} games on a {} board with {} mines (seeds {seed}..)",
        args.games,
        config.size(),
        config.mines()
    );

    let report = bench::run(config, args.games, seed);
    println!("{report}");
    Ok(())
}
