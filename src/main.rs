//! Checkers-RS: play checkers against a random bot from the terminal.
//!
//! ## Usage
//!
//! - `checkers-rs` - Show a demo
//! - `checkers-rs play` - Start the text protocol on stdin/stdout
//! - `checkers-rs selfplay` - Let the bot play both sides
//! - `checkers-rs demo` - Run the demo
//!
//! Set `RUST_LOG=debug` to trace moves and turn changes.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use checkers_rs::config::GameConfig;
use checkers_rs::constants::SELFPLAY_MAX_TURNS;
use checkers_rs::game::{Game, Outcome};
use checkers_rs::protocol::Session;
use checkers_rs::square::{Color, Square};

/// Checkers-RS: a checkers rules engine with a random opponent
#[derive(Parser)]
#[command(name = "checkers-rs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the bot's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Which side(s) a human plays in `play`
    #[arg(long, value_enum, default_value_t = Human::First, global = true)]
    human: Human,

    /// Pause before each bot turn, in milliseconds
    #[arg(long, default_value_t = 700, global = true)]
    delay_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Human {
    First,
    Second,
    Both,
    #[value(name = "none")]
    Nobody,
}

impl Human {
    fn automated(self) -> Vec<Color> {
        match self {
            Human::First => vec![Color::Second],
            Human::Second => vec![Color::First],
            Human::Both => vec![],
            Human::Nobody => vec![Color::First, Color::Second],
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play through the text protocol on stdin/stdout
    Play,
    /// Let the bot play both sides and print the result
    Selfplay {
        /// Give up after this many turns
        #[arg(long, default_value_t = SELFPLAY_MAX_TURNS)]
        max_turns: usize,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = GameConfig::default()
        .with_automated(&cli.human.automated())
        .with_delay(Duration::from_millis(cli.delay_ms));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    match cli.command {
        Some(Commands::Play) => {
            let mut session = Session::new(config);
            session.run()?;
        }
        Some(Commands::Selfplay { max_turns }) => {
            run_selfplay(config, max_turns);
        }
        Some(Commands::Demo) | None => {
            run_demo(config);
        }
    }
    Ok(())
}

fn run_selfplay(config: GameConfig, max_turns: usize) {
    let config = config
        .with_automated(&Color::BOTH)
        .with_delay(Duration::ZERO);
    let mut game = Game::new(config);

    while !game.is_over() && game.turns() < max_turns {
        game.scheduler_mut().take_due();
        game.play_bot_turn();
    }

    println!("{}", game.board());
    let score = game.score();
    for color in Color::BOTH {
        println!(
            "{color}: {} left, {} points",
            score.remaining(color),
            score.points(color)
        );
    }
    match game.winner() {
        Some(winner) => println!("{winner} wins after {} turns", game.turns()),
        None => println!("no result after {} turns", game.turns()),
    }
}

fn run_demo(config: GameConfig) {
    println!("Checkers-RS: Checkers Rules Engine\n");

    let config = config.with_automated(&[Color::Second]).with_delay(Duration::ZERO);
    let mut game = Game::new(config);
    println!("=== Starting Board ===");
    println!("{}", game.board());

    println!("=== First Moves (3,5) -> (4,4) ===");
    let origin = game.handle_selection(Some(Square::new(3, 5)));
    let dest = game.handle_selection(Some(Square::new(4, 4)));
    println!("Origin click: {:?}", origin);
    println!("Destination click: {:?}", dest);

    if let Outcome::Moved(_) = dest {
        game.scheduler_mut().take_due();
        for report in game.play_bot_turn() {
            println!("Bot reply: {}", report.mv);
        }
    }
    println!("{}", game.board());
    info!("demo finished, {} to move", game.turn());
}
