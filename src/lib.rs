//! Checkers-RS: a checkers (draughts) rules engine with a random opponent.
//!
//! The engine tracks piece placement and kings, derives legal moves with
//! mandatory captures and multi-jump chains, crowns pieces on the far row,
//! and detects when a side has lost. Drawing and click handling are left
//! to the host, which talks to the engine through small adapter traits.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and pacing defaults
//! - [`square`] - Squares, colors, and diagonal geometry
//! - [`board`] - Piece placement and move derivation
//! - [`bot`] - Random move selection with forced captures
//! - [`config`] - Runtime game settings
//! - [`game`] - Turn sequencing, scoring, and win detection
//! - [`protocol`] - Text protocol for terminal play
//!
//! ## Example
//!
//! ```
//! use checkers_rs::config::GameConfig;
//! use checkers_rs::game::{Game, Outcome};
//! use checkers_rs::square::{Color, Square};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(1));
//!
//! // Pick up a piece, then put it down one square up and to the right
//! game.handle_selection(Some(Square::new(3, 5)));
//! let outcome = game.handle_selection(Some(Square::new(4, 4)));
//! assert!(matches!(outcome, Outcome::Moved(_)));
//!
//! // The bot side is now due; the host decides when to run it
//! assert_eq!(game.turn(), Color::Second);
//! let replies = game.play_bot_turn();
//! println!("bot played {}", replies[0].mv);
//! ```

pub mod board;
pub mod bot;
pub mod config;
pub mod constants;
pub mod game;
pub mod protocol;
pub mod square;
