//! Random automated player.
//!
//! The bot picks uniformly among all legal moves for its side, restricted to
//! capturing moves whenever at least one exists. The random source is owned
//! by the bot so a seeded [`fastrand::Rng`] reproduces a whole game.

use log::trace;

use crate::board::{Board, Move};
use crate::square::{Color, Square};

pub struct Bot {
    rng: fastrand::Rng,
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot {
    /// A bot seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// A bot whose choices are fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self { rng }
    }

    /// Choose a move for `color`, captures first.
    ///
    /// Returns `None` only when `color` has no legal move at all; the game
    /// checks for that before asking.
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let moves: Vec<Move> = board
            .all_legal_moves(color)
            .into_iter()
            .map(|((from, to), captured)| Move { from, to, captured })
            .collect();
        let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        let candidates = if captures.is_empty() { moves } else { captures };
        let choice = self.pick(&candidates)?;
        trace!("bot {color}: {} candidates, chose {choice}", candidates.len());
        Some(choice)
    }

    /// Choose the next jump of a capture chain for the piece standing on `from`.
    pub fn choose_continuation(&mut self, board: &Board, from: Square, color: Color) -> Option<Move> {
        let candidates: Vec<Move> = board
            .find_capture_opportunities(from, color)
            .into_iter()
            .map(|c| Move {
                from,
                to: c.landing,
                captured: Some(c.captured),
            })
            .collect();
        self.pick(&candidates)
    }

    fn pick(&mut self, candidates: &[Move]) -> Option<Move> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.usize(..candidates.len())])
    }
}
