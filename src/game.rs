//! Turn sequencing and the click-driven move pipeline.
//!
//! A [`Game`] receives one resolved board square per input event through
//! [`Game::handle_selection`]. The first click picks a piece, the second a
//! destination. Captures chain: after a jump that leaves another jump
//! available, the same piece must keep going and the turn does not pass.
//!
//! Presentation and pacing are delegated to a [`Renderer`] and a
//! [`Scheduler`] owned by the game. When the turn passes to a bot-controlled
//! side the scheduler is asked for a delayed callback; the host then calls
//! [`Game::play_bot_turn`].

use std::fmt;
use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::board::{Board, Move, MoveError};
use crate::bot::Bot;
use crate::config::GameConfig;
use crate::constants::PIECES_PER_SIDE;
use crate::square::{Color, Square};

// =============================================================================
// Adapters
// =============================================================================

/// Receives every visible change to the game. All methods default to no-ops.
pub trait Renderer {
    fn piece_moved(&mut self, _from: Square, _to: Square, _color: Color) {}
    fn piece_captured(&mut self, _square: Square, _color: Color) {}
    fn piece_promoted(&mut self, _square: Square, _color: Color) {}
    fn turn_changed(&mut self, _color: Color) {}
    fn game_over(&mut self, _winner: Color) {}
}

/// Renderer that ignores everything.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

/// Provides "run the bot after a short delay".
pub trait Scheduler {
    fn schedule_bot_turn(&mut self, delay: Duration);
}

/// Records the most recent request so a host loop can honour it.
#[derive(Debug, Default)]
pub struct PacedScheduler {
    due: Option<Duration>,
}

impl PacedScheduler {
    /// Take the pending request, if any.
    pub fn take_due(&mut self) -> Option<Duration> {
        self.due.take()
    }

    pub fn is_due(&self) -> bool {
        self.due.is_some()
    }
}

impl Scheduler for PacedScheduler {
    fn schedule_bot_turn(&mut self, delay: Duration) {
        self.due = Some(delay);
    }
}

// =============================================================================
// State and results
// =============================================================================

/// Where the click protocol stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    AwaitingOrigin,
    AwaitingDestination(Square),
}

/// Turn owner, click state, and the forced landing square of a capture chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Phase {
    pub turn: Color,
    pub selection: Selection,
    pub pending_continuation: Option<Square>,
}

impl Phase {
    fn new(turn: Color) -> Self {
        Self {
            turn,
            selection: Selection::AwaitingOrigin,
            pending_continuation: None,
        }
    }
}

/// Pieces left and capture points, per side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    remaining: [u32; 2],
    points: [u32; 2],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            remaining: [PIECES_PER_SIDE; 2],
            points: [0; 2],
        }
    }
}

impl Scoreboard {
    pub fn remaining(&self, color: Color) -> u32 {
        self.remaining[color.index()]
    }

    pub fn points(&self, color: Color) -> u32 {
        self.points[color.index()]
    }

    /// A `captured` piece left the board: its owner loses one, the other side scores one.
    pub fn record_capture(&mut self, captured: Color) {
        let lost = &mut self.remaining[captured.index()];
        *lost = lost.saturating_sub(1);
        self.points[captured.opponent().index()] += 1;
    }

    /// Remaining counts taken from the pieces on `board`, no points yet.
    fn for_board(board: &Board) -> Self {
        let mut score = Self::default();
        for color in Color::BOTH {
            score.remaining[color.index()] = board.piece_count(color) as u32;
        }
        score
    }
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The game already has a winner.
    GameOver,
    /// The side to move is played by the bot.
    BotToMove,
    /// Click outside the playable squares.
    OffBoard,
    /// First click did not hit a piece of the side to move.
    NotOwnPiece,
    /// Second click hit an occupied square. The selection is dropped.
    DestinationOccupied,
    /// A capture is available somewhere and this move is not one.
    CaptureAvailable,
    /// A capture chain is in progress and must continue to the given square.
    ContinuationRequired(Square),
    /// Ordinary pieces cannot move backward.
    BackwardMove,
    /// The board refused the move.
    Illegal(MoveError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::GameOver => write!(f, "game is over"),
            Rejection::BotToMove => write!(f, "not your turn"),
            Rejection::OffBoard => write!(f, "not a playable square"),
            Rejection::NotOwnPiece => write!(f, "no piece of the side to move there"),
            Rejection::DestinationOccupied => write!(f, "destination is occupied"),
            Rejection::CaptureAvailable => write!(f, "a capture must be taken"),
            Rejection::ContinuationRequired(sq) => write!(f, "capture must continue to {sq}"),
            Rejection::BackwardMove => write!(f, "ordinary pieces cannot move backward"),
            Rejection::Illegal(e) => write!(f, "{e}"),
        }
    }
}

/// Everything that happened when one move was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub color: Color,
    pub mv: Move,
    pub promoted: bool,
    /// Forced landing square of the next jump, if the chain continues.
    pub continuation: Option<Square>,
    /// Set when this move ended the game.
    pub winner: Option<Color>,
}

/// Result of one input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    OriginSelected(Square),
    Moved(MoveReport),
    Rejected(Rejection),
}

// =============================================================================
// Game
// =============================================================================

pub struct Game<R: Renderer = NullRenderer, S: Scheduler = PacedScheduler> {
    board: Board,
    phase: Phase,
    score: Scoreboard,
    winner: Option<Color>,
    history: Vec<(Color, Move)>,
    turns: usize,
    bot: Bot,
    config: GameConfig,
    renderer: R,
    scheduler: S,
}

impl Game {
    /// Default adapters: nothing is drawn, bot turns are recorded for the host.
    pub fn new(config: GameConfig) -> Self {
        Self::with_adapters(config, NullRenderer, PacedScheduler::default())
    }
}

impl<R: Renderer, S: Scheduler> Game<R, S> {
    pub fn with_adapters(config: GameConfig, renderer: R, scheduler: S) -> Self {
        let turn = config.first_turn;
        Self::from_position(config, Board::starting(), turn, renderer, scheduler)
    }

    /// Start from an arbitrary position with `turn` to move.
    ///
    /// Remaining counts are taken from the board and both sides start with
    /// zero points. A side that cannot move loses immediately.
    pub fn from_position(config: GameConfig, board: Board, turn: Color, renderer: R, scheduler: S) -> Self {
        let bot = match config.seed {
            Some(seed) => Bot::with_seed(seed),
            None => Bot::new(),
        };
        let mut game = Self {
            score: Scoreboard::for_board(&board),
            board,
            phase: Phase::new(turn),
            winner: None,
            history: Vec::new(),
            turns: 0,
            bot,
            config,
            renderer,
            scheduler,
        };
        game.check_termination();
        if game.winner.is_none() {
            game.announce_turn();
        }
        game
    }

    /// Reset to the starting layout, keeping configuration, adapters and bot state.
    pub fn new_game(&mut self) {
        self.board = Board::starting();
        self.phase = Phase::new(self.config.first_turn);
        self.score = Scoreboard::default();
        self.winner = None;
        self.history.clear();
        self.turns = 0;
        info!("new game, {} to move", self.phase.turn);
        self.announce_turn();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Color {
        self.phase.turn
    }

    pub fn pending_continuation(&self) -> Option<Square> {
        self.phase.pending_continuation
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Every applied move in order, jumps of a chain listed separately.
    pub fn history(&self) -> &[(Color, Move)] {
        &self.history
    }

    /// Completed turns since the game started.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether the side to move is played by the bot and the game is live.
    pub fn bot_to_move(&self) -> bool {
        self.winner.is_none() && self.config.is_automated(self.phase.turn)
    }

    /// Feed one resolved click. `None` is a click outside the board.
    pub fn handle_selection(&mut self, square: Option<Square>) -> Outcome {
        let outcome = self.select(square);
        if let Outcome::Rejected(reason) = outcome {
            trace!("selection {square:?} rejected: {reason}");
        }
        outcome
    }

    fn select(&mut self, square: Option<Square>) -> Outcome {
        if self.winner.is_some() {
            return Outcome::Rejected(Rejection::GameOver);
        }
        if self.config.is_automated(self.phase.turn) {
            return Outcome::Rejected(Rejection::BotToMove);
        }
        let sq = match square {
            Some(sq) if sq.is_playable() => sq,
            _ => return Outcome::Rejected(Rejection::OffBoard),
        };

        match self.phase.selection {
            Selection::AwaitingOrigin => {
                if self.board.get(sq) != Some(self.phase.turn) {
                    return Outcome::Rejected(Rejection::NotOwnPiece);
                }
                self.phase.selection = Selection::AwaitingDestination(sq);
                Outcome::OriginSelected(sq)
            }
            Selection::AwaitingDestination(origin) => match self.check_destination(origin, sq) {
                Ok(captured) => {
                    let report = self.apply(Move { from: origin, to: sq, captured });
                    Outcome::Moved(report)
                }
                Err(reason) => {
                    self.cancel_selection();
                    Outcome::Rejected(reason)
                }
            },
        }
    }

    fn check_destination(&self, origin: Square, to: Square) -> Result<Option<Square>, Rejection> {
        let color = self.phase.turn;
        if !self.board.is_empty(to) {
            return Err(Rejection::DestinationOccupied);
        }
        if self.board.has_capture(color) {
            let moves = self.board.all_legal_moves(color);
            if !matches!(moves.get(&(origin, to)), Some(Some(_))) {
                return Err(Rejection::CaptureAvailable);
            }
        }
        if let Some(forced) = self.phase.pending_continuation {
            if to != forced {
                return Err(Rejection::ContinuationRequired(forced));
            }
        }
        if !self.board.is_forward_move(origin, to, color) {
            return Err(Rejection::BackwardMove);
        }
        self.board
            .validate_move(origin, to, color)
            .map_err(Rejection::Illegal)
    }

    /// Drop the chosen origin. A chain in progress keeps its jumper selected.
    fn cancel_selection(&mut self) {
        if self.phase.pending_continuation.is_none() {
            self.phase.selection = Selection::AwaitingOrigin;
        }
    }

    /// Apply a validated move for the side to move and settle the turn.
    fn apply(&mut self, mv: Move) -> MoveReport {
        let color = self.phase.turn;
        let promoted = self.apply_to_board(mv);

        if mv.is_capture() {
            if let Some(next) = self.board.find_capture_opportunities(mv.to, color).first() {
                debug!("{color} must continue capturing from {} to {}", mv.to, next.landing);
                self.phase.pending_continuation = Some(next.landing);
                self.phase.selection = Selection::AwaitingDestination(mv.to);
                return MoveReport {
                    color,
                    mv,
                    promoted,
                    continuation: Some(next.landing),
                    winner: None,
                };
            }
        }

        self.end_turn();
        MoveReport {
            color,
            mv,
            promoted,
            continuation: None,
            winner: self.winner,
        }
    }

    /// Relocate, resolve the capture, and crown. Returns whether a king was made.
    fn apply_to_board(&mut self, mv: Move) -> bool {
        let color = self.phase.turn;
        self.board.move_piece(mv.from, mv.to, color);
        self.renderer.piece_moved(mv.from, mv.to, color);
        debug!("{color} moved {mv}");

        if let Some(captured) = mv.captured {
            if let Some(owner) = self.board.remove(captured) {
                self.score.record_capture(owner);
                self.renderer.piece_captured(captured, owner);
                debug!(
                    "{color} captured {captured}; {owner} has {} left",
                    self.score.remaining(owner)
                );
            }
        }

        self.history.push((color, mv));
        let promoted = self.board.promote(mv.to, color);
        if promoted {
            self.renderer.piece_promoted(mv.to, color);
            debug!("{color} crowned at {}", mv.to);
        }
        promoted
    }

    fn end_turn(&mut self) {
        let next = self.phase.turn.opponent();
        self.phase = Phase::new(next);
        self.turns += 1;
        self.check_termination();
        if self.winner.is_none() {
            self.announce_turn();
        }
    }

    fn announce_turn(&mut self) {
        let turn = self.phase.turn;
        debug!("{turn}'s turn");
        self.renderer.turn_changed(turn);
        if self.config.is_automated(turn) {
            self.scheduler.schedule_bot_turn(self.config.bot_delay);
        }
    }

    /// The side to move loses with no pieces or no legal moves.
    fn check_termination(&mut self) {
        let turn = self.phase.turn;
        let out_of_pieces = self.score.remaining(turn) == 0;
        if out_of_pieces || self.board.all_legal_moves(turn).is_empty() {
            let winner = turn.opponent();
            self.winner = Some(winner);
            info!("game over after {} turns: {winner} wins", self.turns);
            self.renderer.game_over(winner);
        }
    }

    /// Play the whole turn of the side to move with the bot.
    ///
    /// If a capture chain is already under way, the bot continues it with
    /// the pinned jumper. After a capture the same piece keeps jumping, one randomly chosen
    /// capture at a time, until no capture remains. Returns every move
    /// applied, or an empty list if the game is already over.
    pub fn play_bot_turn(&mut self) -> Vec<MoveReport> {
        if self.winner.is_some() {
            return Vec::new();
        }
        let color = self.phase.turn;
        // A chain in progress must be finished by the same piece.
        let jumper = match (self.phase.pending_continuation, self.phase.selection) {
            (Some(_), Selection::AwaitingDestination(jumper)) => Some(jumper),
            _ => None,
        };
        self.phase = Phase::new(color);

        let first = match jumper {
            Some(from) => self.bot.choose_continuation(&self.board, from, color),
            None => self.bot.choose_move(&self.board, color),
        };
        let Some(mut mv) = first else {
            warn!("bot asked to move for {color} with no legal moves");
            return Vec::new();
        };

        let mut reports = Vec::new();
        loop {
            let promoted = self.apply_to_board(mv);
            reports.push(MoveReport {
                color,
                mv,
                promoted,
                continuation: None,
                winner: None,
            });
            if !mv.is_capture() {
                break;
            }
            match self.bot.choose_continuation(&self.board, mv.to, color) {
                Some(next) => mv = next,
                None => break,
            }
        }

        self.end_turn();
        if let Some(last) = reports.last_mut() {
            last.winner = self.winner;
        }
        reports
    }
}
