//! Piece placement, king registry, and move derivation.
//!
//! `Board` is the only owner of piece locations. It answers legality
//! questions and offers unvalidated mutation primitives; turn order and
//! scoring live in [`crate::game`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::constants::{FIRST_INDEX, N};
use crate::square::{Color, Diagonal, MoveKind, Square, candidate_steps, directions};

/// Square -> owner of the piece standing there.
pub type Placement = HashMap<Square, Color>;

/// Every legal `(from, to)` pair for one side, mapped to the square it captures.
pub type MoveMap = BTreeMap<(Square, Square), Option<Square>>;

/// A single move: relocation plus an optional captured square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Square>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.captured {
            Some(c) => write!(f, "{}x{}->{}", self.from, c, self.to),
            None => write!(f, "{}->{}", self.from, self.to),
        }
    }
}

/// A capture available from some square: the jumped piece and where the jumper lands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub captured: Square,
    pub landing: Square,
}

/// Why a proposed move was refused by [`Board::validate_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A capture is available from the origin and the destination is not one.
    CaptureRequired,
    /// Destination is not a reachable empty diagonal step.
    NotADiagonalStep,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::CaptureRequired => write!(f, "illegal move: capture is mandatory"),
            MoveError::NotADiagonalStep => write!(f, "illegal move: not a diagonal step"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    pieces: Placement,
    kings: Placement,
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// A board set up in the standard starting layout.
    pub fn starting() -> Self {
        Self {
            pieces: starting_placement(),
            kings: Placement::new(),
        }
    }

    /// Build a custom position from `(square, color, is_king)` triples.
    ///
    /// Squares that are not playable are skipped.
    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (Square, Color, bool)>,
    {
        let mut board = Self::new();
        for (sq, color, king) in pieces {
            if !sq.is_playable() {
                continue;
            }
            board.pieces.insert(sq, color);
            if king {
                board.kings.insert(sq, color);
            }
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<Color> {
        self.pieces.get(&sq).copied()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        !self.pieces.contains_key(&sq)
    }

    pub fn is_king(&self, sq: Square) -> bool {
        self.kings.contains_key(&sq)
    }

    pub fn placement(&self) -> &Placement {
        &self.pieces
    }

    pub fn kings(&self) -> &Placement {
        &self.kings
    }

    /// All squares holding a piece of `color`, in square order.
    pub fn pieces(&self, color: Color) -> Vec<Square> {
        let mut out: Vec<Square> = self
            .pieces
            .iter()
            .filter(|&(_, &c)| c == color)
            .map(|(&sq, _)| sq)
            .collect();
        out.sort();
        out
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces.values().filter(|&&c| c == color).count()
    }

    pub fn king_count(&self, color: Color) -> usize {
        self.kings.values().filter(|&&c| c == color).count()
    }

    /// Relocate a piece, carrying its king status along.
    ///
    /// No legality checks are performed; callers validate first.
    pub fn move_piece(&mut self, from: Square, to: Square, color: Color) {
        self.pieces.remove(&from);
        self.pieces.insert(to, color);
        if self.kings.remove(&from).is_some() {
            self.kings.insert(to, color);
        }
    }

    /// Take a piece off the board, returning its owner.
    pub fn remove(&mut self, sq: Square) -> Option<Color> {
        self.kings.remove(&sq);
        self.pieces.remove(&sq)
    }

    /// Diagonal destinations of `kind` from `from`, using the occupant's color and rank.
    ///
    /// Empty origins yield nothing.
    pub fn candidate_steps(&self, from: Square, kind: MoveKind) -> Vec<Square> {
        match self.get(from) {
            Some(color) => candidate_steps(from, color, self.is_king(from), kind),
            None => Vec::new(),
        }
    }

    /// Captures available to a `color` piece standing on `from`.
    ///
    /// Results follow [`Diagonal::ALL`] order, so the first entry is stable.
    pub fn find_capture_opportunities(&self, from: Square, color: Color) -> Vec<Capture> {
        directions(color, self.is_king(from))
            .iter()
            .filter_map(|&d| self.capture_towards(from, color, d))
            .collect()
    }

    fn capture_towards(&self, from: Square, color: Color, dir: Diagonal) -> Option<Capture> {
        let captured = from.step(dir, MoveKind::Simple.shift());
        let landing = from.step(dir, MoveKind::Jump.shift());
        if !captured.in_bounds() || captured.is_edge() {
            return None;
        }
        match self.get(captured) {
            Some(c) if c != color => {}
            _ => return None,
        }
        if !landing.in_bounds() || !self.is_empty(landing) {
            return None;
        }
        Some(Capture { captured, landing })
    }

    /// Destinations for the piece on `from`, each mapped to what it captures.
    ///
    /// If any capture exists only capture destinations are returned.
    pub fn legal_destinations(&self, from: Square, color: Color) -> BTreeMap<Square, Option<Square>> {
        let captures = self.find_capture_opportunities(from, color);
        if !captures.is_empty() {
            return captures
                .into_iter()
                .map(|c| (c.landing, Some(c.captured)))
                .collect();
        }
        candidate_steps(from, color, self.is_king(from), MoveKind::Simple)
            .into_iter()
            .filter(|&sq| self.is_empty(sq))
            .map(|sq| (sq, None))
            .collect()
    }

    /// Check `from -> to` for `color`, returning the captured square if any.
    pub fn validate_move(&self, from: Square, to: Square, color: Color) -> Result<Option<Square>, MoveError> {
        let captures = self.find_capture_opportunities(from, color);
        if !captures.is_empty() {
            return captures
                .iter()
                .find(|c| c.landing == to)
                .map(|c| Some(c.captured))
                .ok_or(MoveError::CaptureRequired);
        }
        let steps = candidate_steps(from, color, self.is_king(from), MoveKind::Simple);
        if steps.contains(&to) && self.is_empty(to) {
            Ok(None)
        } else {
            Err(MoveError::NotADiagonalStep)
        }
    }

    /// Kings may go any way; ordinary pieces only toward the opponent's home edge.
    pub fn is_forward_move(&self, from: Square, to: Square, color: Color) -> bool {
        if self.is_king(from) {
            return true;
        }
        if from.col == to.col {
            return false;
        }
        (to.row - from.row).signum() == color.forward()
    }

    /// Crown the piece on `sq` if it stands on `color`'s promotion row.
    ///
    /// Returns true only when a new king was registered.
    pub fn promote(&mut self, sq: Square, color: Color) -> bool {
        if sq.row != color.promotion_row() || self.kings.contains_key(&sq) {
            return false;
        }
        if self.get(sq) != Some(color) {
            return false;
        }
        self.kings.insert(sq, color);
        true
    }

    /// Union of [`Board::legal_destinations`] over every piece of `color`.
    pub fn all_legal_moves(&self, color: Color) -> MoveMap {
        let mut moves = MoveMap::new();
        for from in self.pieces(color) {
            for (to, captured) in self.legal_destinations(from, color) {
                moves.insert((from, to), captured);
            }
        }
        moves
    }

    /// Whether any piece of `color` can capture right now.
    pub fn has_capture(&self, color: Color) -> bool {
        self.pieces(color)
            .into_iter()
            .any(|sq| !self.find_capture_opportunities(sq, color).is_empty())
    }
}

/// The standard 12-per-side layout on the dark squares of each side's three home rows.
pub fn starting_placement() -> Placement {
    let mut placement = Placement::new();
    for color in Color::BOTH {
        for row in color.home_rows() {
            for col in FIRST_INDEX..N {
                let sq = Square::new(col, row);
                if sq.is_playable() {
                    placement.insert(sq, color);
                }
            }
        }
    }
    placement
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in FIRST_INDEX..N {
            write!(f, "{col} ")?;
        }
        writeln!(f)?;
        for row in FIRST_INDEX..N {
            write!(f, "{row} ")?;
            for col in FIRST_INDEX..N {
                let sq = Square::new(col, row);
                let ch = match (self.get(sq), self.is_king(sq)) {
                    (Some(Color::First), false) => 'x',
                    (Some(Color::First), true) => 'X',
                    (Some(Color::Second), false) => 'o',
                    (Some(Color::Second), true) => 'O',
                    (None, _) if sq.is_playable() => '.',
                    (None, _) => ' ',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
