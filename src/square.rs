//! Squares, colors, and diagonal geometry.
//!
//! Everything here is pure: no board state is consulted. `Board` combines
//! these helpers with piece placement to derive legal moves.

use std::fmt;

use crate::constants::{FIRST_INDEX, HOME_ROWS, JUMP_SHIFT, LAST_INDEX, N, SIMPLE_SHIFT};

/// A board position identified by `(column, row)`, row 0 at the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub col: i8,
    pub row: i8,
}

impl Square {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// True if both coordinates lie in `[0, N)`.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (FIRST_INDEX..N).contains(&self.col) && (FIRST_INDEX..N).contains(&self.row)
    }

    /// True for the dark squares pieces can stand on.
    #[inline]
    pub fn is_playable(self) -> bool {
        self.in_bounds() && self.col % 2 == self.row % 2
    }

    /// True if the square is on the outer ring (first/last row or column).
    ///
    /// A piece standing here can never be jumped.
    #[inline]
    pub fn is_edge(self) -> bool {
        self.col == FIRST_INDEX
            || self.col == LAST_INDEX
            || self.row == FIRST_INDEX
            || self.row == LAST_INDEX
    }

    /// The square reached by walking `shift` steps along `dir`. May be out of bounds.
    #[inline]
    pub fn step(self, dir: Diagonal, shift: i8) -> Square {
        let (dc, dr) = dir.delta();
        Square::new(self.col + dc * shift, self.row + dr * shift)
    }

    /// Parse `"3,5"`, `"3 5"` or `"(3,5)"` into a square.
    ///
    /// Returns `None` for malformed input or coordinates off the board.
    pub fn parse(s: &str) -> Option<Square> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let col = parts.next()?.parse::<i8>().ok()?;
        let row = parts.next()?.parse::<i8>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let sq = Square::new(col, row);
        sq.in_bounds().then_some(sq)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// The two sides. `First` starts at the bottom (rows 5-7) and moves up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    First,
    Second,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::First, Color::Second];

    pub fn opponent(self) -> Color {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First,
        }
    }

    /// Row delta of a forward step for an ordinary piece.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::First => -1,
            Color::Second => 1,
        }
    }

    /// Rows this side occupies in the starting layout.
    pub fn home_rows(self) -> std::ops::RangeInclusive<i8> {
        match self {
            Color::First => (N - HOME_ROWS)..=LAST_INDEX,
            Color::Second => FIRST_INDEX..=(HOME_ROWS - 1),
        }
    }

    /// The farthest row from this side's start; reaching it crowns a piece.
    #[inline]
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::First => FIRST_INDEX,
            Color::Second => LAST_INDEX,
        }
    }

    /// Index into per-side arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::First => 0,
            Color::Second => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::First => write!(f, "first"),
            Color::Second => write!(f, "second"),
        }
    }
}

/// Kind of diagonal move, determining how far the piece travels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Simple,
    Jump,
}

impl MoveKind {
    #[inline]
    pub fn shift(self) -> i8 {
        match self {
            MoveKind::Simple => SIMPLE_SHIFT,
            MoveKind::Jump => JUMP_SHIFT,
        }
    }
}

/// The four diagonal directions. "Up" means toward row 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagonal {
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Diagonal {
    /// All directions in the order captures are searched.
    pub const ALL: [Diagonal; 4] = [
        Diagonal::UpRight,
        Diagonal::UpLeft,
        Diagonal::DownRight,
        Diagonal::DownLeft,
    ];

    /// (column delta, row delta) for a single step.
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Diagonal::UpRight => (1, -1),
            Diagonal::UpLeft => (-1, -1),
            Diagonal::DownRight => (1, 1),
            Diagonal::DownLeft => (-1, 1),
        }
    }
}

/// Directions a piece may travel: all four for a king, the two forward ones otherwise.
pub fn directions(color: Color, king: bool) -> &'static [Diagonal] {
    const UP: [Diagonal; 2] = [Diagonal::UpRight, Diagonal::UpLeft];
    const DOWN: [Diagonal; 2] = [Diagonal::DownRight, Diagonal::DownLeft];
    if king {
        return &Diagonal::ALL;
    }
    match color {
        Color::First => &UP,
        Color::Second => &DOWN,
    }
}

/// In-bounds destinations for a move of `kind` from `from`.
///
/// Occupancy is not checked.
pub fn candidate_steps(from: Square, color: Color, king: bool, kind: MoveKind) -> Vec<Square> {
    directions(color, king)
        .iter()
        .map(|&d| from.step(d, kind.shift()))
        .filter(|sq| sq.in_bounds())
        .collect()
}
