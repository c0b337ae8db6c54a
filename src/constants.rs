//! Constants for board dimensions, starting layout, and engine pacing.
//!
//! The board is the standard 8x8 draughts board addressed by `(column, row)`
//! with row 0 at the top. Only squares whose column and row share a parity
//! are playable.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Checkers is always played on 8x8 here.
pub const N: i8 = 8;

/// First valid column/row index.
pub const FIRST_INDEX: i8 = 0;

/// Last valid column/row index.
pub const LAST_INDEX: i8 = N - 1;

/// Number of rows each side fills at the start of a game.
pub const HOME_ROWS: i8 = 3;

/// Pieces per side in the starting layout (4 per home row).
pub const PIECES_PER_SIDE: u32 = 12;

// =============================================================================
// Move Shifts
// =============================================================================

/// Diagonal distance covered by a simple step.
pub const SIMPLE_SHIFT: i8 = 1;

/// Diagonal distance covered by a jump (capture).
pub const JUMP_SHIFT: i8 = 2;

// =============================================================================
// Pacing and Limits
// =============================================================================

/// Default pause before the automated player moves, so its turn is visible.
pub const BOT_DELAY: Duration = Duration::from_millis(700);

/// Turn cap for bot-vs-bot games. Kings can shuffle forever otherwise.
pub const SELFPLAY_MAX_TURNS: usize = 400;
