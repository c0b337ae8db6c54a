//! Integration tests for the click pipeline, bot turns, and game end.

use std::time::Duration;

use checkers_rs::board::{Board, Move, MoveError};
use checkers_rs::config::GameConfig;
use checkers_rs::game::{
    Game, NullRenderer, Outcome, PacedScheduler, Rejection, Renderer, Scheduler, Selection,
};
use checkers_rs::square::{Color, Square};

// =============================================================================
// Helpers
// =============================================================================

fn sq(col: i8, row: i8) -> Square {
    Square::new(col, row)
}

fn hot_seat() -> GameConfig {
    GameConfig::default().with_automated(&[]).with_seed(17)
}

fn position(board: Board, turn: Color) -> Game {
    Game::from_position(hot_seat(), board, turn, NullRenderer, PacedScheduler::default())
}

/// Click origin then destination, returning the second outcome.
fn play<R: Renderer, S: Scheduler>(game: &mut Game<R, S>, from: Square, to: Square) -> Outcome {
    assert_eq!(game.handle_selection(Some(from)), Outcome::OriginSelected(from));
    game.handle_selection(Some(to))
}

/// Renderer that records every notification.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Renderer for Recorder {
    fn piece_moved(&mut self, from: Square, to: Square, color: Color) {
        self.events.push(format!("move {color} {from} {to}"));
    }
    fn piece_captured(&mut self, square: Square, color: Color) {
        self.events.push(format!("capture {color} {square}"));
    }
    fn piece_promoted(&mut self, square: Square, color: Color) {
        self.events.push(format!("king {color} {square}"));
    }
    fn game_over(&mut self, winner: Color) {
        self.events.push(format!("over {winner}"));
    }
}

// =============================================================================
// Simple moves
// =============================================================================

#[test]
fn test_opening_front_row_move() {
    let mut game = Game::new(hot_seat());
    let Outcome::Moved(report) = play(&mut game, sq(3, 5), sq(4, 4)) else {
        panic!("opening step should be legal");
    };
    assert_eq!(report.mv, Move { from: sq(3, 5), to: sq(4, 4), captured: None });
    assert!(!report.promoted);
    assert_eq!(report.winner, None);
    assert_eq!(game.turn(), Color::Second);
}

#[test]
fn test_second_row_piece_steps_into_vacated_square() {
    let mut game = Game::new(hot_seat());
    play(&mut game, sq(3, 5), sq(4, 4));
    play(&mut game, sq(0, 2), sq(1, 3));

    let Outcome::Moved(report) = play(&mut game, sq(2, 6), sq(3, 5)) else {
        panic!("(2,6)->(3,5) should be legal once (3,5) is empty");
    };
    assert_eq!(report.mv.captured, None);
    assert!(!report.promoted);
    assert_eq!(game.turn(), Color::Second);
}

#[test]
fn test_rejections_leave_board_untouched() {
    let mut game = Game::new(hot_seat());
    let before = game.board().clone();

    game.handle_selection(Some(sq(3, 5)));
    assert_eq!(
        game.handle_selection(Some(sq(5, 3))),
        Outcome::Rejected(Rejection::Illegal(MoveError::NotADiagonalStep))
    );
    game.handle_selection(Some(sq(3, 5)));
    assert_eq!(
        game.handle_selection(Some(sq(3, 3))),
        Outcome::Rejected(Rejection::BackwardMove)
    );
    assert_eq!(game.phase().selection, Selection::AwaitingOrigin);
    assert_eq!(game.board(), &before);
    assert_eq!(game.turn(), Color::First);
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_capture_must_be_taken() {
    // First can jump (3,3) from (4,4); quiet steps from (6,6) and (1,3) are refused
    let board = Board::from_pieces([
        (sq(4, 4), Color::First, false),
        (sq(6, 6), Color::First, false),
        (sq(1, 3), Color::First, false),
        (sq(3, 3), Color::Second, false),
        (sq(0, 0), Color::Second, false),
    ]);
    let mut game = position(board, Color::First);
    assert_eq!(play(&mut game, sq(6, 6), sq(7, 5)), Outcome::Rejected(Rejection::CaptureAvailable));
    assert_eq!(game.phase().selection, Selection::AwaitingOrigin);

    // (2,2) is the capture's landing square, but (1,3) would reach it by a plain step
    assert_eq!(game.board().validate_move(sq(1, 3), sq(2, 2), Color::First), Ok(None));
    assert_eq!(play(&mut game, sq(1, 3), sq(2, 2)), Outcome::Rejected(Rejection::CaptureAvailable));
    assert!(game.board().is_empty(sq(2, 2)));

    let Outcome::Moved(report) = play(&mut game, sq(4, 4), sq(2, 2)) else {
        panic!("capture should be accepted");
    };
    assert_eq!(report.mv.captured, Some(sq(3, 3)));
    assert!(game.board().is_empty(sq(3, 3)));
    assert_eq!(game.score().remaining(Color::Second), 1);
    assert_eq!(game.turn(), Color::Second);
}

#[test]
fn test_multi_capture_continuation() {
    let board = Board::from_pieces([
        (sq(6, 6), Color::First, false),
        (sq(5, 5), Color::Second, false),
        (sq(3, 3), Color::Second, false),
        (sq(6, 0), Color::Second, false),
    ]);
    let mut game = position(board, Color::First);
    let points_before = game.score().points(Color::First);

    let Outcome::Moved(first_jump) = play(&mut game, sq(6, 6), sq(4, 4)) else {
        panic!("first jump should be accepted");
    };
    assert_eq!(first_jump.continuation, Some(sq(2, 2)));
    assert_eq!(game.pending_continuation(), Some(sq(2, 2)));
    assert_eq!(game.turn(), Color::First, "turn must not pass mid-chain");
    assert_eq!(game.phase().selection, Selection::AwaitingDestination(sq(4, 4)));

    // Anywhere else is refused and the jumper stays selected
    assert!(matches!(game.handle_selection(Some(sq(5, 3))), Outcome::Rejected(_)));
    assert_eq!(game.phase().selection, Selection::AwaitingDestination(sq(4, 4)));
    assert_eq!(game.pending_continuation(), Some(sq(2, 2)));

    let Outcome::Moved(second_jump) = game.handle_selection(Some(sq(2, 2))) else {
        panic!("second jump should be accepted");
    };
    assert_eq!(second_jump.mv.captured, Some(sq(3, 3)));
    assert_eq!(second_jump.continuation, None);
    assert_eq!(game.pending_continuation(), None);
    assert_eq!(game.turn(), Color::Second);
    assert_eq!(game.score().points(Color::First), points_before + 2);
    assert_eq!(game.score().remaining(Color::Second), 1);
}

#[test]
fn test_continuation_must_follow_first_landing() {
    // After (6,6)x(5,5)->(4,4) both (5,3) and (3,3) can be jumped; the first
    // direction searched (up-right) is the forced one
    let board = Board::from_pieces([
        (sq(6, 6), Color::First, false),
        (sq(5, 5), Color::Second, false),
        (sq(5, 3), Color::Second, false),
        (sq(3, 3), Color::Second, false),
        (sq(0, 0), Color::Second, false),
    ]);
    let mut game = position(board, Color::First);
    play(&mut game, sq(6, 6), sq(4, 4));
    assert_eq!(game.pending_continuation(), Some(sq(6, 2)));

    assert_eq!(
        game.handle_selection(Some(sq(2, 2))),
        Outcome::Rejected(Rejection::ContinuationRequired(sq(6, 2)))
    );
    assert!(matches!(game.handle_selection(Some(sq(6, 2))), Outcome::Moved(_)));
}

#[test]
fn test_bot_finishes_pending_chain() {
    // (1,7) could also capture (2,6), but once (6,6) has started jumping
    // only that piece may carry on
    for seed in 0..20 {
        let board = Board::from_pieces([
            (sq(6, 6), Color::First, false),
            (sq(1, 7), Color::First, false),
            (sq(5, 5), Color::Second, false),
            (sq(3, 3), Color::Second, false),
            (sq(2, 6), Color::Second, false),
        ]);
        let config = GameConfig::default().with_automated(&[]).with_seed(seed);
        let mut game = Game::from_position(config, board, Color::First, NullRenderer, PacedScheduler::default());
        play(&mut game, sq(6, 6), sq(4, 4));
        assert_eq!(game.pending_continuation(), Some(sq(2, 2)));

        let reports = game.play_bot_turn();
        let moves: Vec<Move> = reports.iter().map(|r| r.mv).collect();
        assert_eq!(
            moves,
            vec![Move { from: sq(4, 4), to: sq(2, 2), captured: Some(sq(3, 3)) }],
            "seed {seed}"
        );
        assert_eq!(game.board().get(sq(1, 7)), Some(Color::First));
        assert_eq!(game.board().get(sq(2, 6)), Some(Color::Second));
        assert_eq!(game.turn(), Color::Second);
        assert_eq!(game.pending_continuation(), None);
    }
}

// =============================================================================
// Promotion
// =============================================================================

#[test]
fn test_promotion_on_far_row() {
    let board = Board::from_pieces([
        (sq(1, 1), Color::First, false),
        (sq(6, 2), Color::Second, false),
    ]);
    let mut game = Game::from_position(hot_seat(), board, Color::First, Recorder::default(), PacedScheduler::default());

    let Outcome::Moved(report) = play(&mut game, sq(1, 1), sq(2, 0)) else {
        panic!("step onto the far row should be accepted");
    };
    assert!(report.promoted);
    assert!(game.board().is_king(sq(2, 0)));
    assert!(game.renderer().events.contains(&"king first (2,0)".to_string()));

    // Second steps, then the new king may move backward and stays crowned
    play(&mut game, sq(6, 2), sq(7, 3));
    let Outcome::Moved(back) = play(&mut game, sq(2, 0), sq(3, 1)) else {
        panic!("kings move backward");
    };
    assert!(!back.promoted);
    assert!(game.board().is_king(sq(3, 1)));
    assert_eq!(game.board().king_count(Color::First), 1);
}

// =============================================================================
// Game end
// =============================================================================

#[test]
fn test_boxed_in_side_loses() {
    let board = Board::from_pieces([
        (sq(1, 1), Color::First, false),
        (sq(2, 2), Color::First, false),
        (sq(5, 5), Color::First, false),
        (sq(0, 0), Color::Second, false),
    ]);
    let mut game = Game::from_position(hot_seat(), board, Color::First, Recorder::default(), PacedScheduler::default());
    assert!(!game.is_over());

    let Outcome::Moved(report) = play(&mut game, sq(5, 5), sq(4, 4)) else {
        panic!("quiet move should be accepted");
    };
    assert_eq!(report.winner, Some(Color::First));
    assert_eq!(game.winner(), Some(Color::First));
    assert!(game.board().all_legal_moves(Color::Second).is_empty());
    assert_eq!(game.renderer().events.last(), Some(&"over first".to_string()));
    assert_eq!(game.handle_selection(Some(sq(0, 0))), Outcome::Rejected(Rejection::GameOver));
}

#[test]
fn test_last_piece_captured_ends_game() {
    let board = Board::from_pieces([
        (sq(3, 5), Color::First, false),
        (sq(2, 4), Color::Second, false),
    ]);
    let mut game = position(board, Color::First);
    let Outcome::Moved(report) = play(&mut game, sq(3, 5), sq(1, 3)) else {
        panic!("capture should be accepted");
    };
    assert_eq!(report.winner, Some(Color::First));
    assert_eq!(game.score().remaining(Color::Second), 0);
}

#[test]
fn test_position_without_moves_is_already_lost() {
    let board = Board::from_pieces([(sq(1, 1), Color::First, false), (sq(2, 2), Color::First, false), (sq(0, 0), Color::Second, false)]);
    let game = position(board, Color::Second);
    assert_eq!(game.winner(), Some(Color::First));
}

// =============================================================================
// Bot turns
// =============================================================================

#[test]
fn test_bot_extends_capture_chain() {
    let board = Board::from_pieces([
        (sq(1, 1), Color::Second, false),
        (sq(2, 2), Color::First, false),
        (sq(4, 4), Color::First, false),
        (sq(0, 6), Color::First, false),
    ]);
    let config = GameConfig::default().with_seed(5).with_delay(Duration::ZERO);
    let mut game = Game::from_position(config, board, Color::Second, NullRenderer, PacedScheduler::default());
    assert_eq!(game.scheduler_mut().take_due(), Some(Duration::ZERO));

    let reports = game.play_bot_turn();
    let moves: Vec<Move> = reports.iter().map(|r| r.mv).collect();
    assert_eq!(
        moves,
        vec![
            Move { from: sq(1, 1), to: sq(3, 3), captured: Some(sq(2, 2)) },
            Move { from: sq(3, 3), to: sq(5, 5), captured: Some(sq(4, 4)) },
        ]
    );
    assert_eq!(game.turn(), Color::First);
    assert_eq!(game.score().remaining(Color::First), 1);
    assert_eq!(game.history().len(), 2);
    assert_eq!(reports.last().and_then(|r| r.winner), None);
}

#[test]
fn test_bot_turn_after_game_over_is_noop() {
    let board = Board::from_pieces([(sq(1, 1), Color::First, false), (sq(2, 2), Color::First, false), (sq(0, 0), Color::Second, false)]);
    let mut game = position(board, Color::Second);
    assert!(game.play_bot_turn().is_empty());
}

#[test]
fn test_seeded_selfplay_is_reproducible() {
    let run = |seed: u64| {
        let config = GameConfig::default().with_seed(seed).with_automated(&Color::BOTH);
        let mut game = Game::new(config);
        while !game.is_over() && game.turns() < 300 {
            game.play_bot_turn();
        }
        (game.history().to_vec(), game.winner())
    };
    assert_eq!(run(123), run(123));
}

#[test]
fn test_selfplay_termination_agrees_with_move_generation() {
    for seed in 0..10 {
        let config = GameConfig::default().with_seed(seed).with_automated(&Color::BOTH);
        let mut game = Game::new(config);
        while !game.is_over() && game.turns() < 300 {
            game.play_bot_turn();
            let score = game.score();
            for color in Color::BOTH {
                assert_eq!(score.remaining(color) as usize, game.board().piece_count(color));
                assert_eq!(score.points(color.opponent()), 12 - score.remaining(color));
            }
        }
        if let Some(winner) = game.winner() {
            let loser = winner.opponent();
            assert_eq!(game.turn(), loser);
            assert!(
                game.board().all_legal_moves(loser).is_empty() || game.score().remaining(loser) == 0
            );
        } else {
            assert!(!game.board().all_legal_moves(game.turn()).is_empty());
        }
    }
}
