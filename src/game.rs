use log::{debug, info, warn};
use web_time::Instant;

use crate::ai::Strategy;
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::{GameEvent, GameObserver};
use crate::rules;
use crate::schedule::{ThinkingScheduler, ThinkingTicket};
use crate::state::GameState;
use crate::types::{ControllerState, GameResult, GameSnapshot, Move, Scores, Side, TurnOutcome};

/// Runs one game: validates human input, drives the computer opponent and
/// reports what happened to registered observers.
pub struct GameController {
    state: GameState,
    phase: ControllerState,
    config: GameConfig,
    strategy: Box<dyn Strategy>,
    scheduler: ThinkingScheduler,
    observers: Vec<Box<dyn GameObserver>>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(config, Board::new(), Side::Dark)
    }

    /// Plays the computer side with `strategy` instead of the configured level.
    pub fn with_strategy(config: GameConfig, strategy: Box<dyn Strategy>) -> Self {
        Self::build(config, strategy, Board::new(), Side::Dark)
    }

    /// Starts from an arbitrary position. A side to move without legal moves
    /// is passed at once; if neither side can move the game is already over.
    pub fn from_position(config: GameConfig, board: Board, side: Side) -> Self {
        let strategy = config.ai_level.strategy(config.seed);
        Self::build(config, strategy, board, side)
    }

    fn build(config: GameConfig, strategy: Box<dyn Strategy>, board: Board, side: Side) -> Self {
        let mut controller = Self {
            state: GameState::from_position(board, side),
            phase: ControllerState::TurnComplete,
            config,
            strategy,
            scheduler: ThinkingScheduler::default(),
            observers: Vec::new(),
        };
        controller.settle_opening();
        controller
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Replaces the settings and starts a new game.
    pub fn configure(&mut self, config: GameConfig) {
        self.strategy = config.ai_level.strategy(config.seed);
        self.config = config;
        self.restart();
    }

    /// Back to the initial position with dark to move. Pending AI work is dropped.
    pub fn restart(&mut self) {
        self.start(Board::new(), Side::Dark);
    }

    /// Places a disc for the human player to move.
    pub fn submit_move(&mut self, mv: Move) -> EngineResult<TurnOutcome> {
        self.expect_phase(ControllerState::AwaitingHumanMove, "submit_move")?;

        let side = self.state.active_side();
        let captures = rules::compute_captures(self.state.board(), mv, side)
            .map_err(|err| match err {
                EngineError::OutOfRange { row, col } => EngineError::IllegalMove {
                    row,
                    col,
                    reason: "square is off the board",
                },
                other => other,
            })
            .inspect_err(|err| warn!("rejected {side} move: {err}"))?;
        if captures.is_empty() {
            warn!("rejected {side} move at {mv}: nothing to capture");
            return Err(EngineError::IllegalMove {
                row: mv.row,
                col: mv.col,
                reason: "it captures nothing",
            });
        }

        self.play(mv)
    }

    /// Lets the configured strategy move for the computer side right away.
    pub fn run_ai_move(&mut self) -> EngineResult<TurnOutcome> {
        self.expect_phase(ControllerState::ComputingAiMove, "run_ai_move")?;
        self.scheduler.cancel();

        let side = self.state.active_side();
        let legal = rules::legal_moves(self.state.board(), side);
        let mv = self.strategy.select_move(&self.state.board, side, &legal);
        if !legal.contains(&mv) {
            debug_assert!(
                false,
                "{} strategy picked illegal move {mv}",
                self.strategy.name()
            );
            return Err(EngineError::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        debug!("{} strategy chose {mv} for {side}", self.strategy.name());
        self.play(mv)
    }

    /// Schedules the computer's move after the configured thinking delay.
    /// Replaces any ticket already pending.
    pub fn schedule_ai_move(&mut self, now: Instant) -> EngineResult<ThinkingTicket> {
        self.expect_phase(ControllerState::ComputingAiMove, "schedule_ai_move")?;
        let ticket = self.scheduler.schedule(now, self.config.thinking_delay());
        debug!("AI move due in {:?}", ticket.remaining(now));
        Ok(ticket)
    }

    /// Plays the scheduled move if its delay has elapsed by `now`.
    /// Returns `Ok(None)` when nothing was due.
    pub fn poll_ai_move(&mut self, now: Instant) -> EngineResult<Option<TurnOutcome>> {
        match self.scheduler.take_due(now) {
            Some(_) => self.run_ai_move().map(Some),
            None => Ok(None),
        }
    }

    /// Plays the move for `ticket`, whose timer the caller saw fire.
    /// Cancelled or superseded tickets fail with `StaleTicket` without
    /// touching the game.
    pub fn complete_ai_move(&mut self, ticket: ThinkingTicket) -> EngineResult<TurnOutcome> {
        if !self.scheduler.redeem(ticket) {
            warn!("ignoring a cancelled or superseded thinking ticket");
            return Err(EngineError::StaleTicket);
        }
        self.run_ai_move()
    }

    /// Drops the pending AI move, if any. The game is left as it was.
    pub fn cancel_ai_move(&mut self) -> bool {
        let cancelled = self.scheduler.cancel();
        if cancelled {
            debug!("AI move cancelled");
        }
        cancelled
    }

    pub fn pending_ai_move(&self) -> Option<ThinkingTicket> {
        self.scheduler.pending()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        rules::legal_moves(self.state.board(), self.state.active_side())
    }

    pub fn current_side(&self) -> Side {
        self.state.active_side()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == ControllerState::GameOver
    }

    pub fn scores(&self) -> Scores {
        self.state.board().count_discs()
    }

    pub fn state(&self) -> ControllerState {
        self.phase
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Winner and final counts, once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.is_game_over()
            .then(|| GameResult::from_scores(self.scores()))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board().to_array().to_vec(),
            current_side: self.current_side(),
            state: self.phase,
            scores: self.scores(),
            is_game_over: self.is_game_over(),
            legal_moves: self.legal_moves(),
        }
    }

    fn start(&mut self, board: Board, side: Side) {
        self.scheduler.cancel();
        self.state = GameState::from_position(board, side);
        info!(
            "new game, {side} first; computer side {:?} at {:?} level",
            self.config.ai_side, self.config.ai_level
        );
        self.emit(GameEvent::GameStarted { first: side });
        self.settle_opening();
    }

    fn settle_opening(&mut self) {
        let side = self.state.active_side();
        let outcome = if rules::has_legal_move(self.state.board(), side) {
            TurnOutcome::Continue
        } else {
            // Treat the position as if the opponent just moved.
            self.state.active_side = !side;
            rules::advance_turn(&mut self.state)
        };
        self.settle(outcome);
    }

    fn play(&mut self, mv: Move) -> EngineResult<TurnOutcome> {
        let side = self.state.active_side();
        let flipped = rules::apply_move(&mut self.state.board, mv, side)?;
        self.phase = ControllerState::TurnComplete;
        debug!("{side} played {mv}, flipping {} disc(s)", flipped.len());
        self.emit(GameEvent::MoveApplied {
            side,
            at: mv,
            flipped,
        });

        let outcome = rules::advance_turn(&mut self.state);
        self.settle(outcome);
        Ok(outcome)
    }

    /// Derives the next phase from a turn outcome.
    fn settle(&mut self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Ended => {
                self.phase = ControllerState::GameOver;
                self.state.computer_to_move = false;
                let result = GameResult::from_scores(self.scores());
                info!(
                    "game over: dark {} light {}, winner {:?}",
                    result.scores.dark, result.scores.light, result.winner
                );
                self.emit(GameEvent::GameEnded { result });
                return;
            }
            TurnOutcome::Passed { skipped } => {
                info!("{skipped} has no legal move and passes");
                self.emit(GameEvent::SidePassed { side: skipped });
            }
            TurnOutcome::Continue => {}
        }

        let side = self.state.active_side();
        let computer = self.config.is_computer(side);
        self.state.computer_to_move = computer;
        self.phase = if computer {
            ControllerState::ComputingAiMove
        } else {
            ControllerState::AwaitingHumanMove
        };
        debug!("{side} to move, {}", self.phase);
    }

    fn expect_phase(&self, expected: ControllerState, operation: &'static str) -> EngineResult<()> {
        if self.phase == expected {
            return Ok(());
        }
        warn!("{operation} refused while {}", self.phase);
        Err(EngineError::InvalidState {
            operation,
            state: self.phase,
        })
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiLevel;
    use crate::events::EventLog;
    use web_time::Duration;

    struct FixedMoveSelector {
        mv: Move,
    }

    impl Strategy for FixedMoveSelector {
        fn select_move(&mut self, _board: &Board, _side: Side, _legal: &[Move]) -> Move {
            self.mv
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    // Dark to move: (0,2) flips one disc and leaves light without a move,
    // while dark still has (7,7).
    const PASS_AFTER_MOVE: &str = "
        X O . X X X X X
        X X X X X X X X
        X X X X X X X X
        X X X X X X X X
        X X X X X X X X
        X X X X X X X X
        X X X X X X X X
        X O O O O O O .
    ";

    fn observed(controller: &mut GameController) -> EventLog {
        let log = EventLog::default();
        controller.add_observer(Box::new(log.clone()));
        log
    }

    fn versus(ai_side: Side, ai_level: AiLevel) -> GameConfig {
        GameConfig::versus_computer(ai_side, ai_level)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameController::new(GameConfig::default());

        assert_eq!(game.state(), ControllerState::AwaitingHumanMove);
        assert_eq!(game.current_side(), Side::Dark);
        assert_eq!(game.scores(), Scores { dark: 2, light: 2 });
        assert!(!game.is_game_over());
        assert!(game.result().is_none());
        assert_eq!(game.legal_moves().len(), 4);
        assert!(!game.game_state().computer_to_move());
    }

    #[test]
    fn computer_playing_dark_moves_first() {
        let game = GameController::new(versus(Side::Dark, AiLevel::Greedy));

        assert_eq!(game.state(), ControllerState::ComputingAiMove);
        assert!(game.game_state().computer_to_move());
    }

    #[test]
    fn t01_human_move_flips_and_hands_over_turn() {
        let mut game = GameController::new(GameConfig::default());
        let log = observed(&mut game);

        let outcome = game.submit_move(Move::new(2, 3)).unwrap();

        assert_eq!(outcome, TurnOutcome::Continue);
        assert_eq!(game.scores(), Scores { dark: 4, light: 1 });
        assert_eq!(game.current_side(), Side::Light);
        assert_eq!(game.state(), ControllerState::AwaitingHumanMove);
        assert_eq!(
            log.drain(),
            vec![GameEvent::MoveApplied {
                side: Side::Dark,
                at: Move::new(2, 3),
                flipped: vec![Move::new(3, 3)],
            }]
        );
    }

    #[test]
    fn t02_illegal_human_moves_are_rejected_without_side_effects() {
        let mut game = GameController::new(GameConfig::default());
        let log = observed(&mut game);

        assert!(matches!(
            game.submit_move(Move::new(0, 0)),
            Err(EngineError::IllegalMove { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            game.submit_move(Move::new(3, 3)),
            Err(EngineError::IllegalMove { row: 3, col: 3, .. })
        ));
        assert_eq!(
            game.submit_move(Move::new(8, 8)),
            Err(EngineError::IllegalMove {
                row: 8,
                col: 8,
                reason: "square is off the board",
            })
        );

        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.current_side(), Side::Dark);
        assert!(log.is_empty());
    }

    #[test]
    fn t03_operations_in_the_wrong_state_are_refused() {
        let mut human_turn = GameController::new(versus(Side::Light, AiLevel::Greedy));
        assert_eq!(
            human_turn.run_ai_move(),
            Err(EngineError::InvalidState {
                operation: "run_ai_move",
                state: ControllerState::AwaitingHumanMove,
            })
        );
        assert!(human_turn.schedule_ai_move(Instant::now()).is_err());

        let mut ai_turn = GameController::new(versus(Side::Dark, AiLevel::Greedy));
        assert_eq!(
            ai_turn.submit_move(Move::new(2, 3)),
            Err(EngineError::InvalidState {
                operation: "submit_move",
                state: ControllerState::ComputingAiMove,
            })
        );
        assert_eq!(ai_turn.board(), &Board::new());
    }

    #[test]
    fn t04_human_and_computer_alternate() {
        let mut game = GameController::new(versus(Side::Light, AiLevel::Greedy));

        game.submit_move(Move::new(2, 3)).unwrap();
        assert_eq!(game.state(), ControllerState::ComputingAiMove);
        assert_eq!(game.current_side(), Side::Light);

        let outcome = game.run_ai_move().unwrap();

        assert_eq!(outcome, TurnOutcome::Continue);
        assert_eq!(game.state(), ControllerState::AwaitingHumanMove);
        assert_eq!(game.current_side(), Side::Dark);
        assert_eq!(game.scores().total(), 6);
    }

    #[test]
    fn t05_side_without_moves_is_passed_and_play_continues() {
        let board: Board = PASS_AFTER_MOVE.parse().unwrap();
        let mut game = GameController::from_position(GameConfig::default(), board, Side::Dark);
        let log = observed(&mut game);

        let outcome = game.submit_move(Move::new(0, 2)).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Passed {
                skipped: Side::Light
            }
        );
        assert_eq!(game.current_side(), Side::Dark);
        assert_eq!(game.state(), ControllerState::AwaitingHumanMove);
        assert!(!game.is_game_over());
        assert_eq!(game.legal_moves(), vec![Move::new(7, 7)]);
        let events = log.drain();
        assert_eq!(
            events.last(),
            Some(&GameEvent::SidePassed { side: Side::Light })
        );

        assert_eq!(game.submit_move(Move::new(7, 7)), Ok(TurnOutcome::Ended));
        let expected = GameResult {
            winner: Some(Side::Dark),
            scores: Scores { dark: 64, light: 0 },
        };
        assert_eq!(game.result(), Some(expected));
        assert_eq!(
            log.drain().last(),
            Some(&GameEvent::GameEnded { result: expected })
        );
    }

    #[test]
    fn t06_dead_position_is_game_over_with_majority_winner() {
        let board = Board::from_bitboards(u64::MAX ^ 0b11, 0b11);
        assert!(rules::is_terminal(&board));

        let mut game = GameController::from_position(GameConfig::default(), board, Side::Light);

        assert!(game.is_game_over());
        assert_eq!(game.state(), ControllerState::GameOver);
        assert!(game.legal_moves().is_empty());
        assert_eq!(
            game.result(),
            Some(GameResult {
                winner: Some(Side::Dark),
                scores: Scores { dark: 62, light: 2 },
            })
        );
        assert!(matches!(
            game.submit_move(Move::new(0, 0)),
            Err(EngineError::InvalidState { .. })
        ));
    }

    #[test]
    fn opening_without_moves_for_side_to_move_passes_it() {
        let board: Board = PASS_AFTER_MOVE.parse().unwrap();

        // Light can answer at (0,2) here, so nothing is skipped.
        let game =
            GameController::from_position(versus(Side::Dark, AiLevel::Greedy), board, Side::Light);
        assert_eq!(game.current_side(), Side::Light);
        assert_eq!(game.state(), ControllerState::AwaitingHumanMove);

        let stuck: Board = "
            X O O O O O O .
            X X X X X X X X
            X X X X X X X X
            X X X X X X X X
            X X X X X X X X
            X X X X X X X X
            X X X X X X X X
            X X X X X X X .
        "
        .parse()
        .unwrap();
        let game = GameController::from_position(GameConfig::default(), stuck, Side::Light);
        assert_eq!(game.current_side(), Side::Dark);
        assert!(!game.is_game_over());
    }

    #[test]
    fn restart_resets_from_game_over() {
        let board = Board::from_bitboards(u64::MAX ^ 0b11, 0b11);
        let mut game = GameController::from_position(GameConfig::default(), board, Side::Dark);
        let log = observed(&mut game);
        assert!(game.is_game_over());

        game.restart();

        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.current_side(), Side::Dark);
        assert_eq!(game.state(), ControllerState::AwaitingHumanMove);
        assert_eq!(
            log.drain(),
            vec![GameEvent::GameStarted { first: Side::Dark }]
        );
    }

    #[test]
    fn configure_restarts_with_new_settings() {
        let mut game = GameController::new(GameConfig::default());
        game.submit_move(Move::new(2, 3)).unwrap();

        game.configure(GameConfig {
            seed: Some(11),
            ..versus(Side::Dark, AiLevel::Random)
        });

        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.state(), ControllerState::ComputingAiMove);
        assert_eq!(game.config().ai_level, AiLevel::Random);
        game.run_ai_move().unwrap();
        assert_eq!(game.scores().total(), 5);
    }

    #[test]
    fn scheduled_move_waits_for_its_delay() {
        let mut game = GameController::new(versus(Side::Dark, AiLevel::Greedy));
        let start = Instant::now();

        let ticket = game.schedule_ai_move(start).unwrap();

        assert_eq!(ticket.remaining(start), Duration::from_millis(1000));
        assert_eq!(game.poll_ai_move(start), Ok(None));
        assert_eq!(game.board(), &Board::new());

        let outcome = game.poll_ai_move(start + Duration::from_millis(1000));

        assert_eq!(outcome, Ok(Some(TurnOutcome::Continue)));
        assert_eq!(game.scores(), Scores { dark: 4, light: 1 });
        assert!(game.pending_ai_move().is_none());
    }

    #[test]
    fn cancelled_move_leaves_state_untouched() {
        let mut game = GameController::new(versus(Side::Dark, AiLevel::Positional));
        let start = Instant::now();
        let ticket = game.schedule_ai_move(start).unwrap();

        assert!(game.cancel_ai_move());
        let later = start + Duration::from_secs(10);

        assert_eq!(game.poll_ai_move(later), Ok(None));
        assert_eq!(game.complete_ai_move(ticket), Err(EngineError::StaleTicket));
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.state(), ControllerState::ComputingAiMove);
    }

    #[test]
    fn restart_invalidates_outstanding_ticket() {
        let mut game = GameController::new(versus(Side::Dark, AiLevel::Greedy));
        let stale = game.schedule_ai_move(Instant::now()).unwrap();

        game.restart();

        assert_eq!(game.complete_ai_move(stale), Err(EngineError::StaleTicket));
        assert_eq!(game.board(), &Board::new());

        let fresh = game.schedule_ai_move(Instant::now()).unwrap();
        assert_eq!(game.complete_ai_move(fresh), Ok(TurnOutcome::Continue));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "picked illegal move")]
    fn strategy_returning_illegal_move_asserts_in_debug() {
        let mut game = GameController::with_strategy(
            versus(Side::Dark, AiLevel::Greedy),
            Box::new(FixedMoveSelector { mv: Move::new(0, 0) }),
        );
        let _ = game.run_ai_move();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn strategy_returning_illegal_move_is_invalid_move() {
        let mut game = GameController::with_strategy(
            versus(Side::Dark, AiLevel::Greedy),
            Box::new(FixedMoveSelector { mv: Move::new(0, 0) }),
        );

        assert_eq!(
            game.run_ai_move(),
            Err(EngineError::InvalidMove { row: 0, col: 0 })
        );
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn custom_strategy_is_used_for_computer_moves() {
        let mut game = GameController::with_strategy(
            versus(Side::Dark, AiLevel::Greedy),
            Box::new(FixedMoveSelector { mv: Move::new(5, 4) }),
        );

        game.run_ai_move().unwrap();

        assert_eq!(
            game.board().get(5, 4),
            Ok(crate::types::CellState::Occupied(Side::Dark))
        );
    }

    #[test]
    fn snapshot_reflects_current_position() {
        let mut game = GameController::new(GameConfig::default());
        game.submit_move(Move::new(2, 3)).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.board.len(), 64);
        assert_eq!(snapshot.board[19], 1);
        assert_eq!(snapshot.current_side, Side::Light);
        assert_eq!(snapshot.scores, Scores { dark: 4, light: 1 });
        assert!(!snapshot.is_game_over);
        assert_eq!(snapshot.legal_moves, game.legal_moves());
    }
}
