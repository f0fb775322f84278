//! Turn processing: movement, direction locks, win/loss detection.
//!
//! A `Session` owns the immutable `Board` plus one mutable `GameState` per
//! game; replay constructs a fresh state instead of mutating shared data.

use strum::{Display, EnumString};

use crate::board::{Board, Cell};
use crate::command::Direction;
use crate::rng::GameRng;
use crate::treasure::{self, NoCandidates};

/// Which rule set is active.
///
/// `Free` allows all four directions without restriction; `Locked`
/// restricts the vocabulary to up/right/down and makes each direction
/// single-use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    #[default]
    Free,
    Locked,
}

impl GameMode {
    /// The direction vocabulary this rule set recognizes.
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            GameMode::Free => &[
                Direction::Up,
                Direction::Right,
                Direction::Down,
                Direction::Left,
            ],
            GameMode::Locked => &[Direction::Up, Direction::Right, Direction::Down],
        }
    }
}

/// Per-game configuration: rule set plus board metadata.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Clear cells that can never hold the treasure (unreachable under the
    /// active rule set). Board metadata, supplied by the caller.
    pub exclusions: Vec<Cell>,
}

/// One-way phase flags for the locked rule set.
///
/// Each flag flips false to true the first time its direction is attempted
/// and never resets within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionLocks {
    pub up: bool,
    pub right: bool,
    pub down: bool,
}

impl DirectionLocks {
    fn spend(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Right => self.right = true,
            Direction::Down => self.down = true,
            Direction::Left => {}
        }
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Outcome of stepping onto a remaining candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasureCheck {
    /// The candidate held the treasure; the game is won.
    Found,
    /// The candidate was empty and has been removed from the set.
    Empty,
}

/// Everything the frontend needs to narrate one processed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Rejection message, if the move (or its direction) was refused.
    pub message: Option<String>,
    /// Present when the turn landed on a remaining candidate.
    pub check: Option<TreasureCheck>,
    pub status: GameStatus,
}

/// Mutable state of one game. Created fresh at game start and on replay.
#[derive(Debug, Clone)]
pub struct GameState {
    position: Cell,
    treasure: Cell,
    candidates: Vec<Cell>,
    locks: DirectionLocks,
    status: GameStatus,
}

impl GameState {
    fn new(board: &Board, config: &GameConfig, rng: &mut GameRng) -> Result<Self, NoCandidates> {
        let hunt = treasure::generate(board, &config.exclusions, rng)?;
        Ok(Self {
            position: board.start(),
            treasure: hunt.treasure,
            candidates: hunt.candidates,
            locks: DirectionLocks::default(),
            status: GameStatus::Playing,
        })
    }
}

/// A running game: immutable board, active rule set, and the current state.
#[derive(Debug)]
pub struct Session {
    board: Board,
    config: GameConfig,
    rng: GameRng,
    state: GameState,
}

impl Session {
    /// Start a game with an unpredictable RNG.
    pub fn new(board: Board, config: GameConfig) -> Result<Self, NoCandidates> {
        Self::with_rng(board, config, GameRng::from_entropy())
    }

    /// Start a game with a caller-supplied RNG (tests, debugging).
    pub fn with_rng(
        board: Board,
        config: GameConfig,
        mut rng: GameRng,
    ) -> Result<Self, NoCandidates> {
        let state = GameState::new(&board, &config, &mut rng)?;
        Ok(Self {
            board,
            config,
            rng,
            state,
        })
    }

    /// Discard the current game and generate a new one on the same board.
    pub fn reset(&mut self) -> Result<(), NoCandidates> {
        self.state = GameState::new(&self.board, &self.config, &mut self.rng)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn position(&self) -> Cell {
        self.state.position
    }

    /// The true treasure location. Revealed by the frontend on game over.
    pub fn treasure(&self) -> Cell {
        self.state.treasure
    }

    /// Remaining possible treasure locations.
    pub fn candidates(&self) -> &[Cell] {
        &self.state.candidates
    }

    pub fn locks(&self) -> DirectionLocks {
        self.state.locks
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Process one movement turn.
    ///
    /// Order of operations: locked-mode re-issue guards first (rejections
    /// skip everything else), then the per-step move, then the candidate
    /// check (which runs even after a rejected move), then the locked-mode
    /// loss rules.
    pub fn play_turn(&mut self, direction: Direction, steps: u32) -> TurnReport {
        let mut report = TurnReport {
            message: None,
            check: None,
            status: self.state.status,
        };
        if self.state.status != GameStatus::Playing {
            return report;
        }

        if self.config.mode == GameMode::Locked {
            // Single-use guards. `down` has no guard and may be re-issued.
            let refused = match direction {
                Direction::Up if self.state.locks.up => true,
                Direction::Right if self.state.locks.right => true,
                _ => false,
            };
            if refused {
                report.message = Some(format!("cannot go {direction} anymore"));
                return report;
            }
        }

        report.message = self.navigate(direction, steps).err();

        if let Some(index) = self
            .state
            .candidates
            .iter()
            .position(|&c| c == self.state.position)
        {
            self.state.candidates.remove(index);
            if self.state.position == self.state.treasure {
                self.state.status = GameStatus::Won;
                report.check = Some(TreasureCheck::Found);
                report.status = GameStatus::Won;
                return report;
            }
            report.check = Some(TreasureCheck::Empty);
        }

        if self.config.mode == GameMode::Locked {
            self.check_locked_loss();
            report.status = self.state.status;
        }

        report
    }

    /// Apply a multi-step move atomically.
    ///
    /// Steps one cell at a time; the first step that leaves the clear set
    /// aborts the whole move with the position unchanged. In locked mode the
    /// phase flag is spent inside the loop before the step is validated, so
    /// a rejected move still locks its direction while a 0-step move locks
    /// nothing.
    fn navigate(&mut self, direction: Direction, steps: u32) -> Result<(), String> {
        let mut cell = self.state.position;
        for _ in 0..steps {
            cell = cell.step(direction);
            if self.config.mode == GameMode::Locked {
                self.state.locks.spend(direction);
            }
            if !self.board.is_clear(cell) {
                return Err("ups, you cannot move there".to_string());
            }
        }
        self.state.position = cell;
        Ok(())
    }

    /// Loss rules for the locked rule set.
    ///
    /// Once committed to the up / right / down phase order, the game is over
    /// when the next phase's first step is an obstacle, or when every phase
    /// has been spent.
    fn check_locked_loss(&mut self) {
        let locks = self.state.locks;
        let position = self.state.position;

        if locks.up
            && !locks.right
            && !locks.down
            && self.board.is_blocked(position.step(Direction::Right))
        {
            self.state.status = GameStatus::Lost;
        }
        if locks.up
            && locks.right
            && !locks.down
            && self.board.is_blocked(position.step(Direction::Down))
        {
            self.state.status = GameStatus::Lost;
        }
        if locks.up && locks.right && locks.down {
            self.state.status = GameStatus::Lost;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // 0: X X . .
    // 1: . # # .
    // 2: . # # .
    // 3: . . . .
    const SAMPLE: &str = "XX..\n.##.\n.##.\n....";

    fn sample_session() -> Session {
        let board = Board::parse(SAMPLE).unwrap();
        Session::with_rng(board, GameConfig::default(), GameRng::new(42)).unwrap()
    }

    fn open_session() -> Session {
        let board = Board::parse("X....\n.....\n.....\n.....\n.....").unwrap();
        Session::with_rng(board, GameConfig::default(), GameRng::new(42)).unwrap()
    }

    fn locked_session(text: &str, exclusions: &[Cell]) -> Session {
        let board = Board::parse(text).unwrap();
        let config = GameConfig {
            mode: GameMode::Locked,
            exclusions: exclusions.to_vec(),
        };
        Session::with_rng(board, config, GameRng::new(7)).unwrap()
    }

    /// Walk one cell at a time, rows first, until `target` is reached or
    /// the game ends.
    fn walk_to(session: &mut Session, target: Cell) {
        while session.status() == GameStatus::Playing && session.position().row < target.row {
            session.play_turn(Direction::Down, 1);
        }
        while session.status() == GameStatus::Playing && session.position().row > target.row {
            session.play_turn(Direction::Up, 1);
        }
        while session.status() == GameStatus::Playing && session.position().col < target.col {
            session.play_turn(Direction::Right, 1);
        }
        while session.status() == GameStatus::Playing && session.position().col > target.col {
            session.play_turn(Direction::Left, 1);
        }
    }

    #[test]
    fn successful_move_updates_one_axis() {
        let mut session = open_session();
        let start = session.position();
        let report = session.play_turn(Direction::Down, 3);
        assert_eq!(report.message, None);
        assert_eq!(session.position(), Cell::new(start.row + 3, start.col));
    }

    #[test]
    fn blocked_step_rejects_whole_move() {
        let mut session = sample_session();
        // Start is (0, 1); one step down is the obstacle at (1, 1).
        assert_eq!(session.position(), Cell::new(0, 1));
        let report = session.play_turn(Direction::Down, 1);
        assert_eq!(
            report.message.as_deref(),
            Some("ups, you cannot move there")
        );
        assert_eq!(session.position(), Cell::new(0, 1));
    }

    #[test]
    fn blocked_intermediate_step_is_atomic() {
        let mut session = sample_session();
        // Down 3 from (0, 1) crosses obstacles at (1, 1) and (2, 1).
        let before = session.position();
        let report = session.play_turn(Direction::Down, 3);
        assert!(report.message.is_some());
        assert_eq!(session.position(), before);
    }

    #[test]
    fn out_of_grid_move_is_rejected() {
        let mut session = sample_session();
        let before = session.position();
        let report = session.play_turn(Direction::Up, 1);
        assert!(report.message.is_some());
        assert_eq!(session.position(), before);
    }

    #[test]
    fn zero_steps_is_a_successful_no_op() {
        let mut session = sample_session();
        let before = session.position();
        let report = session.play_turn(Direction::Up, 0);
        assert_eq!(report.message, None);
        assert_eq!(session.position(), before);
    }

    #[test]
    fn landing_on_treasure_wins() {
        let mut session = open_session();
        let treasure = session.treasure();
        walk_to(&mut session, treasure);
        assert_eq!(session.status(), GameStatus::Won);
        assert!(!session.candidates().contains(&treasure));
    }

    #[test]
    fn landing_on_empty_candidate_removes_it() {
        let mut session = open_session();
        let treasure = session.treasure();
        let Some(&target) = session.candidates().iter().find(|&&c| c != treasure) else {
            return; // single-candidate game, nothing to verify
        };
        walk_to(&mut session, target);
        if session.status() == GameStatus::Playing && session.position() == target {
            assert!(!session.candidates().contains(&target));
            assert!(session.candidates().contains(&treasure));
        }
    }

    #[test]
    fn locked_up_is_single_use() {
        let mut session = locked_session("....\n....\n....\nX...", &[Cell::new(2, 0)]);

        let report = session.play_turn(Direction::Up, 1);
        assert_eq!(report.message, None);
        assert!(session.locks().up);

        let report = session.play_turn(Direction::Up, 1);
        assert_eq!(report.message.as_deref(), Some("cannot go up anymore"));
        assert!(session.locks().up);
    }

    #[test]
    fn rejected_move_still_spends_the_direction() {
        // Up from the top row fails immediately, but the flag is spent
        // anyway: it is set inside the step loop before validation.
        let mut session = locked_session("X...\n....\n....\n....", &[]);

        let report = session.play_turn(Direction::Up, 1);
        assert!(report.message.is_some());
        assert!(session.locks().up);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn zero_step_move_spends_nothing() {
        let mut session = locked_session("....\n....\n....\nX...", &[]);

        session.play_turn(Direction::Up, 0);
        assert_eq!(session.locks(), DirectionLocks::default());
    }

    #[test]
    fn down_has_no_reissue_guard() {
        // Unlike up and right, down can be issued repeatedly even once its
        // flag is set.
        let mut session =
            locked_session("X...\n....\n....\n....", &[Cell::new(1, 0), Cell::new(2, 0)]);

        let report = session.play_turn(Direction::Down, 1);
        assert_eq!(report.message, None);
        assert!(session.locks().down);
        let report = session.play_turn(Direction::Down, 1);
        assert_eq!(report.message, None);
        assert_eq!(session.position(), Cell::new(2, 0));
    }

    #[test]
    fn all_three_phases_spent_loses() {
        let mut session = locked_session(
            "....\n....\n....\nX...",
            &[Cell::new(2, 0), Cell::new(2, 1), Cell::new(3, 1)],
        );

        session.play_turn(Direction::Up, 1);
        assert_eq!(session.status(), GameStatus::Playing);
        session.play_turn(Direction::Right, 1);
        assert_eq!(session.status(), GameStatus::Playing);
        let report = session.play_turn(Direction::Down, 1);
        assert_eq!(report.status, GameStatus::Lost);
    }

    #[test]
    fn blocked_right_neighbour_after_up_loses() {
        // After spending only `up`, ending a turn with an obstacle directly
        // to the right is an immediate loss.
        let mut session = locked_session(".#..\nX...\n....\n....", &[Cell::new(0, 0)]);

        let report = session.play_turn(Direction::Up, 1);
        assert_eq!(report.status, GameStatus::Lost);
    }

    #[test]
    fn blocked_down_neighbour_after_up_and_right_loses() {
        let mut session = locked_session(
            "X...\n.#..\n....\n....",
            &[Cell::new(0, 1)],
        );

        // Up is rejected (top row) but spends its flag; the right neighbour
        // (0, 1) is clear so the game continues.
        session.play_turn(Direction::Up, 1);
        assert_eq!(session.status(), GameStatus::Playing);

        // Right succeeds; the cell below (0, 1) is the obstacle at (1, 1).
        let report = session.play_turn(Direction::Right, 1);
        assert_eq!(report.status, GameStatus::Lost);
    }

    #[test]
    fn board_edge_is_not_an_obstacle_for_loss_rules() {
        // Ending at the right edge after `up` is not a loss: only explicit
        // obstacles trigger the rule.
        let mut session = locked_session("...X\n....\n....\n....", &[]);

        let report = session.play_turn(Direction::Up, 1);
        // Up from the top row is rejected but spends the flag; the right
        // neighbour is off-board, so the game continues.
        assert!(report.message.is_some());
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn guard_rejection_changes_nothing() {
        // A re-issued `up` is refused before any movement: position, locks
        // and status are all untouched.
        let mut session = locked_session("..#.\nX.#.\n....\n....", &[Cell::new(0, 0)]);

        session.play_turn(Direction::Up, 1); // (1,0) -> (0,0)
        assert_eq!(session.status(), GameStatus::Playing);

        let locks = session.locks();
        let report = session.play_turn(Direction::Up, 3);
        assert_eq!(report.message.as_deref(), Some("cannot go up anymore"));
        assert_eq!(session.position(), Cell::new(0, 0));
        assert_eq!(session.locks(), locks);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn free_mode_never_sets_locks() {
        let mut session = sample_session();
        session.play_turn(Direction::Right, 2);
        session.play_turn(Direction::Down, 3);
        session.play_turn(Direction::Up, 1);
        assert_eq!(session.locks(), DirectionLocks::default());
        assert_ne!(session.status(), GameStatus::Lost);
    }

    #[test]
    fn finished_game_ignores_turns() {
        let mut session = open_session();
        let treasure = session.treasure();
        walk_to(&mut session, treasure);
        assert_eq!(session.status(), GameStatus::Won);
        let pos = session.position();
        let report = session.play_turn(Direction::Down, 1);
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(session.position(), pos);
    }

    #[test]
    fn reset_rebuilds_the_game() {
        let mut session = sample_session();
        session.play_turn(Direction::Right, 2);
        assert_ne!(session.position(), session.board().start());

        session.reset().unwrap();
        assert_eq!(session.position(), session.board().start());
        assert_eq!(session.status(), GameStatus::Playing);
        assert!(!session.candidates().is_empty());
        assert!(session.candidates().contains(&session.treasure()));
        assert_eq!(session.locks(), DirectionLocks::default());
    }
}
