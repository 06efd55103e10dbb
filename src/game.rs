//! Game session state machine.
//!
//! This module owns everything that changes while a maze is being played: the player position,
//! the collected checkpoints, the open question and the clock. Input arrives as discrete
//! operations on [`GameSession`], each returning an outcome the presentation layer turns into
//! feedback through [`Notification`].

use std::{
    fmt,
    time::{Duration, Instant},
};

use color_eyre::eyre::{ensure, Result};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    auth::AdminToken,
    checkpoints::{self, DEFAULT_CHECKPOINT_COUNT},
    maze::{self, Direction, Maze, Position, Tile},
    questions::{self, Question, BANK},
    timer::format_elapsed,
};

/// How far the player can see, as a Chebyshev distance in cells.
pub const VIEWPORT_RADIUS: usize = 1;

/// Parameters used to generate every session of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    /// Maze height in cells; odd and at least [`maze::MIN_SIDE`].
    pub rows: usize,
    /// Maze width in cells; odd and at least [`maze::MIN_SIDE`].
    pub cols: usize,
    /// Number of checkpoints to hide in each maze.
    pub checkpoints: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 25,
            checkpoints: DEFAULT_CHECKPOINT_COUNT,
        }
    }
}

impl GameSettings {
    /// Checks that the settings describe a maze the generator accepts.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is even or outside [`maze::MIN_SIDE`]
    /// to [`maze::MAX_SIDE`].
    pub fn validate(&self) -> Result<()> {
        maze::check_dimensions(self.rows, self.cols)
    }
}

/// Current phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The maze exists but the clock has not started and moves are ignored.
    NotStarted,
    /// The player can move.
    Playing,
    /// A checkpoint question is open and moves are ignored until it is answered.
    AnsweringQuestion {
        /// Index into the session's shuffled question deck.
        question: usize,
        /// Option the player has picked so far, if any.
        selected: Option<usize>,
    },
    /// The player reached the exit with every checkpoint collected.
    Completed {
        /// Time from start to escape, frozen at the moment of completion.
        elapsed: Duration,
    },
}

/// User-facing feedback produced by the game rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The exit was reached before all checkpoints were collected.
    ExitLocked {
        /// Checkpoints collected so far.
        collected: usize,
        /// Checkpoints in the maze.
        required: usize,
    },
    /// The player escaped the maze.
    Completed {
        /// Time taken.
        elapsed: Duration,
        /// Checkpoints collected.
        collected: usize,
        /// Checkpoints in the maze.
        required: usize,
    },
    /// The submitted answer was not the right one.
    WrongAnswer,
    /// An answer was submitted without picking an option first.
    NoSelection,
    /// The admin credential did not match.
    IncorrectCredential,
}

impl fmt::Display for Notification {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitLocked {
                collected,
                required,
            } => write!(
                formatter,
                "Exit locked! Collect all {required} checkpoints first. \
                 ({collected}/{required} completed)"
            ),
            Self::Completed {
                elapsed,
                collected,
                required,
            } => write!(
                formatter,
                "You escaped the maze in {} with {collected}/{required} checkpoints!",
                format_elapsed(*elapsed)
            ),
            Self::WrongAnswer => formatter.write_str("Wrong answer! Try again."),
            Self::NoSelection => formatter.write_str("Please select an answer!"),
            Self::IncorrectCredential => formatter.write_str("Incorrect password!"),
        }
    }
}

/// Result of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The session is not accepting moves in its current phase.
    Ignored,
    /// The target cell is a wall or outside the grid.
    Blocked,
    /// The player moved onto an ordinary cell.
    Moved,
    /// The target is the exit but checkpoints are still missing; the player did not move.
    ExitLocked {
        /// Checkpoints collected so far.
        collected: usize,
        /// Checkpoints in the maze.
        required: usize,
    },
    /// The player moved onto a new checkpoint and a question opened.
    CheckpointCollected {
        /// Zero-based position of this checkpoint in collection order.
        ordinal: usize,
    },
    /// The player moved onto the unlocked exit and the session completed.
    Escaped {
        /// Time taken.
        elapsed: Duration,
        /// Checkpoints collected.
        collected: usize,
        /// Checkpoints in the maze.
        required: usize,
    },
}

impl MoveOutcome {
    /// Returns the notification the player should see for this outcome, if any.
    pub const fn notification(self) -> Option<Notification> {
        match self {
            Self::ExitLocked {
                collected,
                required,
            } => Some(Notification::ExitLocked {
                collected,
                required,
            }),
            Self::Escaped {
                elapsed,
                collected,
                required,
            } => Some(Notification::Completed {
                elapsed,
                collected,
                required,
            }),
            Self::Ignored | Self::Blocked | Self::Moved | Self::CheckpointCollected { .. } => None,
        }
    }
}

/// Result of submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No question is open.
    Ignored,
    /// No option was picked; nothing changed.
    NoSelection,
    /// The picked option was wrong; the selection was cleared and the question stays open.
    Wrong,
    /// The picked option was right; play resumes.
    Correct,
}

impl AnswerOutcome {
    /// Returns the notification the player should see for this outcome, if any.
    pub const fn notification(self) -> Option<Notification> {
        match self {
            Self::NoSelection => Some(Notification::NoSelection),
            Self::Wrong => Some(Notification::WrongAnswer),
            Self::Ignored | Self::Correct => None,
        }
    }
}

/// Result of a reset request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    /// No admin token was presented; the session is untouched.
    Denied,
    /// A fresh session replaced the old one.
    Reset,
}

impl ResetOutcome {
    /// Returns the notification the player should see for this outcome, if any.
    pub const fn notification(self) -> Option<Notification> {
        match self {
            Self::Denied => Some(Notification::IncorrectCredential),
            Self::Reset => None,
        }
    }
}

/// Everything the renderer needs to know about one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag is an independent render input consumed directly by the UI."
)]
pub struct CellView {
    /// The cell is a wall.
    pub wall: bool,
    /// The player stands on the cell.
    pub player: bool,
    /// The cell is the exit.
    pub exit: bool,
    /// The cell is within [`VIEWPORT_RADIUS`] of the player.
    pub visible: bool,
    /// Every checkpoint has been collected, so the exit is open.
    pub exit_unlocked: bool,
}

/// One playthrough of one maze.
///
/// A session is created in [`Phase::NotStarted`] and is never rewound; resetting replaces it with
/// a freshly generated one.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Maze being played.
    maze: Maze,
    /// Checkpoint cells in canonical order.
    checkpoints: Vec<Position>,
    /// Indices into [`checkpoints`](GameSession::checkpoints) in the order they were collected.
    collected: Vec<usize>,
    /// Question deck, shuffled once per session and used in rotation.
    questions: Vec<Question>,
    /// Current player cell; always a path cell.
    player: Position,
    /// Current phase.
    phase: Phase,
    /// Moment [`start`](GameSession::start) was called.
    started_at: Option<Instant>,
}

impl GameSession {
    /// Assembles a session from a maze, its checkpoints, and a question deck.
    ///
    /// The player starts on the maze start cell in [`Phase::NotStarted`].
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The question deck is empty or a question's answer index is out of range
    /// - A checkpoint is not a path cell, is the start or exit cell, or appears twice
    pub fn new(maze: Maze, checkpoints: Vec<Position>, questions: Vec<Question>) -> Result<Self> {
        ensure!(!questions.is_empty(), "question deck is empty");
        for question in &questions {
            ensure!(
                question.correct < question.options.len(),
                "question {:?} has no option {}",
                question.prompt,
                question.correct
            );
        }
        for (index, checkpoint) in checkpoints.iter().enumerate() {
            ensure!(
                maze.is_path(*checkpoint),
                "checkpoint {checkpoint:?} is not a path cell"
            );
            ensure!(
                *checkpoint != maze.start() && *checkpoint != maze.exit(),
                "checkpoint {checkpoint:?} overlaps the start or exit cell"
            );
            ensure!(
                !checkpoints.iter().take(index).any(|other| other == checkpoint),
                "checkpoint {checkpoint:?} appears twice"
            );
        }

        Ok(Self {
            player: maze.start(),
            maze,
            checkpoints,
            collected: Vec::new(),
            questions,
            phase: Phase::NotStarted,
            started_at: None,
        })
    }

    /// Generates a new maze, checkpoint set and question deck from `settings`.
    ///
    /// # Errors
    ///
    /// This function returns an error if the settings describe an invalid maze.
    pub fn generate<R: Rng + ?Sized>(settings: &GameSettings, rng: &mut R) -> Result<Self> {
        let maze = Maze::generate(settings.rows, settings.cols, rng)?;
        let checkpoints = checkpoints::place(&maze, settings.checkpoints, rng);
        let questions = questions::shuffled(&BANK, rng);

        info!(
            rows = settings.rows,
            cols = settings.cols,
            checkpoints = checkpoints.len(),
            "generated new session"
        );

        Self::new(maze, checkpoints, questions)
    }

    /// Returns the maze being played.
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Returns the checkpoint cells in canonical order.
    pub fn checkpoints(&self) -> &[Position] {
        &self.checkpoints
    }

    /// Returns the indices of collected checkpoints in collection order.
    pub fn collected(&self) -> &[usize] {
        &self.collected
    }

    /// Returns the shuffled question deck.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the player cell.
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `(collected, required)` checkpoint counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.collected.len(), self.checkpoints.len())
    }

    /// Returns whether every checkpoint has been collected.
    pub fn is_exit_unlocked(&self) -> bool {
        self.collected.len() >= self.checkpoints.len()
    }

    /// Returns the open question, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::AnsweringQuestion { question, .. } => self.questions.get(question),
            Phase::NotStarted | Phase::Playing | Phase::Completed { .. } => None,
        }
    }

    /// Returns the option picked for the open question, if any.
    pub const fn selected_answer(&self) -> Option<usize> {
        match self.phase {
            Phase::AnsweringQuestion { selected, .. } => selected,
            Phase::NotStarted | Phase::Playing | Phase::Completed { .. } => None,
        }
    }

    /// Starts the clock and enables movement.
    ///
    /// Returns `false` without changing anything unless the session has not started yet.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }

        self.phase = Phase::Playing;
        self.started_at = Some(now);
        info!("session started");

        true
    }

    /// Attempts to move the player one cell in `direction`.
    ///
    /// Moves are only processed while [`Phase::Playing`]. A move into a wall or off the grid is
    /// rejected. The exit only accepts the player once every checkpoint is collected; reaching it
    /// completes the session. Stepping onto a checkpoint that has not been collected yet records
    /// it and opens the next question of the deck, chosen as
    /// `deck[collected_before % deck.len()]`.
    pub fn move_player(&mut self, direction: Direction, now: Instant) -> MoveOutcome {
        if self.phase != Phase::Playing {
            return MoveOutcome::Ignored;
        }

        let Some(target) = self
            .player
            .step(direction)
            .filter(|target| self.maze.is_path(*target))
        else {
            return MoveOutcome::Blocked;
        };

        let (collected, required) = self.progress();
        if target == self.maze.exit() {
            if !self.is_exit_unlocked() {
                debug!(collected, required, "exit locked");
                return MoveOutcome::ExitLocked {
                    collected,
                    required,
                };
            }

            let elapsed = self.elapsed(now);
            self.player = target;
            self.phase = Phase::Completed { elapsed };
            info!(
                elapsed_secs = elapsed.as_secs(),
                collected, required, "maze completed"
            );

            return MoveOutcome::Escaped {
                elapsed,
                collected,
                required,
            };
        }

        self.player = target;

        let fresh = self
            .checkpoints
            .iter()
            .position(|checkpoint| *checkpoint == target)
            .filter(|index| !self.collected.contains(index));
        if let Some(index) = fresh {
            let ordinal = self.collected.len();
            self.collected.push(index);
            self.phase = Phase::AnsweringQuestion {
                question: ordinal % self.questions.len(),
                selected: None,
            };
            info!(checkpoint = index, ordinal, "checkpoint collected");

            return MoveOutcome::CheckpointCollected { ordinal };
        }

        MoveOutcome::Moved
    }

    /// Records `option` as the picked answer for the open question.
    ///
    /// Returns `false` when no question is open or the option does not exist.
    pub fn select_answer(&mut self, option: usize) -> bool {
        let Phase::AnsweringQuestion { question, selected } = &mut self.phase else {
            return false;
        };
        let exists = self
            .questions
            .get(*question)
            .is_some_and(|open| option < open.options.len());
        if exists {
            *selected = Some(option);
        }

        exists
    }

    /// Submits the picked answer for the open question.
    ///
    /// A correct answer closes the question and resumes play. A wrong one keeps the question open
    /// and clears the selection so a new option has to be picked; the checkpoint stays
    /// collected.
    pub fn submit_answer(&mut self) -> AnswerOutcome {
        let Phase::AnsweringQuestion { question, selected } = &mut self.phase else {
            return AnswerOutcome::Ignored;
        };
        let Some(option) = *selected else {
            return AnswerOutcome::NoSelection;
        };

        let correct = self
            .questions
            .get(*question)
            .is_some_and(|open| open.is_correct(option));
        if correct {
            self.phase = Phase::Playing;
            info!(option, "answer correct");
            AnswerOutcome::Correct
        } else {
            *selected = None;
            warn!(option, "answer wrong");
            AnswerOutcome::Wrong
        }
    }

    /// Returns the time played as of `now`.
    ///
    /// This is zero before the session starts, the wall-clock time since start while playing or
    /// answering, and the frozen completion time once completed.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at) {
            (Phase::Completed { elapsed }, _) => elapsed,
            (_, Some(started_at)) => now.saturating_duration_since(started_at),
            (_, None) => Duration::ZERO,
        }
    }

    /// Returns whether `position` is within [`VIEWPORT_RADIUS`] of the player.
    pub const fn is_visible(&self, position: Position) -> bool {
        position.chebyshev(self.player) <= VIEWPORT_RADIUS
    }

    /// Describes the cell at `position` for rendering, or [`None`] outside the grid.
    pub fn cell_view(&self, position: Position) -> Option<CellView> {
        let tile = self.maze.tile(position)?;

        Some(CellView {
            wall: tile == Tile::Wall,
            player: position == self.player,
            exit: position == self.maze.exit(),
            visible: self.is_visible(position),
            exit_unlocked: self.is_exit_unlocked(),
        })
    }
}

/// A running game: the current session plus what is needed to generate the next one.
///
/// The random source is injected so seeded runs reproduce mazes, checkpoints and question order.
#[derive(Debug)]
pub struct Game<R> {
    /// Settings every session is generated from.
    settings: GameSettings,
    /// Random source shared by all sessions of this game.
    rng: R,
    /// Session being played.
    session: GameSession,
}

impl<R: Rng> Game<R> {
    /// Validates `settings` and generates the first session.
    ///
    /// # Errors
    ///
    /// This function returns an error if the settings describe an invalid maze.
    pub fn new(settings: GameSettings, mut rng: R) -> Result<Self> {
        settings.validate()?;
        let session = GameSession::generate(&settings, &mut rng)?;

        Ok(Self {
            settings,
            rng,
            session,
        })
    }

    /// Returns the current session.
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the current session for mutation.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Replaces the session with a freshly generated one.
    ///
    /// The old session is discarded whatever its phase. Without a token nothing happens and
    /// [`ResetOutcome::Denied`] is returned.
    ///
    /// # Errors
    ///
    /// This function returns an error if generating the new session fails.
    pub fn reset(&mut self, token: Option<AdminToken>) -> Result<ResetOutcome> {
        if token.is_none() {
            warn!("reset denied: no admin token");
            return Ok(ResetOutcome::Denied);
        }

        self.session = GameSession::generate(&self.settings, &mut self.rng)?;
        info!("session reset");

        Ok(ResetOutcome::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AdminGate;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng as _};

    /// Ring-shaped 5x5 maze: every interior cell except the centre is path.
    fn ring_maze() -> Maze {
        Maze::from_layout(&["#####", "#...#", "#.#.#", "#...#", "#####"])
            .expect("layout should parse")
    }

    fn question(index: usize) -> Question {
        BANK.get(index).copied().expect("bank index")
    }

    fn ring_session(checkpoints: &[(usize, usize)], deck: &[usize]) -> GameSession {
        GameSession::new(
            ring_maze(),
            checkpoints
                .iter()
                .map(|&(row, col)| Position::new(row, col))
                .collect(),
            deck.iter().map(|&index| question(index)).collect(),
        )
        .expect("session should assemble")
    }

    fn started(mut session: GameSession, now: Instant) -> GameSession {
        assert!(session.start(now), "session should start");
        session
    }

    #[test]
    fn test_new_session_state() {
        let session = ring_session(&[(2, 1)], &[0]);

        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.player(), Position::new(1, 1));
        assert_eq!(session.progress(), (0, 1));
        assert!(!session.is_exit_unlocked());
        assert_eq!(session.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        let maze = ring_maze();

        assert!(GameSession::new(maze.clone(), Vec::new(), Vec::new()).is_err());
        assert!(GameSession::new(maze.clone(), vec![Position::new(2, 2)], vec![question(0)]).is_err());
        assert!(GameSession::new(maze.clone(), vec![Position::new(1, 1)], vec![question(0)]).is_err());
        assert!(GameSession::new(maze.clone(), vec![Position::new(3, 3)], vec![question(0)]).is_err());
        assert!(GameSession::new(
            maze,
            vec![Position::new(2, 1), Position::new(2, 1)],
            vec![question(0)]
        )
        .is_err());
    }

    #[test]
    fn test_moves_ignored_before_start() {
        let mut session = ring_session(&[(2, 1)], &[0]);

        assert_eq!(
            session.move_player(Direction::Right, Instant::now()),
            MoveOutcome::Ignored
        );
        assert_eq!(session.player(), Position::new(1, 1));
    }

    #[test]
    fn test_start_only_once() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1)], &[0]), now);

        assert_eq!(session.phase(), Phase::Playing);
        assert!(!session.start(now + Duration::from_secs(3)));
        assert_eq!(
            session.elapsed(now + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_move_blocked_by_walls_and_border() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1)], &[0]), now);

        assert_eq!(session.move_player(Direction::Up, now), MoveOutcome::Blocked);
        assert_eq!(session.move_player(Direction::Left, now), MoveOutcome::Blocked);
        assert_eq!(session.move_player(Direction::Right, now), MoveOutcome::Moved);
        assert_eq!(session.move_player(Direction::Down, now), MoveOutcome::Blocked);
        assert_eq!(session.player(), Position::new(1, 2));
    }

    #[test]
    fn test_exit_locked_then_unlocked_after_correct_answer() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1)], &[0]), now);

        assert_eq!(session.move_player(Direction::Right, now), MoveOutcome::Moved);
        assert_eq!(session.move_player(Direction::Right, now), MoveOutcome::Moved);
        assert_eq!(session.move_player(Direction::Down, now), MoveOutcome::Moved);
        let locked = session.move_player(Direction::Down, now);
        assert_eq!(
            locked,
            MoveOutcome::ExitLocked {
                collected: 0,
                required: 1
            }
        );
        assert_eq!(
            locked.notification().map(|note| note.to_string()),
            Some("Exit locked! Collect all 1 checkpoints first. (0/1 completed)".to_owned())
        );
        assert_eq!(session.player(), Position::new(2, 3));

        for direction in [Direction::Up, Direction::Left, Direction::Left] {
            assert_eq!(session.move_player(direction, now), MoveOutcome::Moved);
        }
        assert_eq!(
            session.move_player(Direction::Down, now),
            MoveOutcome::CheckpointCollected { ordinal: 0 }
        );
        assert_eq!(session.current_question(), Some(&question(0)));
        assert!(session.select_answer(2));
        assert_eq!(session.submit_answer(), AnswerOutcome::Correct);
        assert_eq!(session.progress(), (1, 1));
        assert!(session.is_exit_unlocked());

        assert_eq!(session.move_player(Direction::Down, now), MoveOutcome::Moved);
        assert_eq!(session.move_player(Direction::Right, now), MoveOutcome::Moved);
        let finish = now + Duration::from_secs(90);
        assert_eq!(
            session.move_player(Direction::Right, finish),
            MoveOutcome::Escaped {
                elapsed: Duration::from_secs(90),
                collected: 1,
                required: 1
            }
        );
        assert_eq!(session.player(), session.maze().exit());
        assert_eq!(
            session.phase(),
            Phase::Completed {
                elapsed: Duration::from_secs(90)
            }
        );
        assert_eq!(
            session.elapsed(finish + Duration::from_secs(600)),
            Duration::from_secs(90)
        );
        assert_eq!(
            session.move_player(Direction::Left, finish),
            MoveOutcome::Ignored
        );
    }

    #[test]
    fn test_locked_count_advances_after_answer() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(1, 2), (3, 1)], &[0, 1]), now);

        assert_eq!(
            session.move_player(Direction::Right, now),
            MoveOutcome::CheckpointCollected { ordinal: 0 }
        );
        assert!(session.select_answer(2));
        assert_eq!(session.submit_answer(), AnswerOutcome::Correct);
        for direction in [Direction::Right, Direction::Down] {
            assert_eq!(session.move_player(direction, now), MoveOutcome::Moved);
        }
        assert_eq!(
            session.move_player(Direction::Down, now),
            MoveOutcome::ExitLocked {
                collected: 1,
                required: 2
            }
        );
    }

    #[test]
    fn test_questions_rotate_through_deck() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1), (1, 3), (3, 2)], &[0, 4]), now);

        assert_eq!(
            session.move_player(Direction::Down, now),
            MoveOutcome::CheckpointCollected { ordinal: 0 }
        );
        assert_eq!(session.current_question(), Some(&question(0)));
        assert!(session.select_answer(2));
        assert_eq!(session.submit_answer(), AnswerOutcome::Correct);

        for direction in [Direction::Up, Direction::Right] {
            assert_eq!(session.move_player(direction, now), MoveOutcome::Moved);
        }
        assert_eq!(
            session.move_player(Direction::Right, now),
            MoveOutcome::CheckpointCollected { ordinal: 1 }
        );
        assert_eq!(session.current_question(), Some(&question(4)));
        assert!(session.select_answer(3));
        assert_eq!(session.submit_answer(), AnswerOutcome::Correct);

        for direction in [Direction::Left, Direction::Left, Direction::Down, Direction::Down] {
            assert_eq!(session.move_player(direction, now), MoveOutcome::Moved);
        }
        assert_eq!(
            session.move_player(Direction::Right, now),
            MoveOutcome::CheckpointCollected { ordinal: 2 }
        );
        assert_eq!(session.current_question(), Some(&question(0)));
        assert_eq!(session.collected(), &[0, 1, 2]);
    }

    #[test]
    fn test_revisiting_collected_checkpoint_is_plain_move() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1), (1, 3)], &[0]), now);

        assert_eq!(
            session.move_player(Direction::Down, now),
            MoveOutcome::CheckpointCollected { ordinal: 0 }
        );
        assert!(session.select_answer(2));
        assert_eq!(session.submit_answer(), AnswerOutcome::Correct);
        assert_eq!(session.move_player(Direction::Up, now), MoveOutcome::Moved);
        assert_eq!(session.move_player(Direction::Down, now), MoveOutcome::Moved);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.collected(), &[0]);
    }

    #[test]
    fn test_wrong_answer_clears_selection_and_keeps_question() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1)], &[0]), now);
        let _ = session.move_player(Direction::Down, now);

        assert_eq!(session.submit_answer(), AnswerOutcome::NoSelection);
        assert!(session.select_answer(0));
        assert_eq!(session.selected_answer(), Some(0));
        let wrong = session.submit_answer();
        assert_eq!(wrong, AnswerOutcome::Wrong);
        assert_eq!(wrong.notification(), Some(Notification::WrongAnswer));
        assert_eq!(session.selected_answer(), None);
        assert_eq!(
            session.phase(),
            Phase::AnsweringQuestion {
                question: 0,
                selected: None
            }
        );
        assert_eq!(session.progress(), (1, 1));
        assert_eq!(session.submit_answer(), AnswerOutcome::NoSelection);
        assert_eq!(
            session.move_player(Direction::Down, now),
            MoveOutcome::Ignored
        );
    }

    #[test]
    fn test_select_answer_rejects_missing_option() {
        let now = Instant::now();
        let mut session = started(ring_session(&[(2, 1)], &[0]), now);

        assert!(!session.select_answer(1));
        let _ = session.move_player(Direction::Down, now);
        assert!(!session.select_answer(4));
        assert_eq!(session.selected_answer(), None);
        assert_eq!(
            ring_session(&[(2, 1)], &[0]).submit_answer(),
            AnswerOutcome::Ignored
        );
    }

    #[test]
    fn test_cell_view_and_visibility() {
        let session = ring_session(&[(2, 1)], &[0]);

        let start = session
            .cell_view(Position::new(1, 1))
            .expect("start is on the grid");
        assert!(start.player && start.visible && !start.wall && !start.exit);

        let centre = session
            .cell_view(Position::new(2, 2))
            .expect("centre is on the grid");
        assert!(centre.wall && centre.visible);

        let exit = session
            .cell_view(Position::new(3, 3))
            .expect("exit is on the grid");
        assert!(exit.exit && !exit.visible && !exit.exit_unlocked);

        assert!(session.is_visible(Position::new(0, 0)));
        assert!(!session.is_visible(Position::new(1, 3)));
        assert_eq!(session.cell_view(Position::new(5, 5)), None);
    }

    #[test]
    fn test_notification_messages() {
        assert_eq!(
            Notification::Completed {
                elapsed: Duration::from_secs(125),
                collected: 4,
                required: 4
            }
            .to_string(),
            "You escaped the maze in 02:05 with 4/4 checkpoints!"
        );
        assert_eq!(
            Notification::NoSelection.to_string(),
            "Please select an answer!"
        );
        assert_eq!(
            Notification::IncorrectCredential.to_string(),
            "Incorrect password!"
        );
    }

    #[test]
    fn test_game_reset_requires_token() {
        let settings = GameSettings {
            rows: 9,
            cols: 9,
            checkpoints: 3,
        };
        let mut game = Game::new(settings, StdRng::seed_from_u64(21)).expect("game");
        let now = Instant::now();
        assert!(game.session_mut().start(now));

        let denied = game.reset(None).expect("reset should not fail");
        assert_eq!(denied, ResetOutcome::Denied);
        assert_eq!(
            denied.notification(),
            Some(Notification::IncorrectCredential)
        );
        assert_eq!(game.session().phase(), Phase::Playing);

        let token = AdminGate::new(Some("secret".to_owned()))
            .unlock("secret")
            .expect("credential matches");
        assert_eq!(
            game.reset(Some(token)).expect("reset should not fail"),
            ResetOutcome::Reset
        );
        assert_eq!(game.session().phase(), Phase::NotStarted);
        assert!(game.session().collected().is_empty());
        assert_eq!(game.session().checkpoints().len(), 3);
        assert_eq!(game.session().player(), Position::new(1, 1));
    }

    #[test]
    fn test_game_rejects_invalid_settings() {
        let settings = GameSettings {
            rows: 8,
            cols: 9,
            checkpoints: 3,
        };

        assert!(Game::new(settings, StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_generated_session_uses_whole_bank() {
        let session =
            GameSession::generate(&GameSettings::default(), &mut StdRng::seed_from_u64(13))
                .expect("session");

        assert_eq!(session.questions().len(), BANK.len());
        assert_eq!(session.checkpoints().len(), DEFAULT_CHECKPOINT_COUNT);
        assert_eq!(session.maze().rows(), 25);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_player_never_leaves_the_paths(
            seed in any::<u64>(),
            moves in prop::collection::vec(direction_strategy(), 0..300),
        ) {
            let settings = GameSettings { rows: 11, cols: 11, checkpoints: 4 };
            let mut game = Game::new(settings, StdRng::seed_from_u64(seed)).expect("game");
            let now = Instant::now();
            let session = game.session_mut();
            prop_assert!(session.start(now));

            for direction in moves {
                if let Some(correct) = session.current_question().map(|open| open.correct) {
                    prop_assert!(session.select_answer(correct));
                    prop_assert_eq!(session.submit_answer(), AnswerOutcome::Correct);
                }

                let outcome = session.move_player(direction, now);
                prop_assert!(session.maze().is_path(session.player()));
                if let MoveOutcome::ExitLocked { collected, required } = outcome {
                    prop_assert!(collected < required);
                }
                if matches!(outcome, MoveOutcome::Escaped { .. }) {
                    prop_assert!(session.is_exit_unlocked());
                    prop_assert_eq!(session.player(), session.maze().exit());
                }
            }
        }
    }
}
