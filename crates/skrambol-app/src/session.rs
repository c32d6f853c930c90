//! The puzzle session controller.
//!
//! A [`PuzzleSession`] moves through three phases:
//!
//! ```text
//! Loading --load--> Playing --winning move--> Won
//!    ^                 |                       |
//!    +----restart------+-----------------------+
//! ```
//!
//! While playing it owns two recurring ticks: the [`SessionTimer`] tick that
//! publishes elapsed time, and the autosave tick that writes a snapshot.
//! Both are driven by [`PuzzleSession::tick`] and both are cancelled before
//! any teardown resets state or writes a final snapshot.

use std::time::Duration;

use skrambol_core::{Arrangement, ArrangementError, SwapOutcome, TileId};
use skrambol_game::{
    Clock, ElapsedDisplay, Interval, Progress, SessionTimer, TimerState, evaluate,
};
use skrambol_generator::{GeneratedGrid, GridGenerator, GridSeed};

use crate::{
    config::{Difficulty, ScrambleMode, SessionConfig},
    persistence::{GatewayError, KeyValueStore, SessionSnapshot, SnapshotGateway},
    puzzle::PuzzleInfo,
    submission::{GameRecord, PlayerName, SubmissionError, SubmissionSink, WinPayload},
};

/// Lifecycle phase of a [`PuzzleSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionPhase {
    /// Waiting for a puzzle.
    #[display("loading")]
    Loading,
    /// Accepting moves.
    #[display("playing")]
    Playing,
    /// Solved; moves are rejected.
    #[display("won")]
    Won,
}

/// How [`PuzzleSession::load`] initialized the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LoadOutcome {
    /// A new scramble was generated.
    Fresh {
        /// Seed of the scramble.
        seed: GridSeed,
    },
    /// The stored snapshot for this puzzle was resumed.
    Restored {
        /// Elapsed time the timer resumed from.
        elapsed: Duration,
    },
}

/// Result of [`PuzzleSession::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The tiles swapped and the puzzle is not solved yet.
    Moved(Progress),
    /// Both ids named the same tile.
    Unchanged,
    /// The id is not on the board; nothing changed.
    UnknownTile(TileId),
    /// Moves are not accepted in this phase.
    Rejected(SessionPhase),
    /// The move solved the puzzle.
    Won(WinPayload),
}

/// What one [`PuzzleSession::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Newly published elapsed time, if the timer ticked.
    pub elapsed: Option<Duration>,
    /// `true` if the autosave fired and the snapshot was written.
    pub saved: bool,
}

/// Errors from [`PuzzleSession`] operations.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// The operation is not valid in the current phase.
    #[display("cannot {action} while {phase}")]
    #[from(ignore)]
    InvalidPhase {
        /// The attempted operation.
        action: &'static str,
        /// The phase the session was in.
        phase: SessionPhase,
    },
    /// The session already handed its result off.
    #[display("session has already been handed off")]
    #[from(ignore)]
    HandedOff,
    /// Writing or clearing the snapshot failed.
    #[display("{_0}")]
    Gateway(GatewayError),
    /// The submission sink refused the result.
    #[display("{_0}")]
    Submission(SubmissionError),
}

#[derive(Debug, Clone)]
struct Board {
    puzzle: PuzzleInfo,
    pieces: Arrangement,
    solution: Arrangement,
    progress: Progress,
}

impl Board {
    fn new(puzzle: PuzzleInfo, pieces: Arrangement, solution: Arrangement) -> Self {
        let progress = progress_of(&pieces, &solution);
        Self {
            puzzle,
            pieces,
            solution,
            progress,
        }
    }

    fn snapshot(
        &self,
        elapsed: Duration,
        is_finished: bool,
        difficulty: Difficulty,
    ) -> SessionSnapshot {
        SessionSnapshot {
            puzzle_id: self.puzzle.id.clone(),
            positions: self.pieces.current_positions(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            completion_percentage: self.progress.rounded_percent(),
            is_finished,
            difficulty: Some(difficulty),
        }
    }
}

fn progress_of(pieces: &Arrangement, solution: &Arrangement) -> Progress {
    evaluate(pieces, solution).expect("live arrangement is built from its solution")
}

/// One play-through of one puzzle.
///
/// `S` is where snapshots are kept and `C` supplies time. The session never
/// spawns anything: the owner calls [`tick`](Self::tick) periodically (every
/// few tens of milliseconds is plenty) and forwards moves to
/// [`apply_move`](Self::apply_move).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use skrambol_app::{
///     config::{ScrambleMode, SessionConfig},
///     persistence::MemoryStore,
///     puzzle::PuzzleInfo,
///     session::{MoveOutcome, PuzzleSession, SessionPhase},
/// };
/// use skrambol_core::{GridDimensions, TileId};
/// use skrambol_game::ManualClock;
///
/// let config = SessionConfig::default()
///     .with_dimensions(GridDimensions::new(2, 2).unwrap())
///     .with_scramble(ScrambleMode::NearlySolved);
/// let clock = ManualClock::new();
/// let mut session = PuzzleSession::new(config, MemoryStore::default(), clock.clone());
/// session.load(PuzzleInfo::new("demo", "demo.png", "Demo")).unwrap();
///
/// clock.advance(Duration::from_millis(300));
/// session.tick();
///
/// let outcome = session.apply_move(TileId::new(1), TileId::new(2));
/// let MoveOutcome::Won(payload) = outcome else {
///     panic!("expected a win");
/// };
/// assert_eq!(payload.final_elapsed, Duration::from_millis(300));
/// assert_eq!(session.phase(), SessionPhase::Won);
/// ```
#[derive(Debug)]
pub struct PuzzleSession<S, C> {
    config: SessionConfig,
    gateway: SnapshotGateway<S>,
    clock: C,
    generator: GridGenerator,
    phase: SessionPhase,
    board: Option<Board>,
    timer: SessionTimer,
    autosave: Interval,
    win: Option<WinPayload>,
    handed_off: bool,
}

impl<S, C> PuzzleSession<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    /// Creates a session in the `Loading` phase.
    #[must_use]
    pub fn new(config: SessionConfig, store: S, clock: C) -> Self {
        let gateway = SnapshotGateway::new(store, config.storage_key());
        let generator = GridGenerator::for_dimensions(config.dimensions());
        let timer = SessionTimer::new(config.tick_period());
        let autosave = Interval::new(config.autosave_period());
        Self {
            config,
            gateway,
            clock,
            generator,
            phase: SessionPhase::Loading,
            board: None,
            timer,
            autosave,
            win: None,
            handed_off: false,
        }
    }

    /// Starts playing `puzzle`.
    ///
    /// A stored snapshot is resumed only if it belongs to the same puzzle,
    /// is not finished, and its positions fit the configured grid. Otherwise
    /// a fresh scramble is generated. The timer and the autosave both start.
    ///
    /// A board that is already solved on arrival (a one-tile grid, or an
    /// identity shuffle) goes straight to `Won`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] unless the session is loading,
    /// and [`SessionError::HandedOff`] after a handoff.
    pub fn load(&mut self, puzzle: PuzzleInfo) -> Result<LoadOutcome, SessionError> {
        self.ensure_active()?;
        if !self.phase.is_loading() {
            return Err(SessionError::InvalidPhase {
                action: "load a puzzle",
                phase: self.phase,
            });
        }

        let restored = self
            .gateway
            .load_for(&puzzle.id)
            .and_then(|snapshot| self.restore(&snapshot));
        let outcome = if let Some((pieces, solution, elapsed)) = restored {
            log::info!(
                "resuming puzzle {} at {}",
                puzzle.id,
                ElapsedDisplay(elapsed)
            );
            self.begin(puzzle, pieces, solution, elapsed);
            LoadOutcome::Restored { elapsed }
        } else {
            let grid = self.fresh_grid();
            let seed = grid.seed;
            log::info!("starting puzzle {} (seed {seed})", puzzle.id);
            self.begin(puzzle, grid.pieces, grid.solution, Duration::ZERO);
            LoadOutcome::Fresh { seed }
        };
        Ok(outcome)
    }

    /// Swaps the current positions of two tiles.
    ///
    /// Moves are only accepted while playing. An unknown id is logged and
    /// ignored. Every swap writes a snapshot with the last published elapsed
    /// time. When the move solves the puzzle the timer freezes and the
    /// autosave stops before the finished snapshot is written, and the
    /// session enters `Won`.
    pub fn apply_move(&mut self, a: TileId, b: TileId) -> MoveOutcome {
        let phase = self.phase;
        if !phase.is_playing() {
            log::debug!("move {a} <-> {b} rejected while {phase}");
            return MoveOutcome::Rejected(phase);
        }
        let Some(board) = self.board.as_mut() else {
            return MoveOutcome::Rejected(phase);
        };

        match board.pieces.swap_tiles(a, b) {
            Ok(SwapOutcome::Swapped) => {}
            Ok(SwapOutcome::Unchanged) => return MoveOutcome::Unchanged,
            Err(ArrangementError::UnknownTile { id }) => {
                log::warn!("move references {id}, which is not on the board; ignoring");
                return MoveOutcome::UnknownTile(id);
            }
            Err(err) => {
                log::warn!("move {a} <-> {b} failed: {err}");
                return MoveOutcome::Unchanged;
            }
        }

        board.progress = progress_of(&board.pieces, &board.solution);
        let progress = board.progress;
        if !progress.is_win() {
            self.persist();
            return MoveOutcome::Moved(progress);
        }
        self.finish().map_or(MoveOutcome::Moved(progress), MoveOutcome::Won)
    }

    /// Advances both recurring ticks to the clock's current instant.
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now();
        let elapsed = self.timer.tick(now);
        let saved = self.autosave.poll(now) && self.persist();
        TickReport { elapsed, saved }
    }

    /// Discards the current board and starts over with a fresh scramble.
    ///
    /// Both ticks are cancelled first, then the stored snapshot is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] while loading, and
    /// [`SessionError::HandedOff`] after a handoff.
    pub fn restart(&mut self) -> Result<LoadOutcome, SessionError> {
        self.ensure_active()?;
        let phase = self.phase;
        let Some(board) = self.board.take() else {
            return Err(SessionError::InvalidPhase {
                action: "restart",
                phase,
            });
        };

        self.stop_ticks();
        self.win = None;
        self.phase = SessionPhase::Loading;
        if let Err(err) = self.gateway.clear() {
            log::warn!("could not clear snapshot on restart: {err}");
        }

        let grid = self.fresh_grid();
        let seed = grid.seed;
        log::info!("restarting puzzle {} (seed {seed})", board.puzzle.id);
        self.begin(board.puzzle, grid.pieces, grid.solution, Duration::ZERO);
        Ok(LoadOutcome::Fresh { seed })
    }

    /// Tears the session down, as when the player leaves the page.
    ///
    /// Both ticks are cancelled, then a playing board is saved with the last
    /// published elapsed time, and the session returns to `Loading`. Returns
    /// `true` if a snapshot was written.
    pub fn suspend(&mut self) -> bool {
        self.stop_ticks();
        let saved = self.phase.is_playing() && self.persist();
        self.board = None;
        self.win = None;
        self.phase = SessionPhase::Loading;
        log::debug!("session suspended (saved={saved})");
        saved
    }

    /// Submits the won game for `player` and clears the stored snapshot.
    ///
    /// This ends the session; every later operation fails with
    /// [`SessionError::HandedOff`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPhase`] unless the session is won,
    /// [`SessionError::Submission`] if the sink refuses the record (the
    /// session stays won and may retry), and [`SessionError::Gateway`] if the
    /// snapshot cannot be cleared afterwards.
    pub fn hand_off<K>(&mut self, sink: &mut K, player: PlayerName) -> Result<(), SessionError>
    where
        K: SubmissionSink + ?Sized,
    {
        self.ensure_active()?;
        let phase = self.phase;
        let Some(payload) = self.win.as_ref().filter(|_| phase.is_won()) else {
            return Err(SessionError::InvalidPhase {
                action: "hand off",
                phase,
            });
        };

        let record = GameRecord::from_win(payload, player, self.config.difficulty());
        sink.submit(record)?;
        self.handed_off = true;
        self.gateway.clear()?;
        log::debug!("session handed off");
        Ok(())
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the puzzle being played.
    #[must_use]
    pub fn puzzle(&self) -> Option<&PuzzleInfo> {
        self.board.as_ref().map(|board| &board.puzzle)
    }

    /// Returns the live arrangement.
    #[must_use]
    pub fn pieces(&self) -> Option<&Arrangement> {
        self.board.as_ref().map(|board| &board.pieces)
    }

    /// Returns the solved reference.
    #[must_use]
    pub fn solution(&self) -> Option<&Arrangement> {
        self.board.as_ref().map(|board| &board.solution)
    }

    /// Returns the progress of the live arrangement.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.board.as_ref().map(|board| board.progress)
    }

    /// Returns the last published elapsed time.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Returns the timer state.
    #[must_use]
    pub const fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    /// Returns `true` while the autosave tick is scheduled.
    #[must_use]
    pub const fn is_autosaving(&self) -> bool {
        self.autosave.is_active()
    }

    /// Returns the win payload once the session is won.
    #[must_use]
    pub fn win_payload(&self) -> Option<&WinPayload> {
        self.win.as_ref()
    }

    /// Returns `true` after a successful [`hand_off`](Self::hand_off).
    #[must_use]
    pub const fn is_handed_off(&self) -> bool {
        self.handed_off
    }

    /// Returns the snapshot gateway.
    #[must_use]
    pub const fn gateway(&self) -> &SnapshotGateway<S> {
        &self.gateway
    }

    /// Consumes the session and returns its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.gateway.into_store()
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.handed_off {
            return Err(SessionError::HandedOff);
        }
        Ok(())
    }

    fn restore(&self, snapshot: &SessionSnapshot) -> Option<(Arrangement, Arrangement, Duration)> {
        if snapshot.is_finished {
            log::debug!("stored snapshot is already finished; starting fresh");
            return None;
        }
        let solution = Arrangement::solved(self.generator.tile_count());
        match solution.with_current_positions(&snapshot.positions) {
            Ok(pieces) => Some((pieces, solution, Duration::from_millis(snapshot.elapsed_ms))),
            Err(err) => {
                log::warn!("stored positions do not fit this grid, starting fresh: {err}");
                None
            }
        }
    }

    fn fresh_grid(&self) -> GeneratedGrid {
        match self.config.scramble() {
            ScrambleMode::Random => self.generator.generate(),
            ScrambleMode::Seeded(seed) => self.generator.generate_with_seed(seed),
            ScrambleMode::NearlySolved => self.generator.generate_nearly_solved(),
        }
    }

    fn begin(
        &mut self,
        puzzle: PuzzleInfo,
        pieces: Arrangement,
        solution: Arrangement,
        restored: Duration,
    ) {
        let board = Board::new(puzzle, pieces, solution);
        let solved = board.progress.is_win();
        self.board = Some(board);

        let now = self.clock.now();
        self.timer.start(now, restored);
        self.autosave.start(now);
        self.phase = SessionPhase::Playing;

        if solved {
            log::debug!("board is solved on arrival");
            self.finish();
        }
    }

    fn stop_ticks(&mut self) {
        self.timer.stop();
        self.autosave.cancel();
    }

    fn finish(&mut self) -> Option<WinPayload> {
        // Freeze before anything else so no tick lands after the win.
        let final_elapsed = self.timer.freeze();
        self.autosave.cancel();
        self.phase = SessionPhase::Won;

        let board = self.board.as_ref()?;
        let payload = WinPayload {
            puzzle_id: board.puzzle.id.clone(),
            final_elapsed,
            final_arrangement: board.pieces.clone(),
            progress: board.progress,
        };
        self.persist();
        log::info!(
            "puzzle {} solved in {}",
            payload.puzzle_id,
            ElapsedDisplay(final_elapsed)
        );
        self.win = Some(payload.clone());
        Some(payload)
    }

    fn persist(&mut self) -> bool {
        let Some(board) = self.board.as_ref() else {
            return false;
        };
        let snapshot = board.snapshot(
            self.timer.elapsed(),
            self.phase.is_won(),
            self.config.difficulty(),
        );
        match self.gateway.save(&snapshot) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("could not save snapshot: {err}");
                false
            }
        }
    }
}
