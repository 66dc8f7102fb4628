use core::time::Duration;

use crate::*;

/// Period of the play-time clock.
pub const TIMER_PERIOD: Duration = Duration::from_secs(1);

/// Represents a game from the first click to won/lost, and every restart after it.
///
/// Owns the board, the session counters, the hint budget and the scheduled tasks; a reset
/// replaces all of them at once.
#[derive(Clone, Debug)]
pub struct Game<P = RandomMinePlacer> {
    config: LevelConfig,
    board: Board,
    session: Session,
    hints: HintState,
    scheduler: Scheduler,
    timer: Option<TaskId>,
    hint_revert: Option<TaskId>,
    placer: P,
}

impl Game<RandomMinePlacer> {
    pub fn with_seed(config: LevelConfig, seed: u64) -> Self {
        Self::new(config, RandomMinePlacer::new(seed))
    }
}

impl<P: MinePlacer> Game<P> {
    pub fn new(config: LevelConfig, placer: P) -> Self {
        Self {
            config,
            board: Board::new(config.size()),
            session: Session::new(&config),
            hints: HintState::default(),
            scheduler: Scheduler::default(),
            timer: None,
            hint_revert: None,
            placer,
        }
    }

    /// Starts over with the current configuration.
    pub fn reset(&mut self) {
        self.reset_with(self.config);
    }

    /// Starts over with `config`, canceling the timer and any pending hint revert.
    pub fn reset_with(&mut self, config: LevelConfig) {
        log::debug!("New game: {:?}", config);
        self.scheduler.clear();
        self.config = config;
        self.board = Board::new(config.size());
        self.session = Session::new(&config);
        self.hints = HintState::default();
        self.timer = None;
        self.hint_revert = None;
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn hints(&self) -> &HintState {
        &self.hints
    }

    pub fn state(&self) -> GameState {
        self.session.state
    }

    pub fn face(&self) -> Face {
        self.session.state.into()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some_and(|id| self.scheduler.is_pending(id))
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(self.board.cell_at(coords)?.view())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if let Err(err) = self.session.check_accepting_input() {
            log::trace!("Ignoring reveal at {:?}: {}", coords, err);
            return Ok(RevealOutcome::Unchanged);
        }

        let cell = self.board.cell(coords);
        if cell.revealed || cell.flagged {
            return Ok(RevealOutcome::Unchanged);
        }

        if self.session.state.is_initial() {
            self.start(coords)?;
        }

        let outcome = engine::reveal_cell(&mut self.board, &mut self.session, coords);
        Ok(match self.settle() {
            Some(GameState::Won) => RevealOutcome::Won,
            Some(GameState::Lost) => RevealOutcome::Lost,
            _ => outcome,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if let Err(err) = self.session.check_active() {
            log::trace!("Ignoring flag at {:?}: {}", coords, err);
            return Ok(FlagOutcome::Unchanged);
        }
        if self.hints.is_active() {
            log::trace!("Ignoring flag at {:?} while a hint is armed", coords);
            return Ok(FlagOutcome::Unchanged);
        }

        let outcome = engine::toggle_flag(&mut self.board, &mut self.session, coords);
        if outcome.has_update() && self.settle() == Some(GameState::Won) {
            return Ok(FlagOutcome::Won);
        }
        Ok(outcome)
    }

    pub fn arm_hint(&mut self) -> HintOutcome {
        if let Err(err) = self.session.check_active() {
            log::trace!("Ignoring hint request: {}", err);
            return HintOutcome::Unchanged;
        }
        if !self.hints.arm() {
            return HintOutcome::Unchanged;
        }
        log::debug!("Hint armed, {} left", self.hints.remaining());
        HintOutcome::Armed
    }

    /// Shows the 3×3 block around `coords` for [`HINT_PREVIEW_DURATION`] without revealing it,
    /// blocking all input until the preview ends.
    pub fn apply_hint(&mut self, coords: Coord2) -> Result<HintOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if let Err(err) = self.session.check_active() {
            log::trace!("Ignoring hint at {:?}: {}", coords, err);
            return Ok(HintOutcome::Unchanged);
        }
        if !self.hints.take() {
            return Ok(HintOutcome::Unchanged);
        }

        let cells = hint::show_preview(&mut self.board, coords);
        self.session.suspended = true;
        self.hint_revert = Some(
            self.scheduler
                .schedule_once(HINT_PREVIEW_DURATION, Task::HintRevert(cells)),
        );
        Ok(HintOutcome::Previewing)
    }

    /// Lets `elapsed` time pass, running every scheduled task that came due.
    /// Returns whether anything observable changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let fired = self.scheduler.advance(elapsed);
        let changed = !fired.is_empty();

        for (id, task) in fired {
            match task {
                Task::TimerTick => {
                    self.session.elapsed_seconds += 1;
                }
                Task::HintRevert(cells) => {
                    hint::hide_preview(&mut self.board, &cells);
                    if self.hint_revert == Some(id) {
                        self.hint_revert = None;
                        self.session.suspended = false;
                    }
                    log::debug!("Hint preview ended");
                }
            }
        }

        changed
    }

    /// First reveal: lay the mines around the clicked cell and start the clock.
    fn start(&mut self, first: Coord2) -> Result<()> {
        self.placer
            .place(&mut self.board, self.config.mine_count(), first)?;
        self.board.compute_adjacency_counts();
        self.session.state = GameState::Active;
        self.timer = Some(
            self.scheduler
                .schedule_repeating(TIMER_PERIOD, Task::TimerTick),
        );
        log::debug!("Game started at {:?}", first);
        Ok(())
    }

    /// Moves to a terminal state when the counters say so.
    fn settle(&mut self) -> Option<GameState> {
        let state = self.session.terminal_state(&self.board)?;
        self.session.state = state;
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
        }
        if state == GameState::Lost {
            self.board.reveal_all_mines();
        }
        log::debug!(
            "Game ended {:?} after {} seconds",
            state,
            self.session.elapsed_seconds
        );
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn game(size: Coord, mines: &[Coord2], lives: u8) -> Game<FixedMinePlacer> {
        let config = LevelConfig::new(size, mines.len() as CellCount, lives).unwrap();
        Game::new(config, FixedMinePlacer::new(mines.iter().copied()))
    }

    fn safe_cells(size: Coord, mines: &[Coord2]) -> Vec<Coord2> {
        Board::new(size)
            .iter_coords()
            .filter(|pos| !mines.contains(pos))
            .collect()
    }

    #[test]
    fn first_reveal_places_mines_and_starts_clock() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        assert_eq!(game.board().mine_count(), 0);
        assert_eq!(game.state(), GameState::NotStarted);

        assert_eq!(game.reveal((0, 3)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(game.state(), GameState::Active);
        assert_eq!(game.board().mine_count(), 2);
        assert!(game.is_timer_running());
    }

    #[test]
    fn first_reveal_is_never_a_mine() {
        let config = LevelConfig::new(4, 15, 1).unwrap();
        for seed in 0..32 {
            let mut game = Game::with_seed(config, seed);
            assert_eq!(game.reveal((2, 1)).unwrap(), RevealOutcome::Revealed);
            assert!(!game.board().has_mine_at((2, 1)));
        }
    }

    #[test]
    fn wins_after_all_safe_cells_and_flags() {
        let mines = [(0, 0), (3, 3)];
        let mut game = game(4, &mines, 2);

        for pos in safe_cells(4, &mines) {
            game.reveal(pos).unwrap();
        }
        assert_eq!(game.session().revealed_count(), 14);
        assert_eq!(game.state(), GameState::Active);

        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(game.toggle_flag((3, 3)).unwrap(), FlagOutcome::Won);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.face(), Face::Won);
        assert!(!game.is_timer_running());
    }

    #[test]
    fn second_mine_with_two_lives_loses_and_shows_all_mines() {
        let mines = [(0, 0), (3, 3), (0, 3)];
        let mut game = game(4, &mines, 2);
        game.reveal((2, 1)).unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.session().lives_remaining(), 1);
        assert_eq!(game.state(), GameState::Active);

        assert_eq!(game.reveal((3, 3)).unwrap(), RevealOutcome::Lost);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.session().lives_remaining(), 0);
        assert!(mines.iter().all(|&pos| game.board().cell_at(pos).unwrap().revealed));
        assert!(!game.is_timer_running());
    }

    #[test]
    fn wins_after_hitting_a_mine_with_lives_left() {
        let mines = [(0, 0), (3, 3)];
        let mut game = game(4, &mines, 2);
        game.reveal((2, 1)).unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.session().lives_remaining(), 1);

        for pos in safe_cells(4, &mines) {
            game.reveal(pos).unwrap();
        }
        assert_eq!(game.session().revealed_count(), 15);
        assert_eq!(game.state(), GameState::Active);

        assert_eq!(game.toggle_flag((3, 3)).unwrap(), FlagOutcome::Won);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.session().lives_remaining(), 1);
    }

    #[test]
    fn finished_game_ignores_input() {
        let mut game = game(2, &[(0, 0)], 1);
        game.reveal((1, 1)).unwrap();
        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Lost);

        let before = game.session().clone();
        assert_eq!(game.reveal((0, 1)).unwrap(), RevealOutcome::Unchanged);
        assert_eq!(game.toggle_flag((1, 0)).unwrap(), FlagOutcome::Unchanged);
        assert_eq!(game.arm_hint(), HintOutcome::Unchanged);
        assert_eq!(game.session(), &before);
    }

    #[test]
    fn repeated_and_flagged_reveals_are_no_ops() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        game.reveal((0, 3)).unwrap();
        game.toggle_flag((3, 3)).unwrap();
        let before = game.session().clone();

        assert_eq!(game.reveal((0, 3)).unwrap(), RevealOutcome::Unchanged);
        assert_eq!(game.reveal((3, 3)).unwrap(), RevealOutcome::Unchanged);
        assert_eq!(game.session(), &before);
    }

    #[test]
    fn flagging_requires_started_game() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        assert_eq!(game.toggle_flag((1, 1)).unwrap(), FlagOutcome::Unchanged);
        assert!(!game.board().cell_at((1, 1)).unwrap().flagged);
    }

    #[test]
    fn out_of_bounds_is_an_error_and_changes_nothing() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        assert_eq!(game.reveal((4, 0)), Err(GameError::OutOfBounds));
        assert_eq!(game.toggle_flag((0, 9)), Err(GameError::OutOfBounds));
        assert_eq!(game.apply_hint((9, 9)), Err(GameError::OutOfBounds));
        assert_eq!(game.state(), GameState::NotStarted);
    }

    #[test]
    fn bad_layout_leaves_game_unstarted() {
        let config = LevelConfig::new(3, 1, 1).unwrap();
        let mut game = Game::new(config, FixedMinePlacer::new([(1, 1)]));

        assert!(matches!(
            game.reveal((1, 1)),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.board().mine_count(), 0);
        assert_eq!(game.session().revealed_count(), 0);
    }

    #[test]
    fn clock_counts_whole_seconds_and_stops_on_end() {
        let mut game = game(2, &[(0, 0)], 1);
        game.advance(Duration::from_secs(5));
        assert_eq!(game.session().elapsed_seconds(), 0);

        game.reveal((1, 1)).unwrap();
        game.advance(Duration::from_millis(2500));
        assert_eq!(game.session().elapsed_seconds(), 2);

        game.reveal((0, 0)).unwrap();
        game.advance(Duration::from_secs(10));
        assert_eq!(game.session().elapsed_seconds(), 2);
    }

    #[test]
    fn first_second_counts_from_the_first_reveal() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        game.advance(Duration::from_millis(750));
        game.reveal((0, 3)).unwrap();

        game.advance(Duration::from_millis(999));
        assert_eq!(game.session().elapsed_seconds(), 0);
        game.advance(Duration::from_millis(1));
        assert_eq!(game.session().elapsed_seconds(), 1);
    }

    #[test]
    fn huge_time_jumps_saturate() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        assert!(!game.advance(Duration::MAX));
        assert!(!game.advance(Duration::from_secs(1)));

        game.reveal((0, 3)).unwrap();
        assert!(game.is_timer_running());
        assert!(game.advance(Duration::from_secs(1)));
        assert_eq!(game.session().elapsed_seconds(), 1);
    }

    #[test]
    fn hint_previews_without_committing_and_reverts() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        game.reveal((0, 3)).unwrap();
        let revealed_before = game.session().revealed_count();

        assert_eq!(game.arm_hint(), HintOutcome::Armed);
        assert_eq!(game.hints().remaining(), HINTS_PER_SESSION - 1);
        assert_eq!(game.apply_hint((1, 1)).unwrap(), HintOutcome::Previewing);

        // the mine at (0, 0) is shown but not triggered
        assert_eq!(game.cell_view((0, 0)).unwrap().visibility, Visibility::Shown);
        assert_eq!(game.session().revealed_count(), revealed_before);
        assert_eq!(game.session().lives_remaining(), 2);
        assert!(game.session().is_suspended());
        assert!(!game.hints().is_active());

        assert_eq!(game.reveal((3, 3)).unwrap(), RevealOutcome::Unchanged);
        assert_eq!(game.toggle_flag((3, 3)).unwrap(), FlagOutcome::Unchanged);
        assert_eq!(game.arm_hint(), HintOutcome::Unchanged);

        game.advance(HINT_PREVIEW_DURATION);

        assert!(!game.session().is_suspended());
        assert_eq!(game.cell_view((0, 0)).unwrap().visibility, Visibility::Hidden);
        assert_eq!(game.session().revealed_count(), revealed_before);
        assert_eq!(game.hints().remaining(), HINTS_PER_SESSION - 1);
    }

    #[test]
    fn flag_is_blocked_while_hint_armed() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        game.reveal((0, 3)).unwrap();
        game.arm_hint();
        assert_eq!(game.toggle_flag((3, 3)).unwrap(), FlagOutcome::Unchanged);
    }

    #[test]
    fn reset_cancels_pending_preview_and_restores_counters() {
        let mut game = game(4, &[(0, 0), (3, 3)], 2);
        game.reveal((0, 3)).unwrap();
        game.reveal((0, 0)).unwrap();
        game.advance(Duration::from_secs(3));
        game.arm_hint();
        assert_eq!(game.apply_hint((2, 2)).unwrap(), HintOutcome::Previewing);

        game.reset();

        let session = game.session();
        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(session.correctly_flagged_count(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.lives_remaining(), 2);
        assert!(!session.is_suspended());
        assert_eq!(game.hints().remaining(), HINTS_PER_SESSION);
        assert_eq!(game.board(), &Board::new(4));

        assert!(!game.advance(Duration::from_secs(5)));
        assert_eq!(game.session().elapsed_seconds(), 0);
    }

    #[test]
    fn reset_with_new_config_rebuilds_board() {
        let mut game = Game::with_seed(Level::Beginner.config(), 3);
        game.reveal((0, 0)).unwrap();

        game.reset_with(Level::Expert.config());

        assert_eq!(game.board().size(), 12);
        assert_eq!(game.board().mine_count(), 0);
        assert_eq!(game.session().lives_remaining(), 3);
    }
}
