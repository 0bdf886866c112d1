use alloc::vec::{Drain, Vec};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - Won | Lost -> NotStarted (restart)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Won or lost. Any further board input starts a new game.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub flags_placed: CellCount,
    pub suspected_marks: CellCount,
    pub cells_revealed: CellCount,
    /// Always `total_safe_cells - cells_revealed`.
    pub unrevealed_safe_cells: CellCount,
}

impl Counters {
    fn new(config: GameConfig) -> Self {
        Self {
            flags_placed: 0,
            suspected_marks: 0,
            cells_revealed: 0,
            unrevealed_safe_cells: config.total_safe_cells(),
        }
    }
}

/// Result of acting on one cell during a reveal.
#[derive(Copy, Clone, Debug, PartialEq)]
enum CellReveal {
    Skipped,
    Safe(u8),
    Mine,
}

/// One game board with its rules, counters and pending host events.
///
/// All operations run to completion on the caller's thread. Events produced along the way are
/// queued and handed over by [`GameEngine::drain_events`].
#[derive(Clone, Debug)]
pub struct GameEngine<P = RandomMinePlacer> {
    grid: Grid,
    mode: GameMode,
    placer: P,
    state: GameState,
    counters: Counters,
    marking_mode: bool,
    events: Vec<GameEvent>,
}

impl<P: MinePlacer> GameEngine<P> {
    pub fn new(config: GameConfig, mode: GameMode, placer: P) -> Self {
        Self {
            grid: Grid::new(config),
            mode,
            placer,
            state: GameState::NotStarted,
            counters: Counters::new(config),
            marking_mode: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords)
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn flags_placed(&self) -> CellCount {
        self.counters.flags_placed
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.counters.cells_revealed
    }

    pub fn unrevealed_safe_cells(&self) -> CellCount {
        self.counters.unrevealed_safe_cells
    }

    pub fn suspected_count(&self) -> CellCount {
        self.counters.suspected_marks
    }

    pub fn suspected_marks(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.grid
            .iter()
            .filter(|(_, cell)| cell.is_suspected())
            .map(|(coords, _)| coords)
    }

    pub fn mines_left(&self) -> i32 {
        i32::from(self.grid.total_mines()) - i32::from(self.counters.flags_placed)
    }

    pub fn progress(&self) -> f64 {
        let total = f64::from(self.grid.total_safe_cells());
        (f64::from(self.counters.cells_revealed) / total).clamp(0.0, 1.0)
    }

    pub fn is_marking_mode(&self) -> bool {
        self.marking_mode
    }

    /// Switches what a tap does. Existing flags and suspected marks are kept either way.
    pub fn set_marking_mode(&mut self, enabled: bool) {
        if self.marking_mode != enabled {
            log::debug!("Marking mode {}", if enabled { "on" } else { "off" });
        }
        self.marking_mode = enabled;
    }

    /// Takes every event queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Discards the board and starts over with an empty grid of the same configuration.
    pub fn restart(&mut self) {
        let config = self.grid.config();
        log::debug!("Restarting {} game", config);

        self.grid = Grid::new(config);
        self.state = GameState::NotStarted;
        self.counters = Counters::new(config);
        self.marking_mode = false;

        self.emit(GameEvent::MinesCounterUpdate {
            mines_left: self.mines_left(),
        });
        self.emit(GameEvent::ProgressUpdate { progress: 0.0 });
        self.emit(GameEvent::BombMarked { count: 0 });
    }

    /// Applies a host input that was already resolved to a cell and an action.
    pub fn handle(&mut self, input: PlayerInput, elapsed_secs: u32) -> InputOutcome {
        match input.action {
            PlayerAction::Reveal => InputOutcome::Reveal(self.reveal(input.coords, elapsed_secs)),
            PlayerAction::Flag => InputOutcome::Mark(self.toggle_flag(input.coords)),
            PlayerAction::Mark => InputOutcome::Mark(self.toggle_mark(input.coords)),
        }
    }

    /// Reveals a cell, cascading through zero-adjacency regions.
    ///
    /// The first successful reveal of a game places the mines, never under `coords`.
    pub fn reveal(&mut self, coords: Coord2, elapsed_secs: u32) -> RevealOutcome {
        use RevealOutcome::*;

        if self.state.is_finished() {
            self.restart();
            return Restarted;
        }

        match self.grid.get(coords) {
            Some(cell) if cell.is_revealable() => {}
            _ => return NoChange,
        }

        if self.state.is_initial() {
            self.grid.place_mines(&mut self.placer, coords);
            self.state = GameState::InProgress;
            log::debug!("Game started at {:?}", coords);
            self.emit(GameEvent::GameStart);
        }

        if let Err(mine) = self.reveal_region(coords) {
            self.lose(mine, elapsed_secs);
            return HitMine;
        }

        if self.counters.unrevealed_safe_cells == 0 {
            self.win(elapsed_secs);
            Won
        } else {
            Revealed
        }
    }

    /// Toggles a flag. Ignored in marking mode, on revealed cells and on suspected cells.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if self.state.is_finished() {
            self.restart();
            return Restarted;
        }
        if self.marking_mode {
            return NoChange;
        }

        let Some(cell) = self.grid.get(coords) else {
            return NoChange;
        };
        let flagged = match (cell.is_revealed(), cell.annotation()) {
            (false, Annotation::None) => true,
            (false, Annotation::Flagged) => false,
            _ => return NoChange,
        };

        if flagged {
            self.grid.cell_mut(coords).set_annotation(Annotation::Flagged);
            self.counters.flags_placed += 1;
        } else {
            self.grid.cell_mut(coords).set_annotation(Annotation::None);
            self.counters.flags_placed -= 1;
        }

        self.emit(GameEvent::MinesCounterUpdate {
            mines_left: self.mines_left(),
        });
        self.emit(GameEvent::FlagToggled { coords, flagged });
        Changed
    }

    /// Toggles a suspected mark. Only in marking mode, never on revealed or flagged cells.
    pub fn toggle_mark(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if self.state.is_finished() {
            self.restart();
            return Restarted;
        }
        if !self.marking_mode {
            return NoChange;
        }

        let Some(cell) = self.grid.get(coords) else {
            return NoChange;
        };
        match (cell.is_revealed(), cell.annotation()) {
            (false, Annotation::None) => {
                self.grid
                    .cell_mut(coords)
                    .set_annotation(Annotation::SuspectedMarked);
                self.counters.suspected_marks += 1;
            }
            (false, Annotation::SuspectedMarked) => {
                self.grid.cell_mut(coords).set_annotation(Annotation::None);
                self.counters.suspected_marks -= 1;
            }
            _ => return NoChange,
        }

        self.emit(GameEvent::BombMarked {
            count: self.counters.suspected_marks,
        });
        Changed
    }

    /// Reveals `start` and, depth first, every cell reachable through zero-adjacency cells.
    ///
    /// Uses an explicit stack of neighbor iterators so the visiting order is the same as a
    /// recursive reveal over rows -1..=1, cols -1..=1, without its stack depth. Returns the
    /// coordinates of a mine if one was hit.
    fn reveal_region(&mut self, start: Coord2) -> core::result::Result<(), Coord2> {
        let mut pending: Vec<NeighborIter> = Vec::new();

        match self.reveal_single_cell(start) {
            CellReveal::Mine => return Err(start),
            CellReveal::Safe(0) => pending.push(self.grid.iter_neighbors(start)),
            CellReveal::Safe(_) | CellReveal::Skipped => {}
        }

        while let Some(frame) = pending.last_mut() {
            let Some(coords) = frame.next() else {
                pending.pop();
                continue;
            };

            match self.reveal_single_cell(coords) {
                CellReveal::Mine => return Err(coords),
                CellReveal::Safe(0) => {
                    log::trace!("Cascading from {:?}, depth {}", coords, pending.len());
                    pending.push(self.grid.iter_neighbors(coords));
                }
                CellReveal::Safe(_) | CellReveal::Skipped => {}
            }
        }

        Ok(())
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> CellReveal {
        let cell = self.grid[coords];
        if !cell.is_revealable() {
            return CellReveal::Skipped;
        }

        self.grid.cell_mut(coords).set_revealed();
        self.emit(GameEvent::CellRevealed { coords });

        if cell.is_mine() {
            return CellReveal::Mine;
        }

        self.counters.cells_revealed += 1;
        self.counters.unrevealed_safe_cells -= 1;
        self.emit(GameEvent::ProgressUpdate {
            progress: self.progress(),
        });
        CellReveal::Safe(cell.adjacent_mines())
    }

    fn lose(&mut self, triggered: Coord2, elapsed_secs: u32) {
        self.state = GameState::Lost;
        log::debug!("Mine hit at {:?} after {}s", triggered, elapsed_secs);

        let before = self.counters;
        let mines: Vec<Coord2> = self.grid.mine_coords().collect();
        for coords in mines {
            match self.grid[coords].annotation() {
                Annotation::Flagged => self.counters.flags_placed -= 1,
                Annotation::SuspectedMarked => self.counters.suspected_marks -= 1,
                Annotation::None => {}
            }
            let cell = self.grid.cell_mut(coords);
            cell.set_annotation(Annotation::None);
            cell.set_revealed();
        }

        if self.counters.flags_placed != before.flags_placed {
            self.emit(GameEvent::MinesCounterUpdate {
                mines_left: self.mines_left(),
            });
        }
        if self.counters.suspected_marks != before.suspected_marks {
            self.emit(GameEvent::BombMarked {
                count: self.counters.suspected_marks,
            });
        }
        self.emit(GameEvent::GameOver(self.summary(elapsed_secs)));
    }

    fn win(&mut self, elapsed_secs: u32) {
        self.state = GameState::Won;
        log::debug!("Game won after {}s", elapsed_secs);
        self.emit(GameEvent::GameWin(self.summary(elapsed_secs)));
    }

    fn summary(&self, elapsed_secs: u32) -> GameSummary {
        GameSummary {
            progress: self.progress(),
            cells_revealed: self.counters.cells_revealed,
            total_safe_cells: self.grid.total_safe_cells(),
            elapsed_secs,
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
