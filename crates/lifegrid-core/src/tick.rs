//! The per-tick dispatch cycle.
//!
//! Each tick runs through a fixed sequence:
//!
//! 1. **Sample** -- poll the input source once and rotate the two-deep
//!    button history.
//! 2. **Dispatch** -- drive the paused/running state machine on press
//!    edges. A mode transition short-circuits the rest of the tick, so no
//!    generation runs on the tick a pause or resume occurs.
//! 3. **Generate** -- while running (and no transition happened), apply
//!    exactly one Conway generation and repaint every cell.
//!
//! All mutation happens on the single logical thread, strictly ordered
//! within the tick; the frame wait between ticks lives in [`runner`].
//!
//! [`runner`]: crate::runner

use lifegrid_types::{Buttons, Mode};
use lifegrid_world::{CellGrid, GenerationSummary, Topology, generation};
use tracing::{debug, info};

use crate::config::{DisplayConfig, SimulationConfig};
use crate::cursor::Cursor;
use crate::input::{InputSampler, InputSource};
use crate::render::TileSink;
use crate::store::{self, SaveStore};

/// Marker tile painted at the top-left corner after a successful save.
pub const SAVED_MARKER_TILE: u8 = 3;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// The mode at the end of the tick.
    pub mode: Mode,
    /// Live cells at the end of the tick.
    pub live_cells: usize,
    /// What the generation step changed, if one ran this tick.
    pub generation: Option<GenerationSummary>,
}

/// The mutable simulation state owned by the top-level loop.
///
/// Bundles the fixed topology, the cell grid, the cursor, and the mode
/// flag in one place so the engine can be exercised in isolation from its
/// collaborators.
#[derive(Debug)]
pub struct SimulationState {
    /// The fixed toroidal neighbor relation.
    pub topology: Topology,
    /// Live/dead cell states plus the neighbor-count scratch buffer.
    pub grid: CellGrid,
    /// The player's cursor.
    pub cursor: Cursor,
    /// Paused or running.
    pub mode: Mode,
    /// Display geometry for cursor pixel projection.
    pub display: DisplayConfig,
    /// Edge-trigger button history.
    sampler: InputSampler,
    /// Ticks executed so far.
    tick: u64,
}

impl SimulationState {
    /// Build the startup state from configuration: topology wired once,
    /// an all-dead grid, the cursor at the grid center, mode paused.
    ///
    /// # Errors
    ///
    /// Returns [`lifegrid_world::WorldError`] if the configured grid
    /// dimensions are invalid.
    pub fn new(config: &SimulationConfig) -> Result<Self, lifegrid_world::WorldError> {
        let topology = Topology::new(config.grid.width, config.grid.height)?;
        let grid = CellGrid::new(&topology);
        let cursor = Cursor::centered(&topology);
        Ok(Self {
            topology,
            grid,
            cursor,
            mode: Mode::default(),
            display: config.display.clone(),
            sampler: InputSampler::new(),
            tick: 0,
        })
    }

    /// Ticks executed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Seed the grid from a saved snapshot, if the store holds one.
    ///
    /// Returns `true` when a save was loaded. Called once at startup,
    /// before the first tick, inside the store's scoped access window.
    pub fn load_saved(&mut self, save_store: &mut dyn SaveStore) -> bool {
        match store::load_grid(save_store, &self.topology) {
            Some(grid) => {
                self.grid = grid;
                info!(live = self.grid.live_count(), "saved grid loaded");
                true
            }
            None => {
                debug!("no save found, starting from an empty grid");
                false
            }
        }
    }

    /// Repaint every cell, place the cursor, and sync cursor visibility.
    ///
    /// Used once at startup and available to frontends that need a full
    /// redraw.
    pub fn render_full(&self, sink: &mut dyn TileSink) {
        paint_all_cells(&self.grid, &self.topology, sink);
        let (px, py) = self.cursor.pixel_position(&self.display);
        sink.move_cursor(px, py);
        sink.set_cursor_visible(!self.mode.is_running());
    }
}

/// Execute one complete tick: sample input, dispatch, and -- while running
/// with no mode transition this tick -- advance one generation.
///
/// # Errors
///
/// Returns [`TickError::TickOverflow`] if the tick counter would exceed
/// `u64::MAX`.
pub fn run_tick(
    state: &mut SimulationState,
    input: &mut dyn InputSource,
    sink: &mut dyn TileSink,
    save_store: &mut dyn SaveStore,
) -> Result<TickSummary, TickError> {
    state.tick = state
        .tick
        .checked_add(1)
        .ok_or(TickError::TickOverflow)?;

    // Phase 1: one input sample per tick.
    let held = input.poll();
    state.sampler.sample(held);

    // Phase 2/3: dispatch, then at most one generation.
    let generation = match state.mode {
        Mode::Paused => {
            dispatch_paused(state, sink, save_store);
            None
        }
        Mode::Running => dispatch_running(state, sink),
    };

    Ok(TickSummary {
        tick: state.tick,
        mode: state.mode,
        live_cells: state.grid.live_count(),
        generation,
    })
}

/// Handle one paused-mode tick: run control plus edit operations.
fn dispatch_paused(
    state: &mut SimulationState,
    sink: &mut dyn TileSink,
    save_store: &mut dyn SaveStore,
) {
    // Resume on the toggle button; the rest of the tick is skipped so no
    // generation runs on the transition tick.
    if state.sampler.just_pressed(Buttons::B) {
        state.mode = Mode::Running;
        sink.set_cursor_visible(false);
        debug!(tick = state.tick, "resumed");
        return;
    }

    // Clear every cell and reset the visual grid.
    if state.sampler.just_pressed(Buttons::SELECT) {
        state.grid.clear();
        sink.clear_all();
        info!(tick = state.tick, "grid cleared");
    }

    // Serialize the grid through the scoped store window and mark the save.
    if state.sampler.just_pressed(Buttons::START) {
        store::save_grid(save_store, &state.grid);
        sink.set_marker(0, 0, SAVED_MARKER_TILE);
        info!(
            tick = state.tick,
            live = state.grid.live_count(),
            "grid saved"
        );
    }

    // Toggle the cell under the cursor.
    if state.sampler.just_pressed(Buttons::A) {
        if let Some(index) = state.cursor.index(&state.topology) {
            let new_state = state.grid.toggle(index);
            sink.set_cell(state.cursor.x(), state.cursor.y(), new_state);
        }
    }

    // Directional input, each axis independent: diagonal presses move
    // both axes in the same tick.
    let mut dx: i8 = 0;
    let mut dy: i8 = 0;
    if state.sampler.just_pressed(Buttons::UP) {
        dy = -1;
    }
    if state.sampler.just_pressed(Buttons::DOWN) {
        dy = 1;
    }
    if state.sampler.just_pressed(Buttons::LEFT) {
        dx = -1;
    }
    if state.sampler.just_pressed(Buttons::RIGHT) {
        dx = 1;
    }
    if dx != 0 || dy != 0 {
        state.cursor.move_by(dx, dy, &state.topology);
        let (px, py) = state.cursor.pixel_position(&state.display);
        sink.move_cursor(px, py);
    }
}

/// Handle one running-mode tick: only the toggle button is read; anything
/// else is ignored and one generation runs.
fn dispatch_running(
    state: &mut SimulationState,
    sink: &mut dyn TileSink,
) -> Option<GenerationSummary> {
    if state.sampler.just_pressed(Buttons::B) {
        state.mode = Mode::Paused;
        sink.set_cursor_visible(true);
        debug!(tick = state.tick, "paused");
        return None;
    }

    let summary = generation::advance(&mut state.grid, &state.topology);
    paint_all_cells(&state.grid, &state.topology, sink);
    Some(summary)
}

/// Emit a `set_cell` notification for every cell. The whole grid is
/// re-tiled after each generation rather than diffed.
fn paint_all_cells(grid: &CellGrid, topology: &Topology, sink: &mut dyn TileSink) {
    for (index, cell_state) in grid.states() {
        if let Some((x, y)) = topology.coords_of(index) {
            sink.set_cell(x, y, cell_state);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifegrid_types::CellState;

    use super::*;
    use crate::input::ScriptedInput;
    use crate::render::NoOpSink;
    use crate::store::MemoryStore;

    /// A sink that records every notification for assertions.
    #[derive(Debug, Default)]
    struct RecordingSink {
        cells: Vec<(usize, usize, CellState)>,
        cursor_moves: Vec<(usize, usize)>,
        visibility: Vec<bool>,
        clears: u64,
        markers: Vec<(usize, usize, u8)>,
    }

    impl TileSink for RecordingSink {
        fn set_cell(&mut self, x: usize, y: usize, state: CellState) {
            self.cells.push((x, y, state));
        }
        fn move_cursor(&mut self, pixel_x: usize, pixel_y: usize) {
            self.cursor_moves.push((pixel_x, pixel_y));
        }
        fn set_cursor_visible(&mut self, visible: bool) {
            self.visibility.push(visible);
        }
        fn clear_all(&mut self) {
            self.clears = self.clears.saturating_add(1);
        }
        fn set_marker(&mut self, x: usize, y: usize, tile: u8) {
            self.markers.push((x, y, tile));
        }
    }

    fn state() -> SimulationState {
        SimulationState::new(&SimulationConfig::default()).unwrap()
    }

    fn run_script(
        state: &mut SimulationState,
        frames: Vec<Buttons>,
    ) -> (Vec<TickSummary>, RecordingSink, MemoryStore) {
        let mut input = ScriptedInput::new(frames);
        let mut sink = RecordingSink::default();
        let mut save = MemoryStore::new();
        let mut summaries = Vec::new();
        while input.remaining() > 0 {
            summaries.push(run_tick(state, &mut input, &mut sink, &mut save).unwrap());
        }
        (summaries, sink, save)
    }

    #[test]
    fn starts_paused_with_cursor_centered() {
        let state = state();
        assert_eq!(state.mode, Mode::Paused);
        assert_eq!((state.cursor.x(), state.cursor.y()), (9, 8));
        assert_eq!(state.tick(), 0);
    }

    #[test]
    fn accept_toggles_the_cell_under_the_cursor() {
        let mut state = state();
        let (summaries, sink, _) =
            run_script(&mut state, vec![Buttons::A, Buttons::empty()]);

        let index = state.cursor.index(&state.topology).unwrap();
        assert!(state.grid.is_live(index));
        assert_eq!(sink.cells, vec![(9, 8, CellState::Live)]);
        assert_eq!(summaries.first().unwrap().live_cells, 1);
    }

    #[test]
    fn held_accept_fires_exactly_once() {
        let mut state = state();
        let held = vec![Buttons::A; 6];
        run_script(&mut state, held);
        // An even number of toggles would read dead; one toggle reads live.
        let index = state.cursor.index(&state.topology).unwrap();
        assert!(state.grid.is_live(index));
    }

    #[test]
    fn select_clears_grid_and_visuals() {
        let mut state = state();
        let index = state.topology.index_of(3, 3).unwrap();
        state.grid.set(index, true);

        let (_, sink, _) = run_script(&mut state, vec![Buttons::SELECT]);
        assert_eq!(state.grid.live_count(), 0);
        assert_eq!(sink.clears, 1);
    }

    #[test]
    fn start_saves_through_one_window_and_paints_the_marker() {
        let mut state = state();
        state.grid.set(state.topology.index_of(0, 0).unwrap(), true);

        let (_, sink, save) = run_script(&mut state, vec![Buttons::START]);
        assert_eq!(save.windows(), 1);
        assert_eq!(save.violations(), 0);
        assert_eq!(
            save.bytes().first(),
            Some(&lifegrid_world::snapshot::SAVE_MARKER)
        );
        assert_eq!(sink.markers, vec![(0, 0, SAVED_MARKER_TILE)]);
    }

    #[test]
    fn diagonal_press_moves_both_axes_in_one_tick() {
        let mut state = state();
        let (_, sink, _) = run_script(&mut state, vec![Buttons::UP | Buttons::LEFT]);
        assert_eq!((state.cursor.x(), state.cursor.y()), (8, 7));
        assert_eq!(sink.cursor_moves.len(), 1);
    }

    #[test]
    fn resume_tick_runs_no_generation() {
        let mut state = state();
        // A lone live cell would die if a generation ran.
        let index = state.topology.index_of(5, 5).unwrap();
        state.grid.set(index, true);

        let (summaries, sink, _) = run_script(&mut state, vec![Buttons::B]);
        let summary = summaries.first().unwrap();
        assert_eq!(summary.mode, Mode::Running);
        assert!(summary.generation.is_none());
        assert!(state.grid.is_live(index));
        assert_eq!(sink.visibility, vec![false]);
    }

    #[test]
    fn pause_then_resume_generates_only_on_the_following_tick() {
        let mut state = state();
        state.mode = Mode::Running;
        let index = state.topology.index_of(5, 5).unwrap();
        state.grid.set(index, true);

        // Tick 1: pause edge (no generation). Tick 2: release. Tick 3:
        // resume edge (no generation). Tick 4: exactly one generation.
        let (summaries, _, _) = run_script(
            &mut state,
            vec![
                Buttons::B,
                Buttons::empty(),
                Buttons::B,
                Buttons::empty(),
            ],
        );
        let generations: Vec<bool> = summaries
            .iter()
            .map(|s| s.generation.is_some())
            .collect();
        assert_eq!(generations, vec![false, false, false, true]);
        // The lone cell died in the single generation that ran.
        assert_eq!(state.grid.live_count(), 0);
    }

    #[test]
    fn running_mode_ignores_edit_input() {
        let mut state = state();
        state.mode = Mode::Running;
        let cursor_before = state.cursor;

        let (_, sink, save) = run_script(
            &mut state,
            vec![Buttons::A | Buttons::SELECT | Buttons::START | Buttons::RIGHT],
        );
        assert_eq!(state.cursor, cursor_before);
        assert_eq!(save.windows(), 0);
        assert_eq!(sink.clears, 0);
        assert!(sink.markers.is_empty());
    }

    #[test]
    fn running_tick_repaints_every_cell() {
        let mut state = state();
        state.mode = Mode::Running;
        let (_, sink, _) = run_script(&mut state, vec![Buttons::empty()]);
        assert_eq!(sink.cells.len(), state.grid.len());
    }

    #[test]
    fn load_saved_restores_a_saved_pattern() {
        let mut state = state();
        for (x, y) in [(4, 3), (5, 4), (3, 5), (4, 5), (5, 5)] {
            state.grid.set(state.topology.index_of(x, y).unwrap(), true);
        }
        let mut save = MemoryStore::new();
        store::save_grid(&mut save, &state.grid);

        let mut fresh = SimulationState::new(&SimulationConfig::default()).unwrap();
        assert!(fresh.load_saved(&mut save));
        assert_eq!(fresh.grid, state.grid);

        let mut empty = MemoryStore::new();
        assert!(!fresh.load_saved(&mut empty));
    }

    #[test]
    fn render_full_paints_grid_cursor_and_visibility() {
        let state = state();
        let mut sink = RecordingSink::default();
        state.render_full(&mut sink);
        assert_eq!(sink.cells.len(), state.grid.len());
        assert_eq!(sink.cursor_moves, vec![(80, 80)]);
        assert_eq!(sink.visibility, vec![true]);
    }

    #[test]
    fn tick_counter_advances_per_tick() {
        let mut state = state();
        let mut input = ScriptedInput::new(vec![Buttons::empty(); 3]);
        let mut sink = NoOpSink;
        let mut save = MemoryStore::new();
        for expected in 1..=3 {
            let summary = run_tick(&mut state, &mut input, &mut sink, &mut save).unwrap();
            assert_eq!(summary.tick, expected);
        }
        assert_eq!(state.tick(), 3);
    }
}
