//! Crossterm terminal frontend: rendering sink and input source.
//!
//! [`TerminalSink`] draws the cell grid as one glyph per tile on an
//! alternate screen and uses the terminal's own cursor as the cursor
//! sprite. [`TerminalInput`] drains pending key events once per tick and
//! presents them as a held-button bitmask.
//!
//! Notifications are fire-and-forget per the sink contract: draw failures
//! are logged and swallowed, never surfaced to the core.

use std::io::{Stdout, stdout};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use lifegrid_core::config::{DisplayConfig, GridConfig};
use lifegrid_core::input::InputSource;
use lifegrid_core::render::TileSink;
use lifegrid_types::{Buttons, CellState};
use tracing::warn;

use crate::error::EngineError;

/// Glyph for a live cell.
const LIVE_GLYPH: char = '\u{2588}'; // full block

/// Glyph for a dead cell.
const DEAD_GLYPH: char = '\u{00b7}'; // middle dot

/// Glyph for the saved marker tile.
const MARKER_GLYPH: char = 'S';

/// Terminal row where the grid starts; row 0 carries the key help.
const GRID_ORIGIN_ROW: usize = 1;

/// Terminal-backed implementation of the rendering sink.
///
/// Owns raw mode and the alternate screen; both are restored on drop.
pub struct TerminalSink {
    /// Terminal output handle.
    out: Stdout,
    /// Grid width in cells, for full clears.
    width: usize,
    /// Grid height in cells, for full clears.
    height: usize,
    /// Pixel-to-cell projection parameters, inverting the core's
    /// `tile_size * (coord + offset)` cursor projection.
    tile_size: usize,
    /// Horizontal cursor offset in tiles.
    cursor_offset_x: usize,
    /// Vertical cursor offset in tiles.
    cursor_offset_y: usize,
    /// Last cursor cell received from the core.
    cursor_cell: (usize, usize),
    /// Whether the cursor sprite is currently shown.
    cursor_visible: bool,
}

impl std::fmt::Debug for TerminalSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl TerminalSink {
    /// Enter raw mode and the alternate screen, and draw the key help.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Terminal`] if the terminal cannot be set up.
    pub fn new(grid: &GridConfig, display: &DisplayConfig) -> Result<Self, EngineError> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print("lifegrid  arrows move | z toggle | x run/pause | c clear | enter save | q quit"),
        )?;
        Ok(Self {
            out,
            width: grid.width,
            height: grid.height,
            tile_size: display.tile_size.max(1),
            cursor_offset_x: display.cursor_offset_x,
            cursor_offset_y: display.cursor_offset_y,
            cursor_cell: (0, 0),
            cursor_visible: false,
        })
    }

    /// Print one glyph at a grid coordinate.
    fn draw_cell_glyph(&mut self, x: usize, y: usize, glyph: char) {
        let Some((col, row)) = terminal_position(x, y) else {
            return;
        };
        if let Err(e) = execute!(self.out, MoveTo(col, row), Print(glyph)) {
            warn!(error = %e, "terminal draw failed");
        }
    }

    /// Re-park the terminal cursor over the cursor cell after any draw
    /// displaced it.
    fn sync_cursor(&mut self) {
        if !self.cursor_visible {
            if let Err(e) = execute!(self.out, Hide) {
                warn!(error = %e, "terminal cursor hide failed");
            }
            return;
        }
        let (x, y) = self.cursor_cell;
        let Some((col, row)) = terminal_position(x, y) else {
            return;
        };
        if let Err(e) = execute!(self.out, MoveTo(col, row), Show) {
            warn!(error = %e, "terminal cursor move failed");
        }
    }
}

impl TileSink for TerminalSink {
    fn set_cell(&mut self, x: usize, y: usize, state: CellState) {
        let glyph = if state.is_live() { LIVE_GLYPH } else { DEAD_GLYPH };
        self.draw_cell_glyph(x, y, glyph);
        self.sync_cursor();
    }

    fn move_cursor(&mut self, pixel_x: usize, pixel_y: usize) {
        // Invert the core's pixel projection back to a grid cell.
        let x = pixel_x
            .checked_div(self.tile_size)
            .unwrap_or(0)
            .saturating_sub(self.cursor_offset_x);
        let y = pixel_y
            .checked_div(self.tile_size)
            .unwrap_or(0)
            .saturating_sub(self.cursor_offset_y);
        self.cursor_cell = (x, y);
        self.sync_cursor();
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.sync_cursor();
    }

    fn clear_all(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.draw_cell_glyph(x, y, DEAD_GLYPH);
            }
        }
        self.sync_cursor();
    }

    fn set_marker(&mut self, x: usize, y: usize, _tile: u8) {
        self.draw_cell_glyph(x, y, MARKER_GLYPH);
        self.sync_cursor();
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, Show, LeaveAlternateScreen) {
            warn!(error = %e, "terminal restore failed");
        }
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "disabling raw mode failed");
        }
    }
}

/// Map a grid coordinate to a terminal column/row below the help line.
fn terminal_position(x: usize, y: usize) -> Option<(u16, u16)> {
    let col = u16::try_from(x).ok()?;
    let row = u16::try_from(y.checked_add(GRID_ORIGIN_ROW)?).ok()?;
    Some((col, row))
}

/// Terminal-backed input source.
///
/// Terminals report key presses and repeats rather than held state, so
/// each drained event is presented as a one-tick press; the core's edge
/// detection then fires each action once per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalInput {
    /// Set once the player asks to quit.
    stop: bool,
}

impl TerminalInput {
    /// Create an input source with no pending stop request.
    pub const fn new() -> Self {
        Self { stop: false }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Buttons {
        let mut held = Buttons::empty();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = %e, "input poll failed");
                    break;
                }
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) => {
                    warn!(error = %e, "input read failed");
                    break;
                }
            };
            if let Event::Key(key) = ev {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Up => held |= Buttons::UP,
                    KeyCode::Down => held |= Buttons::DOWN,
                    KeyCode::Left => held |= Buttons::LEFT,
                    KeyCode::Right => held |= Buttons::RIGHT,
                    KeyCode::Char('z' | 'Z') => held |= Buttons::A,
                    KeyCode::Char('x' | 'X') => held |= Buttons::B,
                    KeyCode::Char('c' | 'C') => held |= Buttons::SELECT,
                    KeyCode::Enter => held |= Buttons::START,
                    KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.stop = true,
                    _ => {}
                }
            }
        }
        held
    }

    fn stop_requested(&self) -> bool {
        self.stop
    }
}
