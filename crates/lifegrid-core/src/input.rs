//! Input sampling with edge-triggered button detection.
//!
//! The raw input collaborator reports the set of *currently held* buttons
//! once per tick. Actions must fire only on the tick where a button is
//! newly pressed, so [`InputSampler`] keeps the previous tick's mask next
//! to the current one: a button is "just pressed" when the current mask has
//! its bit and the previous mask does not. Plain level sensing would fire
//! every tick while a button stays down.

use std::collections::VecDeque;

use lifegrid_types::Buttons;

/// A source of raw button state.
///
/// Implementations poll real hardware, a terminal, or a script. The tick
/// cycle calls [`poll`] exactly once per tick.
///
/// [`poll`]: InputSource::poll
pub trait InputSource {
    /// Sample the currently held buttons.
    fn poll(&mut self) -> Buttons;

    /// True when the frontend wants the run loop to end cleanly.
    ///
    /// Gives the runner an exit path beyond the tick bound, so a player
    /// can quit an otherwise unlimited run. Defaults to `false`.
    fn stop_requested(&self) -> bool {
        false
    }
}

/// Two-deep button history for edge-triggered dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler {
    /// The mask sampled on the previous tick.
    previous: Buttons,
    /// The mask sampled on the current tick.
    current: Buttons,
}

impl InputSampler {
    /// Create a sampler with no buttons held on either tick.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's held-button mask, rotating the history.
    pub fn sample(&mut self, held: Buttons) {
        self.previous = self.current;
        self.current = held;
    }

    /// True if every button in `buttons` was newly pressed this tick.
    pub const fn just_pressed(&self, buttons: Buttons) -> bool {
        self.current.contains(buttons) && !self.previous.intersects(buttons)
    }

    /// The mask sampled on the current tick.
    pub const fn held(&self) -> Buttons {
        self.current
    }
}

/// A scripted input source for tests: plays back a fixed sequence of
/// per-tick button masks, then reports nothing held and requests a stop.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    /// Remaining per-tick masks, consumed front to back.
    frames: VecDeque<Buttons>,
}

impl ScriptedInput {
    /// Create a script from per-tick masks.
    pub fn new<I: IntoIterator<Item = Buttons>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Number of scripted frames not yet played.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Buttons {
        self.frames.pop_front().unwrap_or(Buttons::empty())
    }

    fn stop_requested(&self) -> bool {
        self.frames.is_empty()
    }
}
