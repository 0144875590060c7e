//! Input button bitmask.
//!
//! The input source reports the set of currently held buttons once per tick
//! as a [`Buttons`] bitmask. Edge detection (newly pressed vs. held) is done
//! by `lifegrid-core`, which keeps the previous tick's sample alongside the
//! current one -- the mask itself is level-sensitive.

bitflags::bitflags! {
    /// The set of buttons currently held down.
    ///
    /// One bit per button of an eight-button handheld pad: four
    /// directions, two action buttons, and the Select/Start pair.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        /// Directional pad up.
        const UP = 1;
        /// Directional pad down.
        const DOWN = 1 << 1;
        /// Directional pad left.
        const LEFT = 1 << 2;
        /// Directional pad right.
        const RIGHT = 1 << 3;
        /// Accept button: toggles the cell under the cursor while paused.
        const A = 1 << 4;
        /// Run-toggle button: switches between paused and running.
        const B = 1 << 5;
        /// Clears the grid while paused.
        const SELECT = 1 << 6;
        /// Saves the grid while paused.
        const START = 1 << 7;
    }
}

impl Buttons {
    /// The four directional buttons combined.
    pub const DPAD: Self = Self::UP
        .union(Self::DOWN)
        .union(Self::LEFT)
        .union(Self::RIGHT);
}
