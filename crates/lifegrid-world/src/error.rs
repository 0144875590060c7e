//! Error types for the `lifegrid-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

/// Errors that can occur during world construction.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A grid axis is below the minimum required for a valid torus.
    ///
    /// Each axis must be at least 3 so that no cell ever wraps around to
    /// become its own neighbor.
    #[error("grid {axis} must be at least {min} (got {size})")]
    InvalidDimensions {
        /// Which axis is invalid ("width" or "height").
        axis: &'static str,
        /// The minimum allowed extent.
        min: usize,
        /// The extent that was supplied.
        size: usize,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
