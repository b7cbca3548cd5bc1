//! Trigon engine crate.
//!
//! Acquires a GPU device and window surface, uploads one colored triangle,
//! links the two-stage pipeline and redraws the frame on every tick.

pub mod device;
pub mod frame;
pub mod geometry;
pub mod pipeline;
pub mod window;

pub mod logging;
