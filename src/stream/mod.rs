//! Stream utilities for feed consumers.

mod redraw;

pub use redraw::{Redraw, RedrawExt};
