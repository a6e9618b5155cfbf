//! Routing representation.
//!
//! Value types shared by every operator and by the solver:
//!
//! - [`Point`], [`Direction`], [`Axis`]: grid geometry
//! - [`Segment`]: one straight run with a derived end point
//! - [`Path`]: a canonical segment chain between two fixed pins
//! - [`Problem`]: board dimensions plus pin pairs, immutable once loaded
//! - [`Solution`]: one path per pin pair, with on-demand metrics

mod geometry;
mod path;
mod problem;
mod segment;
mod solution;

pub use geometry::{Axis, Direction, Point};
pub use path::{Path, PathDefect};
pub use problem::{PinPair, Problem};
pub use segment::Segment;
pub use solution::{OutsideBoardStats, Solution};
