//! Curve primitives: typed segments and the paths built from them.

mod path;
mod segment;

pub use path::{DrawablePath, ADJACENCY_TOLERANCE};
pub use segment::{CircularArc, CubicSpline, CurveSegment, Line, PolyLine, QuadraticSpline};
