//! # Gearcut Core
//!
//! Geometry shared by every gear family:
//!
//! - **Geometry kernel**: coordinates, angles, circle/involute/cycloid point
//!   generators, line and circle intersections, root finding
//! - **Curve primitives**: lines, arcs, polylines and Bézier splines composed
//!   into drawable paths
//! - **Bounds and reduction**: bounding boxes and tolerance-based point
//!   reduction
//! - **Resolution**: the angular sampling density threaded through all of the
//!   above
//! - **Units**: metric/imperial conversion for chain and roller sizes

pub mod curve;
pub mod error;
pub mod geometry;
pub mod resolution;
pub mod units;

pub use curve::{
    CircularArc, CubicSpline, CurveSegment, DrawablePath, Line, PolyLine, QuadraticSpline,
    ADJACENCY_TOLERANCE,
};
pub use error::{GeometryError, GeometryResult};
pub use geometry::{Angle, Bounds, Coordinate};
pub use resolution::Resolution;
pub use units::MeasurementSystem;
