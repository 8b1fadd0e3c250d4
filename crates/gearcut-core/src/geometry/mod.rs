//! Geometry kernel: points, angles, parametric curves, intersections,
//! point reduction and root finding.

mod angle;
mod bounds;
mod coordinate;
pub mod generators;
pub mod intersection;
pub mod reduction;
pub mod search;

pub use angle::Angle;
pub use bounds::Bounds;
pub use coordinate::Coordinate;
pub use generators::{
    circle_points, epicycloid, hypocycloid, involute, involute_function, involute_plus_offset,
};
pub use intersection::{
    circle_centres, circle_circle_intersections, closest_point, interpolate_y,
    line_circle_intersections, perpendicular_distance, tangent_points, CurveApproach,
};
pub use reduction::linear_reduction;
pub use search::root_binary_search;
