pub mod curve;
pub mod intersection;
pub mod plane;
pub mod polygon;
pub mod polyline;

pub use curve::{
    Halfline, Halfline2D, Halfline3D, Line, Line2D, Line3D, Linear, ParamDomain, Segment,
    Segment2D, Segment3D,
};
pub use intersection::{Intersection, IntersectionSet};
pub use plane::{Plane, PlaneIntersection};
pub use polygon::{
    parallelogram, parallelogram_area, triangle, triangle_area, Polygon, Polygon2D, Polygon3D,
};
pub use polyline::{Polyline, Polyline2D, Polyline3D};
