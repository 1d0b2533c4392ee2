pub mod boolean;
pub mod clip;
pub mod segment_set;
pub mod triangulate;
pub mod winding;

pub use boolean::{Intersect, Union};
