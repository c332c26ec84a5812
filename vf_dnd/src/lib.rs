pub mod engine;
pub mod geometry;

pub use engine::*;
pub use geometry::*;
