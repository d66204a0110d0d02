pub mod coordinates;
pub mod point_json;

pub use coordinates::*;
pub use point_json::*;
