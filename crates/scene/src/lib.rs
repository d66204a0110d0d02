pub mod camera;
pub mod convention;
pub mod geometry;
pub mod picking;
pub mod selection;
pub mod session;
pub mod surface;

pub use convention::*;
pub use geometry::*;
pub use selection::*;
pub use session::*;
pub use surface::*;
