pub mod walk1d;
pub mod walk2d;

pub use walk1d::Walk1D;
pub use walk2d::Walk2D;
