mod color;
pub mod document;
mod error;
mod geometry;
pub mod guid;
mod point;

pub use color::Color;
pub use document::{JsonData, ReadMode};
pub use error::{Error, Result};
pub use geometry::Geometry;
pub use guid::{SequenceGenerator, TokenGenerator, UuidGenerator};
pub use point::Point;
