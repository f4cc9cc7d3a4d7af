mod error;
mod matrix;
mod shape;

pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use shape::Shape;
