//! Shared types for scenecraft: object handles, transforms and the hex color
//! converter used by every caller that feeds a shader color input.

pub mod color;
pub mod types;

pub use color::{ColorError, GAMMA, LinearRgba, hex_to_linear_rgba};
pub use types::{ObjectId, Transform};
