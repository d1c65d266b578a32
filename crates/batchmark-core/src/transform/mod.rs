//! Geometric operations: rotation, resizing and padding.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Rotation keeps the canvas size; corners are clipped
//! - Origin is the top-left corner, rows run top to bottom

mod padding;
mod resize;
mod rotation;

pub use padding::{apply_padding, compute_padding_layout, PaddingLayout};
pub use resize::{resize, scaled_dimensions, FilterType};
pub use rotation::rotate_onto;
