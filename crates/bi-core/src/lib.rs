//! Types partagés, configuration et erreurs pour braillify.
//!
//! This crate holds the pixel/luminance buffers, the packed Braille dot
//! matrix and its glyph table, used across the braillify workspace.

pub mod config;
pub mod dots;
pub mod error;
pub mod frame;
pub mod glyph;
pub mod traits;

pub use config::{BlankGlyph, ConvertConfig, EncodeMode};
pub use dots::DotMatrix;
pub use error::CoreError;
pub use frame::{GrayField, PixelGrid};
