//! Render-side models for meshscope.
//!
//! This crate holds the data a renderer consumes for scalar quantities:
//! - Color maps and the ordered color map registry
//! - Weighted histograms with their display colormap
//! - Color programs: per-corner attributes, baked colormap textures and
//!   range uniforms

// Quantities are narrowed to f32 for upload
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod color_maps;
pub mod color_program;
pub mod error;
pub mod histogram;

pub use color_maps::{colorize, ColorMap, ColorMapRegistry};
pub use color_program::{
    ColorAttribute, ColorProgram, CornerColors, ScalarUniforms, COLOR_MAP_TEXTURE_SIZE,
};
pub use error::{RenderError, RenderResult};
pub use histogram::{Histogram, DEFAULT_BIN_COUNT};
