//! Per-corner color data for scalar quantities.
//!
//! A [`ColorProgram`] is what a surface draws a scalar quantity with: one
//! attribute entry per triangle corner, the active colormap baked into a
//! lookup texture, and the range uniforms that map values onto that texture.

use glam::Vec3;

use crate::color_maps::{colorize, ColorMap};

/// Number of entries in a baked colormap texture.
pub const COLOR_MAP_TEXTURE_SIZE: usize = 256;

/// GPU representation of the scalar range uniforms.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScalarUniforms {
    pub range_low: f32,
    pub range_high: f32,
    _padding: [f32; 2],
}

impl ScalarUniforms {
    /// Creates uniforms for the visualization range `[low, high]`.
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            range_low: low as f32,
            range_high: high as f32,
            _padding: [0.0; 2],
        }
    }
}

impl Default for ScalarUniforms {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Per-corner scalar attribute, in triangulation corner order.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorAttribute {
    /// One value per corner.
    Scalar(Vec<f32>),
    /// Three values per corner, one for each edge of the triangle.
    Triple(Vec<[f32; 3]>),
}

impl ColorAttribute {
    /// Number of triangle corners covered.
    pub fn corner_count(&self) -> usize {
        match self {
            Self::Scalar(values) => values.len(),
            Self::Triple(values) => values.len(),
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Scalar(values) => bytemuck::cast_slice(values),
            Self::Triple(values) => bytemuck::cast_slice(values),
        }
    }
}

/// Colors of a [`ColorAttribute`], laid out like the attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum CornerColors {
    /// One color per corner.
    Single(Vec<Vec3>),
    /// Three colors per corner, one for each edge of the triangle.
    Triple(Vec<[Vec3; 3]>),
}

impl CornerColors {
    /// Number of triangle corners covered.
    pub fn corner_count(&self) -> usize {
        match self {
            Self::Single(colors) => colors.len(),
            Self::Triple(colors) => colors.len(),
        }
    }
}

/// Color data built for one scalar quantity.
#[derive(Debug, Clone)]
pub struct ColorProgram {
    attribute: ColorAttribute,
    color_map_name: String,
    texture: Vec<[f32; 4]>,
    unsupported_faces: Vec<usize>,
}

impl ColorProgram {
    /// Creates a program from an expanded attribute and the active colormap.
    ///
    /// `unsupported_faces` lists faces whose values could not be expanded
    /// faithfully.
    pub fn new(
        attribute: ColorAttribute,
        color_map: &ColorMap,
        unsupported_faces: Vec<usize>,
    ) -> Self {
        Self {
            attribute,
            color_map_name: color_map.name.clone(),
            texture: color_map.to_texture(COLOR_MAP_TEXTURE_SIZE),
            unsupported_faces,
        }
    }

    pub fn attribute(&self) -> &ColorAttribute {
        &self.attribute
    }

    pub fn color_map_name(&self) -> &str {
        &self.color_map_name
    }

    /// The baked colormap lookup table.
    pub fn texture(&self) -> &[[f32; 4]] {
        &self.texture
    }

    /// Raw texture bytes for upload.
    pub fn texture_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texture)
    }

    pub fn unsupported_faces(&self) -> &[usize] {
        &self.unsupported_faces
    }

    /// Colors the attribute over `[low, high]` with `color_map`.
    pub fn colors(&self, low: f64, high: f64, color_map: &ColorMap) -> CornerColors {
        let shade = |v: f32| colorize(f64::from(v), low, high, color_map);
        match &self.attribute {
            ColorAttribute::Scalar(values) => {
                CornerColors::Single(values.iter().copied().map(shade).collect())
            }
            ColorAttribute::Triple(values) => {
                CornerColors::Triple(values.iter().map(|t| t.map(&shade)).collect())
            }
        }
    }
}
