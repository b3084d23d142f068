//! Color map system.
//!
//! Color maps are kept in an ordered registry so a quantity can select one by
//! index, the way a combo box does.

use glam::Vec3;
use meshscope_core::quantity::DataType;
use meshscope_core::ScalarOptions;

use crate::error::{RenderError, RenderResult};

/// A color map for mapping scalar values to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Samples the color map at a given value (0 to 1).
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        if self.colors.is_empty() {
            return Vec3::ZERO;
        }

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let n = self.colors.len() - 1;
        let idx = (t * n as f32).floor() as usize;
        let idx = idx.min(n - 1);
        let frac = t * n as f32 - idx as f32;

        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    /// Bakes the map into an `entries`-long RGBA lookup table.
    pub fn to_texture(&self, entries: usize) -> Vec<[f32; 4]> {
        match entries {
            0 => Vec::new(),
            1 => vec![self.sample(0.0).extend(1.0).to_array()],
            _ => (0..entries)
                .map(|i| {
                    let t = i as f32 / (entries - 1) as f32;
                    self.sample(t).extend(1.0).to_array()
                })
                .collect(),
        }
    }
}

/// Maps `value` to a color, with `[low, high]` spanning the whole map.
///
/// Values outside the range saturate to the map's endpoints. A degenerate
/// range (`low >= high`) maps every value to the low endpoint.
pub fn colorize(value: f64, low: f64, high: f64, color_map: &ColorMap) -> Vec3 {
    let span = high - low;
    let t = if span > 0.0 && span.is_finite() {
        (value.clamp(low, high) - low) / span
    } else {
        0.0
    };
    color_map.sample(t as f32)
}

/// Ordered registry of color maps.
#[derive(Debug, Clone, Default)]
pub struct ColorMapRegistry {
    color_maps: Vec<ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new color map registry with default color maps.
    ///
    /// The defaults are, in order: viridis, coolwarm, blues, reds, rainbow.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        // Viridis color map
        self.register(ColorMap::new(
            "viridis",
            vec![
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        // Coolwarm color map (diverging)
        self.register(ColorMap::new(
            "coolwarm",
            vec![
                Vec3::new(0.230, 0.299, 0.754),
                Vec3::new(0.552, 0.690, 0.996),
                Vec3::new(0.866, 0.866, 0.866),
                Vec3::new(0.956, 0.604, 0.486),
                Vec3::new(0.706, 0.016, 0.150),
            ],
        ));

        // Blues color map
        self.register(ColorMap::new(
            "blues",
            vec![
                Vec3::new(0.969, 0.984, 1.000),
                Vec3::new(0.871, 0.922, 0.969),
                Vec3::new(0.776, 0.859, 0.937),
                Vec3::new(0.620, 0.792, 0.882),
                Vec3::new(0.419, 0.682, 0.839),
                Vec3::new(0.259, 0.573, 0.776),
                Vec3::new(0.129, 0.443, 0.710),
                Vec3::new(0.031, 0.318, 0.612),
                Vec3::new(0.031, 0.188, 0.420),
            ],
        ));

        // Reds color map
        self.register(ColorMap::new(
            "reds",
            vec![
                Vec3::new(1.000, 0.961, 0.941),
                Vec3::new(0.996, 0.878, 0.824),
                Vec3::new(0.988, 0.733, 0.631),
                Vec3::new(0.988, 0.573, 0.447),
                Vec3::new(0.984, 0.416, 0.290),
                Vec3::new(0.937, 0.231, 0.173),
                Vec3::new(0.796, 0.094, 0.114),
                Vec3::new(0.647, 0.059, 0.082),
                Vec3::new(0.404, 0.000, 0.051),
            ],
        ));

        // Rainbow color map
        self.register(ColorMap::new(
            "rainbow",
            vec![
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
        ));
    }

    /// Registers a color map and returns its index.
    ///
    /// A map with an existing name replaces the old one at the same index.
    pub fn register(&mut self, color_map: ColorMap) -> usize {
        match self.color_maps.iter().position(|m| m.name == color_map.name) {
            Some(index) => {
                self.color_maps[index] = color_map;
                index
            }
            None => {
                self.color_maps.push(color_map);
                self.color_maps.len() - 1
            }
        }
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.iter().find(|m| m.name == name)
    }

    /// Gets a color map by index.
    pub fn get_index(&self, index: usize) -> RenderResult<&ColorMap> {
        self.color_maps
            .get(index)
            .ok_or(RenderError::ColorMapIndexOutOfRange {
                index,
                len: self.color_maps.len(),
            })
    }

    /// Returns the index of the named color map.
    pub fn index_of(&self, name: &str) -> RenderResult<usize> {
        self.color_maps
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| RenderError::ColorMapNotFound(name.to_string()))
    }

    /// Index of the configured default map for `data_type`.
    ///
    /// Falls back to the first map if the configured name is unknown.
    pub fn default_index(&self, data_type: DataType, options: &ScalarOptions) -> usize {
        let name = options.default_color_map(data_type);
        self.index_of(name).unwrap_or_else(|err| {
            log::warn!("{err}; using '{}' for {data_type:?} data", self.names().next().unwrap_or("none"));
            0
        })
    }

    /// Returns all color map names, in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.color_maps.iter().map(|m| m.name.as_str())
    }

    /// Returns the number of registered color maps.
    pub fn len(&self) -> usize {
        self.color_maps.len()
    }

    /// Returns true if no color map is registered.
    pub fn is_empty(&self) -> bool {
        self.color_maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_order() {
        let registry = ColorMapRegistry::new();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["viridis", "coolwarm", "blues", "reds", "rainbow"]);
    }

    #[test]
    fn test_default_index_per_data_type() {
        let registry = ColorMapRegistry::new();
        let options = ScalarOptions::default();
        assert_eq!(registry.default_index(DataType::Standard, &options), 0);
        assert_eq!(registry.default_index(DataType::Symmetric, &options), 1);
        assert_eq!(registry.default_index(DataType::Magnitude, &options), 2);
    }

    #[test]
    fn test_unknown_default_falls_back() {
        let registry = ColorMapRegistry::new();
        let options = ScalarOptions {
            color_map_standard: "nope".to_string(),
            ..ScalarOptions::default()
        };
        assert_eq!(registry.default_index(DataType::Standard, &options), 0);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ColorMapRegistry::new();
        registry.register(ColorMap::new("blues", vec![Vec3::ONE]));
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.index_of("blues"), Ok(2));
        assert_eq!(registry.get("blues").unwrap().colors, vec![Vec3::ONE]);
    }

    #[test]
    fn test_index_errors() {
        let registry = ColorMapRegistry::new();
        assert_eq!(
            registry.get_index(9).unwrap_err(),
            RenderError::ColorMapIndexOutOfRange { index: 9, len: 5 }
        );
        assert_eq!(
            registry.index_of("magma").unwrap_err(),
            RenderError::ColorMapNotFound("magma".to_string())
        );
    }

    #[test]
    fn test_sample_endpoints() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        assert!(approx(map.sample(0.0), Vec3::ZERO));
        assert!(approx(map.sample(1.0), Vec3::ONE));
        assert!(approx(map.sample(0.5), Vec3::splat(0.5)));
        assert!(approx(map.sample(-3.0), Vec3::ZERO));
        assert!(approx(map.sample(7.0), Vec3::ONE));
    }

    #[test]
    fn test_colorize_clamps() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        assert!(approx(colorize(5.0, 0.0, 10.0, &map), Vec3::splat(0.5)));
        assert!(approx(colorize(-100.0, 0.0, 10.0, &map), Vec3::ZERO));
        assert!(approx(colorize(100.0, 0.0, 10.0, &map), Vec3::ONE));
    }

    #[test]
    fn test_colorize_degenerate_range_is_single_color() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        let a = colorize(-1.0, 2.0, 2.0, &map);
        let b = colorize(2.0, 2.0, 2.0, &map);
        let c = colorize(9.0, 2.0, 2.0, &map);
        assert!(approx(a, b) && approx(b, c));
        assert!(approx(colorize(1.0, 3.0, 2.0, &map), a));
    }

    #[test]
    fn test_texture_spans_map() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        let texture = map.to_texture(3);
        assert_eq!(texture, vec![
            [0.0, 0.0, 0.0, 1.0],
            [0.5, 0.5, 0.5, 1.0],
            [1.0, 1.0, 1.0, 1.0]
        ]);
        assert!(map.to_texture(0).is_empty());
        assert_eq!(map.to_texture(1).len(), 1);
    }
}
