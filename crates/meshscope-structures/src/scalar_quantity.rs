//! State shared by every scalar quantity.
//!
//! [`ScalarQuantity`] owns what does not depend on which mesh element the
//! values live on: the data type, the selected colormap, the estimated data
//! range, the user-adjustable visualization range, the enabled flag and the
//! weighted histogram. Element-specific behavior lives in the surface mesh
//! module.

use std::path::Path;

use meshscope_core::quantity::{DataType, QuantityId};
use meshscope_core::{robust_min_max, MeshscopeError, Result, ScalarOptions};
use meshscope_render::{ColorMap, ColorMapRegistry, Histogram, ScalarUniforms};

/// Where a new quantity takes its colormap and histogram settings from.
#[derive(Debug, Clone, Copy)]
pub struct ColorSetup<'a> {
    /// Registry the default colormap is picked from.
    pub color_maps: &'a ColorMapRegistry,
    pub options: &'a ScalarOptions,
}

/// Scalar data mapped through a colormap.
#[derive(Debug, Clone)]
pub struct ScalarQuantity {
    name: String,
    structure_name: String,
    id: QuantityId,
    data_type: DataType,
    color_map: usize,
    data_range: (f64, f64),
    viz_range: (f64, f64),
    enabled: bool,
    histogram: Histogram,
}

impl ScalarQuantity {
    /// Creates the shared state from values and their element weights.
    ///
    /// The data range is estimated once here and never changes afterwards.
    /// The visualization range starts at its reset value.
    pub fn new(
        name: impl Into<String>,
        structure_name: impl Into<String>,
        id: QuantityId,
        data_type: DataType,
        values: &[f64],
        weights: &[f64],
        setup: ColorSetup<'_>,
    ) -> Result<Self> {
        let ColorSetup {
            color_maps,
            options,
        } = setup;
        let color_map = color_maps.default_index(data_type, options);
        let map = color_maps
            .get_index(color_map)
            .map_err(|e| MeshscopeError::RenderError(e.to_string()))?;

        let mut histogram = Histogram::new(options.histogram_bins, map.clone());
        histogram
            .build(values, weights)
            .map_err(|e| MeshscopeError::RenderError(e.to_string()))?;

        let mut quantity = Self {
            name: name.into(),
            structure_name: structure_name.into(),
            id,
            data_type,
            color_map,
            data_range: robust_min_max(values, options.range_trim_fraction),
            viz_range: (0.0, 0.0),
            enabled: false,
            histogram,
        };
        quantity.reset_viz_range();
        Ok(quantity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structure_name(&self) -> &str {
        &self.structure_name
    }

    pub fn id(&self) -> QuantityId {
        self.id
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Index of the selected colormap in the parent's registry.
    pub fn color_map_index(&self) -> usize {
        self.color_map
    }

    /// Outlier-tolerant `(low, high)` of the data.
    pub fn data_range(&self) -> (f64, f64) {
        self.data_range
    }

    /// Range currently spanned by the colormap.
    pub fn viz_range(&self) -> (f64, f64) {
        self.viz_range
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Picks up new contents of the selected colormap after it was replaced
    /// in the registry.
    pub(crate) fn refresh_color_map(&mut self, color_map: &ColorMap) {
        self.histogram.update_colormap(color_map);
    }

    /// Clears the histogram's redraw flag, returning whether it was set.
    pub fn take_histogram_redraw(&mut self) -> bool {
        self.histogram.take_redraw()
    }

    /// Limits the visualization range may be dragged to.
    pub fn viz_range_bounds(&self) -> (f64, f64) {
        let (low, high) = self.data_range;
        match self.data_type {
            DataType::Standard => (low, high),
            DataType::Symmetric => {
                let m = low.abs().max(high.abs());
                (-m, m)
            }
            DataType::Magnitude => (0.0, high.max(0.0)),
        }
    }

    /// Drag step of the range slider.
    ///
    /// Symmetric ranges step by a hundredth of their half-width, magnitude
    /// ranges by a hundredth of the current upper limit.
    pub fn viz_range_speed(&self) -> f64 {
        let (low, high) = self.viz_range_bounds();
        match self.data_type {
            DataType::Standard => (high - low) / 100.0,
            DataType::Symmetric => high / 100.0,
            DataType::Magnitude => self.viz_range.1 / 100.0,
        }
    }

    /// Restores the visualization range for the data type.
    pub fn reset_viz_range(&mut self) {
        self.viz_range = self.viz_range_bounds();
        self.sync_histogram_range();
    }

    /// Sets the visualization range.
    ///
    /// A reversed pair is reordered and both ends are clamped to
    /// [`viz_range_bounds`](Self::viz_range_bounds). NaN input is ignored.
    pub fn set_viz_range(&mut self, low: f64, high: f64) {
        if low.is_nan() || high.is_nan() {
            log::debug!("ignoring NaN range for '{}'", self.name);
            return;
        }
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let (min, max) = self.viz_range_bounds();
        self.viz_range = (low.clamp(min, max), high.clamp(min, max));
        self.sync_histogram_range();
    }

    /// Uniform values the color program maps through.
    pub fn color_uniforms(&self) -> ScalarUniforms {
        ScalarUniforms::new(self.viz_range.0, self.viz_range.1)
    }

    /// Selects colormap `index` from `color_maps`.
    ///
    /// Returns whether the selection changed; the caller must then mark the
    /// color program stale. An unknown index is ignored.
    pub fn set_color_map(&mut self, index: usize, color_maps: &ColorMapRegistry) -> bool {
        if index == self.color_map {
            return false;
        }
        match color_maps.get_index(index) {
            Ok(map) => {
                self.color_map = index;
                self.histogram.update_colormap(map);
                true
            }
            Err(err) => {
                log::warn!("'{}': {err}, keeping current color map", self.name);
                false
            }
        }
    }

    /// Exporting scalar data is not supported; nothing is written.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        log::warn!(
            "writing '{}' to {} is not implemented for this data type",
            self.name,
            path.display()
        );
        Err(MeshscopeError::NotImplemented(format!(
            "write_to_file for scalar quantity '{}'",
            self.name
        )))
    }

    fn sync_histogram_range(&mut self) {
        self.histogram
            .set_display_range(self.viz_range.0, self.viz_range.1);
    }
}
