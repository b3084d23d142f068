//! Weighted histogram of scalar data.
//!
//! Each value carries a geometric weight (vertex area, face area, edge
//! length), so the bar heights show how much of the surface a value range
//! covers rather than how many elements fall in it. The histogram also
//! remembers which colormap and which sub-range it is displayed with.

use glam::Vec3;

use crate::color_maps::{colorize, ColorMap};
use crate::error::{RenderError, RenderResult};

/// Default number of histogram bins.
pub const DEFAULT_BIN_COUNT: usize = 50;

/// A fixed-bin, weight-accumulating histogram.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: Vec<f64>,
    data_min: f64,
    data_max: f64,
    total_weight: f64,
    dropped_weight: f64,
    color_map: ColorMap,
    colormap_range_min: f64,
    colormap_range_max: f64,
    needs_redraw: bool,
}

impl Histogram {
    /// Creates an empty histogram with `bin_count` bins (at least one).
    pub fn new(bin_count: usize, color_map: ColorMap) -> Self {
        if bin_count == 0 {
            log::warn!("histogram requested with zero bins, using one");
        }
        Self {
            bins: vec![0.0; bin_count.max(1)],
            data_min: 0.0,
            data_max: 0.0,
            total_weight: 0.0,
            dropped_weight: 0.0,
            color_map,
            colormap_range_min: 0.0,
            colormap_range_max: 0.0,
            needs_redraw: true,
        }
    }

    /// Rebins the histogram from `values` and their `weights`.
    ///
    /// Bins evenly cover `[min, max]` of the finite values. Infinities are
    /// counted in the end bins, `+inf` in the last and `-inf` in the first.
    /// NaN lands in no bin; its weight is reported by
    /// [`dropped_weight`](Self::dropped_weight). On error nothing changes.
    pub fn build(&mut self, values: &[f64], weights: &[f64]) -> RenderResult<()> {
        if values.len() != weights.len() {
            return Err(RenderError::WeightCountMismatch {
                values: values.len(),
                weights: weights.len(),
            });
        }

        let (min, max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let (min, max) = if min > max { (0.0, 0.0) } else { (min, max) };

        let n = self.bins.len();
        let mut bins = vec![0.0; n];
        let mut total = 0.0;
        let mut dropped = 0.0;
        for (&value, &weight) in values.iter().zip(weights) {
            if value.is_nan() {
                dropped += weight;
                continue;
            }
            let bin = if value == f64::INFINITY {
                n - 1
            } else if value == f64::NEG_INFINITY {
                0
            } else if max > min {
                let t = (value - min) / (max - min);
                ((t * n as f64).floor() as usize).min(n - 1)
            } else {
                0
            };
            bins[bin] += weight;
            total += weight;
        }

        self.bins = bins;
        self.data_min = min;
        self.data_max = max;
        self.total_weight = total;
        self.dropped_weight = dropped;
        self.needs_redraw = true;
        Ok(())
    }

    /// Switches the display gradient without rebinning.
    pub fn update_colormap(&mut self, color_map: &ColorMap) {
        if self.color_map != *color_map {
            self.color_map = color_map.clone();
            self.needs_redraw = true;
        }
    }

    /// Sets the highlighted sub-range. Does not rebin.
    pub fn set_display_range(&mut self, min: f64, max: f64) {
        self.colormap_range_min = min;
        self.colormap_range_max = max;
    }

    /// Returns the highlighted sub-range.
    pub fn display_range(&self) -> (f64, f64) {
        (self.colormap_range_min, self.colormap_range_max)
    }

    /// Returns the colormap the bars are drawn with.
    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    /// Returns the accumulated weight of each bin.
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Returns the number of bins.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Returns the value domain covered by the bins.
    pub fn data_range(&self) -> (f64, f64) {
        (self.data_min, self.data_max)
    }

    /// Returns the value interval of bin `i`.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let width = (self.data_max - self.data_min) / self.bins.len() as f64;
        (
            self.data_min + width * i as f64,
            self.data_min + width * (i + 1) as f64,
        )
    }

    /// Sum of all binned weight.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Weight of values that were not finite and so not binned.
    pub fn dropped_weight(&self) -> f64 {
        self.dropped_weight
    }

    /// Bar heights scaled so the tallest bar is 1.
    pub fn normalized_heights(&self) -> Vec<f32> {
        let tallest = self.bins.iter().copied().fold(0.0, f64::max);
        if tallest <= 0.0 {
            return vec![0.0; self.bins.len()];
        }
        self.bins.iter().map(|&b| (b / tallest) as f32).collect()
    }

    /// Color of each bar: its bin center mapped over the display range.
    pub fn bar_colors(&self) -> Vec<Vec3> {
        (0..self.bins.len())
            .map(|i| {
                let (lo, hi) = self.bin_range(i);
                colorize(
                    0.5 * (lo + hi),
                    self.colormap_range_min,
                    self.colormap_range_max,
                    &self.color_map,
                )
            })
            .collect()
    }

    /// Returns whether bins or colormap changed since the last redraw.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clears the redraw flag, returning its previous value.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
