//! Configuration options for meshscope.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quantity::DataType;
use crate::range::DEFAULT_TRIM_FRACTION;

/// Global configuration options for meshscope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Options {
    /// Defaults applied to newly created scalar quantities.
    pub scalar: ScalarOptions,
}

impl Options {
    /// Parses options from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&text)?;
        log::debug!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Settings used when a scalar quantity is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalarOptions {
    /// Fraction of values trimmed from each end when estimating the data range.
    pub range_trim_fraction: f64,

    /// Number of histogram bins.
    pub histogram_bins: usize,

    /// Colormap for [`DataType::Standard`] data.
    pub color_map_standard: String,

    /// Colormap for [`DataType::Symmetric`] data.
    pub color_map_symmetric: String,

    /// Colormap for [`DataType::Magnitude`] data.
    pub color_map_magnitude: String,
}

impl Default for ScalarOptions {
    fn default() -> Self {
        Self {
            range_trim_fraction: DEFAULT_TRIM_FRACTION,
            histogram_bins: 50,
            color_map_standard: "viridis".to_string(),
            color_map_symmetric: "coolwarm".to_string(),
            color_map_magnitude: "blues".to_string(),
        }
    }
}

impl ScalarOptions {
    /// Name of the default colormap for the given data type.
    pub fn default_color_map(&self, data_type: DataType) -> &str {
        match data_type {
            DataType::Standard => &self.color_map_standard,
            DataType::Symmetric => &self.color_map_symmetric,
            DataType::Magnitude => &self.color_map_magnitude,
        }
    }
}
