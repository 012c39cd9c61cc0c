//! Parameters of a heightmap run.

use crate::distance_field::{DistanceMethod, Precision};
use crate::error::{HeightmapError, HeightmapResult};
use crate::height::{HeightMapping, Profile, RegionHeights};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// All parameters of the heightmap pipeline.
/// Every field may be omitted in a parameter file.
///
/// ```
/// use heightmap_skeleton::HeightmapParams;
///
/// let params = HeightmapParams::from_json_str(r#"{ "gamma": 2.0, "profile": "rim" }"#).unwrap();
/// assert_eq!(params.threshold, 128);
/// assert_eq!(params.gamma, 2.0);
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeightmapParams {
    /// Pixels at least this bright are foreground.
    pub threshold: u8,

    /// Foreground height on its skeleton.
    pub hfs: f32,

    /// Foreground height at its boundary.
    pub hfc: f32,

    /// Background height on its skeleton.
    pub hbs: f32,

    /// Background height at its boundary.
    pub hbc: f32,

    /// Exponent applied to the relative position.
    pub gamma: f32,

    /// Guards the relative position against division by zero.
    pub eps: f32,

    pub profile: Profile,

    pub distance: DistanceMethod,

    /// Storage of the intermediate distance fields.
    pub precision: Precision,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            threshold: 128,
            hfs: 1.0,
            hfc: 0.6,
            hbs: 0.4,
            hbc: 0.0,
            gamma: 1.0,
            eps: 1e-6,
            profile: Profile::default(),
            distance: DistanceMethod::default(),
            precision: Precision::default(),
        }
    }
}

impl HeightmapParams {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and validate parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> HeightmapResult<Self> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path)
            .map_err(|source| HeightmapError::ConfigRead { path: path.to_path_buf(), source })?;

        let params = Self::from_json_str(&json)
            .map_err(|source| HeightmapError::Config { path: path.to_path_buf(), source })?;

        params.validate()?;
        Ok(params)
    }

    /// Reject parameters that would produce NaN or meaningless heights.
    pub fn validate(&self) -> HeightmapResult<()> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(HeightmapError::invalid_params(format!("gamma must be positive, got {}", self.gamma)));
        }

        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(HeightmapError::invalid_params(format!("eps must not be negative, got {}", self.eps)));
        }

        let heights = [("hfs", self.hfs), ("hfc", self.hfc), ("hbs", self.hbs), ("hbc", self.hbc)];
        for &(name, height) in &heights {
            if !height.is_finite() {
                return Err(HeightmapError::invalid_params(format!("{} must be finite, got {}", name, height)));
            }
        }

        Ok(())
    }

    pub fn foreground(&self) -> RegionHeights {
        RegionHeights { skeleton: self.hfs, contact: self.hfc }
    }

    pub fn background(&self) -> RegionHeights {
        RegionHeights { skeleton: self.hbs, contact: self.hbc }
    }

    pub fn mapping(&self) -> HeightMapping {
        HeightMapping { gamma: self.gamma, eps: self.eps, profile: self.profile }
    }
}
