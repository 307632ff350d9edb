//! Analyzer configuration.

use serde_derive::*;

use crate::error::AnalyzerError;

/// Tunables for a [`FrameAnalyzer`](crate::FrameAnalyzer).
///
/// The defaults are the radiometric GRAY16_LE profile the viewer ships
/// with: 128 buckets, fast range adaptation, projection cells saturating
/// at 16. [`legacy_gray8`](AnalyzerConfig::legacy_gray8) is the older
/// slow-adapting profile used with uncalibrated 8-bit sources.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of histogram buckets, which is also the length of the
    /// projection value axis.
    pub resolution: usize,

    /// Divisor of the display-range update; larger adapts slower.
    /// Observed deployments use 4 (fast) and 32 (slow).
    pub smoothing_divisor: f64,

    /// Display range before any frame has been processed.
    pub initial_lo: f64,
    pub initial_hi: f64,

    /// Per-cell ceiling for the projection grids, bounding color-scale
    /// saturation. `None` leaves the cells uncapped.
    pub saturation_cap: Option<f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            resolution: 128,
            smoothing_divisor: 4.0,
            initial_lo: 0.0,
            initial_hi: 10.0,
            saturation_cap: Some(16.0),
        }
    }
}

impl AnalyzerConfig {
    /// Slow-adapting profile for uncalibrated GRAY8 sources.
    pub fn legacy_gray8() -> Self {
        AnalyzerConfig {
            resolution: 128,
            smoothing_divisor: 32.0,
            initial_lo: 0.0,
            initial_hi: 1.0,
            saturation_cap: None,
        }
    }

    /// Reject configurations the analyzer cannot run with.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.resolution < 2 {
            return Err(AnalyzerError::InvalidRange(format!(
                "resolution {} leaves no usable bucket",
                self.resolution
            )));
        }
        if !(self.smoothing_divisor > 0.0) {
            return Err(AnalyzerError::InvalidRange(format!(
                "smoothing divisor must be positive, got {}",
                self.smoothing_divisor
            )));
        }
        if !(self.initial_lo < self.initial_hi) {
            return Err(AnalyzerError::InvalidRange(format!(
                "initial range [{}, {}] is empty",
                self.initial_lo, self.initial_hi
            )));
        }
        if let Some(cap) = self.saturation_cap {
            if !(cap > 0.0) {
                return Err(AnalyzerError::InvalidRange(format!(
                    "saturation cap must be positive, got {}",
                    cap
                )));
            }
        }
        Ok(())
    }
}
