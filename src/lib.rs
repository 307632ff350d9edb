//! Library to analyze raw thermal video frames from
//! PureThermal cameras.
//!
//! The capture pipeline delivers radiometric GRAY16_LE (or
//! uncalibrated GRAY8) buffers; this crate turns each one
//! into the four datasets the viewer renders:
//!
//! 1. a calibrated [temperature] image,
//! 2. a value [histogram] over an adaptively tracked
//!    display range,
//! 3. two spatial projections counting pixels per value
//!    bucket along each axis.
//!
//! All derived buffers are owned by one [`FrameAnalyzer`]
//! and overwritten in place frame after frame; steady-state
//! analysis allocates nothing.
//!
//! # Usage
//!
//! Feed frames to an analyzer and read the datasets back:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use purethermal::{AnalyzerConfig, FrameAnalyzer, RawFrame};
//!
//! let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::default())?;
//! let samples = vec![27315u16; 160 * 120];
//! let datasets = analyzer.analyze(&RawFrame::gray16(160, 120, &samples))?;
//! assert_eq!(datasets.image.values[[0, 0]], 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! When a renderer polls from another thread, take a
//! [`share`][FrameAnalyzer::share] handle first; every
//! analyzed frame then publishes an immutable snapshot the
//! reader can hold for as long as it likes:
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! use purethermal::{AnalyzerConfig, FrameAnalyzer, RawFrame};
//!
//! let mut analyzer = FrameAnalyzer::new(AnalyzerConfig::legacy_gray8())?;
//! let reader = analyzer.share();
//!
//! let samples = vec![0u8; 80 * 60];
//! analyzer.analyze(&RawFrame::gray8(80, 60, &samples))?;
//!
//! let snapshot = reader.latest();
//! assert_eq!(snapshot.histogram.y.sum(), (80 * 60) as f64);
//! # Ok(())
//! # }
//! ```
//!
//! [temperature]: crate::temperature
//! [histogram]: crate::histogram

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fps;
pub mod frame;
pub mod histogram;
pub mod range;
pub mod stats;
pub mod temperature;

pub mod cli;

pub use crate::analyzer::{AnalysisDatasets, FrameAnalyzer, SharedSnapshot};
pub use crate::config::AnalyzerConfig;
pub use crate::error::AnalyzerError;
pub use crate::frame::{PixelFormat, RawFrame, Samples};
