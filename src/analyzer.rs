//! Per-frame analysis pipeline.
//!
//! One [`FrameAnalyzer`] owns every derived buffer and is driven serially
//! by the capture pipeline's delivery thread: frames are processed to
//! completion, in arrival order, and the analyzer holds no queue of its
//! own; backpressure is the producer's problem. `analyze` is a bounded
//! in-place transform; once the frame dimensions stabilize, steady-state
//! frames reuse the buffers allocated when the dimensions were first seen.
//!
//! For a renderer polling from another thread, [`FrameAnalyzer::share`]
//! returns a handle through which every successful analysis publishes an
//! immutable snapshot, so a concurrent reader never observes a
//! half-overwritten buffer.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use itertools::iproduct;
use log::debug;
use serde_derive::*;

use crate::config::AnalyzerConfig;
use crate::dataset::{index_scale, GridDataset};
use crate::error::AnalyzerError;
use crate::fps::FrameRateCounter;
use crate::frame::{RawFrame, Samples};
use crate::histogram::Histogram;
use crate::range::DisplayRange;
use crate::stats::Extrema;
use crate::temperature::{gray16_to_celsius, gray8_to_intensity};

/// The four datasets the rendering layer polls, rebuilt on every frame.
#[derive(Serialize, Clone, Debug)]
pub struct AnalysisDatasets {
    /// Calibrated temperature image with pixel-index scales.
    pub image: GridDataset,
    /// Value histogram over the current display range.
    pub histogram: Histogram,
    /// Per-row bucket counts, shape `(H, N)`; X scale follows the bucket
    /// edges.
    pub row_projection: GridDataset,
    /// Per-column bucket counts, shape `(N, W)`. The bucket axis is
    /// flipped: bucket `k` lives in row `N-1-k`, placing high values at
    /// the top of the rendered strip.
    pub col_projection: GridDataset,
}

/// Analyzes raw thermal frames into chart datasets.
///
/// Owns the temperature image, the adaptive display range, the histogram
/// and both projection grids. State persists across frames; dimension
/// changes mid-stream trigger an explicit reallocation of everything
/// sized by `(W, H)`.
pub struct FrameAnalyzer {
    config: AnalyzerConfig,
    width: usize,
    height: usize,
    range: DisplayRange,
    datasets: AnalysisDatasets,
    fps: FrameRateCounter,
    shared: Option<SharedSnapshot>,
}

impl FrameAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        Ok(FrameAnalyzer {
            config,
            width: 0,
            height: 0,
            range: DisplayRange::new(config.initial_lo, config.initial_hi),
            datasets: AnalysisDatasets {
                image: GridDataset::new(0, 0),
                histogram: Histogram::new(config.resolution),
                row_projection: GridDataset::new(config.resolution, 0),
                col_projection: GridDataset::new(0, config.resolution),
            },
            fps: FrameRateCounter::new(Instant::now()),
            shared: None,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Current display range, as adapted by the frames seen so far.
    pub fn display_range(&self) -> DisplayRange {
        self.range
    }

    /// Datasets from the most recent successful analysis.
    pub fn datasets(&self) -> &AnalysisDatasets {
        &self.datasets
    }

    /// Handle for a concurrent reader.
    ///
    /// Every subsequent successful `analyze` publishes an immutable
    /// snapshot through the handle; failed calls publish nothing. The
    /// single-threaded path never pays for this unless `share` was
    /// called.
    pub fn share(&mut self) -> SharedSnapshot {
        let datasets = &self.datasets;
        self.shared
            .get_or_insert_with(|| SharedSnapshot::seeded(datasets))
            .clone()
    }

    /// Analyze one frame, overwriting the owned datasets in place.
    ///
    /// The frame must be non-empty and carry exactly `width * height`
    /// samples; otherwise the call fails with
    /// [`AnalyzerError::DimensionMismatch`] and every previously produced
    /// dataset, including anything already published through
    /// [`share`](FrameAnalyzer::share), is left untouched.
    pub fn analyze(&mut self, frame: &RawFrame<'_>) -> Result<&AnalysisDatasets, AnalyzerError> {
        let expected = frame.expected_samples();
        if expected == 0 || frame.samples.len() != expected {
            return Err(AnalyzerError::DimensionMismatch {
                expected,
                actual: frame.samples.len(),
            });
        }

        // Cold path: first frame, or the source renegotiated its caps.
        if frame.width != self.width || frame.height != self.height {
            self.resize(frame.width, frame.height);
        }

        // Single pass: calibrate into the image and track the extremes.
        let extrema = match frame.samples {
            Samples::Gray16(s) => self.calibrate(s.iter().map(|&v| gray16_to_celsius(v))),
            Samples::Gray8(s) => self.calibrate(s.iter().map(|&v| gray8_to_intensity(v))),
        };

        self.range
            .adapt(extrema.min, extrema.max, self.config.smoothing_divisor);

        self.datasets.histogram.rebuild(self.range.lo, self.range.hi);
        self.datasets.row_projection.values.fill(0.0);
        self.datasets.col_projection.values.fill(0.0);
        // the value axes of both projections follow the moving edges
        self.datasets
            .row_projection
            .x_scale
            .assign(&self.datasets.histogram.x);
        self.datasets
            .col_projection
            .y_scale
            .assign(&self.datasets.histogram.x);

        self.accumulate();

        if let Some(fps) = self.fps.tick(Instant::now()) {
            debug!("{} FPS", fps);
        }

        if let Some(shared) = &self.shared {
            shared.publish(&self.datasets);
        }

        Ok(&self.datasets)
    }

    fn resize(&mut self, width: usize, height: usize) {
        let n = self.config.resolution;
        self.width = width;
        self.height = height;

        self.datasets.image = GridDataset::new(width, height);
        self.datasets.image.x_scale = index_scale(width);
        self.datasets.image.y_scale = index_scale(height);

        self.datasets.row_projection = GridDataset::new(n, height);
        self.datasets.row_projection.y_scale = index_scale(height);

        self.datasets.col_projection = GridDataset::new(width, n);
        self.datasets.col_projection.x_scale = index_scale(width);
    }

    fn calibrate(&mut self, values: impl Iterator<Item = f64>) -> Extrema {
        let mut extrema = Extrema::default();
        for (dst, value) in self.datasets.image.values.iter_mut().zip(values) {
            extrema += value;
            *dst = value;
        }
        extrema
    }

    fn accumulate(&mut self) {
        let (height, width) = (self.height, self.width);
        let cap = self.config.saturation_cap;
        let n = self.config.resolution;
        let AnalysisDatasets {
            image,
            histogram,
            row_projection,
            col_projection,
        } = &mut self.datasets;

        for (row, col) in iproduct!(0..height, 0..width) {
            if let Some(k) = histogram.bucket_of(image.values[[row, col]]) {
                histogram.record(k);
                bump(&mut row_projection.values[[row, k]], cap);
                bump(&mut col_projection.values[[n - 1 - k, col]], cap);
            }
        }
    }
}

#[inline]
fn bump(cell: &mut f64, cap: Option<f64>) {
    match cap {
        Some(cap) if *cell >= cap => {}
        _ => *cell += 1.0,
    }
}

/// Copy-on-publish handoff for a renderer on another thread.
///
/// The analyzer swaps in a freshly cloned, immutable snapshot after each
/// successful frame; [`latest`](SharedSnapshot::latest) hands out the most
/// recent one. A reader can hold a snapshot indefinitely without blocking
/// the delivery thread beyond the pointer swap.
#[derive(Clone)]
pub struct SharedSnapshot {
    slot: Arc<Mutex<Arc<AnalysisDatasets>>>,
}

impl SharedSnapshot {
    fn seeded(datasets: &AnalysisDatasets) -> Self {
        SharedSnapshot {
            slot: Arc::new(Mutex::new(Arc::new(datasets.clone()))),
        }
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> Arc<AnalysisDatasets> {
        self.lock().clone()
    }

    fn publish(&self, datasets: &AnalysisDatasets) {
        *self.lock() = Arc::new(datasets.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Arc<AnalysisDatasets>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
