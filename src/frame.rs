//! Raw frame input view.
//!
//! The capture pipeline hands the analyzer one frame at a time as a
//! borrowed buffer plus explicit geometry and a pixel format tag. Nothing
//! in here is retained past a single [`analyze`](crate::FrameAnalyzer::analyze)
//! call.

use crate::error::AnalyzerError;

/// Pixel format of an incoming raw frame, as tagged by the capture caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16-bit little-endian radiometric samples (centi-Kelvin).
    Gray16Le,
    /// 8-bit samples without physical calibration.
    Gray8,
}

impl PixelFormat {
    /// Parse a caps-style format name as produced by the capture pipeline.
    pub fn from_caps_name(name: &str) -> Result<Self, AnalyzerError> {
        match name {
            "GRAY16_LE" => Ok(PixelFormat::Gray16Le),
            "GRAY8" => Ok(PixelFormat::Gray8),
            other => Err(AnalyzerError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn caps_name(&self) -> &'static str {
        match self {
            PixelFormat::Gray16Le => "GRAY16_LE",
            PixelFormat::Gray8 => "GRAY8",
        }
    }

    /// Bytes per sample on the wire.
    pub fn sample_size(&self) -> usize {
        match self {
            PixelFormat::Gray16Le => 2,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Borrowed sample storage for one frame.
#[derive(Clone, Copy, Debug)]
pub enum Samples<'a> {
    Gray16(&'a [u16]),
    Gray8(&'a [u8]),
}

impl<'a> Samples<'a> {
    pub fn len(&self) -> usize {
        match self {
            Samples::Gray16(s) => s.len(),
            Samples::Gray8(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn format(&self) -> PixelFormat {
        match self {
            Samples::Gray16(_) => PixelFormat::Gray16Le,
            Samples::Gray8(_) => PixelFormat::Gray8,
        }
    }
}

/// One raw frame as delivered by the capture pipeline.
///
/// The sample buffer is owned by the caller for the duration of one
/// analysis call. Validation of the sample count against the declared
/// geometry happens inside `analyze`, so a malformed frame is rejected
/// without disturbing the previous analysis.
#[derive(Clone, Copy, Debug)]
pub struct RawFrame<'a> {
    pub width: usize,
    pub height: usize,
    pub samples: Samples<'a>,
}

impl<'a> RawFrame<'a> {
    pub fn gray16(width: usize, height: usize, samples: &'a [u16]) -> Self {
        RawFrame {
            width,
            height,
            samples: Samples::Gray16(samples),
        }
    }

    pub fn gray8(width: usize, height: usize, samples: &'a [u8]) -> Self {
        RawFrame {
            width,
            height,
            samples: Samples::Gray8(samples),
        }
    }

    /// Sample count the declared geometry calls for.
    pub fn expected_samples(&self) -> usize {
        self.width * self.height
    }
}
