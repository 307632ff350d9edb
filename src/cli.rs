//! Helpers to parse CLI arguments and load recorded frame
//! dumps in the accompanying binaries.
//!
//! APIs here shouldn't be considered stable / used as a
//! library.

use std::{fs::File, io::Read, path::Path};

use anyhow::{anyhow, ensure, Context, Result};
pub use clap::{App, Arg};
use indicatif::{ProgressBar, ProgressStyle};
pub use inflector::Inflector;
use itertools::Either;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use zerocopy::AsBytes;

use crate::frame::{PixelFormat, RawFrame};

#[macro_export]
macro_rules! args_parser {
    ($name:expr) => {{
        $crate::cli::App::new($name)
            .version(clap::crate_version!())
            .author(clap::crate_authors!())
    }};
}

#[macro_export]
macro_rules! arg {
    ($name:expr) => {{
        use $crate::cli::Inflector;
        $crate::cli::Arg::with_name($name).value_name(&$name.to_screaming_snake_case())
    }};
}

#[macro_export]
macro_rules! opt {
    ($name:expr) => {{
        use $crate::cli::Inflector;
        $crate::cli::Arg::with_name($name)
            .long(&$name.to_kebab_case())
            .value_name(&$name.to_screaming_snake_case())
    }};
}

/// Frame geometry for a dump: parsed from the file name
/// (`capture_160x120.gray16le.raw`) unless forced by flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct DumpGeometry {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub format: Option<PixelFormat>,
}

enum DumpSamples {
    Gray16(Vec<u16>),
    Gray8(Vec<u8>),
}

/// A recorded sequence of raw frames read from one dump file.
pub struct FrameDump {
    pub path: String,
    pub width: usize,
    pub height: usize,
    samples: DumpSamples,
}

impl FrameDump {
    pub fn from_path(path: &Path, geometry: &DumpGeometry) -> Result<Self> {
        let parsed = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(path_helpers::parse);

        let width = geometry.width.or_else(|| parsed.map(|p| p.0)).ok_or_else(|| {
            anyhow!(
                "{}: frame width not in file name, pass --width",
                path.display()
            )
        })?;
        let height = geometry.height.or_else(|| parsed.map(|p| p.1)).ok_or_else(|| {
            anyhow!(
                "{}: frame height not in file name, pass --height",
                path.display()
            )
        })?;
        let format = geometry.format.or_else(|| parsed.map(|p| p.2)).ok_or_else(|| {
            anyhow!(
                "{}: pixel format not in file name, pass --format",
                path.display()
            )
        })?;
        ensure!(
            width > 0 && height > 0,
            "{}: degenerate geometry {}x{}",
            path.display(),
            width,
            height
        );

        let mut file =
            File::open(path).with_context(|| format!("could not open {}", path.display()))?;
        let samples = match format {
            PixelFormat::Gray16Le => {
                let bytes = file.metadata()?.len() as usize;
                ensure!(
                    bytes % 2 == 0,
                    "{}: odd byte count {} for GRAY16_LE",
                    path.display(),
                    bytes
                );
                let mut samples: Vec<u16> = vec![0; bytes / 2];
                file.read_exact(samples.as_bytes_mut())?;
                // dumps are little-endian on the wire
                for s in samples.iter_mut() {
                    *s = u16::from_le(*s);
                }
                DumpSamples::Gray16(samples)
            }
            PixelFormat::Gray8 => {
                let mut samples = Vec::new();
                file.read_to_end(&mut samples)?;
                DumpSamples::Gray8(samples)
            }
        };

        let dump = FrameDump {
            path: format!("{}", path.display()),
            width,
            height,
            samples,
        };
        ensure!(
            dump.sample_count() % (width * height) == 0,
            "{}: {} samples is not a whole number of {}x{} frames",
            dump.path,
            dump.sample_count(),
            width,
            height
        );
        ensure!(dump.frame_count() > 0, "{}: no frames", dump.path);
        Ok(dump)
    }

    pub fn format(&self) -> PixelFormat {
        match &self.samples {
            DumpSamples::Gray16(_) => PixelFormat::Gray16Le,
            DumpSamples::Gray8(_) => PixelFormat::Gray8,
        }
    }

    fn sample_count(&self) -> usize {
        match &self.samples {
            DumpSamples::Gray16(s) => s.len(),
            DumpSamples::Gray8(s) => s.len(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.sample_count() / (self.width * self.height)
    }

    /// Iterate the dump's frames in recorded order.
    pub fn frames(&self) -> impl Iterator<Item = RawFrame<'_>> {
        let per_frame = self.width * self.height;
        let (width, height) = (self.width, self.height);
        match &self.samples {
            DumpSamples::Gray16(s) => Either::Left(
                s.chunks_exact(per_frame)
                    .map(move |chunk| RawFrame::gray16(width, height, chunk)),
            ),
            DumpSamples::Gray8(s) => Either::Right(
                s.chunks_exact(per_frame)
                    .map(move |chunk| RawFrame::gray8(width, height, chunk)),
            ),
        }
    }
}

/// Load many dumps in parallel, with progress.
pub fn process_dumps_par(
    paths: Vec<String>,
    geometry: DumpGeometry,
) -> impl ParallelIterator<Item = Result<FrameDump>> {
    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {wide_bar:cyan/blue} {pos:>7}/{len:7}"),
    );

    paths
        .into_par_iter()
        .map(move |p| FrameDump::from_path(Path::new(&p), &geometry))
        .inspect(move |_| bar.inc(1))
}

mod path_helpers {
    use lazy_static::lazy_static;
    use regex::Regex;

    use crate::frame::PixelFormat;

    /// `<anything>_160x120.gray16le.raw` style geometry suffix.
    pub(super) fn parse(name: &str) -> Option<(usize, usize, PixelFormat)> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"(?i)(\d+)x(\d+)\.(gray16le|gray8)\.raw$").unwrap();
        }

        let caps = RE.captures(name)?;
        let width = caps[1].parse().ok()?;
        let height = caps[2].parse().ok()?;
        let format = match caps[3].to_ascii_lowercase().as_str() {
            "gray16le" => PixelFormat::Gray16Le,
            "gray8" => PixelFormat::Gray8,
            _ => return None,
        };
        Some((width, height, format))
    }
}
