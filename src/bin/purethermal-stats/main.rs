mod args;

use anyhow::Result;
use args::Args;
use rayon::iter::ParallelIterator;
use serde_derive::*;

use purethermal::cli::{process_dumps_par, FrameDump};
use purethermal::stats::Extrema;
use purethermal::{AnalysisDatasets, AnalyzerConfig, FrameAnalyzer};

fn main() -> Result<()> {
    env_logger::init();
    let Args {
        paths,
        geometry,
        config,
    } = Args::from_cmd_line()?;

    let (dumps, cumulative) = process_dumps_par(paths, geometry)
        .map(|try_dump| -> Result<_> {
            let dump = try_dump?;
            DumpAnalysis::from_dump(&dump, config)
        })
        .try_fold(
            || (vec![], Extrema::default()),
            |mut acc, try_item| -> Result<_> {
                let item = try_item?;
                acc.1 += &item.extrema;
                acc.0.push(item);
                Ok(acc)
            },
        )
        .try_reduce(
            || (vec![], Extrema::default()),
            |mut acc1, acc2| -> Result<_> {
                acc1.0.extend(acc2.0);
                acc1.1 += &acc2.1;
                Ok(acc1)
            },
        )?;

    #[derive(Debug, Serialize)]
    struct OutputJson {
        dumps: Vec<DumpAnalysis>,
        cumulative: Extrema,
    }

    serde_json::to_writer(
        std::io::stdout().lock(),
        &OutputJson { dumps, cumulative },
    )?;

    Ok(())
}

#[derive(Serialize, Debug)]
pub struct DumpAnalysis {
    path: String,
    width: usize,
    height: usize,
    frames: usize,
    extrema: Extrema,
    datasets: AnalysisDatasets,
}

impl DumpAnalysis {
    fn from_dump(dump: &FrameDump, config: AnalyzerConfig) -> Result<Self> {
        let mut analyzer = FrameAnalyzer::new(config)?;
        let mut extrema = Extrema::default();
        let mut frames = 0;
        for frame in dump.frames() {
            let datasets = analyzer.analyze(&frame)?;
            for &v in datasets.image.values.iter() {
                extrema += v;
            }
            frames += 1;
        }

        Ok(DumpAnalysis {
            path: dump.path.clone(),
            width: dump.width,
            height: dump.height,
            frames,
            extrema,
            datasets: analyzer.datasets().clone(),
        })
    }
}
