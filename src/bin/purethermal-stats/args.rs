use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::value_t_or_exit;
use purethermal::cli::DumpGeometry;
use purethermal::frame::PixelFormat;
use purethermal::{arg, args_parser, opt, AnalyzerConfig};

pub struct Args {
    pub paths: Vec<String>,
    pub geometry: DumpGeometry,
    pub config: AnalyzerConfig,
}

impl Args {
    pub fn from_cmd_line() -> Result<Args> {
        let matches = args_parser!("purethermal-stats")
            .about("Replay raw thermal frame dumps and compute analysis datasets.")
            .arg(
                opt!("width")
                    .short("W")
                    .help("Frame width (default: parsed from file names)"),
            )
            .arg(
                opt!("height")
                    .short("H")
                    .help("Frame height (default: parsed from file names)"),
            )
            .arg(
                opt!("format")
                    .short("f")
                    .help("Pixel format, GRAY16_LE or GRAY8 (default: parsed from file names)"),
            )
            .arg(
                opt!("config")
                    .short("C")
                    .help("Analyzer configuration JSON file (flags below override it)"),
            )
            .arg(
                opt!("resolution")
                    .short("r")
                    .help("Histogram resolution.  Default is 128"),
            )
            .arg(
                opt!("divisor")
                    .short("k")
                    .help("Display range smoothing divisor.  Default is 4"),
            )
            .arg(
                opt!("cap")
                    .short("c")
                    .help("Projection saturation cap, or `none`.  Default is 16"),
            )
            .arg(
                arg!("paths")
                    .required(true)
                    .multiple(true)
                    .help("Raw frame dump paths"),
            )
            .get_matches();

        let paths = matches
            .values_of("paths")
            .unwrap()
            .map(|f| f.into())
            .collect();

        let geometry = DumpGeometry {
            width: matches
                .is_present("width")
                .then(|| value_t_or_exit!(matches.value_of("width"), usize)),
            height: matches
                .is_present("height")
                .then(|| value_t_or_exit!(matches.value_of("height"), usize)),
            format: match matches.value_of("format") {
                Some(name) => Some(PixelFormat::from_caps_name(name)?),
                None => None,
            },
        };

        let defaults = match matches.value_of("config") {
            Some(path) => read_config_file(Path::new(path))?,
            None => AnalyzerConfig::default(),
        };
        let config = AnalyzerConfig {
            resolution: matches
                .is_present("resolution")
                .then(|| value_t_or_exit!(matches.value_of("resolution"), usize))
                .unwrap_or(defaults.resolution),
            smoothing_divisor: matches
                .is_present("divisor")
                .then(|| value_t_or_exit!(matches.value_of("divisor"), f64))
                .unwrap_or(defaults.smoothing_divisor),
            saturation_cap: match matches.value_of("cap") {
                None => defaults.saturation_cap,
                Some("none") => None,
                Some(v) => match v.parse() {
                    Ok(cap) => Some(cap),
                    Err(_) => bail!("--cap takes a number or `none`, got `{}`", v),
                },
            },
            ..defaults
        };

        Ok(Args {
            paths,
            geometry,
            config,
        })
    }
}

fn read_config_file(path: &Path) -> Result<AnalyzerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}
