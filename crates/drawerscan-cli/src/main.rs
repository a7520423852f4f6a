// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drawerscan: straighten a drawer photo from the command line.
//
// Entry point. Initialises logging, loads configuration, runs the
// rectification pipeline, and writes the encoded raster plus its JSON record.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use drawerscan_core::error::Result;
use drawerscan_core::human_errors::humanize_error;
use drawerscan_core::{CompanionMetadata, ExifSummary, PhysicalDimensions, Point2D, RectifyConfig};
use drawerscan_rectify::raster::codec;
use drawerscan_rectify::{OutputFormat, Rectifier};
use tracing::info;

/// Rectify a photo of a drawer into a flat, upright, optionally to-scale image.
#[derive(Debug, Parser)]
#[command(name = "drawerscan", version)]
struct Cli {
    /// Path to the drawer photo (JPEG, PNG, ...).
    image: PathBuf,

    /// The drawer's four corners in source pixels, any order: "x,y x,y x,y x,y".
    #[arg(long, allow_hyphen_values = true)]
    corners: Corners,

    /// Inside width of the drawer in millimetres.
    #[arg(long, requires = "length_mm")]
    width_mm: Option<f64>,

    /// Inside length (front to back) of the drawer in millimetres.
    #[arg(long, requires = "width_mm")]
    length_mm: Option<f64>,

    /// Output pixels per millimetre when the drawer size is known.
    #[arg(long)]
    resolution: Option<f64>,

    /// Longest output side when the size is estimated from the corners.
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Upper bound on output width * height.
    #[arg(long)]
    pixel_budget: Option<u64>,

    /// JSON configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the rectified image [default: <IMAGE stem>_rectified.jpg].
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write PNG (keeps the transparent border) instead of JPEG.
    #[arg(long)]
    png: bool,

    /// Write the JSON record here instead of stdout.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Focal length from the photo's EXIF, passed through to the record.
    #[arg(long)]
    focal_length_mm: Option<f64>,

    /// Aperture from the photo's EXIF, passed through to the record.
    #[arg(long)]
    f_number: Option<f64>,

    /// ISO from the photo's EXIF, passed through to the record.
    #[arg(long)]
    iso: Option<u32>,
}

/// Four corner points parsed from `"x,y x,y x,y x,y"`.
#[derive(Debug, Clone, PartialEq)]
struct Corners(Vec<Point2D>);

impl FromStr for Corners {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let points = s
            .split_whitespace()
            .map(|pair| {
                let (x, y) = pair
                    .split_once(',')
                    .ok_or_else(|| format!("expected x,y but got {pair:?}"))?;
                let x: f64 = x.trim().parse().map_err(|_| format!("bad x in {pair:?}"))?;
                let y: f64 = y.trim().parse().map_err(|_| format!("bad y in {pair:?}"))?;
                Ok(Point2D::new(x, y))
            })
            .collect::<std::result::Result<Vec<_>, String>>()?;
        if points.len() != 4 {
            return Err(format!("expected 4 corners, got {}", points.len()));
        }
        Ok(Self(points))
    }
}

/// Where the outputs of one run ended up.
#[derive(Debug)]
struct Written {
    image: PathBuf,
    record: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(written) => {
            info!(
                image = %written.image.display(),
                record = ?written.record,
                "Rectified image written"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Written> {
    let rectifier = Rectifier::new(load_config(cli)?)?;
    let format = if cli.png {
        OutputFormat::Png
    } else {
        OutputFormat::Jpeg {
            quality: rectifier.config().jpeg_quality,
        }
    };

    let physical = match (cli.width_mm, cli.length_mm) {
        (Some(width_mm), Some(length_mm)) => Some(PhysicalDimensions::new(width_mm, length_mm)),
        _ => None,
    };

    let source = codec::open(&cli.image)?;
    let metadata = CompanionMetadata {
        exif: ExifSummary {
            focal_length_mm: cli.focal_length_mm,
            f_number: cli.f_number,
            iso: cli.iso,
        },
        orig_size_px: Some([source.width(), source.height()]),
    };

    let result = rectifier.rectify(&source, &cli.corners.0, physical)?;

    let image_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.image, format));
    fs::write(&image_path, result.encode(format)?)?;

    let json = result.record(&metadata).to_json()?;
    match &cli.record {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(Written {
        image: image_path,
        record: cli.record.clone(),
    })
}

/// Start from defaults or `--config`, then apply flag overrides.
fn load_config(cli: &Cli) -> Result<RectifyConfig> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str::<RectifyConfig>(&fs::read_to_string(path)?)?,
        None => RectifyConfig::default(),
    };
    if let Some(resolution) = cli.resolution {
        config.resolution_px_per_mm = resolution;
    }
    if let Some(max_dimension) = cli.max_dimension {
        config.max_estimation_dimension_px = max_dimension;
    }
    if let Some(budget) = cli.pixel_budget {
        config.pixel_budget = budget;
    }
    config.validate()?;
    Ok(config)
}

/// `photos/drawer.heic` becomes `photos/drawer_rectified.jpg`.
fn default_output_path(image: &Path, format: OutputFormat) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "drawer".into());
    image.with_file_name(format!("{stem}_rectified.{}", format.extension()))
}
