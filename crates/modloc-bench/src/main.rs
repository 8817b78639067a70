//! modloc-bench: run module detection over frame images.
//!
//! Each input file is decoded as one frame and searched independently.
//! Useful for:
//!
//! - Checking which frames of an extracted video contain the module
//! - Tuning blur, dilation, and acceptance thresholds
//! - Inspecting why a frame was rejected (`--json` reports metrics)
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin modloc-bench -- [OPTIONS] <FRAMES>...
//! ```

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use modloc_pipeline::{ContourMode, DetectionConfig, DetectionReport};

/// Locate the module in each frame image.
#[derive(Parser)]
#[command(name = "modloc-bench", version)]
struct Cli {
    /// Frame images (PNG, JPEG, BMP, WebP), processed in order.
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Median blur radius (window side is 2 * radius + 1).
    #[arg(long, default_value_t = DetectionConfig::DEFAULT_MEDIAN_RADIUS)]
    median_radius: u32,

    /// Dilation radius of the module mask.
    #[arg(long, default_value_t = DetectionConfig::DEFAULT_DILATE_RADIUS)]
    dilate_radius: u8,

    /// Which contours become candidates.
    #[arg(long, value_enum, default_value_t = Mode::External)]
    contour_mode: Mode,

    /// Lower bound on relative size (exclusive).
    #[arg(long, default_value_t = DetectionConfig::DEFAULT_MIN_RELATIVE_SIZE)]
    min_size: f64,

    /// Upper bound on relative size (exclusive).
    #[arg(long, default_value_t = DetectionConfig::DEFAULT_MAX_RELATIVE_SIZE)]
    max_size: f64,

    /// Upper bound on normalized center distance (exclusive).
    #[arg(long, default_value_t = DetectionConfig::DEFAULT_MAX_CENTERED_DISTANCE)]
    max_distance: f64,

    /// Output one JSON report per frame instead of a text line.
    #[arg(long)]
    json: bool,

    /// Full detection config as a JSON string.
    ///
    /// When provided, all other detection parameter flags are ignored.
    /// Missing fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Contour retrieval mode selection.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Outermost borders only.
    External,
    /// Every border, flat.
    List,
    /// Every border, linked by nesting.
    Tree,
}

/// Build a [`DetectionConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<DetectionConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("error parsing --config-json: {e}"));
    }

    Ok(DetectionConfig {
        median_radius: cli.median_radius,
        dilate_radius: cli.dilate_radius,
        contour_mode: match cli.contour_mode {
            Mode::External => ContourMode::External,
            Mode::List => ContourMode::List,
            Mode::Tree => ContourMode::Tree,
        },
        min_relative_size: cli.min_size,
        max_relative_size: cli.max_size,
        max_centered_distance: cli.max_distance,
        ..DetectionConfig::default()
    })
}

/// One human-readable line per frame.
fn report_line(path: &Path, report: &DetectionReport) -> String {
    let metrics = report.validation.map_or_else(
        || "no candidates".to_owned(),
        |v| {
            format!(
                "size={:.3} dist={:.4}",
                v.relative_size, v.centered_distance
            )
        },
    );
    match report.detection {
        Some(rect) => format!(
            "{}: detected {rect} ({} candidates, {metrics})",
            path.display(),
            report.candidate_count
        ),
        None => format!(
            "{}: none ({} candidates, {metrics})",
            path.display(),
            report.candidate_count
        ),
    }
}

fn run(cli: &Cli, config: &DetectionConfig) -> Result<usize, String> {
    let mut detected = 0;
    for path in &cli.frames {
        let bytes =
            std::fs::read(path).map_err(|e| format!("error reading {}: {e}", path.display()))?;
        let report = modloc_pipeline::process(&bytes, config)
            .map_err(|e| format!("error processing {}: {e}", path.display()))?;

        if report.detection.is_some() {
            detected += 1;
        }
        if cli.json {
            let json = serde_json::to_string(&report)
                .map_err(|e| format!("error serializing report: {e}"))?;
            println!("{json}");
        } else {
            println!("{}", report_line(path, &report));
        }
    }
    Ok(detected)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            tracing::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }
    tracing::info!(frames = cli.frames.len(), ?config, "starting detection");

    match run(&cli, &config) {
        Ok(detected) => {
            tracing::info!(detected, total = cli.frames.len(), "done");
            ExitCode::SUCCESS
        }
        Err(msg) => {
            tracing::error!("{msg}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_config() {
        let cli = Cli::parse_from([
            "modloc-bench",
            "--dilate-radius",
            "3",
            "--contour-mode",
            "tree",
            "--max-size",
            "0.7",
            "a.png",
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.dilate_radius, 3);
        assert_eq!(config.contour_mode, ContourMode::Tree);
        assert!((config.max_relative_size - 0.7).abs() < 1e-12);
        assert_eq!(config.color_bands, DetectionConfig::default().color_bands);
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = Cli::parse_from([
            "modloc-bench",
            "--dilate-radius",
            "3",
            "--config-json",
            r#"{"median_radius": 0}"#,
            "a.png",
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.median_radius, 0);
        assert_eq!(config.dilate_radius, DetectionConfig::DEFAULT_DILATE_RADIUS);
    }

    #[test]
    fn bad_config_json_is_reported() {
        let cli = Cli::parse_from(["modloc-bench", "--config-json", "{", "a.png"]);
        assert!(config_from_cli(&cli).is_err());
    }

    #[test]
    fn frames_are_required() {
        assert!(Cli::try_parse_from(["modloc-bench"]).is_err());
    }
}
