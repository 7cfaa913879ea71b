//! contrim: trace the contours of an image, reduce their vertices, and
//! draw both versions over the original for comparison.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin contrim -- [OPTIONS] <IMAGE_PATH>
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use contrim_pipeline::{PipelineConfig, PipelineError, ProcessResult};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Trace image contours, reduce their vertices, and draw the result.
///
/// Original contours are drawn in green, simplified contours in red.
#[derive(Parser, Debug)]
#[command(name = "contrim", version)]
struct Args {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Output image path.
    #[arg(short, long, default_value = "contours.png")]
    output: PathBuf,

    /// Simplification tolerance in pixels.
    #[arg(short = 'd', long, default_value_t = PipelineConfig::DEFAULT_TOLERANCE, allow_negative_numbers = true)]
    tolerance: f64,

    /// Binary threshold: gray values above this are foreground.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Invert the thresholded image before tracing.
    #[arg(long)]
    invert: bool,

    /// Stroke width in pixels for drawn contours.
    #[arg(long, default_value_t = 2.0)]
    line_width: f32,

    /// Skip drawing the original contours; draw only the simplified ones.
    #[arg(long)]
    simplified_only: bool,

    /// Also write the full result (contours, hierarchy, stats) as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, `--tolerance`, `--threshold` and `--invert` are
    /// ignored. Missing fields take their default values.
    #[arg(long)]
    config_json: Option<String>,
}

/// Everything that can stop a run.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("image: {0}")]
    Image(#[from] image::ImageError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot render a {width}x{height} image")]
    Render { width: u32, height: u32 },
}

/// Build a [`PipelineConfig`] from the command line.
///
/// `--config-json` wins over the individual flags.
fn config_from_args(args: &Args) -> Result<PipelineConfig, CliError> {
    if let Some(ref json) = args.config_json {
        return Ok(serde_json::from_str(json)?);
    }

    Ok(PipelineConfig {
        threshold: args.threshold,
        invert: args.invert,
        tolerance: args.tolerance,
    })
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Save the annotated image, dropping alpha for formats that cannot store it.
fn save_canvas(canvas: RgbaImage, path: &Path) -> Result<(), CliError> {
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgba8(canvas).to_rgb8().save(path)?,
        _ => canvas.save(path)?,
    }
    Ok(())
}

fn report(result: &ProcessResult) {
    if let (Some(before), Some(after)) = (result.contours.first(), result.simplified.first()) {
        tracing::info!(
            original = before.len(),
            simplified = after.len(),
            "first contour points"
        );
    }
    let stats = result.stats;
    tracing::info!(
        contours = stats.contours,
        points_before = stats.points_before,
        points_after = stats.points_after,
        "removed {:.1}% of points",
        stats.reduction_ratio() * 100.0,
    );
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = config_from_args(args)?;
    tracing::debug!(?config, "pipeline configuration");

    tracing::info!("reading {}", args.image_path.display());
    let image_bytes = read(&args.image_path)?;

    let result = contrim_pipeline::process(&image_bytes, &config)?;
    report(&result);

    let mut canvas = image::load_from_memory(&image_bytes)?.to_rgba8();
    let (width, height) = canvas.dimensions();

    let mut layers = Vec::with_capacity(2);
    if !args.simplified_only {
        layers.push((&result.contours, render::GREEN));
    }
    layers.push((&result.simplified, render::RED));

    for (contours, color) in layers {
        let overlay = render::render_contours(contours, width, height, color, args.line_width)
            .ok_or(CliError::Render { width, height })?;
        render::composite(&mut canvas, &overlay);
    }

    tracing::info!("saving {}", args.output.display());
    save_canvas(canvas, &args.output)?;

    if let Some(ref json_path) = args.json {
        let json = serde_json::to_vec_pretty(&result)?;
        write(json_path, &json)?;
        tracing::info!("wrote {}", json_path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
