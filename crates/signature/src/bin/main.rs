use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use signature::{Pipeline, SignatureConfig};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// Detect signature-like regions in a scanned document image.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input image
    image: PathBuf,

    /// Minimum box area (in pixels) for a candidate region
    #[arg(long, default_value_t = 10_000)]
    min_region_size: i64,

    /// Fraction of the shorter region side trimmed from merged regions
    #[arg(long, default_value_t = 0.1)]
    border_ratio: f64,

    /// Directory to write each cropped mask into, as region_<id>.png
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let image = image::open(&cli.image)?.to_rgb8();
    info!(
        path = %cli.image.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );

    let pipeline = Pipeline::builder()
        .with_config(SignatureConfig {
            min_region_size: cli.min_region_size,
            border_ratio: cli.border_ratio,
        })
        .build();
    let result = pipeline.process(&image)?;

    for (id, region) in result.regions() {
        info!(
            id,
            x = region.x,
            y = region.y,
            w = region.w,
            h = region.h,
            "detected region"
        );
    }

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)?;
        for (id, crop) in &result.crops {
            let path = dir.join(format!("region_{id}.png"));
            crop.mask.save(&path)?;
            info!(path = %path.display(), "saved cropped mask");
        }
    }

    println!("{}", serde_json::json!({ "result": result.region_count() }));
    Ok(())
}
