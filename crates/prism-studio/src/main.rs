mod args;
mod canvas;

use anyhow::{Context, Result};
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::paint::Color;
use prism_engine::pipeline::load_config;
use prism_engine::raster::{Framebuffer, Topology};
use prism_engine::{PassthroughStage, Pipeline, PipelineConfig};

use args::StudioArgs;
use canvas::CANVAS;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = StudioArgs::parse(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };

    let pipeline = Pipeline::build(config, PassthroughStage).context("pipeline setup failed")?;

    let bytes = pipeline.encode(&CANVAS);
    let buffer = pipeline.bind(&bytes)?;

    let mut target = Framebuffer::new(args.width, args.height, Color::black());
    let stats = pipeline.draw(&buffer, Topology::TriangleList, &mut target);
    log::info!(
        "drew {} triangles, {} fragments into {}x{}",
        stats.triangles,
        stats.fragments,
        args.width,
        args.height
    );

    let image = image::RgbaImage::from_raw(args.width, args.height, target.to_rgba8())
        .context("framebuffer size does not match image size")?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("wrote {}", args.output.display());
    Ok(())
}
