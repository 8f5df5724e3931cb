mod cli;
mod logger;

use anyhow::Context;
use bulbtracer::{renderer, scene, Setup};
use clap::Parser;
use cli::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use logger::init_logger;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    let mut setup = match &args.scene {
        Some(path) => scene::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => Setup::reference(),
    };
    if let Some(output) = args.output {
        setup.render.output = output;
    }
    if let Some(resolution) = args.resolution {
        setup.render.resolution = resolution;
    }
    if let Some(msaa) = args.msaa {
        setup.render.msaa_multiplier = msaa;
    }
    setup.validate()?;
    setup.log_summary();

    info!(
        "rendering {0}x{0} (msaa x{1}) with {2} objects and {3} lights",
        setup.render.resolution,
        setup.render.msaa_multiplier,
        setup.scene.objects.len(),
        setup.scene.lights.len()
    );

    let bar = if !args.quiet {
        let pb = ProgressBar::new(renderer::total_rows(&setup));
        pb.set_style(ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} rows | {elapsed_precise} | ETA: {eta}")?);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    renderer::render_to_file(&setup, bar.as_ref(), args.keep_levels)?;

    if let Some(b) = bar {
        b.finish_with_message("Rendering complete");
    }
    info!("Saved → {} in {:.2?}", setup.render.output.display(), start.elapsed());
    Ok(())
}
