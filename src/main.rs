use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use stagerig::init_logging;
use stagerig_core::fixture_catalog;
use stagerig_core::units::ICON_SIZE_PX;
use stagerig_plot::{
    export_image, load_icon_set, patch, patch_report, render_rider, render_stage, ExportFormat,
    PlotState,
};

/// Stage lighting plot exporter.
#[derive(Parser)]
#[command(name = "stagerig", version, about)]
struct Args {
    /// Plan file to load (JSON)
    plan: PathBuf,

    /// Repack DMX addresses before exporting
    #[arg(long)]
    autopatch: bool,

    /// Write the patch sheet CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a PNG render of the stage to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write a JPEG render of the stage to this path
    #[arg(long)]
    jpeg: Option<PathBuf>,

    /// Write the printable rider HTML to this path
    #[arg(long)]
    rider: Option<PathBuf>,

    /// Save the plan back to this path after processing
    #[arg(long)]
    save: Option<PathBuf>,

    /// Directory holding icon asset files
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Render width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Render height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = Args::parse();

    let mut state = PlotState::new();
    state.load_from_file(&args.plan)?;

    if args.autopatch {
        state.auto_patch();
        info!(universes = ?state.universes_in_use(), "addresses repacked");
    }
    for error in patch::validate_patch(&state.items) {
        warn!(%error, "patch problem");
    }

    if let Some(path) = &args.csv {
        fs::write(path, patch_report::to_csv(&state.items))
            .with_context(|| format!("writing patch sheet to {}", path.display()))?;
        info!(path = %path.display(), "patch sheet written");
    }

    if args.png.is_some() || args.jpeg.is_some() {
        let types: Vec<_> = fixture_catalog().iter().collect();
        let icons = load_icon_set(&types, ICON_SIZE_PX as u32, &args.assets)?;
        let pixmap = render_stage(&state, &icons, args.width, args.height)?;

        if let Some(path) = &args.png {
            let bytes = export_image(&pixmap, ExportFormat::Png)?;
            fs::write(path, bytes)
                .with_context(|| format!("writing image to {}", path.display()))?;
            info!(path = %path.display(), "stage image written");
        }
        if let Some(path) = &args.jpeg {
            let bytes = export_image(&pixmap, ExportFormat::Jpeg)?;
            fs::write(path, bytes)
                .with_context(|| format!("writing image to {}", path.display()))?;
            info!(path = %path.display(), "stage image written");
        }
    }

    if let Some(path) = &args.rider {
        // The rider references the exported image by file name; it is
        // expected to sit next to the rider HTML.
        let image_href = args
            .png
            .as_deref()
            .or(args.jpeg.as_deref())
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());
        let html = render_rider(&state, image_href.as_deref());
        fs::write(path, html).with_context(|| format!("writing rider to {}", path.display()))?;
        info!(path = %path.display(), "rider written");
    }

    if let Some(path) = &args.save {
        state.save_to_file(path)?;
    }

    Ok(())
}
