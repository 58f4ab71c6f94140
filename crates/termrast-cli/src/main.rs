//! Terminal frontend: loads a scene or mesh folder and runs the render
//! loop against the live terminal.

mod input;
mod terminal;

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use termrast_assets::{scene, FsAssetLoader};
use termrast_core::{controller, Composer, Display};
use terminal::TerminalGuard;

/// Cells kept free at the terminal edges.
const SIZE_MARGIN: u16 = 5;

#[derive(Parser)]
#[command(name = "termrast")]
#[command(about = "Software 3D renderer for the terminal", long_about = None)]
struct Cli {
    /// Scene file to load (e.g. assets/scenes/demo.scene)
    scene: Option<PathBuf>,

    /// View a single mesh folder from <assets>/models/ instead of a scene
    #[arg(long, conflicts_with = "scene")]
    model: Option<String>,

    /// Asset root containing models/ and scenes/
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Fixed display width in cells (default: terminal width minus margin)
    #[arg(long)]
    width: Option<u32>,

    /// Fixed display height in cells (default: terminal height minus margin)
    #[arg(long)]
    height: Option<u32>,

    /// Smooth vertex normals on every mesh, regardless of geometry flags
    #[arg(long)]
    force_smooth: bool,

    /// Disable back-face culling
    #[arg(long)]
    no_cull: bool,
}

/// Current display dimensions: explicit overrides win, otherwise the live
/// terminal size minus a margin.
fn frame_size(cli: &Cli) -> (u32, u32) {
    let term = TerminalGuard::size().unwrap_or((100 + SIZE_MARGIN, 40 + SIZE_MARGIN));
    let width = cli
        .width
        .unwrap_or_else(|| u32::from(term.0.saturating_sub(SIZE_MARGIN).max(1)));
    let height = cli
        .height
        .unwrap_or_else(|| u32::from(term.1.saturating_sub(SIZE_MARGIN).max(1)));
    (width, height)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut loader = FsAssetLoader::new(&cli.assets);
    loader.force_smooth = cli.force_smooth;

    let (width, height) = frame_size(&cli);
    let mut display = Display::new(width, height);

    match (&cli.scene, &cli.model) {
        (Some(path), _) => {
            scene::load_scene(&mut display, path, &mut loader)
                .with_context(|| format!("loading scene {}", path.display()))?;
        }
        (None, Some(folder)) => {
            let mesh = loader
                .load_mesh_fatal(folder)
                .with_context(|| format!("loading mesh folder {folder}"))?;
            display.meshes.push(mesh);
        }
        (None, None) => bail!("nothing to render: pass a scene file or --model <folder>"),
    }

    log::info!(
        "termrast: {} meshes, {} lights, {}x{} cells",
        display.meshes.len(),
        display.lights.len(),
        display.width,
        display.height
    );

    // Raw mode + alternate screen; restored on drop even when a later
    // error unwinds out of the loop.
    let _guard = TerminalGuard::enter().context("terminal setup failed")?;

    let mut input = input::TerminalInput::new();
    let mut composer = Composer::new(terminal::RawWriter::new(std::io::stdout()));
    composer.backface_culling = !cli.no_cull;

    while display.running {
        let (width, height) = frame_size(&cli);
        display.width = width;
        display.height = height;

        controller::update(&mut display, &mut input);
        composer
            .render_frame(&mut display, &mut loader)
            .context("frame write failed")?;
        std::thread::sleep(Duration::from_millis(1));
    }

    log::info!("termrast: clean shutdown after {} frames", display.frame_count);
    Ok(())
}
