#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Waypoint Defence headlessly.

mod autoplay;
mod config_file;
mod text_backend;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use waypoint_defence_rendering::{
    Color, HudPresentation, PathPresentation, Presentation, RenderingBackend, Scene,
    TileGridPresentation,
};
use waypoint_defence_session::Session;

use crate::{
    autoplay::Autoplay,
    config_file::{SessionFile, TowerPlacement},
    text_backend::TextBackend,
};

/// Runs a Waypoint Defence session without a window, printing its progress.
#[derive(Debug, Parser)]
#[command(name = "waypoint-defence", version, about)]
struct CliArgs {
    /// TOML file tuning the game and listing opening towers.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Tower to build before the first wave, as `<column>,<row>,<kind>`.
    #[arg(long = "tower", value_name = "COL,ROW,KIND")]
    towers: Vec<TowerPlacement>,
    /// Number of waves to clear before stopping.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    waves: u32,
    /// Simulated time per frame in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Upper bound on simulated frames.
    #[arg(long, default_value_t = 200_000)]
    max_frames: u64,
}

/// Entry point for the Waypoint Defence command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let file = match &args.config {
        Some(path) => config_file::load(path)?,
        None => SessionFile::default(),
    };
    let session =
        Session::from_config(file.game).context("failed to create session from config")?;
    println!("{}", session.welcome_banner());

    let placements: Vec<TowerPlacement> = file.towers.into_iter().chain(args.towers).collect();
    info!(
        towers = placements.len(),
        waves = args.waves,
        frame_ms = args.frame_ms,
        "starting autoplay"
    );

    let scene = initial_scene(&session)?;
    let script = autoplay::opening_script(&scene.tile_grid, &placements);
    let frame = Duration::from_millis(args.frame_ms);
    let backend = TextBackend::new(io::stdout().lock(), frame, args.max_frames).with_script(script);
    let presentation = Presentation::new("Waypoint Defence", scene);

    let mut autoplay = Autoplay::new(session, args.waves);
    backend.run(presentation, move |dt, input, scene| autoplay.frame(dt, input, scene))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn initial_scene(session: &Session) -> Result<Scene> {
    let tile_grid = TileGridPresentation::from_tile_grid(
        session.tile_grid(),
        Color::from_rgb_u8(112, 240, 255).with_alpha(0.05),
    )
    .context("failed to describe the grid")?;
    let path = PathPresentation::new(&tile_grid, session.path().cells());
    let hud = HudPresentation {
        gold: session.gold(),
        lives: session.lives(),
        wave: session.wave(),
        phase: session.phase(),
        selected_tower: None,
    };
    Ok(Scene::new(tile_grid, path, hud))
}
