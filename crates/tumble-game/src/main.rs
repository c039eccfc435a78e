//! tumble: tip a twin-cube token across three boards.
//!
//! Arrows move, `V` steps the camera, `R` starts over, `Esc`/`Q` quits.
//! Dragging with the left button turns the orbit camera; the wheel zooms.

mod app;
mod audio;
mod board;
mod catalog;
mod composer;
mod config;
mod hud;

use anyhow::{Context, Result};
use clap::Parser;
use tumble_engine::device::GpuInit;
use tumble_engine::logging::init_logging;
use tumble_engine::text::FontSystem;
use tumble_engine::window::Runtime;

use crate::app::TumbleApp;
use crate::config::Cli;
use crate::hud::Hud;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging_config());

    let mut fonts = FontSystem::new();
    let font = fonts
        .load_first(&cli.font_candidates())
        .context("no HUD font available, pass one with --font")?;

    let app = TumbleApp::new(
        fonts,
        Hud::new(font),
        cli.shader_sources(),
        cli.audio(),
        cli.cycle_camera_every_frame,
    );

    log::info!("starting {} ({}x{})", cli.title, cli.width, cli.height);
    Runtime::run(cli.runtime_config(), GpuInit::default(), app)
}
