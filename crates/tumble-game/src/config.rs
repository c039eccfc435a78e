use std::path::PathBuf;

use clap::Parser;
use tumble_engine::logging::LoggingConfig;
use tumble_engine::render::ShaderSources;
use tumble_engine::window::RuntimeConfig;

use crate::audio::{AudioCue, NullAudio, ProcessAudio};

/// Fonts tried after `--font`, in order.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Tip a twin-cube token across three boards", long_about = None)]
pub struct Cli {
    /// Window title
    #[arg(long, default_value = "tumble")]
    pub title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 600.0)]
    pub width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// TrueType font for the HUD; system fonts are tried after it
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Sound played on every move; no sound without it
    #[arg(long, value_name = "FILE")]
    pub sound: Option<PathBuf>,

    /// Program that plays `--sound`
    #[arg(long, value_name = "CMD", default_value = "mpg123")]
    pub player: String,

    /// Directory holding mesh_vertex.wgsl / mesh_fragment.wgsl overrides
    #[arg(long, value_name = "DIR")]
    pub shader_dir: Option<PathBuf>,

    /// Step the camera preset every frame instead of on `V`
    #[arg(long)]
    pub cycle_camera_every_frame: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: winit::dpi::LogicalSize::new(self.width, self.height),
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }

    pub fn font_candidates(&self) -> Vec<PathBuf> {
        self.font
            .iter()
            .cloned()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
            .collect()
    }

    pub fn shader_sources(&self) -> ShaderSources {
        match &self.shader_dir {
            Some(dir) => ShaderSources::from_dir(dir),
            None => ShaderSources::builtin(),
        }
    }

    pub fn audio(&self) -> Box<dyn AudioCue> {
        match &self.sound {
            Some(file) => Box::new(ProcessAudio::new(self.player.clone(), file.clone())),
            None => Box::new(NullAudio),
        }
    }
}
