// Installation settings. Every default is the reference panel, so running with
// no config file reproduces it exactly; a TOML file only needs the keys it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::LIGHT_COUNT;

#[derive(Debug, Parser)]
#[command(about = "Mirror a live camera feed onto a hexagonal light panel")]
pub struct Cli {
    /// TOML file with settings that differ from the reference installation
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the panel in a window instead of driving the light strip
    #[arg(long)]
    pub preview: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    pub camera: CameraConfig,
    pub strip: StripConfig,
    pub render: RenderConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub index: u32,
    /// Requested resolution; the device may pick the closest it supports.
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Settle time after opening, before the first frame is trusted.
    pub warmup_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 1280, height: 960, fps: 30, warmup_ms: 3000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripDriver {
    Ws281x,
    Preview,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    pub driver: StripDriver,
    /// Signal frequency in Hz.
    pub frequency: u32,
    pub dma: u8,
    pub gpio: u8,
    pub invert: bool,
    pub count: usize,
    pub brightness: u8,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            driver: StripDriver::Ws281x,
            frequency: 800_000,
            dma: 10,
            gpio: 18,
            invert: false,
            count: LIGHT_COUNT,
            brightness: 255,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub fps: u32,
    /// Clamp out-of-range channels instead of letting them wrap when packing.
    pub saturate_colors: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fps: 24, saturate_colors: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub width: usize,
    pub height: usize,
    /// Hexagon radius in normalized units.
    pub radius: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { width: 480, height: 480, radius: 0.16 }
    }
}

impl MirrorConfig {
    /// Defaults, overridden by the config file, then by command line flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if cli.preview {
            config.strip.driver = StripDriver::Preview;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.render.fps == 0 {
            return invalid("render.fps must be positive");
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return invalid("camera.width and camera.height must be positive");
        }
        if self.camera.fps == 0 {
            return invalid("camera.fps must be positive");
        }
        if self.strip.frequency == 0 {
            return invalid("strip.frequency must be positive");
        }
        if self.preview.width == 0 || self.preview.height == 0 {
            return invalid("preview.width and preview.height must be positive");
        }
        Ok(())
    }

    /// Target time per frame, whole milliseconds (24 fps -> 41 ms).
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.render.fps))
    }

    pub fn camera_warmup(&self) -> Duration {
        Duration::from_millis(self.camera.warmup_ms)
    }
}
