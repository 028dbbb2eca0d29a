//! Demo configuration: JSON file defaults overridden by command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use trellis::{Color, ComponentDefaults};

/// Render the Trellis demo scene to a PNG file.
#[derive(Parser, Debug)]
#[command(name = "trellis-demo", version, about)]
pub struct Cli {
    /// JSON configuration file; missing keys keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width in pixels.
    #[arg(long)]
    pub width: Option<i32>,

    /// Window height in pixels.
    #[arg(long)]
    pub height: Option<i32>,

    /// Where to write the rendered image.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Paint every component through an offscreen buffer.
    #[arg(long)]
    pub double_buffered: bool,
}

/// Settings of one demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Window title.
    pub title: String,

    /// Outer window size.
    pub width: i32,
    pub height: i32,

    /// Output PNG path.
    pub output: PathBuf,

    /// Thickness of the docked side bar and the tool and status bars.
    pub sidebar_width: i32,
    pub toolbar_height: i32,
    pub status_height: i32,

    /// Colour the red square is repainted with to show a partial sync.
    pub highlight: Color,

    /// Attributes of newly created components.
    pub components: ComponentDefaults,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: String::from("Trellis demo"),
            width: 320,
            height: 240,
            output: PathBuf::from("trellis-demo.png"),
            sidebar_width: 60,
            toolbar_height: 24,
            status_height: 16,
            highlight: Color::GREEN,
            components: ComponentDefaults::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load the file named on the command line (if any) and apply flags.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(width) = cli.width {
            config.width = width;
        }
        if let Some(height) = cli.height {
            config.height = height;
        }
        if let Some(output) = &cli.output {
            config.output = output.clone();
        }
        if cli.double_buffered {
            config.components.double_buffered = true;
        }
        anyhow::ensure!(
            config.width > 0 && config.height > 0,
            "window size must be positive, got {}x{}",
            config.width,
            config.height
        );
        Ok(config)
    }
}
