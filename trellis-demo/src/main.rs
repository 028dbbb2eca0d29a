//! Trellis demo - renders a docked scene headlessly and writes a PNG.

mod config;
mod scene;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trellis::{ComponentTree, RasterSurface, Size, Window};

use crate::config::{Cli, DemoConfig};

fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = DemoConfig::load(&cli)?;
    tracing::info!(width = config.width, height = config.height, "Starting Trellis demo");

    let mut tree = ComponentTree::with_defaults(config.components.clone());
    let scene = scene::build(&mut tree, &config)?;

    let surface = RasterSurface::new(Size::new(config.width, config.height));
    let mut window = Window::new(surface, tree, scene.root)?;
    window.set_title(&config.title);
    window.set_visible(true)?;

    // Recolour one square and repaint only that square.
    window.tree_mut().component_mut(scene.red)?.set_background(config.highlight);
    window.sync(scene.red)?;

    let (surface, _, _) = window.into_parts();
    surface
        .into_image()
        .save(&config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    tracing::info!(output = %config.output.display(), "wrote demo image");
    Ok(())
}
