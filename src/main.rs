use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eink_image_server::config::{DisplayConfig, ImageEntry, ServerConfig};
use eink_image_server::library::ImageLibrary;
use eink_image_server::server::{self, AppState};
use eink_pack::presets::DisplayPreset;
use tracing::info;

/// Serve pre-packed 4-bit grayscale images to an e-ink panel.
#[derive(Parser, Debug)]
#[command(name = "eink-serve")]
#[command(about = "Serve images as packed 4-bit grayscale buffers for e-ink displays")]
#[command(long_about = "Loads the configured images once, fits them to the panel, packs them \
two pixels per byte, and serves them in rotation from GET /image.")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(short, long, help = "Listen address, e.g. 0.0.0.0:12345")]
    bind: Option<SocketAddr>,

    /// Panel resolution used as the bounding box
    #[arg(short, long, value_enum)]
    preset: Option<DisplayPreset>,

    /// Source image, repeatable
    #[arg(short, long = "image", value_name = "NAME=PATH")]
    images: Vec<ImageEntry>,

    /// Do not serve the generated placeholder image
    #[arg(long)]
    no_placeholder: bool,

    /// Text drawn on the placeholder image
    #[arg(long)]
    placeholder_text: Option<String>,
}

impl Args {
    /// Load the config file (if any) and apply flag overrides.
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(preset) = self.preset {
            config.display = DisplayConfig {
                quantization: config.display.quantization,
                threshold: config.display.threshold,
                ..DisplayConfig::from_preset(preset)
            };
        }
        config.images.extend(self.images);
        if self.no_placeholder {
            config.placeholder.enabled = false;
        }
        if let Some(text) = self.placeholder_text {
            config.placeholder.text = text;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Args::parse().into_config()?;
    config.validate()?;
    info!(
        bind = %config.bind,
        bounds = %config.display.bounds(),
        images = config.image_count(),
        "starting"
    );

    let library = ImageLibrary::build(&config)?;
    server::serve(config.bind, AppState::new(library)).await?;
    Ok(())
}
