//! Image placer (default binary).
//!
//! Resolves the base directory, loads the config, the gallery and the window
//! assets, then hands over to the eframe window loop.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use image_placer::app::Controller;
use image_placer::assets::Assets;
use image_placer::config::{resolve_base_dir, Config};
use image_placer::core::{Exporter, Gallery, Session};
use image_placer::input::InputMapper;
use image_placer::view::FrameClock;
use image_placer::window;

fn main() -> Result<()> {
    init_logging();

    let cwd = env::current_dir().context("failed to read the working directory")?;
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));
    let base_dir = resolve_base_dir(&cwd, exe_dir.as_deref());
    if base_dir != cwd {
        env::set_current_dir(&base_dir).with_context(|| {
            format!("failed to change directory to {}", base_dir.display())
        })?;
    }
    info!(base_dir = %base_dir.display(), "starting");

    let config = Config::load(&base_dir).context("failed to load configuration")?;
    let bindings = config.binding_table()?;

    let gallery = Gallery::load_dir(base_dir.join(&config.image_dir))
        .context("failed to build the image gallery")?;
    let assets = Assets::load(&base_dir, &config).context("failed to load window assets")?;

    let session = Session::new(gallery, Exporter::new(base_dir.join(&config.export_path)));
    let controller = Controller::new(
        session,
        InputMapper::new(bindings, config.key_repeat()),
        FrameClock::new(config.frame_rate),
    );

    window::run(controller, assets.icon, assets.font)
        .map_err(|e| anyhow!("window loop failed: {e}"))?;

    info!("bye");
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("image_placer=info,image_placer_core=info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
