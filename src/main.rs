//! Vignette - a small top-down narrative scene
//!
//! Runs headless: the world, body, triggers and dialogue are simulated in
//! full, dialogue is printed to the terminal, and an autopilot supplies the
//! input a player would.

mod app;
mod autopilot;
mod config;
mod presenter;
mod script;
mod settings;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vignette_world::{CollisionField, Raster};

use crate::app::Vignette;
use crate::autopilot::Autopilot;
use crate::config::VignetteConfig;
use crate::presenter::TerminalPresenter;
use crate::settings::GameSettings;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting vignette...");

    let settings = GameSettings::load_or_init();
    let config = VignetteConfig::load()?;

    let raster = match &config.raster_path {
        Some(path) => Raster::open(path).with_context(|| format!("Failed to load world {:?}", path))?,
        None => {
            info!("No world raster configured, generating one");
            script::fallback_raster(&config.world).context("Failed to generate world")?
        }
    };
    let world = CollisionField::build(&raster, &config.world).context("Failed to build collision field")?;

    let npcs = script::npcs();
    let mut autopilot = Autopilot::new(
        npcs.iter().map(|npc| npc.trigger).collect(),
        config.trigger.radius * 0.8,
        config.host.advance_interval,
        config.host.leg_timeout,
    );

    let mut app = Vignette::new(world, &config, &settings, &npcs, TerminalPresenter::stdout());
    app.run(&config.host, &mut autopilot)?;

    info!("Vignette finished");
    Ok(())
}
