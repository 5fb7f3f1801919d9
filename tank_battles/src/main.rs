//! Tank Battles
//!
//! Headless demo game for the BGE engine: tanks are assembled from RON actor
//! resources and fight until one remains.
//!
//! Usage: `tank_battles [config.ron|config.toml]`

mod armor;
mod battle;

use battle::{BattleSettings, TankBattlesApp};
use bge_engine::foundation::logging;
use bge_engine::prelude::*;
use std::path::PathBuf;

fn load_config() -> EngineConfig {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/engine.ron"), PathBuf::from);

    match EngineConfig::load_from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Using default configuration, cannot load {}: {}", path.display(), e);
            EngineConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    logging::init(&config.logging)?;

    log::info!("Starting Tank Battles");
    let mut app = TankBattlesApp::new(BattleSettings::default());

    let exit_code = match Engine::run(config, &mut app) {
        Ok(code) => code,
        Err(e) => {
            log::error!("Tank Battles failed: {}", e);
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}
