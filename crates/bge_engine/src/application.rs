//! Application trait and lifecycle management

use crate::actors::{ActorError, ActorFactory};
use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::game::GameLogic;
use std::path::PathBuf;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game using the engine.
pub trait Application {
    /// Title used in log output
    fn game_title(&self) -> String;

    /// Directory relative actor resource roots are resolved against
    ///
    /// Defaults to the current working directory.
    fn game_app_directory(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Register game specific component types
    ///
    /// Called once before [`Application::load_game`]. The built-in components
    /// are already registered.
    fn register_components(&mut self, _factory: &mut ActorFactory) -> Result<(), AppError> {
        Ok(())
    }

    /// Create the initial actors
    fn load_game(&mut self, game: &mut GameLogic) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every step before the game logic is updated.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_ms` - Clamped time since the last step in milliseconds
    /// * `elapsed_ms` - Time since the main loop started in milliseconds
    fn update(&mut self, engine: &mut Engine, delta_ms: f32, elapsed_ms: f32) -> Result<(), AppError>;

    /// Called once when the main loop has ended
    fn on_close(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Actor error propagated to application level
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
