//! Core engine implementation
//!
//! The engine owns the [`GameLogic`] and drives a headless main loop: each step
//! measures the time since the previous one, clamps it to the configured
//! minimum frame rate, and updates the application followed by the game.

use crate::{
    application::Application,
    config::{ConfigError, EngineConfig},
    foundation::time::Timer,
    game::GameLogic,
};
use std::time::Duration;
use thiserror::Error;

/// Process exit code of a clean shutdown
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code of a failed run
pub const EXIT_FAILURE: i32 = 1;

/// Main engine struct
///
/// The engine coordinates the game logic and manages the main loop.
#[derive(Debug)]
pub struct Engine {
    game: GameLogic,
    config: EngineConfig,
    main_loop_timer: Timer,
    running: bool,
    exit_code: Option<i32>,
    frame_count: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        Ok(Self {
            game: GameLogic::from_config(&config.actors),
            config,
            main_loop_timer: Timer::new(true),
            running: false,
            exit_code: None,
            frame_count: 0,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Returns the exit code sent through [`Engine::send_exit_code`], or
    /// [`EXIT_SUCCESS`] when the loop ended otherwise.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<i32, EngineError> {
        let mut engine = Self::new(config)?;
        let resource_root = app.game_app_directory().join(&engine.config.actors.resource_root);
        log::debug!("Actor resources resolved against {}", resource_root.display());
        engine.game.factory_mut().set_resource_root(resource_root);

        log::info!("Loading {}...", app.game_title());
        app.register_components(engine.game.factory_mut())
            .map_err(|e| EngineError::ApplicationError(format!("Component registration: {}", e)))?;
        app.load_game(&mut engine.game)
            .map_err(|e| EngineError::ApplicationError(format!("Game loading: {}", e)))?;

        log::info!("Starting main loop...");
        let result = engine.main_loop(app);

        app.on_close(&mut engine);
        engine.game.clear();

        result?;
        let exit_code = engine.exit_code.unwrap_or(EXIT_SUCCESS);
        log::info!(
            "Engine shutdown complete after {} frames (exit code {})",
            engine.frame_count,
            exit_code
        );
        Ok(exit_code)
    }

    #[allow(clippy::cast_precision_loss)]
    fn main_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let max_step = self.config.main_loop.max_step_millis();
        let mut last_millis = 0;

        self.running = true;
        self.main_loop_timer.reset();
        self.main_loop_timer.start();

        while self.running {
            let now = self.main_loop_timer.elapsed_whole_millis();
            if now > last_millis {
                let delta_ms = (now - last_millis).min(max_step) as f32;
                last_millis = now;

                if let Err(e) = app.update(self, delta_ms, now as f32) {
                    self.running = false;
                    self.main_loop_timer.stop();
                    return Err(EngineError::ApplicationError(format!("App update: {}", e)));
                }
                self.game.update(delta_ms);
                self.frame_count += 1;

                if self.config.main_loop.max_frames.is_some_and(|max| self.frame_count >= max) {
                    log::debug!("Frame limit of {} reached", self.frame_count);
                    self.send_exit_code(EXIT_SUCCESS);
                }
            } else if self.config.main_loop.limit_frames {
                std::thread::sleep(Duration::from_millis(1));
            }
        }

        self.main_loop_timer.stop();
        Ok(())
    }

    /// End the main loop after the current step with the given exit code
    pub fn send_exit_code(&mut self, code: i32) {
        log::info!("Exit requested with code {}", code);
        self.exit_code = Some(code);
        self.running = false;
    }

    /// Exit code sent so far
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Check if the main loop is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the game logic
    pub fn game(&self) -> &GameLogic {
        &self.game
    }

    /// Get mutable access to the game logic
    pub fn game_mut(&mut self) -> &mut GameLogic {
        &mut self.game
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Timer measuring the time since the main loop started
    pub fn main_loop_timer(&self) -> &Timer {
        &self.main_loop_timer
    }

    /// Number of completed main loop steps
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
