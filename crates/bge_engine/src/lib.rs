//! # BGE Engine
//!
//! Actor/component game engine core.
//!
//! ## Features
//!
//! - **Actors**: Entities with unique ids that exclusively own their components
//! - **Components**: Polymorphic capability units with name-derived ids and typed lookup
//! - **Actor Factory**: Construction of actors from declarative RON definitions with overrides
//! - **Game Logic**: Live actor registry with lifecycle events
//! - **Foundation**: Math, timers, memory pools, random numbers, string helpers and logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bge_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn game_title(&self) -> String {
//!         "My Game".to_string()
//!     }
//!
//!     fn load_game(&mut self, game: &mut GameLogic) -> Result<(), AppError> {
//!         game.create_actor("actors/player.ron", None, None, None)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_ms: f32, elapsed_ms: f32) -> Result<(), AppError> {
//!         if elapsed_ms > 10_000.0 {
//!             engine.send_exit_code(EXIT_SUCCESS);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut game = MyGame;
//!     let exit_code = Engine::run(config, &mut game)?;
//!     std::process::exit(exit_code);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod actors;
pub mod game;
pub mod events;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError, EXIT_FAILURE, EXIT_SUCCESS};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineError, EXIT_FAILURE, EXIT_SUCCESS,
        actors::{
            Actor, ActorComponent, ActorDefinition, ActorError, ActorFactory, ActorId,
            ComponentDefinition, ComponentId, ComponentType, OwnerRef,
            components::{LifetimeComponent, TransformComponent},
        },
        config::{Config, ConfigError, EngineConfig},
        events::{Event, EventArg, EventHandler, EventSystem, EventType},
        foundation::{
            math::{Vec3, Mat4, Quat, Transform},
            time::Timer,
        },
        game::GameLogic,
    };
}
