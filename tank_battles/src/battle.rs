//! Headless tank battle
//!
//! A handful of tanks are placed on a circle and trade shots until one is
//! left standing. Each shot spawns a short-lived shell actor that the game
//! logic reaps once its lifetime runs out.

use crate::armor::ArmorComponent;
use bge_engine::foundation::math::utils::quat_from_euler_degrees;
use bge_engine::foundation::random::{Random, RandomRange};
use bge_engine::prelude::*;
use std::path::PathBuf;

const TANK_RESOURCE: &str = "actors/tank.ron";
const SHELL_RESOURCE: &str = "actors/shell.ron";
const ARENA_RADIUS: f32 = 20.0;

/// Battle settings
#[derive(Debug, Clone)]
pub struct BattleSettings {
    /// Number of tanks placed in the arena
    pub tanks: usize,
    /// Milliseconds between two volleys
    pub volley_interval_ms: f32,
    /// Damage range of a single hit
    pub damage: RandomRange<f32>,
    /// Random seed, so a battle can be replayed
    pub seed: u64,
}

impl Default for BattleSettings {
    fn default() -> Self {
        Self {
            tanks: 4,
            volley_interval_ms: 250.0,
            damage: RandomRange::new(5.0, 25.0),
            seed: 7,
        }
    }
}

/// Tank battle application
pub struct TankBattlesApp {
    settings: BattleSettings,
    random: Random,
    tanks: Vec<ActorId>,
    since_volley_ms: f32,
    shells_fired: u32,
}

impl TankBattlesApp {
    /// Create a battle from its settings
    pub fn new(settings: BattleSettings) -> Self {
        Self {
            random: Random::new(settings.seed),
            settings,
            tanks: Vec::new(),
            since_volley_ms: 0.0,
            shells_fired: 0,
        }
    }

    /// Tanks still in the fight
    pub fn tanks(&self) -> &[ActorId] {
        &self.tanks
    }

    /// Shells fired so far
    pub fn shells_fired(&self) -> u32 {
        self.shells_fired
    }

    fn fire_volley(&mut self, game: &mut GameLogic) -> Result<(), AppError> {
        let order = bge_engine::foundation::prime_search::PrimeSearch::new(self.tanks.len(), &mut self.random);
        let shooters: Vec<ActorId> = order.map(|index| self.tanks[index]).collect();

        for shooter in shooters {
            if self.tanks.len() < 2 || !self.tanks.contains(&shooter) {
                continue;
            }
            let target = self.pick_target(shooter)?;
            self.fire(game, shooter, target)?;
        }
        Ok(())
    }

    fn pick_target(&mut self, shooter: ActorId) -> Result<ActorId, AppError> {
        let candidates: Vec<ActorId> = self.tanks.iter().copied().filter(|&id| id != shooter).collect();
        let index = self
            .random
            .generate(RandomRange::new(0, candidates.len() - 1))
            .map_err(|e| AppError::Custom(e.to_string()))?;
        Ok(candidates[index])
    }

    fn fire(&mut self, game: &mut GameLogic, shooter: ActorId, target: ActorId) -> Result<(), AppError> {
        let muzzle = game
            .actor(shooter)
            .and_then(|actor| actor.component::<TransformComponent>())
            .map(TransformComponent::to_matrix);
        game.create_actor(SHELL_RESOURCE, None, muzzle.as_ref(), None)?;
        self.shells_fired += 1;

        let damage = self
            .random
            .generate(self.settings.damage)
            .map_err(|e| AppError::Custom(e.to_string()))?;

        let destroyed = match game
            .actor_mut(target)
            .and_then(|actor| actor.component_mut::<ArmorComponent>())
        {
            Some(armor) => {
                armor.take_hit(damage);
                armor.is_destroyed()
            }
            None => false,
        };

        if destroyed {
            log::info!("Tank {} destroyed by tank {}", target, shooter);
            game.destroy_actor(target)?;
            self.tanks.retain(|&id| id != target);
        }
        Ok(())
    }
}

impl Application for TankBattlesApp {
    fn game_title(&self) -> String {
        "Tank Battles".to_string()
    }

    fn game_app_directory(&self) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn register_components(&mut self, factory: &mut ActorFactory) -> Result<(), AppError> {
        factory.register_component::<ArmorComponent>()?;
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn load_game(&mut self, game: &mut GameLogic) -> Result<(), AppError> {
        let count = self.settings.tanks.max(2);
        for slot in 0..count {
            let angle = 360.0 * slot as f32 / count as f32;
            let placement = Transform {
                position: quat_from_euler_degrees(Vec3::new(0.0, angle, 0.0)) * Vec3::new(0.0, 0.0, ARENA_RADIUS),
                // Face the arena centre
                rotation: quat_from_euler_degrees(Vec3::new(0.0, angle + 180.0, 0.0)),
                scale: Vec3::new(1.0, 1.0, 1.0),
            };

            let points = self
                .random
                .generate(RandomRange::new(80_u32, 120))
                .map_err(|e| AppError::Custom(e.to_string()))?;
            let overrides = [ComponentDefinition::from_ron(
                ArmorComponent::NAME,
                &format!("(points: {})", points),
            )?];

            let id = game.create_actor(TANK_RESOURCE, Some(&overrides), Some(&placement.to_matrix()), None)?;
            log::debug!("Tank {} placed at {:.1} degrees with {} armor", id, angle, points);
            self.tanks.push(id);
        }
        log::info!("{} tanks enter the arena", self.tanks.len());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_ms: f32, elapsed_ms: f32) -> Result<(), AppError> {
        self.since_volley_ms += delta_ms;
        if self.since_volley_ms >= self.settings.volley_interval_ms {
            self.since_volley_ms = 0.0;
            self.fire_volley(engine.game_mut())?;
        }

        if self.tanks.len() <= 1 {
            match self.tanks.first() {
                Some(winner) => log::info!("Tank {} wins after {:.1} s", winner, Timer::millis_to_secs(elapsed_ms)),
                None => log::info!("No tank survived"),
            }
            engine.send_exit_code(EXIT_SUCCESS);
        }
        Ok(())
    }

    fn on_close(&mut self, engine: &mut Engine) {
        log::info!(
            "Battle over: {} shells fired, {} tanks left, {} actors live",
            self.shells_fired,
            self.tanks.len(),
            engine.game().actor_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_runs_to_a_winner() {
        let mut app = TankBattlesApp::new(BattleSettings {
            volley_interval_ms: 1.0,
            ..BattleSettings::default()
        });
        let config = EngineConfig::default()
            .with_resource_root("assets")
            .with_max_frames(100_000);

        let code = Engine::run(config, &mut app).unwrap();

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(app.tanks().len(), 1);
        assert!(app.shells_fired() > 0);
    }

    #[test]
    fn test_tanks_are_placed_from_resource() {
        let mut app = TankBattlesApp::new(BattleSettings::default());
        let mut factory = ActorFactory::new(app.game_app_directory().join("assets"));
        app.register_components(&mut factory).unwrap();
        let mut game = GameLogic::new(factory);

        app.load_game(&mut game).unwrap();

        assert_eq!(game.actor_count(), 4);
        for &id in app.tanks() {
            let actor = game.actor(id).unwrap();
            assert_eq!(actor.actor_type(), "Tank");
            let armor = actor.component::<ArmorComponent>().unwrap();
            assert!((80.0..=120.0).contains(&armor.points()));
            let position = actor.component::<TransformComponent>().unwrap().position();
            assert!((position.norm() - ARENA_RADIUS).abs() < 1e-3);
        }
    }
}
