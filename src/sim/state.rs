//! Demo state: everything a running canvas owns
//!
//! Created once at startup and kept for the life of the page/process.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallPhase};
use super::controls::{ButtonKind, Controls, PressOutcome};
use super::population::Population;
use super::rng::int_in;
use crate::config::Config;
use crate::renderer::scene::DrawCommand;

/// Complete demo state
#[derive(Debug)]
pub struct DemoState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: Config,
    /// Ticks run since startup
    pub time_ticks: u64,
    pub population: Population,
    pub controls: Controls,
    rng: Pcg32,
}

impl DemoState {
    /// Create a demo with the default startup constants
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Config::default())
    }

    /// Create a demo from an explicit config, rejecting invalid ones
    pub fn with_config(seed: u64, config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::build(seed, config))
    }

    fn build(seed: u64, config: Config) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut population = Population::new(&config);
        let count = int_in(&mut rng, config.balls.initial_count);
        population.fill(&mut rng, count);
        let controls = Controls::new(&config);

        Self {
            seed,
            config,
            time_ticks: 0,
            population,
            controls,
            rng,
        }
    }

    pub fn is_active(&self) -> bool {
        self.controls.is_active()
    }

    /// Press a button by kind
    pub fn press(&mut self, kind: ButtonKind) -> PressOutcome {
        self.controls.press(kind, &mut self.population, &mut self.rng)
    }

    /// Pointer press in canvas coordinates; `None` if no button was hit
    pub fn pointer_down(&mut self, point: Vec2) -> Option<PressOutcome> {
        let kind = self.controls.button_at(point)?;
        Some(self.press(kind))
    }

    /// Back layer (balls) followed by front layer (buttons)
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        self.population
            .draw_commands()
            .chain(self.controls.draw_commands())
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let ball = |b: &Ball| BallSnapshot {
            id: b.id,
            pos: b.pos(),
            vel: b.vel,
            radius: b.radius,
            phase: b.phase(),
            opacity: b.opacity(),
        };
        Snapshot {
            seed: self.seed,
            time_ticks: self.time_ticks,
            active: self.is_active(),
            balls: self.population.balls().iter().map(ball).collect(),
            pending: self.population.pending().map(ball).collect(),
            released: self.population.layer().released_count(),
        }
    }
}

/// Serializable summary of one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub phase: BallPhase,
    pub opacity: f32,
}

/// Serializable summary of the demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub time_ticks: u64,
    pub active: bool,
    pub balls: Vec<BallSnapshot>,
    pub pending: Vec<BallSnapshot>,
    /// Ball graphics released so far
    pub released: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnRange;

    #[test]
    fn test_initial_population_in_range() {
        for seed in 0..20 {
            let state = DemoState::new(seed);
            let n = state.population.active_len();
            assert!((20..=30).contains(&n), "seed {seed}: {n} balls");
            assert_eq!(state.population.pending_len(), 0);
            assert!(!state.is_active());
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = DemoState::new(777).snapshot();
        let b = DemoState::new(777).snapshot();
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let mut config = Config::default();
        config.balls.initial_count = SpawnRange::new(5, 1);
        assert!(DemoState::with_config(1, config).is_err());

        let mut config = Config::default();
        config.balls.initial_count = SpawnRange::new(0, 0);
        let state = DemoState::with_config(1, config).unwrap();
        assert_eq!(state.population.active_len(), 0);
    }

    #[test]
    fn test_pointer_down_dispatches_to_buttons() {
        let mut state = DemoState::new(5);
        let before = state.population.active_len();
        // Buttons are not clickable before they slide in
        assert_eq!(state.pointer_down(Vec2::new(20.0, 250.0)), None);
        state.controls.advance_effects(3.5);

        assert_eq!(state.pointer_down(Vec2::new(20.0, 250.0)), Some(PressOutcome::Started));
        assert!(matches!(
            state.pointer_down(Vec2::new(250.0, 265.0)),
            Some(PressOutcome::Added(_))
        ));
        assert_eq!(state.population.active_len(), before + 1);
        assert_eq!(state.pointer_down(Vec2::new(250.0, 100.0)), None);
    }

    #[test]
    fn test_draw_list_puts_buttons_last() {
        let state = DemoState::new(8);
        let list = state.draw_list();
        let balls = state.population.active_len();
        assert_eq!(list.len(), balls + 3);
        assert!(list[..balls]
            .iter()
            .all(|c| matches!(c.shape, crate::renderer::Shape::Circle { .. })));
        assert!(list[balls..]
            .iter()
            .all(|c| matches!(c.shape, crate::renderer::Shape::RoundedRect { .. })));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = DemoState::new(3);
        state.press(ButtonKind::Remove);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pending.len(), 1);
        assert_eq!(back.pending[0].phase, BallPhase::FadingOut);
    }
}
