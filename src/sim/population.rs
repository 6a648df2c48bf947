//! Ball population: the active collection, the destruction queue and the back layer
//!
//! Removal is two-phase. A removed ball leaves the active collection, starts
//! fading and waits in a FIFO queue, still bouncing. Each tick only the head of
//! the queue is checked; it is destroyed once fully transparent. A slow head
//! blocks the balls behind it, which keeps the per-tick check O(1).

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::ball::{Ball, Bounds};
use super::rng::int_between;
use crate::config::{BallConfig, Config};
use crate::renderer::scene::{DrawCommand, Layer};

/// What happened to the population during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Ball updates performed (active plus queued)
    pub updated: usize,
    /// Ball destroyed from the head of the queue
    pub destroyed: Option<u32>,
}

/// Owns every live ball and its graphic layer
#[derive(Debug)]
pub struct Population {
    bounds: Bounds,
    ball_config: BallConfig,
    /// Active balls in insertion order
    balls: Vec<Ball>,
    /// Balls fading out, oldest first
    pending: VecDeque<Ball>,
    layer: Layer,
    next_id: u32,
}

impl Population {
    pub fn new(config: &Config) -> Self {
        Self {
            bounds: Bounds {
                width: config.canvas.width,
                height: config.canvas.height,
            },
            ball_config: config.balls.clone(),
            balls: Vec::new(),
            pending: VecDeque::new(),
            layer: Layer::new(),
            next_id: 1,
        }
    }

    /// Spawn a ball at a random position away from the edges. Returns its id.
    pub fn spawn_ball<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let inset = self.ball_config.spawn_inset as u32;
        let x = int_between(rng, inset, self.bounds.width as u32 - inset);
        let y = int_between(rng, inset, self.bounds.height as u32 - inset);

        let id = self.allocate_id();
        let ball = Ball::new(
            id,
            Vec2::new(x as f32, y as f32),
            &self.ball_config,
            rng,
            &mut self.layer,
        );
        self.balls.push(ball);
        id
    }

    /// Add an already constructed ball to the active collection
    pub fn insert(&mut self, ball: Ball) {
        self.next_id = self.next_id.max(ball.id + 1);
        self.balls.push(ball);
    }

    /// Spawn the initial population
    pub fn fill<R: Rng + ?Sized>(&mut self, rng: &mut R, count: u32) {
        for _ in 0..count {
            self.spawn_ball(rng);
        }
        log::info!("Initial number of balls: {}", self.balls.len());
    }

    /// Start removing the most recently added ball. Returns its id, or `None`
    /// when there is nothing to remove.
    pub fn remove_ball(&mut self) -> Option<u32> {
        let Some(mut ball) = self.balls.pop() else {
            log::info!("No balls to remove");
            return None;
        };
        log::info!("Removing ball {}", ball.id);
        ball.request_removal();
        let id = ball.id;
        self.pending.push_back(ball);
        Some(id)
    }

    /// Per-frame update. Movement only runs while `active`; the destruction
    /// queue is drained either way.
    pub fn tick(&mut self, active: bool) -> TickReport {
        let mut report = TickReport::default();

        if active {
            let bounds = self.bounds;
            for ball in self.balls.iter_mut().chain(self.pending.iter_mut()) {
                ball.update(bounds);
                report.updated += 1;
            }
        }

        report.destroyed = self.drain_pending();
        report
    }

    /// Destroy the queue head if its fade has finished. At most one per call.
    pub fn drain_pending(&mut self) -> Option<u32> {
        if !self.pending.front()?.is_ready_for_destroy() {
            return None;
        }
        let mut ball = self.pending.pop_front()?;
        ball.destroy(&mut self.layer);
        log::info!("Destroyed ball {}", ball.id);
        Some(ball.id)
    }

    /// Advance visual effects of every live ball
    pub fn advance_effects(&mut self, dt: f32) {
        for ball in self.balls.iter_mut().chain(self.pending.iter_mut()) {
            if ball.advance_effects(dt) {
                log::debug!("Ball {} finished fading", ball.id);
            }
        }
    }

    pub fn active_len(&self) -> usize {
        self.balls.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn pending(&self) -> impl Iterator<Item = &Ball> {
        self.pending.iter()
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Draw commands for the back layer: active balls, then fading ones
    pub fn draw_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.balls
            .iter()
            .chain(self.pending.iter())
            .filter_map(|b| b.graphic().map(|g| g.draw_command()))
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
