//! Moving ball: kinematics, boundary reflection and the removal lifecycle

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::rng::{BallColor, BorderColor, int_between, int_in};
use crate::config::BallConfig;
use crate::renderer::scene::{Graphic, Layer, Shape, Visual};
use crate::renderer::tween::{Easing, Property, Tween};

/// Axis-aligned playfield the balls bounce inside, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Boundary hit resolved during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    None,
    Left,
    Right,
    Top,
    Bottom,
}

/// Lifecycle of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// In the active collection
    Active,
    /// Removal requested; still moving while the fade-out runs
    FadingOut,
    /// Graphic released, terminal
    Destroyed,
}

/// Find the boundary a ball would cross on its next step.
///
/// Only the first match of left, right, top, bottom is reported, so a ball
/// heading into a corner resolves its X collision first and its Y collision
/// on a later tick.
pub fn detect_collision(pos: Vec2, vel: Vec2, radius: f32, bounds: Bounds) -> Collision {
    let predicted = pos + vel;
    // A zero component counts as moving left/up
    let going_left = vel.x <= 0.0;
    let going_up = vel.y <= 0.0;

    if going_left && predicted.x - radius < 0.0 {
        Collision::Left
    } else if !going_left && predicted.x + radius > bounds.width {
        Collision::Right
    } else if going_up && predicted.y - radius < 0.0 {
        Collision::Top
    } else if !going_up && predicted.y + radius > bounds.height {
        Collision::Bottom
    } else {
        Collision::None
    }
}

/// A bouncing ball
#[derive(Debug)]
pub struct Ball {
    pub id: u32,
    pub entity: Entity,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub diameter: u32,
    pub border_size: u32,
    pub color: BallColor,
    pub border_color: BorderColor,
    /// Integer heading fed to sin/cos
    pub direction: u32,
    pub speed: u32,
    phase: BallPhase,
    fade_complete: bool,
    graphic: Option<Graphic>,
}

impl Ball {
    /// Create a randomized ball at `pos` and register its graphic on `layer`
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        config: &BallConfig,
        rng: &mut R,
        layer: &mut Layer,
    ) -> Self {
        let border_size = int_in(rng, config.border);
        let diameter = int_in(rng, config.diameter) - border_size * 2;
        let color = BallColor::random(rng);
        let border_color = BorderColor::random(rng);
        let direction = int_between(rng, 1, 360);
        let speed = int_in(rng, config.speed);

        let heading = direction as f32;
        let vel = Vec2::new(heading.sin(), heading.cos()) * speed as f32;

        let mut ball = Self::build(
            id,
            pos,
            diameter as f32 / 2.0,
            vel,
            color,
            border_color,
            border_size,
            layer,
        );
        ball.diameter = diameter;
        ball.direction = direction;
        ball.speed = speed;
        ball.intro_animation();
        log::debug!("Spawned {}", ball.describe());
        ball
    }

    /// Create a ball with explicit kinematics (no randomization, no intro effect)
    pub fn with_motion(id: u32, pos: Vec2, radius: f32, vel: Vec2, layer: &mut Layer) -> Self {
        let mut ball = Self::build(
            id,
            pos,
            radius,
            vel,
            BallColor::Vermilion,
            BorderColor::Midnight,
            0,
            layer,
        );
        ball.diameter = (radius * 2.0).round() as u32;
        ball.speed = vel.length().round() as u32;
        ball
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        id: u32,
        pos: Vec2,
        radius: f32,
        vel: Vec2,
        color: BallColor,
        border_color: BorderColor,
        border_size: u32,
        layer: &mut Layer,
    ) -> Self {
        let graphic = layer.add(
            Shape::Circle {
                radius,
                fill: color.rgb(),
                border: border_color.rgb(),
                border_width: border_size as f32,
            },
            Visual::at(pos),
        );
        Self {
            id,
            entity: Entity { pos },
            vel,
            radius,
            diameter: 0,
            border_size,
            color,
            border_color,
            direction: 0,
            speed: 0,
            phase: BallPhase::Active,
            fade_complete: false,
            graphic: Some(graphic),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.entity.pos
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    /// True once removal has been requested (never reset)
    pub fn is_pending_destruction(&self) -> bool {
        self.phase != BallPhase::Active
    }

    /// Advance one tick: move, reflecting off the boundary
    pub fn update(&mut self, bounds: Bounds) -> Collision {
        if self.phase == BallPhase::Destroyed {
            return Collision::None;
        }

        let collision = detect_collision(self.entity.pos, self.vel, self.radius, bounds);
        match collision {
            Collision::Left | Collision::Right => self.vel.x = -self.vel.x,
            Collision::Top | Collision::Bottom => self.vel.y = -self.vel.y,
            Collision::None => {}
        }

        let mut next = self.entity.pos + self.vel;
        // Touch the wall exactly instead of stopping short or overshooting
        match collision {
            Collision::None => {}
            Collision::Left => next.x = self.radius,
            Collision::Right => next.x = bounds.width - self.radius,
            Collision::Top => next.y = self.radius,
            Collision::Bottom => next.y = bounds.height - self.radius,
        }
        if collision != Collision::None {
            self.bounce_animation();
        }

        self.entity.pos = next;
        if let Some(graphic) = self.graphic.as_mut() {
            graphic.visual.pos = next;
        }
        collision
    }

    /// Mark for destruction and start the fade-out. Only the first call has an effect.
    pub fn request_removal(&mut self) {
        if self.phase != BallPhase::Active {
            return;
        }
        self.phase = BallPhase::FadingOut;
        if let Some(graphic) = self.graphic.as_mut() {
            graphic.animate(Tween::new(Property::Alpha, graphic.visual.alpha, 0.0, 0.3, Easing::Power2In));
            graphic.animate(Tween::new(Property::Scale, 1.0, 0.0, 0.3, Easing::ElasticOut));
        }
        log::info!("Animating out ball {}", self.id);
    }

    /// Current opacity of the ball's graphic
    pub fn opacity(&self) -> f32 {
        self.graphic.as_ref().map_or(0.0, |g| g.visual.alpha)
    }

    pub fn scale(&self) -> f32 {
        self.graphic.as_ref().map_or(0.0, |g| g.visual.scale)
    }

    /// Advance visual effects by `dt` seconds. Returns true when the fade-out
    /// finished during this call.
    pub fn advance_effects(&mut self, dt: f32) -> bool {
        let Some(graphic) = self.graphic.as_mut() else {
            return false;
        };
        let fade_done = graphic
            .advance(dt)
            .iter()
            .any(|c| c.property == Property::Alpha && c.value == 0.0);
        if fade_done && self.phase == BallPhase::FadingOut {
            self.fade_complete = true;
            return true;
        }
        false
    }

    /// Fading out and fully transparent
    pub fn is_ready_for_destroy(&self) -> bool {
        self.phase == BallPhase::FadingOut && self.fade_complete && self.opacity() == 0.0
    }

    /// Release the graphic. Must only be called once the ball has left every
    /// collection; a second call is ignored.
    pub fn destroy(&mut self, layer: &mut Layer) -> bool {
        match self.graphic.take() {
            Some(graphic) => {
                self.phase = BallPhase::Destroyed;
                layer.release(graphic)
            }
            None => {
                log::warn!("Ball {} destroyed twice", self.id);
                false
            }
        }
    }

    pub fn graphic(&self) -> Option<&Graphic> {
        self.graphic.as_ref()
    }

    pub fn describe(&self) -> String {
        format!(
            "ball {}: {}, diameter: {}, radius: {}, border: {}, direction: {}, speed: {}, motion: ({}, {})",
            self.id,
            self.entity.describe(),
            self.diameter,
            self.radius,
            self.border_size,
            self.direction,
            self.speed,
            self.vel.x,
            self.vel.y
        )
    }

    fn intro_animation(&mut self) {
        if let Some(graphic) = self.graphic.as_mut() {
            graphic.animate(Tween::new(Property::Scale, 0.0, 1.0, 0.5, Easing::ElasticOut));
        }
    }

    fn bounce_animation(&mut self) {
        // A bounce would scale a fading ball back up
        if self.phase != BallPhase::Active {
            return;
        }
        if let Some(graphic) = self.graphic.as_mut() {
            graphic.animate(Tween::new(Property::Scale, 0.9, 1.0, 0.5, Easing::ElasticOut));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Bounds = Bounds {
        width: 500.0,
        height: 300.0,
    };

    fn ball(pos: Vec2, radius: f32, vel: Vec2, layer: &mut Layer) -> Ball {
        Ball::with_motion(1, pos, radius, vel, layer)
    }

    fn fade_out(ball: &mut Ball) {
        for _ in 0..60 {
            if ball.advance_effects(1.0 / 60.0) {
                return;
            }
        }
    }

    #[test]
    fn test_random_ball_respects_config() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut layer = Layer::new();
        let config = BallConfig::default();
        for id in 0..100 {
            let b = Ball::new(id, Vec2::new(250.0, 150.0), &config, &mut rng, &mut layer);
            assert!((25..=50).contains(&b.diameter));
            assert!(b.radius > 0.0);
            assert!((1..=360).contains(&b.direction));
            assert!((1..=3).contains(&b.speed));
            assert!(b.vel.x.abs() <= b.speed as f32 + 1e-4);
            assert!(b.vel.y.abs() <= b.speed as f32 + 1e-4);
            assert!((b.vel.length() - b.speed as f32).abs() < 1e-3);
            assert_eq!(b.phase(), BallPhase::Active);
            // Intro effect starts from nothing
            assert_eq!(b.scale(), 0.0);
            assert_eq!(b.opacity(), 1.0);
        }
        assert_eq!(layer.live_count(), 100);
    }

    #[test]
    fn test_free_flight() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(100.0, 100.0), 10.0, Vec2::new(2.0, -1.5), &mut layer);
        assert_eq!(b.update(BOUNDS), Collision::None);
        assert_eq!(b.pos(), Vec2::new(102.0, 98.5));
        assert_eq!(b.graphic().unwrap().visual.pos, b.pos());
    }

    #[test]
    fn test_right_wall_clamps_and_inverts_x_only() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(488.0, 100.0), 10.0, Vec2::new(3.0, 2.0), &mut layer);
        assert_eq!(b.update(BOUNDS), Collision::Right);
        assert_eq!(b.vel, Vec2::new(-3.0, 2.0));
        assert_eq!(b.pos(), Vec2::new(490.0, 102.0));
        // Bounce effect starts from a squashed scale
        assert_eq!(b.scale(), 0.9);
    }

    #[test]
    fn test_bottom_wall_clamps_and_inverts_y_only() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(200.0, 289.0), 10.0, Vec2::new(-1.0, 2.0), &mut layer);
        assert_eq!(b.update(BOUNDS), Collision::Bottom);
        assert_eq!(b.vel, Vec2::new(-1.0, -2.0));
        assert_eq!(b.pos(), Vec2::new(199.0, 290.0));
    }

    #[test]
    fn test_left_wins_over_top_in_same_tick() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(11.0, 11.0), 10.0, Vec2::new(-3.0, -3.0), &mut layer);

        assert_eq!(b.update(BOUNDS), Collision::Left);
        assert_eq!(b.vel, Vec2::new(3.0, -3.0));
        assert_eq!(b.pos().x, 10.0);
        // Y advances by the full step, past the top boundary, this tick
        assert_eq!(b.pos().y, 8.0);

        // Top collision is resolved on the next tick
        assert_eq!(b.update(BOUNDS), Collision::Top);
        assert_eq!(b.vel, Vec2::new(3.0, 3.0));
        assert_eq!(b.pos(), Vec2::new(13.0, 10.0));
    }

    #[test]
    fn test_zero_component_counts_as_left_and_up() {
        assert_eq!(
            detect_collision(Vec2::new(9.0, 50.0), Vec2::new(0.0, 1.0), 10.0, BOUNDS),
            Collision::Left
        );
        assert_eq!(
            detect_collision(Vec2::new(50.0, 9.0), Vec2::new(1.0, 0.0), 10.0, BOUNDS),
            Collision::Top
        );
    }

    #[test]
    fn test_request_removal_is_idempotent() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(100.0, 100.0), 10.0, Vec2::new(1.0, 1.0), &mut layer);
        b.request_removal();
        b.advance_effects(0.1);
        let alpha = b.opacity();
        b.request_removal();
        assert_eq!(b.phase(), BallPhase::FadingOut);
        assert!(b.is_pending_destruction());
        // Second request does not restart the fade
        assert_eq!(b.opacity(), alpha);
    }

    #[test]
    fn test_fading_ball_keeps_bouncing_without_bounce_effect() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(11.0, 100.0), 10.0, Vec2::new(-3.0, 0.5), &mut layer);
        b.request_removal();
        b.advance_effects(0.1);
        let scale = b.scale();
        assert_eq!(b.update(BOUNDS), Collision::Left);
        assert_eq!(b.vel.x, 3.0);
        assert_eq!(b.scale(), scale);
    }

    #[test]
    fn test_fade_reaches_exact_zero_then_destroys_once() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(100.0, 100.0), 10.0, Vec2::new(1.0, 1.0), &mut layer);
        assert!(!b.is_ready_for_destroy());

        b.request_removal();
        assert!(!b.is_ready_for_destroy());
        fade_out(&mut b);
        assert_eq!(b.opacity(), 0.0);
        assert!(b.is_ready_for_destroy());

        assert!(b.destroy(&mut layer));
        assert_eq!(b.phase(), BallPhase::Destroyed);
        assert!(!b.destroy(&mut layer));
        assert_eq!(layer.released_count(), 1);
        assert_eq!(layer.live_count(), 0);

        // Destroyed balls no longer move
        let pos = b.pos();
        b.update(BOUNDS);
        assert_eq!(b.pos(), pos);
    }

    #[test]
    fn test_active_ball_never_ready_for_destroy() {
        let mut layer = Layer::new();
        let mut b = ball(Vec2::new(100.0, 100.0), 10.0, Vec2::new(1.0, 1.0), &mut layer);
        for _ in 0..120 {
            b.advance_effects(1.0 / 60.0);
        }
        assert!(!b.is_ready_for_destroy());
    }

    proptest! {
        #[test]
        fn prop_single_axis_hits_stay_inside(
            radius in 12.5f32..25.0,
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            vx in -3.0f32..=3.0,
            vy in -3.0f32..=3.0,
        ) {
            let pos = Vec2::new(
                (radius + fx * (BOUNDS.width - 2.0 * radius)).min(BOUNDS.width - radius),
                (radius + fy * (BOUNDS.height - 2.0 * radius)).min(BOUNDS.height - radius),
            );
            let predicted = pos + Vec2::new(vx, vy);
            let x_out = predicted.x - radius < 0.0 || predicted.x + radius > BOUNDS.width;
            let y_out = predicted.y - radius < 0.0 || predicted.y + radius > BOUNDS.height;
            // Corner hits resolve one axis per tick
            prop_assume!(!(x_out && y_out));

            let mut layer = Layer::new();
            let mut b = ball(pos, radius, Vec2::new(vx, vy), &mut layer);
            let speed_before = b.vel.abs();
            b.update(BOUNDS);

            let p = b.pos();
            let eps = 1e-3;
            prop_assert!(p.x >= radius - eps && p.x <= BOUNDS.width - radius + eps);
            prop_assert!(p.y >= radius - eps && p.y <= BOUNDS.height - radius + eps);
            prop_assert_eq!(b.vel.abs(), speed_before);
        }

        #[test]
        fn prop_long_runs_never_escape(
            seed in any::<u64>(),
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut layer = Layer::new();
            let config = BallConfig::default();
            let pos = Vec2::new(100.0 + fx * 300.0, 100.0 + fy * 100.0);
            let mut b = Ball::new(0, pos, &config, &mut rng, &mut layer);
            let slack = b.speed as f32;

            for _ in 0..2_000 {
                b.update(BOUNDS);
                let p = b.pos();
                // At most one step of overshoot, only on the deferred corner axis
                prop_assert!(p.x >= b.radius - slack && p.x <= BOUNDS.width - b.radius + slack);
                prop_assert!(p.y >= b.radius - slack && p.y <= BOUNDS.height - b.radius + slack);
            }
        }
    }
}
