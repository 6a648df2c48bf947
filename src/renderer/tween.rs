//! Declarative tween effects
//!
//! An effect request is (property, from, to, duration, easing, delay). Effects
//! run on their own clock; the simulation only samples the resulting values.

use serde::{Deserialize, Serialize};

/// Easing curves used by the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Cubic ease-in
    Power2In,
    /// Overshooting spring settling on the end value
    ElasticOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2In => t * t * t,
            Easing::ElasticOut => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                const PERIOD: f32 = 0.3;
                let s = PERIOD / 4.0;
                2f32.powf(-10.0 * t) * ((t - s) * std::f32::consts::TAU / PERIOD).sin() + 1.0
            }
        }
    }
}

/// Animatable visual property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Property {
    /// Uniform scale on both axes
    Scale,
    Alpha,
    /// Vertical offset from the layout position
    OffsetY,
}

/// A single running tween
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
    pub delay: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(property: Property, from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            easing,
            delay: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Value at the current time. Lands exactly on `to` once finished.
    pub fn value(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return self.from;
        }
        if self.duration <= 0.0 || active >= self.duration {
            return self.to;
        }
        let eased = self.easing.apply(active / self.duration);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed - self.delay >= self.duration
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

/// Something that happened while advancing effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completed {
    pub property: Property,
    pub value: f32,
}

/// Running tweens for one graphic, at most one per property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    tweens: Vec<Tween>,
}

impl Effects {
    /// Start a tween, replacing any tween already driving the same property
    pub fn start(&mut self, tween: Tween) {
        self.tweens.retain(|t| t.property != tween.property);
        self.tweens.push(tween);
    }

    #[cfg(test)]
    pub fn is_running(&self, property: Property) -> bool {
        self.tweens.iter().any(|t| t.property == property)
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance every tween by `dt`, writing values through `apply`.
    /// Finished tweens are dropped and reported.
    pub fn advance(&mut self, dt: f32, mut apply: impl FnMut(Property, f32)) -> Vec<Completed> {
        let mut completed = Vec::new();
        for tween in &mut self.tweens {
            tween.advance(dt);
            // Delayed tweens hold their start value, like a fromTo with delay
            let value = tween.value();
            apply(tween.property, value);
            if tween.is_finished() {
                completed.push(Completed {
                    property: tween.property,
                    value,
                });
            }
        }
        self.tweens.retain(|t| !t.is_finished());
        completed
    }
}
