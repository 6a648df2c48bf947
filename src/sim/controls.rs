//! On-canvas buttons: start/stop, add ball, remove ball
//!
//! The three behaviors are a closed set, so they are a `ButtonKind` tag
//! handled by one `press` function rather than per-button types.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::population::Population;
use crate::config::{ButtonConfig, Config};
use crate::renderer::scene::{DrawCommand, Graphic, Layer, Shape, Visual};
use crate::renderer::tween::{Easing, Property, Tween};

/// Button behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonKind {
    Toggle,
    Add,
    Remove,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 3] = [ButtonKind::Toggle, ButtonKind::Add, ButtonKind::Remove];

    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Toggle => "On / Off",
            ButtonKind::Add => "Add",
            ButtonKind::Remove => "Remove",
        }
    }

    /// Stagger for the slide-in effect (seconds)
    fn intro_delay(self) -> f32 {
        match self {
            ButtonKind::Toggle => 0.0,
            ButtonKind::Add => 0.5,
            ButtonKind::Remove => 1.0,
        }
    }
}

/// Result of pressing a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressOutcome {
    Started,
    Stopped,
    Added(u32),
    Removing(u32),
    NothingToRemove,
}

/// A button on the front layer
#[derive(Debug)]
pub struct Button {
    pub kind: ButtonKind,
    /// Top-left corner
    pub entity: Entity,
    pub size: Vec2,
    graphic: Graphic,
}

impl Button {
    fn new(kind: ButtonKind, top_left: Vec2, style: &ButtonConfig, layer: &mut Layer) -> Self {
        let size = Vec2::new(style.width, style.height);
        let mut graphic = layer.add(
            Shape::RoundedRect {
                size,
                corner_radius: style.corner_radius,
                fill: style.color,
                border: style.border_color,
                border_width: style.border_size,
                label: kind.label().to_string(),
                label_color: style.text_color,
            },
            Visual::at(top_left + size / 2.0),
        );

        // Drop in from above the canvas
        let start_offset = -(top_left.y + size.y / 2.0) - size.y * 2.0;
        let delay = kind.intro_delay();
        graphic.animate(
            Tween::new(Property::OffsetY, start_offset, 0.0, 2.0, Easing::ElasticOut).with_delay(delay),
        );
        graphic.animate(Tween::new(Property::Alpha, 0.0, 1.0, 2.0, Easing::ElasticOut).with_delay(delay));

        Self {
            kind,
            entity: Entity { pos: top_left },
            size,
            graphic,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.entity.pos + self.size / 2.0
    }

    /// Hit test against the rectangle where the button is drawn right now,
    /// so a button still sliding in is only hit where it is visible
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.entity.pos + Vec2::new(0.0, self.graphic.visual.offset_y);
        let max = min + self.size;
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    pub fn scale(&self) -> f32 {
        self.graphic.visual.scale
    }

    pub fn describe(&self) -> String {
        format!(
            "button {:?} '{}': {}, size: {}x{}",
            self.kind,
            self.kind.label(),
            self.entity.describe(),
            self.size.x,
            self.size.y
        )
    }

    fn press_animation(&mut self) {
        self.graphic
            .animate(Tween::new(Property::Scale, 0.5, 1.0, 1.0, Easing::ElasticOut));
    }
}

/// The button row plus the shared "active" flag
#[derive(Debug)]
pub struct Controls {
    buttons: Vec<Button>,
    active: bool,
    layer: Layer,
}

impl Controls {
    /// Lay out the buttons along the bottom edge: left, center, right
    pub fn new(config: &Config) -> Self {
        let style = &config.buttons;
        let width = config.canvas.width;
        let y = config.canvas.height - style.height - style.canvas_inset;

        let mut layer = Layer::new();
        let buttons = ButtonKind::ALL
            .iter()
            .map(|&kind| {
                let x = match kind {
                    ButtonKind::Toggle => style.canvas_inset,
                    ButtonKind::Add => width / 2.0 - style.width / 2.0,
                    ButtonKind::Remove => width - style.width - style.canvas_inset,
                };
                let button = Button::new(kind, Vec2::new(x, y), style, &mut layer);
                log::debug!("Placed {}", button.describe());
                button
            })
            .collect();

        Self {
            buttons,
            active: false,
            layer,
        }
    }

    /// Whether the balls are moving
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, kind: ButtonKind) -> Option<&Button> {
        self.buttons.iter().find(|b| b.kind == kind)
    }

    pub fn button_at(&self, point: Vec2) -> Option<ButtonKind> {
        self.buttons.iter().find(|b| b.contains(point)).map(|b| b.kind)
    }

    /// Run a button's behavior. The press effect plays whatever the outcome.
    pub fn press<R: Rng + ?Sized>(
        &mut self,
        kind: ButtonKind,
        population: &mut Population,
        rng: &mut R,
    ) -> PressOutcome {
        let outcome = match kind {
            ButtonKind::Toggle => {
                self.active = !self.active;
                if self.active {
                    log::info!("Start all");
                    PressOutcome::Started
                } else {
                    log::info!("Stop all");
                    PressOutcome::Stopped
                }
            }
            ButtonKind::Add => {
                let id = population.spawn_ball(rng);
                log::info!("Added ball {id}");
                PressOutcome::Added(id)
            }
            ButtonKind::Remove => match population.remove_ball() {
                Some(id) => PressOutcome::Removing(id),
                None => PressOutcome::NothingToRemove,
            },
        };

        if let Some(button) = self.buttons.iter_mut().find(|b| b.kind == kind) {
            button.press_animation();
        }
        outcome
    }

    pub fn advance_effects(&mut self, dt: f32) {
        for button in &mut self.buttons {
            button.graphic.advance(dt);
        }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Draw commands for the front layer
    pub fn draw_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.buttons.iter().map(|b| b.graphic.draw_command())
    }
}
