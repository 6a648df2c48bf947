//! Retained scene: layers of graphics with observable position, scale and opacity
//!
//! A `Graphic` is a handle registered on a `Layer`. The owner releases it
//! through `Layer::release`, which consumes the handle so it cannot be
//! released twice.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tween::{Completed, Effects, Property, Tween};

/// Identifier of a graphic inside its layer
pub type GraphicId = u32;

/// Shape to draw for a graphic, in local coordinates around its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle {
        radius: f32,
        fill: u32,
        border: u32,
        border_width: f32,
    },
    /// Rectangle centered on the position, with a centered label
    RoundedRect {
        size: Vec2,
        corner_radius: f32,
        fill: u32,
        border: u32,
        border_width: f32,
        label: String,
        label_color: u32,
    },
}

/// Mutable observable fields of a graphic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
    /// Added to `pos.y` when drawing (used by slide-in effects)
    pub offset_y: f32,
}

impl Visual {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            scale: 1.0,
            alpha: 1.0,
            offset_y: 0.0,
        }
    }

    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Scale => self.scale = value,
            Property::Alpha => self.alpha = value,
            Property::OffsetY => self.offset_y = value,
        }
    }
}

/// Handle to a live graphic on a layer
#[derive(Debug)]
pub struct Graphic {
    id: GraphicId,
    pub shape: Shape,
    pub visual: Visual,
    effects: Effects,
}

impl Graphic {
    pub fn id(&self) -> GraphicId {
        self.id
    }

    /// Start an effect on this graphic's fields
    pub fn animate(&mut self, tween: Tween) {
        // fromTo semantics: the start value applies immediately
        self.visual.set(tween.property, tween.value());
        self.effects.start(tween);
    }

    #[cfg(test)]
    pub fn is_animating(&self, property: Property) -> bool {
        self.effects.is_running(property)
    }

    /// Advance running effects, returning the ones that finished
    pub fn advance(&mut self, dt: f32) -> Vec<Completed> {
        let visual = &mut self.visual;
        self.effects.advance(dt, |property, value| visual.set(property, value))
    }

    /// Snapshot for drawing
    pub fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            shape: self.shape.clone(),
            pos: Vec2::new(self.visual.pos.x, self.visual.pos.y + self.visual.offset_y),
            scale: self.visual.scale,
            alpha: self.visual.alpha,
        }
    }
}

/// One item of the per-frame draw list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub shape: Shape,
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

/// Render layer that tracks which graphics are alive
#[derive(Debug, Clone, Default)]
pub struct Layer {
    live: Vec<GraphicId>,
    next_id: GraphicId,
    released: u64,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new graphic on this layer
    pub fn add(&mut self, shape: Shape, visual: Visual) -> Graphic {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(id);
        Graphic {
            id,
            shape,
            visual,
            effects: Effects::default(),
        }
    }

    /// Release a graphic's resources. Returns false if it was not on this layer.
    pub fn release(&mut self, graphic: Graphic) -> bool {
        match self.live.iter().position(|&id| id == graphic.id) {
            Some(index) => {
                self.live.remove(index);
                self.released += 1;
                true
            }
            None => {
                log::warn!("Graphic {} released on a layer that does not own it", graphic.id);
                false
            }
        }
    }

    #[cfg(test)]
    pub fn is_live(&self, id: GraphicId) -> bool {
        self.live.contains(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total graphics released over the layer's lifetime
    pub fn released_count(&self) -> u64 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::tween::Easing;

    fn circle() -> Shape {
        Shape::Circle {
            radius: 10.0,
            fill: 0xD95D39,
            border: 0x0E1428,
            border_width: 0.0,
        }
    }

    #[test]
    fn test_release_counts_once() {
        let mut layer = Layer::new();
        let a = layer.add(circle(), Visual::at(Vec2::ZERO));
        let b = layer.add(circle(), Visual::at(Vec2::ONE));
        assert_ne!(a.id(), b.id());
        assert_eq!(layer.live_count(), 2);

        let a_id = a.id();
        assert!(layer.release(a));
        assert!(!layer.is_live(a_id));
        assert_eq!(layer.live_count(), 1);
        assert_eq!(layer.released_count(), 1);
    }

    #[test]
    fn test_release_on_foreign_layer_is_rejected() {
        let mut back = Layer::new();
        let g = back.add(circle(), Visual::at(Vec2::ZERO));
        let mut other = Layer::new();
        assert!(!other.release(g));
        assert_eq!(other.released_count(), 0);
        assert_eq!(back.live_count(), 1);
    }

    #[test]
    fn test_animate_applies_start_value_immediately() {
        let mut layer = Layer::new();
        let mut g = layer.add(circle(), Visual::at(Vec2::ZERO));
        g.animate(Tween::new(Property::Scale, 0.0, 1.0, 0.5, Easing::ElasticOut));
        assert_eq!(g.visual.scale, 0.0);
        assert!(g.is_animating(Property::Scale));

        let done = g.advance(0.5);
        assert_eq!(g.visual.scale, 1.0);
        assert_eq!(done.len(), 1);
        assert!(!g.is_animating(Property::Scale));
    }

    #[test]
    fn test_draw_command_applies_offset() {
        let mut layer = Layer::new();
        let mut g = layer.add(circle(), Visual::at(Vec2::new(5.0, 50.0)));
        g.visual.offset_y = -20.0;
        let cmd = g.draw_command();
        assert_eq!(cmd.pos, Vec2::new(5.0, 30.0));
    }
}
