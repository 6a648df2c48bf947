//! Positional record shared by everything placed on the canvas

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
}

impl Entity {
    pub fn describe(&self) -> String {
        format!("Entity {}, {}", self.pos.x, self.pos.y)
    }
}
