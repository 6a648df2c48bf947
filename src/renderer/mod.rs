//! Rendering collaborators
//!
//! `scene` and `tween` are pure and drive the visual state the simulation
//! observes. `canvas` paints a draw list with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod tween;

pub use scene::{DrawCommand, Graphic, GraphicId, Layer, Shape, Visual};
pub use tween::{Easing, Property, Tween};
