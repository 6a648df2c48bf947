//! Deterministic simulation module
//!
//! All demo logic lives here:
//! - Fixed tick only (one per frame)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, then queue order)
//! - No platform dependencies; graphics are observed through `renderer::scene`

pub mod ball;
pub mod controls;
pub mod entity;
pub mod population;
pub mod rng;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallPhase, Bounds, Collision, detect_collision};
pub use controls::{Button, ButtonKind, Controls, PressOutcome};
pub use entity::Entity;
pub use population::{Population, TickReport};
pub use rng::{BallColor, BorderColor, int_between};
pub use state::{BallSnapshot, DemoState, Snapshot};
pub use tick::{FrameClock, run_for, tick};
