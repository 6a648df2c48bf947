//! Bouncing Balls - colored circles bouncing around a fixed canvas
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, population lifecycle, controls)
//! - `renderer`: Scene graph layers and tween effects (plus the web canvas painter)
//! - `config`: Startup constants grouped into a typed config

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::Config;

/// Demo configuration constants
pub mod consts {
    /// Nominal frame time (60 Hz display) for the first frame and headless runs
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame time fed to effects, so a stall does not skip whole effects
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 500.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;
    pub const CANVAS_COLOR: u32 = 0x84BCDA;

    /// Initial population (inclusive range)
    pub const MIN_NUMBER_OF_BALLS: u32 = 20;
    pub const MAX_NUMBER_OF_BALLS: u32 = 30;

    /// Ball diameter before the border inset (inclusive range)
    pub const BALL_MIN_SIZE: u32 = 25;
    pub const BALL_MAX_SIZE: u32 = 50;
    pub const BALL_BORDER_MIN_SIZE: u32 = 0;
    pub const BALL_BORDER_MAX_SIZE: u32 = 0;
    /// Ball speed in pixels per tick (inclusive range)
    pub const BALL_MIN_SPEED: u32 = 1;
    pub const BALL_MAX_SPEED: u32 = 3;
    /// Keeps spawned balls away from the canvas edge
    pub const BALL_SPAWN_INSET: f32 = 100.0;

    /// Button styling
    pub const BUTTON_WIDTH: f32 = 100.0;
    pub const BUTTON_HEIGHT: f32 = 50.0;
    pub const BUTTON_BORDER_SIZE: f32 = 2.0;
    pub const BUTTON_CORNER_RADIUS: f32 = 10.0;
    pub const BUTTON_CANVAS_INSET: f32 = 10.0;
    pub const BUTTON_COLOR: u32 = 0x067BC2;
    pub const BUTTON_BORDER_COLOR: u32 = 0xFFFFFF;
    pub const BUTTON_TEXT_COLOR: u32 = 0xFFFFFF;
}

/// Format a 0xRRGGBB color as a CSS hex string
#[inline]
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}
