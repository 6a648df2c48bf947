//! Startup configuration
//!
//! Every value is a fixed startup constant; `Config::default()` is the only
//! configuration the demo ships with. Grouping them keeps the simulation free
//! of globals and lets snapshots record what a run was started with.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Inclusive integer range used for randomized startup values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> SpawnRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Canvas size and background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            color: CANVAS_COLOR,
        }
    }
}

/// Ball population and randomization ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Number of balls spawned at startup
    pub initial_count: SpawnRange<u32>,
    /// Diameter before the border inset is removed
    pub diameter: SpawnRange<u32>,
    pub border: SpawnRange<u32>,
    /// Pixels per tick
    pub speed: SpawnRange<u32>,
    /// Distance from every canvas edge that spawn positions stay clear of
    pub spawn_inset: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            initial_count: SpawnRange::new(MIN_NUMBER_OF_BALLS, MAX_NUMBER_OF_BALLS),
            diameter: SpawnRange::new(BALL_MIN_SIZE, BALL_MAX_SIZE),
            border: SpawnRange::new(BALL_BORDER_MIN_SIZE, BALL_BORDER_MAX_SIZE),
            speed: SpawnRange::new(BALL_MIN_SPEED, BALL_MAX_SPEED),
            spawn_inset: BALL_SPAWN_INSET,
        }
    }
}

/// Button layout and styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub width: f32,
    pub height: f32,
    pub border_size: f32,
    pub corner_radius: f32,
    /// Gap between the buttons and the canvas edge
    pub canvas_inset: f32,
    pub color: u32,
    pub border_color: u32,
    pub text_color: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            width: BUTTON_WIDTH,
            height: BUTTON_HEIGHT,
            border_size: BUTTON_BORDER_SIZE,
            corner_radius: BUTTON_CORNER_RADIUS,
            canvas_inset: BUTTON_CANVAS_INSET,
            color: BUTTON_COLOR,
            border_color: BUTTON_BORDER_COLOR,
            text_color: BUTTON_TEXT_COLOR,
        }
    }
}

/// Complete startup configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub balls: BallConfig,
    pub buttons: ButtonConfig,
}

impl Config {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<()> {
        let Config {
            canvas,
            balls,
            buttons,
        } = self;

        if !(canvas.width > 0.0 && canvas.height > 0.0) {
            bail!("canvas must have a positive size, got {}x{}", canvas.width, canvas.height);
        }
        for (name, range) in [
            ("initial_count", balls.initial_count),
            ("diameter", balls.diameter),
            ("border", balls.border),
            ("speed", balls.speed),
        ] {
            if !range.is_ordered() {
                bail!("balls.{name}: min {} exceeds max {}", range.min, range.max);
            }
        }
        // Smallest ball must still have a positive radius after the border inset
        if balls.diameter.min <= balls.border.max * 2 {
            bail!(
                "balls.diameter.min ({}) must exceed twice balls.border.max ({})",
                balls.diameter.min,
                balls.border.max
            );
        }
        if balls.spawn_inset < 0.0
            || balls.spawn_inset * 2.0 > canvas.width
            || balls.spawn_inset * 2.0 > canvas.height
        {
            bail!(
                "balls.spawn_inset {} leaves no spawn area on a {}x{} canvas",
                balls.spawn_inset,
                canvas.width,
                canvas.height
            );
        }
        // Spawn area must keep the largest ball fully inside the canvas
        if (balls.diameter.max as f32) / 2.0 > balls.spawn_inset {
            bail!(
                "balls.spawn_inset {} is smaller than the largest radius {}",
                balls.spawn_inset,
                balls.diameter.max as f32 / 2.0
            );
        }
        if buttons.width * 3.0 + buttons.canvas_inset * 2.0 > canvas.width {
            bail!("three {}px buttons do not fit the canvas width", buttons.width);
        }
        Ok(())
    }
}
