//! Render settings consumed by the frame driver.
//!
//! These are plain serde types; layering and loading live in the
//! application crate.

use serde::{Deserialize, Serialize};

use crate::projection::DEFAULT_DEPTH_OFFSET;
use crate::raster::GlyphSet;
use crate::surface::{CellStyle, Color};

/// Everything the frame driver needs to know
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub animation: AnimationConfig,
    pub overlay: OverlayConfig,
    pub glyphs: GlyphSet,
    pub style: StyleConfig,
    /// Draw a status line with the measured frame rate in row 0
    pub hud: bool,
}

/// Timing and rotation of the cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Target frames per second
    pub fps: u32,
    /// Angle before the first frame advances it (radians)
    pub initial_angle: f64,
    /// Angle added every frame (radians)
    pub angle_step: f64,
    /// Forward shift applied before the perspective divide
    pub depth_offset: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            initial_angle: 0.05,
            angle_step: 0.05,
            depth_offset: DEFAULT_DEPTH_OFFSET,
        }
    }
}

/// The translating point/line/box drawn next to the cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    /// Starting anchor in NDC
    pub origin: [f64; 2],
    /// Amount subtracted from the anchor's x every frame
    pub step: f64,
    /// Diagonal size of the line and box, in cells
    pub extent: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origin: [0.1, 0.1],
            step: 0.01,
            extent: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Style of blank cells after a clear
    pub base: CellStyle,
    /// Style of every drawn primitive
    pub draw: CellStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base: CellStyle::default(),
            draw: CellStyle::new(Color::Reset, Color::Blue),
        }
    }
}
