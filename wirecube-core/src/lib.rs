//! Wirecube Core Library - rotating wireframe cube rendering pipeline
//!
//! This library holds the terminal-independent part of the renderer:
//! rotation, perspective projection, NDC-to-cell mapping, rasterization
//! onto an abstract character surface, and the fixed-rate frame driver.

pub mod config;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod surface;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use config::{AnimationConfig, OverlayConfig, RenderConfig, StyleConfig};
pub use frame::{AnimationState, FrameDriver, FrameStats};
pub use geometry::{Edge, WireframeModel};
pub use projection::Projector;
pub use raster::{GlyphSet, Rasterizer};
pub use surface::{CellCoord, CellStyle, Color, Surface};
