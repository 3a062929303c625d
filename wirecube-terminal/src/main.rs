//! Wirecube - Rotating Wireframe Cube
//!
//! Draws a rotating cube with a small drifting point/box overlay on the
//! terminal at a fixed frame rate.
//! Controls:
//!   - ESC / Ctrl+C: Quit

use anyhow::Result;
use wirecube_terminal::{logging, AppConfig, TerminalApp};

fn main() -> Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) if e.is_invalid() => return Err(e.into()),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    logging::init(&config.log)?;
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    log::info!(
        "starting at {} fps, depth offset {}",
        config.render.animation.fps,
        config.render.animation.depth_offset
    );

    let app = TerminalApp::new(config)?;
    app.run()
}
