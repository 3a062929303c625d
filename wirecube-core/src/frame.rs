//! Fixed-rate animation loop: clear, transform, rasterize, commit, sleep

use nalgebra::Point2;
use std::io;
use std::time::{Duration, Instant};

use crate::config::RenderConfig;
use crate::geometry::WireframeModel;
use crate::projection::Projector;
use crate::raster::Rasterizer;
use crate::surface::{CellCoord, Surface};
use crate::viewport;

/// Mutable per-frame values, owned by the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Rotation about the vertical axis. Only its sine and cosine are used,
    /// so it is left to grow.
    pub angle: f64,
    /// Anchor of the point/line/box overlay, in NDC
    pub overlay: Point2<f64>,
}

impl AnimationState {
    pub fn new(config: &RenderConfig) -> Self {
        let [x, y] = config.overlay.origin;
        Self {
            angle: config.animation.initial_angle,
            overlay: Point2::new(x, y),
        }
    }

    pub fn advance(&mut self, angle_step: f64, overlay_step: f64) {
        self.overlay.x -= overlay_step;
        self.angle += angle_step;
    }
}

/// Frame counter that reports the measured rate once per second
#[derive(Debug, Clone)]
pub struct FrameStats {
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a frame. Returns the new rate when a one-second window closes.
    pub fn record(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        self.fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Drives the rotating cube onto a surface
pub struct FrameDriver {
    config: RenderConfig,
    model: WireframeModel,
    projector: Projector,
    rasterizer: Rasterizer,
    state: AnimationState,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            model: WireframeModel::cube(),
            projector: Projector::new(config.animation.depth_offset),
            rasterizer: Rasterizer::new(config.glyphs),
            state: AnimationState::new(&config),
            stats: FrameStats::new(Instant::now()),
            config,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Time budget of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.config.animation.fps.max(1)))
    }

    /// Render exactly one frame: one clear, one commit.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &S) -> io::Result<()> {
        surface.clear();

        let animation = &self.config.animation;
        self.state.advance(animation.angle_step, self.config.overlay.step);
        log::trace!("frame angle={:.3}", self.state.angle);

        self.draw_model(surface);
        if self.config.overlay.enabled {
            self.draw_overlay(surface);
        }
        if self.config.hud {
            self.draw_hud(surface);
        }

        surface.show()
    }

    /// Loop forever at the configured rate. Returns only on a commit error.
    pub fn run<S: Surface + ?Sized>(&mut self, surface: &S) -> io::Result<()> {
        log::debug!(
            "frame driver started at {} fps ({:?} per frame)",
            self.config.animation.fps,
            self.frame_duration()
        );
        loop {
            self.paced_tick(surface)?;
        }
    }

    /// Run a bounded number of paced frames
    pub fn run_ticks<S: Surface + ?Sized>(&mut self, surface: &S, ticks: usize) -> io::Result<()> {
        for _ in 0..ticks {
            self.paced_tick(surface)?;
        }
        Ok(())
    }

    fn paced_tick<S: Surface + ?Sized>(&mut self, surface: &S) -> io::Result<()> {
        let frame_start = Instant::now();

        self.tick(surface)?;

        if let Some(fps) = self.stats.record(Instant::now()) {
            log::debug!("measured {:.1} fps", fps);
        }

        let target = self.frame_duration();
        let elapsed = frame_start.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
        Ok(())
    }

    fn draw_model<S: Surface + ?Sized>(&self, surface: &S) {
        let (width, height) = surface.size();
        let style = self.config.style.draw;
        let rotated = self.model.rotated(self.state.angle);

        for edge in self.model.edges() {
            let Some((a, b)) = edge.endpoints(&rotated) else {
                continue;
            };
            let from = viewport::to_cell(&self.projector.project(a), width, height);
            let to = viewport::to_cell(&self.projector.project(b), width, height);
            self.rasterizer.draw_line(surface, from, to, style);
        }
    }

    fn draw_overlay<S: Surface + ?Sized>(&self, surface: &S) {
        let (width, height) = surface.size();
        let style = self.config.style.draw;
        let extent = self.config.overlay.extent;

        let anchor = viewport::to_cell(&self.state.overlay, width, height);
        let corner = anchor.offset(extent, extent);

        self.rasterizer.draw_line(surface, anchor, corner, style);
        self.rasterizer.draw_point(surface, anchor, style);
        self.rasterizer.draw_box(surface, anchor, corner, style);
    }

    fn draw_hud<S: Surface + ?Sized>(&self, surface: &S) {
        let (width, _) = surface.size();
        let status = format!("wirecube | {:.1} fps | Esc/Ctrl+C quit", self.stats.fps());
        self.rasterizer.draw_text(
            surface,
            CellCoord::new(0, 0),
            CellCoord::new(i32::from(width), 0),
            &status,
            self.config.style.base,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_animation_state_advance() {
        let mut state = AnimationState::new(&RenderConfig::default());
        assert_relative_eq!(state.angle, 0.05);
        assert_eq!(state.overlay, Point2::new(0.1, 0.1));

        state.advance(0.05, 0.01);
        state.advance(0.05, 0.01);
        assert_relative_eq!(state.angle, 0.15, epsilon = 1e-12);
        assert_relative_eq!(state.overlay.x, 0.08, epsilon = 1e-12);
        assert_eq!(state.overlay.y, 0.1);
    }

    #[test]
    fn test_frame_stats_window() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);
        for i in 1..30 {
            assert!(stats.record(start + Duration::from_millis(i * 10)).is_none());
        }
        let fps = stats.record(start + Duration::from_secs(1)).unwrap();
        assert_relative_eq!(fps, 30.0, epsilon = 1e-9);
        assert_relative_eq!(stats.fps(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_duration() {
        let driver = FrameDriver::new(RenderConfig::default());
        assert_eq!(driver.frame_duration(), Duration::from_secs_f64(1.0 / 60.0));

        let mut config = RenderConfig::default();
        config.animation.fps = 0;
        assert_eq!(FrameDriver::new(config).frame_duration(), Duration::from_secs(1));
    }
}
