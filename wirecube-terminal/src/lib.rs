//! Terminal front end for the wirecube renderer
//!
//! Runs the frame driver against a crossterm screen on the calling thread
//! while a second thread services resize and quit events.

use anyhow::{Context, Result};
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::Arc;
use std::thread;
use wirecube_core::{FrameDriver, Surface};

pub mod buffer;
pub mod config;
pub mod input;
pub mod logging;
pub mod screen;

pub use config::{AppConfig, ConfigError, LogConfig};
pub use input::{EventSource, InputEvent, TerminalEvents};
pub use screen::TerminalScreen;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    config: AppConfig,
    screen: Arc<TerminalScreen>,
}

impl TerminalApp {
    /// Take over the terminal. Failure here is fatal for the caller.
    pub fn new(config: AppConfig) -> Result<Self> {
        let screen = TerminalScreen::init(config.render.style.base)
            .context("failed to initialize terminal")?;

        Ok(Self {
            config,
            screen: Arc::new(screen),
        })
    }

    /// Render until the process is told to quit.
    ///
    /// Returns only when rendering fails; the terminal is restored first and
    /// the error (or panic) is passed on.
    pub fn run(self) -> Result<()> {
        self.install_panic_hook();
        self.spawn_event_intake()?;

        let mut driver = FrameDriver::new(self.config.render.clone());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| driver.run(&*self.screen)));

        self.screen.fini();

        match outcome {
            Ok(result) => result.context("render loop failed"),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    // Restore the terminal before the default hook prints, or the message
    // is lost with the alternate screen.
    fn install_panic_hook(&self) {
        let screen = Arc::clone(&self.screen);
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            screen.fini();
            default_hook(info);
        }));
    }

    fn spawn_event_intake(&self) -> Result<()> {
        let screen = Arc::clone(&self.screen);

        thread::Builder::new()
            .name("event-intake".to_string())
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    input::run_event_loop(&*screen, &mut TerminalEvents)
                }));
                match outcome {
                    Ok(Ok(())) => process::exit(0),
                    Ok(Err(e)) => {
                        screen.fini();
                        log::error!("event intake failed: {}", e);
                        eprintln!("wirecube: event intake failed: {e}");
                        process::exit(1)
                    }
                    // the panic hook has already restored the terminal and reported
                    Err(_) => process::exit(101),
                }
            })
            .context("failed to spawn event thread")?;

        Ok(())
    }
}
