//! Terminal frontend: every registered plug-in sorts its own lane, and each
//! comparison paints one frame.

#![forbid(unsafe_code)]

mod app;
mod canvas;
mod error;
mod input;
mod logging;
mod screens;
mod settings;

use std::panic;

use sortvis_algorithm::AlgorithmRegistry;
use sortvis_algorithms::register_defaults;
use sortvis_engine::{Animator, Geometry, HelpDocument};

use crate::canvas::TerminalCanvas;
use crate::error::CliError;

/// Footer rows reserved below each screen.
const FOOTER_ROWS: u16 = 1;

fn main() {
    let _guard = match logging::init_logging(logging::default_log_dir(), logging::default_log_file())
    {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e).exit(),
    };
    install_panic_hook();

    if let Err(e) = run() {
        tracing::error!(error = %e, "sortvis exited with an error");
        e.exit();
    }
    tracing::info!("sortvis exited");
}

fn run() -> Result<(), CliError> {
    let (columns, rows) = crossterm::terminal::size()?;
    let viewport = Geometry::new(u32::from(columns), u32::from(rows.saturating_sub(FOOTER_ROWS)));
    let config = settings::from_env(viewport)?;

    let mut registry = AlgorithmRegistry::new();
    register_defaults(&mut registry)?;
    // Fatal before the terminal is touched.
    let help = HelpDocument::load(&config.help_path)?;

    let canvas = TerminalCanvas::open()?;
    let mut animator = match Animator::with_help(config, registry, canvas, help) {
        Ok(animator) => animator,
        Err(e) => {
            restore_terminal();
            return Err(e.into());
        }
    };
    let result = app::run(&mut animator);
    animator.surface().with_canvas(|c| {
        if let Err(e) = c.restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    });
    result
}

fn restore_terminal() {
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    );
}

/// Plug-in panics are caught per lane and reported, so they are only
/// logged here. A panic on the main thread also restores the terminal.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let thread = std::thread::current();
        let name = thread.name().unwrap_or("<unnamed>");
        tracing::error!(thread = name, panic = %info, "panic");
        if name == "main" {
            restore_terminal();
            default_hook(info);
        }
    }));
}
