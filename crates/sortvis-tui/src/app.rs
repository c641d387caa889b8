//! The event loop.

use std::time::Duration;

use crossterm::event;
use sortvis_engine::{Animator, Mode};

use crate::canvas::TerminalCanvas;
use crate::error::CliError;
use crate::input::InputTranslator;
use crate::screens::Screen;

/// How long one loop iteration waits for an event.
const TICK: Duration = Duration::from_millis(50);

/// Run until the animator stops.
pub fn run(animator: &mut Animator<TerminalCanvas>) -> Result<(), CliError> {
    let mut translator = InputTranslator::default();
    while animator.is_running() {
        animator.poll();
        // While sorting, the lane threads own the drawing.
        if animator.mode() != Mode::Sorting {
            draw(animator)?;
        }
        if !event::poll(TICK)? {
            continue;
        }
        let event = event::read()?;
        let layout = animator.surface().with_canvas(|c| c.layout().clone());
        let max_scroll = animator.help().max_scroll();
        if let Some(input) = translator.translate(&event, animator.mode(), &layout, max_scroll) {
            animator.handle(input);
        }
    }
    Ok(())
}

fn draw(animator: &Animator<TerminalCanvas>) -> Result<(), CliError> {
    let screen = match animator.mode() {
        Mode::Start => Screen::Start,
        Mode::Help => Screen::Help {
            view: animator.help(),
        },
        Mode::Config => Screen::Config {
            form: animator.form(),
            registry: animator.registry(),
        },
        Mode::Sorting | Mode::Sorted => Screen::Sorted {
            report: animator.last_report(),
        },
    };
    animator
        .surface()
        .with_canvas(|c| c.draw_screen(&screen))?;
    Ok(())
}
