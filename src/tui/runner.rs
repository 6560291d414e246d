//! Console runner - main loop that owns the terminal
//!
//! The ConsoleRunner is responsible for:
//! - Drawing the UI each iteration
//! - Dispatching events to App for handling
//! - Mouse-wheel scrolling of the log pane

use std::time::Duration;

use eyre::Result;
use tracing::debug;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;
use crate::config::UiConfig;
use crate::session::Session;

/// Console runner that manages the terminal and event loop
pub struct ConsoleRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
}

impl ConsoleRunner {
    /// Create a new ConsoleRunner
    pub fn new(terminal: Tui, ui: &UiConfig) -> Self {
        debug!(tick_rate_ms = ui.tick_rate_ms, "ConsoleRunner::new: called");
        Self {
            app: App::with_session(Session::with_wrap_width(ui.wrap_width)),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(ui.tick_rate_ms.max(1))),
        }
    }

    /// Run the console main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("ConsoleRunner::run: entering main loop");
        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            match self.event_handler.next().await? {
                Event::Tick => {}
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        debug!("ConsoleRunner::run: force quit");
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    self.handle_mouse(mouse_event);
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "ConsoleRunner::run: resize");
                }
            }

            if self.app.state().should_quit {
                debug!("ConsoleRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("ConsoleRunner::run: exiting");
        Ok(())
    }

    /// Handle mouse event - wheel scrolls the log pane
    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        debug!(?mouse, "ConsoleRunner::handle_mouse: called");
        use crossterm::event::MouseEventKind;

        let state = self.app.state_mut();
        let max = state.log_max_scroll;
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                state.log_scroll_up(3, max);
            }
            MouseEventKind::ScrollDown => {
                state.log_scroll_down(3, max);
            }
            _ => {
                // Clicks and drags are not handled
            }
        }
    }
}
