use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, terminal
    /// initialization fails, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Create the image picker BEFORE initializing the terminal (it
        // queries stdio capabilities).
        let picker = if self.images_enabled {
            super::effects::create_picker()
        } else {
            None
        };

        let mut model = Model::new(self.file_path.clone(), "", (80, 24));
        model.picker = picker;
        model.images_enabled = self.images_enabled;
        Self::load_document(&mut model)?;

        if self.start_expanded {
            for i in 0..model.sections.len() {
                model = update(model, Message::ToggleSection(i));
            }
        }
        for value in self.initial_filters.clone() {
            model = update(model, Message::ToggleFilter(value));
        }
        if self.open_tour {
            model = update(model, Message::OpenTour);
        }

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — docent requires an interactive terminal")?;
        let size = terminal.size()?;
        model.frame_size = (size.width, size.height);

        execute!(stdout(), EnableMouseCapture)?;
        set_mouse_motion_tracking(true)?;

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = set_mouse_motion_tracking(false);
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Run one message through the pure update, then its side effects.
    ///
    /// Messages with blocking side effects (reload) get an extra draw in
    /// between so the loading indicator is on screen while the file and
    /// its images load.
    fn apply_message(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        msg: Message,
    ) -> Result<()> {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        if matches!(side_msg, Message::Reload) {
            terminal.draw(|frame| crate::ui::view(model, frame))?;
        }
        Self::handle_message_side_effects(model, &side_msg);
        Ok(())
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() || model.loading {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    tracing::trace!(?msg, "message");
                    Self::apply_message(terminal, model, msg)?;
                    needs_render = true;
                }

                // Coalesce key-repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg = Self::handle_event(
                        &event::read()?,
                        model,
                        drain_ms,
                        &mut resize_debouncer,
                    );
                    if let Some(msg) = msg {
                        Self::apply_message(terminal, model, msg)?;
                        needs_render = true;
                    }
                }
            } else if model.loading {
                *model = update(std::mem::take(model), Message::Tick);
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

fn set_mouse_motion_tracking(enable: bool) -> std::io::Result<()> {
    // Request any-event mouse motion reporting (1003) with SGR encoding
    // (1006) so hover tooltips work in terminals that only report motion
    // with this mode set.
    let mut out = stdout();
    if enable {
        out.write_all(b"\x1b[?1003h\x1b[?1006h")?;
    } else {
        out.write_all(b"\x1b[?1003l\x1b[?1006l")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_debouncer_waits_for_delay() {
        let mut debouncer = ResizeDebouncer::new(100);
        debouncer.queue(120, 40, 0);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.take_ready(50), None);
        assert_eq!(debouncer.take_ready(100), Some((120, 40)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_resize_debouncer_keeps_latest_size() {
        let mut debouncer = ResizeDebouncer::new(100);
        debouncer.queue(120, 40, 0);
        debouncer.queue(100, 30, 50);
        assert_eq!(debouncer.take_ready(120), None);
        assert_eq!(debouncer.take_ready(150), Some((100, 30)));
    }
}
