//! Vi-style modal editing over a [`TextSurface`].
//!
//! One [`ViEngine`] is created per editable surface. It holds the mode, the
//! pending first key of a two-key command, and the command-line text; the
//! text and cursor always stay with the surface.

mod command;
mod edit;
mod insert;
mod keymap;
pub mod motion;
mod movement;
mod pending;
pub mod viewport;

pub use pending::{Operator, Pending};

use std::fmt;

use tracing::debug;

use crate::mode::Mode;
use crate::surface::TextSurface;

/// Invoked with the command-line text when Enter is pressed in CommandLine mode.
pub type CommandHandler = Box<dyn FnMut(&str) -> anyhow::Result<()>>;

/// Invoked on every mode change and every command-line edit.
pub type ModeChangeHandler = Box<dyn FnMut()>;

#[derive(Default)]
pub struct ViEngine {
    mode: Mode,
    pending: Pending,
    /// The text typed after ':'. Empty outside CommandLine mode.
    command_buffer: String,
    on_command: Option<CommandHandler>,
    on_mode_change: Option<ModeChangeHandler>,
}

impl ViEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_command_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) -> anyhow::Result<()> + 'static,
    {
        self.on_command = Some(Box::new(handler));
    }

    pub fn set_mode_change_handler<F>(&mut self, handler: F)
    where
        F: FnMut() + 'static,
    {
        self.on_mode_change = Some(Box::new(handler));
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn pending(&self) -> Pending {
        self.pending
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "mode_change");
        }
        self.mode = mode;
        self.notify();
    }

    pub(crate) fn notify(&mut self) {
        if let Some(handler) = self.on_mode_change.as_mut() {
            handler();
        }
    }
}

impl fmt::Debug for ViEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViEngine")
            .field("mode", &self.mode)
            .field("pending", &self.pending)
            .field("command_buffer", &self.command_buffer)
            .field("on_command", &self.on_command.is_some())
            .field("on_mode_change", &self.on_mode_change.is_some())
            .finish()
    }
}

// -- Surface helpers --

/// Move the surface cursor. A rejected position leaves the cursor where it
/// was; boundary cases are absorbed rather than reported.
pub(crate) fn place_cursor<S: TextSurface + ?Sized>(surface: &mut S, col: usize, row: usize) {
    if let Err(err) = surface.set_cursor(col, row) {
        debug!(%err, "cursor update rejected");
    }
}

pub(crate) fn place_origin<S: TextSurface + ?Sized>(surface: &mut S, col: usize, row: usize) {
    if let Err(err) = surface.set_origin(col, row) {
        debug!(%err, "origin update rejected");
    }
}

/// Split a full-buffer snapshot into lines, dropping any `\r` left by CRLF.
pub(crate) fn lines_of(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

pub(crate) fn line_len<S: TextSurface + ?Sized>(surface: &S, row: usize) -> usize {
    surface.line(row).chars().count()
}
