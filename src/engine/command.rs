use tracing::warn;

use super::ViEngine;
use crate::mode::Mode;

impl ViEngine {
    pub(crate) fn enter_command_mode(&mut self) {
        self.command_buffer.clear();
        self.set_mode(Mode::CommandLine);
    }

    pub(crate) fn exit_command_mode(&mut self) {
        self.command_buffer.clear();
        self.set_mode(Mode::Normal);
    }

    pub(crate) fn command_push(&mut self, ch: char) {
        self.command_buffer.push(ch);
        self.notify();
    }

    /// Backspace on an empty command line does nothing.
    pub(crate) fn command_pop(&mut self) {
        if self.command_buffer.pop().is_some() {
            self.notify();
        }
    }

    /// Hand the command line to the command handler, then return to Normal
    /// mode whatever the handler reports.
    pub(crate) fn execute_command(&mut self) {
        let cmd = self.command_buffer.clone();
        if let Some(handler) = self.on_command.as_mut() {
            if let Err(err) = handler(&cmd) {
                warn!(command = %cmd, error = %err, "command failed");
            }
        }
        self.exit_command_mode();
    }
}
