//! The chat composer around the engine: a transcript of sent messages and a
//! draft box edited with vi keys.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use anyhow::anyhow;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::buffer::Buffer;
use crate::engine::{ViEngine, viewport};
use crate::error::VichatError;
use crate::mode::Mode;
use crate::surface::{RopeSurface, TextSurface};

/// Commands typed after ':' in the draft box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit,
    Quit,
    SubmitAndQuit,
    /// 1-based line number
    GotoLine(usize),
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let cmd = input.trim();
        if let Ok(n) = cmd.parse::<usize>() {
            return Command::GotoLine(n);
        }
        match cmd {
            "" => Command::Empty,
            "w" | "w!" | "write" => Command::Submit,
            "q" | "q!" | "quit" => Command::Quit,
            "wq" | "wq!" | "x" => Command::SubmitAndQuit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub struct App {
    pub draft: RopeSurface,
    pub engine: ViEngine,
    pub transcript: Vec<String>,
    /// One-line message shown under the draft box.
    pub status: Option<String>,
    pub running: bool,
    /// Draft box title, refreshed whenever the engine reports a mode change.
    indicator: String,
    transcript_path: Option<PathBuf>,
    commands: Receiver<String>,
    mode_changed: Rc<Cell<bool>>,
}

impl App {
    pub fn new(draft: Buffer, transcript_path: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mode_changed = Rc::new(Cell::new(true));

        let mut engine = ViEngine::new();
        engine.set_command_handler(move |cmd| {
            tx.send(cmd.to_string())
                .map_err(|_| anyhow!("command receiver dropped"))
        });
        let flag = Rc::clone(&mode_changed);
        engine.set_mode_change_handler(move || flag.set(true));

        let mut app = Self {
            draft: RopeSurface::new(draft, 0, 0),
            engine,
            transcript: Vec::new(),
            status: None,
            running: true,
            indicator: String::new(),
            transcript_path,
            commands: rx,
            mode_changed,
        };
        app.refresh_indicator();
        app
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => return self.finish(|app| app.submit()),
                KeyCode::Char('l') => return self.finish(App::clear),
                KeyCode::Char('q') => return self.finish(App::quit),
                _ => {}
            }
        }

        self.engine.handle(&mut self.draft, key);
        while let Ok(cmd) = self.commands.try_recv() {
            self.run_command(&cmd);
        }
        self.refresh_indicator();
    }

    fn finish(&mut self, action: impl FnOnce(&mut App)) {
        action(self);
        self.refresh_indicator();
    }

    pub fn run_command(&mut self, input: &str) {
        match Command::parse(input) {
            Command::Submit => self.submit(),
            Command::Quit => self.quit(),
            Command::SubmitAndQuit => {
                self.submit();
                self.quit();
            }
            Command::GotoLine(n) => self.goto_line(n),
            Command::Empty => {}
            Command::Unknown(cmd) => {
                self.status = Some(format!("Not an editor command: {cmd}"));
            }
        }
    }

    /// Move the trimmed draft into the transcript and start a fresh draft.
    /// A blank draft is ignored.
    pub fn submit(&mut self) {
        let text = self.draft.text();
        let message = text.trim();
        if message.is_empty() {
            return;
        }
        if let Err(err) = self.record(message) {
            warn!(%err, "transcript write failed");
            self.status = Some(err.to_string());
            return;
        }
        info!(chars = message.chars().count(), "message_submitted");
        self.transcript.push(message.to_string());
        self.draft.set_text("");
        self.status = None;
    }

    fn record(&self, message: &str) -> Result<(), VichatError> {
        match &self.transcript_path {
            Some(path) => Buffer::from(message).append_to(path),
            None => Ok(()),
        }
    }

    pub fn clear(&mut self) {
        self.draft.set_text("");
        self.status = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// `:N` jumps to line N of the draft; 0 and 1 both mean the first line.
    pub fn goto_line(&mut self, n: usize) {
        let last = self.draft.contents().line_count().saturating_sub(1);
        let target = n.saturating_sub(1).min(last);
        if self.draft.set_cursor(0, target).is_ok() {
            viewport::ensure_visible(&mut self.draft);
        }
    }

    fn refresh_indicator(&mut self) {
        if self.mode_changed.replace(false) {
            self.indicator = match self.engine.current_mode() {
                Mode::CommandLine => format!("[:{}]", self.engine.command_buffer()),
                mode => format!("[{mode}]"),
            };
        }
    }
}
