use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::motion::Motion;
use super::pending::{self, Operator, Pending, Resolution};
use super::{ViEngine, edit, movement, viewport};
use crate::mode::Mode;
use crate::surface::TextSurface;

impl ViEngine {
    /// Route one raw key event through the current mode.
    pub fn handle<S: TextSurface + ?Sized>(&mut self, surface: &mut S, key: KeyEvent) {
        trace!(mode = %self.mode, key = ?key.code, pending = ?self.pending, "handle_key");
        match self.mode {
            Mode::Normal => self.handle_normal_key(surface, key),
            Mode::Insert => self.handle_insert_key(surface, key),
            Mode::CommandLine => self.handle_command_key(key),
        }
    }

    fn arm(&mut self, pending: Pending) {
        debug!(?pending, "pending_armed");
        self.pending = pending;
    }

    fn clear_pending(&mut self) {
        if self.pending != Pending::None {
            debug!(pending = ?self.pending, "pending_cleared");
        }
        self.pending = Pending::None;
    }

    fn handle_normal_key<S: TextSurface + ?Sized>(&mut self, surface: &mut S, key: KeyEvent) {
        match pending::resolve(self.pending, &key) {
            Resolution::Cancel => self.clear_pending(),
            Resolution::Arm(pending) => self.arm(pending),
            Resolution::DeleteLine => {
                self.clear_pending();
                edit::delete_line(surface);
            }
            Resolution::ToLineEnd(op) => {
                self.clear_pending();
                edit::delete_to_line_end(surface);
                if op == Operator::Change {
                    self.enter_insert_mode();
                }
            }
            Resolution::ToLineStart(op) => {
                self.clear_pending();
                edit::delete_to_line_start(surface);
                if op == Operator::Change {
                    self.enter_insert_mode();
                }
            }
            Resolution::GotoTop => {
                self.clear_pending();
                viewport::goto_top(surface);
            }
            Resolution::Plain => {
                self.clear_pending();
                self.run_normal_command(surface, key);
            }
        }
    }

    fn run_normal_command<S: TextSurface + ?Sized>(&mut self, surface: &mut S, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        match key.code {
            // Command line
            KeyCode::Char(':') => self.enter_command_mode(),

            // Enter insert mode
            KeyCode::Char('i') => self.enter_insert_mode(),
            KeyCode::Char('a') => self.enter_insert_mode_append(surface),
            KeyCode::Char('A') => self.enter_insert_mode_line_end(surface),
            KeyCode::Char('o') => self.enter_insert_mode_open_below(surface),
            KeyCode::Char('O') => self.enter_insert_mode_open_above(surface),

            // Movement
            KeyCode::Char('h') | KeyCode::Left => movement::move_left(surface),
            KeyCode::Char('j') | KeyCode::Down => movement::move_down(surface),
            KeyCode::Char('k') | KeyCode::Up => movement::move_up(surface),
            KeyCode::Char('l') | KeyCode::Right => movement::move_right(surface),
            KeyCode::Enter => movement::next_line_start(surface),

            // Word motions
            KeyCode::Char('w') => movement::apply_motion(surface, Motion::WordForward),
            KeyCode::Char('W') => movement::apply_motion(surface, Motion::BigWordForward),
            KeyCode::Char('b') => movement::apply_motion(surface, Motion::WordBackward),
            KeyCode::Char('B') => movement::apply_motion(surface, Motion::BigWordBackward),

            // Line position motions
            KeyCode::Char('0') => movement::line_start(surface),
            KeyCode::Char('$') => movement::line_end(surface),

            // Jump to bottom
            KeyCode::Char('G') => viewport::goto_bottom(surface),

            KeyCode::Char('x') => edit::delete_char(surface),

            _ => {}
        }
    }

    fn handle_insert_key<S: TextSurface + ?Sized>(&mut self, surface: &mut S, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_insert_mode(surface),
            _ => surface.insert_default(key),
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command_mode(),
            KeyCode::Enter => self.execute_command(),
            KeyCode::Backspace => self.command_pop(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.command_push(c);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crossterm::event::KeyCode;

    use crate::engine::test_support::{ctrl, key, press, test_surface};
    use crate::engine::{Operator, Pending, ViEngine};
    use crate::mode::Mode;
    use crate::surface::TextSurface;

    // -- Mode transitions --

    #[test]
    fn i_then_escape_round_trip() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello");
        s.set_cursor(3, 0).unwrap();
        press(&mut ed, &mut s, "i");
        assert_eq!(ed.current_mode(), Mode::Insert);
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(ed.current_mode(), Mode::Normal);
        assert_eq!(s.cursor(), (2, 0));
    }

    #[test]
    fn insert_mode_types_through_the_surface() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("");
        press(&mut ed, &mut s, "ihi dd:wq");
        ed.handle(&mut s, key(KeyCode::Enter));
        press(&mut ed, &mut s, "x");
        ed.handle(&mut s, key(KeyCode::Backspace));
        assert_eq!(s.buffer(), "hi dd:wq\n");
        assert_eq!(ed.current_mode(), Mode::Insert);
    }

    #[test]
    fn escape_at_column_zero_is_idempotent() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello");
        press(&mut ed, &mut s, "i");
        ed.handle(&mut s, key(KeyCode::Esc));
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(s.cursor(), (0, 0));
        assert_eq!(ed.current_mode(), Mode::Normal);
    }

    #[test]
    fn mode_change_handler_fires_on_transitions() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut ed = ViEngine::new();
        ed.set_mode_change_handler(move || seen.set(seen.get() + 1));
        let mut s = test_surface("hello");

        press(&mut ed, &mut s, "a");
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(calls.get(), 2);

        // ':' plus one per typed char
        press(&mut ed, &mut s, ":wq");
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn capital_a_and_o() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("abc\ndef");
        press(&mut ed, &mut s, "A!");
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(s.buffer(), "abc!\ndef");

        press(&mut ed, &mut s, "onew");
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(s.buffer(), "abc!\nnew\ndef");

        press(&mut ed, &mut s, "Otop");
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(s.buffer(), "abc!\ntop\nnew\ndef");
    }

    // -- Motions --

    #[test]
    fn hjkl_and_line_positions() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello\nworld");
        press(&mut ed, &mut s, "llj");
        assert_eq!(s.cursor(), (2, 1));
        press(&mut ed, &mut s, "$");
        assert_eq!(s.cursor(), (4, 1));
        press(&mut ed, &mut s, "0k");
        assert_eq!(s.cursor(), (0, 0));
        press(&mut ed, &mut s, "h");
        assert_eq!(s.cursor(), (0, 0));
    }

    #[test]
    fn word_keys_delegate_to_motions() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("foo.bar baz\nqux");
        press(&mut ed, &mut s, "w");
        assert_eq!(s.cursor(), (3, 0));
        press(&mut ed, &mut s, "W");
        assert_eq!(s.cursor(), (8, 0));
        press(&mut ed, &mut s, "W");
        assert_eq!(s.cursor(), (0, 1));
        press(&mut ed, &mut s, "b");
        assert_eq!(s.cursor(), (8, 0));
        press(&mut ed, &mut s, "B");
        assert_eq!(s.cursor(), (0, 0));
    }

    #[test]
    fn enter_moves_to_next_line_start() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello\nworld");
        press(&mut ed, &mut s, "ll");
        ed.handle(&mut s, key(KeyCode::Enter));
        assert_eq!(s.cursor(), (0, 1));
    }

    // -- Delete and change --

    #[test]
    fn x_deletes_under_cursor() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello");
        press(&mut ed, &mut s, "lx");
        assert_eq!(s.buffer(), "hllo");
    }

    #[test]
    fn dd_removes_line() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("one\ntwo\nthree");
        press(&mut ed, &mut s, "jld");
        assert_eq!(ed.pending(), Pending::Operator(Operator::Delete));
        press(&mut ed, &mut s, "d");
        assert_eq!(s.buffer(), "one\nthree");
        assert_eq!(s.cursor(), (0, 1));
        assert_eq!(ed.pending(), Pending::None);
        assert_eq!(ed.current_mode(), Mode::Normal);
    }

    #[test]
    fn d_dollar_stays_normal() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello world");
        press(&mut ed, &mut s, "wd$");
        assert_eq!(s.buffer(), "hello ");
        assert_eq!(ed.current_mode(), Mode::Normal);
        assert_eq!(ed.pending(), Pending::None);
    }

    #[test]
    fn c_dollar_enters_insert() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello world");
        press(&mut ed, &mut s, "wc$");
        assert_eq!(s.buffer(), "hello ");
        assert_eq!(ed.current_mode(), Mode::Insert);
        press(&mut ed, &mut s, "there");
        assert_eq!(s.buffer(), "hello there");
    }

    #[test]
    fn d0_and_c0() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello world");
        press(&mut ed, &mut s, "wd0");
        assert_eq!(s.buffer(), "world");
        assert_eq!(s.cursor(), (0, 0));
        assert_eq!(ed.current_mode(), Mode::Normal);

        press(&mut ed, &mut s, "llc0");
        assert_eq!(s.buffer(), "rld");
        assert_eq!(ed.current_mode(), Mode::Insert);
    }

    // -- Pending state --

    #[test]
    fn escape_and_ctrl_c_cancel_pending() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("one\ntwo");
        press(&mut ed, &mut s, "d");
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(ed.pending(), Pending::None);
        press(&mut ed, &mut s, "d");
        assert_eq!(s.buffer(), "one\ntwo");

        press(&mut ed, &mut s, "g");
        ed.handle(&mut s, ctrl('c'));
        assert_eq!(ed.pending(), Pending::None);
        assert_eq!(ed.current_mode(), Mode::Normal);
    }

    #[test]
    fn unrelated_key_cancels_without_side_effects() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello world\nnext");
        press(&mut ed, &mut s, "gx");
        assert_eq!(ed.pending(), Pending::None);
        assert_eq!(s.buffer(), "hello world\nnext");
        assert_eq!(s.cursor(), (0, 0));

        press(&mut ed, &mut s, "dz");
        assert_eq!(ed.pending(), Pending::None);
        assert_eq!(s.buffer(), "hello world\nnext");
        assert_eq!(s.cursor(), (0, 0));

        // A cancelled 'g' does not pair with a later one.
        press(&mut ed, &mut s, "jgwg");
        assert_eq!(ed.pending(), Pending::Goto);
        assert_eq!(s.cursor(), (0, 1));
    }

    #[test]
    fn commands_after_an_operator_run_and_drop_it() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello world");
        press(&mut ed, &mut s, "cw");
        assert_eq!(s.cursor(), (6, 0));
        assert_eq!(ed.pending(), Pending::None);

        press(&mut ed, &mut s, "0dx");
        assert_eq!(s.buffer(), "ello world");
        assert_eq!(ed.pending(), Pending::None);

        // The dropped 'd' does not pair with a later one.
        press(&mut ed, &mut s, "dld");
        assert_eq!(ed.pending(), Pending::Operator(Operator::Delete));
        assert_eq!(s.buffer(), "ello world");
        assert_eq!(s.cursor(), (1, 0));

        ed.handle(&mut s, key(KeyCode::Esc));
        press(&mut ed, &mut s, "di");
        assert_eq!(ed.current_mode(), Mode::Insert);
        assert_eq!(ed.pending(), Pending::None);
    }

    #[test]
    fn colon_after_an_operator_opens_the_command_line() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello");
        press(&mut ed, &mut s, "c:q");
        assert_eq!(ed.current_mode(), Mode::CommandLine);
        assert_eq!(ed.command_buffer(), "q");
        assert_eq!(ed.pending(), Pending::None);
    }

    #[test]
    fn carriage_return_does_not_split_lines() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("one\rtwo");
        assert_eq!(s.line(0), "one\rtwo");
        press(&mut ed, &mut s, "G");
        assert_eq!(s.cursor(), (0, 0));
        press(&mut ed, &mut s, "w");
        assert_eq!(s.cursor(), (4, 0));
        press(&mut ed, &mut s, "j");
        assert_eq!(s.cursor(), (4, 0));
    }

    #[test]
    fn d_after_g_cancels_goto() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("one\ntwo");
        press(&mut ed, &mut s, "jgd");
        assert_eq!(ed.pending(), Pending::Operator(Operator::Delete));
        press(&mut ed, &mut s, "g");
        assert_eq!(ed.pending(), Pending::Goto);
        assert_eq!(s.cursor(), (0, 1));
        assert_eq!(s.buffer(), "one\ntwo");
    }

    // -- Goto --

    #[test]
    fn gg_resets_cursor_and_origin() {
        let mut ed = ViEngine::new();
        let text = (0..40).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut s = test_surface(&text);
        s.resize(80, 10);
        press(&mut ed, &mut s, "G");
        assert_eq!(s.cursor(), (0, 39));
        assert_eq!(s.origin(), (0, 30));
        press(&mut ed, &mut s, "gg");
        assert_eq!(s.cursor(), (0, 0));
        assert_eq!(s.origin(), (0, 0));
    }

    #[test]
    fn capital_g_after_g_still_jumps() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("a\nb\nc");
        press(&mut ed, &mut s, "gG");
        assert_eq!(s.cursor(), (0, 2));
        assert_eq!(ed.pending(), Pending::None);
    }

    // -- Command line --

    #[test]
    fn command_line_write_calls_handler_once() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        let mut ed = ViEngine::new();
        ed.set_command_handler(move |cmd| {
            sink.borrow_mut().push(cmd.to_string());
            anyhow::bail!("refused")
        });
        let mut s = test_surface("draft");

        press(&mut ed, &mut s, ":write");
        assert_eq!(ed.current_mode(), Mode::CommandLine);
        assert_eq!(ed.command_buffer(), "write");
        ed.handle(&mut s, key(KeyCode::Enter));

        assert_eq!(*received.borrow(), vec!["write".to_string()]);
        assert_eq!(ed.current_mode(), Mode::Normal);
        assert!(ed.command_buffer().is_empty());
        assert_eq!(s.buffer(), "draft");
    }

    #[test]
    fn command_line_backspace_and_escape() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("");
        press(&mut ed, &mut s, ":wx");
        ed.handle(&mut s, key(KeyCode::Backspace));
        assert_eq!(ed.command_buffer(), "w");
        ed.handle(&mut s, key(KeyCode::Esc));
        assert_eq!(ed.current_mode(), Mode::Normal);
        assert!(ed.command_buffer().is_empty());
    }

    #[test]
    fn colon_resets_command_buffer() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("");
        press(&mut ed, &mut s, ":abc");
        ed.handle(&mut s, key(KeyCode::Esc));
        press(&mut ed, &mut s, ":");
        assert!(ed.command_buffer().is_empty());
    }

    #[test]
    fn handles_dyn_surfaces() {
        let mut ed = ViEngine::new();
        let mut s = test_surface("hello world");
        let surface: &mut dyn TextSurface = &mut s;
        ed.handle(surface, key(KeyCode::Char('w')));
        assert_eq!(s.cursor(), (6, 0));
    }
}
