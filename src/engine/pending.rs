use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The operator half of a two-key delete/change command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
}

/// The first key of a two-key command awaiting its second key.
///
/// Only one prefix can be armed at a time: arming `g` drops a pending `d`/`c`
/// and the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    None,
    Operator(Operator),
    Goto,
}

/// What a Normal-mode key means given the current pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Arm a new prefix, replacing whatever was pending.
    Arm(Pending),
    /// Drop any pending prefix and do nothing else.
    Cancel,
    /// `dd`
    DeleteLine,
    /// `d$` / `c$`
    ToLineEnd(Operator),
    /// `d0` / `c0`
    ToLineStart(Operator),
    /// `gg`
    GotoTop,
    /// An ordinary single-key command. Any pending prefix is dropped first.
    Plain,
}

pub(crate) fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Keys that run their own command whatever is pending: mode entries,
/// motions, `x` and `:`.
fn runs_under_operator(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(
            'i' | 'a' | 'A' | 'o' | 'O' | 'h' | 'j' | 'k' | 'l' | 'w' | 'W' | 'b' | 'B' | 'x' | ':'
        ) | KeyCode::Left
            | KeyCode::Down
            | KeyCode::Up
            | KeyCode::Right
            | KeyCode::Enter
    )
}

/// Resolve `key` against `pending`.
///
/// A pending `d`/`c` is completed by `d`, `$` or `0`; ordinary commands run
/// in its place and drop it. A pending `g` is only completed by `g`. `G`
/// always runs. Anything else cancels the prefix with no other effect.
pub(crate) fn resolve(pending: Pending, key: &KeyEvent) -> Resolution {
    if is_cancel(key) {
        return Resolution::Cancel;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match pending {
            Pending::None => Resolution::Plain,
            _ => Resolution::Cancel,
        };
    }

    match (key.code, pending) {
        (KeyCode::Char('d'), Pending::Operator(Operator::Delete)) => Resolution::DeleteLine,
        (KeyCode::Char('d'), _) => Resolution::Arm(Pending::Operator(Operator::Delete)),
        (KeyCode::Char('c'), _) => Resolution::Arm(Pending::Operator(Operator::Change)),

        (KeyCode::Char('g'), Pending::Goto) => Resolution::GotoTop,
        (KeyCode::Char('g'), _) => Resolution::Arm(Pending::Goto),

        (KeyCode::Char('$'), Pending::Operator(op)) => Resolution::ToLineEnd(op),
        (KeyCode::Char('0'), Pending::Operator(op)) => Resolution::ToLineStart(op),

        (KeyCode::Char('G'), _) | (_, Pending::None) => Resolution::Plain,
        (code, Pending::Operator(_)) if runs_under_operator(code) => Resolution::Plain,
        _ => Resolution::Cancel,
    }
}
