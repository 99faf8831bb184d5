//! Line-oriented input script for driving the widget from stdin.
//!
//! ```text
//! touch start 300 120 0
//! touch end 220 125 180
//! mouse start 100 100 1000
//! mouse leave 190 100 1200
//! dot 2
//! ```

use skyview_nav::{Modality, PointerEvent, PointerPhase};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Pointer(PointerEvent),
    Dot(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown phase: {0}")]
    UnknownPhase(String),
    #[error("expected {expected} arguments, got {got}")]
    WrongArity { expected: usize, got: usize },
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let (head, args) = words.split_first().ok_or(ScriptError::WrongArity {
        expected: 1,
        got: 0,
    })?;

    let command = match *head {
        "quit" | "exit" => ScriptCommand::Quit,
        "dot" => {
            expect_arity(args, 1)?;
            ScriptCommand::Dot(number(args[0])?)
        }
        "touch" => ScriptCommand::Pointer(pointer(Modality::Touch, args)?),
        "mouse" => ScriptCommand::Pointer(pointer(Modality::Mouse, args)?),
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn pointer(modality: Modality, args: &[&str]) -> Result<PointerEvent, ScriptError> {
    expect_arity(args, 4)?;
    let phase = match args[0] {
        "start" | "down" => PointerPhase::Start,
        "move" => PointerPhase::Move,
        "end" | "up" => PointerPhase::End,
        "leave" => PointerPhase::Leave,
        other => return Err(ScriptError::UnknownPhase(other.to_string())),
    };
    Ok(PointerEvent::new(
        modality,
        phase,
        number(args[1])?,
        number(args[2])?,
        number(args[3])?,
    ))
}

fn expect_arity(args: &[&str], expected: usize) -> Result<(), ScriptError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::WrongArity {
            expected,
            got: args.len(),
        })
    }
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, ScriptError> {
    word.parse()
        .map_err(|_| ScriptError::InvalidNumber(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_touch_event() {
        let cmd = parse_line("touch start 300 120.5 42").unwrap();
        assert_eq!(
            cmd,
            Some(ScriptCommand::Pointer(PointerEvent::touch(
                PointerPhase::Start,
                300.0,
                120.5,
                42
            )))
        );
    }

    #[test]
    fn parses_mouse_aliases() {
        let cmd = parse_line("mouse up 1 2 3").unwrap();
        assert_eq!(
            cmd,
            Some(ScriptCommand::Pointer(PointerEvent::mouse(PointerPhase::End, 1.0, 2.0, 3)))
        );
    }

    #[test]
    fn parses_dot_and_quit() {
        assert_eq!(parse_line("dot 2").unwrap(), Some(ScriptCommand::Dot(2)));
        assert_eq!(parse_line("  quit ").unwrap(), Some(ScriptCommand::Quit));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("# swipe left").unwrap(), None);
    }

    #[test]
    fn reports_errors() {
        assert_eq!(
            parse_line("pen start 1 2 3"),
            Err(ScriptError::UnknownCommand("pen".into()))
        );
        assert_eq!(
            parse_line("touch hover 1 2 3"),
            Err(ScriptError::UnknownPhase("hover".into()))
        );
        assert_eq!(
            parse_line("touch start 1 2"),
            Err(ScriptError::WrongArity { expected: 4, got: 3 })
        );
        assert_eq!(
            parse_line("dot -1"),
            Err(ScriptError::InvalidNumber("-1".into()))
        );
        assert_eq!(
            parse_line("touch end 1 2 -5"),
            Err(ScriptError::InvalidNumber("-5".into()))
        );
    }
}
