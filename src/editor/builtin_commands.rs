//! The `:` command line.

use super::Editor;
use crate::input::ByteSource;
use crate::terminal::Terminal;
use crate::types::Flow;
use crate::utils::parse_count;
use anyhow::Result;

const HELP: &str = ":help quit | :help editor | :help other";
const HELP_QUIT: &str = ":q = quit | :q! = override quit | :w = save | :wq = save and quit";
const HELP_EDITOR: &str = ":num = goto line num | / = search";
const HELP_OTHER: &str = ":help = shows help | :creds = shows credits";
const CREDITS: &str = "Made by OrangeXarot, Named by i._.tram";

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Jump to a 1-based line number.
    Goto(usize),
    Write,
    WriteQuit,
    Quit,
    ForceQuit,
    /// Show a fixed message.
    Message(&'static str),
    Credits,
    Invalid(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        if let Some(n) = parse_count(input) {
            return Self::Goto(n);
        }
        match input {
            "w" => Self::Write,
            "wq" => Self::WriteQuit,
            "q" => Self::Quit,
            "q!" => Self::ForceQuit,
            "help" => Self::Message(HELP),
            "help quit" => Self::Message(HELP_QUIT),
            "help editor" => Self::Message(HELP_EDITOR),
            "help other" => Self::Message(HELP_OTHER),
            "creds" => Self::Credits,
            other => Self::Invalid(other.to_string()),
        }
    }
}

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// Prompt for a `:` command and run it.
    pub(crate) fn command_prompt(&mut self) -> Result<Flow> {
        let Some(input) = self.prompt("Command: :", None)? else {
            return Ok(Flow::Continue);
        };
        self.run_command(&Command::parse(&input))
    }

    pub fn run_command(&mut self, cmd: &Command) -> Result<Flow> {
        tracing::debug!(?cmd, "command");
        match cmd {
            Command::Goto(n) => {
                if (1..=self.doc.line_count()).contains(n) {
                    self.cursor.y = n - 1;
                    self.clamp_cursor_x();
                }
            }
            Command::Write => {
                self.save()?;
            }
            Command::WriteQuit => {
                if self.save()? {
                    return Ok(Flow::Quit);
                }
            }
            Command::Quit => {
                if self.doc.is_dirty() {
                    self.set_status("Unsaved Changes Detected (use ! to override)");
                } else {
                    return Ok(Flow::Quit);
                }
            }
            Command::ForceQuit => return Ok(Flow::Quit),
            Command::Message(text) => self.set_status(text),
            Command::Credits => self.set_status(CREDITS),
            Command::Invalid(text) => self.set_status(format!("Invalid Syntax \":{text}\"")),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tests::{drive, editor, status};

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("12"), Command::Goto(12));
        assert_eq!(Command::parse("w"), Command::Write);
        assert_eq!(Command::parse("wq"), Command::WriteQuit);
        assert_eq!(Command::parse("q!"), Command::ForceQuit);
        assert_eq!(Command::parse("help other"), Command::Message(HELP_OTHER));
        assert_eq!(Command::parse("wat"), Command::Invalid("wat".into()));
        assert_eq!(Command::parse("1x"), Command::Invalid("1x".into()));
    }

    #[test]
    fn goto_moves_to_line() {
        let mut ed = editor(&["a", "b", "c"], b":3\r");
        drive(&mut ed);
        assert_eq!(ed.cursor.y, 2);
    }

    #[test]
    fn goto_out_of_range_is_ignored() {
        let mut ed = editor(&["a", "b", "c"], b":9\r:0\r");
        drive(&mut ed);
        assert_eq!(ed.cursor.y, 0);
    }

    #[test]
    fn quit_refuses_when_dirty() {
        let mut ed = editor(&["a"], b"x:q\r");
        assert!(!drive(&mut ed));
        assert_eq!(status(&ed), "Unsaved Changes Detected (use ! to override)");

        let mut ed = editor(&["a"], b"x:q!\r");
        assert!(drive(&mut ed));
    }

    #[test]
    fn help_messages() {
        let mut ed = editor(&[], b":help quit\r");
        drive(&mut ed);
        assert_eq!(status(&ed), HELP_QUIT);
    }

    #[test]
    fn credits() {
        let mut ed = editor(&[], b":creds\r");
        drive(&mut ed);
        assert_eq!(status(&ed), CREDITS);
    }

    #[test]
    fn unknown_command_reports_syntax_error() {
        let mut ed = editor(&[], b":frob\r");
        drive(&mut ed);
        assert_eq!(status(&ed), "Invalid Syntax \":frob\"");
    }
}
