//! Interactive menus and prompts

use crate::error::Result;
use crate::types::MetadataKind;
use std::io::{BufRead, Write};

/// Choice on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Monitor,
    Export,
    Quit,
}

impl MainChoice {
    /// Menu text, one option per line
    pub const MENU: &'static [&'static str] = &["1: Monitor mode", "2: Export mode", "q: Quit"];

    /// Parse a menu token; `None` for anything unrecognised
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Monitor),
            "2" => Some(Self::Export),
            "q" | "Q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Choice on the export menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportChoice {
    Export(MetadataKind),
    Back,
}

impl ExportChoice {
    /// Menu text, one option per line
    pub const MENU: &'static [&'static str] = &[
        "1: Projects",
        "2: Project users",
        "3: Project statuses",
        "q: Back",
    ];

    /// Parse a menu token; `None` for anything unrecognised
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Export(MetadataKind::Projects)),
            "2" => Some(Self::Export(MetadataKind::Users)),
            "3" => Some(Self::Export(MetadataKind::Statuses)),
            "q" | "Q" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Line-oriented prompt over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line
    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show a menu and read until a recognised token is entered
    ///
    /// End of input counts as `on_eof`.
    pub fn choose<T>(
        &mut self,
        title: &str,
        options: &[&str],
        parse: impl Fn(&str) -> Option<T>,
        on_eof: T,
    ) -> Result<T> {
        loop {
            self.say(title)?;
            for option in options {
                self.say(option)?;
            }
            let Some(answer) = self.ask("Choice: ")? else {
                return Ok(on_eof);
            };
            match parse(&answer) {
                Some(choice) => return Ok(choice),
                None => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    /// Writer the prompter prints to
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}
