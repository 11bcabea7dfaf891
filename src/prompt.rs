use anyhow::Result;
use std::io::{self, Write};

/// Interactive yes/no capability. Steps that need an answer take this as
/// a collaborator so they can run against a canned answer in tests and
/// in `--yes` mode.
pub trait Confirm {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Reads answers from stdin. EOF or an empty line picks the default.
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let choices = if default { "[Y/n]" } else { "[y/N]" };
        print!("{} {}: ", prompt, choices);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let response = input.trim().to_lowercase();
        if response.is_empty() {
            return Ok(default);
        }
        Ok(response.starts_with('y'))
    }
}

/// Fixed answer for every prompt.
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str, _default: bool) -> Result<bool> {
        Ok(self.0)
    }
}
