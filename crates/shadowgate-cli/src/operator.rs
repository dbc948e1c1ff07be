//! Terminal prompts for the operator.

use shadowgate_console::Operator;
use std::io::{self, Write};

/// Asks on stdout and reads answers from stdin.
pub struct TerminalOperator {
    assume_yes: bool,
    wait_for_enter: bool,
}

impl TerminalOperator {
    /// For one-shot commands. Notices are printed without waiting.
    pub fn batch(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            wait_for_enter: false,
        }
    }

    /// For the interactive console. Notices wait for Enter.
    pub fn interactive() -> Self {
        Self {
            assume_yes: false,
            wait_for_enter: true,
        }
    }
}

impl Operator for TerminalOperator {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        match read_line() {
            Some(answer) => is_yes(&answer),
            None => false,
        }
    }

    fn acknowledge(&self, message: &str) {
        println!("{message}");
        if self.wait_for_enter {
            print!("Press Enter to continue.");
            let _ = io::stdout().flush();
            let _ = read_line();
        }
    }
}

/// One line from stdin. `None` at end of input or on a read error.
pub fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read from stdin");
            None
        }
    }
}

/// Only an explicit yes confirms.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(TerminalOperator::batch(true).confirm("Delete this user?"));
    }
}
