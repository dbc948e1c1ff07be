//! Interactive console.
//!
//! Renders the user table, then reads one command per line until `quit`,
//! `logout`, or end of input. Failed requests are shown in the error region
//! and the loop carries on.

use super::{AppContext, print_console};
use crate::operator::{TerminalOperator, read_line};
use anyhow::Context;
use shadowgate_console::{ActionOutcome, AdminConsole, RowAction};
use shadowgate_core::UserId;
use std::io::{self, Write};
use std::sync::Arc;

const HELP: &str = "\
Commands:
  refresh            reload the user list
  promote <id>       set role to admin
  demote <id>        set role to user
  reset <id>         issue a temporary password
  delete <id>        delete a user (asks first)
  logout             clear the stored credential and leave
  help               show this help
  quit               leave";

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Refresh,
    Action(RowAction),
    Logout,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<ReplCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("Too many arguments for {verb:?}"));
    }

    let with_id = |make: fn(UserId) -> RowAction| match arg {
        Some(id) => Ok(Some(ReplCommand::Action(make(UserId::from(id))))),
        None => Err(format!("Usage: {verb} <id>")),
    };
    let bare = |command: ReplCommand| match arg {
        None => Ok(Some(command)),
        Some(_) => Err(format!("{verb} takes no arguments")),
    };

    match verb.to_ascii_lowercase().as_str() {
        "refresh" | "r" => bare(ReplCommand::Refresh),
        "promote" => with_id(RowAction::Promote),
        "demote" => with_id(RowAction::Demote),
        "reset" | "reset-password" => with_id(RowAction::ResetPassword),
        "delete" => with_id(RowAction::Delete),
        "logout" => bare(ReplCommand::Logout),
        "help" | "?" => bare(ReplCommand::Help),
        "quit" | "exit" | "q" => bare(ReplCommand::Quit),
        _ => Err(format!("Unknown command {verb:?}. Type help for a list.")),
    }
}

/// Run the interactive console.
pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let mut console = ctx.open_console(Arc::new(TerminalOperator::interactive()))?;

    // A failed first load is already on screen.
    let _ = console.refresh().await;
    print_console(&console);

    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(line) = read_line() else {
            break;
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ReplCommand::Refresh => {
                let _ = console.refresh().await;
                print_console(&console);
            }
            ReplCommand::Action(action) => perform(&mut console, action).await,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Logout => {
                let target = console
                    .logout(&ctx.storage)
                    .context("Failed to clear the stored session")?;
                println!(
                    "Logged out. Sign in again at {}",
                    target.url(&ctx.config.console_url)
                );
                break;
            }
        }
    }
    Ok(())
}

async fn perform(console: &mut AdminConsole, action: RowAction) {
    match console.perform(action).await {
        Ok(ActionOutcome::Declined) => println!("Cancelled."),
        // Failures land in the error region.
        Ok(ActionOutcome::Completed) | Err(_) => print_console(console),
    }
}
