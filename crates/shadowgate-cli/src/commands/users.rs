//! One-shot user commands.
//!
//! `sg-admin list` - Print the user list.
//! `sg-admin promote|demote|reset-password|delete <id>` - Run one row action.
//! `sg-admin logout` - Clear the stored credential.

use super::{AppContext, print_console};
use crate::operator::TerminalOperator;
use anyhow::Context;
use shadowgate_console::{ActionOutcome, RowAction};
use shadowgate_core::{Redirect, Session};
use std::sync::Arc;

/// Load and print the user list.
pub async fn list(ctx: &AppContext) -> anyhow::Result<()> {
    let mut console = ctx.open_console(Arc::new(TerminalOperator::batch(false)))?;
    let result = console.refresh().await;
    print_console(&console);
    result.context("Failed to load users")
}

/// Run one action, then print the refreshed list.
pub async fn run_action(ctx: &AppContext, action: RowAction, assume_yes: bool) -> anyhow::Result<()> {
    let mut console = ctx.open_console(Arc::new(TerminalOperator::batch(assume_yes)))?;

    let result = console.perform(action.clone()).await;
    match result {
        Ok(ActionOutcome::Declined) => {
            println!("Cancelled.");
            Ok(())
        }
        Ok(ActionOutcome::Completed) => {
            print_console(&console);
            Ok(())
        }
        Err(e) => {
            print_console(&console);
            Err(e).with_context(|| format!("Failed to {action}"))
        }
    }
}

/// Clear the stored credential. Works whether or not the gate would pass.
pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    Session::clear(&ctx.storage, ctx.config.forget_display_name)
        .context("Failed to clear the stored session")?;
    tracing::info!("Logged out");
    println!(
        "Logged out. Sign in again at {}",
        Redirect::Login.url(&ctx.config.console_url)
    );
    Ok(())
}
