use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod operator;

use commands::AppContext;
use shadowgate_console::RowAction;
use shadowgate_core::UserId;

#[derive(Parser, Debug)]
#[command(name = "sg-admin", version, about = "Shadowgate admin console")]
struct Cli {
    /// Path to the configuration file (default: shadowgate.yaml, optional)
    #[arg(long, global = true, env = "SG_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Backend API base URL, overrides api.base_url
    #[arg(long = "api-base", global = true, env = "SG_API_BASE")]
    api_base: Option<String>,

    /// Client storage file, overrides storage.path
    #[arg(long, global = true, env = "SG_ADMIN_STORAGE")]
    storage: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and print the user list.
    List,

    /// Set a user's role to admin.
    Promote { id: String },

    /// Set a user's role to user.
    Demote { id: String },

    /// Issue a temporary password for a user.
    ResetPassword { id: String },

    /// Delete a user. Asks for confirmation unless --yes is given.
    Delete {
        id: String,
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },

    /// Clear the stored credential.
    Logout,

    /// Inspect or write the stored session.
    Session {
        #[command(subcommand)]
        cmd: SessionCommand,
    },

    /// Interactive console.
    Console,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Store a credential, the way the login flow does.
    Set {
        #[arg(long)]
        token: String,
        #[arg(long)]
        role: String,
        /// Display name shown in the badge
        #[arg(long)]
        user: Option<String>,
    },

    /// Show the stored session and whether it passes the access gate.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = AppContext::load(cli.config.as_deref(), cli.api_base, cli.storage)?;

    match cli.cmd {
        Command::List => commands::users::list(&ctx).await,
        Command::Promote { id } => {
            commands::users::run_action(&ctx, RowAction::Promote(UserId::new(id)), false).await
        }
        Command::Demote { id } => {
            commands::users::run_action(&ctx, RowAction::Demote(UserId::new(id)), false).await
        }
        Command::ResetPassword { id } => {
            commands::users::run_action(&ctx, RowAction::ResetPassword(UserId::new(id)), false)
                .await
        }
        Command::Delete { id, yes } => {
            commands::users::run_action(&ctx, RowAction::Delete(UserId::new(id)), yes).await
        }
        Command::Logout => commands::users::logout(&ctx),
        Command::Session { cmd } => match cmd {
            SessionCommand::Set { token, role, user } => {
                commands::session::set(&ctx, &token, &role, user)
            }
            SessionCommand::Show => commands::session::show(&ctx),
        },
        Command::Console => commands::repl::run(&ctx).await,
    }
}

/// Logs go to stderr; stdout is the console itself.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
