//! Session commands.
//!
//! `sg-admin session set` - Store a credential in client storage.
//! `sg-admin session show` - Describe the stored session and the gate's verdict.

use super::AppContext;
use anyhow::Context;
use shadowgate_core::{ClientStorage, GateDecision, ROLE_KEY, Session, TOKEN_KEY};

/// Store a credential, the way the external login flow does.
pub fn set(ctx: &AppContext, token: &str, role: &str, user: Option<String>) -> anyhow::Result<()> {
    anyhow::ensure!(!token.trim().is_empty(), "Token must not be empty");

    let session = Session::new(token.trim(), role, user);
    session
        .store(&ctx.storage)
        .with_context(|| format!("Failed to write {}", ctx.storage.path().display()))?;

    println!("Stored session in {}", ctx.storage.path().display());
    println!("{}", session.badge());
    if !session.is_admin() {
        println!("Note: role {:?} cannot use the console.", session.role());
    }
    Ok(())
}

/// Print the stored session. The token itself is never shown.
pub fn show(ctx: &AppContext) -> anyhow::Result<()> {
    print!("{}", describe(ctx)?);
    Ok(())
}

fn describe(ctx: &AppContext) -> anyhow::Result<String> {
    let read_err = || format!("Failed to read {}", ctx.storage.path().display());

    let decision = Session::gate(&ctx.storage).with_context(read_err)?;
    let text = match decision {
        GateDecision::Granted(session) => {
            format!("{}\nAccess: granted\n", session.badge())
        }
        GateDecision::Redirect(target) => {
            let has_token = ctx.storage.get(TOKEN_KEY).with_context(read_err)?.is_some();
            let role = ctx.storage.get(ROLE_KEY).with_context(read_err)?;
            format!(
                "Token: {}\nRole: {}\nAccess: denied, redirects to the {target} ({})\n",
                if has_token { "set" } else { "not set" },
                role.as_deref().unwrap_or("-"),
                target.url(&ctx.config.console_url),
            )
        }
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowgate_core::{ConsoleConfig, FileStorage};

    fn context(dir: &tempfile::TempDir) -> AppContext {
        AppContext {
            config: ConsoleConfig {
                console_url: "/app/admin/".to_string(),
                ..Default::default()
            },
            storage: FileStorage::new(dir.path().join("storage.json")),
        }
    }

    #[test]
    fn test_set_then_show_granted() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        set(&ctx, "tok", "Admin", Some("alice".to_string())).unwrap();
        assert_eq!(describe(&ctx).unwrap(), "Role: admin · alice\nAccess: granted\n");
    }

    #[test]
    fn test_show_without_token() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        assert_eq!(
            describe(&ctx).unwrap(),
            "Token: not set\nRole: -\nAccess: denied, redirects to the login view (/app/login/)\n"
        );
    }

    #[test]
    fn test_show_non_admin() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        set(&ctx, "tok", "user", None).unwrap();
        let text = describe(&ctx).unwrap();
        assert!(text.contains("Token: set\n"));
        assert!(!text.contains("tok\n"));
        assert!(text.ends_with("redirects to the application root (/app/)\n"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(set(&context(&dir), "  ", "admin", None).is_err());
    }
}
