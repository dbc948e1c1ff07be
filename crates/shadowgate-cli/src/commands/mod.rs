//! CLI command implementations for the Shadowgate admin console.

pub mod repl;
pub mod session;
pub mod users;

use anyhow::Context;
use shadowgate_console::{AdminConsole, Boot, HttpTransport, Operator, render};
use shadowgate_core::{ConsoleConfig, FileStorage};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Config file read when `--config` is not given. It may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "shadowgate.yaml";

/// Configuration and client storage shared by every command.
pub struct AppContext {
    pub config: ConsoleConfig,
    pub storage: FileStorage,
}

impl AppContext {
    /// Load configuration and apply command-line overrides.
    ///
    /// An explicitly named config file must exist; the default one may not.
    pub fn load(
        config_path: Option<&Path>,
        api_base: Option<String>,
        storage_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut config = match config_path {
            Some(path) => ConsoleConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ConsoleConfig::load_or_default(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load config from {DEFAULT_CONFIG_FILE}"))?,
        };

        if let Some(base) = api_base {
            config.api.base_url = base;
        }
        if let Some(path) = storage_path {
            config.storage.path = path;
        }
        config.validate().context("Invalid configuration")?;

        let storage = FileStorage::new(config.storage.path.clone());
        tracing::debug!(
            api = %config.api.base_url,
            storage = %storage.path().display(),
            "Loaded configuration"
        );
        Ok(Self { config, storage })
    }

    /// Run the access gate and build a console. A denied gate is an error
    /// naming where the operator should go instead.
    pub fn open_console(&self, operator: Arc<dyn Operator>) -> anyhow::Result<AdminConsole> {
        let transport =
            Arc::new(HttpTransport::new(&self.config.http).context("Failed to build HTTP client")?);

        match AdminConsole::boot(&self.storage, &self.config, transport, operator)
            .context("Failed to read the stored session")?
        {
            Boot::Ready(console) => Ok(console),
            Boot::Redirect(target) => anyhow::bail!(
                "Access denied: go to the {target} at {}",
                target.url(&self.config.console_url)
            ),
        }
    }
}

/// Print the console as it stands.
pub fn print_console(console: &AdminConsole) {
    print!("{}", render(console.state(), &console.session().badge()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("shadowgate.yaml");
        fs::write(&config_path, "api:\n  base_url: http://from-file/api\n").unwrap();

        let ctx = AppContext::load(
            Some(&config_path),
            Some("http://override/api".to_string()),
            Some(dir.path().join("store.json")),
        )
        .unwrap();

        assert_eq!(ctx.config.api.base_url, "http://override/api");
        assert_eq!(ctx.storage.path(), dir.path().join("store.json"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(AppContext::load(Some(&missing), None, None).is_err());
    }

    #[test]
    fn test_denied_gate_names_target() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("shadowgate.yaml");
        fs::write(&config_path, "console_url: https://host/Shadowgate_Bank/admin/\n").unwrap();

        let ctx =
            AppContext::load(Some(&config_path), None, Some(dir.path().join("store.json")))
                .unwrap();
        let err = ctx
            .open_console(Arc::new(crate::operator::TerminalOperator::batch(true)))
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Access denied: go to the login view at https://host/Shadowgate_Bank/login/"
        );
    }
}
