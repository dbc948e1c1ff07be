//! Redirect targets.
//!
//! The console never shows an authentication failure as an error; it
//! navigates away instead. Targets are derived from the URL the console
//! is served from, so they work no matter how deep the console is mounted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the operator is sent when the console cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redirect {
    /// The login view, `<app root>login/`.
    Login,
    /// The application root.
    Home,
}

impl Redirect {
    /// Resolve the target URL relative to the console's own URL.
    pub fn url(&self, console_url: &str) -> String {
        let root = app_root_from_console(console_url);
        match self {
            Redirect::Login => format!("{root}login/"),
            Redirect::Home => root,
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Redirect::Login => write!(f, "login view"),
            Redirect::Home => write!(f, "application root"),
        }
    }
}

/// Compute the application root from the console URL.
///
/// Everything from the first `/admin/` segment (case-insensitive) onward is
/// dropped, and the result always ends with `/`:
/// `https://host/Shadowgate_Bank/admin/` becomes `https://host/Shadowgate_Bank/`.
pub fn app_root_from_console(console_url: &str) -> String {
    // Keep `scheme://host` out of the match so a host named "admin" is safe.
    let (origin, path) = match console_url.find("://") {
        Some(scheme_end) => {
            let after_scheme = scheme_end + 3;
            match console_url[after_scheme..].find('/') {
                Some(offset) => console_url.split_at(after_scheme + offset),
                None => (console_url, ""),
            }
        }
        None => ("", console_url),
    };

    let mut root = match path.to_ascii_lowercase().find("/admin/") {
        Some(idx) => format!("{}/", &path[..idx]),
        None => path.to_string(),
    };
    if !root.ends_with('/') {
        root.push('/');
    }
    format!("{origin}{root}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_root_strips_admin_segment() {
        assert_eq!(
            app_root_from_console("/Shadowgate_Bank/admin/"),
            "/Shadowgate_Bank/"
        );
        assert_eq!(
            app_root_from_console("/Shadowgate_Bank/Admin/index.html"),
            "/Shadowgate_Bank/"
        );
        assert_eq!(app_root_from_console("/admin/"), "/");
    }

    #[test]
    fn test_app_root_without_admin_segment() {
        assert_eq!(app_root_from_console("/console"), "/console/");
        assert_eq!(app_root_from_console(""), "/");
    }

    #[test]
    fn test_app_root_absolute_url() {
        assert_eq!(
            app_root_from_console("https://bank.example/Shadowgate_Bank/admin/users"),
            "https://bank.example/Shadowgate_Bank/"
        );
        assert_eq!(
            app_root_from_console("https://admin/admin/"),
            "https://admin/"
        );
        assert_eq!(app_root_from_console("https://bank.example"), "https://bank.example/");
    }

    #[test]
    fn test_redirect_urls() {
        let console = "https://bank.example/sg/admin/";
        assert_eq!(Redirect::Login.url(console), "https://bank.example/sg/login/");
        assert_eq!(Redirect::Home.url(console), "https://bank.example/sg/");
    }
}
