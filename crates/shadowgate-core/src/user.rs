//! User records as served by the backend.
//!
//! The backend is the source of truth; the console only keeps a transient
//! copy for rendering and never edits it locally.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Opaque user identifier.
///
/// The backend may send a number or a string; the textual form is kept
/// and used verbatim when building action URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(UserId(s)),
            Value::Number(n) => Ok(UserId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "user id must be a string or number, got {other}"
            ))),
        }
    }
}

/// `null` reads as an empty string.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default)]
    pub ingame_username: Option<String>,
    #[serde(default)]
    pub company_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserRecord {
    /// In-game username, or an empty string.
    pub fn ingame_username_display(&self) -> &str {
        self.ingame_username.as_deref().unwrap_or_default()
    }

    /// Company code, or an empty string.
    pub fn company_code_display(&self) -> &str {
        self.company_code.as_deref().unwrap_or_default()
    }

    /// Creation time as `YYYY-MM-DD HH:MM:SS` in local time.
    ///
    /// Offset-less timestamps are taken as already local. Anything that does
    /// not parse is shown as sent.
    pub fn created_at_display(&self) -> String {
        let Some(raw) = self.created_at.as_deref() else {
            return String::new();
        };
        format_timestamp(raw).unwrap_or_else(|| raw.to_string())
    }
}

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(raw: &str) -> Option<String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local).format(DISPLAY_FORMAT).to_string());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.format(DISPLAY_FORMAT).to_string())
}

/// The user-list body could not be understood.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct MalformedPayload(pub String);

/// Normalize a user-list body to a sequence of records.
///
/// Accepts a bare array, or an envelope object with a `users` array. An
/// envelope without `users` (or with `users: null`) is an empty list.
/// Order is preserved.
pub fn normalize_user_list(body: Value) -> Result<Vec<UserRecord>, MalformedPayload> {
    let records = match body {
        Value::Array(_) => body,
        Value::Object(mut envelope) => match envelope.remove("users") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(users @ Value::Array(_)) => users,
            Some(other) => {
                return Err(MalformedPayload(format!(
                    "expected `users` to be a list, got {}",
                    json_kind(&other)
                )));
            }
        },
        other => {
            return Err(MalformedPayload(format!(
                "expected a list of users, got {}",
                json_kind(&other)
            )));
        }
    };

    serde_json::from_value(records)
        .map_err(|e| MalformedPayload(format!("invalid user record: {e}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Role a promote/demote action sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    Admin,
    User,
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRole::Admin => write!(f, "admin"),
            TargetRole::User => write!(f, "user"),
        }
    }
}

/// Body of a role change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: TargetRole,
}

/// Body of a reset-password response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordResponse {
    #[serde(default)]
    pub temp_password: Option<String>,
}

impl ResetPasswordResponse {
    /// The temporary password, if one was issued.
    pub fn temp_password(&self) -> Option<&str> {
        self.temp_password.as_deref().filter(|p| !p.is_empty())
    }
}
