//! # shadowgate-core
//!
//! Types shared by the Shadowgate admin console crates.
//!
//! - **config**: console configuration loaded from `shadowgate.yaml`
//! - **storage**: client-side key-value storage holding the issued credential
//! - **session**: the admin session and the access gate run at boot
//! - **navigation**: redirect targets (login view, application root)
//! - **user**: user records as served by the backend and list normalisation

pub mod config;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod user;

pub use config::{ApiConfig, ConfigError, ConsoleConfig, HttpConfig, StorageConfig};
pub use navigation::{Redirect, app_root_from_console};
pub use session::{ADMIN_ROLE, GateDecision, ROLE_KEY, Session, TOKEN_KEY, USER_KEY};
pub use storage::{ClientStorage, FileStorage, MemoryStorage, StorageError};
pub use user::{
    MalformedPayload, ResetPasswordResponse, RoleUpdate, TargetRole, UserId, UserRecord,
    normalize_user_list,
};
