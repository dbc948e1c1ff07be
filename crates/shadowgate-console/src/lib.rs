//! # shadowgate-console
//!
//! Admin console for Shadowgate. Gates access by role, loads the user list
//! from the backend, renders it, and dispatches row actions.
//!
//! - **Access gate**: no stored token sends the operator to the login view;
//!   a non-admin role sends them to the application root
//! - **Endpoint discovery**: the user-list URL is probed once per session
//! - **Row actions**: promote, demote, reset password, delete (confirmed)
//! - **Reload after every action**: rows are never edited locally
//!
//! ## Architecture
//!
//! ```text
//!  client storage ──▶ Session::gate ──▶ AdminConsole
//!                                          │
//!                     ConsoleState ◀───────┤ events
//!                          │               │
//!                       render()      AdminClient ──▶ EndpointResolver
//!                                          │
//!                                      Transport (reqwest)
//!                                          │
//!                                          ▼
//!                                     backend REST API
//! ```

pub mod action;
pub mod client;
pub mod console;
pub mod discovery;
pub mod error;
pub mod render;
pub mod state;
pub mod transport;

#[cfg(test)]
mod testing;

pub use action::RowAction;
pub use client::AdminClient;
pub use console::{ActionOutcome, AdminConsole, Boot, Operator};
pub use discovery::EndpointResolver;
pub use error::ConsoleError;
pub use render::{render, render_table};
pub use state::{ConsoleEvent, ConsoleState, Phase};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportError};
