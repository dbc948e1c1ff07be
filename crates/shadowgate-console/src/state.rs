//! Console UI state.
//!
//! The console is driven by discrete events applied to a [`ConsoleState`].
//! The state knows nothing about how it is drawn, so every transition can
//! be tested without a terminal or a browser.
//!
//! ```text
//! Gate ──LoadRequested──▶ Loading ──LoadSucceeded──▶ Rendered
//!  │                        │  ▲                        │
//!  │                   LoadFailed  └──ActionSucceeded───┤
//!  │                        ▼                            │
//!  │                      Error ◀────ActionFailed───────┘
//!  └──GateDenied / LogoutRequested──▶ Redirected (terminal)
//! ```

use crate::action::RowAction;
use shadowgate_core::{Redirect, UserRecord};

/// Where the console is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Access has not been checked yet.
    Gate,
    /// A list request is outstanding.
    Loading,
    /// The last list request succeeded.
    Rendered,
    /// The last request failed; rows from before are still shown.
    Error,
    /// The console navigated away. Nothing happens after this.
    Redirected(Redirect),
}

/// Events that drive the console.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    GateGranted,
    GateDenied(Redirect),
    LoadRequested,
    LoadSucceeded(Vec<UserRecord>),
    LoadFailed(String),
    ActionRequested(RowAction),
    ActionSucceeded {
        action: RowAction,
        notice: Option<String>,
    },
    ActionFailed(String),
    NoticeAcknowledged,
    LogoutRequested,
}

/// Everything a rendering surface needs to draw the console.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    phase: Phase,
    rows: Vec<UserRecord>,
    error: Option<String>,
    in_flight: Option<RowAction>,
    notice: Option<String>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Gate,
            rows: Vec::new(),
            error: None,
            in_flight: None,
            notice: None,
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: ConsoleEvent) {
        if matches!(self.phase, Phase::Redirected(_)) {
            tracing::debug!(?event, "Ignoring event after redirect");
            return;
        }

        match event {
            ConsoleEvent::GateGranted => {
                tracing::debug!("Access granted");
            }
            ConsoleEvent::GateDenied(target) => {
                self.phase = Phase::Redirected(target);
            }
            ConsoleEvent::LoadRequested => {
                self.phase = Phase::Loading;
            }
            ConsoleEvent::LoadSucceeded(rows) => {
                self.phase = Phase::Rendered;
                self.rows = rows;
                self.error = None;
            }
            ConsoleEvent::LoadFailed(message) => {
                self.phase = Phase::Error;
                self.error = Some(message);
            }
            ConsoleEvent::ActionRequested(action) => {
                self.in_flight = Some(action);
                self.notice = None;
            }
            ConsoleEvent::ActionSucceeded { action, notice } => {
                if self.in_flight.as_ref() != Some(&action) {
                    tracing::debug!(%action, "Completed action was not the one in flight");
                }
                self.in_flight = None;
                self.notice = notice;
                // The refresh that follows every action.
                self.phase = Phase::Loading;
            }
            ConsoleEvent::ActionFailed(message) => {
                self.in_flight = None;
                self.phase = Phase::Error;
                self.error = Some(message);
            }
            ConsoleEvent::NoticeAcknowledged => {
                self.notice = None;
            }
            ConsoleEvent::LogoutRequested => {
                self.phase = Phase::Redirected(Redirect::Login);
            }
        }
    }

    /// Apply one event, by value.
    pub fn reduce(mut self, event: ConsoleEvent) -> Self {
        self.apply(event);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rows in server order.
    pub fn rows(&self) -> &[UserRecord] {
        &self.rows
    }

    /// Message for the error region.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> Option<&RowAction> {
        self.in_flight.as_ref()
    }

    /// Notice waiting for the operator (a temporary password).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True when the last load succeeded with no rows.
    pub fn shows_empty_state(&self) -> bool {
        self.phase == Phase::Rendered && self.rows.is_empty()
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self.phase {
            Phase::Redirected(target) => Some(target),
            _ => None,
        }
    }
}
