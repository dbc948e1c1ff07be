//! The admin console controller.
//!
//! Boot runs the access gate before anything touches the network. After
//! that every operation is serial: an action awaits its request, then
//! awaits a full refresh of the user list. Rows are never edited locally.

use crate::action::RowAction;
use crate::client::AdminClient;
use crate::discovery::EndpointResolver;
use crate::error::ConsoleError;
use crate::state::{ConsoleEvent, ConsoleState};
use crate::transport::Transport;
use shadowgate_core::{ClientStorage, ConsoleConfig, GateDecision, Redirect, Session};
use std::sync::Arc;

/// The human at the console.
pub trait Operator: Send + Sync {
    /// Ask a yes/no question. Blocks until answered.
    fn confirm(&self, prompt: &str) -> bool;

    /// Show a message that must be acknowledged. Blocks until it is.
    fn acknowledge(&self, message: &str);
}

/// Result of booting the console.
pub enum Boot {
    /// Access granted; the console is ready to load.
    Ready(AdminConsole),
    /// Access denied; navigate away.
    Redirect(Redirect),
}

/// What happened to a requested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend accepted the action and the list was refreshed.
    Completed,
    /// The operator declined the confirmation. Nothing was sent.
    Declined,
}

/// Admin console: session, API client and UI state.
pub struct AdminConsole {
    client: AdminClient,
    operator: Arc<dyn Operator>,
    state: ConsoleState,
    forget_display_name: bool,
}

impl AdminConsole {
    /// Run the access gate and, if it passes, build the console.
    ///
    /// No request is made here; call [`AdminConsole::refresh`] to load.
    pub fn boot(
        storage: &dyn ClientStorage,
        config: &ConsoleConfig,
        transport: Arc<dyn Transport>,
        operator: Arc<dyn Operator>,
    ) -> Result<Boot, ConsoleError> {
        let session = match Session::gate(storage)? {
            GateDecision::Granted(session) => session,
            GateDecision::Redirect(target) => {
                tracing::info!(%target, "Access denied, redirecting");
                return Ok(Boot::Redirect(target));
            }
        };

        let resolver = EndpointResolver::from_config(&config.api);
        let client = AdminClient::new(transport, session, resolver);
        let mut console = Self::new(client, operator);
        console.forget_display_name = config.forget_display_name;
        console.state.apply(ConsoleEvent::GateGranted);
        Ok(Boot::Ready(console))
    }

    /// Build a console around an existing client. Access is assumed granted.
    pub fn new(client: AdminClient, operator: Arc<dyn Operator>) -> Self {
        Self {
            client,
            operator,
            state: ConsoleState::new(),
            forget_display_name: false,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    /// Reload the user list from the backend.
    pub async fn refresh(&mut self) -> Result<(), ConsoleError> {
        self.state.apply(ConsoleEvent::LoadRequested);
        match self.client.list_users().await {
            Ok(rows) => {
                tracing::debug!(count = rows.len(), "Loaded users");
                self.state.apply(ConsoleEvent::LoadSucceeded(rows));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                self.state.apply(ConsoleEvent::LoadFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Run a row action, then refresh.
    ///
    /// Actions that need confirmation ask the operator first; a declined
    /// confirmation sends nothing. A temporary password is shown through
    /// [`Operator::acknowledge`] before the refresh.
    pub async fn perform(&mut self, action: RowAction) -> Result<ActionOutcome, ConsoleError> {
        if let Some(prompt) = action.confirmation_prompt()
            && !self.operator.confirm(prompt)
        {
            tracing::debug!(%action, "Action declined");
            return Ok(ActionOutcome::Declined);
        }

        self.state.apply(ConsoleEvent::ActionRequested(action.clone()));
        let notice = match self.client.perform(&action).await {
            Ok(notice) => notice,
            Err(e) => {
                tracing::warn!(%action, error = %e, "Action failed");
                self.state.apply(ConsoleEvent::ActionFailed(e.to_string()));
                return Err(e);
            }
        };

        tracing::info!(%action, "Action completed");
        self.state.apply(ConsoleEvent::ActionSucceeded {
            action,
            notice: notice.clone(),
        });
        if let Some(message) = notice {
            self.operator.acknowledge(&message);
            self.state.apply(ConsoleEvent::NoticeAcknowledged);
        }

        self.refresh().await?;
        Ok(ActionOutcome::Completed)
    }

    /// Clear the stored credential and navigate to the login view.
    pub fn logout(&mut self, storage: &dyn ClientStorage) -> Result<Redirect, ConsoleError> {
        Session::clear(storage, self.forget_display_name)?;
        self.state.apply(ConsoleEvent::LogoutRequested);
        tracing::info!("Logged out");
        Ok(Redirect::Login)
    }
}
