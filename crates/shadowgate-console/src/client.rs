//! Typed client for the backend's admin user API.
//!
//! | Operation      | Method | URL                          |
//! |----------------|--------|------------------------------|
//! | List users     | GET    | `<base>`                     |
//! | Change role    | PATCH  | `<base>/<id>/role`           |
//! | Reset password | POST   | `<base>/<id>/reset-password` |
//! | Delete user    | DELETE | `<base>/<id>`                |
//!
//! `<base>` is the user-list URL adopted by the [`EndpointResolver`].

use crate::action::RowAction;
use crate::discovery::EndpointResolver;
use crate::error::ConsoleError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};
use serde_json::{Value, json};
use shadowgate_core::{
    ResetPasswordResponse, RoleUpdate, Session, TargetRole, UserId, UserRecord, normalize_user_list,
};
use std::sync::Arc;

/// Admin API client bound to one session.
pub struct AdminClient {
    transport: Arc<dyn Transport>,
    session: Session,
    resolver: EndpointResolver,
}

impl AdminClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session, resolver: EndpointResolver) -> Self {
        Self {
            transport,
            session,
            resolver,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Fetch the user list in server order.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ConsoleError> {
        let base = self.base_url().await?;
        let response = self.send(Method::Get, base.to_string(), None).await?;
        let body = response
            .json_body()
            .ok_or_else(|| ConsoleError::MalformedResponse("response body is not JSON".to_string()))?;

        normalize_user_list(body).map_err(|e| ConsoleError::MalformedResponse(e.to_string()))
    }

    /// Set a user's role.
    pub async fn set_role(&self, id: &UserId, role: TargetRole) -> Result<(), ConsoleError> {
        let url = self.user_url(id, "/role").await?;
        self.send(Method::Patch, url, Some(json!(RoleUpdate { role }))).await?;
        tracing::info!(user_id = %id, role = %role, "Changed user role");
        Ok(())
    }

    /// Reset a user's password. Returns the temporary password, if issued.
    pub async fn reset_password(&self, id: &UserId) -> Result<Option<String>, ConsoleError> {
        let url = self.user_url(id, "/reset-password").await?;
        let response = self.send(Method::Post, url, None).await?;
        tracing::info!(user_id = %id, "Reset user password");

        // A success without a readable body simply has no password to show.
        let temp_password = response
            .json_body()
            .and_then(|body| serde_json::from_value::<ResetPasswordResponse>(body).ok())
            .and_then(|body| body.temp_password().map(str::to_string));
        Ok(temp_password)
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ConsoleError> {
        let url = self.user_url(id, "").await?;
        self.send(Method::Delete, url, None).await?;
        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }

    /// Run one row action. Returns an operator notice, if the action has one.
    pub async fn perform(&self, action: &RowAction) -> Result<Option<String>, ConsoleError> {
        match action {
            RowAction::Promote(id) => self.set_role(id, TargetRole::Admin).await.map(|_| None),
            RowAction::Demote(id) => self.set_role(id, TargetRole::User).await.map(|_| None),
            RowAction::ResetPassword(id) => Ok(self
                .reset_password(id)
                .await?
                .map(|password| format!("Temporary password: {password}"))),
            RowAction::Delete(id) => self.delete_user(id).await.map(|_| None),
        }
    }

    async fn base_url(&self) -> Result<&str, ConsoleError> {
        self.resolver.resolve(self.transport.as_ref(), &self.session).await
    }

    async fn user_url(&self, id: &UserId, suffix: &str) -> Result<String, ConsoleError> {
        let base = self.base_url().await?;
        Ok(format!("{base}/{}{suffix}", urlencoding::encode(id.as_str())))
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<ApiResponse, ConsoleError> {
        let mut request = ApiRequest::new(method, url)
            .header("Authorization", self.session.bearer())
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
            ConsoleError::from(e)
        })?;

        if !response.is_success() {
            let err = ConsoleError::from_failure(response.status, &response.body);
            tracing::warn!(method = %method, url = %url, status = response.status, error = %err, "API error");
            return Err(err);
        }
        Ok(response)
    }
}
