use crate::gate::session::SessionState;
use crate::utils::constants::{
    MSG_GATE_UNREACHABLE, MSG_PASSWORD_INVALID, MSG_PASSWORD_MISSING, VALIDATE_PASSWORD_PATH,
};
use crate::utils::urls::endpoint_url;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Serialize, Debug)]
struct PasswordRequest<'a> {
    password: &'a str,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PasswordResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("{}", MSG_PASSWORD_MISSING)]
    MissingPassword,
    #[error("{0}")]
    Rejected(String),
    #[error("{}", MSG_GATE_UNREACHABLE)]
    Unreachable(#[source] reqwest::Error),
    #[error("could not persist the session: {0:#}")]
    Session(anyhow::Error),
}

#[derive(Clone)]
pub struct PasswordGate {
    http_client: Client,
    endpoint: Url,
}

impl PasswordGate {
    pub fn new(http_client: Client, api_base: &Url) -> Self {
        Self {
            http_client,
            endpoint: endpoint_url(api_base, VALIDATE_PASSWORD_PATH),
        }
    }

    pub async fn validate(&self, password: &str) -> Result<PasswordResponse, GateError> {
        if password.is_empty() {
            return Err(GateError::MissingPassword);
        }

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&PasswordRequest { password })
            .send()
            .await
            .map_err(GateError::Unreachable)?;
        let status = response.status();

        // 400 and 401 answers carry the same body shape as 200
        let body: PasswordResponse = response.json().await.map_err(GateError::Unreachable)?;
        tracing::debug!("password check answered {} success={}", status, body.success);
        Ok(body)
    }

    /// Checks the password and, on success, records it in the session.
    pub async fn unlock(&self, password: &str, session: &mut SessionState) -> Result<(), GateError> {
        let answer = self.validate(password).await?;
        if !answer.success {
            let message = answer
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| MSG_PASSWORD_INVALID.to_string());
            tracing::warn!("password rejected: {}", message);
            return Err(GateError::Rejected(message));
        }

        session.mark_authenticated().map_err(GateError::Session)?;
        tracing::info!("session unlocked");
        Ok(())
    }
}
