use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;

use crate::error::AppError;

use super::{TokenVerifier, VerifierId, rejected};

/// Asks the external identity service who owns a token.
///
/// `GET {url}` is sent with the caller's `Authorization` value forwarded as
/// is. A 2xx reply carrying `{"user_id": <positive int>}` identifies the
/// caller; everything else is a verification failure.
#[derive(Clone)]
pub struct RemoteVerifier {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IdentityResponse {
    user_id: Option<i64>,
}

impl RemoteVerifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::internal(format!("identity client build failed: {err}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TokenVerifier for RemoteVerifier {
    fn id(&self) -> VerifierId {
        VerifierId::Remote
    }

    async fn verify(&self, authorization: &str) -> Result<i64, AppError> {
        let response = self
            .client
            .get(&self.url)
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, timeout = err.is_timeout(), "identity service call failed");
                rejected()
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "identity service rejected token");
            return Err(rejected());
        }

        let body = response.json::<IdentityResponse>().await.map_err(|err| {
            tracing::warn!(error = %err, "identity service returned an unreadable body");
            rejected()
        })?;

        match body.user_id {
            Some(user_id) if user_id > 0 => Ok(user_id),
            _ => {
                tracing::debug!("identity service returned no user id");
                Err(rejected())
            }
        }
    }
}
