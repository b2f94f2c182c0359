//! HTTP client for the storefront backend.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::Package;
use crate::esim::models::{EsimRecord, TopupOrder};
use crate::purchase::models::PurchaseOrder;
use crate::session::models::Identity;

use super::errors::GatewayError;
use super::models::VerifiedUser;

/// Request header carrying the verified user id.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Configuration for connecting to the storefront backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL, e.g. `"http://localhost:8000"`.
    pub base_url: String,
}

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: Client,
}

impl BackendClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    fn tagged(&self, builder: RequestBuilder, user: &Identity) -> RequestBuilder {
        builder.header(USER_ID_HEADER, user.id)
    }

    async fn post_ack<B: Serialize + Sync>(
        &self,
        user: &Identity,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        let response = self
            .tagged(self.http.post(self.endpoint(path)), user)
            .json(body)
            .send()
            .await?;

        let envelope: AckEnvelope = decode(response).await?;

        if envelope.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(message_or_unknown(envelope.error)))
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        user: &Identity,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, GatewayError> {
        let response = self
            .tagged(self.http.get(self.endpoint(path)), user)
            .query(query)
            .send()
            .await?;

        let envelope: ListEnvelope<T> = decode(response).await?;

        if envelope.success {
            Ok(envelope.data)
        } else {
            Err(GatewayError::Rejected(message_or_unknown(envelope.error)))
        }
    }
}

#[async_trait]
impl BackendApi for BackendClient {
    async fn verify_init_data(&self, init_data: &str) -> Result<VerifiedUser, GatewayError> {
        let body = serde_json::json!({ "initData": init_data });

        let response = self
            .http
            .post(self.endpoint("/auth/telegram"))
            .json(&body)
            .send()
            .await?;

        let envelope: AuthEnvelope = decode(response).await?;

        if !envelope.success {
            return Err(GatewayError::Rejected(message_or_unknown(envelope.error)));
        }

        envelope.user.ok_or_else(|| {
            GatewayError::UnexpectedResponse("verification response carries no user".to_owned())
        })
    }

    async fn logout(&self, user: &Identity) -> Result<(), GatewayError> {
        self.post_ack(user, "/auth/logout", &serde_json::json!({}))
            .await
    }

    async fn my_esims(&self, user: &Identity) -> Result<Vec<EsimRecord>, GatewayError> {
        self.get_list(user, "/esim/my-esims", &[]).await
    }

    async fn buy(&self, user: &Identity, order: &PurchaseOrder) -> Result<(), GatewayError> {
        self.post_ack(user, "/esim/buy", order).await
    }

    async fn cancel(&self, user: &Identity, iccid: &str, tran_no: &str) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "iccid": iccid, "tran_no": tran_no });

        self.post_ack(user, "/esim/cancel", &body).await
    }

    async fn delete(&self, user: &Identity, iccid: &str) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "iccid": iccid });

        self.post_ack(user, "/esim/delete", &body).await
    }

    async fn topup_packages(
        &self,
        user: &Identity,
        iccid: &str,
    ) -> Result<Vec<Package>, GatewayError> {
        self.get_list(user, "/esim/topup-packages", &[("iccid", iccid)])
            .await
    }

    async fn topup(&self, user: &Identity, order: &TopupOrder) -> Result<(), GatewayError> {
        self.post_ack(user, "/esim/topup", order).await
    }
}

/// Backend operations the rest of the application depends on.
#[automock]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Exchange a host-signed init payload for a verified account row.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when verification is rejected.
    async fn verify_init_data(&self, init_data: &str) -> Result<VerifiedUser, GatewayError>;

    /// Tell the backend the session is over.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn logout(&self, user: &Identity) -> Result<(), GatewayError>;

    /// Fetch all `eSIMs` belonging to the user.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn my_esims(&self, user: &Identity) -> Result<Vec<EsimRecord>, GatewayError>;

    /// Submit a purchase.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn buy(&self, user: &Identity, order: &PurchaseOrder) -> Result<(), GatewayError>;

    /// Revoke a not-yet-activated `eSIM`.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn cancel(&self, user: &Identity, iccid: &str, tran_no: &str)
    -> Result<(), GatewayError>;

    /// Remove a finished `eSIM`.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn delete(&self, user: &Identity, iccid: &str) -> Result<(), GatewayError>;

    /// List top-up offers applicable to one `eSIM`.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn topup_packages(&self, user: &Identity, iccid: &str)
    -> Result<Vec<Package>, GatewayError>;

    /// Apply a top-up package.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a rejected call.
    async fn topup(&self, user: &Identity, order: &TopupOrder) -> Result<(), GatewayError>;
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();

    // Rejections arrive with 4xx statuses but still carry the envelope.
    if let Some(message) = rejected_message(&text) {
        return Err(GatewayError::Rejected(message));
    }

    Err(GatewayError::UnexpectedResponse(format!(
        "request failed with status {status}: {text}"
    )))
}

fn rejected_message(body: &str) -> Option<String> {
    let envelope: AckEnvelope = serde_json::from_str(body).ok()?;

    if envelope.success { None } else { envelope.error }
}

fn message_or_unknown(error: Option<String>) -> String {
    error.unwrap_or_else(|| "unknown error".to_owned())
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    success: bool,
    #[serde(default)]
    user: Option<VerifiedUser>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct ListEnvelope<T> {
    success: bool,
    #[serde(default)]
    data: Vec<T>,
    #[serde(default)]
    error: Option<String>,
}
