//! # Layer Client
//!
//! CRUD calls against the action-routed `layer-handler` endpoint.
//! One URL serves every operation; the `action` query parameter picks it:
//!
//! | Operation | Method | Query              | Body               |
//! |-----------|--------|--------------------|--------------------|
//! | read all  | GET    | `action=readAll`   | none               |
//! | add       | POST   | `action=add`       | Layer              |
//! | save      | POST   | `action=save`      | Layer              |
//! | delete    | DELETE | `action=delete`    | `{"wmsId": "..."}` |

use crate::console::error::{LayerError, Result};
use crate::console::models::{ConnectionProfile, Layer};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, Url};
use std::future::Future;

/// Response body of a read-all, as the backend sent it
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON body
    Structured(serde_json::Value),
    /// Any other content type
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadAllResponse {
    pub status: u16,
    pub data: Payload,
}

impl ReadAllResponse {
    pub fn structured(data: serde_json::Value) -> Self {
        Self {
            status: 200,
            data: Payload::Structured(data),
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        Self {
            status: 200,
            data: Payload::Text(data.into()),
        }
    }
}

/// Backend operations the view model depends on
pub trait LayerClient: Send + Sync {
    fn read_all(&self) -> impl Future<Output = Result<ReadAllResponse>> + Send;

    /// Create a layer. Resolves to the created layer when the backend
    /// echoes one, `None` for a bare acknowledgment.
    fn add(&self, layer: &Layer) -> impl Future<Output = Result<Option<Layer>>> + Send;

    /// Update a layer. Same resolution rules as [`LayerClient::add`].
    fn save(&self, layer: &Layer) -> impl Future<Output = Result<Option<Layer>>> + Send;

    fn delete(&self, wms_id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Value of the `action` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadAll,
    Add,
    Save,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ReadAll => "readAll",
            Action::Add => "add",
            Action::Save => "save",
            Action::Delete => "delete",
        }
    }

    fn method(&self) -> Method {
        match self {
            Action::ReadAll => Method::GET,
            Action::Add | Action::Save => Method::POST,
            Action::Delete => Method::DELETE,
        }
    }
}

/// [`LayerClient`] speaking HTTP through reqwest
#[derive(Debug, Clone)]
pub struct HttpLayerClient {
    client: reqwest::Client,
    endpoint: Option<Url>,
    user: Option<String>,
    password: Option<String>,
}

impl HttpLayerClient {
    /// Build a client from a profile. A profile without a host still yields
    /// a client; its requests fail with a network error.
    pub fn new(profile: &ConnectionProfile) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(profile.timeout())
            .danger_accept_invalid_certs(profile.insecure())
            .build()?;

        let endpoint = match profile.host() {
            Some(host) => Some(Self::endpoint_url(host, profile.endpoint())?),
            None => {
                tracing::warn!("No host configured, layer requests will fail");
                None
            }
        };

        Ok(Self {
            client,
            endpoint,
            user: profile.user().map(str::to_string),
            password: profile.password().map(str::to_string),
        })
    }

    /// Join host and endpoint, treating the host as a directory
    pub fn endpoint_url(host: &str, endpoint: &str) -> anyhow::Result<Url> {
        let mut base = host.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)?.join(endpoint.trim_start_matches('/'))?;
        Ok(url)
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    pub fn action_url(&self, action: Action) -> Result<Url> {
        let mut url = self.endpoint.clone().ok_or_else(|| {
            LayerError::network("no host configured; set 'host' in the profile or pass --host")
        })?;
        url.query_pairs_mut().append_pair("action", action.as_str());
        Ok(url)
    }

    fn request(&self, action: Action) -> Result<RequestBuilder> {
        let url = self.action_url(action)?;
        tracing::debug!("{} {}", action.method(), url);
        let builder = self.client.request(action.method(), url);
        Ok(match &self.user {
            Some(user) => builder.basic_auth(user, self.password.as_ref()),
            None => builder,
        })
    }

    async fn send(&self, action: Action, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let mut message = format!(
            "{} returned {} {}",
            action.as_str(),
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );
        let body = body.trim();
        if !body.is_empty() {
            message.push_str(": ");
            message.extend(body.chars().take(200));
        }
        tracing::error!("Layer request failed: {message}");
        Err(LayerError::Network(message))
    }

    async fn write(&self, action: Action, layer: &Layer) -> Result<Option<Layer>> {
        let builder = self.request(action)?.json(layer);
        let response = self.send(action, builder).await?;
        let body = response.text().await?;

        // Anything that is not a layer with an id counts as an acknowledgment
        let echoed = serde_json::from_str::<Layer>(&body)
            .ok()
            .filter(|layer| !layer.wms_id.is_empty());
        tracing::debug!(
            "{} of '{}' acknowledged (echoed layer: {})",
            action.as_str(),
            layer.wms_id,
            echoed.is_some()
        );
        Ok(echoed)
    }
}

impl LayerClient for HttpLayerClient {
    async fn read_all(&self) -> Result<ReadAllResponse> {
        let builder = self.request(Action::ReadAll)?;
        let response = self.send(Action::ReadAll, builder).await?;

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("json"));
        let body = response.text().await?;

        let data = if is_json {
            let value = serde_json::from_str(&body)
                .map_err(|e| LayerError::network(format!("malformed JSON response: {e}")))?;
            Payload::Structured(value)
        } else {
            Payload::Text(body)
        };

        Ok(ReadAllResponse { status, data })
    }

    async fn add(&self, layer: &Layer) -> Result<Option<Layer>> {
        self.write(Action::Add, layer).await
    }

    async fn save(&self, layer: &Layer) -> Result<Option<Layer>> {
        self.write(Action::Save, layer).await
    }

    async fn delete(&self, wms_id: &str) -> Result<()> {
        let builder = self
            .request(Action::Delete)?
            .json(&serde_json::json!({ "wmsId": wms_id }));
        self.send(Action::Delete, builder).await?;
        Ok(())
    }
}
