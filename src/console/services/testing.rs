//! In-memory [`LayerClient`] that records every call, for unit tests.

use crate::console::error::{LayerError, Result};
use crate::console::models::Layer;
use crate::console::services::layer_client::{LayerClient, ReadAllResponse};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct State {
    calls: Vec<String>,
    read_response: Option<ReadAllResponse>,
    failure: Option<LayerError>,
    echo: bool,
    delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    state: Arc<Mutex<State>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_response(self, data: serde_json::Value) -> Self {
        self.state.lock().unwrap().read_response = Some(ReadAllResponse::structured(data));
        self
    }

    pub fn with_text_response(self, data: &str) -> Self {
        self.state.lock().unwrap().read_response = Some(ReadAllResponse::text(data));
        self
    }

    /// Every call fails with `error`
    pub fn failing_with(self, error: LayerError) -> Self {
        self.state.lock().unwrap().failure = Some(error);
        self
    }

    /// Add and save answer with the layer they were sent
    pub fn echoing(self) -> Self {
        self.state.lock().unwrap().echo = true;
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    async fn record(&self, call: String) -> Result<()> {
        let (delay, failure) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            (state.delay, state.failure.clone())
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        failure.map_or(Ok(()), Err)
    }

    fn echo(&self, layer: &Layer) -> Option<Layer> {
        self.state.lock().unwrap().echo.then(|| layer.clone())
    }
}

impl LayerClient for RecordingClient {
    async fn read_all(&self) -> Result<ReadAllResponse> {
        self.record("readAll".to_string()).await?;
        let response = self.state.lock().unwrap().read_response.clone();
        Ok(response.unwrap_or_else(|| ReadAllResponse::structured(serde_json::json!({"objects": []}))))
    }

    async fn add(&self, layer: &Layer) -> Result<Option<Layer>> {
        self.record(format!("add:{}", layer.wms_id)).await?;
        Ok(self.echo(layer))
    }

    async fn save(&self, layer: &Layer) -> Result<Option<Layer>> {
        self.record(format!("save:{}", layer.wms_id)).await?;
        Ok(self.echo(layer))
    }

    async fn delete(&self, wms_id: &str) -> Result<()> {
        self.record(format!("delete:{wms_id}")).await
    }
}
