use anyhow::{Context, Result};
use cucumber::World;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use layerdesk::console::{
    error::LayerError,
    events::SimpleEventBus,
    models::{ConnectionProfile, Feature, Layer},
    services::HttpLayerClient,
    view_models::ViewModel,
    widgets::PanelLayout,
};
use tokio::time::Instant;

pub const ENDPOINT_PATH: &str = "/layer-handler";

/// State shared by the steps of one scenario
#[derive(World)]
#[world(init = Self::new)]
pub struct LayerWorld {
    /// Real ViewModel instance
    pub view_model: ViewModel,

    /// Mock layer-handler backend
    pub mock_server: Option<MockServer>,

    /// Client pointed at the mock server
    pub client: Option<HttpLayerClient>,

    /// Error returned by the last operation
    pub last_error: Option<LayerError>,

    pub layout: PanelLayout,

    /// When the last panel toggle started
    pub toggled_at: Option<Instant>,

    /// Whether the last layers toggle asked for a reload
    pub reload_requested: bool,
}

impl std::fmt::Debug for LayerWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerWorld")
            .field("layers", &self.view_model.layers())
            .field("selected", &self.view_model.selected())
            .field("is_editing", &self.view_model.is_editing())
            .field("mock_server", &self.mock_server.as_ref().map(|s| s.uri()))
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl LayerWorld {
    pub fn new() -> Self {
        let mut view_model = ViewModel::new();
        view_model.set_event_bus(Box::new(SimpleEventBus::new()));

        Self {
            view_model,
            mock_server: None,
            client: None,
            last_error: None,
            layout: PanelLayout::new(),
            toggled_at: None,
            reload_requested: false,
        }
    }

    /// Start the mock backend and point a client at it
    pub async fn setup_mock_server(&mut self) -> Result<()> {
        if self.mock_server.is_some() {
            return Ok(());
        }
        let server = MockServer::start().await;
        let client = HttpLayerClient::new(&ConnectionProfile::new(server.uri()))?;
        self.client = Some(client);
        self.mock_server = Some(server);
        Ok(())
    }

    pub fn server(&self) -> Result<&MockServer> {
        self.mock_server
            .as_ref()
            .context("Mock server has not been started")
    }

    pub fn client(&self) -> Result<HttpLayerClient> {
        self.client.clone().context("Client has not been created")
    }

    /// Serve `body` for every read-all
    pub async fn mount_read_all(&mut self, body: Value) -> Result<()> {
        self.setup_mock_server().await?;
        Mock::given(method("GET"))
            .and(path(ENDPOINT_PATH))
            .and(query_param("action", "readAll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(self.server()?)
            .await;
        Ok(())
    }

    pub async fn mount_read_all_text(&mut self, body: &str) -> Result<()> {
        self.setup_mock_server().await?;
        Mock::given(method("GET"))
            .and(path(ENDPOINT_PATH))
            .and(query_param("action", "readAll"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(self.server()?)
            .await;
        Ok(())
    }

    /// Answer add, save and delete with `status` and an acknowledgment body
    pub async fn mount_writes(&mut self, status: u16) -> Result<()> {
        self.setup_mock_server().await?;
        for (verb, action) in [("POST", "add"), ("POST", "save"), ("DELETE", "delete")] {
            Mock::given(method(verb))
                .and(path(ENDPOINT_PATH))
                .and(query_param("action", action))
                .respond_with(ResponseTemplate::new(status).set_body_json(json!({"status": "ok"})))
                .mount(self.server()?)
                .await;
        }
        Ok(())
    }

    /// Number of requests the backend received for `action`
    pub async fn requests_for(&self, action: &str) -> Result<usize> {
        let requests = self
            .server()?
            .received_requests()
            .await
            .context("Request recording is disabled")?;
        let wanted = format!("action={action}");
        Ok(requests
            .iter()
            .filter(|request| request.url.query() == Some(wanted.as_str()))
            .count())
    }

    /// Record the outcome of a view-model operation
    pub fn record(&mut self, result: Result<(), LayerError>) {
        self.last_error = result.err();
    }

    pub fn layer_ids(&self) -> Vec<String> {
        self.view_model
            .layers()
            .iter()
            .map(|layer| layer.wms_id.clone())
            .collect()
    }
}

/// Split `"a, b"` into ids, ignoring blanks
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Layer JSON with features given by id
pub fn layer_json(wms_id: &str, features: &str) -> Value {
    let features: Vec<Value> = parse_list(features)
        .into_iter()
        .map(|id| json!({"wmsId": id, "name": ""}))
        .collect();
    json!({"wmsId": wms_id, "features": features})
}

pub fn local_layer(wms_id: &str, features: &str) -> Layer {
    Layer::new(wms_id).with_features(
        parse_list(features)
            .into_iter()
            .map(|id| Feature::new(id, ""))
            .collect(),
    )
}
