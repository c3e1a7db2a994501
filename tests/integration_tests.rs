use cucumber::World;

pub mod common;
pub mod steps;

pub use common::world::LayerWorld;

/// # layerdesk Integration Tests
///
/// Drives the real `ViewModel` and `HttpLayerClient` against a `wiremock`
/// stand-in for the `layer-handler` endpoint. Each scenario gets a fresh
/// world and its own mock server.
///
/// Run with: cargo test --test integration_tests
#[tokio::main]
async fn main() {
    // Initialize tracing with configurable log level
    let log_level = std::env::var("LAYERDESK_LOG_LEVEL")
        .unwrap_or_else(|_| "error".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    run_features_sequentially().await;
}

/// Runs each feature file in turn so mock servers never overlap
async fn run_features_sequentially() {
    let features = [
        "features/layer_crud.feature",
        "features/selection_staging.feature",
        "features/panel_toggle.feature",
    ];

    for feature in features {
        tracing::debug!("Running {}", feature);
        LayerWorld::cucumber()
            .max_concurrent_scenarios(1)
            .fail_on_skipped()
            .run_and_exit(feature)
            .await;
    }
}
