//! Common test utilities for climate-stash integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;

use climate_stash::{DatasetDefinition, registry};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve `body` at `/<raw file name>` and point `dataset` at the mock server
pub async fn serve(
    server: &MockServer,
    dataset: DatasetDefinition,
    template: ResponseTemplate,
) -> DatasetDefinition {
    let route = format!("/{}", dataset.raw_file_name());
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(template)
        .mount(server)
        .await;

    dataset
        .with_source_url(&format!("{}{}", server.uri(), route))
        .expect("mock server URL should be a valid source")
}

/// Both built-in datasets, served from `server` with the fixture feeds
pub async fn serve_builtins(server: &MockServer) -> Vec<DatasetDefinition> {
    let co2 = registry::co2().expect("co2 definition");
    let temps = registry::global_temps().expect("global_temps definition");

    vec![
        serve(server, co2, ResponseTemplate::new(200).set_body_string(CO2_FEED)).await,
        serve(
            server,
            temps,
            ResponseTemplate::new(200).set_body_string(TEMPS_FEED),
        )
        .await,
    ]
}
