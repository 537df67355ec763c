//! End-to-end runs of the stash pipeline against a mock HTTP source

mod common;

use climate_stash::{Config, Error, HttpConfig, Pipeline, pipeline, read_csv, registry};
use common::*;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_in(dir: &TempDir) -> Config {
    Config {
        stash_dir: dir.path().join("datastash"),
        http: HttpConfig {
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn full_run_writes_raw_and_wrangled_files() {
    let server = MockServer::start().await;
    let datasets = serve_builtins(&server).await;
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let reports = pipeline::run(&config, &datasets).await.unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].record_count, CO2_ROWS);
    assert_eq!(reports[1].record_count, TEMPS_ROWS);

    let stash = &config.stash_dir;
    assert_eq!(
        std::fs::read_to_string(stash.join("raw/co2_mm_mlo.txt")).unwrap(),
        CO2_FEED,
        "raw copy must be verbatim"
    );
    assert_eq!(
        std::fs::read_to_string(stash.join("raw/647_Global_Temperature_Data_File.txt")).unwrap(),
        TEMPS_FEED
    );
    assert!(stash.join("wrangled/co2.csv").exists());
    assert!(stash.join("wrangled/global_temps.csv").exists());
}

#[tokio::test]
async fn csv_headers_match_declared_fields() {
    let server = MockServer::start().await;
    let datasets = serve_builtins(&server).await;
    let dir = TempDir::new().unwrap();

    let reports = pipeline::run(&config_in(&dir), &datasets).await.unwrap();

    for (dataset, report) in datasets.iter().zip(&reports) {
        let text = std::fs::read_to_string(&report.csv_path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, dataset.field_names().join(","));
    }
}

#[tokio::test]
async fn co2_sentinels_become_empty_cells() {
    let server = MockServer::start().await;
    let datasets = serve_builtins(&server).await;
    let dir = TempDir::new().unwrap();

    let reports = pipeline::run(&config_in(&dir), &datasets).await.unwrap();
    let text = std::fs::read_to_string(&reports[0].csv_path).unwrap();

    assert!(text.contains("1964,4,1964.292,,321.77,319.48,\r\n"));
    assert!(text.contains("2016,7,2016.542,404.39,404.39,404.12,31\r\n"));
    assert!(!text.contains("-99.99"));

    let records = read_csv(&reports[0].csv_path).unwrap();
    assert_eq!(records.len(), CO2_ROWS);
    let missing_days = records.iter().filter(|r| r.is_missing("days")).count();
    assert_eq!(missing_days, 5, "every -1 day count should be missing");
}

#[tokio::test]
async fn global_temps_values_pass_through() {
    let server = MockServer::start().await;
    let datasets = serve_builtins(&server).await;
    let dir = TempDir::new().unwrap();

    let reports = pipeline::run(&config_in(&dir), &datasets).await.unwrap();
    let records = read_csv(&reports[1].csv_path).unwrap();

    let row_1976 = records
        .iter()
        .find(|r| r.get("year") == Some("1976"))
        .expect("1976 row");
    assert_eq!(row_1976.get("annual_mean"), Some("-0.11"));
    assert_eq!(row_1976.get("lowess"), Some("0.03"));
}

#[tokio::test]
async fn rerun_overwrites_previous_output() {
    let server = MockServer::start().await;
    let datasets = serve_builtins(&server).await;
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let first = pipeline::run(&config, &datasets).await.unwrap();
    let first_csv = std::fs::read_to_string(&first[0].csv_path).unwrap();

    let second = pipeline::run(&config, &datasets).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        std::fs::read_to_string(&second[0].csv_path).unwrap(),
        first_csv
    );
}

#[tokio::test]
async fn server_error_on_first_dataset_aborts_the_run() {
    let server = MockServer::start().await;
    let co2 = serve(
        &server,
        registry::co2().unwrap(),
        ResponseTemplate::new(503),
    )
    .await;
    let temps = serve(
        &server,
        registry::global_temps().unwrap(),
        ResponseTemplate::new(200).set_body_string(TEMPS_FEED),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let err = pipeline::run(&config, &[co2, temps]).await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }), "got {err:?}");
    assert!(!config.stash_dir.join("wrangled/global_temps.csv").exists());
    assert!(
        !config
            .stash_dir
            .join("raw/647_Global_Temperature_Data_File.txt")
            .exists()
    );
}

#[tokio::test]
async fn empty_body_is_a_transport_failure() {
    let server = MockServer::start().await;
    let temps = serve(
        &server,
        registry::global_temps().unwrap(),
        ResponseTemplate::new(200),
    )
    .await;
    let dir = TempDir::new().unwrap();

    let err = Pipeline::new(&config_in(&dir))
        .unwrap()
        .process(&temps)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), climate_stash::ErrorKind::Transport);
}

#[tokio::test]
async fn each_source_is_requested_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TEMPS_FEED))
        .expect(1)
        .mount(&server)
        .await;
    let temps = registry::global_temps()
        .unwrap()
        .with_source_url(&format!("{}/temps.txt", server.uri()))
        .unwrap();
    let dir = TempDir::new().unwrap();

    let reports = pipeline::run(&config_in(&dir), &[temps]).await.unwrap();
    assert_eq!(reports[0].raw_path.file_name().unwrap(), "temps.txt");
}
