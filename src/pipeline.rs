//! The batch run: fetch, wrangle and write each dataset in turn
//!
//! Datasets are processed strictly one after another. The first failure
//! stops the run; later datasets are not attempted and files already
//! written stay on disk.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::registry::DatasetDefinition;
use crate::stash::StashLayout;
use crate::tabular::write_csv;
use crate::types::DatasetReport;
use crate::wrangler::wrangle;
use tokio::task::spawn_blocking;
use tracing::{error, info};

/// Fetcher plus stash layout, ready to process datasets
pub struct Pipeline {
    fetcher: Fetcher,
    layout: StashLayout,
}

impl Pipeline {
    /// Build a pipeline from configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_fetcher(
            Fetcher::new(&config.http)?,
            StashLayout::new(&config.stash_dir),
        ))
    }

    /// Build a pipeline from parts
    pub fn with_fetcher(fetcher: Fetcher, layout: StashLayout) -> Self {
        Self { fetcher, layout }
    }

    /// Fetch, wrangle and write one dataset
    pub async fn process(&self, dataset: &DatasetDefinition) -> Result<DatasetReport> {
        let raw_path = self.layout.raw_path(dataset);
        let csv_path = self.layout.wrangled_path(dataset);

        info!(
            dataset = dataset.name(),
            url = %dataset.source_url(),
            raw = %raw_path.display(),
            "downloading"
        );
        let text = self
            .fetcher
            .fetch_and_persist(dataset.source_url(), &raw_path)
            .await?;

        let owned = dataset.clone();
        let dest = csv_path.clone();
        let record_count = spawn_blocking(move || {
            let records = wrangle(&text, &owned);
            write_csv(&records, owned.field_names(), &dest).map(|()| records.len())
        })
        .await
        .map_err(|e| {
            Error::io(
                &csv_path,
                std::io::Error::other(format!("wrangle task failed: {}", e)),
            )
        })??;

        info!(
            dataset = dataset.name(),
            records = record_count,
            csv = %csv_path.display(),
            "wrangled"
        );

        Ok(DatasetReport {
            name: dataset.name().to_string(),
            source_url: dataset.source_url().to_string(),
            raw_path,
            csv_path,
            record_count,
        })
    }

    /// Process every dataset in order, stopping at the first failure
    pub async fn run(&self, datasets: &[DatasetDefinition]) -> Result<Vec<DatasetReport>> {
        let mut reports = Vec::with_capacity(datasets.len());

        for dataset in datasets {
            match self.process(dataset).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!(
                        dataset = dataset.name(),
                        completed = reports.len(),
                        error = %e,
                        "aborting run"
                    );
                    return Err(e);
                }
            }
        }

        Ok(reports)
    }
}

/// Build a pipeline from `config` and process `datasets`
pub async fn run(config: &Config, datasets: &[DatasetDefinition]) -> Result<Vec<DatasetReport>> {
    Pipeline::new(config)?.run(datasets).await
}
