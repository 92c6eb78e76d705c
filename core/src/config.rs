use crate::types::{MetricName, TractId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TRACT_A: u64 = 25025000100;
pub const DEFAULT_TRACT_B: u64 = 25025000602;

/// File names of the five source tables, relative to `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub census_2000:    String,
    pub census_2010:    String,
    /// Sampled change table carrying the `income_bracket` column.
    pub changes_sample: String,
    pub changes_full:   String,
    pub clusters:       String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            census_2000:    "plotly_2000.csv".into(),
            census_2010:    "plotly_2010.csv".into(),
            changes_sample: "plotly_changes.csv".into(),
            changes_full:   "plotly_changes_full.csv".into(),
            clusters:       "clusters_and_2000.csv".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub data_dir:  PathBuf,
    pub files:     DataFiles,
    /// Column holding the unique tract identifier in every table.
    pub id_column: String,
    /// Explicit comparable metrics. When absent they are the six columns
    /// before the trailing `cluster` column of the cluster table.
    pub metrics:   Option<Vec<MetricName>>,
    /// Initial metric selection; the first comparable metric when absent.
    pub default_metric:  Option<MetricName>,
    pub default_tract_a: TractId,
    pub default_tract_b: TractId,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_dir:        PathBuf::from("./data"),
            files:           DataFiles::default(),
            id_column:       "tractid".into(),
            metrics:         None,
            default_metric:  None,
            default_tract_a: TractId::from(DEFAULT_TRACT_A),
            default_tract_b: TractId::from(DEFAULT_TRACT_B),
        }
    }
}

impl DashConfig {
    /// Load from a JSON file. Fields not present keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DashConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}
