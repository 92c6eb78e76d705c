//! The dashboard: every table loaded once, plus the comparison service.
//!
//! LOAD ORDER (fixed):
//!   1. 2000 census table
//!   2. 2010 census table
//!   3. Sampled change table (with income brackets)
//!   4. Full change table
//!   5. Cluster table (backs the tract comparison)
//!
//! RULES:
//!   - Tables are read once in `build` and never re-read.
//!   - Nothing here is mutable after `build`; selections live with the caller.
//!   - One selection change triggers exactly one comparison.

use crate::{
    comparison::{ComparisonRequest, ComparisonResult, TractComparisonService},
    config::DashConfig,
    error::DashResult,
    metric::resolve_metrics,
    profile::{ClusterProfile, CLUSTERS, COUNTY_AVERAGE},
    selection::{Selection, SelectionChange, SelectionOptions},
    summary::DashboardSummary,
    table::TractTable,
    types::TractId,
};
use std::sync::Arc;

pub struct Dashboard {
    clusters:        Arc<TractTable>,
    comparison:      TractComparisonService,
    summary:         DashboardSummary,
    default_metric:  Option<String>,
    default_tract_a: TractId,
    default_tract_b: TractId,
}

impl Dashboard {
    /// Load all tables from `config.data_dir` and wire the service.
    pub fn build(config: &DashConfig) -> DashResult<Self> {
        let id = config.id_column.as_str();
        let files = &config.files;

        let census_2000    = TractTable::load("census_2000", id, config.path_of(&files.census_2000))?;
        let census_2010    = TractTable::load("census_2010", id, config.path_of(&files.census_2010))?;
        let changes_sample = TractTable::load("changes_sample", id, config.path_of(&files.changes_sample))?;
        let changes_full   = TractTable::load("changes_full", id, config.path_of(&files.changes_full))?;
        let clusters       = TractTable::load("clusters", id, config.path_of(&files.clusters))?;

        let summary =
            DashboardSummary::compute(&census_2000, &census_2010, &changes_sample, &changes_full)?;

        Self::from_parts(config, clusters, summary)
    }

    /// Wire a dashboard around an already-loaded cluster table.
    pub fn from_parts(
        config: &DashConfig,
        clusters: TractTable,
        summary: DashboardSummary,
    ) -> DashResult<Self> {
        let clusters = Arc::new(clusters);
        let metrics = resolve_metrics(&clusters, config.metrics.as_deref())?;
        let comparison = TractComparisonService::new(Arc::clone(&clusters), metrics)?;

        log::info!(
            "dashboard ready: {} tracts, {} comparable metrics",
            clusters.len(),
            comparison.metrics().len()
        );

        Ok(Self {
            clusters,
            comparison,
            summary,
            default_metric:  config.default_metric.clone(),
            default_tract_a: config.default_tract_a.clone(),
            default_tract_b: config.default_tract_b.clone(),
        })
    }

    pub fn clusters(&self) -> Arc<TractTable> { Arc::clone(&self.clusters) }

    pub fn comparison(&self) -> &TractComparisonService { &self.comparison }

    pub fn summary(&self) -> &DashboardSummary { &self.summary }

    pub fn profiles(&self) -> (&'static [ClusterProfile], &'static ClusterProfile) {
        (&CLUSTERS, &COUNTY_AVERAGE)
    }

    pub fn options(&self) -> SelectionOptions {
        SelectionOptions::new(self.comparison.metric_options(), self.comparison.tract_ids())
    }

    /// Initial control values. Configured defaults that the table does not
    /// offer fall back to the first available choice.
    pub fn default_selection(&self) -> Selection {
        let metrics = self.comparison.metrics();
        let metric = self
            .default_metric
            .as_ref()
            .filter(|m| metrics.contains(m))
            .or_else(|| metrics.first())
            .cloned()
            .unwrap_or_default();

        let ids = self.comparison.tract_ids();
        let pick = |preferred: &TractId| {
            if self.clusters.contains(preferred) {
                preferred.clone()
            } else {
                ids.first().cloned().unwrap_or_else(|| preferred.clone())
            }
        };

        Selection {
            metric,
            tract_a: pick(&self.default_tract_a),
            tract_b: pick(&self.default_tract_b),
        }
    }

    pub fn compare(
        &self,
        metric: &str,
        tract_a: &TractId,
        tract_b: &TractId,
    ) -> DashResult<ComparisonResult> {
        self.comparison.compare(metric, tract_a, tract_b)
    }

    pub fn compare_request(&self, request: &ComparisonRequest) -> DashResult<ComparisonResult> {
        self.comparison.compare_request(request)
    }

    /// Apply one control change and re-run the comparison. The selection
    /// only takes the change when the comparison succeeds.
    pub fn apply(
        &self,
        selection: &mut Selection,
        change: SelectionChange,
    ) -> DashResult<ComparisonResult> {
        log::debug!("selection change: {change:?}");
        let mut next = selection.clone();
        next.apply(change);
        let result = self.compare_request(&next.request())?;
        *selection = next;
        Ok(result)
    }
}
