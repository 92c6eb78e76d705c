//! Two-tract comparison over one precomputed metric.
//!
//! RULE: The service never mutates its table. `compare` is a pure keyed
//! lookup: same arguments, same table, same result.
//!
//! Every choice the UI offers comes from the table itself, so an unknown
//! tract or metric here means the controls and the data have drifted
//! apart. That request fails; nothing else is affected.

use crate::{
    error::{DashError, DashResult},
    metric::{display_name, MetricOption},
    table::TractTable,
    types::{MetricName, TractId},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const CHART_TITLE: &str = "Compare Tracts";
pub const X_AXIS_TITLE: &str = "Tract ID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub metric:  MetricName,
    pub tract_a: TractId,
    pub tract_b: TractId,
}

/// Everything a two-bar chart needs. `None` values are cells the table
/// marks as missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub label_a:             String,
    pub value_a:             Option<f64>,
    pub label_b:             String,
    pub value_b:             Option<f64>,
    pub metric_display_name: String,
}

/// The chart the rendering layer draws for one comparison: x = tract
/// labels, y = metric values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub title:        &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: String,
    pub x:            [String; 2],
    pub y:            [Option<f64>; 2],
}

impl From<ComparisonResult> for ComparisonChart {
    fn from(r: ComparisonResult) -> Self {
        Self {
            title:        CHART_TITLE,
            x_axis_title: X_AXIS_TITLE,
            y_axis_title: r.metric_display_name,
            x:            [r.label_a, r.label_b],
            y:            [r.value_a, r.value_b],
        }
    }
}

pub fn tract_label(tract: &TractId) -> String {
    format!("tract {tract}")
}

pub struct TractComparisonService {
    table:   Arc<TractTable>,
    metrics: Vec<MetricName>,
}

impl TractComparisonService {
    /// Every metric must be a column of `table` holding only numbers or
    /// missing markers.
    pub fn new(table: Arc<TractTable>, metrics: Vec<MetricName>) -> DashResult<Self> {
        for metric in &metrics {
            table.ensure_numeric(metric)?;
        }
        log::debug!(
            "comparison service over '{}': {} tracts, metrics={:?}",
            table.name(),
            table.len(),
            metrics
        );
        Ok(Self { table, metrics })
    }

    pub fn metrics(&self) -> &[MetricName] { &self.metrics }

    pub fn metric_options(&self) -> Vec<MetricOption> {
        self.metrics.iter().map(|m| MetricOption::new(m)).collect()
    }

    pub fn tract_ids(&self) -> &[TractId] { self.table.tract_ids() }

    pub fn table(&self) -> &TractTable { &self.table }

    pub fn compare(
        &self,
        metric: &str,
        tract_a: &TractId,
        tract_b: &TractId,
    ) -> DashResult<ComparisonResult> {
        if !self.metrics.iter().any(|m| m == metric) {
            return Err(DashError::UnknownMetric { metric: metric.to_string() });
        }
        let value_a = self.table.number(tract_a, metric)?;
        let value_b = self.table.number(tract_b, metric)?;

        log::debug!("compare {metric}: {tract_a}={value_a:?} {tract_b}={value_b:?}");

        Ok(ComparisonResult {
            label_a: tract_label(tract_a),
            value_a,
            label_b: tract_label(tract_b),
            value_b,
            metric_display_name: display_name(metric),
        })
    }

    pub fn compare_request(&self, request: &ComparisonRequest) -> DashResult<ComparisonResult> {
        self.compare(&request.metric, &request.tract_a, &request.tract_b)
    }
}
