//! The three selection controls: metric, tract A, tract B.
//!
//! RULE: Each applied change is followed by exactly one comparison.
//! The controls only ever offer values taken from the loaded table.

use crate::{
    comparison::ComparisonRequest,
    metric::MetricOption,
    types::{MetricName, TractId},
};
use serde::{Deserialize, Serialize};

/// A change to one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum SelectionChange {
    Metric { metric: MetricName },
    TractA { tract: TractId },
    TractB { tract: TractId },
}

/// Current value of every control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub metric:  MetricName,
    pub tract_a: TractId,
    pub tract_b: TractId,
}

impl Selection {
    pub fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::Metric { metric } => self.metric = metric,
            SelectionChange::TractA { tract }  => self.tract_a = tract,
            SelectionChange::TractB { tract }  => self.tract_b = tract,
        }
    }

    pub fn request(&self) -> ComparisonRequest {
        ComparisonRequest {
            metric:  self.metric.clone(),
            tract_a: self.tract_a.clone(),
            tract_b: self.tract_b.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TractOption {
    pub label: String,
    pub value: TractId,
}

/// The choices each control presents.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionOptions {
    pub metrics: Vec<MetricOption>,
    /// Shared by both tract controls.
    pub tracts:  Vec<TractOption>,
}

impl SelectionOptions {
    pub fn new(metrics: Vec<MetricOption>, tract_ids: &[TractId]) -> Self {
        let tracts = tract_ids
            .iter()
            .map(|id| TractOption { label: id.to_string(), value: id.clone() })
            .collect();
        Self { metrics, tracts }
    }

    pub fn offers_metric(&self, metric: &str) -> bool {
        self.metrics.iter().any(|m| m.value == metric)
    }

    pub fn offers_tract(&self, tract: &TractId) -> bool {
        self.tracts.iter().any(|t| &t.value == tract)
    }
}
