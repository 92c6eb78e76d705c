//! Comparable metrics: which columns may be compared, and how their names
//! are shown.

use crate::{
    error::{DashError, DashResult},
    table::TractTable,
    types::MetricName,
};
use serde::{Deserialize, Serialize};

/// The cluster table ends with a `cluster` label column. The six columns
/// before it are the comparable percentage-change metrics.
pub const TRAILING_METRIC_COUNT: usize = 6;
pub const TRAILING_LABEL_COLUMNS: usize = 1;

/// Human-readable form of a column name.
///
/// Word-wise title case: a character is upper-cased when the previous
/// character is uncased, and lower-cased otherwise. Digits, punctuation
/// and caseless letters break words, so `"HINC00_PC"` becomes `"Hinc00_Pc"`.
pub fn display_name(metric: &str) -> String {
    let mut out = String::with_capacity(metric.len());
    let mut prev_cased = false;
    for ch in metric.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if !cased {
            out.push(ch);
        } else if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = cased;
    }
    out
}

/// One entry of the metric selection control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOption {
    pub label: String,
    pub value: MetricName,
}

impl MetricOption {
    pub fn new(metric: &str) -> Self {
        Self {
            label: display_name(metric),
            value: metric.to_string(),
        }
    }
}

/// The six columns immediately preceding the trailing label column.
pub fn trailing_metrics(table: &TractTable) -> DashResult<Vec<MetricName>> {
    let columns = table.columns();
    let needed = TRAILING_METRIC_COUNT + TRAILING_LABEL_COLUMNS;
    if columns.len() < needed {
        return Err(DashError::Other(anyhow::anyhow!(
            "table '{}' has {} columns; need at least {needed} to derive metrics",
            table.name(),
            columns.len()
        )));
    }
    let end = columns.len() - TRAILING_LABEL_COLUMNS;
    Ok(columns[end - TRAILING_METRIC_COUNT..end].to_vec())
}

/// Resolve the comparable metric set: the explicit list when configured,
/// otherwise the trailing columns of the table.
pub fn resolve_metrics(
    table: &TractTable,
    configured: Option<&[MetricName]>,
) -> DashResult<Vec<MetricName>> {
    match configured {
        Some(list) => Ok(list.to_vec()),
        None => trailing_metrics(table),
    }
}
