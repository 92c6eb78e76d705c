//! Column aggregations behind the dashboard's trend section.
//!
//! All figures are sums, counts, means, or medians of precomputed columns.
//! Missing cells are skipped.

use crate::{error::DashResult, table::TractTable};
use serde::Serialize;

// ── Racial composition ─────────────────────────────────────────────

pub const WHITE_2000: &str = "NHWHT00";
pub const NON_WHITE_2000: [&str; 14] = [
    "NHBLK00", "NTV00", "ASIAN00", "HISP00", "HAW00", "INDIA00", "CHINA00",
    "FILIP00", "JAPAN00", "KOREA00", "VIET00", "MEX00", "PR00", "CUBAN00",
];

pub const WHITE_2010: &str = "nhwht10";
pub const NON_WHITE_2010: [&str; 14] = [
    "nhblk10", "ntv10", "asian10", "hisp10", "haw10", "india10", "china10",
    "filip10", "japan10", "korea10", "viet10", "mex10", "pr10", "cuban10",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RacialComposition {
    pub year:      u16,
    pub white:     f64,
    pub non_white: f64,
}

impl RacialComposition {
    pub fn total(&self) -> f64 { self.white + self.non_white }
}

pub fn racial_composition<S: AsRef<str>>(
    table: &TractTable,
    year: u16,
    white_column: &str,
    non_white_columns: &[S],
) -> DashResult<RacialComposition> {
    Ok(RacialComposition {
        year,
        white:     table.column_sum(white_column)?,
        non_white: table.columns_sum(non_white_columns)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionChange {
    pub total_delta:       f64,
    pub total_pct:         Option<f64>,
    pub white_delta:       f64,
    pub white_pct:         Option<f64>,
    pub non_white_delta:   f64,
    pub non_white_pct:     Option<f64>,
}

pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        None
    } else {
        Some((to - from) / from * 100.0)
    }
}

pub fn composition_change(from: &RacialComposition, to: &RacialComposition) -> CompositionChange {
    CompositionChange {
        total_delta:     to.total() - from.total(),
        total_pct:       percent_change(from.total(), to.total()),
        white_delta:     to.white - from.white,
        white_pct:       percent_change(from.white, to.white),
        non_white_delta: to.non_white - from.non_white,
        non_white_pct:   percent_change(from.non_white, to.non_white),
    }
}

// ── Income brackets ────────────────────────────────────────────────

pub const INCOME_BRACKET_COLUMN: &str = "income_bracket";
pub const INCOME_COLUMN: &str = "HINC00";
pub const INCOME_CHANGE_COLUMN: &str = "HINC00_PC";

/// Quartile brackets of 2000 median household income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBracket {
    Bottom,
    Middle,
    Top,
}

impl IncomeBracket {
    pub const ALL: [IncomeBracket; 3] = [Self::Bottom, Self::Middle, Self::Top];

    /// The exact text stored in the `income_bracket` column.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bottom => "Bottom 25% (<37k)",
            Self::Middle => "Middle 50% (<63k and >37k)",
            Self::Top    => "Top 25% (> 63k)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketStats {
    pub bracket:         IncomeBracket,
    pub tracts:          usize,
    /// Percent of tracts (with data) whose income rose.
    pub share_increased: Option<f64>,
    pub mean_change:     Option<f64>,
}

/// The rows of `table` that fall in `bracket`.
pub fn bracket_rows(table: &TractTable, bracket: IncomeBracket) -> DashResult<TractTable> {
    table.filter_eq(INCOME_BRACKET_COLUMN, bracket.label())
}

pub fn bracket_stats(table: &TractTable, bracket: IncomeBracket) -> DashResult<BracketStats> {
    let rows = bracket_rows(table, bracket)?;
    let changes: Vec<f64> = rows
        .numeric_column(INCOME_CHANGE_COLUMN)?
        .into_iter()
        .flatten()
        .collect();
    Ok(BracketStats {
        bracket,
        tracts: rows.len(),
        share_increased: share_positive(&changes),
        mean_change: mean(&changes),
    })
}

// ── Change distributions ───────────────────────────────────────────

/// Columns of the full change table summarised on the dashboard.
pub const CHANGE_COLUMNS: [&str; 3] = ["HINC00_PC", "MRENT00_PC", "MHMVAL00_PC"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeStats {
    pub column:          String,
    pub tracts:          usize,
    pub share_increased: Option<f64>,
    pub median:          Option<f64>,
}

pub fn change_stats(table: &TractTable, column: &str) -> DashResult<ChangeStats> {
    let values: Vec<f64> = table.numeric_column(column)?.into_iter().flatten().collect();
    Ok(ChangeStats {
        column:          column.to_string(),
        tracts:          values.len(),
        share_increased: share_positive(&values),
        median:          median(&values),
    })
}

fn share_positive(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let up = values.iter().filter(|v| **v > 0.0).count();
    Some(up as f64 / values.len() as f64 * 100.0)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

// ── Whole summary ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub composition_2000: RacialComposition,
    pub composition_2010: RacialComposition,
    pub composition_change: CompositionChange,
    pub brackets: Vec<BracketStats>,
    pub changes:  Vec<ChangeStats>,
}

impl DashboardSummary {
    pub fn compute(
        census_2000: &TractTable,
        census_2010: &TractTable,
        changes_sample: &TractTable,
        changes_full: &TractTable,
    ) -> DashResult<Self> {
        let composition_2000 = racial_composition(census_2000, 2000, WHITE_2000, &NON_WHITE_2000[..])?;
        let composition_2010 = racial_composition(census_2010, 2010, WHITE_2010, &NON_WHITE_2010[..])?;
        let change = composition_change(&composition_2000, &composition_2010);

        let brackets = IncomeBracket::ALL
            .iter()
            .map(|b| bracket_stats(changes_sample, *b))
            .collect::<DashResult<Vec<_>>>()?;

        let changes = CHANGE_COLUMNS
            .iter()
            .map(|c| change_stats(changes_full, c))
            .collect::<DashResult<Vec<_>>>()?;

        Ok(Self {
            composition_2000,
            composition_2010,
            composition_change: change,
            brackets,
            changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn percent_change_from_zero_is_undefined() {
        assert_eq!(percent_change(0.0, 10.0), None);
        assert_eq!(percent_change(200.0, 150.0), Some(-25.0));
    }
}
