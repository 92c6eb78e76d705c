//! Cluster profiles over the six gentrification indicators.
//!
//! The clustering was done offline; these values are the published
//! per-cluster averages and are treated as opaque data.

use serde::Serialize;

pub const INDICATORS: [&str; 6] = [
    "% Change in Household Income",
    "% Change in Median Home Value",
    "% Change in Median Rent",
    "% Change in Owner Occupied Housing",
    "% Change in Non-White Population",
    "% Change in Population with College Degree",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterProfile {
    /// `None` for the county average.
    pub cluster: Option<u8>,
    pub label:   &'static str,
    pub values:  [f64; 6],
}

pub static COUNTY_AVERAGE: ClusterProfile = ClusterProfile {
    cluster: None,
    label:   "County Average",
    values:  [8.20, 76.14, 54.41, 6.23, 28.04, 36.73],
};

pub static CLUSTERS: [ClusterProfile; 3] = [
    ClusterProfile {
        cluster: Some(1),
        label:   "Gentrifying",
        values:  [29.95, 87.36, 69.79, 28.49, 11.23, 129.64],
    },
    ClusterProfile {
        cluster: Some(2),
        label:   "Becoming more affordable",
        values:  [-12.11, 72.58, 40.70, -7.45, 22.16, 2.05],
    },
    ClusterProfile {
        cluster: Some(3),
        label:   "Remaining costly",
        values:  [19.24, 81.35, 61.29, 7.34, 40.02, 34.12],
    },
];

pub fn cluster_profile(cluster: u8) -> Option<&'static ClusterProfile> {
    CLUSTERS.iter().find(|p| p.cluster == Some(cluster))
}

impl ClusterProfile {
    /// Per-indicator difference from the county average.
    pub fn versus_county(&self) -> [f64; 6] {
        let mut out = [0.0; 6];
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.values[i] - COUNTY_AVERAGE.values[i];
        }
        out
    }
}
