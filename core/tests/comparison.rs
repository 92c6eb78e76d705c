//! Tract comparison tests.

use std::sync::Arc;
use tractdash_core::{
    comparison::{ComparisonChart, ComparisonRequest, TractComparisonService},
    error::DashError,
    table::TractTable,
    types::TractId,
};

const METRIC: &str = "PercentChangeInMedianIncome";

fn service() -> TractComparisonService {
    let csv = "\
tractid,PercentChangeInMedianIncome,HINC00_PC,cluster
25025000100,12.5,4.0,1
25025000602,-3.2,,2
25025000703,7.25,-1.5,3
";
    let table = TractTable::from_reader("clusters", "tractid", csv.as_bytes()).unwrap();
    TractComparisonService::new(
        Arc::new(table),
        vec![METRIC.to_string(), "HINC00_PC".to_string()],
    )
    .unwrap()
}

/// The worked example: two known tracts, values and labels as stored.
#[test]
fn compares_two_tracts() {
    let svc = service();
    let r = svc
        .compare(METRIC, &TractId::from(25025000100u64), &TractId::from(25025000602u64))
        .unwrap();

    assert_eq!(r.label_a, "tract 25025000100");
    assert_eq!(r.value_a, Some(12.5));
    assert_eq!(r.label_b, "tract 25025000602");
    assert_eq!(r.value_b, Some(-3.2));
    assert_eq!(r.metric_display_name, "Percentchangeinmedianincome");
}

/// Every (metric, a, b) drawn from the table returns the stored values.
#[test]
fn every_valid_combination_matches_the_table() {
    let svc = service();
    let table = svc.table();
    for metric in svc.metrics() {
        for a in svc.tract_ids() {
            for b in svc.tract_ids() {
                let r = svc.compare(metric, a, b).unwrap();
                assert_eq!(r.value_a, table.number(a, metric).unwrap());
                assert_eq!(r.value_b, table.number(b, metric).unwrap());
                assert_eq!(r.label_a, format!("tract {a}"));
                assert_eq!(r.label_b, format!("tract {b}"));
            }
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let svc = service();
    let a = TractId::from("25025000703");
    let b = TractId::from("25025000100");
    let first = svc.compare("HINC00_PC", &a, &b).unwrap();
    let second = svc.compare("HINC00_PC", &a, &b).unwrap();
    assert_eq!(first, second);
}

#[test]
fn same_tract_twice_gives_equal_values() {
    let svc = service();
    let id = TractId::from(25025000703u64);
    let r = svc.compare(METRIC, &id, &id).unwrap();
    assert_eq!(r.value_a, Some(7.25));
    assert_eq!(r.value_a, r.value_b);
    assert_eq!(r.label_a, r.label_b);
}

/// A missing cell comes back as `None`, not an error.
#[test]
fn missing_cell_is_none() {
    let svc = service();
    let r = svc
        .compare("HINC00_PC", &TractId::from(25025000602u64), &TractId::from(25025000100u64))
        .unwrap();
    assert_eq!(r.value_a, None);
    assert_eq!(r.value_b, Some(4.0));
    assert_eq!(r.metric_display_name, "Hinc00_Pc");
}

#[test]
fn unknown_tract_is_an_error() {
    let svc = service();
    let err = svc
        .compare(METRIC, &TractId::from(25025000100u64), &TractId::from(99999999999u64))
        .unwrap_err();
    match err {
        DashError::UnknownTract { tract_id } => assert_eq!(tract_id, TractId::from(99999999999u64)),
        other => panic!("expected UnknownTract, got {other:?}"),
    }
}

/// Only the configured metrics may be compared, even if the column exists.
#[test]
fn unknown_metric_is_an_error() {
    let svc = service();
    let id = TractId::from(25025000100u64);
    let err = svc.compare("cluster", &id, &id).unwrap_err();
    assert!(matches!(err, DashError::UnknownMetric { .. }), "got {err:?}");
}

#[test]
fn non_numeric_metric_column_is_rejected() {
    let csv = "tractid,label\n1,gentrifying\n2,costly\n";
    let table = TractTable::from_reader("t", "tractid", csv.as_bytes()).unwrap();
    let err = TractComparisonService::new(Arc::new(table), vec!["label".into()])
        .err()
        .expect("text column must be rejected");
    assert!(matches!(err, DashError::InvalidMetricValue { .. }), "got {err:?}");
}

#[test]
fn request_and_chart_shape() {
    let svc = service();
    let request: ComparisonRequest = serde_json::from_str(
        r#"{"metric":"PercentChangeInMedianIncome","tract_a":25025000100,"tract_b":"25025000602"}"#,
    )
    .unwrap();
    let chart = ComparisonChart::from(svc.compare_request(&request).unwrap());

    assert_eq!(chart.title, "Compare Tracts");
    assert_eq!(chart.x_axis_title, "Tract ID");
    assert_eq!(chart.y_axis_title, "Percentchangeinmedianincome");
    assert_eq!(chart.x, ["tract 25025000100".to_string(), "tract 25025000602".to_string()]);
    assert_eq!(chart.y, [Some(12.5), Some(-3.2)]);
}
