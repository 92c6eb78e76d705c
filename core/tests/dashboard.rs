//! Dashboard tests against the sample dataset in data/.

use tractdash_core::{
    config::DashConfig,
    dashboard::Dashboard,
    error::DashError,
    profile::{cluster_profile, COUNTY_AVERAGE},
    selection::SelectionChange,
    summary::IncomeBracket,
    types::TractId,
};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

const INCOME: &str = "Percent Change in Median Income";
const RENT: &str = "Percent Change in Median Rent";

fn build() -> Dashboard {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = DashConfig::default().with_data_dir(DATA_DIR);
    Dashboard::build(&config).expect("sample dashboard")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// The six columns before `cluster` become the comparable metrics.
#[test]
fn metrics_are_the_trailing_cluster_columns() {
    let dash = build();
    let metrics = dash.comparison().metrics();
    assert_eq!(metrics.len(), 6);
    assert_eq!(metrics[0], INCOME);
    assert_eq!(metrics[5], "Percent Change in College Educated");

    let options = dash.options();
    assert_eq!(options.metrics[0].label, "Percent Change In Median Income");
    assert_eq!(options.metrics[0].value, INCOME);
    assert_eq!(options.tracts.len(), 8);
    assert_eq!(options.tracts[0].label, "25025000100");
}

#[test]
fn default_selection_uses_configured_tracts() {
    let dash = build();
    let sel = dash.default_selection();
    assert_eq!(sel.metric, INCOME);
    assert_eq!(sel.tract_a, TractId::from(25025000100u64));
    assert_eq!(sel.tract_b, TractId::from(25025000602u64));
}

/// A configured default the table does not offer falls back to a real choice.
#[test]
fn default_selection_falls_back_to_offered_choices() {
    let mut config = DashConfig::default().with_data_dir(DATA_DIR);
    config.default_metric = Some("Not A Column".into());
    config.default_tract_b = TractId::from(1u64);
    let dash = Dashboard::build(&config).unwrap();

    let sel = dash.default_selection();
    let options = dash.options();
    assert!(options.offers_metric(&sel.metric));
    assert!(options.offers_tract(&sel.tract_b));
}

#[test]
fn each_change_recompares() {
    let dash = build();
    let mut sel = dash.default_selection();

    let r = dash.apply(&mut sel, SelectionChange::Metric { metric: RENT.into() }).unwrap();
    assert_eq!(r.metric_display_name, "Percent Change In Median Rent");
    assert_eq!(r.value_a, Some(24.1));
    assert_eq!(r.value_b, Some(35.5));

    let r = dash
        .apply(&mut sel, SelectionChange::TractA { tract: TractId::from(25025000703u64) })
        .unwrap();
    assert_eq!(r.label_a, "tract 25025000703");
    assert_eq!(r.value_a, None);
    assert_eq!(sel.tract_a, TractId::from(25025000703u64));
}

/// A bad change fails that comparison only; the dashboard keeps serving.
#[test]
fn unknown_tract_fails_one_request() {
    let dash = build();
    let mut sel = dash.default_selection();
    let err = dash
        .apply(&mut sel, SelectionChange::TractB { tract: TractId::from(42u64) })
        .unwrap_err();
    assert!(matches!(err, DashError::UnknownTract { .. }));

    let r = dash
        .compare(INCOME, &TractId::from(25025000100u64), &TractId::from(25025000602u64))
        .unwrap();
    assert_eq!(r.value_a, Some(12.5));
    assert_eq!(r.value_b, Some(-3.2));
}

/// A rejected change leaves the selection as it was, so the next valid
/// change compares against the last good state.
#[test]
fn rejected_change_is_not_committed() {
    let dash = build();
    let mut sel = dash.default_selection();
    let before = sel.clone();

    let err = dash
        .apply(&mut sel, SelectionChange::TractB { tract: TractId::from(42u64) })
        .unwrap_err();
    assert!(matches!(err, DashError::UnknownTract { .. }));
    assert_eq!(sel, before);

    let r = dash.apply(&mut sel, SelectionChange::Metric { metric: RENT.into() }).unwrap();
    assert_eq!(r.value_a, Some(24.1));
    assert_eq!(r.value_b, Some(35.5));
    assert_eq!(sel.tract_b, TractId::from(25025000602u64));
    assert_eq!(sel.metric, RENT);
}

#[test]
fn racial_composition_totals() {
    let dash = build();
    let s = dash.summary();
    assert_eq!(s.composition_2000.white, 16100.0);
    assert_eq!(s.composition_2000.non_white, 5768.0);
    assert_eq!(s.composition_2010.white, 15550.0);
    assert_eq!(s.composition_2010.non_white, 6776.0);
    assert_eq!(s.composition_change.total_delta, 458.0);
    assert_eq!(s.composition_change.white_delta, -550.0);
    assert!(close(s.composition_change.non_white_pct.unwrap(), 1008.0 / 5768.0 * 100.0));
}

#[test]
fn income_brackets_partition_the_sample() {
    let dash = build();
    let brackets = &dash.summary().brackets;
    assert_eq!(brackets.len(), 3);

    let by = |b: IncomeBracket| brackets.iter().find(|s| s.bracket == b).unwrap();

    let bottom = by(IncomeBracket::Bottom);
    assert_eq!(bottom.tracts, 2);
    assert_eq!(bottom.share_increased, Some(0.0));
    assert!(close(bottom.mean_change.unwrap(), -13.1));

    let middle = by(IncomeBracket::Middle);
    assert_eq!(middle.tracts, 3);
    assert_eq!(middle.share_increased, Some(50.0));
    assert!(close(middle.mean_change.unwrap(), 1.0));

    let top = by(IncomeBracket::Top);
    assert_eq!(top.tracts, 3);
    assert!(close(top.mean_change.unwrap(), 7.5));

    let total: usize = brackets.iter().map(|b| b.tracts).sum();
    assert_eq!(total, 8);
}

#[test]
fn change_medians() {
    let dash = build();
    let changes = &dash.summary().changes;
    let by = |c: &str| changes.iter().find(|s| s.column == c).unwrap();

    let income = by("HINC00_PC");
    assert_eq!(income.tracts, 7);
    assert_eq!(income.median, Some(-3.2));

    let rent = by("MRENT00_PC");
    assert_eq!(rent.median, Some(24.1));
    assert_eq!(rent.share_increased, Some(100.0));

    let value = by("MHMVAL00_PC");
    assert_eq!(value.tracts, 8);
    assert!(close(value.median.unwrap(), 42.65));
}

#[test]
fn cluster_profiles_are_available() {
    let dash = build();
    let (clusters, county) = dash.profiles();
    assert_eq!(clusters.len(), 3);
    assert_eq!(county.label, COUNTY_AVERAGE.label);

    let gentrifying = cluster_profile(1).unwrap();
    assert_eq!(gentrifying.label, "Gentrifying");
    assert!(close(gentrifying.versus_county()[0], 29.95 - 8.20));
    assert!(cluster_profile(4).is_none());
}

#[test]
fn missing_data_dir_fails_to_build() {
    let config = DashConfig::default().with_data_dir("/nonexistent/tract-data");
    assert!(Dashboard::build(&config).is_err());
}
