//! dash-runner: headless runner for the Suffolk County tract dashboard.
//!
//! Usage:
//!   dash-runner --data-dir ./data
//!   dash-runner --metric "Percent Change in Median Rent" --tract-a 25025000100 --tract-b 25025000602
//!   dash-runner --config dashboard.json --ipc-mode

use anyhow::Result;
use tractdash_core::{
    comparison::{ComparisonChart, ComparisonRequest, ComparisonResult},
    config::DashConfig,
    dashboard::Dashboard,
    error::DashResult,
    profile::ClusterProfile,
    selection::{Selection, SelectionChange},
    summary::DashboardSummary,
    types::TractId,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetOptions,
    GetSummary,
    GetProfiles,
    GetState,
    Select {
        change: SelectionChange,
    },
    Compare {
        metric:  String,
        tract_a: TractId,
        tract_b: TractId,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    selection: Selection,
    chart:     ComparisonChart,
}

#[derive(serde::Serialize)]
struct Profiles<'a> {
    indicators:     &'a [&'a str],
    clusters:       &'a [ClusterProfile],
    county_average: &'a ClusterProfile,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match find_arg(&args, "--config") {
        Some(path) => DashConfig::load(path)?,
        None => DashConfig::default(),
    };
    if let Some(dir) = find_arg(&args, "--data-dir") {
        config = config.with_data_dir(dir);
    }

    if !ipc_mode {
        println!("Suffolk County tracts: dash-runner");
        println!("  data_dir:  {}", config.data_dir.display());
        println!();
    }

    let dashboard = Dashboard::build(&config)?;

    let mut selection = dashboard.default_selection();
    if let Some(metric) = find_arg(&args, "--metric") {
        selection.apply(SelectionChange::Metric { metric: metric.to_string() });
    }
    if let Some(tract) = find_arg(&args, "--tract-a") {
        selection.apply(SelectionChange::TractA { tract: TractId::from(tract) });
    }
    if let Some(tract) = find_arg(&args, "--tract-b") {
        selection.apply(SelectionChange::TractB { tract: TractId::from(tract) });
    }

    if ipc_mode {
        run_ipc_loop(&dashboard, selection)?;
    } else {
        print_summary(dashboard.summary());
        print_comparison(&dashboard, &selection)?;
    }

    Ok(())
}

fn run_ipc_loop(dashboard: &Dashboard, mut selection: Selection) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    serve(dashboard, &mut selection, stdin.lock(), &mut stdout)
}

/// Answer one JSON line per request line until EOF or `quit`.
fn serve(
    dashboard: &Dashboard,
    selection: &mut Selection,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                write_error(out, &e.to_string())?;
                continue;
            }
        };

        let response = match request {
            IpcRequest::Quit => break,
            IpcRequest::GetOptions => Ok(to_json(&dashboard.options())?),
            IpcRequest::GetSummary => Ok(to_json(dashboard.summary())?),
            IpcRequest::GetProfiles => {
                let (clusters, county_average) = dashboard.profiles();
                Ok(to_json(&Profiles {
                    indicators: &tractdash_core::profile::INDICATORS,
                    clusters,
                    county_average,
                })?)
            }
            IpcRequest::GetState => dashboard
                .compare_request(&selection.request())
                .and_then(|r| state(selection, r)),
            IpcRequest::Select { change } => dashboard
                .apply(selection, change)
                .and_then(|r| state(selection, r)),
            IpcRequest::Compare { metric, tract_a, tract_b } => {
                let request = ComparisonRequest { metric, tract_a, tract_b };
                dashboard
                    .compare_request(&request)
                    .and_then(|r| Ok(serde_json::to_value(ComparisonChart::from(r))?))
            }
        };

        // A failed comparison only fails this request.
        match response {
            Ok(value) => writeln!(out, "{value}")?,
            Err(e) => {
                log::warn!("request failed: {e}");
                write_error(out, &e.to_string())?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn state(selection: &Selection, result: ComparisonResult) -> DashResult<serde_json::Value> {
    Ok(serde_json::to_value(UiState {
        selection: selection.clone(),
        chart:     ComparisonChart::from(result),
    })?)
}

fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    let c00 = &summary.composition_2000;
    let c10 = &summary.composition_2010;
    let change = &summary.composition_change;

    println!("=== RACIAL COMPOSITION ===");
    println!("  {}: white {:.0} | non-white {:.0} | total {:.0}", c00.year, c00.white, c00.non_white, c00.total());
    println!("  {}: white {:.0} | non-white {:.0} | total {:.0}", c10.year, c10.white, c10.non_white, c10.total());
    println!(
        "  change: total {:+.0} ({}) | white {:+.0} ({}) | non-white {:+.0} ({})",
        change.total_delta, pct(change.total_pct),
        change.white_delta, pct(change.white_pct),
        change.non_white_delta, pct(change.non_white_pct),
    );

    println!();
    println!("=== INCOME BY 2000 BRACKET ===");
    for b in &summary.brackets {
        println!(
            "  {:<28} tracts: {:>3} | rose: {} | mean change: {}",
            b.bracket.label(), b.tracts, pct(b.share_increased), pct(b.mean_change)
        );
    }

    println!();
    println!("=== CHANGES 2000-2010 ===");
    for c in &summary.changes {
        println!(
            "  {:<12} tracts: {:>3} | rose: {} | median: {}",
            c.column, c.tracts, pct(c.share_increased), pct(c.median)
        );
    }
}

fn print_comparison(dashboard: &Dashboard, selection: &Selection) -> Result<()> {
    let result = dashboard.compare_request(&selection.request())?;
    println!();
    println!("=== COMPARE TRACTS: {} ===", result.metric_display_name);
    for (label, value) in [(&result.label_a, result.value_a), (&result.label_b, result.value_b)] {
        match value {
            Some(v) => println!("  {label:<20} {v:.2}"),
            None    => println!("  {label:<20} (missing)"),
        }
    }
    Ok(())
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}%")).unwrap_or_else(|| "n/a".to_string())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
