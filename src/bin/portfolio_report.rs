//! Batch portfolio report across many ledgers
//!
//! Each argument is a ledger directory. Ledgers are evaluated in parallel and
//! one summary row per ledger is written to CSV; per-holding detail goes to a
//! second file when requested.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::warn;
use personal_finance::{build_dashboard, Dashboard, EngineConfig, Ledger};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "portfolio_report", about = "Summarize many ledger directories")]
struct Args {
    /// Ledger directories
    #[arg(required = true)]
    dirs: Vec<PathBuf>,

    /// Valuation date (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[arg(short, long, default_value = "portfolio_report.csv")]
    output: PathBuf,

    /// Also write one row per holding to this file
    #[arg(long)]
    holdings: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    ledger: String,
    total_invested: f64,
    current_value: f64,
    gain_loss: f64,
    return_pct: f64,
    xirr_pct: f64,
    other_assets: f64,
    liabilities: f64,
    net_worth: f64,
    monthly_income: f64,
    monthly_expenses: f64,
    budgets_over: usize,
    premiums_due: usize,
}

impl SummaryRow {
    fn new(ledger: String, d: &Dashboard) -> Self {
        Self {
            ledger,
            total_invested: d.portfolio.total_invested,
            current_value: d.portfolio.total_current_value,
            gain_loss: d.portfolio.overall_gain_loss,
            return_pct: d.portfolio.overall_return_pct,
            xirr_pct: d.portfolio.xirr_pct,
            other_assets: d.net_worth.total_other_assets,
            liabilities: d.net_worth.total_liabilities,
            net_worth: d.net_worth.net_worth,
            monthly_income: d.summary.monthly_income,
            monthly_expenses: d.summary.monthly_expenses,
            budgets_over: d.budgets.iter().filter(|b| b.over_budget).count(),
            premiums_due: d.upcoming_premiums.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HoldingRow<'a> {
    ledger: &'a str,
    id: &'a str,
    name: &'a str,
    kind: &'static str,
    invested: f64,
    current_value: f64,
    pnl: f64,
    xirr_pct: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = EngineConfig::from_env();
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let start = Instant::now();
    println!("Evaluating {} ledgers as of {}...", args.dirs.len(), as_of);

    let results: Vec<(String, Dashboard)> = args
        .dirs
        .par_iter()
        .filter_map(|dir| {
            let name = dir.display().to_string();
            match Ledger::load_dir(dir) {
                Ok(ledger) => Some((name, build_dashboard(&ledger, as_of, &config))),
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    None
                }
            }
        })
        .collect();

    println!("Evaluated {} ledgers in {:?}", results.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for (name, dashboard) in &results {
        writer.serialize(SummaryRow::new(name.clone(), dashboard))?;
    }
    writer.flush()?;
    println!("Summary written to {}", args.output.display());

    if let Some(path) = &args.holdings {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for (name, dashboard) in &results {
            for p in &dashboard.investments {
                writer.serialize(HoldingRow {
                    ledger: name,
                    id: &p.investment.id,
                    name: &p.investment.name,
                    kind: p.investment.kind.label(),
                    invested: p.total_invested,
                    current_value: p.current_value,
                    pnl: p.pnl,
                    xirr_pct: p.xirr_pct,
                })?;
            }
        }
        writer.flush()?;
        println!("Holdings written to {}", path.display());
    }

    let total_net_worth: f64 = results.iter().map(|(_, d)| d.net_worth.net_worth).sum();
    println!("\nCombined net worth: {:.2}", total_net_worth);
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
