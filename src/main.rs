//! Personal Finance CLI
//!
//! Command-line front end for the finance engine: return solvers, deposit and
//! loan calculators, planning tools and a full ledger report.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use personal_finance::loans::{amortization_schedule, simulate_prepayment, total_interest_payable};
use personal_finance::deposits::{
    fixed_deposit_maturity, fixed_deposit_value, recurring_deposit_maturity, recurring_deposit_value,
};
use personal_finance::planning::{
    fire_plan, human_life_value, sip_future_value, swp_schedule, FireInput, HlvInput,
};
use personal_finance::{
    build_dashboard, calculate_emi, xirr, CashFlow, CompoundingFrequency, EngineConfig, Ledger,
    PrepaymentInput,
};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

/// Personal finance calculators and ledger reports
#[derive(Parser)]
#[command(name = "personal_finance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Annualized return of dated cash flows read from a CSV (date,amount)
    Xirr {
        file: PathBuf,
    },

    /// Fixed deposit value (today or at maturity)
    Fd {
        #[arg(long)]
        principal: f64,
        /// Annual rate, percent
        #[arg(long)]
        rate: f64,
        /// Value on --as-of since this date
        #[arg(long, conflicts_with = "months")]
        start: Option<NaiveDate>,
        /// Tenure for a maturity quote
        #[arg(long)]
        months: Option<u32>,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long, default_value = "quarterly")]
        compounding: String,
    },

    /// Recurring deposit value (today or at maturity)
    Rd {
        #[arg(long)]
        monthly: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long, conflicts_with = "months")]
        start: Option<NaiveDate>,
        #[arg(long)]
        months: Option<u32>,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Monthly instalment and total interest of a loan
    Emi {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },

    /// Month-by-month amortization schedule
    Amortize {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
        /// Write the full schedule to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare a part-prepayment against the current loan
    Prepay {
        /// Outstanding principal
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        /// Remaining tenure in months
        #[arg(long)]
        months: u32,
        #[arg(long)]
        prepayment: f64,
    },

    /// Future value of a monthly SIP
    Sip {
        #[arg(long)]
        monthly: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },

    /// Systematic withdrawal from a corpus
    Swp {
        #[arg(long)]
        corpus: f64,
        #[arg(long)]
        withdrawal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },

    /// Early-retirement corpus and required SIP
    Fire {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        retire_at: u32,
        #[arg(long)]
        monthly_expenses: f64,
        #[arg(long, default_value_t = 6.0)]
        inflation: f64,
        #[arg(long, default_value_t = 12.0)]
        expected_return: f64,
        #[arg(long, default_value_t = 4.0)]
        withdrawal_rate: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
    },

    /// Life cover needed to replace income (human life value)
    Hlv {
        #[arg(long)]
        income: f64,
        #[arg(long)]
        age: u32,
        #[arg(long, default_value_t = 60)]
        retire_at: u32,
        #[arg(long, default_value_t = 0.0)]
        loans: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long, default_value_t = 0.0)]
        cover: f64,
    },

    /// Full dashboard for a ledger directory of CSV files
    Report {
        dir: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, table: impl FnOnce()) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => table(),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env();
    let format = cli.format;

    match cli.command {
        Commands::Xirr { file } => {
            let mut reader = csv::Reader::from_reader(
                File::open(&file).with_context(|| format!("opening {}", file.display()))?,
            );
            let flows = reader
                .deserialize::<CashFlow>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("reading cash flows from {}", file.display()))?;

            let rate = xirr(&flows, &config.solver)?;
            emit(format, &serde_json::json!({ "flows": flows.len(), "xirr": rate }), || {
                println!("Cash flows: {}", flows.len());
                println!("XIRR: {:.4}%", rate * 100.0);
            })
        }

        Commands::Fd { principal, rate, start, months, as_of, compounding } => {
            let Some(frequency) = CompoundingFrequency::parse(&compounding) else {
                bail!("unknown compounding frequency '{}'", compounding);
            };
            let value = match (start, months) {
                (_, Some(months)) => fixed_deposit_maturity(principal, rate, months, frequency),
                (Some(start), None) => {
                    fixed_deposit_value(principal, rate, start, as_of.unwrap_or_else(today), frequency)
                }
                (None, None) => bail!("either --start or --months is required"),
            };
            emit(format, &serde_json::json!({ "principal": principal, "value": value }), || {
                println!("Principal: {:.2}", principal);
                println!("Value:     {:.2}", value);
                println!("Interest:  {:.2}", value - principal);
            })
        }

        Commands::Rd { monthly, rate, start, months, as_of } => {
            let value = match (start, months) {
                (_, Some(months)) => recurring_deposit_maturity(monthly, rate, months),
                (Some(start), None) => {
                    recurring_deposit_value(monthly, rate, start, as_of.unwrap_or_else(today))
                }
                (None, None) => bail!("either --start or --months is required"),
            };
            emit(format, &serde_json::json!({ "monthly": monthly, "value": value }), || {
                println!("Instalment: {:.2}", monthly);
                println!("Value:      {:.2}", value);
            })
        }

        Commands::Emi { principal, rate, months } => {
            let emi = calculate_emi(principal, rate, months);
            let interest = total_interest_payable(principal, emi, months);
            emit(
                format,
                &serde_json::json!({ "emi": emi, "total_interest": interest, "total_payment": principal + interest }),
                || {
                    println!("EMI:            {:.2}", emi);
                    println!("Total interest: {:.2}", interest);
                    println!("Total payment:  {:.2}", principal + interest);
                },
            )
        }

        Commands::Amortize { principal, rate, months, output } => {
            let schedule = amortization_schedule(principal, rate, months);

            if let Some(path) = &output {
                let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
                schedule.write_csv(file)?;
            }

            emit(format, &schedule, || {
                println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "EMI", "Principal", "Interest", "Balance");
                println!("{}", "-".repeat(59));
                for row in schedule.rows.iter().take(24) {
                    println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                        row.month, row.emi, row.principal, row.interest, row.balance);
                }
                if schedule.len() > 24 {
                    println!("... ({} more months)", schedule.len() - 24);
                }
                println!("\nTotal interest: {:.2}", schedule.total_interest());
                if let Some(path) = &output {
                    println!("Full schedule written to: {}", path.display());
                }
            })
        }

        Commands::Prepay { principal, rate, months, prepayment } => {
            let outcome = simulate_prepayment(&PrepaymentInput {
                outstanding_principal: principal,
                annual_rate_pct: rate,
                remaining_months: months,
                prepayment_amount: prepayment,
            });
            emit(format, &outcome, || {
                println!("Current EMI:              {:.2}", outcome.old_emi);
                println!("\nReduce EMI, keep tenure:");
                println!("  New EMI:                {:.2}", outcome.new_emi);
                println!("  Interest saved:         {:.2}", outcome.interest_saved);
                println!("\nKeep EMI, reduce tenure:");
                println!("  Tenure reduced by:      {}", outcome.tenure_reduction);
                println!("  Interest saved:         {:.2}", outcome.interest_saved_keeping_emi);
            })
        }

        Commands::Sip { monthly, rate, months } => {
            let projection = sip_future_value(monthly, rate, months);
            emit(format, &projection, || {
                println!("Invested:     {:.2}", projection.invested);
                println!("Future value: {:.2}", projection.future_value);
                println!("Gains:        {:.2}", projection.gains);
            })
        }

        Commands::Swp { corpus, withdrawal, rate, months } => {
            let schedule = swp_schedule(corpus, withdrawal, rate, months);
            emit(format, &schedule, || {
                println!("Months sustained: {}", schedule.months_sustained());
                println!("Total withdrawn:  {:.2}", schedule.total_withdrawn);
                println!("Final balance:    {:.2}", schedule.final_balance);
                if schedule.depleted {
                    println!("Corpus depleted before {} months", months);
                }
            })
        }

        Commands::Fire { age, retire_at, monthly_expenses, inflation, expected_return, withdrawal_rate, savings } => {
            let plan = fire_plan(&FireInput {
                current_age: age,
                retirement_age: retire_at,
                monthly_expenses,
                inflation_pct: inflation,
                expected_return_pct: expected_return,
                safe_withdrawal_rate_pct: withdrawal_rate,
                current_savings: savings,
            })?;
            emit(format, &plan, || {
                println!("Years to retirement:     {}", plan.years_to_retirement);
                println!("Annual expense then:     {:.2}", plan.annual_expense_at_retirement);
                println!("Corpus required:         {:.2}", plan.corpus_required);
                println!("Savings at retirement:   {:.2}", plan.savings_at_retirement);
                println!("Shortfall:               {:.2}", plan.shortfall);
                println!("Monthly SIP required:    {:.2}", plan.monthly_sip_required);
            })
        }

        Commands::Hlv { income, age, retire_at, loans, savings, cover } => {
            let result = human_life_value(&HlvInput {
                annual_income: income,
                current_age: age,
                retirement_age: retire_at,
                outstanding_loans: loans,
                existing_savings: savings,
                existing_cover: cover,
            });
            emit(format, &result, || {
                println!("Total needs:       {:.2}", result.total_needs);
                println!("Assets available:  {:.2}", result.assets_available);
                println!("Insurance gap:     {:.2}", result.insurance_gap);
            })
        }

        Commands::Report { dir, as_of } => {
            let ledger = Ledger::load_dir(&dir)
                .with_context(|| format!("loading ledger from {}", dir.display()))?;
            let dashboard = build_dashboard(&ledger, as_of.unwrap_or_else(today), &config);

            emit(format, &dashboard, || print_dashboard(&dashboard))
        }
    }
}

fn print_dashboard(d: &personal_finance::Dashboard) {
    println!("Personal Finance Report as of {}", d.as_of);
    println!("=====================================\n");

    println!("Balance:          {:>14.2}", d.summary.total_balance);
    println!("Income (month):   {:>14.2}", d.summary.monthly_income);
    println!("Expenses (month): {:>14.2}", d.summary.monthly_expenses);

    println!("\nInvestments:");
    println!("{:<28} {:<18} {:>14} {:>14} {:>14} {:>9}",
        "Name", "Type", "Invested", "Value", "P&L", "XIRR %");
    println!("{}", "-".repeat(102));
    for p in &d.investments {
        println!("{:<28} {:<18} {:>14.2} {:>14.2} {:>14.2} {:>9.2}",
            p.investment.name, p.investment.kind, p.total_invested, p.current_value, p.pnl, p.xirr_pct);
    }
    println!("{}", "-".repeat(102));
    println!("{:<47} {:>14.2} {:>14.2} {:>14.2} {:>9.2}",
        "Total", d.portfolio.total_invested, d.portfolio.total_current_value,
        d.portfolio.overall_gain_loss, d.portfolio.xirr_pct);

    println!("\nNet worth:");
    println!("  Investments:  {:>14.2}", d.net_worth.total_investments);
    println!("  Other assets: {:>14.2}", d.net_worth.total_other_assets);
    println!("  Liabilities:  {:>14.2}", d.net_worth.total_liabilities);
    println!("  Net worth:    {:>14.2}", d.net_worth.net_worth);

    if !d.budgets.is_empty() {
        println!("\nBudgets:");
        for b in &d.budgets {
            let flag = if b.over_budget { " OVER" } else { "" };
            println!("  {:<14} {:>10.2} / {:>10.2} ({:>6.1}%){}",
                b.category, b.spent, b.limit, b.utilization_pct, flag);
        }
    }

    if !d.goals.is_empty() {
        println!("\nGoals:");
        for g in &d.goals {
            println!("  {:<14} saved {:>12.2} ({:>6.1}%), {:>10.2}/month for {} months",
                g.goal_id, g.saved, g.progress_pct, g.monthly_required, g.months_left);
        }
    }

    if !d.upcoming_premiums.is_empty() {
        println!("\nPremiums due:");
        for p in &d.upcoming_premiums {
            println!("  {} {:<28} {:>10.2}", p.premium_due_date, p.policy_name, p.premium_amount);
        }
    }

    if !d.upcoming_bills.is_empty() {
        println!("\nUpcoming bills:");
        for r in &d.upcoming_bills {
            println!("  {} {:<28} {:>10.2}", r.next_due_date, r.name, r.amount);
        }
    }
}
