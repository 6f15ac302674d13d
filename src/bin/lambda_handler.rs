//! AWS Lambda handler for the finance calculators
//!
//! Accepts a JSON request tagged by `calculation` and returns the result as
//! JSON. Invalid requests come back with an `error` field instead of failing
//! the invocation.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use personal_finance::deposits::{
    fixed_deposit_maturity, fixed_deposit_value, recurring_deposit_maturity, recurring_deposit_value,
};
use personal_finance::loans::{amortization_schedule, simulate_prepayment, total_interest_payable};
use personal_finance::planning::{fire_plan, human_life_value, sip_future_value, FireInput, HlvInput};
use personal_finance::{
    calculate_emi, xirr, CashFlow, CompoundingFrequency, EngineConfig, FinanceError, PrepaymentInput,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(tag = "calculation", rename_all = "snake_case")]
pub enum CalculationRequest {
    Xirr {
        cash_flows: Vec<CashFlow>,
    },
    #[serde(rename = "fd")]
    FixedDeposit {
        principal: f64,
        annual_rate_pct: f64,
        #[serde(default)]
        start_date: Option<NaiveDate>,
        #[serde(default)]
        as_of: Option<NaiveDate>,
        #[serde(default)]
        tenure_months: Option<u32>,
        #[serde(default)]
        compounding: CompoundingFrequency,
    },
    #[serde(rename = "rd")]
    RecurringDeposit {
        monthly: f64,
        annual_rate_pct: f64,
        #[serde(default)]
        start_date: Option<NaiveDate>,
        #[serde(default)]
        as_of: Option<NaiveDate>,
        #[serde(default)]
        tenure_months: Option<u32>,
    },
    Emi {
        principal: f64,
        annual_rate_pct: f64,
        tenure_months: u32,
    },
    Amortization {
        principal: f64,
        annual_rate_pct: f64,
        tenure_months: u32,
    },
    Prepayment(PrepaymentInput),
    Sip {
        monthly: f64,
        annual_return_pct: f64,
        months: u32,
    },
    Fire(FireInput),
    Hlv(HlvInput),
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Dated valuations need a reference date; the handler never guesses one.
fn require_date(date: Option<NaiveDate>, field: &str) -> Result<NaiveDate, FinanceError> {
    date.ok_or_else(|| FinanceError::InvalidInput(format!("`{}` is required", field)))
}

fn calculate(request: CalculationRequest, config: &EngineConfig) -> Result<Value, FinanceError> {
    let value = match request {
        CalculationRequest::Xirr { cash_flows } => {
            let rate = xirr(&cash_flows, &config.solver)?;
            json!({ "xirr": rate, "xirr_pct": rate * 100.0 })
        }

        CalculationRequest::FixedDeposit { principal, annual_rate_pct, start_date, as_of, tenure_months, compounding } => {
            let value = match tenure_months {
                Some(months) => fixed_deposit_maturity(principal, annual_rate_pct, months, compounding),
                None => fixed_deposit_value(
                    principal,
                    annual_rate_pct,
                    require_date(start_date, "start_date")?,
                    require_date(as_of, "as_of")?,
                    compounding,
                ),
            };
            json!({ "value": value, "interest": value - principal })
        }

        CalculationRequest::RecurringDeposit { monthly, annual_rate_pct, start_date, as_of, tenure_months } => {
            let value = match tenure_months {
                Some(months) => recurring_deposit_maturity(monthly, annual_rate_pct, months),
                None => recurring_deposit_value(
                    monthly,
                    annual_rate_pct,
                    require_date(start_date, "start_date")?,
                    require_date(as_of, "as_of")?,
                ),
            };
            json!({ "value": value })
        }

        CalculationRequest::Emi { principal, annual_rate_pct, tenure_months } => {
            let emi = calculate_emi(principal, annual_rate_pct, tenure_months);
            let total_interest = total_interest_payable(principal, emi, tenure_months);
            json!({
                "emi": emi,
                "total_interest": total_interest,
                "total_payment": principal + total_interest,
            })
        }

        CalculationRequest::Amortization { principal, annual_rate_pct, tenure_months } => {
            let schedule = amortization_schedule(principal, annual_rate_pct, tenure_months);
            json!({
                "emi": schedule.emi(),
                "total_interest": schedule.total_interest(),
                "rows": schedule.rows,
            })
        }

        CalculationRequest::Prepayment(input) => {
            let outcome = simulate_prepayment(&input);
            let mut value = serde_json::to_value(outcome)?;
            value["tenure_reduction_label"] = json!(outcome.tenure_reduction.to_string());
            value
        }

        CalculationRequest::Sip { monthly, annual_return_pct, months } => {
            serde_json::to_value(sip_future_value(monthly, annual_return_pct, months))?
        }

        CalculationRequest::Fire(input) => serde_json::to_value(fire_plan(&input)?)?,

        CalculationRequest::Hlv(input) => serde_json::to_value(human_life_value(&input))?,
    };
    Ok(value)
}

async fn handler(event: LambdaEvent<Value>) -> Result<CalculationResponse, Error> {
    let start = std::time::Instant::now();
    let config = EngineConfig::from_env();

    let outcome = serde_json::from_value::<CalculationRequest>(event.payload)
        .map_err(FinanceError::from)
        .and_then(|request| {
            info!("Calculation request: {:?}", request);
            calculate(request, &config)
        });

    let execution_time_ms = start.elapsed().as_millis() as u64;
    let response = match outcome {
        Ok(result) => CalculationResponse {
            result: Some(result),
            execution_time_ms,
            error: None,
        },
        Err(e) => {
            warn!("Calculation failed: {}", e);
            CalculationResponse {
                result: None,
                execution_time_ms,
                error: Some(e.to_string()),
            }
        }
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
