//! Net worth: holdings and other assets less outstanding loans

use super::performance::InvestmentPerformance;
use crate::ledger::{Loan, OtherAsset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorth {
    pub total_investments: f64,
    pub total_other_assets: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

pub fn net_worth(
    performances: &[InvestmentPerformance],
    other_assets: &[OtherAsset],
    loans: &[Loan],
) -> NetWorth {
    let total_investments: f64 = performances.iter().map(|p| p.current_value).sum();
    let total_other_assets: f64 = other_assets.iter().map(|a| a.value).sum();
    let total_assets = total_investments + total_other_assets;
    let total_liabilities: f64 = loans.iter().map(|l| l.outstanding_amount).sum();

    NetWorth {
        total_investments,
        total_other_assets,
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Investment, InvestmentKind, LoanKind};
    use chrono::NaiveDate;

    #[test]
    fn test_net_worth() {
        let perf = InvestmentPerformance {
            investment: Investment {
                id: "mf".into(),
                name: "Index Fund".into(),
                kind: InvestmentKind::MutualFunds,
                current_value: 120_000.0,
                start_date: None,
                interest_rate: None,
                monthly_investment: None,
                goal_id: None,
            },
            total_invested: 100_000.0,
            current_value: 120_000.0,
            pnl: 20_000.0,
            xirr_pct: 0.0,
        };
        let assets = vec![
            OtherAsset { id: "a1".into(), name: "Savings".into(), value: 250_000.0 },
            OtherAsset { id: "a2".into(), name: "Home".into(), value: 7_500_000.0 },
        ];
        let loans = vec![Loan {
            id: "l1".into(),
            name: "Home Loan".into(),
            kind: LoanKind::Home,
            principal: 5_000_000.0,
            outstanding_amount: 4_800_000.0,
            interest_rate: 8.5,
            tenure_years: 20,
            emi: 43_391.0,
            start_date: NaiveDate::from_ymd_opt(2022, 7, 1).unwrap(),
            asset_current_value: None,
        }];

        let nw = net_worth(&[perf], &assets, &loans);
        assert_eq!(nw.total_assets, 7_870_000.0);
        assert_eq!(nw.total_liabilities, 4_800_000.0);
        assert_eq!(nw.net_worth, 3_070_000.0);
    }
}
