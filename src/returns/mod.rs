//! Return solvers: dated (XIRR) and evenly spaced (IRR) cash flows

mod xirr;
mod irr;

pub use xirr::{CashFlow, xirr, xirr_percent, xnpv, xnpv_derivative, DAYS_PER_YEAR};
pub use irr::calculate_irr;
