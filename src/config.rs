//! Engine configuration
//!
//! Defaults match the tracker's behaviour. `EngineConfig::from_env` lets the
//! binaries override solver and valuation knobs without a config file.

use crate::deposits::CompoundingFrequency;
use serde::{Deserialize, Serialize};
use std::env;

/// Newton-Raphson / bisection settings for return solvers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Initial rate guess (annual, decimal)
    pub guess: f64,
    /// Stop once |NPV| falls below this
    pub tolerance: f64,
    pub max_iterations: u32,
    /// Lowest admissible rate; must stay above -1.0
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            guess: 0.1,
            tolerance: 1.0e-7,
            max_iterations: 100,
            lower_bound: -0.99,
            upper_bound: 10.0,
        }
    }
}

/// Settings for the derived-state layer and dashboards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub solver: SolverConfig,

    /// Compounding used when valuing fixed deposits
    pub fd_compounding: CompoundingFrequency,

    /// Look-ahead for upcoming insurance premiums
    pub premium_window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            fd_compounding: CompoundingFrequency::Quarterly,
            premium_window_days: 30,
        }
    }
}

impl EngineConfig {
    /// Build a config from environment variables, falling back to defaults:
    ///   XIRR_GUESS, XIRR_TOLERANCE, XIRR_MAX_ITERATIONS,
    ///   FD_COMPOUNDING (monthly|quarterly|half-yearly|yearly), PREMIUM_WINDOW_DAYS
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let guess = env_parse("XIRR_GUESS").unwrap_or(defaults.solver.guess);
        let tolerance = env_parse("XIRR_TOLERANCE").unwrap_or(defaults.solver.tolerance);
        let max_iterations =
            env_parse("XIRR_MAX_ITERATIONS").unwrap_or(defaults.solver.max_iterations);

        let fd_compounding = env::var("FD_COMPOUNDING")
            .ok()
            .and_then(|s| CompoundingFrequency::parse(&s))
            .unwrap_or(defaults.fd_compounding);

        let premium_window_days =
            env_parse("PREMIUM_WINDOW_DAYS").unwrap_or(defaults.premium_window_days);

        Self {
            solver: SolverConfig {
                guess,
                tolerance,
                max_iterations,
                ..defaults.solver
            },
            fd_compounding,
            premium_window_days,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tracker() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.solver.max_iterations, 100);
        assert!((cfg.solver.guess - 0.1).abs() < 1e-12);
        assert_eq!(cfg.fd_compounding, CompoundingFrequency::Quarterly);
        assert_eq!(cfg.premium_window_days, 30);
    }
}
