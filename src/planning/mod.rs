//! Planning calculators: SIP, lump sum, inflation, FIRE, SWP and human life value

mod calculators;

pub use calculators::{
    FireInput, FirePlan, HlvInput, HlvResult, Projection, SwpRow, SwpSchedule, fire_plan,
    human_life_value, inflation_adjusted_cost, lump_sum_future_value, sip_future_value,
    swp_schedule,
};
