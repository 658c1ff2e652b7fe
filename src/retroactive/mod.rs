//! Retroactive amounts: yearly schedule and owed-total aggregation

mod aggregator;
mod schedule;

pub use aggregator::{
    aggregate, installment_payment, InstallmentPlan, OwedTotal, RetroactiveStatement,
    YearlyDifference, DEFAULT_MONTHLY_INTEREST_RATE,
};
pub use schedule::{build_schedule, YearlyAdjustment, YearlyScheduleRow};
