//! Pure nutrition computations: calorie goal estimation and the per-day
//! calorie ledger. No I/O here; callers fetch rows and write results back.

mod estimator;
mod ledger;

pub use estimator::{age_on, estimate_calorie_goal, NutritionError, Sex};
pub use ledger::{aggregate_day, daily_progress, DailyProgress};
