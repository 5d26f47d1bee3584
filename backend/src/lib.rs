//! # Savings Planner Backend
//!
//! Non-UI logic for the savings planner: contribution schedules, progress and
//! currency display, debts and the monthly budget summary.
//!
//! - **domain**: Business logic and rules
//! - **config**: User settings loaded from YAML
//! - **io**: Reading state snapshots handed over by the UI

pub mod config;
pub mod domain;
pub mod io;

pub use config::PlannerConfig;
pub use domain::{
    clamp_percentage, days_until_next_contribution, describe_schedule, format_currency,
    DashboardService, DisplayLanguage, ScheduleService, SummaryService,
};
