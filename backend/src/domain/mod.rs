//! # Domain Module
//!
//! Contains the business logic of the savings planner.
//!
//! Everything in here is a pure function of its inputs: services receive the
//! cards, debts and transactions they work on along with an explicit reference
//! date, and return new values instead of mutating shared state. Nothing reads
//! the clock or touches storage.
//!
//! ## Module Organization
//!
//! - **schedule_service**: Days until the next contribution and cadence descriptions
//! - **formatting**: Percentage clamping and currency display
//! - **contribution_service**: Card creation and contributions towards a goal
//! - **debt_service**: Debt plans and installment payments
//! - **summary_service**: Monthly summary, points, distribution and flow bars
//! - **dashboard_service**: Per-render view models built from a snapshot
//! - **calendar**: Date arithmetic shared by the services above
//! - **labels**: English and Spanish display text
//!
//! ## Business Rules
//!
//! - Percentages shown to the user always lie in [0, 100]
//! - A card is completed once its saved amount reaches the target
//! - Monthly contribution days are clamped to the end of shorter months
//! - Debt payments never exceed the total to pay

pub mod calendar;
pub mod contribution_service;
pub mod dashboard_service;
pub mod debt_service;
pub mod formatting;
pub mod labels;
pub mod schedule_service;
pub mod summary_service;

pub use contribution_service::{CardValidationError, ContributionOutcome};
pub use dashboard_service::DashboardService;
pub use debt_service::{DebtPlan, DebtValidationError};
pub use formatting::{clamp_percentage, format_currency, CurrencyFormatter};
pub use labels::DisplayLanguage;
pub use schedule_service::{days_until_next_contribution, describe_schedule, ScheduleService};
pub use summary_service::SummaryService;
