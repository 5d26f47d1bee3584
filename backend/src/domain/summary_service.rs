//! Monthly budget summary for the savings planner.
//!
//! Aggregates the transactions logged by contributions and debt payments into
//! the figures shown on the summary and chart screens: money invested in the
//! current month, reward points and level, the planned-versus-actual ratio,
//! the savings/debt split and per-period flow bars.
//!
//! Like the schedule logic, every computation receives the reference date
//! explicitly.

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use shared::{
    DebtCard, Distribution, FlowBar, FlowKind, Granularity, MonthlySummary, PieSlice, SavingsCard,
    Transaction,
};
use std::collections::{BTreeMap, HashMap};

use super::calendar::{next_month, previous_month, start_of_month, start_of_week};
use super::debt_service;
use super::formatting::{ratio_percentage, CurrencyFormatter};
use super::labels::DisplayLanguage;
use crate::config::PlannerConfig;

/// Transactions dated in the same calendar month as `reference`
pub fn transactions_in_month<'a>(
    transactions: &'a [Transaction],
    reference: NaiveDate,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |tx| tx.date.year() == reference.year() && tx.date.month() == reference.month())
}

/// Split of money movements between savings and debt payments
pub fn distribution<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Distribution {
    let (savings, debt) = transactions
        .into_iter()
        .fold((0.0, 0.0), |(savings, debt), tx| match tx.effective_kind() {
            FlowKind::Debt => (savings, debt + tx.delta.abs()),
            FlowKind::Savings => (savings + tx.delta.max(0.0), debt),
        });

    let total = savings + debt;
    Distribution {
        savings,
        debt,
        total,
        savings_percent: ratio_percentage(savings, total),
        debt_percent: ratio_percentage(debt, total),
    }
}

/// Sum of what is still owed across all debts
pub fn total_debt_pending(debts: &[DebtCard]) -> f64 {
    debts.iter().map(debt_service::remaining).sum()
}

/// Share of each card in the savings pie. Cards are weighed by saved amount,
/// or by target while nothing has been saved yet.
pub fn pie_slices(cards: &[SavingsCard]) -> Vec<PieSlice> {
    if cards.is_empty() {
        return Vec::new();
    }

    let saved_total: f64 = cards.iter().map(|card| card.saved_amount).sum();
    let by_saved = saved_total > 0.0;
    let denominator = if by_saved {
        saved_total
    } else {
        cards.iter().map(|card| card.target_amount).sum()
    };
    if !denominator.is_finite() || denominator <= 0.0 {
        return Vec::new();
    }

    cards
        .iter()
        .map(|card| {
            let value = if by_saved { card.saved_amount } else { card.target_amount };
            PieSlice {
                card_id: card.id.clone(),
                name: card.name.clone(),
                percent: ratio_percentage(value, denominator),
            }
        })
        .collect()
}

/// "Started N days ago" style label for the onboarding date
pub fn started_label(onboarded_at: Option<NaiveDate>, today: NaiveDate, language: DisplayLanguage) -> String {
    let Some(start) = onboarded_at else {
        return language.no_start_date().to_string();
    };

    let days = (today - start).num_days().max(0);
    if days == 0 {
        language.started_today().to_string()
    } else if days < 30 {
        language.started_days_ago(days)
    } else {
        language.started_months_ago(days / 30)
    }
}

/// Start of the chart period containing `date`
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => start_of_week(date),
        Granularity::Month => start_of_month(date),
    }
}

fn period_key(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Month => start.format("%Y-%m").to_string(),
        Granularity::Day | Granularity::Week => start.format("%Y-%m-%d").to_string(),
    }
}

/// Start of the period before or after `start`, `None` past the calendar's range
fn step_period(start: NaiveDate, granularity: Granularity, forward: bool) -> Option<NaiveDate> {
    let days = match granularity {
        Granularity::Day => 1,
        Granularity::Week => 7,
        Granularity::Month => {
            let (year, month) = if forward {
                next_month(start.year(), start.month())
            } else {
                previous_month(start.year(), start.month())
            };
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
    };
    let step = Duration::days(if forward { days } else { -days });
    start.checked_add_signed(step)
}

fn short_date(date: NaiveDate, language: DisplayLanguage) -> String {
    format!("{:02} {}", date.day(), language.month_abbreviation(date.month()))
}

fn period_label(start: NaiveDate, granularity: Granularity, language: DisplayLanguage) -> String {
    match granularity {
        Granularity::Day => short_date(start, language),
        Granularity::Week => {
            let end = start.checked_add_signed(Duration::days(6)).unwrap_or(start);
            format!("{} - {}", short_date(start, language), short_date(end, language))
        }
        Granularity::Month => format!("{} {}", language.month_abbreviation(start.month()), start.year()),
    }
}

/// Savings and debt flow per period, from `start` (or the earliest
/// transaction) through `today`, keeping the last `limit` periods.
///
/// Only the periods that survive the limit are visited, so an ancient start
/// date costs no more than a recent one.
pub fn flow_bars(
    transactions: &[Transaction],
    start: Option<NaiveDate>,
    today: NaiveDate,
    granularity: Granularity,
    limit: usize,
    language: DisplayLanguage,
) -> Vec<FlowBar> {
    let Some(start) = start.or_else(|| transactions.iter().map(|tx| tx.date).min()) else {
        return Vec::new();
    };
    if start > today || limit == 0 {
        return Vec::new();
    }

    let first_period = period_start(start, granularity);
    let last_period = period_start(today, granularity);
    let mut window_start = last_period;
    for _ in 1..limit {
        match step_period(window_start, granularity, false) {
            Some(previous) if previous >= first_period => window_start = previous,
            _ => break,
        }
    }
    let window_from = start.max(window_start);

    // Debt is netted per day before taking its magnitude
    let mut by_day: HashMap<NaiveDate, (f64, f64)> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.date >= window_from && tx.date <= today)
    {
        let day = by_day.entry(tx.date).or_insert((0.0, 0.0));
        match tx.effective_kind() {
            FlowKind::Savings => day.0 += tx.delta,
            FlowKind::Debt => day.1 += tx.delta,
        }
    }

    let mut totals: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for (day, (savings, debt)) in by_day {
        let period = totals.entry(period_start(day, granularity)).or_insert((0.0, 0.0));
        period.0 += savings;
        period.1 += debt.abs();
    }

    let mut bars = Vec::new();
    let mut cursor = Some(window_start);
    while let Some(period) = cursor.filter(|period| *period <= last_period) {
        let (savings, debt) = totals.get(&period).copied().unwrap_or((0.0, 0.0));
        bars.push(FlowBar {
            id: format!("flow-{}", period_key(period, granularity)),
            label: period_label(period, granularity, language),
            period_start: period,
            savings,
            debt,
        });
        cursor = step_period(period, granularity, true);
    }

    debug!("Built {} flow bars from {} to {}", bars.len(), window_start, last_period);
    bars
}

/// Budget aggregation bound to the planner configuration
#[derive(Debug, Clone)]
pub struct SummaryService {
    config: PlannerConfig,
    formatter: CurrencyFormatter,
}

impl SummaryService {
    pub fn new(config: PlannerConfig) -> Self {
        let formatter = CurrencyFormatter::new(config.currency);
        Self { config, formatter }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Points earned for the amount invested this month
    pub fn points_for(&self, invested: f64) -> u64 {
        let blocks = (invested / self.config.block_value()).floor();
        if blocks.is_nan() || blocks <= 0.0 {
            return 0;
        }
        (blocks as u64).saturating_mul(self.config.points_per_block)
    }

    pub fn level_for(&self, points: u64) -> u64 {
        points / self.config.points_per_level.max(1) + 1
    }

    /// Summary of the month containing `reference`
    pub fn monthly_summary(
        &self,
        cards: &[SavingsCard],
        debts: &[DebtCard],
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> MonthlySummary {
        let monthly: Vec<&Transaction> = transactions_in_month(transactions, reference).collect();
        let net: f64 = monthly.iter().map(|tx| tx.delta).sum();
        let invested = net.max(0.0);
        let withdrawn = (-net).max(0.0);

        let points = self.points_for(invested);
        let level = self.level_for(points);
        let planned = self.config.planned_investment;
        let remaining_planned = (planned - invested).max(0.0);
        let language = self.config.language;

        debug!(
            "Summary for {}: {} transactions, invested {:.2}, {} points",
            start_of_month(reference),
            monthly.len(),
            invested,
            points
        );

        MonthlySummary {
            month: start_of_month(reference),
            invested,
            withdrawn,
            points,
            level,
            level_label: language.level_label(level),
            points_label: language.points_label(points),
            planned_investment: planned,
            planned_vs_actual_percent: ratio_percentage(invested, planned),
            remaining_planned,
            annual_projection: planned * 12.0,
            distribution: distribution(monthly.iter().copied()),
            total_debt_pending: total_debt_pending(debts),
            pie: pie_slices(cards),
            formatted_invested: self.formatter.format(invested),
            formatted_planned: self.formatter.format(planned),
            formatted_remaining_planned: self.formatter.format(remaining_planned),
        }
    }

    /// Flow chart bars using the configured granularity and limit
    pub fn flow_bars(&self, transactions: &[Transaction], start: Option<NaiveDate>, today: NaiveDate) -> Vec<FlowBar> {
        flow_bars(
            transactions,
            start,
            today,
            self.config.chart_granularity,
            self.config.flow_bar_limit,
            self.config.language,
        )
    }

    pub fn started_label(&self, onboarded_at: Option<NaiveDate>, today: NaiveDate) -> String {
        started_label(onboarded_at, today, self.config.language)
    }
}
