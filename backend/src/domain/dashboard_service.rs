//! Assembles everything a render pass needs from a [`Snapshot`].
//!
//! The dashboard is computed against a single reference date so that every
//! card countdown, the monthly summary and the flow chart agree on "today".

use chrono::NaiveDate;
use log::info;
use shared::{CardView, Dashboard, DebtCard, DebtView, HistoryItem, HistoryView, SavingsCard, Snapshot};

use super::debt_service;
use super::formatting::{completion_percentage, CurrencyFormatter};
use super::schedule_service::ScheduleService;
use super::summary_service::SummaryService;
use crate::config::PlannerConfig;

#[derive(Debug, Clone)]
pub struct DashboardService {
    schedule: ScheduleService,
    summary: SummaryService,
    formatter: CurrencyFormatter,
}

impl DashboardService {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            schedule: ScheduleService::new(config.language),
            formatter: CurrencyFormatter::new(config.currency),
            summary: SummaryService::new(config),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        self.summary.config()
    }

    pub fn card_view(&self, card: &SavingsCard, reference: NaiveDate) -> CardView {
        CardView {
            id: card.id.clone(),
            name: card.name.clone(),
            description: card.description.clone(),
            percent: completion_percentage(card.saved_amount, card.target_amount),
            formatted_saved: self.formatter.format(card.saved_amount),
            formatted_target: self.formatter.format(card.target_amount),
            formatted_next_contribution: self.formatter.format_signed(card.next_contribution),
            cadence_label: self.schedule.cadence_label(card).to_string(),
            schedule_text: self.schedule.describe_schedule(card),
            days_until_next_contribution: self.schedule.days_until_next_contribution(card, &reference),
        }
    }

    pub fn debt_view(&self, debt: &DebtCard) -> DebtView {
        let remaining = debt_service::remaining(debt);
        DebtView {
            id: debt.id.clone(),
            name: debt.name.clone(),
            cadence_label: self.schedule.language().cadence_label(&debt.cadence).to_string(),
            remaining,
            formatted_total: self.formatter.format(debt.total_to_pay),
            formatted_payment: self.formatter.format(debt.payment_amount),
            formatted_paid: self.formatter.format(debt.paid_amount),
            formatted_remaining: self.formatter.format(remaining),
        }
    }

    pub fn history_view(&self, item: &HistoryItem) -> HistoryView {
        HistoryView {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            formatted_target: self.formatter.format(item.target_amount),
            points_label: self.schedule.language().points_label(item.points),
            completed_on: item.completed_on,
        }
    }

    /// Build the full dashboard for `reference`
    pub fn build(&self, snapshot: &Snapshot, reference: NaiveDate) -> Dashboard {
        info!(
            "Building dashboard for {} with {} cards, {} debts and {} transactions",
            reference,
            snapshot.cards.len(),
            snapshot.debts.len(),
            snapshot.transactions.len()
        );

        let summary = self.summary.monthly_summary(
            &snapshot.cards,
            &snapshot.debts,
            &snapshot.transactions,
            reference,
        );

        let mut history: Vec<&HistoryItem> = snapshot.history.iter().collect();
        history.sort_by(|a, b| b.completed_on.cmp(&a.completed_on));

        let bonus_available = snapshot.bonus_available.max(0.0);

        Dashboard {
            reference_date: reference,
            currency: self.formatter.currency(),
            cards: snapshot
                .cards
                .iter()
                .map(|card| self.card_view(card, reference))
                .collect(),
            debts: snapshot.debts.iter().map(|debt| self.debt_view(debt)).collect(),
            history: history.into_iter().map(|item| self.history_view(item)).collect(),
            bonus_available,
            formatted_bonus_available: self.formatter.format(bonus_available),
            formatted_actual_saved: self.formatter.format(summary.invested + bonus_available),
            summary,
            flow_bars: self
                .summary
                .flow_bars(&snapshot.transactions, snapshot.onboarded_at, reference),
            started_label: self.summary.started_label(snapshot.onboarded_at, reference),
        }
    }
}
