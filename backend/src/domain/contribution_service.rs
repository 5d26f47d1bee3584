//! Savings card lifecycle: creation, contributions and withdrawals.
//!
//! Every operation takes the current card by reference and returns the new
//! value together with the transaction the UI should log. Nothing is mutated
//! in place, so the caller decides when to commit the result.
//!
//! ## Business Rules
//!
//! - Cards need a name, a positive target and a positive contribution amount
//! - Weekly cards need a weekday in 0..=6, monthly cards a day in 1..=31
//! - A contribution that reaches the target completes the card: it leaves the
//!   active list, lands in the history and the excess becomes a bonus
//! - Removing a contribution never takes the saved amount below zero
//! - Bonuses accumulate until the user withdraws the whole balance at once

use chrono::NaiveDate;
use log::info;
use shared::{Cadence, CreateCardRequest, FlowKind, HistoryItem, SavingsCard, Transaction};

/// Points awarded per unit of target amount when a card is completed
const COMPLETION_POINTS_DIVISOR: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CardValidationError {
    #[error("Card name cannot be empty")]
    EmptyName,
    #[error("Amounts must be finite numbers")]
    NonFiniteAmount,
    #[error("Target amount must be positive")]
    NonPositiveTargetAmount,
    #[error("Contribution amount must be positive")]
    NonPositiveContribution,
    #[error("Saved amount cannot be negative")]
    NegativeSavedAmount,
    #[error("Weekly cards need a weekday between 0 (Sunday) and 6 (Saturday), got {0:?}")]
    InvalidWeekday(Option<i32>),
    #[error("Monthly cards need a day of month between 1 and 31, got {0:?}")]
    InvalidMonthDay(Option<i32>),
}

/// Result of adding a contribution to a card
#[derive(Debug, Clone, PartialEq)]
pub enum ContributionOutcome {
    /// The card is still below its target
    Progressed {
        card: SavingsCard,
        transaction: Transaction,
    },
    /// The target was reached; the card moves to the history
    Completed {
        history: HistoryItem,
        /// Amount saved beyond the target
        bonus: f64,
        transaction: Transaction,
    },
}

impl ContributionOutcome {
    pub fn transaction(&self) -> &Transaction {
        match self {
            ContributionOutcome::Progressed { transaction, .. } => transaction,
            ContributionOutcome::Completed { transaction, .. } => transaction,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ContributionOutcome::Completed { .. })
    }

    /// Overflow produced by this contribution, zero unless the card completed
    pub fn bonus(&self) -> f64 {
        match self {
            ContributionOutcome::Progressed { .. } => 0.0,
            ContributionOutcome::Completed { bonus, .. } => *bonus,
        }
    }
}

/// Validate a creation request and build the card
pub fn create_card(request: CreateCardRequest) -> Result<SavingsCard, CardValidationError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(CardValidationError::EmptyName);
    }

    let saved_amount = request.saved_amount.unwrap_or(0.0);
    if ![request.target_amount, request.next_contribution, saved_amount]
        .iter()
        .all(|amount| amount.is_finite())
    {
        return Err(CardValidationError::NonFiniteAmount);
    }
    if request.target_amount <= 0.0 {
        return Err(CardValidationError::NonPositiveTargetAmount);
    }
    if request.next_contribution <= 0.0 {
        return Err(CardValidationError::NonPositiveContribution);
    }
    if saved_amount < 0.0 {
        return Err(CardValidationError::NegativeSavedAmount);
    }

    // Only the field matching the cadence is kept
    let (contribution_weekday, contribution_month_day) = match request.cadence {
        Cadence::Weekly => match request.contribution_weekday {
            Some(day) if (0..=6).contains(&day) => (Some(day), None),
            other => return Err(CardValidationError::InvalidWeekday(other)),
        },
        Cadence::Monthly => match request.contribution_month_day {
            Some(day) if (1..=31).contains(&day) => (None, Some(day)),
            other => return Err(CardValidationError::InvalidMonthDay(other)),
        },
        Cadence::Daily | Cadence::Other(_) => (None, None),
    };

    let card = SavingsCard {
        id: SavingsCard::generate_id(),
        name: name.to_string(),
        description: request.description.trim().to_string(),
        target_amount: request.target_amount,
        saved_amount,
        cadence: request.cadence,
        contribution_weekday,
        contribution_month_day,
        next_contribution: request.next_contribution,
        color: request.color,
    };

    info!("Created savings card {} ({})", card.id, card.name);
    Ok(card)
}

/// Add one contribution of `next_contribution` to the card
pub fn add_contribution(card: &SavingsCard, date: NaiveDate) -> ContributionOutcome {
    let updated_amount = card.saved_amount + card.next_contribution;
    let transaction = Transaction::new(card.next_contribution, FlowKind::Savings, date);

    if updated_amount >= card.target_amount {
        let bonus = updated_amount - card.target_amount;
        let points = (card.target_amount / COMPLETION_POINTS_DIVISOR).round().max(0.0) as u64;
        info!(
            "Card {} completed with {:.2} saved against {:.2}, bonus {:.2}, {} points",
            card.id, updated_amount, card.target_amount, bonus, points
        );

        return ContributionOutcome::Completed {
            history: HistoryItem {
                id: HistoryItem::generate_id(&card.id),
                card_id: card.id.clone(),
                name: card.name.clone(),
                description: card.description.clone(),
                target_amount: card.target_amount,
                points,
                completed_on: date,
            },
            bonus,
            transaction,
        };
    }

    info!(
        "Added {:.2} to card {}, saved {:.2} of {:.2}",
        card.next_contribution, card.id, updated_amount, card.target_amount
    );

    ContributionOutcome::Progressed {
        card: SavingsCard {
            saved_amount: updated_amount,
            ..card.clone()
        },
        transaction,
    }
}

/// Take back one contribution, limited to what has been saved.
/// `None` when there is nothing to remove.
pub fn remove_contribution(card: &SavingsCard, date: NaiveDate) -> Option<(SavingsCard, Transaction)> {
    let removable = card.next_contribution.min(card.saved_amount);
    if removable.is_nan() || removable <= 0.0 {
        return None;
    }

    info!("Removed {:.2} from card {}", removable, card.id);

    let updated = SavingsCard {
        saved_amount: card.saved_amount - removable,
        ..card.clone()
    };
    Some((updated, Transaction::new(-removable, FlowKind::Savings, date)))
}

/// Bonus balance after applying a contribution outcome
pub fn accrue_bonus(available: f64, outcome: &ContributionOutcome) -> f64 {
    available + outcome.bonus()
}

/// Withdraw the whole bonus balance. The transaction leaves the savings side,
/// and the caller resets the balance to zero. `None` when there is nothing to withdraw.
pub fn withdraw_bonus(available: f64, date: NaiveDate) -> Option<Transaction> {
    if !available.is_finite() || available <= 0.0 {
        return None;
    }

    info!("Withdrew bonus of {:.2}", available);
    Some(Transaction::new(-available, FlowKind::Savings, date))
}

/// Change the per-period contribution amount
pub fn update_contribution(card: &SavingsCard, amount: f64) -> Result<SavingsCard, CardValidationError> {
    if !amount.is_finite() {
        return Err(CardValidationError::NonFiniteAmount);
    }
    if amount <= 0.0 {
        return Err(CardValidationError::NonPositiveContribution);
    }

    info!("Card {} contribution changed from {:.2} to {:.2}", card.id, card.next_contribution, amount);

    Ok(SavingsCard {
        next_contribution: amount,
        ..card.clone()
    })
}
