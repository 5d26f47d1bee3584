//! Debt plans and installment payments.
//!
//! A debt is planned as a fixed installment repeated for a number of periods.
//! Payments move `paid_amount` towards `total_to_pay` and are logged as debt
//! transactions: paying produces a negative delta, undoing a payment a
//! positive one.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use shared::{Cadence, CreateDebtRequest, DebtCard, FlowKind, Transaction};

use super::labels::DisplayLanguage;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DebtValidationError {
    #[error("Debt name cannot be empty")]
    EmptyName,
    #[error("Payment amount must be a positive number")]
    NonPositivePayment,
    #[error("Number of periods must be positive")]
    NonPositivePeriods,
}

/// Total cost of paying a fixed installment over a number of periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPlan {
    pub payment_amount: f64,
    pub periods: u32,
    pub cadence: Cadence,
    pub total_to_pay: f64,
    pub summary: String,
}

pub fn plan_debt(
    payment_amount: f64,
    periods: u32,
    cadence: Cadence,
    language: DisplayLanguage,
) -> Result<DebtPlan, DebtValidationError> {
    if !payment_amount.is_finite() || payment_amount <= 0.0 {
        return Err(DebtValidationError::NonPositivePayment);
    }
    if periods == 0 {
        return Err(DebtValidationError::NonPositivePeriods);
    }

    let total_to_pay = payment_amount * f64::from(periods);
    Ok(DebtPlan {
        payment_amount,
        periods,
        cadence,
        total_to_pay,
        summary: language.debt_payoff_summary(total_to_pay),
    })
}

/// Validate a creation request and build the debt card
pub fn create_debt(request: CreateDebtRequest) -> Result<DebtCard, DebtValidationError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(DebtValidationError::EmptyName);
    }

    let plan = plan_debt(
        request.payment_amount,
        request.periods,
        request.cadence,
        DisplayLanguage::default(),
    )?;

    let debt = DebtCard {
        id: DebtCard::generate_id(),
        name: name.to_string(),
        payment_amount: plan.payment_amount,
        periods: plan.periods,
        total_to_pay: plan.total_to_pay,
        paid_amount: 0.0,
        next_contribution: plan.payment_amount,
        cadence: plan.cadence,
        color: request.color,
    };

    info!("Created debt {} ({}) totalling {:.2}", debt.id, debt.name, debt.total_to_pay);
    Ok(debt)
}

/// Amount still owed, never negative
pub fn remaining(debt: &DebtCard) -> f64 {
    (debt.total_to_pay - debt.paid_amount).max(0.0)
}

/// Pay one installment, capped at the total. `None` when the debt is already paid off.
pub fn add_payment(debt: &DebtCard, date: NaiveDate) -> Option<(DebtCard, Transaction)> {
    let next_paid = (debt.paid_amount + debt.next_contribution).min(debt.total_to_pay);
    let delta = next_paid - debt.paid_amount;
    if delta.is_nan() || delta <= 0.0 {
        return None;
    }

    info!("Paid {:.2} on debt {}, {:.2} of {:.2}", delta, debt.id, next_paid, debt.total_to_pay);

    let updated = DebtCard {
        paid_amount: next_paid,
        ..debt.clone()
    };
    Some((updated, Transaction::new(-delta, FlowKind::Debt, date)))
}

/// Undo one installment, limited to what has been paid
pub fn remove_payment(debt: &DebtCard, date: NaiveDate) -> Option<(DebtCard, Transaction)> {
    let removable = debt.next_contribution.min(debt.paid_amount);
    if removable.is_nan() || removable <= 0.0 {
        return None;
    }

    info!("Reverted {:.2} on debt {}", removable, debt.id);

    let updated = DebtCard {
        paid_amount: debt.paid_amount - removable,
        ..debt.clone()
    };
    Some((updated, Transaction::new(removable, FlowKind::Debt, date)))
}
