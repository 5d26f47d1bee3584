use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Recurrence pattern of a scheduled contribution
///
/// Unrecognized labels are kept verbatim in `Other` so that a card created by a
/// newer client still round-trips and renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Other(String),
}

impl Cadence {
    /// Parse a cadence label. Accepts the English and the Spanish labels,
    /// ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "daily" | "diaria" => Cadence::Daily,
            "weekly" | "semanal" => Cadence::Weekly,
            "monthly" | "mensual" => Cadence::Monthly,
            _ => Cadence::Other(label.to_string()),
        }
    }

    /// Canonical label used on the wire
    pub fn label(&self) -> &str {
        match self {
            Cadence::Daily => "Daily",
            Cadence::Weekly => "Weekly",
            Cadence::Monthly => "Monthly",
            Cadence::Other(label) => label,
        }
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence::Monthly
    }
}

impl From<String> for Cadence {
    fn from(label: String) -> Self {
        Cadence::parse(&label)
    }
}

impl From<Cadence> for String {
    fn from(cadence: Cadence) -> Self {
        cadence.label().to_string()
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Currency used for every amount shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    Usd,
    #[default]
    Cop,
}

impl CurrencyCode {
    /// `USD` selects US dollars, anything else falls back to Colombian pesos
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("USD") {
            CurrencyCode::Usd
        } else {
            CurrencyCode::Cop
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Cop => "COP",
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        CurrencyCode::from_code(&code)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_string()
    }
}

/// A savings goal with its contribution schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsCard {
    /// Card ID in format: "card::<uuid>"
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: f64,
    /// May exceed the target; zero for a fresh card
    #[serde(default)]
    pub saved_amount: f64,
    pub cadence: Cadence,
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday. Only meaningful for weekly cards.
    #[serde(default)]
    pub contribution_weekday: Option<i32>,
    /// 1..=31, clamped to the end of shorter months. Only meaningful for monthly cards.
    #[serde(default)]
    pub contribution_month_day: Option<i32>,
    /// Amount added by a single contribution
    pub next_contribution: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl SavingsCard {
    pub fn generate_id() -> String {
        format!("card::{}", Uuid::new_v4())
    }

    pub fn parse_id(id: &str) -> Result<Uuid, IdError> {
        parse_prefixed_id(id, "card")
    }
}

/// A debt being paid off in fixed installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtCard {
    /// Debt ID in format: "debt::<uuid>"
    pub id: String,
    pub name: String,
    pub payment_amount: f64,
    pub periods: u32,
    pub total_to_pay: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub next_contribution: f64,
    pub cadence: Cadence,
    #[serde(default)]
    pub color: Option<String>,
}

impl DebtCard {
    pub fn generate_id() -> String {
        format!("debt::{}", Uuid::new_v4())
    }

    pub fn parse_id(id: &str) -> Result<Uuid, IdError> {
        parse_prefixed_id(id, "debt")
    }
}

/// Which side of the budget a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Savings,
    Debt,
}

impl FlowKind {
    /// Kind assumed for transactions recorded without one
    pub fn infer(delta: f64) -> Self {
        if delta < 0.0 {
            FlowKind::Debt
        } else {
            FlowKind::Savings
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Savings => "savings",
            FlowKind::Debt => "debt",
        }
    }
}

/// A single movement of money logged by a contribution or a debt payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID in format: "transaction::<savings|debt>::<uuid>"
    pub id: String,
    /// Positive adds to savings, negative removes; debt payments are negative
    pub delta: f64,
    #[serde(default)]
    pub kind: Option<FlowKind>,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(delta: f64, kind: FlowKind, date: NaiveDate) -> Self {
        Self {
            id: Self::generate_id(kind),
            delta,
            kind: Some(kind),
            date,
        }
    }

    pub fn generate_id(kind: FlowKind) -> String {
        format!("transaction::{}::{}", kind.as_str(), Uuid::new_v4())
    }

    /// Parse transaction ID to extract its kind and uuid
    pub fn parse_id(id: &str) -> Result<(FlowKind, Uuid), IdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "transaction" {
            return Err(IdError::InvalidFormat);
        }

        let kind = match parts[1] {
            "savings" => FlowKind::Savings,
            "debt" => FlowKind::Debt,
            _ => return Err(IdError::InvalidKind),
        };

        let uuid = Uuid::parse_str(parts[2]).map_err(|_| IdError::InvalidUuid)?;
        Ok((kind, uuid))
    }

    /// Recorded kind, or the one implied by the sign of the delta
    pub fn effective_kind(&self) -> FlowKind {
        self.kind.unwrap_or_else(|| FlowKind::infer(self.delta))
    }
}

/// A completed savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub card_id: String,
    pub name: String,
    pub description: String,
    pub target_amount: f64,
    pub points: u64,
    pub completed_on: NaiveDate,
}

impl HistoryItem {
    pub fn generate_id(card_id: &str) -> String {
        format!("history::{}::{}", card_id, Uuid::new_v4())
    }
}

/// In-memory state held by the UI, handed over for a render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub cards: Vec<SavingsCard>,
    #[serde(default)]
    pub debts: Vec<DebtCard>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    /// Overflow from completed cards that has not been withdrawn yet
    #[serde(default)]
    pub bonus_available: f64,
    /// Date the user finished onboarding, if known
    #[serde(default)]
    pub onboarded_at: Option<NaiveDate>,
}

/// Form input for a new savings card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: f64,
    /// Defaults to zero when not provided
    #[serde(default)]
    pub saved_amount: Option<f64>,
    pub cadence: Cadence,
    #[serde(default)]
    pub contribution_weekday: Option<i32>,
    #[serde(default)]
    pub contribution_month_day: Option<i32>,
    pub next_contribution: f64,
    #[serde(default)]
    pub color: Option<String>,
}

/// Form input for a new debt card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDebtRequest {
    pub name: String,
    pub payment_amount: f64,
    pub periods: u32,
    pub cadence: Cadence,
    #[serde(default)]
    pub color: Option<String>,
}

/// Derived display values for a savings card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub percent: f64,
    pub formatted_saved: String,
    pub formatted_target: String,
    pub formatted_next_contribution: String,
    pub cadence_label: String,
    pub schedule_text: String,
    /// None when the cadence configuration is incomplete
    pub days_until_next_contribution: Option<u32>,
}

/// Derived display values for a debt card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtView {
    pub id: String,
    pub name: String,
    pub cadence_label: String,
    pub remaining: f64,
    pub formatted_total: String,
    pub formatted_payment: String,
    pub formatted_paid: String,
    pub formatted_remaining: String,
}

/// Display values for a completed goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub formatted_target: String,
    pub points_label: String,
    pub completed_on: NaiveDate,
}

/// Split of the month's money movements between savings and debt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub savings: f64,
    pub debt: f64,
    pub total: f64,
    pub savings_percent: f64,
    pub debt_percent: f64,
}

/// Share of a single card in the savings pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub card_id: String,
    pub name: String,
    pub percent: f64,
}

/// Period granularity for the flow chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
}

/// Aggregated savings and debt flow for one chart period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowBar {
    pub id: String,
    pub label: String,
    pub period_start: NaiveDate,
    pub savings: f64,
    pub debt: f64,
}

/// Budget figures for the month containing the reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// First day of the summarized month
    pub month: NaiveDate,
    pub invested: f64,
    pub withdrawn: f64,
    pub points: u64,
    pub level: u64,
    pub level_label: String,
    pub points_label: String,
    pub planned_investment: f64,
    pub planned_vs_actual_percent: f64,
    pub remaining_planned: f64,
    pub annual_projection: f64,
    pub distribution: Distribution,
    pub total_debt_pending: f64,
    pub pie: Vec<PieSlice>,
    pub formatted_invested: String,
    pub formatted_planned: String,
    pub formatted_remaining_planned: String,
}

/// Everything a render pass needs, computed against a single reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub reference_date: NaiveDate,
    pub currency: CurrencyCode,
    pub cards: Vec<CardView>,
    pub debts: Vec<DebtView>,
    /// Completed goals, most recent first
    pub history: Vec<HistoryView>,
    pub bonus_available: f64,
    pub formatted_bonus_available: String,
    /// Invested this month plus the unwithdrawn bonus
    pub formatted_actual_saved: String,
    pub summary: MonthlySummary,
    pub flow_bars: Vec<FlowBar>,
    pub started_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdError {
    InvalidFormat,
    InvalidKind,
    InvalidUuid,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::InvalidFormat => write!(f, "Invalid ID format"),
            IdError::InvalidKind => write!(f, "Invalid kind in ID"),
            IdError::InvalidUuid => write!(f, "Invalid UUID in ID"),
        }
    }
}

impl std::error::Error for IdError {}

fn parse_prefixed_id(id: &str, prefix: &str) -> Result<Uuid, IdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != prefix {
        return Err(IdError::InvalidFormat);
    }

    Uuid::parse_str(parts[1]).map_err(|_| IdError::InvalidUuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_parse_card_id() {
        let id = SavingsCard::generate_id();
        assert!(id.starts_with("card::"));
        assert!(SavingsCard::parse_id(&id).is_ok());

        // Wrong prefix
        assert_eq!(
            SavingsCard::parse_id(&DebtCard::generate_id()),
            Err(IdError::InvalidFormat)
        );
        // Not a uuid
        assert_eq!(SavingsCard::parse_id("card::123"), Err(IdError::InvalidUuid));
        assert_eq!(SavingsCard::parse_id("card"), Err(IdError::InvalidFormat));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(SavingsCard::generate_id(), SavingsCard::generate_id());
        assert_ne!(
            Transaction::generate_id(FlowKind::Savings),
            Transaction::generate_id(FlowKind::Savings)
        );
    }

    #[test]
    fn test_parse_transaction_id() {
        let id = Transaction::generate_id(FlowKind::Debt);
        let (kind, _) = Transaction::parse_id(&id).unwrap();
        assert_eq!(kind, FlowKind::Debt);

        assert_eq!(
            Transaction::parse_id("transaction::income::6f1c3f4e-1d2b-4c55-9a51-1a8f0f7c2b11"),
            Err(IdError::InvalidKind)
        );
        assert_eq!(
            Transaction::parse_id("transaction::savings"),
            Err(IdError::InvalidFormat)
        );
        assert_eq!(
            Transaction::parse_id("transaction::savings::nope"),
            Err(IdError::InvalidUuid)
        );
    }

    #[test]
    fn test_cadence_parse_accepts_both_languages() {
        assert_eq!(Cadence::parse("Daily"), Cadence::Daily);
        assert_eq!(Cadence::parse("Diaria"), Cadence::Daily);
        assert_eq!(Cadence::parse(" semanal "), Cadence::Weekly);
        assert_eq!(Cadence::parse("MONTHLY"), Cadence::Monthly);
        assert_eq!(Cadence::parse("Mensual"), Cadence::Monthly);
        assert_eq!(
            Cadence::parse("Quincenal"),
            Cadence::Other("Quincenal".to_string())
        );
    }

    #[test]
    fn test_cadence_serde_keeps_unknown_labels() {
        let json = serde_json::to_string(&Cadence::Other("Quincenal".to_string())).unwrap();
        assert_eq!(json, "\"Quincenal\"");

        let parsed: Cadence = serde_json::from_str("\"Semanal\"").unwrap();
        assert_eq!(parsed, Cadence::Weekly);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Weekly\"");
    }

    #[test]
    fn test_currency_code_fallback() {
        assert_eq!(CurrencyCode::from_code("USD"), CurrencyCode::Usd);
        assert_eq!(CurrencyCode::from_code("usd"), CurrencyCode::Usd);
        assert_eq!(CurrencyCode::from_code("COP"), CurrencyCode::Cop);
        assert_eq!(CurrencyCode::from_code("EUR"), CurrencyCode::Cop);
        assert_eq!(CurrencyCode::from_code(""), CurrencyCode::Cop);
    }

    #[test]
    fn test_transaction_effective_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut tx = Transaction::new(-20.0, FlowKind::Savings, date);
        assert_eq!(tx.effective_kind(), FlowKind::Savings);

        // Untyped transactions fall back to the sign of the delta
        tx.kind = None;
        assert_eq!(tx.effective_kind(), FlowKind::Debt);
        tx.delta = 5.0;
        assert_eq!(tx.effective_kind(), FlowKind::Savings);
    }

    #[test]
    fn test_savings_card_deserializes_with_defaults() {
        let json = r#"{
            "id": "card::1",
            "name": "Laptop",
            "target_amount": 1800,
            "cadence": "Mensual",
            "contribution_month_day": 26,
            "next_contribution": 150
        }"#;
        let card: SavingsCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.cadence, Cadence::Monthly);
        assert_eq!(card.saved_amount, 0.0);
        assert_eq!(card.contribution_month_day, Some(26));
        assert_eq!(card.contribution_weekday, None);
    }
}
