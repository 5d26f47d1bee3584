//! Display text for the two supported locales.
//!
//! Every user-facing string produced by the domain layer goes through
//! [`DisplayLanguage`], so the scheduling and summary logic never compares or
//! builds localized text itself.

use serde::{Deserialize, Serialize};
use shared::Cadence;

const WEEKDAYS_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS_ES: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Language used for labels and descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    English,
    Spanish,
}

impl DisplayLanguage {
    /// Weekday names indexed 0 (Sunday) through 6 (Saturday)
    pub fn weekday_names(&self) -> &'static [&'static str; 7] {
        match self {
            DisplayLanguage::English => &WEEKDAYS_EN,
            DisplayLanguage::Spanish => &WEEKDAYS_ES,
        }
    }

    /// Bounds-checked weekday lookup
    pub fn weekday_name(&self, index: i32) -> Option<&'static str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.weekday_names().get(i))
            .copied()
    }

    /// Abbreviated month name, `month` in 1..=12
    pub fn month_abbreviation(&self, month: u32) -> &'static str {
        let table = match self {
            DisplayLanguage::English => &MONTHS_EN,
            DisplayLanguage::Spanish => &MONTHS_ES,
        };
        let index = month.clamp(1, 12) as usize - 1;
        table[index]
    }

    /// Label shown on a card's cadence tag. Unknown cadences echo their raw label.
    pub fn cadence_label<'a>(&self, cadence: &'a Cadence) -> &'a str {
        match (self, cadence) {
            (_, Cadence::Other(label)) => label.as_str(),
            (DisplayLanguage::English, known) => known.label(),
            (DisplayLanguage::Spanish, Cadence::Daily) => "Diaria",
            (DisplayLanguage::Spanish, Cadence::Weekly) => "Semanal",
            (DisplayLanguage::Spanish, Cadence::Monthly) => "Mensual",
        }
    }

    pub fn every_day(&self) -> &'static str {
        match self {
            DisplayLanguage::English => "Every day",
            DisplayLanguage::Spanish => "Todos los días",
        }
    }

    pub fn every_weekday(&self, weekday_name: &str) -> String {
        match self {
            DisplayLanguage::English => format!("Every {}", weekday_name),
            DisplayLanguage::Spanish => format!("Todos los {}", weekday_name),
        }
    }

    pub fn every_month_on(&self, day: i32) -> String {
        match self {
            DisplayLanguage::English => format!("Every month on day {}", day),
            DisplayLanguage::Spanish => format!("Cada mes el día {}", day),
        }
    }

    pub fn level_label(&self, level: u64) -> String {
        match self {
            DisplayLanguage::English => format!("Level {}", level),
            DisplayLanguage::Spanish => format!("Nivel {}", level),
        }
    }

    /// "pts" reads the same in both languages
    pub fn points_label(&self, points: u64) -> String {
        format!("{} pts", points)
    }

    pub fn debt_payoff_summary(&self, total_to_pay: f64) -> String {
        match self {
            DisplayLanguage::English => format!("To pay off: {:.2}", total_to_pay),
            DisplayLanguage::Spanish => format!("A pagar para cancelar: {:.2}", total_to_pay),
        }
    }

    pub fn no_start_date(&self) -> &'static str {
        match self {
            DisplayLanguage::English => "No start date recorded yet.",
            DisplayLanguage::Spanish => "Aún no hay fecha registrada.",
        }
    }

    pub fn started_today(&self) -> &'static str {
        match self {
            DisplayLanguage::English => "Started today.",
            DisplayLanguage::Spanish => "Empezaste hoy.",
        }
    }

    pub fn started_days_ago(&self, days: i64) -> String {
        let plural = days != 1;
        match self {
            DisplayLanguage::English => {
                format!("Started {} day{} ago.", days, if plural { "s" } else { "" })
            }
            DisplayLanguage::Spanish => {
                format!("Empezaste hace {} día{}.", days, if plural { "s" } else { "" })
            }
        }
    }

    pub fn started_months_ago(&self, months: i64) -> String {
        let plural = months != 1;
        match self {
            DisplayLanguage::English => format!(
                "Started about {} month{} ago.",
                months,
                if plural { "s" } else { "" }
            ),
            DisplayLanguage::Spanish => format!(
                "Empezaste hace {} mes{} aprox.",
                months,
                if plural { "es" } else { "" }
            ),
        }
    }
}
