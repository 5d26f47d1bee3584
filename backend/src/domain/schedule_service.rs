//! Contribution schedule logic.
//!
//! Computes how many days remain until a card's next contribution and how the
//! cadence reads to the user. Both operations are pure functions of the card
//! and, for the day count, an explicit reference date: the service never reads
//! the clock, so callers pass the instant they are rendering for.
//!
//! ## Rules
//!
//! - Daily cards always contribute tomorrow.
//! - Weekly cards contribute on `contribution_weekday`; when today is that
//!   weekday the next contribution is a full week out.
//! - Monthly cards contribute on `contribution_month_day`, clamped to the last
//!   day of months that are too short. Once this month's date is reached the
//!   next month's (clamped) date is used.
//! - Missing or out-of-range cadence fields yield `None` instead of failing.

use chrono::Datelike;
use log::{debug, warn};
use shared::{Cadence, SavingsCard};
use std::ops::RangeInclusive;

use super::calendar::{clamped_day_in_month, date_of, day_diff, next_month, weekday_from_sunday};
use super::labels::DisplayLanguage;

/// Days until the card's next contribution, counted from `reference`
/// truncated to midnight. `None` when the cadence configuration is unusable.
pub fn days_until_next_contribution<D: Datelike>(card: &SavingsCard, reference: &D) -> Option<u32> {
    let days = match &card.cadence {
        Cadence::Daily => Some(1),
        Cadence::Weekly => days_until_weekday(card, reference),
        Cadence::Monthly => days_until_month_day(card, reference),
        Cadence::Other(label) => {
            debug!("No schedule for card {} with cadence '{}'", card.id, label);
            None
        }
    };

    debug!("Card {} next contribution in {:?} days", card.id, days);
    days
}

fn days_until_weekday<D: Datelike>(card: &SavingsCard, reference: &D) -> Option<u32> {
    let target = match card.contribution_weekday {
        Some(day) if (0..=6).contains(&day) => day,
        other => {
            warn!("Weekly card {} has invalid weekday {:?}", card.id, other);
            return None;
        }
    };

    let today = weekday_from_sunday(reference) as i32;
    let raw = (target - today + 7) % 7;
    // Today's contribution is assumed to be handled already
    Some(if raw == 0 { 7 } else { raw as u32 })
}

fn days_until_month_day<D: Datelike>(card: &SavingsCard, reference: &D) -> Option<u32> {
    let target = match card.contribution_month_day {
        Some(day) if day >= 1 => day as u32,
        other => {
            warn!("Monthly card {} has invalid day of month {:?}", card.id, other);
            return None;
        }
    };

    let today = date_of(reference)?;
    let this_month = clamped_day_in_month(today.year(), today.month(), target)?;
    if today < this_month {
        return Some(day_diff(today, this_month));
    }

    let (year, month) = next_month(today.year(), today.month());
    let following = clamped_day_in_month(year, month, target)?;
    Some(day_diff(today, following))
}

/// Human-readable cadence, in English
pub fn describe_schedule(card: &SavingsCard) -> String {
    describe_schedule_in(card, DisplayLanguage::English)
}

/// Human-readable cadence in the given language. Cards whose cadence cannot be
/// described fall back to the raw cadence label.
pub fn describe_schedule_in(card: &SavingsCard, language: DisplayLanguage) -> String {
    match &card.cadence {
        Cadence::Weekly => {
            if let Some(name) = card.contribution_weekday.and_then(|day| language.weekday_name(day)) {
                return language.every_weekday(name);
            }
        }
        Cadence::Monthly => {
            if let Some(day) = card.contribution_month_day.filter(|day| *day >= 1) {
                return language.every_month_on(day);
            }
        }
        Cadence::Daily => return language.every_day().to_string(),
        Cadence::Other(_) => {}
    }

    language.cadence_label(&card.cadence).to_string()
}

/// Weekday choices for a weekly card, as (value, label) pairs
pub fn weekday_options(language: DisplayLanguage) -> Vec<(i32, &'static str)> {
    language
        .weekday_names()
        .iter()
        .enumerate()
        .map(|(value, label)| (value as i32, *label))
        .collect()
}

/// Day-of-month choices for a monthly card
pub fn month_day_options() -> RangeInclusive<i32> {
    1..=31
}

/// Schedule operations bound to a display language
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleService {
    language: DisplayLanguage,
}

impl ScheduleService {
    pub fn new(language: DisplayLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> DisplayLanguage {
        self.language
    }

    pub fn days_until_next_contribution<D: Datelike>(&self, card: &SavingsCard, reference: &D) -> Option<u32> {
        days_until_next_contribution(card, reference)
    }

    pub fn describe_schedule(&self, card: &SavingsCard) -> String {
        describe_schedule_in(card, self.language)
    }

    pub fn cadence_label<'a>(&self, card: &'a SavingsCard) -> &'a str {
        self.language.cadence_label(&card.cadence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn card(cadence: Cadence, weekday: Option<i32>, month_day: Option<i32>) -> SavingsCard {
        SavingsCard {
            id: "card::test".to_string(),
            name: "Trip".to_string(),
            description: String::new(),
            target_amount: 2800.0,
            saved_amount: 920.0,
            cadence,
            contribution_weekday: weekday,
            contribution_month_day: month_day,
            next_contribution: 120.0,
            color: None,
        }
    }

    #[test]
    fn test_daily_is_always_one_day() {
        let daily = card(Cadence::Daily, None, None);
        for day in 1..=31 {
            assert_eq!(days_until_next_contribution(&daily, &ymd(2024, 1, day)), Some(1));
        }
        assert_eq!(days_until_next_contribution(&daily, &ymd(2023, 2, 28)), Some(1));
    }

    #[test]
    fn test_weekly_for_every_weekday_pair() {
        // 2024-05-19 is a Sunday, so offset i gives weekday i
        for today in 0..7 {
            let reference = ymd(2024, 5, 19 + today as u32);
            for target in 0..7 {
                let weekly = card(Cadence::Weekly, Some(target), None);
                let expected = if target == today {
                    7
                } else {
                    ((target - today + 7) % 7) as u32
                };
                let days = days_until_next_contribution(&weekly, &reference).unwrap();
                assert_eq!(days, expected, "today={} target={}", today, target);
                assert!((1..=7).contains(&days));
            }
        }
    }

    #[test]
    fn test_weekly_same_weekday_is_one_week_out() {
        // 2024-05-15 is a Wednesday
        let wednesday = card(Cadence::Weekly, Some(3), None);
        assert_eq!(days_until_next_contribution(&wednesday, &ymd(2024, 5, 15)), Some(7));
    }

    #[test]
    fn test_weekly_without_valid_weekday_is_unknown() {
        let reference = ymd(2024, 5, 15);
        assert_eq!(days_until_next_contribution(&card(Cadence::Weekly, None, None), &reference), None);
        assert_eq!(days_until_next_contribution(&card(Cadence::Weekly, Some(7), None), &reference), None);
        assert_eq!(days_until_next_contribution(&card(Cadence::Weekly, Some(-1), None), &reference), None);
    }

    #[test]
    fn test_monthly_before_target_this_month() {
        let monthly = card(Cadence::Monthly, None, Some(15));
        assert_eq!(days_until_next_contribution(&monthly, &ymd(2024, 3, 10)), Some(5));
        assert_eq!(days_until_next_contribution(&monthly, &ymd(2024, 3, 14)), Some(1));
    }

    #[test]
    fn test_monthly_after_target_rolls_to_next_month() {
        let monthly = card(Cadence::Monthly, None, Some(15));
        // March 20 -> April 15
        assert_eq!(days_until_next_contribution(&monthly, &ymd(2024, 3, 20)), Some(26));
        // On the day itself the next occurrence is next month
        assert_eq!(days_until_next_contribution(&monthly, &ymd(2024, 3, 15)), Some(31));
        // December rolls into January of the next year
        assert_eq!(days_until_next_contribution(&monthly, &ymd(2023, 12, 20)), Some(26));
    }

    #[test]
    fn test_monthly_clamps_to_short_months() {
        let end_of_month = card(Cadence::Monthly, None, Some(31));
        // Non-leap February: target is the 28th
        assert_eq!(days_until_next_contribution(&end_of_month, &ymd(2023, 2, 10)), Some(18));
        // Leap February: target is the 29th
        assert_eq!(days_until_next_contribution(&end_of_month, &ymd(2024, 2, 10)), Some(19));
        // On Feb 28 (non-leap) the clamped date has been reached, next is March 31
        assert_eq!(days_until_next_contribution(&end_of_month, &ymd(2023, 2, 28)), Some(31));
        // January 31 rolls over to the clamped February 28
        assert_eq!(days_until_next_contribution(&end_of_month, &ymd(2023, 1, 31)), Some(28));
        // April 30 is the clamped date; next is May 31
        assert_eq!(days_until_next_contribution(&end_of_month, &ymd(2023, 4, 30)), Some(31));
    }

    #[test]
    fn test_monthly_without_valid_day_is_unknown() {
        let reference = ymd(2024, 3, 10);
        assert_eq!(days_until_next_contribution(&card(Cadence::Monthly, None, None), &reference), None);
        assert_eq!(days_until_next_contribution(&card(Cadence::Monthly, None, Some(0)), &reference), None);
        assert_eq!(days_until_next_contribution(&card(Cadence::Monthly, None, Some(-3)), &reference), None);
    }

    #[test]
    fn test_unknown_cadence_is_unknown() {
        let other = card(Cadence::Other("Quincenal".to_string()), Some(3), Some(15));
        assert_eq!(days_until_next_contribution(&other, &ymd(2024, 3, 10)), None);
    }

    #[test]
    fn test_reference_time_of_day_is_ignored() {
        let monthly = card(Cadence::Monthly, None, Some(15));
        let late_evening = Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap();
        let early_morning = Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 1).unwrap();
        assert_eq!(days_until_next_contribution(&monthly, &late_evening), Some(1));
        assert_eq!(days_until_next_contribution(&monthly, &early_morning), Some(1));
        assert_eq!(days_until_next_contribution(&monthly, &late_evening.naive_utc()), Some(1));
    }

    #[test]
    fn test_describe_schedule() {
        assert_eq!(describe_schedule(&card(Cadence::Weekly, Some(1), None)), "Every Monday");
        assert_eq!(describe_schedule(&card(Cadence::Weekly, Some(0), None)), "Every Sunday");
        assert_eq!(describe_schedule(&card(Cadence::Monthly, None, Some(26))), "Every month on day 26");
        assert_eq!(describe_schedule(&card(Cadence::Daily, None, None)), "Every day");
    }

    #[test]
    fn test_describe_schedule_falls_back_to_cadence_label() {
        assert_eq!(describe_schedule(&card(Cadence::Weekly, Some(9), None)), "Weekly");
        assert_eq!(describe_schedule(&card(Cadence::Weekly, None, None)), "Weekly");
        assert_eq!(describe_schedule(&card(Cadence::Monthly, None, None)), "Monthly");
        assert_eq!(
            describe_schedule(&card(Cadence::Other("Quincenal".to_string()), None, None)),
            "Quincenal"
        );
    }

    #[test]
    fn test_describe_schedule_in_spanish() {
        let service = ScheduleService::new(DisplayLanguage::Spanish);
        assert_eq!(service.describe_schedule(&card(Cadence::Weekly, Some(5), None)), "Todos los Viernes");
        assert_eq!(service.describe_schedule(&card(Cadence::Monthly, None, Some(26))), "Cada mes el día 26");
        assert_eq!(service.describe_schedule(&card(Cadence::Daily, None, None)), "Todos los días");
        assert_eq!(service.describe_schedule(&card(Cadence::Weekly, None, None)), "Semanal");
    }

    #[test]
    fn test_option_tables() {
        let options = weekday_options(DisplayLanguage::English);
        assert_eq!(options.len(), 7);
        assert_eq!(options[0], (0, "Sunday"));
        assert_eq!(options[6], (6, "Saturday"));

        let days: Vec<i32> = month_day_options().collect();
        assert_eq!(days.len(), 31);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&31));
    }
}
