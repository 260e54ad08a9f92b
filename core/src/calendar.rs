use chrono::{Datelike, Duration, NaiveDate, Weekday};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Monday-first, the order weekday buckets are reported in.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    German,
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "de" | "german" | "deutsch" => Ok(Locale::German),
            _ => Err(anyhow!("Unknown locale: {}", s)),
        }
    }
}

/// The one place a shift's weekday comes from. Enrichment and weekday
/// bucketing both go through here so their labels can never disagree.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    date.weekday()
}

/// Short weekday label, without trailing punctuation.
pub fn weekday_label(weekday: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::English => match weekday {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        },
        Locale::German => match weekday {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Di",
            Weekday::Wed => "Mi",
            Weekday::Thu => "Do",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "So",
        },
    }
}

/// Monday and Sunday of the week containing `reference`. A Sunday belongs to
/// the week that started the Monday before it.
/// Clamped to the representable date range at its ends.
pub fn week_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = Duration::days(reference.weekday().num_days_from_monday() as i64);
    let start = reference.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
    let end = start.checked_add_signed(Duration::days(6)).unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Month before `(year, month)`, 1-indexed.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn parse_offset(input: &str) -> Result<Duration> {
    let input = input.trim();
    let (unit_at, unit) = input
        .char_indices()
        .last()
        .ok_or_else(|| anyhow!("Empty offset"))?;
    let num: i64 = input[..unit_at]
        .parse()
        .map_err(|_| anyhow!("Invalid offset number: {}", input))?;

    let offset = match unit.to_ascii_lowercase() {
        'd' => Duration::try_days(num),
        'w' => Duration::try_weeks(num),
        _ => return Err(anyhow!("Unknown offset unit: {}", unit)),
    };
    offset.ok_or_else(|| anyhow!("Offset out of range: {}", input))
}

/// Resolves a reference date typed by the user, relative to `today`.
///
/// Accepts `today`, `yesterday`, `YYYY-MM-DD` and signed offsets such as
/// `-1w` or `+3d`.
pub fn parse_reference_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => {
            return today.pred_opt().ok_or_else(|| anyhow!("No day before {}", today));
        }
        _ => {}
    }

    if input.starts_with('-') || input.starts_with('+') {
        return today
            .checked_add_signed(parse_offset(input)?)
            .ok_or_else(|| anyhow!("Date out of range: {}", input));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}
