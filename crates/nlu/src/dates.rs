//! Date phrase resolution
//!
//! Turns free-text date mentions into a calendar date relative to a
//! supplied "today". Resolution is a cascade of progressively looser
//! strategies; the first one that produces a date wins:
//!
//! 1. Explicit numeric formats (ISO, `DD/MM/YYYY`, `DD-MM-YYYY`)
//! 2. Day + month-name forms ("15th january", "january 15", "3 of march")
//! 3. Typo normalisation ("tommrow", "nxt week") followed by a re-parse
//! 4. Relative keywords ("today", "next week", "weekend")
//! 5. Short utterances matched directly against known variants

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap());

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\b",
    )
    .unwrap()
});

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(\d{1,2})(?:st|nd|rd|th)?\b",
    )
    .unwrap()
});

static RELATIVE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(day after tomorrow|tomorrow|today|next day|next week|next month|weekend)\b")
        .unwrap()
});

/// Common misspellings, substituted before a re-parse. Checked in
/// order; several entries are prefixes of later ones, so a variant only
/// fires on an exact or space-delimited occurrence.
static TYPO_VARIANTS: &[(&str, &str)] = &[
    ("tommrow", "tomorrow"),
    ("tommorow", "tomorrow"),
    ("tomorro", "tomorrow"),
    ("tomorrw", "tomorrow"),
    ("tomorow", "tomorrow"),
    ("tmrw", "tomorrow"),
    ("tmw", "tomorrow"),
    ("2moro", "tomorrow"),
    ("2morrow", "tomorrow"),
    ("2mrw", "tomorrow"),
    ("tomorroow", "tomorrow"),
    ("tomoroo", "tomorrow"),
    ("tomoro", "tomorrow"),
    ("tommorrow", "tomorrow"),
    ("nextwek", "next week"),
    ("nxtweek", "next week"),
    ("nextweek", "next week"),
    ("nextmonth", "next month"),
    ("next mnth", "next month"),
    ("nxt month", "next month"),
    ("nxtmonth", "next month"),
];

fn month_number(prefix: &str) -> Option<u32> {
    match prefix {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn parse_explicit(lower: &str) -> Option<NaiveDate> {
    if let Some(caps) = ISO_DATE.captures(lower) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if let Some(caps) = SLASH_DATE.captures(lower) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    None
}

/// Month-name forms assume the current year, even when the date has
/// already passed.
fn parse_day_month(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (day, month) = if let Some(caps) = DAY_MONTH.captures(lower) {
        (caps[1].parse::<u32>().ok()?, month_number(&caps[2])?)
    } else if let Some(caps) = MONTH_DAY.captures(lower) {
        (caps[2].parse::<u32>().ok()?, month_number(&caps[1])?)
    } else {
        return None;
    };
    NaiveDate::from_ymd_opt(today.year(), month, day)
}

fn parse_relative(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = RELATIVE_KEYWORDS.captures(lower)?;
    match &caps[1] {
        "today" => Some(today),
        "tomorrow" | "next day" => Some(today + Duration::days(1)),
        "day after tomorrow" => Some(today + Duration::days(2)),
        "next week" => Some(today + Duration::days(7)),
        "next month" => Some(today + Duration::days(30)),
        "weekend" => {
            // Days until the coming Saturday; 0 on a Saturday itself.
            let ahead = (6 - today.weekday().num_days_from_sunday() as i64).rem_euclid(7);
            Some(today + Duration::days(ahead))
        }
        _ => None,
    }
}

fn substitute_typos(lower: &str) -> Option<String> {
    let mut corrected = lower.to_string();
    let mut changed = false;
    for (variant, canonical) in TYPO_VARIANTS {
        let hit = corrected == *variant
            || corrected.contains(&format!(" {variant}"))
            || corrected.contains(&format!("{variant} "));
        if hit {
            corrected = corrected.replacen(variant, canonical, 1);
            changed = true;
        }
    }
    changed.then_some(corrected)
}

/// Resolve a date mention anywhere in `utterance` relative to `today`.
///
/// Returns `None` when no strategy in the cascade produces a valid date.
pub fn resolve_date(utterance: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = utterance.trim().to_lowercase();

    if let Some(date) = parse_explicit(&lower) {
        tracing::debug!(%date, "Resolved explicit date");
        return Some(date);
    }

    if let Some(date) = parse_day_month(&lower, today) {
        tracing::debug!(%date, "Resolved day-of-month date");
        return Some(date);
    }

    if let Some(corrected) = substitute_typos(&lower) {
        if let Some(date) = parse_explicit(&corrected)
            .or_else(|| parse_day_month(&corrected, today))
            .or_else(|| parse_relative(&corrected, today))
        {
            tracing::debug!(%date, "Resolved date after typo correction");
            return Some(date);
        }
    }

    if let Some(date) = parse_relative(&lower, today) {
        tracing::debug!(%date, "Resolved relative date");
        return Some(date);
    }

    // Short fragments ("tmrw") with nothing else in them: try every
    // known variant directly.
    if lower.len() < 15 {
        for (variant, canonical) in TYPO_VARIANTS {
            if lower == *variant {
                return parse_relative(canonical, today);
            }
        }
    }

    None
}
