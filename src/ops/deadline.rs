use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar distance between two dates, split into years, months and days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    /// Period from `start` to `end`. Days borrow from months when the day of
    /// month goes backwards, so `Jan 31 -> Mar 1` is one month and one day.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Period {
        let mut total_months = month_index(end) - month_index(start);
        let mut days = end.day() as i64 - start.day() as i64;
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let anchor = add_months(start, total_months);
            days = (end - anchor).num_days();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= days_in_month(end) as i64;
        }
        Period {
            years: (total_months / 12) as i32,
            months: (total_months % 12) as i32,
            days: days as i32,
        }
    }
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    // clamps to the end of shorter months
    date.checked_add_months(Months::new(months as u32))
        .unwrap_or(date)
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

/// Short human label for a deadline relative to `today`:
/// `Today`, `Tomorrow`, `Yesterday`, `Mar 23, 2024` (a year or more away),
/// `Mar 23` (a month or more away), `Tue` (within the coming week) or
/// `3/23/24` otherwise. Empty when there is no deadline.
pub fn format_deadline_relative(deadline: Option<NaiveDateTime>, today: NaiveDate) -> String {
    let Some(deadline) = deadline else {
        return String::new();
    };
    let date = deadline.date();
    let period = Period::between(today, date);

    if date == today {
        "Today".to_string()
    } else if Some(date) == today.checked_add_signed(Duration::days(1)) {
        "Tomorrow".to_string()
    } else if Some(date) == today.checked_sub_signed(Duration::days(1)) {
        "Yesterday".to_string()
    } else if period.years != 0 {
        date.format("%b %-d, %Y").to_string()
    } else if period.months != 0 {
        date.format("%b %-d").to_string()
    } else if period.days > 0 && period.days < 7 {
        date.format("%a").to_string()
    } else {
        date.format("%-m/%-d/%y").to_string()
    }
}

/// Relative label plus time of day, e.g. `Tomorrow at 14:00`
pub fn format_deadline_display(deadline: Option<NaiveDateTime>, today: NaiveDate) -> String {
    match deadline {
        Some(dt) => format!(
            "{} at {}",
            format_deadline_relative(Some(dt), today),
            dt.format("%H:%M")
        ),
        None => String::new(),
    }
}

/// Result of reading a deadline from free-form date/time fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineInput {
    /// Both fields empty, or a time without a date
    NoDeadline,
    Valid(NaiveDateTime),
    /// Text that is not a date (`YYYY-MM-DD`) or time (`HH:MM`)
    Invalid,
}

impl DeadlineInput {
    pub fn is_invalid(self) -> bool {
        self == DeadlineInput::Invalid
    }

    pub fn deadline(self) -> Option<NaiveDateTime> {
        match self {
            DeadlineInput::Valid(dt) => Some(dt),
            _ => None,
        }
    }
}

/// Combine a date field and an optional time field into a deadline.
/// A missing time means midnight.
pub fn parse_deadline(date: &str, time: &str) -> DeadlineInput {
    let date = date.trim();
    let time = time.trim();
    if date.is_empty() {
        return DeadlineInput::NoDeadline;
    }
    let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return DeadlineInput::Invalid;
    };
    let time = if time.is_empty() {
        NaiveTime::MIN
    } else {
        match NaiveTime::parse_from_str(time, "%H:%M") {
            Ok(t) => t,
            Err(_) => return DeadlineInput::Invalid,
        }
    };
    DeadlineInput::Valid(date.and_time(time))
}

/// Parse a single `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM` string
pub fn parse_deadline_str(s: &str) -> DeadlineInput {
    let s = s.trim();
    match s.split_once(['T', ' ']) {
        Some((date, time)) => parse_deadline(date, time),
        None => parse_deadline(s, ""),
    }
}
