use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Rendered when a date string cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Formats accepted for naive (offset-less) timestamps
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    Numeric,
    TwoDigit,
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    Numeric,
    TwoDigit,
}

/// Which date fields to render and how. `None` omits the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub month: Option<MonthStyle>,
    pub day: Option<NumberStyle>,
    pub year: Option<NumberStyle>,
}

impl Default for DateFormat {
    /// `Jan 5, 2024`
    fn default() -> Self {
        Self {
            month: Some(MonthStyle::Short),
            day: Some(NumberStyle::Numeric),
            year: Some(NumberStyle::Numeric),
        }
    }
}

impl DateFormat {
    pub fn month(mut self, style: Option<MonthStyle>) -> Self {
        self.month = style;
        self
    }

    pub fn day(mut self, style: Option<NumberStyle>) -> Self {
        self.day = style;
        self
    }

    pub fn year(mut self, style: Option<NumberStyle>) -> Self {
        self.year = style;
        self
    }

    fn render(&self, date: NaiveDate) -> String {
        // With every field omitted the locale default (numeric m/d/y) applies
        let fmt = if self.month.is_none() && self.day.is_none() && self.year.is_none() {
            DateFormat {
                month: Some(MonthStyle::Numeric),
                day: Some(NumberStyle::Numeric),
                year: Some(NumberStyle::Numeric),
            }
        } else {
            *self
        };

        let day = fmt.day.map(|style| number(date.day() as i32, style));
        let year = fmt.year.map(|style| year_text(date.year(), style));
        let month_name = MONTH_NAMES[date.month0() as usize];

        match fmt.month {
            Some(MonthStyle::Short) | Some(MonthStyle::Long) => {
                let mut out = if fmt.month == Some(MonthStyle::Short) {
                    month_name.chars().take(3).collect::<String>()
                } else {
                    month_name.to_string()
                };
                if let Some(ref day) = day {
                    out.push(' ');
                    out.push_str(day);
                }
                if let Some(ref year) = year {
                    out.push_str(if day.is_some() { ", " } else { " " });
                    out.push_str(year);
                }
                out
            }
            numeric => {
                let month = numeric.map(|style| match style {
                    MonthStyle::TwoDigit => format!("{:02}", date.month()),
                    _ => date.month().to_string(),
                });
                [month, day, year].into_iter().flatten().collect::<Vec<_>>().join("/")
            }
        }
    }
}

fn number(value: i32, style: NumberStyle) -> String {
    match style {
        NumberStyle::Numeric => value.to_string(),
        NumberStyle::TwoDigit => format!("{:02}", value),
    }
}

fn year_text(year: i32, style: NumberStyle) -> String {
    match style {
        NumberStyle::Numeric => year.to_string(),
        NumberStyle::TwoDigit => format!("{:02}", year.rem_euclid(100)),
    }
}

/// Parse an ISO-8601 date or timestamp. Timestamps with an offset keep the
/// calendar date of that offset.
fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Format an ISO date string in US English, e.g. `Jan 5, 2024`.
///
/// Empty input renders as an empty string; unparsable input, including
/// whitespace-only input, as [`INVALID_DATE`].
pub fn format_date(date: &str, format: &DateFormat) -> String {
    if date.is_empty() {
        return String::new();
    }
    match parse_date(date.trim()) {
        Some(parsed) => format.render(parsed),
        None => INVALID_DATE.to_string(),
    }
}

/// Escape text the way a DOM text node serializes: `&`, `<`, `>` and
/// non-breaking spaces become entities, quotes are left alone.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
