use crate::model::{parse_weekday, Weekday};

/// A slot's day-applicability rule, as read from its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySpec {
    /// `Sunday-Saturday`.
    Every,
    /// `Monday-Friday`, or wrapping past Saturday as in `Friday-Monday`.
    Range(Weekday, Weekday),
    /// No dash: matches any day whose name appears in the text.
    Named(String),
    /// A dash with an unrecognized day on either side, or more than one dash
    /// (`Monday-Wednesday-Friday` is not read as a range). Never matches.
    Unknown,
}

impl DaySpec {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.contains("Sunday-Saturday") || input.contains("Sunday\u{2013}Saturday") {
            return Self::Every;
        }
        if !input.contains(['-', '\u{2013}']) {
            return Self::Named(input.to_string());
        }

        let mut parts = input.split(['-', '\u{2013}']);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(last), None) => match (parse_weekday(first), parse_weekday(last)) {
                (Some(first), Some(last)) => Self::Range(first, last),
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            Self::Every => true,
            Self::Range(first, last) => {
                let (first, last, day) = (first.index(), last.index(), day.index());
                if first <= last {
                    first <= day && day <= last
                } else {
                    day >= first || day <= last
                }
            }
            Self::Named(text) => text
                .to_lowercase()
                .contains(&day.name().to_lowercase()),
            Self::Unknown => false,
        }
    }
}

/// Whether a day-applicability string covers `day`.
pub fn day_matches(spec: &str, day: Weekday) -> bool {
    DaySpec::parse(spec).matches(day)
}
