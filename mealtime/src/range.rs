use crate::clock::{ClockTime, Meridiem};
use crate::error::{ScheduleError, Span};
use crate::model::{TimeRange, MINUTES_PER_DAY};

/// Longest span the noon-crossing correction will produce.
const MAX_CORRECTED_SPAN: u16 = 12 * 60;

/// Parse a range such as `7-11AM` or `11:30–2 PM`, or `None` when it cannot be read.
pub fn parse_time_range(input: &str) -> Option<TimeRange> {
    TimeRange::parse(input).ok()
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '\u{2013}'
}

impl TimeRange {
    /// Parse a time range, reporting where it went wrong.
    ///
    /// The end carries the marker for both sides unless the start has its
    /// own; a missing marker means AM. When the shared marker puts the start
    /// at or after the end (`11:30-2 PM`), the start is read in the other
    /// half of the day if that yields a span of at most twelve hours. An end
    /// of exactly midnight closes at the end of the day, so a bare start
    /// before it is read as evening (`9-12 AM` runs 9 PM to midnight).
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        let separators: Vec<(usize, char)> =
            input.char_indices().filter(|(_, c)| is_separator(*c)).collect();
        let (sep, sep_char) = match separators.as_slice() {
            [one] => *one,
            [] => {
                return Err(ScheduleError::range(
                    "expected '-' between start and end",
                    Span::new(0, input.len()),
                    input,
                ))
            }
            [_, (extra, c), ..] => {
                return Err(ScheduleError::range(
                    "expected a single '-' between start and end",
                    Span::new(*extra, extra + c.len_utf8()),
                    input,
                ))
            }
        };
        let end_offset = sep + sep_char.len_utf8();

        let start_clock = ClockTime::parse(&input[..sep]).map_err(|e| e.within(0, input))?;
        let end_clock =
            ClockTime::parse(&input[end_offset..]).map_err(|e| e.within(end_offset, input))?;

        let shared = end_clock.meridiem.unwrap_or(Meridiem::Am);
        let end = match end_clock.minutes(shared) {
            0 => MINUTES_PER_DAY,
            m => m,
        };
        let mut start = start_clock.minutes(shared);

        // A borrowed marker that leaves the start after the end, or more than
        // twelve hours before it ("9-12 AM"), is read in the other half of the day.
        if start_clock.meridiem.is_none() && (start >= end || end - start > MAX_CORRECTED_SPAN) {
            let flipped = start_clock.minutes(shared.opposite());
            if flipped < end && end - flipped <= MAX_CORRECTED_SPAN {
                start = flipped;
            }
        }

        TimeRange::new(start, end).ok_or_else(|| {
            ScheduleError::range(
                "range ends before it starts",
                Span::new(0, input.len()),
                input,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u16, end: u16) -> Option<TimeRange> {
        TimeRange::new(start, end)
    }

    #[test]
    fn test_shared_suffix_am() {
        assert_eq!(parse_time_range("7-11AM"), range(420, 660));
        assert_eq!(parse_time_range("7:30-10:30 am"), range(450, 630));
    }

    #[test]
    fn test_shared_suffix_pm() {
        assert_eq!(parse_time_range("5-8 PM"), range(1020, 1200));
        assert_eq!(parse_time_range("5:30-8:30PM"), range(1050, 1230));
    }

    #[test]
    fn test_noon_crossing_correction() {
        assert_eq!(parse_time_range("11:30-2 PM"), range(690, 840));
        assert_eq!(parse_time_range("10-2 PM"), range(600, 840));
        assert_eq!(parse_time_range("11-12 PM"), range(660, 720));
    }

    #[test]
    fn test_no_marker_means_am() {
        assert_eq!(parse_time_range("7-9"), range(420, 540));
    }

    #[test]
    fn test_en_dash() {
        assert_eq!(parse_time_range("7\u{2013}11AM"), range(420, 660));
        assert_eq!(parse_time_range("11:30 \u{2013} 2 PM"), range(690, 840));
    }

    #[test]
    fn test_explicit_start_marker() {
        assert_eq!(parse_time_range("7 AM-2 PM"), range(420, 840));
        assert_eq!(parse_time_range("7:00am - 11:00am"), range(420, 660));
        // An explicit start is never flipped.
        assert_eq!(parse_time_range("3 PM-2 PM"), None);
    }

    #[test]
    fn test_midnight_close() {
        assert_eq!(parse_time_range("8 PM-12 AM"), range(1200, 1440));
        assert_eq!(parse_time_range("7 AM-12 AM"), range(420, 1440));
    }

    #[test]
    fn test_midnight_close_keeps_twelve_hour_bound() {
        assert_eq!(parse_time_range("9-12 AM"), range(1260, 1440));
        assert_eq!(parse_time_range("11-12 AM"), range(1380, 1440));
        assert_eq!(parse_time_range("10:30-12 AM"), range(1350, 1440));
        assert_eq!(parse_time_range("12-12 AM"), range(720, 1440));
    }

    #[test]
    fn test_overnight_is_rejected() {
        // 9 PM to 1 AM would need a span across midnight.
        assert_eq!(parse_time_range("9-1 AM"), None);
        assert_eq!(parse_time_range("9 PM-1 AM"), None);
    }

    #[test]
    fn test_correction_at_twelve_hours() {
        assert_eq!(parse_time_range("1-2 PM"), range(780, 840));
        // Equal ends flip the start to exactly twelve hours earlier.
        assert_eq!(parse_time_range("2-2 PM"), range(120, 840));
        assert_eq!(parse_time_range("12-12 PM"), range(0, 720));
    }

    #[test]
    fn test_separator_count() {
        assert_eq!(parse_time_range("7AM"), None);
        assert_eq!(parse_time_range(""), None);
        assert_eq!(parse_time_range("7-9-11AM"), None);
        assert_eq!(parse_time_range("7\u{2013}9-11AM"), None);
    }

    #[test]
    fn test_bad_sides() {
        assert_eq!(parse_time_range("-11AM"), None);
        assert_eq!(parse_time_range("7-"), None);
        assert_eq!(parse_time_range("noon-2 PM"), None);
        assert_eq!(parse_time_range("7-11 XM"), None);
    }

    #[test]
    fn test_error_points_at_end_side() {
        let err = TimeRange::parse("7-11 XM").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::range("unknown meridiem 'XM'", Span::new(5, 7), "7-11 XM")
        );
    }

    #[test]
    fn test_error_points_at_extra_separator() {
        let err = TimeRange::parse("7-9-11AM").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::range(
                "expected a single '-' between start and end",
                Span::new(3, 4),
                "7-9-11AM"
            )
        );
    }
}
