use crate::error::{ScheduleError, Span};

/// Half of the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn opposite(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    fn offset(self) -> u16 {
        match self {
            Self::Am => 0,
            Self::Pm => 12 * 60,
        }
    }

    /// The half of the day a minute-of-day falls in.
    pub fn of(minutes: u16) -> Self {
        if (minutes / 60) % 24 >= 12 {
            Self::Pm
        } else {
            Self::Am
        }
    }

    pub(crate) fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "am" => Some(Self::Am),
            "pm" => Some(Self::Pm),
            _ => None,
        }
    }
}

/// A clock token as written: 12-hour hour, minute, and the marker if it had one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Option<Meridiem>,
}

impl ClockTime {
    /// Parse a token such as `7:30 AM`, `2pm` or `11`.
    pub fn parse(token: &str) -> Result<Self, ScheduleError> {
        Scanner::new(token).clock()
    }

    /// Minutes since midnight. The token's own marker wins over `inherited`.
    pub fn minutes(self, inherited: Meridiem) -> u16 {
        let meridiem = self.meridiem.unwrap_or(inherited);
        (self.hour % 12) as u16 * 60 + self.minute as u16 + meridiem.offset()
    }
}

/// Minutes since midnight for a clock token, or `None` when it cannot be read.
/// A token without a marker is read as AM.
pub fn parse_clock(token: &str) -> Option<u16> {
    parse_clock_with(token, Meridiem::Am)
}

/// Like [`parse_clock`], reading a token without its own marker as `inherited`.
pub fn parse_clock_with(token: &str, inherited: Meridiem) -> Option<u16> {
    ClockTime::parse(token).ok().map(|c| c.minutes(inherited))
}

struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn clock(&mut self) -> Result<ClockTime, ScheduleError> {
        self.skip_whitespace();
        if self.pos >= self.bytes.len() {
            return Err(self.error("expected a clock time", self.pos, self.pos));
        }

        let hour_start = self.pos;
        let hour_digits = self.digits();
        if hour_digits.is_empty() {
            return Err(self.error("expected an hour", hour_start, hour_start + 1));
        }
        if hour_digits.len() > 2 {
            return Err(self.error("hour has too many digits", hour_start, self.pos));
        }
        let hour: u8 = hour_digits
            .parse()
            .map_err(|_| self.error("invalid hour", hour_start, self.pos))?;
        if hour > 12 {
            return Err(self.error("hour must be 12 or less", hour_start, self.pos));
        }

        let mut minute = 0;
        if self.peek() == Some(b':') {
            self.pos += 1;
            let min_start = self.pos;
            let min_digits = self.digits();
            if min_digits.len() != 2 {
                return Err(self.error(
                    "expected two-digit minutes",
                    min_start - 1,
                    self.pos.max(min_start),
                ));
            }
            minute = min_digits
                .parse()
                .map_err(|_| self.error("invalid minute", min_start, self.pos))?;
            if minute > 59 {
                return Err(self.error("minute must be 59 or less", min_start, self.pos));
            }
        }

        self.skip_whitespace();
        let meridiem = if self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            let word_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
                self.pos += 1;
            }
            let word = &self.input[word_start..self.pos];
            Some(Meridiem::from_word(word).ok_or_else(|| {
                self.error(
                    format!("unknown meridiem '{word}'"),
                    word_start,
                    self.pos,
                )
            })?)
        } else {
            None
        };

        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error("unexpected trailing input", self.pos, self.bytes.len()));
        }

        Ok(ClockTime {
            hour,
            minute,
            meridiem,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn digits(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>, start: usize, end: usize) -> ScheduleError {
        ScheduleError::clock(message, Span::new(start, end), self.input)
    }
}
