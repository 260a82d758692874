use std::fmt;

use crate::clock::Meridiem;
use crate::model::{MealPeriod, TimeRange, Weekday};
use crate::resolve::{HoursRow, ResolvedStatus, TodayHours};

/// `7:00am`, `12:30pm`. Minute 1440 (end of day) reads as `12:00am`.
pub fn format_minutes(minutes: u16) -> String {
    let (hour, minute) = twelve_hour(minutes);
    let suffix = match Meridiem::of(minutes) {
        Meridiem::Am => "am",
        Meridiem::Pm => "pm",
    };
    format!("{hour}:{minute:02}{suffix}")
}

/// `7:00am - 11:00am`.
pub fn format_range(range: TimeRange) -> String {
    format!(
        "{} - {}",
        format_minutes(range.start),
        format_minutes(range.end)
    )
}

/// Short label for when something starts: `2 PM`, `11:30 AM`. The marker is
/// always separated by a space, with or without minutes.
pub fn format_start_label(minutes: u16) -> String {
    let (hour, minute) = twelve_hour(minutes);
    let meridiem = Meridiem::of(minutes).as_str();
    if minute == 0 {
        format!("{hour} {meridiem}")
    } else {
        format!("{hour}:{minute:02} {meridiem}")
    }
}

fn twelve_hour(minutes: u16) -> (u16, u16) {
    let hour = match (minutes / 60) % 12 {
        0 => 12,
        h => h,
    };
    (hour, minutes % 60)
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_range(*self))
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const UNAVAILABLE: &str = "Meal status unavailable for this hall right now.";
const LIMITED_SERVICE: &str = "Limited service period \u{2014} select entree options available";

/// Whether the banner shows the venue as serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Open,
    Closed,
}

/// Status banner text for one venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub tone: BannerTone,
    pub chip: Option<&'static str>,
    pub primary: String,
    pub secondary: Option<String>,
}

impl ResolvedStatus {
    /// When the next meal starts, as `2 PM` or `11:30 AM`.
    pub fn next_start_label(&self) -> Option<String> {
        self.next_start.map(format_start_label)
    }

    /// Today's open window, as `7:00am - 8:00pm`.
    pub fn overall_label(&self) -> Option<String> {
        self.overall_range.map(format_range)
    }

    pub fn banner(&self) -> StatusBanner {
        if !self.has_schedule {
            return StatusBanner {
                tone: BannerTone::Closed,
                chip: None,
                primary: UNAVAILABLE.to_string(),
                secondary: None,
            };
        }

        if self.current_meal.as_ref().is_some_and(MealPeriod::is_all_day) {
            return StatusBanner {
                tone: BannerTone::Open,
                chip: Some("ALL DAY"),
                primary: "Open".to_string(),
                secondary: self
                    .closes_at
                    .map(|end| format!("Closes at {}", format_start_label(end))),
            };
        }

        let (tone, chip, primary) = match (&self.current_meal, self.is_continuous) {
            (Some(meal), _) => (BannerTone::Open, Some("NOW SERVING"), meal.to_string()),
            (None, true) => (
                BannerTone::Open,
                Some("CONTINUOUS DINING"),
                LIMITED_SERVICE.to_string(),
            ),
            (None, false) => (BannerTone::Closed, None, "Closed".to_string()),
        };

        let secondary = self
            .next_meal
            .as_ref()
            .zip(self.next_start_label())
            .map(|(next, at)| {
                if self.is_continuous {
                    format!("Next full meal: {next} at {at}")
                } else if self.current_meal.is_some() {
                    format!("Next: {next} at {at}")
                } else {
                    format!("Opens for {next} at {at}")
                }
            });

        StatusBanner {
            tone,
            chip,
            primary,
            secondary,
        }
    }
}

impl fmt::Display for StatusBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(chip) = self.chip {
            writeln!(f, "[{chip}]")?;
        }
        write!(f, "{}", self.primary)?;
        if let Some(secondary) = &self.secondary {
            write!(f, "\n{secondary}")?;
        }
        Ok(())
    }
}

impl HoursRow {
    /// The formatted range, or the authored text when it could not be read.
    pub fn display_time(&self) -> String {
        match self.range {
            Some(range) => format_range(range),
            None => self.time.clone(),
        }
    }
}

impl fmt::Display for TodayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Today's Hours")?;
        write!(f, "{}", self.day)?;
        match self.overall {
            Some(overall) if !self.rows.is_empty() => {
                write!(f, "\n{overall}")?;
                for row in &self.rows {
                    write!(f, "\n{:<12}{}", row.meal.as_str(), row.display_time())?;
                }
            }
            _ => write!(f, "\nClosed today")?,
        }
        Ok(())
    }
}
