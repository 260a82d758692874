//! mealtime: what a dining venue is serving right now.
//!
//! Resolves a weekly schedule of meal periods (`"Monday-Friday"`, `"11:30-2 PM"`)
//! against the current instant: the meal being served, the next meal and when
//! it starts, and whether the venue is open between meals.
//!
//! # Examples
//!
//! ```
//! use mealtime::{MealSchedule, ScheduleSlot, WeeklySchedule};
//!
//! let schedule = WeeklySchedule::new().with_venue(
//!     "Cowell",
//!     MealSchedule::new()
//!         .with_meal("Lunch", [ScheduleSlot::new("Sunday-Saturday", "11:30-2 PM")])
//!         .with_meal("Dinner", [ScheduleSlot::new("Sunday-Saturday", "5-8 PM")]),
//! );
//!
//! let now: jiff::Zoned = "2026-02-06T12:00:00+00:00[UTC]".parse().unwrap();
//! let status = schedule.resolve("Cowell", &now);
//! assert_eq!(status.current_meal.as_ref().unwrap().as_str(), "Lunch");
//! assert_eq!(status.next_start_label().as_deref(), Some("5 PM"));
//! ```

pub mod clock;
pub mod days;
pub mod display;
pub mod error;
pub mod model;
pub mod range;
pub mod resolve;

pub use clock::{parse_clock, parse_clock_with, ClockTime, Meridiem};
pub use days::{day_matches, DaySpec};
pub use display::{format_minutes, format_range, format_start_label, BannerTone, StatusBanner};
pub use error::{ScheduleError, Span};
pub use model::{MealPeriod, MealSchedule, ScheduleSlot, TimeRange, Weekday, WeeklySchedule};
pub use range::parse_time_range;
pub use resolve::{hours_for_day, resolve, resolve_day, HoursRow, ResolvedStatus, TodayHours};

use jiff::Zoned;
#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

// --- WeeklySchedule convenience methods ---

impl WeeklySchedule {
    /// Resolve a venue's status at `now`.
    pub fn resolve(&self, venue: &str, now: &Zoned) -> ResolvedStatus {
        resolve::resolve(self, venue, now)
    }

    /// The hours listing for `now`'s day, or `None` for an unknown venue.
    pub fn today_hours(&self, venue: &str, now: &Zoned) -> Option<TodayHours> {
        resolve::today_hours(self, venue, now)
    }
}

#[cfg(feature = "serde")]
impl Serialize for ResolvedStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;

        // Every key is always present for a consistent JSON shape
        map.serialize_entry("hasSchedule", &self.has_schedule)?;
        map.serialize_entry("currentMeal", &self.current_meal)?;
        map.serialize_entry("nextMeal", &self.next_meal)?;
        map.serialize_entry("nextStartMinutes", &self.next_start)?;
        map.serialize_entry("nextStartLabel", &self.next_start_label())?;
        map.serialize_entry("closesAt", &self.closes_at)?;
        map.serialize_entry("isContinuous", &self.is_continuous)?;
        map.serialize_entry("overallRange", &self.overall_range)?;
        map.serialize_entry("overallLabel", &self.overall_label())?;
        map.serialize_entry("orderedMeals", &self.ordered_meals)?;

        map.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for TodayHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("day", &self.day)?;
        map.serialize_entry("closed", &self.is_closed())?;
        map.serialize_entry("overallRange", &self.overall)?;
        map.serialize_entry("overallLabel", &self.overall.map(display::format_range))?;
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "meal": row.meal.as_str(),
                    "time": row.display_time(),
                    "range": row.range,
                })
            })
            .collect();
        map.serialize_entry("rows", &rows)?;

        map.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for StatusBanner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(
            "tone",
            match self.tone {
                BannerTone::Open => "open",
                BannerTone::Closed => "closed",
            },
        )?;
        map.serialize_entry("chip", &self.chip)?;
        map.serialize_entry("primary", &self.primary)?;
        map.serialize_entry("secondary", &self.secondary)?;
        map.end()
    }
}
