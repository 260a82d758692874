use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
use tracing::debug;

#[cfg(feature = "serde")]
use crate::error::ScheduleError;

/// Minutes in a day. A range may end exactly here (closing at midnight).
pub const MINUTES_PER_DAY: u16 = 1440;

/// Every venue's meal schedule, keyed by venue name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeeklySchedule {
    venues: BTreeMap<String, MealSchedule>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a venue by its exact name.
    pub fn get(&self, venue: &str) -> Option<&MealSchedule> {
        self.venues.get(venue)
    }

    pub fn insert(&mut self, venue: impl Into<String>, meals: MealSchedule) {
        self.venues.insert(venue.into(), meals);
    }

    /// Builder form of [`WeeklySchedule::insert`].
    pub fn with_venue(mut self, venue: impl Into<String>, meals: MealSchedule) -> Self {
        self.insert(venue, meals);
        self
    }

    pub fn venues(&self) -> impl Iterator<Item = (&str, &MealSchedule)> {
        self.venues.iter().map(|(name, meals)| (name.as_str(), meals))
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Load the hours document: `{"halls": {venue: {meal: [{days, time}]}}}`.
    ///
    /// A document whose `halls` is missing or not an object loads as an empty
    /// schedule, which makes every venue lookup report "no schedule". A venue
    /// whose value is not an object is kept with no meals (closed every day).
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> Result<Self, ScheduleError> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            halls: serde_json::Value,
        }

        let doc: Document = serde_json::from_str(input)
            .map_err(|e| ScheduleError::document(format!("invalid hours document: {e}")))?;
        let serde_json::Value::Object(halls) = doc.halls else {
            return Ok(Self::new());
        };

        let venues = halls
            .into_iter()
            .map(|(venue, meals)| {
                let meals = MealSchedule::deserialize(meals).unwrap_or_else(|e| {
                    debug!(venue = %venue, error = %e, "venue has no readable meals");
                    MealSchedule::new()
                });
                (venue, meals)
            })
            .collect();
        Ok(Self { venues })
    }
}

/// One venue's meal periods, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSchedule {
    meals: Vec<(MealPeriod, Vec<ScheduleSlot>)>,
}

impl MealSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append slots to a meal period, creating it on first use.
    /// A period with no slots is not recorded.
    pub fn extend_meal(
        &mut self,
        period: MealPeriod,
        slots: impl IntoIterator<Item = ScheduleSlot>,
    ) {
        let mut slots = slots.into_iter().peekable();
        if slots.peek().is_none() {
            return;
        }
        match self.meals.iter_mut().find(|(p, _)| *p == period) {
            Some((_, existing)) => existing.extend(slots),
            None => self.meals.push((period, slots.collect())),
        }
    }

    /// Builder form of [`MealSchedule::extend_meal`].
    pub fn with_meal(
        mut self,
        label: &str,
        slots: impl IntoIterator<Item = ScheduleSlot>,
    ) -> Self {
        self.extend_meal(MealPeriod::parse(label), slots);
        self
    }

    /// Meal periods in document order.
    pub fn meals(&self) -> impl Iterator<Item = (&MealPeriod, &[ScheduleSlot])> {
        self.meals.iter().map(|(p, s)| (p, s.as_slice()))
    }

    /// Meal periods in evaluation order: the fixed vocabulary first
    /// (breakfast through late night), then other labels in document order.
    pub fn by_priority(&self) -> Vec<(&MealPeriod, &[ScheduleSlot])> {
        let mut ordered: Vec<_> = self.meals().collect();
        ordered.sort_by_key(|(p, _)| p.rank());
        ordered
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

#[cfg(feature = "serde")]
impl Serialize for MealSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.meals.len()))?;
        for (period, slots) in &self.meals {
            map.serialize_entry(period.as_str(), slots)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MealSchedule {
    /// Lenient: a meal that is not an array, or a slot that is not an object,
    /// is skipped rather than failing the whole document.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MealVisitor;

        impl<'de> serde::de::Visitor<'de> for MealVisitor {
            type Value = MealSchedule;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of meal period to slots")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut meals = MealSchedule::new();
                while let Some((label, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    let serde_json::Value::Array(items) = value else {
                        continue;
                    };
                    let slots = items
                        .into_iter()
                        .filter_map(|item| serde_json::from_value::<ScheduleSlot>(item).ok());
                    meals.extend_meal(MealPeriod::parse(&label), slots);
                }
                Ok(meals)
            }
        }

        deserializer.deserialize_map(MealVisitor)
    }
}

/// One day-applicability rule and time range, both as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleSlot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub days: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time: String,
}

impl ScheduleSlot {
    pub fn new(days: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            days: days.into(),
            time: time.into(),
        }
    }
}

/// A named serving window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MealPeriod {
    Breakfast,
    Brunch,
    Lunch,
    Dinner,
    LateNight,
    /// A venue-specific label, such as a café's all-day designation.
    Other(String),
}

impl MealPeriod {
    /// Recognize the fixed vocabulary case-insensitively; keep anything else verbatim.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "breakfast" => Self::Breakfast,
            "brunch" => Self::Brunch,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "latenight" => Self::LateNight,
            _ => Self::Other(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Brunch => "Brunch",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::LateNight => "Late Night",
            Self::Other(label) => label,
        }
    }

    /// Position in the evaluation order; every non-fixed label shares the last rank.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Breakfast => 0,
            Self::Brunch => 1,
            Self::Lunch => 2,
            Self::Dinner => 3,
            Self::LateNight => 4,
            Self::Other(_) => 5,
        }
    }

    /// True for venue-specific labels outside the fixed meal vocabulary.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

#[cfg(feature = "serde")]
impl Serialize for MealPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MealPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(MealPeriod::parse(&s))
    }
}

/// A same-day span in minutes since midnight: `start` inclusive, `end` exclusive.
///
/// Invariant: `start < end <= 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeRange {
    pub start: u16,
    pub end: u16,
}

impl TimeRange {
    pub fn new(start: u16, end: u16) -> Option<Self> {
        (start < end && end <= MINUTES_PER_DAY).then_some(Self { start, end })
    }

    pub fn contains(self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Length in minutes.
    pub fn minutes(self) -> u16 {
        self.end - self.start
    }

    /// Smallest range covering both.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Capitalized full name, as schedule documents spell it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Sunday-first index: Sunday=0, Saturday=6.
    pub fn index(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
            jiff::civil::Weekday::Sunday => Self::Sunday,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Monday),
        "tuesday" | "tue" => Some(Weekday::Tuesday),
        "wednesday" | "wed" => Some(Weekday::Wednesday),
        "thursday" | "thu" => Some(Weekday::Thursday),
        "friday" | "fri" => Some(Weekday::Friday),
        "saturday" | "sat" => Some(Weekday::Saturday),
        "sunday" | "sun" => Some(Weekday::Sunday),
        _ => None,
    }
}
