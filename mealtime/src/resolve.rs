use jiff::Zoned;
use tracing::{debug, trace};

use crate::days::day_matches;
use crate::model::{MealPeriod, MealSchedule, TimeRange, Weekday, WeeklySchedule};

/// A venue's state at one instant. Recomputed on every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStatus {
    /// False when the venue has no entry at all (unknown, not closed).
    pub has_schedule: bool,
    pub current_meal: Option<MealPeriod>,
    pub next_meal: Option<MealPeriod>,
    /// Minute of day the next meal starts.
    pub next_start: Option<u16>,
    /// Minute of day the slot serving the current meal ends.
    pub closes_at: Option<u16>,
    /// Open overall, but between meal periods.
    pub is_continuous: bool,
    /// Earliest start to latest end across today's slots.
    pub overall_range: Option<TimeRange>,
    /// Labels served today: current first, then next, then the rest by priority.
    pub ordered_meals: Vec<MealPeriod>,
}

impl ResolvedStatus {
    fn unknown() -> Self {
        Self::default()
    }

    /// Open for a named meal or continuous dining.
    pub fn is_open(&self) -> bool {
        self.current_meal.is_some() || self.is_continuous
    }
}

/// Wall-clock weekday and minute of day for an instant.
pub(crate) fn wall_clock(now: &Zoned) -> (Weekday, u16) {
    let minutes = now.hour() as u16 * 60 + now.minute() as u16;
    (Weekday::from_jiff(now.weekday()), minutes)
}

/// Resolve a venue's state at `now`, read in `now`'s own time zone.
pub fn resolve(schedule: &WeeklySchedule, venue: &str, now: &Zoned) -> ResolvedStatus {
    let Some(meals) = schedule.get(venue) else {
        debug!(venue, "no schedule for venue");
        return ResolvedStatus::unknown();
    };
    let (day, minutes) = wall_clock(now);
    let status = resolve_day(meals, day, minutes);
    trace!(
        venue,
        day = day.name(),
        minutes,
        current = status.current_meal.as_ref().map(MealPeriod::as_str),
        next = status.next_meal.as_ref().map(MealPeriod::as_str),
        continuous = status.is_continuous,
        "resolved venue status"
    );
    status
}

/// Resolve one venue's meals for a weekday and minute of day.
pub fn resolve_day(meals: &MealSchedule, day: Weekday, now: u16) -> ResolvedStatus {
    let mut current: Option<(&MealPeriod, u16)> = None;
    let mut next: Option<(&MealPeriod, u16)> = None;
    let mut overall: Option<TimeRange> = None;
    let mut served_today: Vec<&MealPeriod> = Vec::new();

    for (period, slots) in meals.by_priority() {
        for slot in slots {
            if !day_matches(&slot.days, day) {
                continue;
            }
            if !served_today.contains(&period) {
                served_today.push(period);
            }

            let range = match TimeRange::parse(&slot.time) {
                Ok(range) => range,
                Err(e) => {
                    debug!(
                        meal = period.as_str(),
                        days = %slot.days,
                        time = %slot.time,
                        error = %e,
                        "dropping unparsable slot"
                    );
                    continue;
                }
            };
            overall = Some(overall.map_or(range, |o| o.union(range)));

            if range.contains(now) {
                current = Some((period, range.end));
            } else if now < range.start && next.map_or(true, |(_, start)| range.start < start) {
                next = Some((period, range.start));
            }
        }
    }

    let current_meal = current.map(|(p, _)| p);
    let next_meal = next.map(|(p, _)| p);
    let is_continuous = current.is_none() && overall.is_some_and(|o| o.contains(now));

    // Stable sort over priority order keeps the remaining labels in place.
    served_today.sort_by_key(|p| {
        if Some(*p) == current_meal {
            0
        } else if Some(*p) == next_meal {
            1
        } else {
            2
        }
    });

    ResolvedStatus {
        has_schedule: true,
        current_meal: current_meal.cloned(),
        next_meal: next_meal.cloned(),
        next_start: next.map(|(_, start)| start),
        closes_at: current.map(|(_, end)| end),
        is_continuous,
        overall_range: overall,
        ordered_meals: served_today.into_iter().cloned().collect(),
    }
}

/// One row of the day's hours listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursRow {
    pub meal: MealPeriod,
    /// The parsed range, if the slot's time could be read.
    pub range: Option<TimeRange>,
    /// The slot's time as authored.
    pub time: String,
}

/// Every slot that applies on one day, with the day's overall window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayHours {
    pub day: Weekday,
    pub overall: Option<TimeRange>,
    pub rows: Vec<HoursRow>,
}

impl TodayHours {
    /// Nothing readable is served today.
    pub fn is_closed(&self) -> bool {
        self.overall.is_none() || self.rows.is_empty()
    }
}

/// The hours listing for a venue on `now`'s day, or `None` for an unknown venue.
pub fn today_hours(schedule: &WeeklySchedule, venue: &str, now: &Zoned) -> Option<TodayHours> {
    let meals = schedule.get(venue)?;
    let (day, _) = wall_clock(now);
    Some(hours_for_day(meals, day))
}

/// The hours listing for one venue's meals on a weekday.
pub fn hours_for_day(meals: &MealSchedule, day: Weekday) -> TodayHours {
    let mut rows = Vec::new();
    let mut overall: Option<TimeRange> = None;

    for (period, slots) in meals.by_priority() {
        for slot in slots.iter().filter(|s| day_matches(&s.days, day)) {
            let range = TimeRange::parse(&slot.time).ok();
            if let Some(range) = range {
                overall = Some(overall.map_or(range, |o| o.union(range)));
            }
            rows.push(HoursRow {
                meal: period.clone(),
                range,
                time: slot.time.clone(),
            });
        }
    }

    TodayHours { day, overall, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScheduleSlot;
    use jiff::civil::{Date, Time};
    use jiff::tz::TimeZone;

    fn slot(days: &str, time: &str) -> ScheduleSlot {
        ScheduleSlot::new(days, time)
    }

    fn lunch_and_dinner() -> MealSchedule {
        MealSchedule::new()
            .with_meal("Dinner", [slot("Sunday-Saturday", "5-8 PM")])
            .with_meal("Lunch", [slot("Sunday-Saturday", "11-2 PM")])
    }

    fn dining_hall() -> MealSchedule {
        MealSchedule::new()
            .with_meal(
                "Breakfast",
                [
                    slot("Monday-Friday", "7-11AM"),
                    slot("Saturday-Sunday", "8-10AM"),
                ],
            )
            .with_meal("Brunch", [slot("Saturday-Sunday", "10-2 PM")])
            .with_meal("Lunch", [slot("Monday-Friday", "11:30-2 PM")])
            .with_meal("Dinner", [slot("Sunday-Saturday", "5-8 PM")])
            .with_meal("Late Night", [slot("Sunday-Thursday", "9-11 PM")])
    }

    // 2026-02-06 is a Friday.
    fn friday_at(hour: i8, minute: i8) -> Zoned {
        Date::new(2026, 2, 6)
            .unwrap()
            .to_datetime(Time::new(hour, minute, 0, 0).unwrap())
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    #[test]
    fn test_gap_between_meals_is_continuous_dining() {
        let status = resolve_day(&lunch_and_dinner(), Weekday::Wednesday, 15 * 60 + 30);
        assert!(status.has_schedule);
        assert_eq!(status.current_meal, None);
        assert_eq!(status.next_meal, Some(MealPeriod::Dinner));
        assert_eq!(status.next_start, Some(1020));
        // 15:30 is inside the 11:00-20:00 window.
        assert!(status.is_continuous);
        assert_eq!(status.overall_range, TimeRange::new(660, 1200));
    }

    #[test]
    fn test_during_lunch() {
        let status = resolve_day(&lunch_and_dinner(), Weekday::Wednesday, 12 * 60);
        assert_eq!(status.current_meal, Some(MealPeriod::Lunch));
        assert_eq!(status.closes_at, Some(840));
        assert_eq!(status.next_meal, Some(MealPeriod::Dinner));
        assert!(!status.is_continuous);
        assert!(status.is_open());
    }

    #[test]
    fn test_before_opening() {
        let status = resolve_day(&dining_hall(), Weekday::Tuesday, 6 * 60);
        assert_eq!(status.current_meal, None);
        assert_eq!(status.next_meal, Some(MealPeriod::Breakfast));
        assert_eq!(status.next_start, Some(420));
        assert!(!status.is_continuous);
    }

    #[test]
    fn test_after_closing() {
        let status = resolve_day(&dining_hall(), Weekday::Friday, 22 * 60);
        assert_eq!(status.current_meal, None);
        assert_eq!(status.next_meal, None);
        assert_eq!(status.next_start, None);
        assert!(!status.is_continuous);
        assert!(!status.is_open());
    }

    #[test]
    fn test_boundary_minute_belongs_to_next_meal() {
        let meals = MealSchedule::new()
            .with_meal("Breakfast", [slot("Sunday-Saturday", "7-11AM")])
            .with_meal("Lunch", [slot("Sunday-Saturday", "11-2 PM")]);
        let status = resolve_day(&meals, Weekday::Monday, 660);
        assert_eq!(status.current_meal, Some(MealPeriod::Lunch));
        assert!(!status.is_continuous);
    }

    #[test]
    fn test_weekend_brunch_replaces_lunch() {
        let status = resolve_day(&dining_hall(), Weekday::Saturday, 12 * 60);
        assert_eq!(status.current_meal, Some(MealPeriod::Brunch));
        assert_eq!(status.next_meal, Some(MealPeriod::Dinner));
        assert_eq!(
            status.ordered_meals,
            [MealPeriod::Brunch, MealPeriod::Dinner, MealPeriod::Breakfast]
        );
    }

    #[test]
    fn test_ordered_meals_current_then_next_then_priority() {
        let status = resolve_day(&dining_hall(), Weekday::Thursday, 12 * 60);
        assert_eq!(
            status.ordered_meals,
            [
                MealPeriod::Lunch,
                MealPeriod::Dinner,
                MealPeriod::Breakfast,
                MealPeriod::LateNight
            ]
        );
    }

    #[test]
    fn test_ordered_meals_only_lists_todays_labels() {
        // Late night does not run on Fridays; brunch is weekend only.
        let status = resolve_day(&dining_hall(), Weekday::Friday, 6 * 60);
        assert_eq!(
            status.ordered_meals,
            [MealPeriod::Breakfast, MealPeriod::Lunch, MealPeriod::Dinner]
        );
    }

    #[test]
    fn test_next_meal_is_earliest_start_across_labels() {
        let meals = MealSchedule::new()
            .with_meal("Dinner", [slot("Monday", "5-8 PM")])
            .with_meal("Late Night", [slot("Monday", "4-5 PM")]);
        let status = resolve_day(&meals, Weekday::Monday, 600);
        assert_eq!(status.next_meal, Some(MealPeriod::LateNight));
        assert_eq!(status.next_start, Some(960));
    }

    #[test]
    fn test_next_meal_tie_goes_to_priority_order() {
        let meals = MealSchedule::new()
            .with_meal("Dinner", [slot("Monday", "5-8 PM")])
            .with_meal("Lunch", [slot("Monday", "5-6 PM")]);
        let status = resolve_day(&meals, Weekday::Monday, 600);
        assert_eq!(status.next_meal, Some(MealPeriod::Lunch));
    }

    #[test]
    fn test_overlapping_current_last_in_priority_wins() {
        let meals = MealSchedule::new()
            .with_meal("Dinner", [slot("Monday", "4-8 PM")])
            .with_meal("Lunch", [slot("Monday", "11-5 PM")]);
        let status = resolve_day(&meals, Weekday::Monday, 16 * 60 + 30);
        assert_eq!(status.current_meal, Some(MealPeriod::Dinner));
        assert_eq!(status.closes_at, Some(1200));
    }

    #[test]
    fn test_all_slots_unparsable_is_closed_today() {
        let meals = MealSchedule::new()
            .with_meal("Lunch", [slot("Sunday-Saturday", "around noon")])
            .with_meal("Dinner", [slot("Sunday-Saturday", "5-8-9 PM")]);
        let status = resolve_day(&meals, Weekday::Monday, 12 * 60);
        assert!(status.has_schedule);
        assert_eq!(status.current_meal, None);
        assert_eq!(status.next_meal, None);
        assert!(!status.is_continuous);
        assert_eq!(status.overall_range, None);
    }

    #[test]
    fn test_unparsable_slot_does_not_affect_others() {
        let meals = MealSchedule::new().with_meal(
            "Lunch",
            [slot("Monday", "garbage"), slot("Monday", "11-2 PM")],
        );
        let status = resolve_day(&meals, Weekday::Monday, 12 * 60);
        assert_eq!(status.current_meal, Some(MealPeriod::Lunch));
    }

    #[test]
    fn test_all_day_cafe() {
        let meals = MealSchedule::new().with_meal("Now Open", [slot("Monday-Friday", "8-6 PM")]);
        let status = resolve_day(&meals, Weekday::Monday, 9 * 60);
        assert_eq!(status.current_meal, Some(MealPeriod::Other("Now Open".into())));
        assert_eq!(status.closes_at, Some(1080));
        let status = resolve_day(&meals, Weekday::Saturday, 9 * 60);
        assert_eq!(status.current_meal, None);
        assert_eq!(status.overall_range, None);
        assert!(status.ordered_meals.is_empty());
    }

    #[test]
    fn test_unknown_venue() {
        let schedule = WeeklySchedule::new().with_venue("Cowell", lunch_and_dinner());
        let status = resolve(&schedule, "Porter", &friday_at(12, 0));
        assert_eq!(status, ResolvedStatus::default());
        assert!(!status.has_schedule);
    }

    #[test]
    fn test_resolve_reads_wall_clock() {
        let schedule = WeeklySchedule::new().with_venue("Cowell", dining_hall());
        let status = resolve(&schedule, "Cowell", &friday_at(9, 15));
        assert_eq!(status.current_meal, Some(MealPeriod::Breakfast));
        assert_eq!(status.next_meal, Some(MealPeriod::Lunch));
        assert_eq!(status.next_start, Some(690));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let schedule = WeeklySchedule::new().with_venue("Cowell", dining_hall());
        let now = friday_at(15, 0);
        assert_eq!(
            resolve(&schedule, "Cowell", &now),
            resolve(&schedule, "Cowell", &now)
        );
    }

    #[test]
    fn test_hours_for_day_keeps_unparsable_rows() {
        let meals = MealSchedule::new()
            .with_meal("Dinner", [slot("Monday", "5-8 PM")])
            .with_meal("Breakfast", [slot("Monday", "7-11AM"), slot("Tuesday", "8-9AM")])
            .with_meal("Lunch", [slot("Monday", "TBD")]);
        let hours = hours_for_day(&meals, Weekday::Monday);
        assert_eq!(hours.day, Weekday::Monday);
        assert_eq!(hours.overall, TimeRange::new(420, 1200));
        let rows: Vec<(&str, Option<TimeRange>)> = hours
            .rows
            .iter()
            .map(|r| (r.meal.as_str(), r.range))
            .collect();
        assert_eq!(
            rows,
            [
                ("Breakfast", TimeRange::new(420, 660)),
                ("Lunch", None),
                ("Dinner", TimeRange::new(1020, 1200)),
            ]
        );
        assert!(!hours.is_closed());
    }

    #[test]
    fn test_hours_closed_day() {
        let hours = hours_for_day(&dining_hall(), Weekday::Friday);
        assert!(!hours.is_closed());
        let meals = MealSchedule::new().with_meal("Lunch", [slot("Monday", "TBD")]);
        assert!(hours_for_day(&meals, Weekday::Monday).is_closed());
        assert!(hours_for_day(&meals, Weekday::Tuesday).is_closed());
    }

    #[test]
    fn test_today_hours_unknown_venue() {
        let schedule = WeeklySchedule::new();
        assert!(today_hours(&schedule, "Cowell", &friday_at(8, 0)).is_none());
    }
}
