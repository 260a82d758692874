//! Load an hours document and print each venue's banner at a fixed instant.

use mealtime::WeeklySchedule;

const HOURS: &str = r#"{
    "halls": {
        "Cowell/Stevenson": {
            "Breakfast": [{"days": "Monday-Friday", "time": "7-11AM"}],
            "Lunch": [{"days": "Monday-Friday", "time": "11:30-2 PM"}],
            "Dinner": [{"days": "Sunday-Saturday", "time": "5-8 PM"}]
        },
        "Perk Coffee Bar": {
            "Now Open": [{"days": "Monday-Friday", "time": "8-5 PM"}]
        }
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schedule = WeeklySchedule::from_json(HOURS)?;

    // A Friday afternoon, between lunch and dinner.
    let now: jiff::Zoned = "2026-02-06T15:30:00+00:00[UTC]".parse()?;

    for (venue, _) in schedule.venues() {
        let status = schedule.resolve(venue, &now);
        println!("== {venue} ==");
        println!("{}", status.banner());
        if let Some(hours) = schedule.today_hours(venue, &now) {
            println!("\n{hours}");
        }
        println!();
    }

    // Unknown venues are reported as unavailable, not closed.
    println!("{}", schedule.resolve("Rachel Carson", &now).banner());

    Ok(())
}
