use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use jiff::Zoned;
use mealtime::{DaySpec, TimeRange, Weekday, WeeklySchedule};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mealtime",
    about = "What a dining venue is serving right now",
    version
)]
struct Cli {
    /// Venue name as it appears in the hours document (e.g., "Cowell/Stevenson")
    venue: Option<String>,

    /// Hours document to read
    #[arg(
        short,
        long,
        env = "MEALTIME_SCHEDULE",
        default_value = "open_times.json"
    )]
    schedule: PathBuf,

    /// Evaluate at this instant instead of now (e.g., 2026-02-06T12:00:00+00:00[UTC])
    #[arg(long)]
    at: Option<String>,

    /// Show today's hours instead of the status banner
    #[arg(long)]
    hours: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// List the venues in the hours document
    #[arg(long, conflicts_with_all = ["hours", "check"])]
    list: bool,

    /// Validate every slot in the hours document
    #[arg(long)]
    check: bool,
}

fn load(path: &Path) -> anyhow::Result<WeeklySchedule> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read hours document {}", path.display()))?;
    let schedule = WeeklySchedule::from_json(&text)
        .with_context(|| format!("failed to load hours document {}", path.display()))?;
    debug!(path = %path.display(), venues = schedule.len(), "loaded hours document");
    Ok(schedule)
}

/// Print a diagnostic for every slot that can never be served; returns how many.
fn check(schedule: &WeeklySchedule) -> usize {
    let mut problems = 0;
    for (venue, meals) in schedule.venues() {
        for (period, slots) in meals.meals() {
            for slot in slots {
                if let Err(e) = TimeRange::parse(&slot.time) {
                    eprintln!("{venue} / {period}:\n{}\n", e.display_rich());
                    problems += 1;
                }
                let days = DaySpec::parse(&slot.days);
                if Weekday::ALL.into_iter().all(|day| !days.matches(day)) {
                    eprintln!("{venue} / {period}: days '{}' match no weekday\n", slot.days);
                    problems += 1;
                }
            }
        }
    }
    problems
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let schedule = match load(&cli.schedule) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    };

    if cli.list {
        for (venue, _) in schedule.venues() {
            println!("{venue}");
        }
        process::exit(0);
    }

    if cli.check {
        let problems = check(&schedule);
        if problems > 0 {
            eprintln!("{problems} problem(s) found");
            process::exit(1);
        }
        println!("\u{2713} valid");
        process::exit(0);
    }

    let venue = match cli.venue {
        Some(ref v) => v.as_str(),
        None => {
            eprintln!("error: no venue provided");
            process::exit(2);
        }
    };

    let now: Zoned = match cli.at {
        Some(ref at) => match at.parse() {
            Ok(z) => z,
            Err(e) => {
                eprintln!("error: invalid --at datetime: {e}");
                process::exit(1);
            }
        },
        None => Zoned::now(),
    };

    let status = schedule.resolve(venue, &now);

    if cli.hours {
        match schedule.today_hours(venue, &now) {
            Some(hours) if cli.json => print_json(&hours),
            Some(hours) => println!("{hours}"),
            // Unknown venue: the banner says so.
            None if cli.json => print_json(&status),
            None => println!("{}", status.banner()),
        }
        process::exit(0);
    }

    if cli.json {
        print_json(&status);
    } else {
        println!("{}", status.banner());
    }
}
