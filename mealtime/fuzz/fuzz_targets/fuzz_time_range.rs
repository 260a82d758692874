#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing should never panic, and errors must render
        if let Err(e) = mealtime::TimeRange::parse(s) {
            let _ = e.display_rich();
        }
        let _ = mealtime::DaySpec::parse(s);
    }
});
