#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(range) = mealtime::parse_time_range(s) {
            let displayed = mealtime::format_range(range);
            let reparsed = mealtime::parse_time_range(&displayed)
                .expect("formatted range must be parseable");
            assert_eq!(range, reparsed, "range roundtrip failed");
        }
    }
});
