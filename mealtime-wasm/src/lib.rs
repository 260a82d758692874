use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A loaded hours document, usable from JavaScript.
#[wasm_bindgen]
pub struct Engine {
    inner: mealtime::WeeklySchedule,
}

/// Now, in the host's time zone when it can be determined, else UTC.
fn now() -> jiff::Zoned {
    jiff::Zoned::now()
}

/// Maps become plain objects, so `status.hasSchedule` reads as a property.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
impl Engine {
    /// Load an hours document (`{"halls": {...}}`).
    #[wasm_bindgen]
    pub fn load(json: &str) -> Result<Engine, JsError> {
        let inner =
            mealtime::WeeklySchedule::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Engine { inner })
    }

    /// Venue names in the document.
    pub fn venues(&self) -> Vec<String> {
        self.inner.venues().map(|(v, _)| v.to_string()).collect()
    }

    /// The venue's resolved status right now, as a plain object.
    pub fn status(&self, venue: &str) -> Result<JsValue, JsError> {
        to_js(&self.inner.resolve(venue, &now()))
    }

    /// The venue's status at an RFC 9557 instant, e.g. `2026-02-06T12:00:00+00:00[UTC]`.
    #[wasm_bindgen(js_name = "statusAt")]
    pub fn status_at(&self, venue: &str, at: &str) -> Result<JsValue, JsError> {
        let at: jiff::Zoned = at.parse().map_err(|e: jiff::Error| JsError::new(&e.to_string()))?;
        to_js(&self.inner.resolve(venue, &at))
    }

    /// Today's hours listing, or `null` for an unknown venue.
    #[wasm_bindgen(js_name = "todayHours")]
    pub fn today_hours(&self, venue: &str) -> Result<JsValue, JsError> {
        match self.inner.today_hours(venue, &now()) {
            Some(hours) => to_js(&hours),
            None => Ok(JsValue::NULL),
        }
    }

    /// The status banner (`tone`, `chip`, `primary`, `secondary`).
    pub fn banner(&self, venue: &str) -> Result<JsValue, JsError> {
        to_js(&self.inner.resolve(venue, &now()).banner())
    }

    /// The status banner as display text.
    #[wasm_bindgen(js_name = "bannerText")]
    pub fn banner_text(&self, venue: &str) -> String {
        self.inner.resolve(venue, &now()).banner().to_string()
    }
}

/// Format minutes since midnight as `7:00am`.
#[wasm_bindgen(js_name = "formatMinutes")]
pub fn format_minutes(minutes: u16) -> String {
    mealtime::format_minutes(minutes)
}

/// Parse a time range into `{start, end}`, or `null` when it cannot be read.
#[wasm_bindgen(js_name = "parseTimeRange")]
pub fn parse_time_range(input: &str) -> Result<JsValue, JsError> {
    match mealtime::parse_time_range(input) {
        Some(range) => to_js(&range),
        None => Ok(JsValue::NULL),
    }
}
