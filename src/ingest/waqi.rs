/// WAQI (World Air Quality Index) feed API client.
///
/// Handles URL construction, the single fetch request, and normalization of
/// feed responses into `AirQualityRecord`s. Feed endpoint:
///   https://api.waqi.info/feed/{city}/?token={token}
///
/// The feed returns an envelope with a status marker and a nested data
/// object. See `fixtures.rs` for annotated examples of the response
/// structure.
///
/// There is no retry here. A failed fetch surfaces to the scheduler, which
/// logs it and waits for the next tick.

use crate::model::{
    AirQualityRecord, AqiLevel, FetchError, NormalizeError, SOURCE_SYNTHETIC, SOURCE_WAQI,
};
use serde_json::Value;
use std::time::Duration;

const FEED_BASE_URL: &str = "https://api.waqi.info/feed";

/// Bound on a single feed request, connect through body.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// The six pollutant codes extracted from the feed's `iaqi` mapping.
pub const POLLUTANT_CODES: [&str; 6] = ["pm25", "pm10", "co", "no2", "o3", "so2"];

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the feed URL for a city. The city name is percent-encoded; feed
/// lookups accept localized names like "北京" as well as ASCII.
pub fn build_feed_url(city: &str, token: &str) -> String {
    format!("{}/{}/?token={}", FEED_BASE_URL, urlencoding::encode(city), token)
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Issues one GET against the feed endpoint and returns the raw response
/// document.
///
/// # Errors
/// - `FetchError::Network` — transport failure or non-2xx HTTP status.
/// - `FetchError::Decode` — response body was not JSON.
/// - `FetchError::Rejected` — body parsed but its status marker was not
///   `"ok"` (bad token, unknown city, provider-side failure).
pub fn fetch_feed(
    client: &reqwest::blocking::Client,
    city: &str,
    token: &str,
) -> Result<Value, FetchError> {
    let url = build_feed_url(city, token);

    let response = client
        .get(&url)
        .header("User-Agent", "aqmon_service/0.1")
        .timeout(FETCH_TIMEOUT)
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::Network(format!("HTTP {}", response.status())));
    }

    let body = response
        .text()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let doc: Value =
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

    check_status(&doc)?;
    Ok(doc)
}

/// Checks the envelope's status marker. On rejection the feed puts a short
/// reason string into `data` (e.g. `{"status":"error","data":"Invalid key"}`).
pub fn check_status(doc: &Value) -> Result<(), FetchError> {
    match doc.get("status").and_then(Value::as_str) {
        Some("ok") => Ok(()),
        Some(other) => {
            let reason = doc
                .get("data")
                .and_then(Value::as_str)
                .unwrap_or("no reason given");
            Err(FetchError::Rejected(format!("status={}: {}", other, reason)))
        }
        None => Err(FetchError::Rejected("missing status marker".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalizes a raw feed document into an `AirQualityRecord`.
///
/// Extraction is deliberately lenient: partial sensor coverage is expected,
/// so a missing or non-numeric field becomes its default (0 for the index,
/// 0.0 for pollutant readings, `requested_city` for the city name) instead
/// of failing the whole record. The severity level is always recomputed from
/// the extracted index, never taken from the document.
///
/// # Errors
/// `NormalizeError::Unreadable` only when the document is not a JSON object
/// at all.
pub fn normalize_feed(
    doc: &Value,
    requested_city: &str,
) -> Result<AirQualityRecord, NormalizeError> {
    if !doc.is_object() {
        return Err(NormalizeError::Unreadable(format!(
            "expected a JSON object, got {}",
            json_kind(doc)
        )));
    }

    let data = doc.get("data");

    let city = data
        .and_then(|d| d.get("city"))
        .and_then(|c| c.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(requested_city)
        .to_string();

    let aqi = data.and_then(|d| d.get("aqi")).map_or(0, index_value);

    let iaqi = data.and_then(|d| d.get("iaqi"));
    let mut readings = [0.0f64; 6];
    for (slot, code) in readings.iter_mut().zip(POLLUTANT_CODES) {
        *slot = iaqi.map_or(0.0, |m| pollutant_value(m, code));
    }
    let [pm25, pm10, co, no2, o3, so2] = readings;

    let source = if doc.get("synthetic").and_then(Value::as_bool) == Some(true) {
        SOURCE_SYNTHETIC
    } else {
        SOURCE_WAQI
    };

    Ok(AirQualityRecord {
        city,
        aqi,
        pm25,
        pm10,
        co,
        no2,
        o3,
        so2,
        level: AqiLevel::from_aqi(aqi),
        source: source.to_string(),
        raw_payload: doc.to_string(),
    })
}

/// Extracts the overall index. Fractional values truncate toward zero; the
/// feed's "-" placeholder and anything else non-numeric become 0.
fn index_value(value: &Value) -> i64 {
    if let Some(n) = value.as_i64() {
        n
    } else if let Some(f) = value.as_f64() {
        f as i64
    } else {
        0
    }
}

/// Extracts one pollutant reading from the `iaqi` mapping: the `v` field of
/// the entry named by `code`, or 0.0 when the entry or its value is missing
/// or non-numeric.
fn pollutant_value(iaqi: &Value, code: &str) -> f64 {
    iaqi.get(code)
        .and_then(|entry| entry.get("v"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
