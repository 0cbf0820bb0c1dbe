/// Synthetic feed documents for running without a WAQI API token.
///
/// Produces documents in the same envelope shape as the live feed so the
/// whole pipeline (normalize → validate → persist) is exercised unchanged.
/// A top-level `synthetic` marker and a `generated_at` timestamp make these
/// documents unmistakable in the archival payload.

use chrono::Utc;
use serde_json::{Value, json};

/// Plausible value ranges per reading: (code, low, high).
const READING_RANGES: [(&str, f64, f64); 6] = [
    ("pm25", 10.0, 150.0),
    ("pm10", 20.0, 200.0),
    ("co", 0.5, 3.0),
    ("no2", 10.0, 100.0),
    ("o3", 20.0, 200.0),
    ("so2", 5.0, 50.0),
];

/// Builds a synthetic raw measurement document for `city`.
///
/// The overall index lands in [50, 200] so generated records span the
/// moderate-to-moderately-polluted bands rather than clustering at either
/// extreme.
pub fn feed_document(city: &str) -> Value {
    let aqi = fastrand::i64(50..=200);

    let mut iaqi = serde_json::Map::new();
    for (code, low, high) in READING_RANGES {
        iaqi.insert(code.to_string(), json!({ "v": uniform(low, high) }));
    }

    json!({
        "status": "ok",
        "synthetic": true,
        "generated_at": Utc::now().to_rfc3339(),
        "data": {
            "aqi": aqi,
            "city": { "name": city },
            "iaqi": Value::Object(iaqi)
        }
    })
}

/// Uniform draw in [low, high], rounded to two decimals like the readings
/// the live feed reports.
fn uniform(low: f64, high: f64) -> f64 {
    let value = low + fastrand::f64() * (high - low);
    (value * 100.0).round() / 100.0
}
