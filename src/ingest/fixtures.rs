/// Test fixtures: representative JSON payloads from the WAQI feed API.
///
/// These fixtures are structurally complete but trimmed to the minimum
/// needed to exercise the normalizer. They reflect the real envelope
/// returned by:
///   https://api.waqi.info/feed/{city}/?token={token}
///
/// Feed response shape:
///   response.status            — "ok" or "error"
///   response.data.aqi          — overall index (number, or "-" when unknown)
///   response.data.idx          — station id
///   response.data.city.name    — station's reported location name
///   response.data.dominentpol  — dominant pollutant code
///   response.data.iaqi.{code}.v — per-pollutant readings
///   response.data.time.iso     — measurement timestamp
///
/// On rejection the envelope carries a reason string in `data`:
///   {"status": "error", "data": "Invalid key"}

/// Beijing with all six pollutant readings plus the extra entries (t, w)
/// real stations report. AQI 152 sits in the moderately polluted band.
pub(crate) fn fixture_beijing_full_json() -> &'static str {
    r#"{
      "status": "ok",
      "data": {
        "aqi": 152,
        "idx": 1451,
        "city": {
          "name": "Beijing (北京)",
          "geo": [39.954592, 116.468117],
          "url": "https://aqicn.org/city/beijing"
        },
        "dominentpol": "pm25",
        "iaqi": {
          "pm25": { "v": 152.0 },
          "pm10": { "v": 80.0 },
          "co":   { "v": 8.9 },
          "no2":  { "v": 22.4 },
          "o3":   { "v": 41.0 },
          "so2":  { "v": 4.6 },
          "t":    { "v": 21.0 },
          "w":    { "v": 1.5 }
        },
        "time": {
          "s": "2024-05-01 12:00:00",
          "tz": "+08:00",
          "iso": "2024-05-01T12:00:00+08:00"
        }
      }
    }"#
}

/// Station reporting only particulates — simulates partial sensor coverage.
/// The four absent pollutants must normalize to 0.0, not fail the record.
pub(crate) fn fixture_sparse_iaqi_json() -> &'static str {
    r#"{
      "status": "ok",
      "data": {
        "aqi": 98,
        "idx": 7397,
        "city": { "name": "Beijing (北京)" },
        "dominentpol": "pm25",
        "iaqi": {
          "pm25": { "v": 98.0 },
          "pm10": { "v": 46.0 }
        },
        "time": { "iso": "2024-05-01T12:00:00+08:00" }
      }
    }"#
}

/// Station with pollutant readings but no computed overall index — the feed
/// uses the string "-" in that case. Index must default to 0.
pub(crate) fn fixture_dash_aqi_json() -> &'static str {
    r#"{
      "status": "ok",
      "data": {
        "aqi": "-",
        "idx": 9034,
        "city": { "name": "Beijing (北京)" },
        "iaqi": {
          "pm10": { "v": 12.0 },
          "o3":   { "v": 18.0 }
        },
        "time": { "iso": "2024-05-01T12:00:00+08:00" }
      }
    }"#
}

/// Fractional index and a non-numeric pollutant value. The index truncates
/// toward zero; the bad reading degrades to 0.0.
pub(crate) fn fixture_fractional_values_json() -> &'static str {
    r#"{
      "status": "ok",
      "data": {
        "aqi": 75.6,
        "city": { "name": "Beijing (北京)" },
        "iaqi": {
          "pm25": { "v": 75.6 },
          "so2":  { "v": "n/a" }
        }
      }
    }"#
}

/// Envelope without a city name — the requested city is the fallback.
pub(crate) fn fixture_missing_city_name_json() -> &'static str {
    r#"{
      "status": "ok",
      "data": {
        "aqi": 42,
        "iaqi": { "pm25": { "v": 42.0 } }
      }
    }"#
}

/// Provider rejection, e.g. a bad or expired token. The reason string
/// travels in `data`.
pub(crate) fn fixture_error_status_json() -> &'static str {
    r#"{
      "status": "error",
      "data": "Invalid key"
    }"#
}
