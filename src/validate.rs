/// Pre-persistence record validation.
///
/// A pure, side-effect-free gate between normalization and storage. Checks
/// run in a fixed order and the first failure wins. Two constraints are
/// carried by the type system instead of runtime checks: field presence
/// (every field of `AirQualityRecord` exists by construction) and severity
/// membership (`AqiLevel` has exactly the six categories).

use crate::model::{AirQualityRecord, ValidationError};

/// Validates a record against the archival payload cap, in order:
/// 1. city non-empty after trimming whitespace
/// 2. every pollutant reading finite (the index is an integer, always finite)
/// 3. raw payload within `max_payload_chars` characters
///
/// Oversized payloads are rejected here, not truncated; truncation is a
/// storage concern.
pub fn validate(
    record: &AirQualityRecord,
    max_payload_chars: usize,
) -> Result<(), ValidationError> {
    if record.city.trim().is_empty() {
        return Err(ValidationError::EmptyCity);
    }

    for (code, value) in record.pollutants() {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteReading(code));
        }
    }

    let payload_chars = record.raw_payload.chars().count();
    if payload_chars > max_payload_chars {
        return Err(ValidationError::OversizedPayload(payload_chars));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_RAW_PAYLOAD_CHARS;
    use crate::model::AqiLevel;

    fn record() -> AirQualityRecord {
        AirQualityRecord {
            city: "Beijing".to_string(),
            aqi: 152,
            pm25: 152.0,
            pm10: 80.0,
            co: 8.9,
            no2: 22.4,
            o3: 41.0,
            so2: 4.6,
            level: AqiLevel::ModeratelyPolluted,
            source: "waqi".to_string(),
            raw_payload: r#"{"status":"ok"}"#.to_string(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert_eq!(validate(&record(), MAX_RAW_PAYLOAD_CHARS), Ok(()));
    }

    #[test]
    fn test_empty_city_rejected_named_city_accepted() {
        let mut bad = record();
        bad.city = "".to_string();
        assert_eq!(
            validate(&bad, MAX_RAW_PAYLOAD_CHARS),
            Err(ValidationError::EmptyCity)
        );

        bad.city = "Beijing".to_string();
        assert_eq!(validate(&bad, MAX_RAW_PAYLOAD_CHARS), Ok(()));
    }

    #[test]
    fn test_whitespace_only_city_rejected() {
        let mut bad = record();
        bad.city = " \t ".to_string();
        assert_eq!(
            validate(&bad, MAX_RAW_PAYLOAD_CHARS),
            Err(ValidationError::EmptyCity)
        );
    }

    #[test]
    fn test_non_finite_readings_rejected_with_field_name() {
        let mut bad = record();
        bad.no2 = f64::NAN;
        assert_eq!(
            validate(&bad, MAX_RAW_PAYLOAD_CHARS),
            Err(ValidationError::NonFiniteReading("no2"))
        );

        let mut bad = record();
        bad.o3 = f64::INFINITY;
        assert_eq!(
            validate(&bad, MAX_RAW_PAYLOAD_CHARS),
            Err(ValidationError::NonFiniteReading("o3"))
        );
    }

    #[test]
    fn test_oversized_payload_rejected_not_truncated() {
        let mut bad = record();
        bad.raw_payload = "x".repeat(MAX_RAW_PAYLOAD_CHARS + 1);
        assert_eq!(
            validate(&bad, MAX_RAW_PAYLOAD_CHARS),
            Err(ValidationError::OversizedPayload(MAX_RAW_PAYLOAD_CHARS + 1))
        );
        // The record itself is untouched.
        assert_eq!(bad.raw_payload.len(), MAX_RAW_PAYLOAD_CHARS + 1);
    }

    #[test]
    fn test_payload_cap_counts_characters_not_bytes() {
        let mut wide = record();
        // Four CJK chars, twelve bytes. A cap of 4 chars must accept it.
        wide.raw_payload = "北京空气".to_string();
        assert_eq!(validate(&wide, 4), Ok(()));
        assert_eq!(
            validate(&wide, 3),
            Err(ValidationError::OversizedPayload(4))
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Empty city and a NaN reading together: the city check comes first.
        let mut bad = record();
        bad.city = "".to_string();
        bad.pm25 = f64::NAN;
        assert_eq!(
            validate(&bad, MAX_RAW_PAYLOAD_CHARS),
            Err(ValidationError::EmptyCity)
        );
    }
}
