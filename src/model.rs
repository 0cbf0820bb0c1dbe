/// Shared data types for the air quality collection service.
///
/// The central type is `AirQualityRecord`, the normalized unit that moves
/// through the pipeline (fetch → normalize → validate → persist). Severity
/// levels and the per-stage error enums live here so every module speaks the
/// same vocabulary.

use std::fmt;

/// Provider tag stored with records fetched from the live WAQI feed.
pub const SOURCE_WAQI: &str = "waqi";

/// Provider tag stored with locally generated placeholder records.
pub const SOURCE_SYNTHETIC: &str = "synthetic";

// ---------------------------------------------------------------------------
// Severity levels
// ---------------------------------------------------------------------------

/// Air quality severity category, derived deterministically from the AQI.
///
/// The ordering matters: categories are declared from least to most severe,
/// so `Ord` comparisons follow pollution severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AqiLevel {
    Good,
    Moderate,
    LightlyPolluted,
    ModeratelyPolluted,
    HeavilyPolluted,
    SeverelyPolluted,
}

impl AqiLevel {
    /// Maps an AQI value onto its severity category.
    ///
    /// Total over all integers: negative values fall into `Good` along with
    /// everything up to 50; there is no upper bound on `SeverelyPolluted`.
    pub fn from_aqi(aqi: i64) -> Self {
        if aqi <= 50 {
            AqiLevel::Good
        } else if aqi <= 100 {
            AqiLevel::Moderate
        } else if aqi <= 150 {
            AqiLevel::LightlyPolluted
        } else if aqi <= 200 {
            AqiLevel::ModeratelyPolluted
        } else if aqi <= 300 {
            AqiLevel::HeavilyPolluted
        } else {
            AqiLevel::SeverelyPolluted
        }
    }

    /// Stable tag used for the database `level` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiLevel::Good => "good",
            AqiLevel::Moderate => "moderate",
            AqiLevel::LightlyPolluted => "lightly_polluted",
            AqiLevel::ModeratelyPolluted => "moderately_polluted",
            AqiLevel::HeavilyPolluted => "heavily_polluted",
            AqiLevel::SeverelyPolluted => "severely_polluted",
        }
    }

    /// Parses a stored level tag back into a category.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "good" => Some(AqiLevel::Good),
            "moderate" => Some(AqiLevel::Moderate),
            "lightly_polluted" => Some(AqiLevel::LightlyPolluted),
            "moderately_polluted" => Some(AqiLevel::ModeratelyPolluted),
            "heavily_polluted" => Some(AqiLevel::HeavilyPolluted),
            "severely_polluted" => Some(AqiLevel::SeverelyPolluted),
            _ => None,
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Normalized record
// ---------------------------------------------------------------------------

/// A normalized air quality measurement, ready for validation and storage.
///
/// `level` is always recomputed from `aqi` at normalization time; it is never
/// taken from the source document. `raw_payload` carries the full raw
/// document as JSON text for audit and debugging.
#[derive(Debug, Clone)]
pub struct AirQualityRecord {
    pub city: String,
    pub aqi: i64,
    pub pm25: f64,
    pub pm10: f64,
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub level: AqiLevel,
    pub source: String,
    pub raw_payload: String,
}

impl AirQualityRecord {
    /// The six pollutant readings in schema order, paired with their codes.
    pub fn pollutants(&self) -> [(&'static str, f64); 6] {
        [
            ("pm25", self.pm25),
            ("pm10", self.pm10),
            ("co", self.co),
            ("no2", self.no2),
            ("o3", self.o3),
            ("so2", self.so2),
        ]
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failure while fetching a raw document from the WAQI feed.
///
/// Never retried inside the source client; the scheduler simply waits for
/// the next tick.
#[derive(Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, non-2xx status).
    Network(String),
    /// The provider answered but rejected the request (`status != "ok"`).
    Rejected(String),
    /// The response body was not valid JSON.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "WAQI request failed: {}", msg),
            FetchError::Rejected(msg) => write!(f, "WAQI rejected the request: {}", msg),
            FetchError::Decode(msg) => write!(f, "WAQI response was not valid JSON: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Failure while normalizing a raw document.
///
/// Missing individual fields never cause this; only a document that is not a
/// JSON object at all is unreadable.
#[derive(Debug)]
pub enum NormalizeError {
    Unreadable(String),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::Unreadable(msg) => {
                write!(f, "raw document is structurally unreadable: {}", msg)
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// A record failed pre-persistence validation. Terminal per attempt, never
/// retried.
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    /// City name empty after trimming whitespace.
    EmptyCity,
    /// A pollutant reading is NaN or infinite.
    NonFiniteReading(&'static str),
    /// `raw_payload` exceeds the archival size cap (length in chars).
    OversizedPayload(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyCity => write!(f, "city name is empty"),
            ValidationError::NonFiniteReading(field) => {
                write!(f, "field '{}' is not a finite number", field)
            }
            ValidationError::OversizedPayload(len) => {
                write!(f, "raw payload too large: {} chars", len)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Storage-layer failure during a save attempt. Retried with fixed backoff
/// up to the configured attempt limit.
#[derive(Debug)]
pub enum StorageError {
    /// Could not open a connection to the database.
    Connection(postgres::Error),
    /// Schema creation or insert statement failed.
    Statement(postgres::Error),
    /// The insert reported success but affected no rows.
    NoRowsInserted,
    /// Post-write verification found no matching row in the recent window.
    VerificationFailed { city: String, aqi: i64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Connection(e) => write!(f, "database connection failed: {}", e),
            StorageError::Statement(e) => write!(f, "database statement failed: {}", e),
            StorageError::NoRowsInserted => write!(f, "insert affected no rows"),
            StorageError::VerificationFailed { city, aqi } => write!(
                f,
                "inserted row not found on re-read (city={}, aqi={})",
                city, aqi
            ),
        }
    }
}

impl std::error::Error for StorageError {}

/// Outcome of `Store::save`: either the record was structurally invalid
/// (no retry) or storage kept failing until attempts ran out.
#[derive(Debug)]
pub enum SaveError {
    Validation(ValidationError),
    Storage(StorageError),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Validation(e) => write!(f, "validation failed: {}", e),
            SaveError::Storage(e) => write!(f, "storage failed: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

/// Pipeline failure, tagged by the stage that produced it so callers can
/// branch on kind.
#[derive(Debug)]
pub enum CollectError {
    Fetch(FetchError),
    Normalize(NormalizeError),
    Validation(ValidationError),
    Storage(StorageError),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::Fetch(e) => write!(f, "fetch: {}", e),
            CollectError::Normalize(e) => write!(f, "normalize: {}", e),
            CollectError::Validation(e) => write!(f, "validate: {}", e),
            CollectError::Storage(e) => write!(f, "persist: {}", e),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<FetchError> for CollectError {
    fn from(e: FetchError) -> Self {
        CollectError::Fetch(e)
    }
}

impl From<NormalizeError> for CollectError {
    fn from(e: NormalizeError) -> Self {
        CollectError::Normalize(e)
    }
}

impl From<SaveError> for CollectError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Validation(v) => CollectError::Validation(v),
            SaveError::Storage(s) => CollectError::Storage(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Severity mapping ---------------------------------------------------

    #[test]
    fn test_level_boundaries_match_documented_table() {
        assert_eq!(AqiLevel::from_aqi(0), AqiLevel::Good);
        assert_eq!(AqiLevel::from_aqi(50), AqiLevel::Good);
        assert_eq!(AqiLevel::from_aqi(51), AqiLevel::Moderate);
        assert_eq!(AqiLevel::from_aqi(100), AqiLevel::Moderate);
        assert_eq!(AqiLevel::from_aqi(101), AqiLevel::LightlyPolluted);
        assert_eq!(AqiLevel::from_aqi(150), AqiLevel::LightlyPolluted);
        assert_eq!(AqiLevel::from_aqi(151), AqiLevel::ModeratelyPolluted);
        assert_eq!(AqiLevel::from_aqi(200), AqiLevel::ModeratelyPolluted);
        assert_eq!(AqiLevel::from_aqi(201), AqiLevel::HeavilyPolluted);
        assert_eq!(AqiLevel::from_aqi(300), AqiLevel::HeavilyPolluted);
        assert_eq!(AqiLevel::from_aqi(301), AqiLevel::SeverelyPolluted);
    }

    #[test]
    fn test_level_is_total_over_negative_aqi() {
        // The feed occasionally produces nonsense; negative values must map
        // somewhere rather than panic. They count as Good per the <= 50 rule.
        assert_eq!(AqiLevel::from_aqi(-1), AqiLevel::Good);
        assert_eq!(AqiLevel::from_aqi(i64::MIN), AqiLevel::Good);
        assert_eq!(AqiLevel::from_aqi(i64::MAX), AqiLevel::SeverelyPolluted);
    }

    #[test]
    fn test_level_is_monotonic_in_aqi() {
        let mut previous = AqiLevel::from_aqi(-10);
        for aqi in -10..=500 {
            let level = AqiLevel::from_aqi(aqi);
            assert!(
                level >= previous,
                "severity must never decrease as AQI rises: aqi={} gave {:?} after {:?}",
                aqi,
                level,
                previous
            );
            previous = level;
        }
    }

    #[test]
    fn test_level_str_round_trip() {
        let levels = [
            AqiLevel::Good,
            AqiLevel::Moderate,
            AqiLevel::LightlyPolluted,
            AqiLevel::ModeratelyPolluted,
            AqiLevel::HeavilyPolluted,
            AqiLevel::SeverelyPolluted,
        ];
        for level in levels {
            assert_eq!(
                AqiLevel::from_str(level.as_str()),
                Some(level),
                "tag {} must parse back to its category",
                level
            );
        }
        assert_eq!(AqiLevel::from_str("excellent"), None);
        assert_eq!(AqiLevel::from_str(""), None);
    }

    // --- Error display ------------------------------------------------------

    #[test]
    fn test_collect_error_names_the_failing_stage() {
        let fetch: CollectError = FetchError::Rejected("Invalid key".to_string()).into();
        assert!(fetch.to_string().starts_with("fetch:"));

        let validation: CollectError =
            SaveError::Validation(ValidationError::EmptyCity).into();
        assert!(validation.to_string().starts_with("validate:"));

        let storage: CollectError = SaveError::Storage(StorageError::NoRowsInserted).into();
        assert!(storage.to_string().starts_with("persist:"));
    }
}
