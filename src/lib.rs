/// aqmon_service: periodic air quality collection and storage service.
///
/// # Module structure
///
/// ```text
/// aqmon_service
/// ├── model      — shared data types (AirQualityRecord, AqiLevel, error enums)
/// ├── config     — environment-driven configuration (.env + AQ_* variables)
/// ├── db         — PostgreSQL connectivity and idempotent schema setup
/// ├── ingest
/// │   ├── waqi      — WAQI feed API: URL construction, fetch, normalization
/// │   ├── synthetic — placeholder documents when no API token is configured
/// │   └── fixtures (test only) — representative feed response payloads
/// ├── validate   — pre-persistence record validation
/// ├── stats      — process-lifetime persistence outcome counters
/// ├── store      — validated, retried, verified writes
/// └── daemon     — collection pipeline + scheduling loop
/// ```

/// Public modules
pub mod config;
pub mod daemon;
pub mod db;
pub mod ingest;
pub mod model;
pub mod stats;
pub mod store;
pub mod validate;
