//! KSQL statement payloads.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ProvisionResult;

/// Streams property controlling where new persistent queries start reading.
pub const OFFSET_RESET_PROPERTY: &str = "ksql.streams.auto.offset.reset";

/// Declares the turnstile table over the station turnstile topic and the
/// per-station count aggregation on top of it.
pub const TURNSTILE_STATEMENT: &str = r#"
CREATE TABLE turnstile (
    station_id INT,
    station_name VARCHAR,
    line VARCHAR
) WITH (
    KAFKA_TOPIC = 'cta.data2.station.turnstiles',
    VALUE_FORMAT = 'AVRO',
    KEY = 'station_id'
);

CREATE TABLE turnstile_summary
WITH (VALUE_FORMAT = 'JSON') AS
    SELECT station_id, COUNT(station_id) AS count
    FROM turnstile
    GROUP BY station_id;
"#;

/// Statement body posted to the `/ksql` endpoint.
///
/// Built once and only read afterwards; the fields are private so a request
/// handed to the provisioner cannot change under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningRequest {
    #[serde(rename = "ksql")]
    statement: String,

    #[serde(rename = "streamsProperties")]
    streams_properties: BTreeMap<String, String>,
}

impl ProvisioningRequest {
    /// Create a request without streams properties.
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            streams_properties: BTreeMap::new(),
        }
    }

    /// Add a streams property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.streams_properties.insert(key.into(), value.into());
        self
    }

    /// The turnstile tables, read from the given offset.
    pub fn turnstile(offset_reset: &str) -> Self {
        Self::new(TURNSTILE_STATEMENT).with_property(OFFSET_RESET_PROPERTY, offset_reset)
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn streams_properties(&self) -> &BTreeMap<String, String> {
        &self.streams_properties
    }

    /// Pretty-printed JSON body, as sent on the wire.
    pub fn to_json_pretty(&self) -> ProvisionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
