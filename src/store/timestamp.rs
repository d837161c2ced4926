//! Store timestamps and their tolerant conversions.
//!
//! Documents written by this client carry timestamps in the store-native
//! form, a JSON object `{"seconds": .., "nanos": ..}`. Documents written
//! by other tooling may carry an RFC 3339 string or raw epoch
//! milliseconds instead, and older documents may have no timestamp at
//! all. Reads accept all of these; display renders missing values empty.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::{json, Value};

/// A point in time read from or written to the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocTimestamp(DateTime<Utc>);

impl DocTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_millis(millis: i64) -> Self {
        // Out-of-range values clamp to the epoch rather than erroring;
        // a garbage timestamp should never take the note list down.
        Self(Utc.timestamp_millis_opt(millis).single().unwrap_or_default())
    }

    /// Parse a timestamp from any of the accepted JSON encodings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let seconds = map.get("seconds")?.as_i64()?;
                let nanos = map.get("nanos").and_then(Value::as_i64).unwrap_or(0);
                Utc.timestamp_opt(seconds, nanos as u32).single().map(Self)
            }
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| Self(dt.with_timezone(&Utc))),
            Value::Number(n) => n.as_i64().map(Self::from_millis),
            _ => None,
        }
    }

    /// Store-native JSON encoding.
    pub fn to_value(self) -> Value {
        json!({
            "seconds": self.0.timestamp(),
            "nanos": self.0.timestamp_subsec_nanos(),
        })
    }

    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render a timestamp for display in the local timezone, e.g.
/// `04 Mar 2026 14:05`. Missing timestamps render as the empty string.
pub fn format_timestamp(ts: Option<&DocTimestamp>) -> String {
    match ts {
        Some(ts) => ts
            .to_datetime()
            .with_timezone(&Local)
            .format("%d %b %Y %H:%M")
            .to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_native_object() {
        let ts = DocTimestamp::from_value(&json!({"seconds": 1_700_000_000, "nanos": 500_000_000}))
            .unwrap();
        assert_eq!(ts.millis(), 1_700_000_000_500);
    }

    #[test]
    fn test_from_native_object_without_nanos() {
        let ts = DocTimestamp::from_value(&json!({"seconds": 1_700_000_000})).unwrap();
        assert_eq!(ts.millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_from_rfc3339_string() {
        let ts = DocTimestamp::from_value(&json!("2023-11-14T22:13:20Z")).unwrap();
        assert_eq!(ts.millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_from_epoch_millis() {
        let ts = DocTimestamp::from_value(&json!(1_700_000_000_000i64)).unwrap();
        assert_eq!(ts.millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_from_null_or_garbage() {
        assert!(DocTimestamp::from_value(&Value::Null).is_none());
        assert!(DocTimestamp::from_value(&json!(true)).is_none());
        assert!(DocTimestamp::from_value(&json!("not a date")).is_none());
        assert!(DocTimestamp::from_value(&json!({"sec": 1})).is_none());
    }

    #[test]
    fn test_native_roundtrip() {
        let ts = DocTimestamp::from_millis(1_700_000_000_123);
        let back = DocTimestamp::from_value(&ts.to_value()).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_ordering() {
        let earlier = DocTimestamp::from_millis(1_000);
        let later = DocTimestamp::from_millis(2_000);
        assert!(earlier < later);
    }

    #[test]
    fn test_format_missing_is_empty() {
        assert_eq!(format_timestamp(None), "");
    }

    #[test]
    fn test_format_present_is_nonempty() {
        let ts = DocTimestamp::from_millis(1_700_000_000_000);
        let rendered = format_timestamp(Some(&ts));
        assert!(!rendered.is_empty());
        assert!(rendered.contains("2023"));
    }
}
