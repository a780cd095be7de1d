use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
#[error("malformed payload: {0}")]
pub struct MalformedPayload(#[from] serde_json::Error);

#[derive(Serialize)]
struct Stamped<'a> {
    message: &'a Value,
    at: String,
}

/// Wraps a JSON payload as `{"message": <payload>, "at": <now>}`.
pub fn stamp(payload: &[u8]) -> Result<Vec<u8>, MalformedPayload> {
    stamp_at(payload, Utc::now())
}

pub fn stamp_at(payload: &[u8], at: DateTime<Utc>) -> Result<Vec<u8>, MalformedPayload> {
    let message: Value = serde_json::from_slice(payload)?;
    let stamped = Stamped {
        message: &message,
        at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_vec(&stamped)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wraps_object() {
        let at = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        assert_eq!(
            String::from_utf8(stamp_at(br#"{"a":1}"#, at).unwrap()).unwrap(),
            r#"{"message":{"a":1},"at":"2024-05-17T09:30:00.000Z"}"#
        );
    }

    #[test]
    fn wraps_any_json_value() {
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            String::from_utf8(stamp_at(br#" "hi" "#, at).unwrap()).unwrap(),
            r#"{"message":"hi","at":"2000-01-01T00:00:00.000Z"}"#
        );
        assert_eq!(
            String::from_utf8(stamp_at(b"[1,null]", at).unwrap()).unwrap(),
            r#"{"message":[1,null],"at":"2000-01-01T00:00:00.000Z"}"#
        );
    }

    #[test]
    fn rejects_malformed_payload() {
        assert!(stamp(b"{\"a\":").is_err());
        assert!(stamp(b"not json").is_err());
        assert!(stamp(&[0xff, 0xfe]).is_err());
        assert!(stamp(b"").is_err());
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let stamped: Value = serde_json::from_slice(&stamp(b"42").unwrap()).unwrap();
        assert_eq!(stamped["message"], 42);
        let at = stamped["at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(at).is_ok());
        assert!(at.ends_with('Z'));
    }
}
