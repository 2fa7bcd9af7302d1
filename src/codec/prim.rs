//! Conversion of the [`Primitive`] kinds.
//!
//! Coercion is loose, in the manner of a dynamic language: a number field holding `"12"` encodes
//! as `12`, one holding `"twelve"` encodes as `null`. Numeric (and date) coercion never fails. The
//! only errors come from pattern text.
use super::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Encode a value as a primitive kind.
///
/// # Example
/// ```rust
/// # use dserd::*;
/// use serde_json::json;
///
/// assert_eq!(encode_primitive(&Value::from("12"), Primitive::Number), json!(12));
/// assert_eq!(encode_primitive(&Value::from("twelve"), Primitive::Number), Json::Null);
/// assert_eq!(encode_primitive(&Value::from(""), Primitive::Boolean), json!(false));
/// assert_eq!(encode_primitive(&Value::from(2.5), Primitive::Text), json!("2.5"));
/// assert_eq!(encode_primitive(&Value::Absent, Primitive::Text), Json::Null);
/// ```
pub fn encode(value: &Value, kind: Primitive) -> Json {
    if value.is_nil() {
        return Json::Null;
    }

    match kind {
        Primitive::Boolean => Json::Bool(value.truthy()),
        Primitive::Number => match value_to_num(value) {
            Some(n) => num_to_json(n),
            None => {
                tracing::debug!(kind = value.kind(), "number coercion failed, encoding null");
                Json::Null
            }
        },
        Primitive::Text | Primitive::Date | Primitive::Pattern => Json::String(value.to_string()),
    }
}

/// Decode JSON as a primitive kind into `target`.
///
/// `null` always decodes to [`Value::Null`]. A date decoded onto an existing date target
/// updates that target; every other kind replaces it.
///
/// # Example
/// ```rust
/// # use dserd::*;
/// use serde_json::json;
///
/// let mut v = Value::Absent;
/// decode_primitive(&json!("7.5"), Primitive::Number, &mut v).unwrap();
/// assert_eq!(v, Value::Num(7.5));
///
/// decode_primitive(&json!("/a+/g"), Primitive::Pattern, &mut v).unwrap();
/// assert_eq!(v.pattern().map(|p| p.body()), Some("a+"));
///
/// assert!(decode_primitive(&json!("a+"), Primitive::Pattern, &mut v).is_err());
/// ```
pub fn decode(data: &Json, kind: Primitive, target: &mut Value) -> Result<()> {
    if data.is_null() {
        *target = Value::Null;
        return Ok(());
    }

    match kind {
        Primitive::Date => match json_to_date(data) {
            Some(date) => match *target {
                Value::Date(ref mut existing) => *existing = date,
                _ => *target = Value::Date(date),
            },
            None => {
                tracing::debug!(kind = json_kind(data), "date coercion failed, decoding null");
                *target = Value::Null;
            }
        },
        Primitive::Pattern => {
            let text = data
                .as_str()
                .ok_or_else(|| Error::MalformedPattern(data.to_string()))?;
            *target = Value::Pattern(Pattern::parse(text)?);
        }
        Primitive::Number => {
            *target = match json_to_num(data) {
                Some(n) => Value::Num(n),
                None => {
                    tracing::debug!(kind = json_kind(data), "number coercion failed, decoding null");
                    Value::Null
                }
            }
        }
        Primitive::Boolean => *target = Value::Bool(json_truthy(data)),
        Primitive::Text => *target = Value::Str(json_to_text(data)),
    }

    Ok(())
}

fn value_to_num(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Absent => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => bool_to_num(*b),
        Value::Num(n) => *n,
        Value::Str(s) => text_to_num(s)?,
        Value::Date(d) => d.timestamp_millis() as f64,
        Value::Pattern(_) | Value::List(_) | Value::Obj(_) => f64::NAN,
    };

    Some(n).filter(|n| !n.is_nan())
}

fn json_to_num(data: &Json) -> Option<f64> {
    let n = match data {
        Json::Null => 0.0,
        Json::Bool(b) => bool_to_num(*b),
        Json::Number(n) => n.as_f64()?,
        Json::String(s) => text_to_num(s)?,
        Json::Array(_) | Json::Object(_) => f64::NAN,
    };

    Some(n).filter(|n| !n.is_nan())
}

fn bool_to_num(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Surrounding whitespace is ignored and blank text is zero.
/// The only words accepted are the spelled out infinities.
fn text_to_num(s: &str) -> Option<f64> {
    match s.trim() {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        s if s
            .trim_start_matches(['+', '-'])
            .starts_with(|c: char| c.is_ascii_alphabetic()) =>
        {
            None
        }
        s => fast_float::parse(s).ok(),
    }
}

fn json_truthy(data: &Json) -> bool {
    match data {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map(|n| n != 0.0 && !n.is_nan()).unwrap_or(true),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

fn json_to_text(data: &Json) -> String {
    match data {
        Json::String(s) => s.clone(),
        Json::Number(n) => match n.as_f64() {
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        x => x.to_string(),
    }
}

fn json_to_date(data: &Json) -> Option<DateTime<Utc>> {
    match data {
        Json::String(s) => text_to_date(s),
        Json::Number(n) => Utc.timestamp_millis_opt(n.as_f64()? as i64).single(),
        _ => None,
    }
}

/// RFC 3339 first, then the common naive forms taken as UTC.
fn text_to_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(d) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| Utc.from_utc_datetime(&d))
}
