//! Lenient deserializers for the request bodies.
//!
//! The web forms post numbers as strings (`"value": "1500"`) and ids as
//! either numbers or strings, so the request types accept both.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => Ok(v as f64),
        NumberOrString::Float(v) => Ok(v),
        NumberOrString::Str(s) => parse_money(&s).map_err(de::Error::custom),
    }
}

pub fn optional_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Int(v)) => Ok(Some(v as f64)),
        Some(NumberOrString::Float(v)) => Ok(Some(v)),
        Some(NumberOrString::Str(s)) => parse_money(&s).map(Some).map_err(de::Error::custom),
    }
}

fn parse_money(s: &str) -> Result<f64, String> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("invalid monetary value: {:?}", s))?;
    if !value.is_finite() {
        return Err(format!("invalid monetary value: {:?}", s));
    }
    Ok(value)
}

/// Contact reference as posted by the deal form. `null`, `0` and `""` all
/// mean "no contact".
pub fn contact_ref<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Int(0)) => Ok(None),
        Some(NumberOrString::Int(v)) => Ok(Some(v)),
        Some(NumberOrString::Float(v)) if v.fract() == 0.0 && v != 0.0 => Ok(Some(v as i64)),
        Some(NumberOrString::Float(v)) if v == 0.0 => Ok(None),
        Some(NumberOrString::Float(v)) => Err(de::Error::custom(format!(
            "invalid contact id: {}",
            v
        ))),
        Some(NumberOrString::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Str(s)) => match s.trim().parse::<i64>() {
            Ok(0) => Ok(None),
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(de::Error::custom(format!("invalid contact id: {:?}", s))),
        },
    }
}

/// Same as [`contact_ref`] but keeps absent apart from "no contact", for
/// partial updates.
pub fn contact_ref_update<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    contact_ref(deserializer).map(Some)
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp and keeps the date.
pub fn due_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).map_err(de::Error::custom)
}

pub fn optional_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_due_date(&raw).map(Some).map_err(de::Error::custom),
    }
}

pub fn parse_due_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("invalid due date: {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "money")]
        value: f64,
        #[serde(default, deserialize_with = "contact_ref")]
        contact_id: Option<i64>,
    }

    #[derive(Deserialize)]
    struct UpdateProbe {
        #[serde(default, deserialize_with = "contact_ref_update")]
        contact_id: Option<Option<i64>>,
    }

    #[test]
    fn test_money_accepts_strings_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"value": "1234.5"}"#).unwrap();
        assert_eq!(p.value, 1234.5);
        let p: Probe = serde_json::from_str(r#"{"value": 99}"#).unwrap();
        assert_eq!(p.value, 99.0);
        assert!(serde_json::from_str::<Probe>(r#"{"value": "abc"}"#).is_err());
    }

    #[test]
    fn test_contact_ref_variants() {
        let p: Probe = serde_json::from_str(r#"{"value": 1, "contact_id": "7"}"#).unwrap();
        assert_eq!(p.contact_id, Some(7));
        let p: Probe = serde_json::from_str(r#"{"value": 1, "contact_id": ""}"#).unwrap();
        assert_eq!(p.contact_id, None);
        let p: Probe = serde_json::from_str(r#"{"value": 1, "contact_id": 0}"#).unwrap();
        assert_eq!(p.contact_id, None);
        let p: Probe = serde_json::from_str(r#"{"value": 1}"#).unwrap();
        assert_eq!(p.contact_id, None);
    }

    #[test]
    fn test_contact_ref_update_keeps_absent_apart_from_null() {
        let p: UpdateProbe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.contact_id, None);
        let p: UpdateProbe = serde_json::from_str(r#"{"contact_id": null}"#).unwrap();
        assert_eq!(p.contact_id, Some(None));
        let p: UpdateProbe = serde_json::from_str(r#"{"contact_id": 3}"#).unwrap();
        assert_eq!(p.contact_id, Some(Some(3)));
    }

    #[test]
    fn test_parse_due_date() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(parse_due_date("2026-10-15").unwrap(), expected);
        assert_eq!(parse_due_date("2026-10-15T00:00:00.000Z").unwrap(), expected);
        assert!(parse_due_date("15/10/2026").is_err());
    }
}
