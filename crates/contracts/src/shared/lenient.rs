//! `deserialize_with` helpers for fields the backend sends with
//! inconsistent JSON types (`"2015"` vs `2015`, `null` vs missing).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::numeric::{parse_int_or_zero, parse_or_zero};

/// Number, numeric string or null as f64 (null and garbage become 0)
pub fn f64_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_or_zero(&s),
        _ => 0.0,
    })
}

pub fn i64_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_or_zero(&s),
        _ => 0,
    })
}

pub fn u64_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = i64_or_string(deserializer)?;
    Ok(u64::try_from(value).unwrap_or(0))
}

/// Any scalar rendered as text; null becomes ""
pub fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

/// Planting year: number or string, 0 and empty become `None`
pub fn opt_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let year = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(year.filter(|y| *y > 0))
}

pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "f64_or_string")]
        weight: f64,
        #[serde(default, deserialize_with = "string_or_number")]
        nik: String,
        #[serde(default, deserialize_with = "opt_year")]
        tahun: Option<u32>,
        #[serde(default, deserialize_with = "u64_or_string")]
        id: u64,
    }

    #[test]
    fn test_mixed_types_are_accepted() {
        let p: Probe =
            serde_json::from_str(r#"{"weight":"12.5","nik":123,"tahun":"2015","id":"7"}"#).unwrap();
        assert_eq!(p.weight, 12.5);
        assert_eq!(p.nik, "123");
        assert_eq!(p.tahun, Some(2015));
        assert_eq!(p.id, 7);
    }

    #[test]
    fn test_nulls_and_missing_fall_back() {
        let p: Probe = serde_json::from_str(r#"{"weight":null,"nik":null,"tahun":0}"#).unwrap();
        assert_eq!(p.weight, 0.0);
        assert_eq!(p.nik, "");
        assert_eq!(p.tahun, None);
        assert_eq!(p.id, 0);
    }
}
