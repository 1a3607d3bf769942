//! Indexers encode large integers inconsistently: as JSON numbers or as decimal
//! strings. Numbers keep their literal digits (`arbitrary_precision`), so
//! amounts beyond `u64` are read exactly and fractional ones are rejected.
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

fn to_biguint(value: &Value) -> Option<BigUint> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

pub(crate) fn biguint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_biguint(&value).ok_or_else(|| D::Error::custom(format!("expected an integer amount, got {}", value)))
}

pub(crate) fn u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| D::Error::custom(format!("expected an unsigned integer, got {}", value)))
}

pub(crate) fn vec_u64_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<u64>, D::Error> {
    #[derive(Deserialize)]
    struct Item(#[serde(deserialize_with = "u64_lenient")] u64);

    let items = Vec::<Item>::deserialize(deserializer)?;
    Ok(items.into_iter().map(|Item(v)| v).collect())
}

/// Render a discriminator that may be a string or a number as a string.
pub(crate) fn string_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected a string or number, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Amount {
        #[serde(deserialize_with = "biguint")]
        amount: BigUint,
    }

    #[derive(Deserialize)]
    struct Serials {
        #[serde(deserialize_with = "vec_u64_lenient")]
        serials: Vec<u64>,
    }

    #[test]
    fn amounts_parse_from_strings_and_numbers() {
        let a: Amount = serde_json::from_str(r#"{"amount":"5000000000000000000000"}"#).unwrap();
        assert_eq!(a.amount.to_string(), "5000000000000000000000");
        let a: Amount = serde_json::from_str(r#"{"amount":42}"#).unwrap();
        assert_eq!(a.amount, BigUint::from(42u32));
        assert!(serde_json::from_str::<Amount>(r#"{"amount":null}"#).is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"amount":-1}"#).is_err());
    }

    #[test]
    fn numeric_amounts_beyond_u64_stay_exact() {
        let a: Amount = serde_json::from_str(r#"{"amount":20000000000000000001}"#).unwrap();
        assert_eq!(a.amount.to_string(), "20000000000000000001");
        let a: Amount =
            serde_json::from_str(r#"{"amount":123456789012345678901234567891}"#).unwrap();
        assert_eq!(a.amount.to_string(), "123456789012345678901234567891");
    }

    #[test]
    fn fractional_amounts_are_rejected() {
        assert!(serde_json::from_str::<Amount>(r#"{"amount":1.5}"#).is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"amount":2e19}"#).is_err());
    }

    #[test]
    fn serials_accept_mixed_encodings() {
        let s: Serials = serde_json::from_str(r#"{"serials":[1,"2",3]}"#).unwrap();
        assert_eq!(s.serials, vec![1, 2, 3]);
    }
}
