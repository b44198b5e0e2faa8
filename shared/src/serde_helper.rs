//! 宽松反序列化辅助函数
//!
//! 服务端数据来自手工录入的后台，字段经常是 `null`、字符串形式的数字等。
//! 这里集中处理这些情况，避免单个脏字段导致整个列表解析失败。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::RentalDate;

/// 价格字段：数字、数字字符串均可；缺失、`null` 或其他内容视为 0
pub fn lenient_price<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(price_from_value).unwrap_or(0))
}

/// 金额字段（可能带 .5 的押金等）：规则同 `lenient_price`
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value).unwrap_or(0.0))
}

/// 可选金额字段：无法解析时为 None
pub fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}

/// `null` 视为默认值（通常是空列表）
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 空字符串视为 None
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// 日期字段：空串或无法解析的内容视为 None
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<RentalDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(RentalDate::parse))
}

fn price_from_value(value: &Value) -> i64 {
    amount_from_value(value)
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i64)
        .unwrap_or(0)
}

fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(default, deserialize_with = "lenient_price")]
        price: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    fn price_of(json: &str) -> i64 {
        serde_json::from_str::<Priced>(json).unwrap().price
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        assert_eq!(price_of(r#"{"price": 1200}"#), 1200);
        assert_eq!(price_of(r#"{"price": "850"}"#), 850);
        assert_eq!(price_of(r#"{"price": 99.6}"#), 100);
    }

    #[test]
    fn price_falls_back_to_zero() {
        assert_eq!(price_of(r#"{}"#), 0);
        assert_eq!(price_of(r#"{"price": null}"#), 0);
        assert_eq!(price_of(r#"{"price": "free"}"#), 0);
        assert_eq!(price_of(r#"{"price": {"amount": 3}}"#), 0);
    }

    #[test]
    fn null_list_becomes_empty() {
        let parsed: Priced = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(parsed.tags.is_empty());
    }
}
