//! 日期类型模块
//!
//! 租赁业务只关心"哪一天"，因此统一使用按天粒度的日期：
//! - `RentalDate`: 可序列化的日历日期（`YYYY-MM-DD`）
//! - `DateRange`: 闭区间 `[start, end]`

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const WIRE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

// =========================================================
// RentalDate - 按天粒度的日期
// =========================================================

/// 日历日期，序列化为 `YYYY-MM-DD`
///
/// 反序列化时也接受服务端返回的完整时间串（如 `2024-05-10T00:00:00.000Z`），
/// 只保留日期部分。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RentalDate(NaiveDate);

impl RentalDate {
    /// 由年月日构造，非法日期返回 None
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// 解析 `YYYY-MM-DD` 或以其开头的时间串
    ///
    /// 空串和无法识别的输入返回 None
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let day_part = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(day_part, WIRE_FORMAT)
            .ok()
            .map(Self)
    }

    /// 供 `<input type="date">` 使用的值
    pub fn to_input_value(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }

    /// 面向用户的展示格式 (dd/mm/yyyy)
    pub fn display_long(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    #[inline]
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for RentalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for RentalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for RentalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RentalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

// =========================================================
// DateRange - 闭区间
// =========================================================

/// 闭区间 `[start, end]`，两端都包含在内
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: RentalDate,
    pub end: RentalDate,
}

impl DateRange {
    pub fn new(start: RentalDate, end: RentalDate) -> Self {
        Self { start, end }
    }

    /// 起始日期是否严格早于结束日期
    pub fn is_strictly_ordered(&self) -> bool {
        self.start < self.end
    }

    /// 两个闭区间是否相交
    ///
    /// 边界相等也算相交：一个区间的结束日等于另一个的开始日时返回 true。
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.display_long(),
            self.end.display_long()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_day_and_timestamp() {
        let plain = RentalDate::parse("2024-05-10").unwrap();
        let stamped = RentalDate::parse("2024-05-10T00:00:00.000Z").unwrap();
        assert_eq!(plain, stamped);
        assert_eq!(plain.to_string(), "2024-05-10");
        assert_eq!(plain.display_long(), "10/05/2024");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(RentalDate::parse("").is_none());
        assert!(RentalDate::parse("tomorrow").is_none());
        assert!(RentalDate::parse("2024-13-01").is_none());
    }

    #[test]
    fn serde_uses_wire_format() {
        let date = RentalDate::from_ymd(2024, 1, 5).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-01-05\"");
        let back: RentalDate = serde_json::from_str("\"2024-01-05T10:30:00Z\"").unwrap();
        assert_eq!(back, date);
    }
}
